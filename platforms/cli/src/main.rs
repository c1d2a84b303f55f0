use clap::Parser;
use std::error::Error;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;
use tm_print::{
    analyze, ProgramManager, RuleLoader, RuleTable, Step, Symbol, TuringMachine,
    DEFAULT_START_STATE,
};

/// Runs a printing Turing machine and shows the first COUNT symbols it prints.
#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tm-print programs/alternate.tm 20
  tm-print builtin:alternate-compact 20
  cat programs/ones.tm | tm-print - 8

A rule file literally named `-` or starting with `builtin:` can be run as `./-` or `./builtin:x`.")]
struct Cli {
    /// Rule file to run, `builtin:<name>` for an embedded program, or `-` for stdin
    #[clap(required_unless_present = "list")]
    program: Option<String>,

    /// Number of printed symbols to show
    #[clap(required_unless_present = "list")]
    count: Option<usize>,

    /// State the machine starts in
    #[clap(short, long, default_value = DEFAULT_START_STATE)]
    start: String,

    /// Initial tape content, spelled with `0`, `1` and `@` for blank
    #[clap(short, long, default_value = "@")]
    tape: String,

    /// Print a JSON snapshot of the machine after every step to stderr
    #[clap(short = 'd', long)]
    trace: bool,

    /// List the embedded programs and exit
    #[clap(short, long)]
    list: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.list {
        for program in ProgramManager::list() {
            println!("{:<20} {}", program.name, program.description);
        }
        return Ok(());
    }

    let (Some(source), Some(count)) = (&cli.program, cli.count) else {
        return Err("PROGRAM and COUNT are required".into());
    };

    let rules = load_rules(source)?;
    let tape = Symbol::parse_all(&cli.tape)
        .ok_or_else(|| format!("Invalid tape content '{}': use 0, 1 and @", cli.tape))?;

    for warning in analyze(&rules, &cli.start) {
        eprintln!("warning: {}", warning);
    }

    let mut machine = TuringMachine::new(&rules, cli.start.as_str());
    machine.initialize(&tape);

    let output = if cli.trace {
        trace(&mut machine, count, &mut io::stderr().lock())?
    } else {
        machine.take_output(count)?
    };

    println!("{}", output.iter().map(|s| s.as_output()).collect::<String>());
    Ok(())
}

/// Loads a rule table from a file, stdin (`-`) or the embedded programs (`builtin:<name>`).
fn load_rules(source: &str) -> Result<RuleTable, Box<dyn Error>> {
    if let Some(name) = source.strip_prefix("builtin:") {
        return Ok(ProgramManager::get(name)?.rules.clone());
    }

    if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        return Ok(RuleLoader::load_from_string(&buffer)?);
    }

    Ok(RuleLoader::load(Path::new(source))?)
}

/// Runs the machine step by step, writing a snapshot after each step to `log`.
fn trace(
    machine: &mut TuringMachine,
    count: usize,
    log: &mut impl Write,
) -> Result<Vec<Symbol>, Box<dyn Error>> {
    let mut output = Vec::new();

    writeln!(log, "{}", serde_json::to_string(&machine.snapshot())?)?;
    while output.len() < count {
        let step = machine.step()?;
        writeln!(log, "{}", serde_json::to_string(&machine.snapshot())?)?;

        if let Step::Print(symbol) = step {
            output.push(symbol);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_print::{parse, TuringMachineError};

    #[test]
    fn test_trace_writes_snapshot_per_step() {
        let rules = parse("b @ P0,R c\nc @ R b").unwrap();
        let mut machine = TuringMachine::new(&rules, "b");
        let mut log = Vec::new();

        let output = trace(&mut machine, 2, &mut log).unwrap();

        assert_eq!(output, vec![Symbol::Zero, Symbol::Zero]);
        // Initial snapshot, then: P0, R (b done), R (c done), P0.
        let log = String::from_utf8(log).unwrap();
        assert_eq!(log.lines().count(), 5);
        assert!(log.lines().all(|line| line.starts_with('{')));
    }

    #[test]
    fn test_trace_huge_count_stops_on_undefined_transition() {
        let rules = parse("b @ P0,R c").unwrap();
        let mut machine = TuringMachine::new(&rules, "b");
        let mut log = Vec::new();

        let error = trace(&mut machine, usize::MAX, &mut log).unwrap_err();

        assert_eq!(
            error.downcast_ref::<TuringMachineError>(),
            Some(&TuringMachineError::UndefinedTransition {
                state: "c".to_string(),
                symbol: Symbol::Blank,
            })
        );
        assert_eq!(machine.printed_count(), 1);
    }
}
