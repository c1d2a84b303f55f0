//! This module provides the parser for rule files, utilizing the `pest` crate.
//! The grammar splits the text into lines, fields and comma-separated items; this module
//! gives each item its meaning and assembles the resulting `RuleTable`.

use crate::{
    rules::RuleTable,
    types::{Operation, Symbol, Transition, TuringMachineError},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Number of whitespace-separated fields on every rule line.
const FIELD_COUNT: usize = 4;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct RuleFileParser;

/// Parses rule-file text into a `RuleTable`.
///
/// Each non-empty line has the form `state symbols operations next-state`. A line listing
/// k symbols contributes k entries sharing one transition; a later line redefining a
/// `(state, symbol)` pair replaces the earlier one.
///
/// # Returns
///
/// * `Ok(RuleTable)` if every line is well formed.
/// * `Err(TuringMachineError::MalformedRule)` for the first line that is not.
pub fn parse(input: &str) -> Result<RuleTable, TuringMachineError> {
    let root = RuleFileParser::parse(Rule::table, input)
        .map_err(|e| TuringMachineError::MalformedRule(e.into()))?;

    let mut table = RuleTable::new();
    for line in root.flat_map(|table| table.into_inner()) {
        if line.as_rule() != Rule::line {
            continue;
        }

        if let Some(rule) = parse_line(line)? {
            table.insert(&rule.state, &rule.symbols, rule.transition);
        }
    }

    Ok(table)
}

/// Parses a single rule line. Returns `None` for lines without fields.
fn parse_line(pair: Pair<Rule>) -> Result<Option<ParsedRule>, TuringMachineError> {
    let span = pair.as_span();
    let fields: Vec<Pair<Rule>> = pair.into_inner().collect();
    if fields.is_empty() {
        return Ok(None);
    }

    let [state, symbols, operations, next_state] =
        <[Pair<Rule>; FIELD_COUNT]>::try_from(fields).map_err(|fields| {
            parse_error(
                &format!(
                    "Expected {FIELD_COUNT} fields (state, symbols, operations, next state), found {}",
                    fields.len()
                ),
                span,
            )
        })?;

    let state = parse_state(state)?;
    let symbols = parse_items(symbols, parse_symbol)?;
    let operations = parse_items(operations, parse_operation)?;
    let next_state = parse_state(next_state)?;

    Ok(Some(ParsedRule {
        state,
        symbols,
        transition: Transition {
            operations,
            next_state,
        },
    }))
}

/// Parses a field that must hold a single state identifier.
fn parse_state(pair: Pair<Rule>) -> Result<String, TuringMachineError> {
    let span = pair.as_span();
    let mut items = pair.into_inner();

    match (items.next(), items.next()) {
        (Some(item), None) => Ok(item.as_str().to_string()),
        _ => Err(parse_error(
            &format!("State must be a single identifier: {}", span.as_str()),
            span,
        )),
    }
}

/// Applies `parse_item` to every comma-separated item of a field.
fn parse_items<T>(
    pair: Pair<Rule>,
    parse_item: fn(Pair<Rule>) -> Result<T, TuringMachineError>,
) -> Result<Vec<T>, TuringMachineError> {
    pair.into_inner()
        .filter(|item| item.as_rule() == Rule::item)
        .map(parse_item)
        .collect()
}

/// Parses a tape symbol item (`0`, `1` or `@`).
fn parse_symbol(pair: Pair<Rule>) -> Result<Symbol, TuringMachineError> {
    symbol_from_str(pair.as_str(), pair.as_span())
}

/// Parses an operation code item.
///
/// Supports `L`, `R`, `E`, `-` and `P` followed by one alphabet character.
fn parse_operation(pair: Pair<Rule>) -> Result<Operation, TuringMachineError> {
    let span = pair.as_span();
    match pair.as_str() {
        "L" => Ok(Operation::MoveLeft),
        "R" => Ok(Operation::MoveRight),
        "E" => Ok(Operation::Erase),
        "-" => Ok(Operation::NoOp),
        code => match code.strip_prefix('P') {
            Some("") => Err(parse_error("Print operation requires a symbol", span)),
            Some(operand) => Ok(Operation::Print(symbol_from_str(operand, span)?)),
            None => Err(parse_error(
                &format!("Unrecognized operation code: {code}"),
                span,
            )),
        },
    }
}

/// Maps a one-character string onto the alphabet.
fn symbol_from_str(input: &str, span: Span) -> Result<Symbol, TuringMachineError> {
    let mut chars = input.chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(c), None) => Symbol::from_input(c),
        _ => None,
    };

    symbol.ok_or_else(|| parse_error(&format!("Symbol outside alphabet: {input}"), span))
}

/// Creates a `TuringMachineError::MalformedRule` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::MalformedRule(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// A helper struct to temporarily hold one parsed rule line.
struct ParsedRule {
    state: String,
    symbols: Vec<Symbol>,
    transition: Transition,
}
