//! Statement classification.
//!
//! Every non-blank line is exactly one of the fixed forms below. Lines whose
//! shape matches a form but whose details are wrong (a bad variable name, an
//! unknown direction) are rejected here; lines matching no form come back as
//! [`Statement::Unsupported`] so the caller can decide how to report them.

use crate::line::Line;
use codehero_types::{CompileError, Direction, ErrorCode, Result};

const LOOP_KEYWORD: &str = "for ";
const IF_KEYWORD: &str = "if ";
const MOVE_PREFIX: &str = "hero.move_";

/// A value position: an integer literal or a variable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(u32),
    Variable(String),
}

impl Operand {
    /// Parse the text of a value position.
    pub fn parse(text: &str, line: &Line<'_>) -> Result<Operand> {
        let text = text.trim();
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return text.parse::<u32>().map(Operand::Literal).map_err(|_| {
                error(
                    ErrorCode::INVALID_INTEGER,
                    format!("integer literal '{text}' is too large"),
                    line,
                )
            });
        }
        if is_identifier(text) {
            return Ok(Operand::Variable(text.to_string()));
        }
        let message = match text.strip_prefix('-') {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                format!("negative values are not supported: '{text}'")
            }
            _ => format!("expected a whole number or a variable name, found '{text}'"),
        };
        Err(error(ErrorCode::INVALID_INTEGER, message, line)
            .with_suggestion("only whole numbers are supported, e.g. x = 5"))
    }
}

/// The statement forms of the command language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `name = value`
    Assignment { name: String, value: Operand },
    /// `for var in range(count):`
    LoopHeader { var: String, count: Operand },
    /// `hero.move_<direction>(<steps>)`; `steps` is `None` for an empty
    /// argument list, meaning one step.
    MoveCall {
        direction: Direction,
        steps: Option<Operand>,
    },
    /// Anything the grammar does not cover.
    Unsupported,
}

/// Classify a non-blank line.
pub fn classify(line: &Line<'_>) -> Result<Statement> {
    let code = line.code;
    if code.starts_with(LOOP_KEYWORD) {
        return parse_loop_header(line);
    }
    if code.starts_with(MOVE_PREFIX) {
        return parse_move_call(line);
    }
    if !code.starts_with(IF_KEYWORD) {
        if let Some((name, value)) = code.split_once('=') {
            if !value.contains('=') {
                return parse_assignment(name.trim(), value, line);
            }
        }
    }
    Ok(Statement::Unsupported)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_assignment(name: &str, value: &str, line: &Line<'_>) -> Result<Statement> {
    if !is_identifier(name) {
        return Err(error(
            ErrorCode::INVALID_VARIABLE_NAME,
            format!("invalid variable name '{name}'"),
            line,
        )
        .with_suggestion("names start with a letter or '_' and contain only letters, digits and '_'"));
    }
    Ok(Statement::Assignment {
        name: name.to_string(),
        value: Operand::parse(value, line)?,
    })
}

fn parse_loop_header(line: &Line<'_>) -> Result<Statement> {
    let malformed = |detail: &str| {
        error(
            ErrorCode::MALFORMED_LOOP_HEADER,
            format!("malformed loop: {detail}"),
            line,
        )
        .with_suggestion("write loops as: for i in range(3):")
    };

    let rest = &line.code[LOOP_KEYWORD.len()..];
    let (var, rest) = rest
        .split_once(" in ")
        .ok_or_else(|| malformed("expected 'in range(...)'"))?;
    let var = var.trim();
    if !is_identifier(var) {
        return Err(malformed(&format!("invalid loop variable '{var}'")));
    }

    let args = rest
        .trim()
        .strip_prefix("range")
        .map(str::trim_start)
        .and_then(|r| r.strip_prefix('('))
        .and_then(|r| r.strip_suffix(':'))
        .map(str::trim_end)
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| malformed("expected 'range(<count>):'"))?;
    if args.trim().is_empty() {
        return Err(malformed("range() needs a count"));
    }
    if args.contains(',') {
        return Err(malformed("range() takes a single count"));
    }

    Ok(Statement::LoopHeader {
        var: var.to_string(),
        count: Operand::parse(args, line)?,
    })
}

fn parse_move_call(line: &Line<'_>) -> Result<Statement> {
    let malformed = || {
        error(
            ErrorCode::MALFORMED_MOVE_CALL,
            "malformed move command",
            line,
        )
        .with_suggestion("write moves as: hero.move_right() or hero.move_right(3)")
    };

    let rest = &line.code[MOVE_PREFIX.len()..];
    let (keyword, args) = rest.split_once('(').ok_or_else(malformed)?;
    let args = args.strip_suffix(')').ok_or_else(malformed)?;
    if args.contains(['(', ')']) {
        return Err(malformed());
    }

    let keyword = keyword.trim_end();
    let direction = Direction::from_keyword(keyword).ok_or_else(|| {
        error(
            ErrorCode::UNKNOWN_DIRECTION,
            format!("unknown direction '{keyword}'"),
            line,
        )
        .with_suggestion("use one of: up, down, left, right")
    })?;

    let steps = if args.trim().is_empty() {
        None
    } else {
        Some(Operand::parse(args, line)?)
    };
    Ok(Statement::MoveCall { direction, steps })
}

fn error(code: ErrorCode, message: impl Into<String>, line: &Line<'_>) -> CompileError {
    CompileError::new(code, message, line.number, line.raw)
}
