//! The command compiler: resolves variables and unrolls loops into a flat
//! action sequence.

use crate::symbols::SymbolTable;
use crate::CompilerOptions;
use codehero_parser::{classify, Line, Operand, Parsed, Parser, Statement};
use codehero_types::{Action, ActionSequence, CompileError, Direction, ErrorCode, Result, SourceFile};
use tracing::{debug, trace};

/// A move statement inside a loop body with its step count already resolved.
struct ResolvedMove<'src> {
    direction: Direction,
    steps: u32,
    line: Line<'src>,
}

/// Single-pass compiler over one program.
///
/// Statements are processed in source order and the first error stops
/// compilation; no partial sequence is ever returned.
pub struct Compiler<'src> {
    parser: Parser<'src>,
    symbols: SymbolTable,
    actions: ActionSequence,
    options: CompilerOptions,
}

impl<'src> Compiler<'src> {
    pub fn new(source_file: &'src SourceFile, options: CompilerOptions) -> Self {
        Self {
            parser: Parser::new(source_file),
            symbols: SymbolTable::new(),
            actions: ActionSequence::new(),
            options,
        }
    }

    /// Compile the whole program.
    pub fn compile(mut self) -> Result<ActionSequence> {
        while let Some(parsed) = self.parser.next_statement() {
            let Parsed { line, statement } = parsed?;
            match statement {
                Statement::Assignment { name, value } => {
                    let value = self.resolve(&value, &line)?;
                    self.symbols.define(&name, value);
                    trace!(line = line.number, name = %name, value, "assigned variable");
                }
                Statement::MoveCall { direction, steps } => {
                    let steps = self.resolve_steps(steps.as_ref(), &line)?;
                    self.emit(direction, steps, &line)?;
                }
                Statement::LoopHeader { count, .. } => self.compile_loop(&count, &line)?,
                Statement::Unsupported => {
                    return Err(error(
                        ErrorCode::UNRECOGNIZED_STATEMENT,
                        format!("unrecognized statement '{}'", line.code),
                        &line,
                    )
                    .with_suggestion(
                        "supported statements are assignments, for-loops and hero.move_<direction>()",
                    ));
                }
            }
        }
        debug!(
            actions = self.actions.len(),
            variables = self.symbols.len(),
            "compiled program"
        );
        Ok(self.actions)
    }

    /// Resolve the header count and body, then expand the body `count` times.
    fn compile_loop(&mut self, count: &Operand, header: &Line<'src>) -> Result<()> {
        let iterations = self.resolve(count, header)?;

        let mut body = Vec::new();
        for line in self.parser.take_block() {
            match classify(&line)? {
                Statement::MoveCall { direction, steps } => {
                    let steps = self.resolve_steps(steps.as_ref(), &line)?;
                    body.push(ResolvedMove {
                        direction,
                        steps,
                        line,
                    });
                }
                Statement::LoopHeader { .. } => {
                    return Err(error(
                        ErrorCode::UNSUPPORTED_IN_LOOP,
                        "nested loops are not supported",
                        &line,
                    ));
                }
                Statement::Assignment { .. } | Statement::Unsupported => {
                    return Err(error(
                        ErrorCode::UNSUPPORTED_IN_LOOP,
                        format!(
                            "only move commands are allowed inside a loop body, found '{}'",
                            line.code
                        ),
                        &line,
                    )
                    .with_suggestion("move the statement above the loop"));
                }
            }
        }

        trace!(
            line = header.number,
            iterations,
            statements = body.len(),
            "expanding loop"
        );
        if body.iter().all(|m| m.steps == 0) {
            return Ok(());
        }
        for _ in 0..iterations {
            for m in &body {
                self.emit(m.direction, m.steps, &m.line)?;
            }
        }
        Ok(())
    }

    fn resolve(&self, operand: &Operand, line: &Line<'_>) -> Result<u32> {
        match operand {
            Operand::Literal(value) => Ok(*value),
            Operand::Variable(name) => self.symbols.get(name).ok_or_else(|| {
                error(
                    ErrorCode::UNDEFINED_VARIABLE,
                    format!("variable '{name}' is not defined"),
                    line,
                )
                .with_suggestion(format!("define it on an earlier line, e.g. {name} = 3"))
            }),
        }
    }

    /// An empty argument list means one step.
    fn resolve_steps(&self, steps: Option<&Operand>, line: &Line<'_>) -> Result<u32> {
        steps.map_or(Ok(1), |operand| self.resolve(operand, line))
    }

    fn emit(&mut self, direction: Direction, steps: u32, line: &Line<'_>) -> Result<()> {
        let steps = steps as usize;
        if let Some(max) = self.options.max_actions {
            if self.actions.len().saturating_add(steps) > max {
                return Err(error(
                    ErrorCode::ACTION_LIMIT_EXCEEDED,
                    format!("program produces more than {max} moves"),
                    line,
                ));
            }
        }
        let action = Action::new(direction, line.number);
        self.actions.extend(std::iter::repeat(action).take(steps));
        Ok(())
    }
}

fn error(code: ErrorCode, message: impl Into<String>, line: &Line<'_>) -> CompileError {
    CompileError::new(code, message, line.number, line.raw)
}
