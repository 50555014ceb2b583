use crate::environment::Environment;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use log::debug;
use std::io::{self, BufRead, Write};

static PROMPT: &str = ">> ";

/// Reads lines from `input` until end of input, evaluating each against one
/// session environment so earlier bindings stay visible.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let env = Environment::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        debug!("read {} bytes", line.len());

        let (program, errors) = Parser::new(Lexer::new(line)).parse_program();
        if !errors.is_empty() {
            for err in errors.iter() {
                writeln!(output, "\t{}", err)?;
            }
            continue;
        }

        if let Some(value) = evaluator::eval(&program, &env) {
            writeln!(output, "{}", value)?;
        }
    }
}
