pub mod ast;
pub mod builtins;
pub mod cli;
mod environment;
pub mod evaluator;
mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod token;

pub use environment::Environment;
pub use lexer::Lexer;
pub use object::Object;
pub use parser::{ParseError, Parser};
