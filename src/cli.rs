use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "A tree-walking interpreter for the Monke language")]
pub struct Args {
    /// Source file to evaluate; starts an interactive session when omitted
    pub file: Option<PathBuf>,
}
