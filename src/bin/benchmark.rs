use monke::{evaluator, Environment, Lexer, Parser};
use std::env;
use std::time::Instant;

static INPUT: &str = "let fibonacci = fn(x) {
  if (x == 0) {
    0
  } else {
    if (x == 1) {
      return 1;
    } else {
      fibonacci(x - 1) + fibonacci(x - 2);
    }
  }
};";

fn main() {
    let n = env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u32>().ok())
        .unwrap_or(25);
    let input = format!("{}\nfibonacci({});", INPUT, n);

    let (program, errors) = Parser::new(Lexer::new(input)).parse_program();
    if !errors.is_empty() {
        for err in errors.iter() {
            eprintln!("\t{}", err);
        }
        return;
    }

    let env = Environment::new();
    let start = Instant::now();
    let result = evaluator::eval(&program, &env);
    let duration = start.elapsed();

    println!(
        "engine=eval, result={}, duration={}",
        result.map(|value| value.to_string()).unwrap_or_default(),
        duration.as_secs_f64(),
    );
}
