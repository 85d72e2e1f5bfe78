use std::io::{BufRead, Write};

use calculator::error::CalcError;
use calculator::resolve::{resolve_symbols, Bindings};
use calculator::session::Session;
use calculator::{lexer, parser};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Input {
    /// Evaluate a single expression and exit; starts the interactive
    /// calculator when omitted
    expression: Option<String>,

    /// Debug the lexer, printing out each token. Does not parse or evaluate.
    #[clap(long, default_value = "false", requires = "expression")]
    debug_lexer: bool,

    /// Debug the parser, printing out the AST. Does not evaluate.
    #[clap(long, default_value = "false", requires = "expression")]
    debug_parser: bool,
}

fn main() {
    let Input {
        expression,
        debug_lexer,
        debug_parser,
    } = Input::parse();

    if debug_lexer {
        let source = expression.expect("clap guarantees the expression is present");
        run_debug_lexer(&source);
        return;
    }

    if debug_parser {
        let source = expression.expect("clap guarantees the expression is present");
        run_debug_parser(&source);
        return;
    }

    match expression {
        Some(source) => run_once(&source),
        None => run_repl(),
    }
}

fn run_once(source: &str) {
    let mut session = Session::new();
    match session.evaluate_and_record(source) {
        Ok(result) => println!("= {result}"),
        Err(e) => {
            report(e, source);
            std::process::exit(1);
        }
    }
}

fn run_debug_lexer(source: &str) {
    for token in lexer::Lexer::new(source) {
        match token {
            Ok(t) => {
                let diag = miette::miette!(
                    labels = vec![t.span.labeled(format!("{:?}", t.kind))],
                    severity = miette::Severity::Advice,
                    "found a token",
                )
                .with_source_code(source.to_string());
                eprintln!("{diag:?}");
            }
            Err(e) => {
                report(e.into(), source);
                std::process::exit(1);
            }
        }
    }
}

fn run_debug_parser(source: &str) {
    let tree = lexer::tokenize(source)
        .map_err(CalcError::from)
        .and_then(|tokens| {
            let tokens = resolve_symbols(tokens, &Bindings::default());
            parser::Parser::new(tokens).parse().map_err(CalcError::from)
        });

    match tree {
        Ok(tree) => {
            dbg!(tree);
        }
        Err(e) => {
            report(e, source);
            std::process::exit(1);
        }
    }
}

fn report(error: CalcError, source: &str) {
    let report = miette::Report::new(error).with_source_code(source.to_string());
    eprintln!("{report:?}");
}

/// Everything a line of input can mean. Expressions are the fallthrough:
/// any line that does not start with a command word is handed to the
/// evaluator.
enum Command<'line> {
    Help,
    History,
    ClearHistory,
    ShowMemory,
    MemoryStore(f64),
    MemoryAdd(f64),
    MemorySubtract(f64),
    MemoryClear,
    Exit,
    Evaluate(&'line str),
}

impl<'line> Command<'line> {
    fn parse(line: &'line str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let first = words.next().unwrap_or("").to_lowercase();
        let argument = words.next();

        Ok(match first.as_str() {
            "help" => Command::Help,
            "history" => Command::History,
            "clear" => Command::ClearHistory,
            "memory" => Command::ShowMemory,
            "ms" => Command::MemoryStore(parse_value(argument, "ms <value>")?),
            "m+" => Command::MemoryAdd(parse_value(argument, "m+ <value>")?),
            "m-" => Command::MemorySubtract(parse_value(argument, "m- <value>")?),
            "mc" => Command::MemoryClear,
            "exit" | "quit" => Command::Exit,
            _ => Command::Evaluate(line),
        })
    }
}

fn parse_value(argument: Option<&str>, usage: &str) -> Result<f64, String> {
    match argument {
        Some(value) => value
            .parse()
            .map_err(|_| format!("'{value}' is not a number (usage: {usage})")),
        None => Err(format!("missing value (usage: {usage})")),
    }
}

fn run_repl() {
    let mut session = Session::new();
    let stdin = std::io::stdin();
    let mut stdin = stdin.lock();
    let mut stdout = std::io::stdout();

    println!("Welcome to the Calculator!");
    println!("Type 'help' for available commands.");

    loop {
        print!("> ");
        stdout.flush().expect("failed to flush stdout");

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Err(message) => eprintln!("Error: {message}"),
            Ok(Command::Exit) => {
                println!("Goodbye!");
                break;
            }
            Ok(Command::Help) => print_help(),
            Ok(Command::History) => {
                if session.history().is_empty() {
                    println!("No calculation history.");
                } else {
                    for (i, entry) in session.history().iter().enumerate() {
                        println!("{}. {} = {}", i + 1, entry.expression, entry.result);
                    }
                }
            }
            Ok(Command::ClearHistory) => {
                session.clear_history();
                println!("Calculation history cleared.");
            }
            Ok(Command::ShowMemory) => println!("Memory: {}", session.memory()),
            Ok(Command::MemoryStore(value)) => {
                session.store(value);
                println!("Stored {value} in memory.");
            }
            Ok(Command::MemoryAdd(value)) => {
                session.add_memory(value);
                println!("Added {value} to memory. New memory value: {}", session.memory());
            }
            Ok(Command::MemorySubtract(value)) => {
                session.subtract_memory(value);
                println!(
                    "Subtracted {value} from memory. New memory value: {}",
                    session.memory()
                );
            }
            Ok(Command::MemoryClear) => {
                session.clear_memory();
                println!("Memory cleared.");
            }
            Ok(Command::Evaluate(expression)) => {
                match session.evaluate_and_record(expression) {
                    Ok(result) => println!("= {result}"),
                    Err(e) => report(e, expression),
                }
            }
        }
    }
}

fn print_help() {
    println!("Enter a mathematical expression to calculate, e.g., 2 + 2");
    println!("Special commands:");
    println!("  help - Show this help message");
    println!("  history - Show calculation history");
    println!("  clear - Clear calculation history");
    println!("  memory - Show memory value");
    println!("  ms <value> - Store value in memory");
    println!("  m+ <value> - Add value to memory");
    println!("  m- <value> - Subtract value from memory");
    println!("  mc - Clear memory");
    println!("  exit/quit - Exit the calculator");
    println!("Special values:");
    println!("  pi or π - The value of pi");
    println!("  e - The value of e");
    println!("  ans - The last calculated result");
    println!("  m - The current memory value");
    println!("Functions:");
    println!("  sqrt(x) - Square root of x");
    println!("  sin(x) - Sine of x (in radians)");
    println!("  cos(x) - Cosine of x (in radians)");
    println!("  tan(x) - Tangent of x (in radians)");
    println!("  log(x) - Base-10 logarithm of x");
    println!("  ln(x) - Natural logarithm of x");
}
