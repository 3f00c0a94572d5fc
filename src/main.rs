use std::{collections::HashMap, process::ExitCode};

use clap::{Parser, ValueEnum};
use condexpr::{BooleanExpression, ConditionExpression, IntegerExpression, ScanConfig};
use tracing_subscriber::EnvFilter;

/// condexpr compiles a condition or integer expression and evaluates it
/// against the given variable bindings.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to compile and evaluate.
    expression: String,

    /// Binds a variable, as `name=value`. May be repeated. Values are
    /// integers, or `true` / `false` for the boolean tier.
    #[arg(short = 'b', long = "bind", value_name = "NAME=VALUE")]
    bindings: Vec<String>,

    /// Expression tier to compile against.
    #[arg(short, long, value_enum, default_value_t = Tier::Condition)]
    tier: Tier,

    /// Punctuation allowed inside variable names, replacing the default set.
    #[arg(short, long, value_name = "CHARS")]
    punctuation: Option<String>,

    /// Only compile; print the parsed tree instead of evaluating.
    #[arg(short, long)]
    check: bool,

    /// Raises log verbosity; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Tier {
    /// Integers; only positive values count as true.
    Condition,
    /// Integers; any non-zero value counts as true.
    Integer,
    /// Boolean variables and logical operators only.
    Boolean,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let config = args.punctuation
                     .as_deref()
                     .map_or_else(ScanConfig::default, |chars| ScanConfig::new(chars.chars()));

    match run(&args, &config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        },
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args, config: &ScanConfig) -> Result<String, String> {
    let source = args.expression.as_str();
    let render = |e: condexpr::Diagnostic| e.render(source);

    match args.tier {
        Tier::Boolean => {
            let expr = BooleanExpression::with_config(source, config).map_err(render)?;
            if args.check {
                return Ok(expr.compiled().root().to_string());
            }
            let bindings = parse_bindings(&args.bindings, |value| value.parse::<bool>().ok())?;
            Ok(expr.evaluate(&bindings).to_string())
        },
        Tier::Condition => {
            let expr = ConditionExpression::with_config(source, config).map_err(render)?;
            if args.check {
                return Ok(expr.compiled().root().to_string());
            }
            let bindings = parse_bindings(&args.bindings, parse_integer)?;
            Ok(expr.evaluate(&bindings).to_string())
        },
        Tier::Integer => {
            let expr = IntegerExpression::with_config(source, config).map_err(render)?;
            if args.check {
                return Ok(expr.compiled().root().to_string());
            }
            let bindings = parse_bindings(&args.bindings, parse_integer)?;
            Ok(expr.evaluate(&bindings).to_string())
        },
    }
}

/// Integers, with `true` and `false` read as `1` and `0`.
fn parse_integer(value: &str) -> Option<i32> {
    match value {
        "true" => Some(1),
        "false" => Some(0),
        _ => value.parse().ok(),
    }
}

fn parse_bindings<T>(raw: &[String],
                     parse: impl Fn(&str) -> Option<T>)
                     -> Result<HashMap<String, T>, String> {
    raw.iter()
       .map(|binding| {
           let (name, value) =
               binding.split_once('=')
                      .ok_or_else(|| format!("Binding '{binding}' is not of the form name=value"))?;
           let value = parse(value.trim()).ok_or_else(|| {
                                              format!("Binding '{binding}' has an invalid value")
                                          })?;
           Ok((name.trim().to_string(), value))
       })
       .collect()
}
