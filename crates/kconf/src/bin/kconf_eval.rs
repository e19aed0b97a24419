use clap::{Parser, ValueEnum};
use kconf::commands::{describe_tokens, eval_expression, Definition};
use kconf::KconfResult;
use kconf_model::{EvalMode, Tristate, Value};
use tracing_subscriber::EnvFilter;

/// Evaluate kconfig-style expressions
#[derive(Parser)]
#[clap(version)]
struct Opts {
    #[clap(subcommand)]
    subcmd: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    Eval(Eval),
    Tokens(Tokens),
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// Reduce the result to n/m/y
    Truth,
    /// Keep string results as text
    Preserve,
}

impl From<Mode> for EvalMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Truth => EvalMode::Truth,
            Mode::Preserve => EvalMode::PreserveStrings,
        }
    }
}

/// Evaluate an expression against symbols given on the command line
#[derive(Parser)]
struct Eval {
    expression: String,

    /// Define a symbol, e.g. `NET=y` or `NR_CPUS:int=8`. The type defaults to tristate.
    #[clap(short = 'D', long = "define", value_name = "NAME[:TYPE]=VALUE")]
    definitions: Vec<Definition>,

    #[clap(long, value_enum, default_value = "truth")]
    mode: Mode,
}

/// Print the tokens of an expression
#[derive(Parser)]
struct Tokens {
    expression: String,
}

fn render(value: &Value, mode: Mode) -> String {
    match (mode, value) {
        (Mode::Truth, Value::Number(n)) => Tristate::from_number(*n).as_char().to_string(),
        (_, value) => value.to_string(),
    }
}

fn main() -> KconfResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    match opts.subcmd {
        SubCommand::Eval(eval) => {
            let value = eval_expression(&eval.expression, &eval.definitions, eval.mode.into())?;
            println!("{}", render(&value, eval.mode));
        }
        SubCommand::Tokens(tokens) => {
            for line in describe_tokens(&tokens.expression)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}
