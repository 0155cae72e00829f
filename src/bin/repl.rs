use clap::Parser as ClapParser;
use dice_quota::roll::{LAST_DROPPED, LAST_UNTIL};
use dice_quota::{
    DiceOperator, Die, Numeric, Quota, RResult, RollContext, RollError, Roller, SequenceRoller,
    Value,
};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};

#[derive(ClapParser)]
#[command(name = "repl")]
#[command(about = "Evaluate dice operators one line at a time")]
struct Cli {
    /// Most dice a single operator may roll
    #[arg(long, env = "DICE_PER_ROLL_LIMIT")]
    per_roll_limit: Option<usize>,
    /// Most dice a single input line may roll
    #[arg(long, env = "DICE_PER_FUNCTION_LIMIT")]
    per_function_limit: Option<usize>,
    /// Seed for a reproducible random generator
    #[arg(long, conflicts_with = "replay")]
    seed: Option<u64>,
    /// Comma-separated die indices to replay instead of rolling
    #[arg(long, value_delimiter = ',')]
    replay: Vec<usize>,
}

impl Cli {
    fn quota(&self) -> Option<Quota> {
        match (self.per_roll_limit, self.per_function_limit) {
            (None, None) => None,
            (per_roll, per_function) => Some(Quota::new(
                per_roll.unwrap_or(usize::MAX),
                per_function.unwrap_or(usize::MAX),
            )),
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn context<R: Roller>(roller: R, quota: Option<Quota>) -> RollContext<R> {
    let ctx = RollContext::new(roller).with_history();
    match quota {
        Some(quota) => ctx.with_quota(quota),
        None => ctx,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();
    let quota = cli.quota();

    if let Some(roller) = SequenceRoller::from_slice(&cli.replay) {
        run(context(roller, quota))
    } else if let Some(seed) = cli.seed {
        run(context(StdRng::seed_from_u64(seed), quota))
    } else {
        run(context(rand::thread_rng(), quota))
    }
}

fn run<R: Roller>(mut ctx: RollContext<R>) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["history"] => {
                for entry in ctx.take_history() {
                    println!("{}: {}", entry.label, entry.result);
                }
            }
            ["vars"] => {
                for name in [LAST_DROPPED, LAST_UNTIL] {
                    if let Some(value) = ctx.scope().get(name) {
                        println!("{} = {}", name, value.to_code());
                    }
                }
            }
            words => {
                if let Some(quota) = ctx.quota_mut() {
                    quota.reset();
                }
                match eval(&mut ctx, words) {
                    Ok(value) => println!("{}  (total {})", value, value.number()),
                    Err(why) => eprintln!("Error: {}", why),
                }
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

/// Evaluates `<operator> <operands...>`, `die <value> <sides>` or
/// `repeat <count> <command...>`.
fn eval<R: Roller>(ctx: &mut RollContext<R>, words: &[&str]) -> RResult<Value> {
    match words {
        ["repeat", count, body @ ..] => {
            let count = operand(ctx, count)?.number();
            ctx.repeat(count, |ctx, _| eval(ctx, body)).map(Value::List)
        }
        ["die", value, sides] => {
            Die::from_operands(&operand(ctx, value)?, &operand(ctx, sides)?).map(Value::Die)
        }
        [op, only] => operator(op)?.apply_prefix(ctx, &operand(ctx, only)?),
        [op, left, right] => {
            let (left, right) = (operand(ctx, left)?, operand(ctx, right)?);
            operator(op)?.apply(ctx, &left, &right)
        }
        _ => Err(RollError::invalid("expected `<operator> <operand> [<operand>]`")),
    }
}

fn operator(word: &str) -> RResult<DiceOperator> {
    word.parse().map_err(|why| RollError::invalid(why))
}

/// A value in canonical form, or a variable such as `_i` or `_d`.
fn operand<R: Roller>(ctx: &RollContext<R>, word: &str) -> RResult<Value> {
    if word.starts_with('_') {
        ctx.scope()
            .get(word)
            .cloned()
            .ok_or_else(|| RollError::invalid(format!("unbound variable {}", word)))
    } else {
        Ok(word.parse()?)
    }
}
