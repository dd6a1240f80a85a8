//! Tabulate a named function and its derivative over a range.
//!
//! ```text
//! cargo run --example table -- <function> [start] [end] [steps]
//! ```

use anyhow::{anyhow, Context, Result};
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use autodual::{derivative, sin, tan, DualNumber};

type Function = fn(DualNumber) -> DualNumber;

fn registry() -> FxHashMap<&'static str, Function> {
  let mut functions: FxHashMap<&'static str, Function> = FxHashMap::default();
  functions.insert("square", |x| x * x);
  functions.insert("cube", |x| x ^ 3.0);
  functions.insert("sin", sin);
  functions.insert("tan", tan);
  functions.insert("recip", |x| 1.0 / x);
  functions.insert("xpowx", |x| x ^ x);
  functions.insert("exp2", |x| 2.0 ^ x);
  functions
}

fn arg(args: &[String], index: usize, name: &str, default: f64) -> Result<f64> {
  match args.get(index) {
    Some(raw) => raw
      .parse()
      .with_context(|| format!("invalid {name}: {raw:?}")),
    None => Ok(default),
  }
}

fn main() -> Result<()> {
  init_tracing();

  let args: Vec<String> = std::env::args().skip(1).collect();
  let functions = registry();

  let name = args.first().map(String::as_str).unwrap_or("sin");
  let f = *functions.get(name).ok_or_else(|| {
    let mut known: Vec<_> = functions.keys().copied().collect();
    known.sort_unstable();
    anyhow!("unknown function {name:?}, expected one of {known:?}")
  })?;
  let start = arg(&args, 1, "start", 0.0)?;
  let end = arg(&args, 2, "end", 1.0)?;
  let steps = arg(&args, 3, "steps", 10.0)? as usize;
  info!(name, start, end, steps, "tabulating");

  println!("{:>12} {:>16} {:>16}", "x", "f(x)", "f'(x)");
  for i in 0..=steps {
    let x = start + (end - start) * i as f64 / steps.max(1) as f64;
    let fx = derivative(f, x);
    if !fx.is_finite() {
      warn!(x, %fx, "non-finite result");
    }
    println!("{:>12.6} {:>16.9} {:>16.9}", x, fx.value(), fx.tangent());
  }
  Ok(())
}

fn init_tracing() {
  let subscriber = tracing_subscriber::FmtSubscriber::builder()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .finish();

  if tracing::subscriber::set_global_default(subscriber).is_err() {
    eprintln!("tracing subscriber already set");
  }
}
