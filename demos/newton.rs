use anyhow::{bail, Result};
use tracing::{debug, info};

use autodual::{cos, derivative, DualNumber};

/// Solve f(x) = 0 with Newton's method, reading f' off the tangent
fn newton<F>(f: F, mut x: f64, tolerance: f64, max_iter: usize) -> Result<f64>
where
  F: Fn(DualNumber) -> DualNumber,
{
  for iter in 0..max_iter {
    let fx = derivative(&f, x);
    debug!(iter, x, value = fx.value(), slope = fx.tangent(), "newton step");
    if fx.value().abs() < tolerance {
      return Ok(x);
    }
    if !fx.is_finite() || fx.tangent() == 0.0 {
      bail!("newton stalled at x = {x}: {fx}");
    }
    x -= fx.value() / fx.tangent();
  }
  bail!("newton did not converge within {max_iter} iterations")
}

fn main() -> Result<()> {
  init_tracing();

  // x = cos(x)
  let root = newton(|x| cos(x) - x, 1.0, 1e-12, 50)?;
  info!(root, "fixed point of cos");
  println!("cos(x) = x at x = {root:.12}");

  // x^3 - 2x - 5 = 0
  let root = newton(|x| (x ^ 3.0) - 2.0 * x - 5.0, 2.0, 1e-12, 50)?;
  info!(root, "root of cubic");
  println!("x^3 - 2x - 5 = 0 at x = {root:.12}");
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
