use autodual::DualNumber;

fn main() {
  // Seed the variable we differentiate with respect to
  let x = DualNumber::variable(2.0);
  let y = x * x;
  println!("Value: {}, dy/dx: {}", y.value(), y.tangent());
  // The original demo: x^3 at x=2
  println!("x.powf(3): {}", x.powf(3.0));
}
