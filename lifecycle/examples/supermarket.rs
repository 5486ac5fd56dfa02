use fibre_lifecycle::{dependencies, provide, Capabilities, Component, Dependency, Inject, Registry};
use std::rc::Rc;
use tokio_util::sync::CancellationToken;

// 1. Define the capability customers depend on.
trait Buyer {
  fn buy_goods(&self, goods: &[&str]) -> Result<(), String>;
}

// 2. A component that provides it.
struct Supermarket;

impl Buyer for Supermarket {
  fn buy_goods(&self, goods: &[&str]) -> Result<(), String> {
    println!("[SUPERMARKET]: sold {}", goods.join(", "));
    Ok(())
  }
}

impl Component for Supermarket {
  fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
    provide!(self, caps => dyn Buyer);
  }
}

// 3. A component that depends on the abstraction, not on `Supermarket`.
struct Customer {
  name: &'static str,
  buyer: Inject<dyn Buyer>,
}

impl Customer {
  fn new(name: &'static str) -> Rc<Self> {
    Rc::new(Self {
      name,
      buyer: Inject::new(),
    })
  }
}

impl Component for Customer {
  fn dependencies(&self) -> Vec<Dependency<'_>> {
    dependencies!(self => buyer)
  }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  // --- Registration ---
  let mut registry = Registry::new();
  let bob = Customer::new("Bob");
  let alice = Customer::new("Alice");
  registry
    .register(Rc::new(Supermarket))
    .register(bob.clone())
    .register(alice.clone());

  // --- Wiring ---
  registry.resolve()?;

  for customer in [&bob, &alice] {
    println!("{} goes shopping...", customer.name);
    customer.buyer.buy_goods(&["milk", "bread"])?;
  }

  // --- Lifecycle ---
  // None of these components opt into a phase, so every phase is a no-op.
  let ctx = CancellationToken::new();
  registry.init(&ctx)?;
  registry.start(&ctx)?;
  registry.graceful_stop(&ctx)?;
  registry.stop(&ctx)?;
  Ok(())
}
