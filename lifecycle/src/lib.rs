//! # Fibre Lifecycle
//!
//! A component registry that wires trait dependencies between independently
//! developed subsystems and drives them through an ordered lifecycle.
//!
//! Unlike a factory-based container, the registry holds already-built
//! instances. Each instance declares the slots it needs filled and the
//! capabilities it offers; a resolution pass matches the two, and the
//! lifecycle driver then runs every component that opts into a phase.
//!
//! ## Core Concepts
//!
//! - **Component**: any `'static` value implementing [`Component`], registered
//!   as an `Rc` so injected wiring is shared by every holder.
//! - **Slot**: an [`Inject<dyn Trait>`](Inject) field, declared through
//!   [`Component::dependencies`]. Slots are write-once.
//! - **Capability**: a trait view a component exposes through
//!   [`Component::capabilities`]. The lifecycle traits [`Initer`], [`Starter`],
//!   [`GracefulStopper`] and [`Stopper`] are capabilities too.
//! - **Registry**: the ordered collection, optionally nested under a parent.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_lifecycle::{dependencies, provide, Capabilities, Component, Dependency, Inject, NoLogger, Registry};
//! use std::rc::Rc;
//! use tokio_util::sync::CancellationToken;
//!
//! trait Buyer {
//!   fn buy(&self, goods: &[&str]) -> usize;
//! }
//!
//! struct Supermarket;
//! impl Buyer for Supermarket {
//!   fn buy(&self, goods: &[&str]) -> usize {
//!     goods.len()
//!   }
//! }
//! impl Component for Supermarket {
//!   fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
//!     provide!(self, caps => dyn Buyer);
//!   }
//! }
//!
//! struct Customer {
//!   buyer: Inject<dyn Buyer>,
//! }
//! impl Component for Customer {
//!   fn dependencies(&self) -> Vec<Dependency<'_>> {
//!     dependencies!(self => buyer)
//!   }
//! }
//!
//! let mut registry = Registry::new().with_logger(NoLogger);
//! let bob = Rc::new(Customer { buyer: Inject::new() });
//! registry.register(Rc::new(Supermarket));
//! registry.inject(bob.clone()).unwrap();
//!
//! assert_eq!(bob.buyer.buy(&["milk", "bread"]), 2);
//!
//! let ctx = CancellationToken::new();
//! registry.init(&ctx).unwrap();
//! registry.start(&ctx).unwrap();
//! registry.graceful_stop(&ctx).unwrap();
//! registry.stop(&ctx).unwrap();
//! ```

mod component;
mod core;
mod error;
mod lifecycle;
mod logger;
mod macros;
mod registry;

pub use crate::core::Capabilities;
pub use component::{Component, Dependency, Inject};
pub use error::{BoxError, Error, Result};
pub use lifecycle::{GracefulStopper, Initer, Phase, Starter, Stopper};
pub use logger::{ConsoleLogger, Logger, NoLogger, TracingLogger};
pub use registry::Registry;
