//! The `Component` contract and dependency slots.
//!
//! A component declares its dependencies explicitly instead of having them
//! discovered: [`Component::dependencies`] lists every [`Inject`] slot the
//! registry should fill, and [`Component::capabilities`] lists the trait views
//! other components may receive.

use crate::core::{Capabilities, CapabilityKey};
use once_cell::unsync::OnceCell;
use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// A value that can live in a [`Registry`](crate::Registry).
///
/// Both methods have empty defaults, so a component with no dependencies that
/// offers nothing to others is just `impl Component for T {}`.
pub trait Component: Any {
  /// Enumerates this component's dependency slots in declaration order.
  fn dependencies(&self) -> Vec<Dependency<'_>> {
    Vec::new()
  }

  /// Exposes the capabilities this component implements.
  ///
  /// Called once when the component is registered. Lifecycle participation
  /// is declared here too, by providing `dyn Initer`, `dyn Starter`,
  /// `dyn GracefulStopper` or `dyn Stopper`.
  fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
    let _ = caps;
  }

  /// The concrete type name, used in diagnostics and errors.
  fn component_name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }
}

/// Type-erased view of a slot the registry can test and fill.
pub(crate) trait Slot {
  fn is_set(&self) -> bool;
  fn fill(&self, provider: &Capabilities) -> bool;
}

/// A dependency slot holding a shared handle to some capability `I`.
///
/// The slot is write-once: after it holds a value, further writes are
/// rejected, so re-running injection never overrides earlier wiring.
pub struct Inject<I: ?Sized + 'static> {
  cell: OnceCell<Rc<I>>,
}

impl<I: ?Sized + 'static> Inject<I> {
  /// Creates an empty slot, to be filled by injection.
  pub fn new() -> Self {
    Self {
      cell: OnceCell::new(),
    }
  }

  /// Creates a slot that is already wired. Injection leaves it untouched.
  pub fn with(value: Rc<I>) -> Self {
    Self {
      cell: OnceCell::with_value(value),
    }
  }

  pub fn get(&self) -> Option<&Rc<I>> {
    self.cell.get()
  }

  pub fn is_set(&self) -> bool {
    self.cell.get().is_some()
  }

  /// Wires the slot by hand. Returns the value back if the slot is already set.
  pub fn set(&self, value: Rc<I>) -> Result<(), Rc<I>> {
    self.cell.set(value)
  }
}

impl<I: ?Sized + 'static> Default for Inject<I> {
  fn default() -> Self {
    Self::new()
  }
}

impl<I: ?Sized + 'static> Deref for Inject<I> {
  type Target = I;

  /// # Panics
  ///
  /// Panics if the slot has not been injected yet.
  fn deref(&self) -> &I {
    match self.cell.get() {
      Some(value) => value,
      None => panic!(
        "Dependency accessed before injection: {}",
        std::any::type_name::<I>()
      ),
    }
  }
}

impl<I: ?Sized + 'static> fmt::Debug for Inject<I> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Inject")
      .field("capability", &std::any::type_name::<I>())
      .field("set", &self.is_set())
      .finish()
  }
}

impl<I: ?Sized + Any> Slot for Inject<I> {
  fn is_set(&self) -> bool {
    Inject::is_set(self)
  }

  fn fill(&self, provider: &Capabilities) -> bool {
    match provider.get::<I>() {
      Some(value) => {
        // A slot that was set in the meantime keeps its first value.
        let _ = self.cell.set(value);
        true
      }
      None => false,
    }
  }
}

/// One declared dependency of a component.
pub struct Dependency<'a> {
  name: &'static str,
  key: CapabilityKey,
  subcomponent: bool,
  slot: &'a dyn Slot,
}

impl<'a> Dependency<'a> {
  /// A slot that must be resolved, from the parent registry or the local one.
  pub fn required<I: ?Sized + Any>(name: &'static str, slot: &'a Inject<I>) -> Self {
    Self {
      name,
      key: CapabilityKey::of::<I>(),
      subcomponent: false,
      slot,
    }
  }

  /// A slot that is only resolved when the registry has a parent.
  ///
  /// In a root registry the slot is skipped and stays empty.
  pub fn subcomponent<I: ?Sized + Any>(name: &'static str, slot: &'a Inject<I>) -> Self {
    Self {
      subcomponent: true,
      ..Self::required(name, slot)
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  /// The type name of the required capability, e.g. `dyn my_app::Buyer`.
  pub fn capability(&self) -> &'static str {
    self.key.name
  }

  pub fn is_subcomponent(&self) -> bool {
    self.subcomponent
  }

  pub fn is_set(&self) -> bool {
    self.slot.is_set()
  }

  pub(crate) fn key(&self) -> &CapabilityKey {
    &self.key
  }

  pub(crate) fn fill(&self, provider: &Capabilities) -> bool {
    self.slot.fill(provider)
  }
}

impl fmt::Debug for Dependency<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Dependency")
      .field("name", &self.name)
      .field("capability", &self.key.name)
      .field("subcomponent", &self.subcomponent)
      .field("set", &self.is_set())
      .finish()
  }
}
