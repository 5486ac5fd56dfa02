//! Core, non-public data structures for the component registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Identifies a capability by the type of its trait object (e.g. `dyn Starter`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CapabilityKey {
  pub(crate) type_id: TypeId,
  pub(crate) name: &'static str,
}

impl CapabilityKey {
  pub(crate) fn of<I: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<I>(),
      name: std::any::type_name::<I>(),
    }
  }
}

impl fmt::Debug for CapabilityKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Capability({})", self.name)
  }
}

/// The set of capabilities a single component exposes.
///
/// Each entry stores an `Rc<I>` for some trait object type `I`, boxed as
/// `dyn Any` and recovered by downcasting on lookup.
#[derive(Default)]
pub struct Capabilities {
  entries: HashMap<CapabilityKey, Box<dyn Any>>,
}

impl Capabilities {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Exposes `view` as an implementation of capability `I`.
  ///
  /// A later call for the same `I` replaces the earlier view.
  pub fn provide<I: ?Sized + Any>(&mut self, view: Rc<I>) -> &mut Self {
    self.entries.insert(CapabilityKey::of::<I>(), Box::new(view));
    self
  }

  /// Returns the view registered for capability `I`, if any.
  pub fn get<I: ?Sized + Any>(&self) -> Option<Rc<I>> {
    self
      .entries
      .get(&CapabilityKey::of::<I>())
      .and_then(|boxed| boxed.downcast_ref::<Rc<I>>())
      .cloned()
  }

  pub fn contains<I: ?Sized + Any>(&self) -> bool {
    self.contains_key(&CapabilityKey::of::<I>())
  }

  pub(crate) fn contains_key(&self, key: &CapabilityKey) -> bool {
    self.entries.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl fmt::Debug for Capabilities {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.entries.keys()).finish()
  }
}
