//! Public macros for declaring dependencies and capabilities.

/// Builds the `Vec<Dependency>` returned from [`Component::dependencies`](crate::Component::dependencies).
///
/// Each listed field must be an [`Inject`](crate::Inject) slot. Append
/// `as subcomponent` to a field to resolve it only inside a child registry.
/// Slot names are the field names, and order is preserved.
///
/// # Examples
///
/// ```
/// use fibre_lifecycle::{dependencies, Component, Dependency, Inject};
///
/// trait Storage {}
/// trait Network {}
///
/// struct Server {
///   storage: Inject<dyn Storage>,
///   network: Inject<dyn Network>,
/// }
///
/// impl Component for Server {
///   fn dependencies(&self) -> Vec<Dependency<'_>> {
///     dependencies!(self => storage, network as subcomponent)
///   }
/// }
/// ```
#[macro_export]
macro_rules! dependencies {
  (@slot $owner:ident, $field:ident) => {
    $crate::Dependency::required(stringify!($field), &$owner.$field)
  };

  (@slot $owner:ident, $field:ident, subcomponent) => {
    $crate::Dependency::subcomponent(stringify!($field), &$owner.$field)
  };

  ($owner:ident => $($field:ident $(as $kind:ident)?),* $(,)?) => {
    vec![$($crate::dependencies!(@slot $owner, $field $(, $kind)?)),*]
  };
}

/// Exposes a component as each of the listed capabilities.
///
/// Intended for the body of [`Component::capabilities`](crate::Component::capabilities).
///
/// # Examples
///
/// ```
/// use fibre_lifecycle::{provide, BoxError, Capabilities, Component, Starter};
/// use std::rc::Rc;
/// use tokio_util::sync::CancellationToken;
///
/// trait Buyer {
///   fn buy(&self, goods: &[&str]);
/// }
///
/// struct Supermarket;
///
/// impl Buyer for Supermarket {
///   fn buy(&self, _goods: &[&str]) {}
/// }
///
/// impl Starter for Supermarket {
///   fn start(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
///     Ok(())
///   }
/// }
///
/// impl Component for Supermarket {
///   fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
///     provide!(self, caps => dyn Buyer, dyn Starter);
///   }
/// }
/// ```
#[macro_export]
macro_rules! provide {
  ($this:ident, $caps:ident => $(dyn $cap:path),+ $(,)?) => {
    $(
      $caps.provide::<dyn $cap>($this.clone());
    )+
  };
}
