//! The `Registry`: component storage, dependency injection and the lifecycle driver.

use crate::component::{Component, Dependency};
use crate::core::{Capabilities, CapabilityKey};
use crate::error::{Error, Result};
use crate::lifecycle::{Dispatch, Phase};
use crate::logger::{ConsoleLogger, Logger};
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use tokio_util::sync::CancellationToken;

struct Entry {
  name: &'static str,
  instance: Rc<dyn Component>,
  capabilities: Capabilities,
}

impl Entry {
  fn is<T: ?Sized>(&self, other: *const T) -> bool {
    Rc::as_ptr(&self.instance) as *const () == other as *const ()
  }
}

/// An ordered collection of components, optionally nested under a parent.
///
/// Components are registered once during start-up, wired with [`inject`],
/// then driven through [`init`], [`start`], [`graceful_stop`] and [`stop`].
///
/// A child registry borrows its parent. Slots are resolved against the
/// parent's components first, and the child never drives a component that
/// the parent also holds, so shared components are driven exactly once.
///
/// The registry is not thread-safe. It is meant to be built and driven on the
/// thread that runs process start-up and shutdown.
///
/// [`inject`]: Registry::inject
/// [`init`]: Registry::init
/// [`start`]: Registry::start
/// [`graceful_stop`]: Registry::graceful_stop
/// [`stop`]: Registry::stop
pub struct Registry<'p> {
  parent: Option<&'p Registry<'p>>,
  components: Vec<Entry>,
  logger: Box<dyn Logger>,
}

impl Default for Registry<'_> {
  fn default() -> Self {
    Self {
      parent: None,
      components: Vec::new(),
      logger: Box::new(ConsoleLogger),
    }
  }
}

impl<'p> Registry<'p> {
  /// Creates a new, empty root registry that logs to the console.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a new, empty registry nested under `parent`.
  pub fn with_parent(parent: &'p Registry<'p>) -> Self {
    Self {
      parent: Some(parent),
      ..Self::default()
    }
  }

  /// Builder form of [`set_logger`](Registry::set_logger).
  pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
    self.set_logger(logger);
    self
  }

  /// Replaces the diagnostic sink. Affects subsequent calls only.
  pub fn set_logger(&mut self, logger: impl Logger + 'static) {
    self.logger = Box::new(logger);
  }

  pub fn parent(&self) -> Option<&'p Registry<'p>> {
    self.parent
  }

  pub fn len(&self) -> usize {
    self.components.len()
  }

  pub fn is_empty(&self) -> bool {
    self.components.is_empty()
  }

  /// Returns `true` if this exact instance is registered locally.
  pub fn contains<T: ?Sized>(&self, component: &Rc<T>) -> bool {
    let ptr = Rc::as_ptr(component);
    self.components.iter().any(|entry| entry.is(ptr))
  }

  /// Returns the first locally registered component providing capability `I`.
  pub fn get<I: ?Sized + Any>(&self) -> Option<Rc<I>> {
    self
      .components
      .iter()
      .find_map(|entry| entry.capabilities.get::<I>())
  }

  // --- Registration ---

  /// Appends a component. No injection is performed.
  pub fn register<T: Component>(&mut self, component: Rc<T>) -> &mut Self {
    self.push(component);
    self
  }

  /// Appends several components in iteration order. No injection is performed.
  pub fn register_all<I>(&mut self, components: I) -> &mut Self
  where
    I: IntoIterator<Item = Rc<dyn Component>>,
  {
    for component in components {
      self.push(component);
    }
    self
  }

  /// Registers a component, then runs a full resolution pass.
  pub fn inject<T: Component>(&mut self, component: Rc<T>) -> Result<()> {
    self.push(component);
    self.resolve()
  }

  /// Registers several components, then runs a full resolution pass.
  pub fn inject_all<I>(&mut self, components: I) -> Result<()>
  where
    I: IntoIterator<Item = Rc<dyn Component>>,
  {
    self.register_all(components);
    self.resolve()
  }

  fn push(&mut self, instance: Rc<dyn Component>) {
    let mut capabilities = Capabilities::new();
    Rc::clone(&instance).capabilities(&mut capabilities);
    self.components.push(Entry {
      name: instance.component_name(),
      instance,
      capabilities,
    });
  }

  // --- Injection ---

  /// Fills every empty slot of every local component.
  ///
  /// Slots that already hold a value are left untouched. Each remaining slot
  /// receives the first component, in registration order, that provides the
  /// required capability, searching the parent's components before the local
  /// ones. Subcomponent slots are skipped in a root registry.
  ///
  /// The pass is all-or-nothing: if any slot cannot be satisfied, no slot is
  /// written and [`Error::MissingDependency`] names the first one found.
  pub fn resolve(&self) -> Result<()> {
    let mut plan: Vec<(Dependency<'_>, &Entry)> = Vec::new();

    for entry in &self.components {
      self
        .logger
        .debugf(format_args!("Registry: Inject component: {}", entry.name));

      for dependency in entry.instance.dependencies() {
        if dependency.is_set() {
          continue;
        }
        if dependency.is_subcomponent() && self.parent.is_none() {
          self.logger.debugf(format_args!(
            "Registry: Component {} skips subcomponent slot {} without a parent",
            entry.name,
            dependency.name()
          ));
          continue;
        }
        self.logger.debugf(format_args!(
          "Registry: Component {} need inject: {}",
          entry.name,
          dependency.name()
        ));

        let provider =
          self
            .find_provider(dependency.key())
            .ok_or_else(|| Error::MissingDependency {
              component: entry.name,
              capability: dependency.capability(),
              slot: dependency.name(),
            })?;
        plan.push((dependency, provider));
      }
    }

    for (dependency, provider) in plan {
      dependency.fill(&provider.capabilities);
      self.logger.debugf(format_args!(
        "Registry: Inject capability {} with {}",
        dependency.capability(),
        provider.name
      ));
    }
    Ok(())
  }

  fn find_provider(&self, key: &CapabilityKey) -> Option<&Entry> {
    let inherited = self.parent.map(|p| p.components.as_slice()).unwrap_or(&[]);
    inherited
      .iter()
      .chain(self.components.iter())
      .find(|entry| entry.capabilities.contains_key(key))
  }

  // --- Lifecycle ---

  /// Runs `Initer::init` on every managed component, in registration order.
  pub fn init(&self, ctx: &CancellationToken) -> Result<()> {
    self.drive(Phase::Init, ctx)
  }

  /// Runs `Starter::start` on every managed component, in registration order.
  pub fn start(&self, ctx: &CancellationToken) -> Result<()> {
    self.drive(Phase::Start, ctx)
  }

  /// Runs `GracefulStopper::graceful_stop` on every managed component, in
  /// reverse registration order.
  pub fn graceful_stop(&self, ctx: &CancellationToken) -> Result<()> {
    self.drive(Phase::GracefulStop, ctx)
  }

  /// Runs `Stopper::stop` on every managed component, in reverse registration order.
  pub fn stop(&self, ctx: &CancellationToken) -> Result<()> {
    self.drive(Phase::Stop, ctx)
  }

  /// Dispatches `phase` to every managed component that implements it.
  ///
  /// Stops at the first failure; components after the failing one are not
  /// visited. The context is handed to each component untouched.
  pub fn drive(&self, phase: Phase, ctx: &CancellationToken) -> Result<()> {
    let entries: Box<dyn Iterator<Item = &Entry> + '_> = if phase.is_reverse() {
      Box::new(self.components.iter().rev())
    } else {
      Box::new(self.components.iter())
    };

    for entry in entries.filter(|entry| self.is_managed(entry)) {
      let Some(handler) = Dispatch::lookup(phase, &entry.capabilities) else {
        self.logger.debugf(format_args!(
          "Registry: Component {} has no {} method",
          entry.name, phase
        ));
        continue;
      };

      self.logger.debugf(format_args!(
        "Registry: {} component: {}",
        phase, entry.name
      ));
      handler.run(ctx).map_err(|source| Error::Phase {
        phase,
        component: entry.name,
        source,
      })?;
    }
    Ok(())
  }

  /// A component is managed here unless the parent holds the same instance.
  fn is_managed(&self, entry: &Entry) -> bool {
    let Some(parent) = self.parent else {
      return true;
    };
    let ptr = Rc::as_ptr(&entry.instance);
    !parent.components.iter().any(|other| other.is(ptr))
  }
}

impl fmt::Debug for Registry<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registry")
      .field("has_parent", &self.parent.is_some())
      .field(
        "components",
        &self.components.iter().map(|e| e.name).collect::<Vec<_>>(),
      )
      .finish()
  }
}
