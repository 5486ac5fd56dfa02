//! Lifecycle capabilities and the phases that dispatch to them.
//!
//! A component opts into a phase by implementing the matching trait and
//! exposing it from [`Component::capabilities`](crate::Component::capabilities).
//! Components that do not expose a phase's capability are skipped for that
//! phase.

use crate::core::Capabilities;
use crate::error::BoxError;
use std::fmt;
use std::rc::Rc;
use tokio_util::sync::CancellationToken;

/// Exposes an initialize operation, run during [`Phase::Init`].
pub trait Initer {
  fn init(&self, ctx: &CancellationToken) -> Result<(), BoxError>;
}

/// Exposes a start operation, run during [`Phase::Start`].
pub trait Starter {
  fn start(&self, ctx: &CancellationToken) -> Result<(), BoxError>;
}

/// Exposes a graceful stop operation, run during [`Phase::GracefulStop`].
pub trait GracefulStopper {
  fn graceful_stop(&self, ctx: &CancellationToken) -> Result<(), BoxError>;
}

/// Exposes a stop operation, run during [`Phase::Stop`].
pub trait Stopper {
  fn stop(&self, ctx: &CancellationToken) -> Result<(), BoxError>;
}

/// One lifecycle transition driven across a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
  Init,
  Start,
  GracefulStop,
  Stop,
}

impl Phase {
  /// Teardown phases visit components last-registered-first.
  pub fn is_reverse(self) -> bool {
    matches!(self, Phase::GracefulStop | Phase::Stop)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Phase::Init => "Init",
      Phase::Start => "Start",
      Phase::GracefulStop => "GracefulStop",
      Phase::Stop => "Stop",
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A component's handler for one phase, looked up from its capabilities.
pub(crate) enum Dispatch {
  Init(Rc<dyn Initer>),
  Start(Rc<dyn Starter>),
  GracefulStop(Rc<dyn GracefulStopper>),
  Stop(Rc<dyn Stopper>),
}

impl Dispatch {
  pub(crate) fn lookup(phase: Phase, caps: &Capabilities) -> Option<Self> {
    match phase {
      Phase::Init => caps.get::<dyn Initer>().map(Dispatch::Init),
      Phase::Start => caps.get::<dyn Starter>().map(Dispatch::Start),
      Phase::GracefulStop => caps
        .get::<dyn GracefulStopper>()
        .map(Dispatch::GracefulStop),
      Phase::Stop => caps.get::<dyn Stopper>().map(Dispatch::Stop),
    }
  }

  pub(crate) fn run(&self, ctx: &CancellationToken) -> Result<(), BoxError> {
    match self {
      Dispatch::Init(c) => c.init(ctx),
      Dispatch::Start(c) => c.start(ctx),
      Dispatch::GracefulStop(c) => c.graceful_stop(ctx),
      Dispatch::Stop(c) => c.stop(ctx),
    }
  }
}
