use fibre_lifecycle::{
  provide, BoxError, Capabilities, Component, Error, GracefulStopper, Initer, NoLogger, Phase,
  Registry, Starter, Stopper,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use tokio_util::sync::CancellationToken;

// --- Test Fixtures ---

type CallLog = Rc<RefCell<Vec<String>>>;

// Records every phase it is driven through.
struct Recorder {
  name: &'static str,
  log: CallLog,
}

impl Recorder {
  fn new(name: &'static str, log: &CallLog) -> Rc<Self> {
    Rc::new(Self {
      name,
      log: log.clone(),
    })
  }

  fn record(&self, phase: Phase) -> Result<(), BoxError> {
    self.log.borrow_mut().push(format!("{}:{}", phase, self.name));
    Ok(())
  }
}

impl Initer for Recorder {
  fn init(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
    self.record(Phase::Init)
  }
}
impl Starter for Recorder {
  fn start(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
    self.record(Phase::Start)
  }
}
impl GracefulStopper for Recorder {
  fn graceful_stop(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
    self.record(Phase::GracefulStop)
  }
}
impl Stopper for Recorder {
  fn stop(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
    self.record(Phase::Stop)
  }
}

impl Component for Recorder {
  fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
    provide!(self, caps => dyn Initer, dyn Starter, dyn GracefulStopper, dyn Stopper);
  }
}

// Records like `Recorder`, but fails every phase after recording it.
struct Faulty {
  log: CallLog,
}

impl Faulty {
  fn fail(&self, phase: Phase) -> Result<(), BoxError> {
    self.log.borrow_mut().push(format!("{}:faulty", phase));
    Err(format!("faulty refused to {}", phase).into())
  }
}

impl Starter for Faulty {
  fn start(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
    self.fail(Phase::Start)
  }
}
impl Stopper for Faulty {
  fn stop(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
    self.fail(Phase::Stop)
  }
}

impl Component for Faulty {
  fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
    provide!(self, caps => dyn Starter, dyn Stopper);
  }
}

fn registry() -> Registry<'static> {
  Registry::new().with_logger(NoLogger)
}

fn calls(log: &CallLog) -> Vec<String> {
  log.borrow().clone()
}

// --- Tests ---

#[test]
fn test_phase_ordering_across_three_components() {
  // Arrange
  let log = CallLog::default();
  let mut registry = registry();
  registry
    .register(Recorder::new("a", &log))
    .register(Recorder::new("b", &log))
    .register(Recorder::new("c", &log));
  let ctx = CancellationToken::new();

  // Act
  registry.init(&ctx).unwrap();
  registry.start(&ctx).unwrap();
  registry.graceful_stop(&ctx).unwrap();
  registry.stop(&ctx).unwrap();

  // Assert
  assert_eq!(
    calls(&log),
    vec![
      "Init:a",
      "Init:b",
      "Init:c",
      "Start:a",
      "Start:b",
      "Start:c",
      "GracefulStop:c",
      "GracefulStop:b",
      "GracefulStop:a",
      "Stop:c",
      "Stop:b",
      "Stop:a",
    ]
  );
}

#[test]
fn test_start_failure_short_circuits() {
  // Arrange
  let log = CallLog::default();
  let mut registry = registry();
  registry
    .register(Recorder::new("first", &log))
    .register(Rc::new(Faulty { log: log.clone() }))
    .register(Recorder::new("third", &log));

  // Act
  let err = registry.start(&CancellationToken::new()).unwrap_err();

  // Assert
  assert_eq!(calls(&log), vec!["Start:first", "Start:faulty"]);
  match &err {
    Error::Phase {
      phase, component, ..
    } => {
      assert_eq!(*phase, Phase::Start);
      assert!(component.ends_with("Faulty"));
    }
    other => panic!("unexpected error: {other:?}"),
  }
  let message = err.to_string();
  assert!(message.contains("Start"));
  assert!(message.contains("Faulty"));
  assert!(message.contains("faulty refused to Start"));

  let source = std::error::Error::source(&err).expect("phase error keeps its cause");
  assert_eq!(source.to_string(), "faulty refused to Start");
}

#[test]
fn test_stop_failure_short_circuits_in_reverse() {
  let log = CallLog::default();
  let mut registry = registry();
  registry
    .register(Recorder::new("first", &log))
    .register(Rc::new(Faulty { log: log.clone() }))
    .register(Recorder::new("third", &log));

  let err = registry.stop(&CancellationToken::new()).unwrap_err();

  assert_eq!(calls(&log), vec!["Stop:third", "Stop:faulty"]);
  assert!(matches!(
    err,
    Error::Phase {
      phase: Phase::Stop,
      ..
    }
  ));
}

#[test]
fn test_components_without_capability_are_skipped() {
  // Only implements Init.
  struct Migrator {
    log: CallLog,
  }
  impl Initer for Migrator {
    fn init(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
      self.log.borrow_mut().push("Init:migrator".to_string());
      Ok(())
    }
  }
  impl Component for Migrator {
    fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
      provide!(self, caps => dyn Initer);
    }
  }

  let log = CallLog::default();
  let mut registry = registry();
  registry.register(Rc::new(Migrator { log: log.clone() }));
  let ctx = CancellationToken::new();

  registry.init(&ctx).unwrap();
  registry.start(&ctx).unwrap();
  registry.graceful_stop(&ctx).unwrap();
  registry.stop(&ctx).unwrap();

  assert_eq!(calls(&log), vec!["Init:migrator"]);
}

#[test]
fn test_phases_redispatch_when_called_twice() {
  let log = CallLog::default();
  let mut registry = registry();
  registry.register(Recorder::new("a", &log));
  let ctx = CancellationToken::new();

  registry.start(&ctx).unwrap();
  registry.start(&ctx).unwrap();

  assert_eq!(calls(&log), vec!["Start:a", "Start:a"]);
}

#[test]
fn test_duplicate_registration_is_driven_per_entry() {
  let log = CallLog::default();
  let recorder = Recorder::new("dup", &log);
  let mut registry = registry();
  registry.register(recorder.clone()).register(recorder);

  registry.init(&CancellationToken::new()).unwrap();

  assert_eq!(calls(&log), vec!["Init:dup", "Init:dup"]);
}

#[test]
fn test_cancellation_is_left_to_components() {
  // Refuses to start once the context is cancelled.
  struct Listener;
  impl Starter for Listener {
    fn start(&self, ctx: &CancellationToken) -> Result<(), BoxError> {
      if ctx.is_cancelled() {
        return Err("start cancelled".into());
      }
      Ok(())
    }
  }
  impl Component for Listener {
    fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
      provide!(self, caps => dyn Starter);
    }
  }

  let mut registry = registry();
  registry.register(Rc::new(Listener));
  let ctx = CancellationToken::new();

  registry.start(&ctx).unwrap();

  ctx.cancel();
  let err = registry.start(&ctx).unwrap_err();
  assert!(err.to_string().contains("start cancelled"));
}

#[test]
fn test_drive_matches_named_phase_methods() {
  let log = CallLog::default();
  let mut registry = registry();
  registry
    .register(Recorder::new("a", &log))
    .register(Recorder::new("b", &log));

  registry
    .drive(Phase::GracefulStop, &CancellationToken::new())
    .unwrap();

  assert_eq!(calls(&log), vec!["GracefulStop:b", "GracefulStop:a"]);
}
