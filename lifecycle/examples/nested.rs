use fibre_lifecycle::{
  dependencies, provide, BoxError, Capabilities, Component, Dependency, Inject, Registry, Starter,
  Stopper, TracingLogger,
};
use std::cell::Cell;
use std::rc::Rc;
use tokio_util::sync::CancellationToken;

trait Storage {
  fn put(&self, key: &str);
}

// Owned and driven by the application-wide registry.
struct Database {
  writes: Cell<usize>,
}

impl Storage for Database {
  fn put(&self, key: &str) {
    self.writes.set(self.writes.get() + 1);
    println!("[DB]: put {}", key);
  }
}

impl Starter for Database {
  fn start(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
    println!("[DB]: started");
    Ok(())
  }
}

impl Stopper for Database {
  fn stop(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
    println!("[DB]: stopped after {} writes", self.writes.get());
    Ok(())
  }
}

impl Component for Database {
  fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
    provide!(self, caps => dyn Storage, dyn Starter, dyn Stopper);
  }
}

// Lives in a child registry and reaches the database through its parent.
struct SessionHandler {
  storage: Inject<dyn Storage>,
}

impl Starter for SessionHandler {
  fn start(&self, _ctx: &CancellationToken) -> Result<(), BoxError> {
    self.storage.put("session:1");
    Ok(())
  }
}

impl Component for SessionHandler {
  fn dependencies(&self) -> Vec<Dependency<'_>> {
    dependencies!(self => storage as subcomponent)
  }

  fn capabilities(self: Rc<Self>, caps: &mut Capabilities) {
    provide!(self, caps => dyn Starter);
  }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let ctx = CancellationToken::new();

  let mut app = Registry::new().with_logger(TracingLogger);
  app.inject(Rc::new(Database {
    writes: Cell::new(0),
  }))?;

  let mut sessions = Registry::with_parent(&app).with_logger(TracingLogger);
  sessions.inject(Rc::new(SessionHandler {
    storage: Inject::new(),
  }))?;

  // Parent first, so the database is up before the handlers use it.
  app.start(&ctx)?;
  sessions.start(&ctx)?;

  sessions.stop(&ctx)?;
  app.stop(&ctx)?;
  Ok(())
}
