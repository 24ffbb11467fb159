use tokio::sync::mpsc;
use tracing::debug;

use super::coordinator::ReparseCoordinator;
use super::event::Event;
use super::generator::Generator;

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

/// Create the channel events are delivered on.
pub fn channel() -> (EventSender, EventReceiver) {
  mpsc::unbounded_channel()
}

/// Drives a [`ReparseCoordinator`] from a channel.
///
/// Every wake-up drains all events that are already queued before
/// dispatching, so a burst of changes costs one parse.
pub struct EventLoop<G: Generator> {
  coordinator: ReparseCoordinator<G>,
  events: EventReceiver,
}

impl<G: Generator> EventLoop<G> {
  pub fn new(coordinator: ReparseCoordinator<G>, events: EventReceiver) -> Self {
    Self { coordinator, events }
  }

  pub fn coordinator(&self) -> &ReparseCoordinator<G> {
    &self.coordinator
  }

  pub fn coordinator_mut(&mut self) -> &mut ReparseCoordinator<G> {
    &mut self.coordinator
  }

  /// Wait for the next event, drain the queue, then dispatch.
  ///
  /// Returns false once every sender is gone and the queue is empty.
  pub async fn next_batch(&mut self) -> bool {
    let Some(first) = self.events.recv().await else {
      return false;
    };

    self.coordinator.handle(first);
    let mut handled = 1usize;
    while let Ok(event) = self.events.try_recv() {
      self.coordinator.handle(event);
      handled += 1;
    }

    let started = self.coordinator.dispatch();
    debug!(events = handled, started = ?started, "processed event batch");
    true
  }

  /// Run until the channel closes, then hand the coordinator back.
  pub async fn run(mut self) -> ReparseCoordinator<G> {
    while self.next_batch().await {}
    self.coordinator
  }
}
