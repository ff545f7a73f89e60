//! Event channel built on crossbeam-channel.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::{CleanEvent, Event, ReportEvent};

/// Publishing end held by the sanitizer and the reporter.
///
/// A sender without a channel (see [`null_sender`]) accepts events and
/// discards them. Cloning shares the same channel.
#[derive(Clone, Default)]
pub struct EventSender {
    channel: Option<Sender<Event>>,
}

impl EventSender {
    /// Publish an event. A hung-up receiver is not an error for the core.
    pub fn send(&self, event: Event) {
        let Some(channel) = &self.channel else {
            return;
        };
        if channel.send(event).is_err() {
            tracing::trace!("event receiver hung up");
        }
    }

    pub fn clean(&self, event: CleanEvent) {
        self.send(Event::Clean(event));
    }

    pub fn report(&self, event: ReportEvent) {
        self.send(Event::Report(event));
    }

    /// Whether events reach a receiver at all
    pub fn is_attached(&self) -> bool {
        self.channel.is_some()
    }
}

/// Consuming end, usually drained on a front-end thread
pub struct EventReceiver {
    channel: Receiver<Event>,
}

impl EventReceiver {
    /// Block for the next event; `None` once every sender is dropped
    pub fn recv(&self) -> Option<Event> {
        self.channel.recv().ok()
    }

    /// Events already queued, without blocking
    pub fn drain(&self) -> Vec<Event> {
        self.channel.try_iter().collect()
    }

    /// Blocking iterator that ends when every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.channel.iter()
    }
}

/// Creates connected sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// Unbounded channel: the core never blocks on a slow front end.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (EventSender, EventReceiver) {
        let (tx, rx) = unbounded();
        (
            EventSender { channel: Some(tx) },
            EventReceiver { channel: rx },
        )
    }
}

/// Sender for callers that do not want progress events
pub fn null_sender() -> EventSender {
    EventSender::default()
}
