//! Event channel implementation using crossbeam-channel.
//!
//! Hashing and thumbnailing may run on the rayon pool, so the sender has to
//! be cloneable and usable from any thread.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Sends events from the core library.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Send an event.
    ///
    /// If the receiver is dropped, the event is silently discarded,
    /// which makes progress reporting optional.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receives events from the core library.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event is received
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Iterate until every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Factory for sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// Create a new unbounded event channel.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A sender whose receiver is already gone, for runs without a UI.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{HashEvent, PipelineEvent};
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn events_can_be_sent_across_threads() {
        let (sender, receiver) = EventChannel::new();

        let handle = thread::spawn(move || {
            sender.send(Event::Hash(HashEvent::Error {
                path: PathBuf::from("/uploads/broken.png"),
                message: "bad header".to_string(),
            }));
        });

        handle.join().unwrap();

        match receiver.recv().unwrap() {
            Event::Hash(HashEvent::Error { path, .. }) => {
                assert_eq!(path, PathBuf::from("/uploads/broken.png"));
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn null_sender_does_not_panic() {
        let sender = null_sender();
        sender.send(Event::Pipeline(PipelineEvent::Started));
    }

    #[test]
    fn iter_ends_when_senders_drop() {
        let (sender, receiver) = EventChannel::new();
        let second = sender.clone();

        sender.send(Event::Pipeline(PipelineEvent::Started));
        second.send(Event::Pipeline(PipelineEvent::Started));
        drop(sender);
        drop(second);

        assert_eq!(receiver.iter().count(), 2);
    }
}
