//! Channel-backed notifier.
//!
//! Forwards notices to a front end over an unbounded tokio channel so the
//! use case never waits on rendering.

use tokio::sync::mpsc;
use userlist_core::notice::{Notice, Notifier};

pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Create a notifier with the given channel sender
    pub fn new(sender: mpsc::UnboundedSender<Notice>) -> Self {
        Self { sender }
    }

    /// Create a notifier together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        // Receiver gone means the screen is closed; nothing left to show
        if self.sender.send(notice).is_err() {
            tracing::debug!("[ChannelNotifier] Receiver dropped, notice discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_arrive_in_order() {
        let (notifier, mut receiver) = ChannelNotifier::channel();
        notifier.notify(Notice::success("one"));
        notifier.notify(Notice::error("two"));

        assert_eq!(receiver.try_recv().unwrap(), Notice::success("one"));
        assert_eq!(receiver.try_recv().unwrap(), Notice::error("two"));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (notifier, receiver) = ChannelNotifier::channel();
        drop(receiver);
        notifier.notify(Notice::success("nobody listening"));
    }
}
