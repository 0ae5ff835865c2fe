//! Redraw signals for hosts whose event loop sleeps between inputs.
//!
//! Some dropdown state changes have no input event behind them: a lookup
//! resolves, or a sibling dropdown claims the open slot. Each dropdown pokes
//! the host through this channel so it knows to draw again.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

/// Create a connected sender/receiver pair.
///
/// The channel holds a single pending signal; further signals before the host
/// wakes up are absorbed.
pub fn channel() -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (WakeupSender { tx }, WakeupReceiver { rx })
}

/// Signalling half, cloned into every dropdown.
#[derive(Clone, Debug)]
pub struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Ask the host to redraw. Returns false if no signal was queued, either
    /// because one is already pending or because the host has gone away.
    pub fn notify(&self) -> bool {
        self.tx.try_send(()).is_ok()
    }
}

/// Host half of the channel.
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    /// Sleep until a redraw is requested.
    ///
    /// Returns false once every sender is dropped and nothing is pending.
    pub async fn wait(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }

    /// Consume a pending request without waiting. Returns whether there was
    /// one.
    pub fn take_pending(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }
}

/// Per-dropdown slot for the host's sender, filled in after construction.
#[derive(Debug, Default, Clone)]
pub(crate) struct WakeupHandle {
    sender: Arc<Mutex<Option<WakeupSender>>>,
}

impl WakeupHandle {
    pub(crate) fn install(&self, sender: WakeupSender) {
        if let Ok(mut slot) = self.sender.lock() {
            slot.replace(sender);
        }
    }

    pub(crate) fn notify(&self) {
        let sender = self.sender.lock().ok().and_then(|slot| slot.clone());
        if let Some(sender) = sender {
            sender.notify();
        }
    }
}
