// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A one-shot delayed event. Dropping the handle cancels it; a cancelled
/// reveal never sends.
#[derive(Debug)]
pub struct PendingReveal {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PendingReveal {
    pub fn spawn<E: Send + 'static>(delay: Duration, tx: Sender<E>, event: E) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || match cancel_rx.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {
                let _ = tx.send(event);
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
        });
        Self {
            cancel: Some(cancel_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for PendingReveal {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
