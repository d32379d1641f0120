//! Lookup Actor: Runs the suggestion source off the UI loop.
//!
//! The suggestion service is injected behind [`SuggestionSource`] and may
//! block (network, IPC, disk). This actor owns it on a dedicated thread:
//! the widget sends [`LookupCmd::Fetch`] commands and receives
//! [`LookupReply`] settle messages. Requests are processed in dispatch
//! order on the single thread; a dispatched fetch cannot be cancelled, so
//! a reply for a superseded query can still arrive late.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::messages::{LookupCmd, LookupReply, SourceError};

/// A provider of search suggestions.
///
/// The contract is deliberately thin: an ordered list of candidate strings
/// for a query, scoped by a locale/site identifier, or an opaque failure.
/// The call runs on the lookup actor's thread and may block.
pub trait SuggestionSource: Send + Sync {
    /// Fetch suggestions for `query`, scoped to `locale`.
    fn fetch(&self, query: &str, locale: &str) -> Result<Vec<String>, SourceError>;
}

/// Lookup actor that executes suggestion fetches.
pub struct LookupActor {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    cmd_tx: Sender<LookupCmd>,
}

impl LookupActor {
    /// Spawn the lookup actor thread around a suggestion source.
    ///
    /// Settled fetches are delivered on `reply_tx`.
    ///
    /// # Panics
    /// Panics if the OS fails to spawn the thread.
    pub fn spawn(source: Arc<dyn SuggestionSource>, reply_tx: Sender<LookupReply>) -> Self {
        let (cmd_tx, cmd_rx) = unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("typeahead-lookup".to_string())
            .spawn(move || {
                Self::run_loop(&source, &cmd_rx, &reply_tx, &shutdown_clone);
            })
            .expect("failed to spawn lookup thread");

        Self {
            handle: Some(handle),
            shutdown,
            cmd_tx,
        }
    }

    /// Get a command sender for dispatching fetches.
    pub fn commander(&self) -> Sender<LookupCmd> {
        self.cmd_tx.clone()
    }

    /// Signal the lookup thread to shut down.
    ///
    /// A fetch already running completes first; its reply is discarded if
    /// the receiver is gone.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the lookup thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(
        source: &Arc<dyn SuggestionSource>,
        cmd_rx: &Receiver<LookupCmd>,
        reply_tx: &Sender<LookupReply>,
        shutdown: &Arc<AtomicBool>,
    ) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            match cmd_rx.recv_timeout(Duration::from_millis(25)) {
                Ok(LookupCmd::Fetch { query, locale }) => {
                    log::trace!("lookup dispatched: {query:?} ({locale})");
                    let result = source.fetch(&query, &locale);
                    if reply_tx.send(LookupReply { query, result }).is_err() {
                        // Receiver dropped, exit
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

impl Drop for LookupActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoSource;

    impl SuggestionSource for EchoSource {
        fn fetch(&self, query: &str, locale: &str) -> Result<Vec<String>, SourceError> {
            Ok(vec![format!("{query}@{locale}")])
        }
    }

    struct FailingSource;

    impl SuggestionSource for FailingSource {
        fn fetch(&self, _query: &str, _locale: &str) -> Result<Vec<String>, SourceError> {
            Err("service unavailable".into())
        }
    }

    #[test]
    fn test_fetches_settle_in_dispatch_order() {
        let (reply_tx, reply_rx) = unbounded();
        let actor = LookupActor::spawn(Arc::new(EchoSource), reply_tx);
        let commander = actor.commander();

        for query in ["a", "ab", "abc"] {
            commander
                .send(LookupCmd::Fetch {
                    query: query.to_string(),
                    locale: "en".to_string(),
                })
                .unwrap();
        }

        let mut settled = Vec::new();
        for _ in 0..3 {
            let reply = reply_rx.recv_timeout(Duration::from_secs(2)).unwrap();
            settled.push(reply.query);
        }
        assert_eq!(settled, ["a", "ab", "abc"]);

        actor.join();
    }

    #[test]
    fn test_source_failure_is_forwarded_opaque() {
        let (reply_tx, reply_rx) = unbounded();
        let actor = LookupActor::spawn(Arc::new(FailingSource), reply_tx);
        actor
            .commander()
            .send(LookupCmd::Fetch {
                query: "dog".to_string(),
                locale: "en".to_string(),
            })
            .unwrap();

        let reply = reply_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(reply.query, "dog");
        assert!(reply.result.is_err());

        actor.join();
    }
}
