//! Directory loader for dirview.
//!
//! Directory reads happen on a background thread so a slow filesystem never blocks input.
//! Requests [WorkerTask] come in from the AppState via a channel, results [WorkerResponse] go
//! back the same way and are fed into the navigator as a later message.
//!
//! Every request carries the identity of the browser that issued it and a request id. A browser
//! that called [Workers::subscribe] gets the responses for its identity on its own receiver,
//! everything else lands on the shared [Workers::response_rx]. The navigator still checks both
//! ids to drop results for a directory the user already left.
//!
//! # Caution:
//! This module is a protocol boundary. Adding or editing variants or fields requires matching
//! changes in the navigator and in the app state.

use crate::core::{Entry, browse_dir};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

/// Response senders of subscribed browsers, keyed by identity.
type Routes = Arc<Mutex<HashMap<u64, Sender<WorkerResponse>>>>;

/// An issued directory read, correlated with the browser that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub identity: u64,
    pub request_id: u64,
    pub path: PathBuf,
}

/// Tasks sent to the worker thread via channel.
#[derive(Debug)]
pub enum WorkerTask {
    LoadDirectory(PendingLoad),
}

/// Responses sent from the worker thread back to the main thread via the channel.
#[derive(Debug)]
pub enum WorkerResponse {
    /// A finished read. A failed read arrives here too, with an empty `entries` list.
    DirectoryLoaded {
        identity: u64,
        request_id: u64,
        path: PathBuf,
        entries: Vec<Entry>,
    },
}

/// Owns the channels to the I/O worker thread.
pub struct Workers {
    io_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
    routes: Routes,
}

impl Workers {
    /// Create the worker set and spawn the I/O thread.
    pub fn spawn() -> Self {
        let (io_tx, io_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();
        let routes = Routes::default();

        start_io_worker(io_rx, res_tx, Arc::clone(&routes));

        Self {
            io_tx,
            response_rx,
            routes,
        }
    }

    /// Gives `identity` its own response receiver.
    ///
    /// Listings for that identity are delivered only there, so several browsers can share one
    /// worker without draining each other's results. Subscribing again replaces the receiver.
    pub fn subscribe(&self, identity: u64) -> Receiver<WorkerResponse> {
        let (tx, rx) = unbounded();
        lock_routes(&self.routes).insert(identity, tx);
        rx
    }

    /// Fire and forget: queues a directory read for the I/O thread.
    pub fn submit(&self, load: PendingLoad) {
        tracing::debug!(
            identity = load.identity,
            request_id = load.request_id,
            path = %load.path.display(),
            "queue directory load"
        );
        if self.io_tx.send(WorkerTask::LoadDirectory(load)).is_err() {
            tracing::error!("I/O worker is gone, directory load dropped");
        }
    }

    /// Responses for identities without a subscription.
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Reads the directory of a pending load.
///
/// A failed read is logged and downgraded to an empty listing.
pub fn load_directory(load: &PendingLoad) -> Vec<Entry> {
    match browse_dir(&load.path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                path = %load.path.display(),
                error = %e,
                "failed to read directory"
            );
            Vec::new()
        }
    }
}

/// Folds a newer load into the queue, replacing an older load of the same browser.
fn coalesce(queue: &mut Vec<PendingLoad>, load: PendingLoad) {
    match queue.iter_mut().find(|q| q.identity == load.identity) {
        Some(slot) => *slot = load,
        None => queue.push(load),
    }
}

fn lock_routes(routes: &Routes) -> MutexGuard<'_, HashMap<u64, Sender<WorkerResponse>>> {
    routes.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sends a response to the subscriber of its identity, or to the shared channel.
///
/// Returns `false` once the shared channel is closed.
fn deliver(routes: &Routes, res_tx: &Sender<WorkerResponse>, response: WorkerResponse) -> bool {
    let WorkerResponse::DirectoryLoaded { identity, .. } = response;
    let route = lock_routes(routes).get(&identity).cloned();

    match route {
        Some(tx) => {
            if tx.send(response).is_err() {
                lock_routes(routes).remove(&identity);
                tracing::debug!(identity, "browser is gone, dropping its route");
            }
            true
        }
        None => res_tx.send(response).is_ok(),
    }
}

/// Starts the io worker thread, which listens to [WorkerTask] and sends back [WorkerResponse].
///
/// Queued loads of the same browser are coalesced so only the newest one is read.
///
/// # Arguments
/// * `task_rx` - Receiver channel for incoming tasks
/// * `res_tx` - Sender channel for responses nobody subscribed to
/// * `routes` - Per-identity response senders
fn start_io_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>, routes: Routes) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let mut queue = Vec::with_capacity(1);
            let WorkerTask::LoadDirectory(first) = task;
            queue.push(first);

            while let Ok(WorkerTask::LoadDirectory(next)) = task_rx.try_recv() {
                coalesce(&mut queue, next);
            }

            for load in queue {
                let entries = load_directory(&load);
                let response = WorkerResponse::DirectoryLoaded {
                    identity: load.identity,
                    request_id: load.request_id,
                    path: load.path,
                    entries,
                };
                if !deliver(&routes, &res_tx, response) {
                    return;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn load(identity: u64, request_id: u64, path: &str) -> PendingLoad {
        PendingLoad {
            identity,
            request_id,
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn coalesce_keeps_newest_per_identity() {
        let mut queue = vec![load(1, 1, "a")];
        coalesce(&mut queue, load(2, 1, "x"));
        coalesce(&mut queue, load(1, 2, "b"));
        coalesce(&mut queue, load(1, 3, "c"));

        assert_eq!(queue, vec![load(1, 3, "c"), load(2, 1, "x")]);
    }

    #[test]
    fn failed_read_is_empty_listing() {
        let entries = load_directory(&load(1, 1, "/path/does/not/exist"));
        assert!(entries.is_empty());
    }

    #[test]
    fn worker_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::File::create(dir.path().join("one.txt"))?;

        let workers = Workers::spawn();
        workers.submit(PendingLoad {
            identity: 7,
            request_id: 3,
            path: dir.path().to_path_buf(),
        });

        let WorkerResponse::DirectoryLoaded {
            identity,
            request_id,
            path,
            entries,
        } = workers.response_rx().recv_timeout(Duration::from_secs(5))?;

        assert_eq!(identity, 7);
        assert_eq!(request_id, 3);
        assert_eq!(path, dir.path());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name_str(), "one.txt");
        Ok(())
    }

    #[test]
    fn subscribed_identity_gets_its_own_listing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let workers = Workers::spawn();
        let own = workers.subscribe(4);

        workers.submit(load(4, 1, &dir.path().to_string_lossy()));
        workers.submit(load(5, 1, &dir.path().to_string_lossy()));

        let WorkerResponse::DirectoryLoaded { identity, .. } =
            own.recv_timeout(Duration::from_secs(5))?;
        assert_eq!(identity, 4);

        let WorkerResponse::DirectoryLoaded { identity, .. } =
            workers.response_rx().recv_timeout(Duration::from_secs(5))?;
        assert_eq!(identity, 5);

        assert!(own.try_recv().is_err(), "no foreign listing on a subscribed receiver");
        assert!(workers.response_rx().try_recv().is_err());
        Ok(())
    }
}
