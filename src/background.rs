//! Background data loading with stale-delivery protection
//!
//! A view owns a `ViewHandle`. Each load request bumps the handle's
//! generation and spawns a task that fetches from the provider and sends a
//! single `Delivery` back over an mpsc channel. The UI thread only applies a
//! delivery when `ViewHandle::accept` says it is current, so a late answer
//! for a replaced or closed view is dropped instead of touching its grids.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::data_provider::{RecordSet, SourceKind, SportsDataProvider};
use crate::error::ProviderError;

/// Channel capacity for pending deliveries
const DELIVERY_BUFFER: usize = 32;

#[derive(Debug, Default)]
struct ViewState {
    generation: AtomicU64,
    closed: AtomicBool,
}

/// Liveness and generation marker for one view
#[derive(Debug, Clone)]
pub struct ViewHandle {
    id: u64,
    state: Arc<ViewState>,
}

impl ViewHandle {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: Arc::new(ViewState::default()),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.state.generation.load(Ordering::SeqCst)
    }

    pub fn is_alive(&self) -> bool {
        !self.state.closed.load(Ordering::SeqCst)
    }

    /// Start a new load; earlier in-flight loads become stale
    pub fn next_generation(&self) -> u64 {
        self.state.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Tear the view down; every later delivery is dropped
    pub fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
        debug!("LOADER: view {} closed at generation {}", self.id, self.generation());
    }

    /// Whether a delivery is for this view's live, current generation
    pub fn accept(&self, delivery: &Delivery) -> bool {
        if delivery.view != self.id {
            return false;
        }
        if !self.is_alive() {
            debug!("LOADER: dropping {} delivery for closed view {}", delivery.kind, self.id);
            return false;
        }
        let current = self.generation();
        if delivery.generation != current {
            debug!(
                "LOADER: dropping stale {} delivery for view {} (generation {} != {})",
                delivery.kind, self.id, delivery.generation, current
            );
            return false;
        }
        true
    }

    /// The delivery's payload, if it is current
    pub fn take(&self, delivery: Delivery) -> Option<Result<RecordSet, ProviderError>> {
        if self.accept(&delivery) {
            Some(delivery.result)
        } else {
            None
        }
    }
}

/// A complete snapshot produced by one background load
#[derive(Debug)]
pub struct Delivery {
    pub view: u64,
    pub generation: u64,
    pub kind: SourceKind,
    pub id: String,
    pub result: Result<RecordSet, ProviderError>,
}

/// Spawns provider fetches and funnels their results to one receiver
pub struct Loader {
    provider: Arc<dyn SportsDataProvider>,
    tx: mpsc::Sender<Delivery>,
}

impl Loader {
    pub fn new(provider: Arc<dyn SportsDataProvider>) -> (Self, mpsc::Receiver<Delivery>) {
        let (tx, rx) = mpsc::channel(DELIVERY_BUFFER);
        (Self { provider, tx }, rx)
    }

    /// Start loading `kind` for `id` into `view`
    pub fn request(&self, view: &ViewHandle, kind: SourceKind, id: impl Into<String>) -> JoinHandle<()> {
        let generation = view.next_generation();
        let id = id.into();
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        let handle = view.clone();

        debug!("LOADER: view {} requests {} '{}' (generation {})", handle.id(), kind, id, generation);
        tokio::spawn(async move {
            let result = provider.fetch_records(kind, &id).await;
            if !handle.is_alive() {
                trace!("LOADER: view {} closed before {} finished", handle.id(), kind);
                return;
            }
            let delivery = Delivery {
                view: handle.id(),
                generation,
                kind,
                id,
                result,
            };
            if tx.send(delivery).await.is_err() {
                trace!("LOADER: receiver gone, dropping {} delivery", kind);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(view: u64, generation: u64) -> Delivery {
        Delivery {
            view,
            generation,
            kind: SourceKind::Standings,
            id: "MLB".to_string(),
            result: Ok(RecordSet::Standings(Vec::new())),
        }
    }

    #[test]
    fn test_generation_increments() {
        let handle = ViewHandle::new(1);
        assert_eq!(handle.generation(), 0);
        assert_eq!(handle.next_generation(), 1);
        assert_eq!(handle.next_generation(), 2);
        assert_eq!(handle.clone().generation(), 2);
    }

    #[test]
    fn test_accept_current_only() {
        let handle = ViewHandle::new(7);
        let generation = handle.next_generation();
        assert!(handle.accept(&delivery(7, generation)));
        assert!(!handle.accept(&delivery(8, generation)));

        handle.next_generation();
        assert!(!handle.accept(&delivery(7, generation)));
    }

    #[test]
    fn test_closed_view_drops_everything() {
        let handle = ViewHandle::new(3);
        let generation = handle.next_generation();
        handle.close();
        assert!(!handle.is_alive());
        assert!(handle.take(delivery(3, generation)).is_none());
    }
}
