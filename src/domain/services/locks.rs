use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-court write serialization. The conflict check and the booking insert
/// are two steps; holding the court's mutex across both (on top of the
/// in-transaction re-check) closes the check-then-write race.
#[derive(Default)]
pub struct CourtLocks {
    inner: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl CourtLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, court_id: &str) -> Arc<AsyncMutex<()>> {
        let mut map = self.inner.lock().expect("court lock registry poisoned");
        map.entry(court_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    pub async fn lock(&self, court_id: &str) -> OwnedMutexGuard<()> {
        self.handle(court_id).lock_owned().await
    }

    /// Acquires every court's lock in sorted id order so concurrent
    /// full-venue requests cannot deadlock against each other.
    pub async fn lock_all(&self, court_ids: &[String]) -> Vec<OwnedMutexGuard<()>> {
        let mut ids: Vec<&String> = court_ids.iter().collect();
        ids.sort();
        ids.dedup();

        let mut guards = Vec::with_capacity(ids.len());
        for id in ids {
            guards.push(self.lock(id).await);
        }
        guards
    }
}
