//! In-memory resource loader
//!
//! Serves resources from a pre-fetched catalog. Counts calls per menu and can
//! be told to reject or to answer empty a number of times, which makes lazy
//! load behaviour observable.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::entities::ResourceNode;
use crate::domain::ports::{LoadError, ResourceLoader};

#[derive(Default)]
pub struct InMemoryResourceLoader {
    catalog: HashMap<String, Vec<ResourceNode>>,
    /// menu id -> remaining rejected calls
    failures: Mutex<HashMap<String, usize>>,
    /// menu id -> remaining calls answered with an empty list
    stale: Mutex<HashMap<String, usize>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl InMemoryResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(
        mut self,
        menu_id: impl Into<String>,
        resources: Vec<ResourceNode>,
    ) -> Self {
        self.catalog.insert(menu_id.into(), resources);
        self
    }

    /// Reject the next `times` calls for `menu_id`
    pub fn failing(self, menu_id: impl Into<String>, times: usize) -> Self {
        lock(&self.failures).insert(menu_id.into(), times);
        self
    }

    /// Answer the next `times` calls for `menu_id` with no resources
    pub fn stale(self, menu_id: impl Into<String>, times: usize) -> Self {
        lock(&self.stale).insert(menu_id.into(), times);
        self
    }

    pub fn call_count(&self, menu_id: &str) -> usize {
        lock(&self.calls).get(menu_id).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        lock(&self.calls).values().sum()
    }
}

#[async_trait]
impl ResourceLoader for InMemoryResourceLoader {
    async fn load_resources(&self, menu_id: &str) -> Result<Vec<ResourceNode>, LoadError> {
        *lock(&self.calls).entry(menu_id.to_string()).or_insert(0) += 1;

        if take_one(&self.failures, menu_id) {
            return Err(LoadError::Failed {
                menu_id: menu_id.to_string(),
                message: "injected failure".to_string(),
            });
        }
        if take_one(&self.stale, menu_id) {
            return Ok(Vec::new());
        }

        Ok(self.catalog.get(menu_id).cloned().unwrap_or_default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn take_one(counter: &Mutex<HashMap<String, usize>>, menu_id: &str) -> bool {
    let mut counter = lock(counter);
    match counter.get_mut(menu_id) {
        Some(remaining) if *remaining > 0 => {
            *remaining -= 1;
            true
        }
        _ => false,
    }
}
