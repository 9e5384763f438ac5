//! Launch registry — holds one tracker per live launch, keyed by id.

use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::derive::LaunchTracker;

pub struct LaunchRegistry {
    launches: DashMap<Uuid, LaunchTracker>,
}

impl LaunchRegistry {
    pub fn new() -> Self {
        Self {
            launches: DashMap::new(),
        }
    }

    pub fn create(&self, name: &str, offer_cost: f64) -> Uuid {
        let id = Uuid::new_v4();
        self.launches
            .insert(id, LaunchTracker::new(name, offer_cost));
        info!(%id, name, "launch created");
        id
    }

    pub fn insert(&self, tracker: LaunchTracker) -> Uuid {
        let id = Uuid::new_v4();
        self.launches.insert(id, tracker);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<LaunchTracker> {
        self.launches.get(id).map(|t| t.clone())
    }

    /// Run a mutation against a launch in place.
    pub fn with_launch<R>(&self, id: &Uuid, f: impl FnOnce(&mut LaunchTracker) -> R) -> Option<R> {
        self.launches.get_mut(id).map(|mut t| f(&mut t))
    }

    pub fn list(&self) -> Vec<(Uuid, String)> {
        self.launches
            .iter()
            .map(|entry| (*entry.key(), entry.value().name.clone()))
            .collect()
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.launches.remove(id).is_some()
    }
}

impl Default for LaunchRegistry {
    fn default() -> Self {
        Self::new()
    }
}
