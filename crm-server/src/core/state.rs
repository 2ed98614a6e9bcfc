use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;

use crate::core::Config;
use crate::services::reminders::{LogReminderSender, ReminderSender};
use crate::store::EntityStore;

/// Per-resource version counters
///
/// Lock-free monotonic counters, one per resource type. Every store write
/// bumps the counter for its resource; the health endpoint exposes the
/// current values so clients can detect staleness.
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Increment the version for a resource and return the new value.
    ///
    /// A resource never written before starts at 0 and returns 1.
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version for a resource, 0 if never written
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }

    /// All known (resource, version) pairs
    pub fn all(&self) -> Vec<(String, u64)> {
        self.versions
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect()
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared server state
///
/// Holds shared references to every service. Cloning is shallow via `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<EntityStore>,
    pub reminder_sender: Arc<dyn ReminderSender>,
    pub resource_versions: Arc<ResourceVersions>,
    started_at: Instant,
}

impl ServerState {
    pub fn new(
        config: Arc<Config>,
        store: Arc<EntityStore>,
        reminder_sender: Arc<dyn ReminderSender>,
        resource_versions: Arc<ResourceVersions>,
    ) -> Self {
        Self {
            config,
            store,
            reminder_sender,
            resource_versions,
            started_at: Instant::now(),
        }
    }

    /// Initialize state: empty store, optional demo seed, stub reminder
    /// sender.
    pub fn initialize(config: &Config) -> Self {
        let store = Arc::new(EntityStore::new());

        if config.seed_demo_data {
            crate::store::seed::load_demo_data(&store);
            tracing::info!("Demo dataset loaded");
        }

        Self::new(
            Arc::new(config.clone()),
            store,
            Arc::new(LogReminderSender),
            Arc::new(ResourceVersions::new()),
        )
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Today's date in the configured business timezone
    pub fn today(&self) -> chrono::NaiveDate {
        self.config.today()
    }

    /// Bump the version counter for a resource after a successful write
    pub fn bump_version(&self, resource: &str) -> u64 {
        self.resource_versions.increment(resource)
    }
}
