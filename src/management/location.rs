use tokio::sync::Mutex;

use crate::types::LocationRecord;

/// Append-only, in-memory collection of shared locations.
///
/// Every operation takes the lock for its whole duration, so concurrent
/// appends are serialized and none of them is lost.
#[derive(Debug, Default)]
pub struct LocationStore {
    records: Mutex<Vec<LocationRecord>>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<LocationRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Creates a store holding the fixture records the server starts with.
    pub fn seeded() -> Self {
        Self::with_records(vec![
            LocationRecord::new("1", 37.7749, -122.4194, "2025-02-21T10:00:00Z"),
            LocationRecord::new("2", 34.0522, -118.2437, "2025-02-21T11:00:00Z"),
        ])
    }

    pub async fn list(&self) -> Vec<LocationRecord> {
        self.records.lock().await.clone()
    }

    pub async fn list_for(&self, user_id: &str) -> Vec<LocationRecord> {
        self.records
            .lock()
            .await
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Appends `record` to the end of the store and returns the stored copy.
    pub async fn append(&self, record: LocationRecord) -> LocationRecord {
        let mut records = self.records.lock().await;
        records.push(record.clone());
        record
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}
