use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Stored;

pub const COLLECTION: &str = "usagelog";

/// Database request for recording one API call
#[derive(Debug, Clone)]
pub struct UsageLogCreateDBRequest {
    pub subscription_id: String,
    pub endpoint: String,
    pub method: String,
    pub status_code: u16,
    pub latency_ms: i64,
}

/// A usage entry as written to the `usagelog` collection. Usage logs are never updated, so they
/// carry only a creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLogRecord {
    pub subscription_id: String,
    pub endpoint: String,
    pub method: String,
    pub status_code: u16,
    pub latency_ms: i64,
    pub created_at: DateTime<Utc>,
}

pub type UsageLogDBResponse = Stored<UsageLogRecord>;

impl UsageLogCreateDBRequest {
    pub fn into_record(self, now: DateTime<Utc>) -> UsageLogRecord {
        UsageLogRecord {
            subscription_id: self.subscription_id,
            endpoint: self.endpoint,
            method: self.method,
            status_code: self.status_code,
            latency_ms: self.latency_ms,
            created_at: now,
        }
    }
}
