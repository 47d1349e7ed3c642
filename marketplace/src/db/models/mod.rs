//! Typed records persisted as store documents.
//!
//! Each entity has a `*CreateDBRequest` holding validated caller input, a pure `into_record(now)`
//! step that stamps timestamps and fills defaults, and a record struct that is exactly what gets
//! written to its collection. Records read back from the store are wrapped in [`Stored`].
//!
//! # Model Categories
//!
//! - [`listings`]: API products published by sellers
//! - [`users`]: Buyer, seller and admin accounts
//! - [`plans`]: Priced access tiers for a listing
//! - [`subscriptions`]: A buyer's binding to a plan, with its API key
//! - [`reviews`]: Ratings left on listings
//! - [`usage_logs`]: Append-only request records per subscription
//!
//! Database records are distinct from API models so that storage fields (such as
//! `password_hash`) never leak into responses by accident.

use serde::{Deserialize, Serialize};

pub mod listings;
pub mod plans;
pub mod reviews;
pub mod subscriptions;
pub mod usage_logs;
pub mod users;

/// A record together with the identifier the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub record: T,
}

impl<T> Stored<T> {
    pub fn new(id: impl Into<String>, record: T) -> Self {
        Self { id: id.into(), record }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, ID_FIELD};
    use serde_json::{Value, json};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn test_stored_reads_store_identifier() {
        let mut document = Document::new();
        document.insert(ID_FIELD.to_string(), json!("abc"));
        document.insert("text".to_string(), json!("hello"));

        let stored: Stored<Note> = serde_json::from_value(Value::Object(document)).unwrap();
        assert_eq!(stored, Stored::new("abc", Note { text: "hello".into() }));
    }
}
