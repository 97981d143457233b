//! Append-only log of submitted contact requests

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::storage::{StorageError, StorageHandle, CONTACTS_KEY};

/// One submitted contact request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContactRecord {
    pub name: String,
    pub phone: String,
    /// RFC 3339 submission time
    pub timestamp: String,
}

/// Contacts persisted under [`CONTACTS_KEY`]
pub struct ContactLog {
    storage: StorageHandle,
}

impl ContactLog {
    pub fn new(storage: StorageHandle) -> Self {
        Self { storage }
    }

    /// All records submitted so far, oldest first. Unreadable storage reads as empty.
    pub fn records(&self) -> Vec<ContactRecord> {
        match self.read() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Failed to read contacts log: {}", e);
                Vec::new()
            }
        }
    }

    /// Append a record. Failures are logged and swallowed.
    pub fn append(&mut self, record: ContactRecord) {
        let result = self.read().and_then(|mut records| {
            records.push(record);
            let json = serde_json::to_string(&records)?;
            self.storage.borrow_mut().set(CONTACTS_KEY, &json)
        });
        if let Err(e) = result {
            tracing::warn!("Failed to persist contact: {}", e);
        }
    }

    fn read(&self) -> Result<Vec<ContactRecord>, StorageError> {
        match self.storage.borrow().get(CONTACTS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}
