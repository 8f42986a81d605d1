//! A named event, fully specified by the caller.

use chrono::{DateTime, Utc};

use super::Properties;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    id: Option<String>,
    name: String,
    properties: Properties,
    timestamp: DateTime<Utc>,
}

impl Event {
    pub fn new(name: impl Into<String>, properties: Properties, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: name.into(),
            properties,
            timestamp,
        }
    }

    /// Attach a caller-chosen event id, used by the collector for deduplication.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
