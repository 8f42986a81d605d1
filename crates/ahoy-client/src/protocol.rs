//! Wire protocol for the Ahoy collector: snake_case JSON bodies.

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use ahoy_core::models::timestamp;
use ahoy_core::{ApplicationEnvironment, Event, Properties, TokenPair, Visit};

use crate::encoding;

/// Fixed fields of a visit body, in wire order.
pub const VISIT_FIXED_FIELDS: [&str; 5] = [
    "visitor_token",
    "visit_token",
    "platform",
    "app_version",
    "os_version",
];

/// Body of a visit confirmation request.
///
/// Serialized by hand so the fixed fields lead and caller params follow.
#[derive(Debug, Clone)]
pub struct VisitRequest<'a> {
    pub tokens: &'a TokenPair,
    pub environment: &'a ApplicationEnvironment,
    pub additional_params: Option<&'a Properties>,
}

impl<'a> VisitRequest<'a> {
    pub fn new(visit: &'a Visit, environment: &'a ApplicationEnvironment) -> Self {
        Self {
            tokens: visit.tokens(),
            environment,
            additional_params: visit.additional_params(),
        }
    }
}

impl Serialize for VisitRequest<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = self.additional_params.map_or(0, |p| p.len());
        let mut map = serializer.serialize_map(Some(VISIT_FIXED_FIELDS.len() + extra))?;
        map.serialize_entry("visitor_token", &self.tokens.visitor_token)?;
        map.serialize_entry("visit_token", &self.tokens.visit_token)?;
        map.serialize_entry("platform", &self.environment.platform)?;
        map.serialize_entry("app_version", &self.environment.app_version)?;
        map.serialize_entry("os_version", &self.environment.os_version)?;
        if let Some(params) = self.additional_params {
            encoding::serialize_extra(&mut map, &VISIT_FIXED_FIELDS, params)?;
        }
        map.end()
    }
}

/// The collector's echo of a confirmed visit. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VisitResponse {
    pub visitor_token: String,
    pub visit_token: String,
}

impl From<VisitResponse> for TokenPair {
    fn from(response: VisitResponse) -> Self {
        TokenPair::new(response.visitor_token, response.visit_token)
    }
}

/// Body of an event submission.
#[derive(Debug, Clone, Serialize)]
pub struct EventRequest<'a> {
    pub visitor_token: &'a str,
    pub visit_token: &'a str,
    pub events: Vec<EventPayload<'a>>,
}

impl<'a> EventRequest<'a> {
    /// Events decorated with the visit's user id, if one is attached.
    pub fn new(visit: &'a Visit, events: &'a [Event]) -> Self {
        let user_id = visit.user_id();
        Self {
            visitor_token: visit.visitor_token(),
            visit_token: visit.visit_token(),
            events: events
                .iter()
                .map(|event| EventPayload::new(event, user_id))
                .collect(),
        }
    }
}

/// A single event on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct EventPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub name: &'a str,
    pub properties: &'a Properties,
    #[serde(serialize_with = "timestamp::serialize")]
    pub time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
}

impl<'a> EventPayload<'a> {
    pub fn new(event: &'a Event, user_id: Option<&'a str>) -> Self {
        Self {
            id: event.id(),
            name: event.name(),
            properties: event.properties(),
            time: event.timestamp(),
            user_id,
        }
    }
}
