//! Default token store: visitor and visit slots over the context's store.

use chrono::Duration;

use ahoy_core::config::defaults::DEFAULT_VISIT_DURATION_SECS;
use ahoy_core::constants::{VISITOR_TOKEN_KEY, VISIT_TOKEN_KEY};
use ahoy_core::{AhoyResult, TokenStore};

use crate::context::TrackingContext;
use crate::slot::ExpiringSlot;

/// Manages the visitor token (never expires) and the visit token (rotates
/// after the visit duration).
#[derive(Debug)]
pub struct TokenManager {
    visitor: ExpiringSlot,
    visit: ExpiringSlot,
}

impl TokenManager {
    pub fn new(context: &TrackingContext, visit_duration: Duration) -> Self {
        let device_id = context.device_id.clone();
        let visitor_ids = context.ids.clone();
        let visitor = ExpiringSlot::new(
            VISITOR_TOKEN_KEY,
            None,
            context.store.clone(),
            context.clock.clone(),
            move || {
                device_id
                    .device_id()
                    .unwrap_or_else(|| visitor_ids.generate())
            },
        );

        let visit_ids = context.ids.clone();
        let visit = ExpiringSlot::new(
            VISIT_TOKEN_KEY,
            Some(visit_duration),
            context.store.clone(),
            context.clock.clone(),
            move || visit_ids.generate(),
        );

        Self { visitor, visit }
    }

    /// Token manager with the default 30 minute visit duration.
    pub fn with_default_duration(context: &TrackingContext) -> Self {
        Self::new(
            context,
            Duration::seconds(DEFAULT_VISIT_DURATION_SECS as i64),
        )
    }

    pub fn visit_duration(&self) -> Option<Duration> {
        self.visit.lifetime()
    }

    /// Forget both tokens. The next read issues a new visitor and visit.
    pub fn reset(&self) -> AhoyResult<()> {
        self.visit.clear()?;
        self.visitor.clear()?;
        Ok(())
    }
}

impl TokenStore for TokenManager {
    fn visitor_token(&self) -> AhoyResult<String> {
        Ok(self.visitor.get_or_create()?)
    }

    fn visit_token(&self) -> AhoyResult<String> {
        Ok(self.visit.get_or_create()?)
    }
}
