//! A visit confirmed (or about to be confirmed) with the collector.

use super::{Properties, TokenPair};

/// A visit. Tokens and params are fixed at creation; only `user_id` may be
/// attached afterwards, and it is a local annotation, not authentication.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    tokens: TokenPair,
    user_id: Option<String>,
    additional_params: Option<Properties>,
}

impl Visit {
    pub fn new(tokens: TokenPair, additional_params: Option<Properties>) -> Self {
        Self {
            tokens,
            user_id: None,
            additional_params,
        }
    }

    pub fn visitor_token(&self) -> &str {
        &self.tokens.visitor_token
    }

    pub fn visit_token(&self) -> &str {
        &self.tokens.visit_token
    }

    pub fn tokens(&self) -> &TokenPair {
        &self.tokens
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn additional_params(&self) -> Option<&Properties> {
        self.additional_params.as_ref()
    }

    /// Attach (or clear) the user id decorating subsequently tracked events.
    pub fn set_user_id(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }
}
