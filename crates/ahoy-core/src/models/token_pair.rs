use std::fmt;

use serde::{Deserialize, Serialize};

/// The visitor/visit identifier pair sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    pub visitor_token: String,
    pub visit_token: String,
}

impl TokenPair {
    pub fn new(visitor_token: impl Into<String>, visit_token: impl Into<String>) -> Self {
        Self {
            visitor_token: visitor_token.into(),
            visit_token: visit_token.into(),
        }
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "visitor={} visit={}", self.visitor_token, self.visit_token)
    }
}
