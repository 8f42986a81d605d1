//! Tracking data model: tokens, visits, events, and scalar property values.

pub mod event;
pub mod scalar;
pub mod timestamp;
pub mod token_pair;
pub mod visit;

pub use event::Event;
pub use scalar::{Properties, ScalarValue};
pub use token_pair::TokenPair;
pub use visit::Visit;
