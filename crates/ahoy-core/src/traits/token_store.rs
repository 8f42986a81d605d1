use crate::errors::AhoyResult;
use crate::models::TokenPair;

/// Supplies the current visitor and visit tokens.
///
/// Reads may rotate an expired visit token as a side effect.
pub trait TokenStore: Send + Sync {
    fn visitor_token(&self) -> AhoyResult<String>;

    fn visit_token(&self) -> AhoyResult<String>;

    fn tokens(&self) -> AhoyResult<TokenPair> {
        Ok(TokenPair::new(self.visitor_token()?, self.visit_token()?))
    }
}
