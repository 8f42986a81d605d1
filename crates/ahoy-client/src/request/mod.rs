//! Request assembly: URL resolution, JSON body, interceptors, forced headers.

pub mod builder;
pub mod interceptor;

pub use builder::RequestBuilder;
pub use interceptor::{InterceptorChain, RequestInterceptor, StaticHeaders};
