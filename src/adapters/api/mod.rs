//! Request-handler adapter. Maps JSON request bodies to use cases and results
//! (or failures) to status codes.

pub mod handlers;

pub use handlers::{AnalysisHandlers, HandlerResponse};
