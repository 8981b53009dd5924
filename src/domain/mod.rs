//! Core domain layer. No external I/O dependencies.
//!
//! Entities, prompt templates and reply parsing live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod prompt;
pub mod response;

pub use entities::{InsightList, Note, SummaryResult};
pub use errors::DomainError;
