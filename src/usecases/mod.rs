//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_service;

pub use analysis_service::AnalysisService;
