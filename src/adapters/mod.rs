//! Infrastructure adapters. Implement ports.
//!
//! Gemini client, request handlers, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod api;
pub mod ui;
