//! notes-ai: summaries, tags and cross-note themes for a note-taking app, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
