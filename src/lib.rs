//! Voice Agent - dialogue understanding for a persona-driven voice assistant.
//!
//! Turns one user utterance into a structured dialogue act (intent plus slot
//! values) and, when asked to converse, a persona-conditioned reply backed by
//! a rolling conversation context.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
