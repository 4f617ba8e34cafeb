//! # ragcmp-core
//!
//! Core types, ID generation, and error types for ragcmp.
//!
//! This crate provides the foundational types shared across all ragcmp crates:
//! - The [`Document`](entities::Document) aggregate and its lifecycle state machine
//! - Value objects: prompt templates, query results, knowledge-graph data,
//!   comparison results
//! - Domain events and the exact-variant tags the dispatcher routes on
//! - ID prefix constants and generation
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod events;
pub mod ids;
