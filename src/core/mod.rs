//! Core modules for the meeting store engine.
//!
//! Path codec, store operations, layout migration, task extraction, and the
//! shared primitives they sit on.

pub mod config;
pub mod driver;
pub mod error;
pub mod meeting;
pub mod migration;
pub mod pool;
pub mod store;
pub mod task;
pub mod template;
