//! Structured logging for range construction and key encoding.

pub mod logger;

pub use logger::{Logger, Severity};
