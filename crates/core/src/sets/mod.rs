//! Ordering of sets within a practice and dogs within a set

pub mod service;

pub use service::*;
