//! Per-dog practice attendance

pub mod service;

pub use service::*;
