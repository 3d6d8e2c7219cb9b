//! Practice lifecycle and the practice cascade

pub mod service;

pub use service::*;
