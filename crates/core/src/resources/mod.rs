//! Resource pool (locations or rooms) and its single-default invariant

pub mod service;

pub use service::*;
