//! Domain entity types

pub mod attendance;
pub mod club;
pub mod ids;
pub mod ordering;
mod patch;
pub mod practice;
pub mod resource;
pub mod set;

pub use attendance::*;
pub use club::*;
pub use ids::*;
pub use ordering::*;
pub use practice::*;
pub use resource::*;
pub use set::*;
