//! Infrastructure error conversions

mod conversions;

pub use conversions::InfraError;

use flyball_domain::PlannerError;

/// Map a rusqlite failure straight to the domain error.
pub(crate) fn map_sql_error(err: rusqlite::Error) -> PlannerError {
    PlannerError::from(InfraError::from(err))
}
