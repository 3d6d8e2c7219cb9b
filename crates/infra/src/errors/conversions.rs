//! Conversions from external infrastructure errors into domain errors.

use flyball_domain::PlannerError;
use rusqlite::Error as SqlError;

use crate::database::StorageError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PlannerError);

impl From<InfraError> for PlannerError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PlannerError> for InfraError {
    fn from(value: PlannerError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPlannerError {
    fn into_planner(self) -> PlannerError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → PlannerError */
/* -------------------------------------------------------------------------- */

impl IntoPlannerError for SqlError {
    fn into_planner(self) -> PlannerError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        PlannerError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        PlannerError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        PlannerError::NotFound("referenced entity does not exist".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                        PlannerError::Conflict(format!("unique constraint violation: {message}"))
                    }
                    _ => PlannerError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => PlannerError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                PlannerError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                PlannerError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                PlannerError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidParameterName(parameter_name) => {
                PlannerError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => PlannerError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => PlannerError::Database("invalid SQL query".into()),
            other => PlannerError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_planner())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError / r2d2::Error → PlannerError */
/* -------------------------------------------------------------------------- */

impl IntoPlannerError for StorageError {
    fn into_planner(self) -> PlannerError {
        match self {
            StorageError::Rusqlite(err) => err.into_planner(),
            StorageError::InvalidConfig(msg) => PlannerError::Config(msg),
            other => PlannerError::Database(other.to_string()),
        }
    }
}

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        InfraError(value.into_planner())
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(PlannerError::Database(format!("connection pool error: {value}")))
    }
}
