//! SQLite implementation of the `PracticeStore` port.
//!
//! Partial updates only touch the columns present in the patch; each present
//! field is bound as its own assignment so an omitted field is never written.

use flyball_core::PracticeStore;
use flyball_domain::{ClubId, Practice, PracticeId, PracticePatch, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::transaction::{get_id, get_status, get_timestamp, timestamp_text, SqliteTransaction};
use crate::errors::map_sql_error;

impl PracticeStore for SqliteTransaction {
    fn insert_practice(&mut self, practice: &Practice) -> Result<()> {
        self.conn()
            .execute(
                PRACTICE_INSERT_SQL,
                params![
                    practice.id.to_string(),
                    practice.club_id.to_string(),
                    timestamp_text(&practice.scheduled_at),
                    practice.status.to_string(),
                ],
            )
            .map_err(map_sql_error)?;
        Ok(())
    }

    fn find_practice(&mut self, id: PracticeId, club_id: ClubId) -> Result<Option<Practice>> {
        self.conn()
            .query_row(
                PRACTICE_FIND_QUERY,
                params![id.to_string(), club_id.to_string()],
                map_practice_row,
            )
            .optional()
            .map_err(map_sql_error)
    }

    fn find_practice_by_id(&mut self, id: PracticeId) -> Result<Option<Practice>> {
        self.conn()
            .query_row(PRACTICE_FIND_BY_ID_QUERY, params![id.to_string()], map_practice_row)
            .optional()
            .map_err(map_sql_error)
    }

    fn list_practices(&mut self, club_id: ClubId) -> Result<Vec<Practice>> {
        let mut stmt = self.conn().prepare(PRACTICE_LIST_QUERY).map_err(map_sql_error)?;
        let rows = stmt
            .query_map(params![club_id.to_string()], map_practice_row)
            .map_err(map_sql_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
    }

    fn update_practice(
        &mut self,
        id: PracticeId,
        club_id: ClubId,
        patch: &PracticePatch,
    ) -> Result<usize> {
        let Some((sql, values)) = build_patch_update(id, club_id, patch) else {
            return Ok(0);
        };
        self.conn().execute(&sql, params_from_iter(values)).map_err(map_sql_error)
    }

    fn delete_practice(&mut self, id: PracticeId, club_id: ClubId) -> Result<usize> {
        self.conn()
            .execute(PRACTICE_DELETE_SQL, params![id.to_string(), club_id.to_string()])
            .map_err(map_sql_error)
    }
}

const PRACTICE_INSERT_SQL: &str =
    "INSERT INTO practices (id, club_id, scheduled_at, status) VALUES (?1, ?2, ?3, ?4)";

const PRACTICE_FIND_QUERY: &str = "SELECT id, club_id, scheduled_at, status
    FROM practices
    WHERE id = ?1 AND club_id = ?2";

const PRACTICE_FIND_BY_ID_QUERY: &str =
    "SELECT id, club_id, scheduled_at, status FROM practices WHERE id = ?1";

const PRACTICE_LIST_QUERY: &str = "SELECT id, club_id, scheduled_at, status
    FROM practices
    WHERE club_id = ?1
    ORDER BY scheduled_at, rowid";

const PRACTICE_DELETE_SQL: &str = "DELETE FROM practices WHERE id = ?1 AND club_id = ?2";

/// `UPDATE practices SET <present fields> WHERE id = ? AND club_id = ?`, or
/// `None` when the patch carries nothing.
fn build_patch_update(
    id: PracticeId,
    club_id: ClubId,
    patch: &PracticePatch,
) -> Option<(String, Vec<Value>)> {
    let mut assignments = Vec::new();
    let mut values = Vec::new();

    if let Some(scheduled_at) = &patch.scheduled_at {
        values.push(Value::Text(timestamp_text(scheduled_at)));
        assignments.push(format!("scheduled_at = ?{}", values.len()));
    }
    if let Some(status) = patch.status {
        values.push(Value::Text(status.to_string()));
        assignments.push(format!("status = ?{}", values.len()));
    }
    if assignments.is_empty() {
        return None;
    }

    values.push(Value::Text(id.to_string()));
    let id_param = values.len();
    values.push(Value::Text(club_id.to_string()));
    let club_param = values.len();

    let sql = format!(
        "UPDATE practices SET {} WHERE id = ?{id_param} AND club_id = ?{club_param}",
        assignments.join(", ")
    );
    Some((sql, values))
}

fn map_practice_row(row: &Row<'_>) -> rusqlite::Result<Practice> {
    Ok(Practice {
        id: get_id(row, 0)?,
        club_id: get_id(row, 1)?,
        scheduled_at: get_timestamp(row, 2)?,
        status: get_status(row, 3)?,
    })
}
