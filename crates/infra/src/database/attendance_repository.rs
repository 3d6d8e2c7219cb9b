//! SQLite implementation of the `AttendanceStore` port.
//!
//! `attending` is stored as its integer code (0 unknown, 1 no, 2 yes).

use flyball_core::AttendanceStore;
use flyball_domain::{
    AttendanceId, AttendanceStatus, DogId, PracticeAttendance, PracticeId, Result,
};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::transaction::{get_id, SqliteTransaction};
use crate::errors::map_sql_error;

impl AttendanceStore for SqliteTransaction {
    fn find_attendance(
        &mut self,
        practice_id: PracticeId,
        dog_id: DogId,
    ) -> Result<Option<PracticeAttendance>> {
        self.conn()
            .query_row(
                ATTENDANCE_FIND_QUERY,
                params![practice_id.to_string(), dog_id.to_string()],
                map_attendance_row,
            )
            .optional()
            .map_err(map_sql_error)
    }

    fn list_attendance(&mut self, practice_id: PracticeId) -> Result<Vec<PracticeAttendance>> {
        let mut stmt = self.conn().prepare(ATTENDANCE_LIST_QUERY).map_err(map_sql_error)?;
        let rows = stmt
            .query_map(params![practice_id.to_string()], map_attendance_row)
            .map_err(map_sql_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
    }

    fn insert_attendance(&mut self, attendance: &PracticeAttendance) -> Result<()> {
        self.conn()
            .execute(
                ATTENDANCE_INSERT_SQL,
                params![
                    attendance.id.to_string(),
                    attendance.practice_id.to_string(),
                    attendance.dog_id.to_string(),
                    attendance.attending.code(),
                ],
            )
            .map_err(map_sql_error)?;
        Ok(())
    }

    fn update_attendance_status(
        &mut self,
        id: AttendanceId,
        attending: AttendanceStatus,
    ) -> Result<usize> {
        self.conn()
            .execute(ATTENDANCE_UPDATE_SQL, params![attending.code(), id.to_string()])
            .map_err(map_sql_error)
    }

    fn delete_attendance_for_practice(&mut self, practice_id: PracticeId) -> Result<usize> {
        self.conn()
            .execute(ATTENDANCE_DELETE_FOR_PRACTICE_SQL, params![practice_id.to_string()])
            .map_err(map_sql_error)
    }
}

const ATTENDANCE_FIND_QUERY: &str = "SELECT id, practice_id, dog_id, attending
    FROM practice_attendance
    WHERE practice_id = ?1 AND dog_id = ?2
    ORDER BY rowid
    LIMIT 1";

const ATTENDANCE_LIST_QUERY: &str = "SELECT id, practice_id, dog_id, attending
    FROM practice_attendance
    WHERE practice_id = ?1
    ORDER BY rowid";

const ATTENDANCE_INSERT_SQL: &str = "INSERT INTO practice_attendance (
        id, practice_id, dog_id, attending
    ) VALUES (?1, ?2, ?3, ?4)";

const ATTENDANCE_UPDATE_SQL: &str = "UPDATE practice_attendance SET attending = ?1 WHERE id = ?2";

const ATTENDANCE_DELETE_FOR_PRACTICE_SQL: &str =
    "DELETE FROM practice_attendance WHERE practice_id = ?1";

fn map_attendance_row(row: &Row<'_>) -> rusqlite::Result<PracticeAttendance> {
    let code: i64 = row.get(3)?;
    let attending = AttendanceStatus::from_code(code)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(err)))?;

    Ok(PracticeAttendance {
        id: get_id(row, 0)?,
        practice_id: get_id(row, 1)?,
        dog_id: get_id(row, 2)?,
        attending,
    })
}
