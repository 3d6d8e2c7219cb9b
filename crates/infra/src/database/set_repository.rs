//! SQLite implementation of the `SetStore` port.

use flyball_core::SetStore;
use flyball_domain::{DogId, PracticeId, PracticeSet, Result, SetDog, SetId};
use rusqlite::{params, OptionalExtension, Row};

use super::transaction::{count_to_usize, get_id, SqliteTransaction};
use crate::errors::map_sql_error;

impl SetStore for SqliteTransaction {
    fn insert_set(&mut self, set: &PracticeSet) -> Result<()> {
        self.conn()
            .execute(
                SET_INSERT_SQL,
                params![
                    set.id.to_string(),
                    set.practice_id.to_string(),
                    set.resource_id.to_string(),
                    set.order,
                ],
            )
            .map_err(map_sql_error)?;
        Ok(())
    }

    fn find_set(&mut self, id: SetId) -> Result<Option<PracticeSet>> {
        self.conn()
            .query_row(SET_FIND_QUERY, params![id.to_string()], map_set_row)
            .optional()
            .map_err(map_sql_error)
    }

    fn list_sets(&mut self, practice_id: PracticeId) -> Result<Vec<PracticeSet>> {
        let mut stmt = self.conn().prepare(SET_LIST_QUERY).map_err(map_sql_error)?;
        let rows = stmt
            .query_map(params![practice_id.to_string()], map_set_row)
            .map_err(map_sql_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
    }

    fn count_sets(&mut self, practice_id: PracticeId) -> Result<usize> {
        let count: i64 = self
            .conn()
            .query_row(SET_COUNT_QUERY, params![practice_id.to_string()], |row| row.get(0))
            .map_err(map_sql_error)?;
        Ok(count_to_usize(count))
    }

    fn update_set_order(
        &mut self,
        id: SetId,
        practice_id: PracticeId,
        order: i32,
    ) -> Result<usize> {
        self.conn()
            .execute(SET_UPDATE_ORDER_SQL, params![order, id.to_string(), practice_id.to_string()])
            .map_err(map_sql_error)
    }

    fn delete_set(&mut self, id: SetId, practice_id: PracticeId) -> Result<usize> {
        self.conn()
            .execute(SET_DELETE_SQL, params![id.to_string(), practice_id.to_string()])
            .map_err(map_sql_error)
    }

    fn delete_sets_for_practice(&mut self, practice_id: PracticeId) -> Result<usize> {
        self.conn()
            .execute(SET_DELETE_FOR_PRACTICE_SQL, params![practice_id.to_string()])
            .map_err(map_sql_error)
    }

    fn insert_set_dog(&mut self, set_dog: &SetDog) -> Result<()> {
        self.conn()
            .execute(
                SET_DOG_INSERT_SQL,
                params![
                    set_dog.set_id.to_string(),
                    set_dog.dog_id.to_string(),
                    set_dog.order,
                    set_dog.lane,
                ],
            )
            .map_err(map_sql_error)?;
        Ok(())
    }

    fn list_set_dogs(&mut self, set_id: SetId) -> Result<Vec<SetDog>> {
        let mut stmt = self.conn().prepare(SET_DOG_LIST_QUERY).map_err(map_sql_error)?;
        let rows = stmt
            .query_map(params![set_id.to_string()], map_set_dog_row)
            .map_err(map_sql_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
    }

    fn update_set_dog_order(&mut self, set_id: SetId, dog_id: DogId, order: i32) -> Result<usize> {
        self.conn()
            .execute(
                SET_DOG_UPDATE_ORDER_SQL,
                params![order, set_id.to_string(), dog_id.to_string()],
            )
            .map_err(map_sql_error)
    }

    fn delete_set_dogs(&mut self, set_id: SetId) -> Result<usize> {
        self.conn()
            .execute(SET_DOG_DELETE_SQL, params![set_id.to_string()])
            .map_err(map_sql_error)
    }

    fn delete_set_dogs_for_practice(&mut self, practice_id: PracticeId) -> Result<usize> {
        self.conn()
            .execute(SET_DOG_DELETE_FOR_PRACTICE_SQL, params![practice_id.to_string()])
            .map_err(map_sql_error)
    }
}

const SET_INSERT_SQL: &str =
    "INSERT INTO sets (id, practice_id, resource_id, sort_order) VALUES (?1, ?2, ?3, ?4)";

const SET_FIND_QUERY: &str =
    "SELECT id, practice_id, resource_id, sort_order FROM sets WHERE id = ?1";

const SET_LIST_QUERY: &str = "SELECT id, practice_id, resource_id, sort_order
    FROM sets
    WHERE practice_id = ?1
    ORDER BY sort_order, rowid";

const SET_COUNT_QUERY: &str = "SELECT COUNT(*) FROM sets WHERE practice_id = ?1";

const SET_UPDATE_ORDER_SQL: &str =
    "UPDATE sets SET sort_order = ?1 WHERE id = ?2 AND practice_id = ?3";

const SET_DELETE_SQL: &str = "DELETE FROM sets WHERE id = ?1 AND practice_id = ?2";

const SET_DELETE_FOR_PRACTICE_SQL: &str = "DELETE FROM sets WHERE practice_id = ?1";

const SET_DOG_INSERT_SQL: &str =
    "INSERT INTO set_dogs (set_id, dog_id, sort_order, lane) VALUES (?1, ?2, ?3, ?4)";

const SET_DOG_LIST_QUERY: &str = "SELECT set_id, dog_id, sort_order, lane
    FROM set_dogs
    WHERE set_id = ?1
    ORDER BY sort_order, rowid";

const SET_DOG_UPDATE_ORDER_SQL: &str =
    "UPDATE set_dogs SET sort_order = ?1 WHERE set_id = ?2 AND dog_id = ?3";

const SET_DOG_DELETE_SQL: &str = "DELETE FROM set_dogs WHERE set_id = ?1";

const SET_DOG_DELETE_FOR_PRACTICE_SQL: &str =
    "DELETE FROM set_dogs WHERE set_id IN (SELECT id FROM sets WHERE practice_id = ?1)";

fn map_set_row(row: &Row<'_>) -> rusqlite::Result<PracticeSet> {
    Ok(PracticeSet {
        id: get_id(row, 0)?,
        practice_id: get_id(row, 1)?,
        resource_id: get_id(row, 2)?,
        order: row.get(3)?,
    })
}

fn map_set_dog_row(row: &Row<'_>) -> rusqlite::Result<SetDog> {
    Ok(SetDog {
        set_id: get_id(row, 0)?,
        dog_id: get_id(row, 1)?,
        order: row.get(2)?,
        lane: row.get(3)?,
    })
}
