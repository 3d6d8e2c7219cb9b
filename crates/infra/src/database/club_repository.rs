//! SQLite implementation of the `DirectoryStore` port.
//!
//! Clubs and dogs are only read by the scheduling components; inserts exist
//! for fixtures and for the owning application's own registration flow.

use flyball_core::DirectoryStore;
use flyball_domain::{Club, ClubId, Dog, Result};
use rusqlite::{params, Row};

use super::transaction::{get_id, SqliteTransaction};
use crate::errors::map_sql_error;

impl DirectoryStore for SqliteTransaction {
    fn insert_club(&mut self, club: &Club) -> Result<()> {
        self.conn()
            .execute(CLUB_INSERT_SQL, params![club.id.to_string(), club.name])
            .map_err(map_sql_error)?;
        Ok(())
    }

    fn insert_dog(&mut self, dog: &Dog) -> Result<()> {
        self.conn()
            .execute(DOG_INSERT_SQL, params![dog.id.to_string(), dog.club_id.to_string(), dog.name])
            .map_err(map_sql_error)?;
        Ok(())
    }

    fn club_exists(&mut self, club_id: ClubId) -> Result<bool> {
        self.conn()
            .query_row(CLUB_EXISTS_QUERY, params![club_id.to_string()], |row| row.get(0))
            .map_err(map_sql_error)
    }

    fn list_club_dogs(&mut self, club_id: ClubId) -> Result<Vec<Dog>> {
        let mut stmt = self.conn().prepare(CLUB_DOGS_QUERY).map_err(map_sql_error)?;
        let rows = stmt
            .query_map(params![club_id.to_string()], map_dog_row)
            .map_err(map_sql_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
    }
}

const CLUB_INSERT_SQL: &str = "INSERT INTO clubs (id, name) VALUES (?1, ?2)";

const DOG_INSERT_SQL: &str = "INSERT INTO dogs (id, club_id, name) VALUES (?1, ?2, ?3)";

const CLUB_EXISTS_QUERY: &str = "SELECT EXISTS(SELECT 1 FROM clubs WHERE id = ?1)";

const CLUB_DOGS_QUERY: &str = "SELECT id, club_id, name FROM dogs WHERE club_id = ?1 ORDER BY rowid";

fn map_dog_row(row: &Row<'_>) -> rusqlite::Result<Dog> {
    Ok(Dog { id: get_id(row, 0)?, club_id: get_id(row, 1)?, name: row.get(2)? })
}
