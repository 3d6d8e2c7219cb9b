//! SQLite implementation of the `ResourceStore` port.

use flyball_core::ResourceStore;
use flyball_domain::{ClubId, Resource, ResourceId, Result};
use rusqlite::{params, OptionalExtension, Row};

use super::transaction::{bool_to_int, count_to_usize, get_id, int_to_bool, SqliteTransaction};
use crate::errors::map_sql_error;

impl ResourceStore for SqliteTransaction {
    fn count_resources(&mut self, club_id: ClubId) -> Result<usize> {
        let count: i64 = self
            .conn()
            .query_row(RESOURCE_COUNT_QUERY, params![club_id.to_string()], |row| row.get(0))
            .map_err(map_sql_error)?;
        Ok(count_to_usize(count))
    }

    fn find_resource(&mut self, id: ResourceId, club_id: ClubId) -> Result<Option<Resource>> {
        self.conn()
            .query_row(
                RESOURCE_FIND_QUERY,
                params![id.to_string(), club_id.to_string()],
                map_resource_row,
            )
            .optional()
            .map_err(map_sql_error)
    }

    fn list_resources(&mut self, club_id: ClubId) -> Result<Vec<Resource>> {
        let mut stmt = self.conn().prepare(RESOURCE_LIST_QUERY).map_err(map_sql_error)?;
        let rows = stmt
            .query_map(params![club_id.to_string()], map_resource_row)
            .map_err(map_sql_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
    }

    fn insert_resource(&mut self, resource: &Resource) -> Result<()> {
        self.conn()
            .execute(
                RESOURCE_INSERT_SQL,
                params![
                    resource.id.to_string(),
                    resource.club_id.to_string(),
                    resource.name,
                    bool_to_int(resource.is_default),
                    bool_to_int(resource.is_double_lane),
                ],
            )
            .map_err(map_sql_error)?;
        Ok(())
    }

    fn update_resource(&mut self, resource: &Resource) -> Result<usize> {
        self.conn()
            .execute(
                RESOURCE_UPDATE_SQL,
                params![
                    resource.id.to_string(),
                    resource.club_id.to_string(),
                    resource.name,
                    bool_to_int(resource.is_default),
                    bool_to_int(resource.is_double_lane),
                ],
            )
            .map_err(map_sql_error)
    }

    fn clear_default_resources(&mut self, club_id: ClubId, keep: ResourceId) -> Result<usize> {
        self.conn()
            .execute(RESOURCE_CLEAR_DEFAULT_SQL, params![club_id.to_string(), keep.to_string()])
            .map_err(map_sql_error)
    }

    fn delete_resource(&mut self, id: ResourceId, club_id: ClubId) -> Result<usize> {
        self.conn()
            .execute(RESOURCE_DELETE_SQL, params![id.to_string(), club_id.to_string()])
            .map_err(map_sql_error)
    }

    fn count_sets_using_resource(&mut self, id: ResourceId) -> Result<usize> {
        let count: i64 = self
            .conn()
            .query_row(RESOURCE_SET_COUNT_QUERY, params![id.to_string()], |row| row.get(0))
            .map_err(map_sql_error)?;
        Ok(count_to_usize(count))
    }
}

const RESOURCE_COUNT_QUERY: &str = "SELECT COUNT(*) FROM resources WHERE club_id = ?1";

const RESOURCE_FIND_QUERY: &str = "SELECT id, club_id, name, is_default, is_double_lane
    FROM resources
    WHERE id = ?1 AND club_id = ?2";

const RESOURCE_LIST_QUERY: &str = "SELECT id, club_id, name, is_default, is_double_lane
    FROM resources
    WHERE club_id = ?1
    ORDER BY name, rowid";

const RESOURCE_INSERT_SQL: &str = "INSERT INTO resources (
        id, club_id, name, is_default, is_double_lane
    ) VALUES (?1, ?2, ?3, ?4, ?5)";

const RESOURCE_UPDATE_SQL: &str = "UPDATE resources
    SET name = ?3, is_default = ?4, is_double_lane = ?5
    WHERE id = ?1 AND club_id = ?2";

const RESOURCE_CLEAR_DEFAULT_SQL: &str =
    "UPDATE resources SET is_default = 0 WHERE club_id = ?1 AND id != ?2 AND is_default != 0";

const RESOURCE_DELETE_SQL: &str = "DELETE FROM resources WHERE id = ?1 AND club_id = ?2";

const RESOURCE_SET_COUNT_QUERY: &str = "SELECT COUNT(*) FROM sets WHERE resource_id = ?1";

fn map_resource_row(row: &Row<'_>) -> rusqlite::Result<Resource> {
    Ok(Resource {
        id: get_id(row, 0)?,
        club_id: get_id(row, 1)?,
        name: row.get(2)?,
        is_default: int_to_bool(row.get(3)?),
        is_double_lane: int_to_bool(row.get(4)?),
    })
}
