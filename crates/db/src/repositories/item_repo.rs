//! Repository for the `items` table.

use itemdesk_core::item::{Item, NewItem};
use itemdesk_core::types::DbId;

use crate::storage::{Storage, StorageError};
use crate::value::{Row, SqlValue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, status, createdAt, updatedAt";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// List every item, newest first. `id` breaks ties between rows created
    /// within the same timestamp tick.
    pub async fn list(storage: &dyn Storage) -> Result<Vec<Item>, StorageError> {
        let query = format!("SELECT {COLUMNS} FROM items ORDER BY createdAt DESC, id DESC");
        let rows = storage.fetch_all(&query, &[]).await?;
        rows.iter().map(item_from_row).collect()
    }

    /// Find an item by its ID.
    pub async fn find_by_id(storage: &dyn Storage, id: DbId) -> Result<Option<Item>, StorageError> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = ?");
        let row = storage.fetch_optional(&query, &[SqlValue::Integer(id)]).await?;
        row.as_ref().map(item_from_row).transpose()
    }

    /// Insert a new item and return it as stored. Timestamps come from the
    /// column defaults.
    pub async fn create(storage: &dyn Storage, input: &NewItem) -> Result<Item, StorageError> {
        let result = storage
            .execute(
                "INSERT INTO items (name, description, status) VALUES (?, ?, ?)",
                &[
                    SqlValue::from(input.name.as_str()),
                    SqlValue::from(input.description.clone()),
                    SqlValue::from(input.status.as_str()),
                ],
            )
            .await?;

        Self::find_by_id(storage, result.inserted_id)
            .await?
            .ok_or(StorageError::Backend(sqlx::Error::RowNotFound))
    }

    /// Overwrite name, description and status and refresh `updatedAt`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        storage: &dyn Storage,
        id: DbId,
        input: &NewItem,
    ) -> Result<Option<Item>, StorageError> {
        let result = storage
            .execute(
                "UPDATE items SET name = ?, description = ?, status = ?, \
                 updatedAt = CURRENT_TIMESTAMP WHERE id = ?",
                &[
                    SqlValue::from(input.name.as_str()),
                    SqlValue::from(input.description.clone()),
                    SqlValue::from(input.status.as_str()),
                    SqlValue::Integer(id),
                ],
            )
            .await?;

        let item = Self::find_by_id(storage, id).await?;
        if result.affected_rows == 0 && item.is_some() {
            // MySQL counts changed rather than matched rows, so a same-second
            // update carrying identical values reports zero.
            tracing::debug!(id, "Update matched an unchanged row");
        }
        Ok(item)
    }

    /// Hard-delete an item. Returns `true` if a row was removed.
    pub async fn delete(storage: &dyn Storage, id: DbId) -> Result<bool, StorageError> {
        let result = storage
            .execute("DELETE FROM items WHERE id = ?", &[SqlValue::Integer(id)])
            .await?;
        Ok(result.affected_rows > 0)
    }
}

fn item_from_row(row: &Row) -> Result<Item, StorageError> {
    let status = row.get_str("status")?;
    Ok(Item {
        id: row.get_i64("id")?,
        name: row.get_str("name")?.to_string(),
        description: row.get_opt_str("description")?.map(str::to_string),
        status: status.parse().map_err(|_| StorageError::Decode {
            column: "status".to_string(),
            reason: format!("unknown status '{status}'"),
        })?,
        created_at: row.get_timestamp("createdAt")?,
        updated_at: row.get_timestamp("updatedAt")?,
    })
}
