//! Collection Repository
//!
//! SQLite-backed store for a user's collections. Every query is scoped to
//! `(id, owner_id)` so a foreign collection is never visible or mutable.
//! Read-then-write pairs (position assignment, ownership checks) run inside
//! one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use rusqlite::params;

use super::db::SharedConnection;
use super::guard::{internal, require_owned};
use super::item_repo::row_to_item;
use super::traits::CollectionStore;
use crate::domain::{
    Collection, CollectionId, CollectionItem, CollectionWithItems, DomainError, DomainResult,
};

/// SQLite implementation of the collection store
pub struct CollectionRepository {
    conn: SharedConnection,
}

impl CollectionRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CollectionStore for CollectionRepository {
    async fn list_with_items(&self, owner_id: &str) -> DomainResult<Vec<CollectionWithItems>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut collections = Vec::new();
        {
            let mut stmt = conn
                .prepare(
                    "SELECT id, owner_id, name, position, created_at, updated_at
                        FROM user_collections
                        WHERE owner_id = ?
                        ORDER BY position ASC, created_at ASC",
                )
                .map_err(|e| internal(&e))?;
            let mut rows = stmt.query(params![owner_id]).map_err(|e| internal(&e))?;
            while let Some(row) = rows.next().map_err(|e| internal(&e))? {
                collections.push(row_to_collection(row).map_err(|e| internal(&e))?);
            }
        }

        // Items for all of the owner's collections in one pass, grouped below
        let mut by_collection: HashMap<CollectionId, Vec<CollectionItem>> = HashMap::new();
        {
            let mut stmt = conn
                .prepare(
                    "SELECT i.id, i.collection_id, i.component_type, i.component_path,
                            i.component_name, i.component_category, i.added_at
                        FROM collection_items i
                        JOIN user_collections c ON c.id = i.collection_id
                        WHERE c.owner_id = ?
                        ORDER BY i.added_at ASC, i.id ASC",
                )
                .map_err(|e| internal(&e))?;
            let mut rows = stmt.query(params![owner_id]).map_err(|e| internal(&e))?;
            while let Some(row) = rows.next().map_err(|e| internal(&e))? {
                let item = row_to_item(row).map_err(|e| internal(&e))?;
                by_collection.entry(item.collection_id).or_default().push(item);
            }
        }

        Ok(collections
            .into_iter()
            .map(|collection| {
                let items = by_collection.remove(&collection.id).unwrap_or_default();
                CollectionWithItems { collection, items }
            })
            .collect())
    }

    async fn create(&self, owner_id: &str, name: &str) -> DomainResult<CollectionWithItems> {
        let name = Collection::validate_name(name)?;

        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        let tx = conn.transaction().map_err(|e| internal(&e))?;

        // Position assignment and insert are atomic; no two collections of
        // one owner can race to the same position.
        let position: i64 = tx
            .query_row(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM user_collections WHERE owner_id = ?",
                params![owner_id],
                |row| row.get(0),
            )
            .map_err(|e| internal(&e))?;

        let now = chrono::Utc::now().timestamp_millis();
        tx.execute(
            "INSERT INTO user_collections (owner_id, name, position, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)",
            params![owner_id, name, position, now, now],
        )
        .map_err(|e| internal(&e))?;
        let id = tx.last_insert_rowid();

        tx.commit().map_err(|e| internal(&e))?;

        Ok(CollectionWithItems {
            collection: Collection {
                id,
                owner_id: owner_id.to_string(),
                name,
                position,
                created_at: now,
                updated_at: now,
            },
            items: Vec::new(),
        })
    }

    async fn rename(
        &self,
        owner_id: &str,
        collection_id: CollectionId,
        name: &str,
    ) -> DomainResult<CollectionWithItems> {
        let name = Collection::validate_name(name)?;

        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        let tx = conn.transaction().map_err(|e| internal(&e))?;

        require_owned(&tx, owner_id, collection_id)?;

        let now = chrono::Utc::now().timestamp_millis();
        tx.execute(
            "UPDATE user_collections SET name = ?, updated_at = ? WHERE id = ? AND owner_id = ?",
            params![name, now, collection_id, owner_id],
        )
        .map_err(|e| internal(&e))?;

        let collection = tx
            .query_row(
                "SELECT id, owner_id, name, position, created_at, updated_at
                    FROM user_collections WHERE id = ? AND owner_id = ?",
                params![collection_id, owner_id],
                row_to_collection,
            )
            .map_err(|e| internal(&e))?;

        let mut items = Vec::new();
        {
            let mut stmt = tx
                .prepare(
                    "SELECT id, collection_id, component_type, component_path,
                            component_name, component_category, added_at
                        FROM collection_items
                        WHERE collection_id = ?
                        ORDER BY added_at ASC, id ASC",
                )
                .map_err(|e| internal(&e))?;
            let mut rows = stmt.query(params![collection_id]).map_err(|e| internal(&e))?;
            while let Some(row) = rows.next().map_err(|e| internal(&e))? {
                items.push(row_to_item(row).map_err(|e| internal(&e))?);
            }
        }

        tx.commit().map_err(|e| internal(&e))?;

        Ok(CollectionWithItems { collection, items })
    }

    async fn delete(&self, owner_id: &str, collection_id: CollectionId) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        let tx = conn.transaction().map_err(|e| internal(&e))?;

        require_owned(&tx, owner_id, collection_id)?;

        // Items first: no orphans even if the second delete fails
        tx.execute(
            "DELETE FROM collection_items WHERE collection_id = ?",
            params![collection_id],
        )
        .map_err(|e| internal(&e))?;
        tx.execute(
            "DELETE FROM user_collections WHERE id = ? AND owner_id = ?",
            params![collection_id, owner_id],
        )
        .map_err(|e| internal(&e))?;

        tx.commit().map_err(|e| internal(&e))?;
        Ok(())
    }
}

/// Convert a database row to a Collection
pub(super) fn row_to_collection(row: &rusqlite::Row) -> rusqlite::Result<Collection> {
    Ok(Collection {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        position: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
