//! Collection Item Repository
//!
//! SQLite-backed store for the components placed inside collections: add,
//! scoped remove, and cross-collection move. Ownership of every referenced
//! collection is established inside the mutating transaction.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::db::SharedConnection;
use super::guard::{internal, require_owned, require_owned_pair};
use super::traits::ItemStore;
use crate::domain::{
    CollectionId, CollectionItem, DomainError, DomainResult, ItemId, NewCollectionItem,
};

/// SQLite implementation of the item store
pub struct CollectionItemRepository {
    conn: SharedConnection,
}

impl CollectionItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ItemStore for CollectionItemRepository {
    async fn add(
        &self,
        owner_id: &str,
        collection_id: CollectionId,
        draft: &NewCollectionItem,
    ) -> DomainResult<CollectionItem> {
        draft.validate()?;

        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        let tx = conn.transaction().map_err(|e| internal(&e))?;

        require_owned(&tx, owner_id, collection_id)?;

        let dup: Option<ItemId> = tx
            .query_row(
                "SELECT id FROM collection_items WHERE collection_id = ? AND component_path = ?",
                params![collection_id, draft.component_path],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| internal(&e))?;
        if dup.is_some() {
            return Err(DomainError::Conflict(
                "Component already in this collection".to_string(),
            ));
        }

        let now = chrono::Utc::now().timestamp_millis();
        tx.execute(
            "INSERT INTO collection_items
                (collection_id, component_type, component_path, component_name,
                 component_category, added_at)
                VALUES (?, ?, ?, ?, ?, ?)",
            params![
                collection_id,
                draft.component_type,
                draft.component_path,
                draft.component_name,
                draft.component_category,
                now
            ],
        )
        .map_err(|e| internal(&e))?;
        let id = tx.last_insert_rowid();

        tx.commit().map_err(|e| internal(&e))?;

        Ok(CollectionItem {
            id,
            collection_id,
            component_type: draft.component_type.clone(),
            component_path: draft.component_path.clone(),
            component_name: draft.component_name.clone(),
            component_category: draft.component_category.clone(),
            added_at: now,
        })
    }

    async fn remove(
        &self,
        owner_id: &str,
        collection_id: CollectionId,
        item_id: ItemId,
    ) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        let tx = conn.transaction().map_err(|e| internal(&e))?;

        require_owned(&tx, owner_id, collection_id)?;

        // Scoped delete: success whether or not the pair matched a row
        tx.execute(
            "DELETE FROM collection_items WHERE id = ? AND collection_id = ?",
            params![item_id, collection_id],
        )
        .map_err(|e| internal(&e))?;

        tx.commit().map_err(|e| internal(&e))?;
        Ok(())
    }

    async fn move_between(
        &self,
        owner_id: &str,
        item_id: ItemId,
        from_id: CollectionId,
        to_id: CollectionId,
    ) -> DomainResult<CollectionItem> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        let tx = conn.transaction().map_err(|e| internal(&e))?;

        require_owned_pair(&tx, owner_id, from_id, to_id)?;

        // The destination must not already hold this component's path
        let dup: Option<ItemId> = tx
            .query_row(
                "SELECT id FROM collection_items
                    WHERE collection_id = ?1 AND id != ?2 AND component_path =
                        (SELECT component_path FROM collection_items
                            WHERE id = ?2 AND collection_id = ?3)",
                params![to_id, item_id, from_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| internal(&e))?;
        if dup.is_some() {
            return Err(DomainError::Conflict(
                "Component already in the target collection".to_string(),
            ));
        }

        // Conditional update keyed on the claimed source; zero rows means
        // the item is not there (possibly already moved)
        let changed = tx
            .execute(
                "UPDATE collection_items SET collection_id = ? WHERE id = ? AND collection_id = ?",
                params![to_id, item_id, from_id],
            )
            .map_err(|e| internal(&e))?;
        if changed == 0 {
            return Err(DomainError::NotFound(
                "Item not found in source collection".to_string(),
            ));
        }

        let item = tx
            .query_row(
                "SELECT id, collection_id, component_type, component_path,
                        component_name, component_category, added_at
                    FROM collection_items WHERE id = ?",
                params![item_id],
                row_to_item,
            )
            .map_err(|e| internal(&e))?;

        tx.commit().map_err(|e| internal(&e))?;
        Ok(item)
    }
}

/// Convert a database row to a CollectionItem
pub(super) fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<CollectionItem> {
    Ok(CollectionItem {
        id: row.get(0)?,
        collection_id: row.get(1)?,
        component_type: row.get(2)?,
        component_path: row.get(3)?,
        component_name: row.get(4)?,
        component_category: row.get(5)?,
        added_at: row.get(6)?,
    })
}
