//! Access Guard - Collection Ownership Checks
//!
//! Every store operation that references a collection by id runs one of
//! these checks first, inside the same transaction as the mutation it
//! guards. A collection that exists but belongs to someone else is reported
//! exactly like one that does not exist.

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{CollectionId, DomainError, DomainResult};

/// Require that `collection_id` exists and belongs to `owner_id`
pub(super) fn require_owned(
    conn: &Connection,
    owner_id: &str,
    collection_id: CollectionId,
) -> DomainResult<()> {
    let found: Option<CollectionId> = conn
        .query_row(
            "SELECT id FROM user_collections WHERE id = ? AND owner_id = ?",
            params![collection_id, owner_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| internal(&e))?;

    match found {
        Some(_) => Ok(()),
        None => Err(DomainError::NotFound("Collection not found".to_string())),
    }
}

/// Require that both collections belong to `owner_id`.
///
/// The ids may coincide (a self-move); ownership is checked over the
/// distinct ids referenced.
pub(super) fn require_owned_pair(
    conn: &Connection,
    owner_id: &str,
    from_id: CollectionId,
    to_id: CollectionId,
) -> DomainResult<()> {
    let expected: i64 = if from_id == to_id { 1 } else { 2 };
    let owned: i64 = conn
        .query_row(
            "SELECT COUNT(DISTINCT id) FROM user_collections
                WHERE id IN (?1, ?2) AND owner_id = ?3",
            params![from_id, to_id, owner_id],
            |row| row.get(0),
        )
        .map_err(|e| internal(&e))?;

    if owned < expected {
        return Err(DomainError::NotFound(
            "One or both collections not found".to_string(),
        ));
    }
    Ok(())
}

/// Log a persistence failure and downgrade it to an opaque `Internal` error
pub(super) fn internal(e: &rusqlite::Error) -> DomainError {
    log::error!("database error: {}", e);
    DomainError::Internal("Database operation failed".to_string())
}
