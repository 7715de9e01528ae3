//! Collection Service
//!
//! The transport-agnostic operation surface. Each call resolves the caller's
//! credential first; nothing touches the stores when authentication fails.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::domain::{
    CollectionId, CollectionItem, CollectionWithItems, DomainResult, ItemId, NewCollectionItem,
};
use crate::repository::{CollectionStore, ItemStore};

pub struct CollectionService {
    verifier: Arc<dyn TokenVerifier>,
    collections: Arc<dyn CollectionStore>,
    items: Arc<dyn ItemStore>,
}

impl CollectionService {
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        collections: Arc<dyn CollectionStore>,
        items: Arc<dyn ItemStore>,
    ) -> Self {
        Self {
            verifier,
            collections,
            items,
        }
    }

    /// List the caller's collections, each with its ordered items
    pub async fn list_collections(
        &self,
        credential: &str,
    ) -> DomainResult<Vec<CollectionWithItems>> {
        let owner = self.verifier.verify(credential).await?;
        self.collections.list_with_items(&owner).await
    }

    /// Create a collection at the end of the caller's display order
    pub async fn create_collection(
        &self,
        credential: &str,
        name: &str,
    ) -> DomainResult<CollectionWithItems> {
        let owner = self.verifier.verify(credential).await?;
        let created = self.collections.create(&owner, name).await?;
        log::debug!(
            "created collection {} at position {}",
            created.collection.id,
            created.collection.position
        );
        Ok(created)
    }

    /// Rename a collection the caller owns
    pub async fn rename_collection(
        &self,
        credential: &str,
        collection_id: CollectionId,
        name: &str,
    ) -> DomainResult<CollectionWithItems> {
        let owner = self.verifier.verify(credential).await?;
        self.collections.rename(&owner, collection_id, name).await
    }

    /// Delete a collection the caller owns, items first
    pub async fn delete_collection(
        &self,
        credential: &str,
        collection_id: CollectionId,
    ) -> DomainResult<()> {
        let owner = self.verifier.verify(credential).await?;
        self.collections.delete(&owner, collection_id).await?;
        log::debug!("deleted collection {}", collection_id);
        Ok(())
    }

    /// Add a component to a collection the caller owns
    pub async fn add_item(
        &self,
        credential: &str,
        collection_id: CollectionId,
        draft: NewCollectionItem,
    ) -> DomainResult<CollectionItem> {
        let owner = self.verifier.verify(credential).await?;
        self.items.add(&owner, collection_id, &draft).await
    }

    /// Remove an item from a collection the caller owns
    pub async fn remove_item(
        &self,
        credential: &str,
        collection_id: CollectionId,
        item_id: ItemId,
    ) -> DomainResult<()> {
        let owner = self.verifier.verify(credential).await?;
        self.items.remove(&owner, collection_id, item_id).await
    }

    /// Move an item between two collections the caller owns
    pub async fn move_item(
        &self,
        credential: &str,
        item_id: ItemId,
        from_collection_id: CollectionId,
        to_collection_id: CollectionId,
    ) -> DomainResult<CollectionItem> {
        let owner = self.verifier.verify(credential).await?;
        self.items
            .move_between(&owner, item_id, from_collection_id, to_collection_id)
            .await
    }
}
