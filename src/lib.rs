//! Component Collections Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - auth: Credential verification (access guard, credential half)
//! - repository: Data access abstractions and implementations
//! - service: Authenticated operation surface

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod domain;
pub mod repository;
pub mod service;

pub use config::Config;
pub use domain::{
    Collection, CollectionId, CollectionItem, CollectionWithItems, DomainError, DomainResult,
    ItemId, NewCollectionItem,
};
pub use service::CollectionService;

/// Open the database and wire the service from `config`
pub fn bootstrap(config: &Config) -> DomainResult<CollectionService> {
    let db = repository::init_db(&config.db_path)?;
    Ok(CollectionService::new(
        Arc::new(auth::MacTokenVerifier::new(config.auth_key)),
        Arc::new(repository::CollectionRepository::new(db.connection())),
        Arc::new(repository::CollectionItemRepository::new(db.connection())),
    ))
}
