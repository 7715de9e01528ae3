//! Repository Layer
//!
//! Data access abstractions and implementations.

mod collection_repo;
mod db;
mod guard;
mod item_repo;
mod traits;


pub use collection_repo::CollectionRepository;
pub use db::{init_db, DbState, SharedConnection};
pub use item_repo::CollectionItemRepository;
pub use traits::{CollectionStore, ItemStore};
