pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;
pub mod update;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryHobbyStore;
pub use postgres::PgHobbyStore;
pub use store::{HobbyLocator, HobbyStore, StoreError, StoreResult};
pub use update::{CategoryFilter, CategoryPatch, HobbyUpdate, ItemFilter, UpdateOutcome, UpdateRejection};
