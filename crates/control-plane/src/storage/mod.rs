// Storage layer for the SkillVerify control-plane
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: PostgreSQL repository (sqlx)
// - InMemoryDatabase: HashMap-backed twin used for dev mode and tests
// - StorageBackend: enum dispatching to either

pub mod backend;
pub mod memory;
pub mod models;
pub mod password;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;
