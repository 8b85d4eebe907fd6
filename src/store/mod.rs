pub mod error;
pub mod memory;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repository::{
    CredentialRepository, LoginLogRepository, MessageRepository, ProjectRepository,
};
