pub mod instance_repo;
pub mod traits;

pub use instance_repo::InMemoryInstanceRepo;
pub use traits::{DocumentStore, InstanceRepository, RepositoryError, StorageError};
