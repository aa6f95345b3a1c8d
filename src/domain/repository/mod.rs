pub mod session_repository;

pub use session_repository::{RepositoryError, RepositoryFactory, SessionRepository, SessionUpdate};

#[cfg(test)]
pub use session_repository::MockSessionRepository;
