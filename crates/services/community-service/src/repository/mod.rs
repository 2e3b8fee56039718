//! Repository layer for data access.

pub mod entities;
mod community_repository;

pub use community_repository::{CommunityRepository, CommunityStore};

#[cfg(any(test, feature = "test-utils"))]
pub use community_repository::MockCommunityRepository;
