//! SeaORM entities.

pub mod community;
pub mod community_user;
