use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, UserId},
};

/// Store for registered users
#[async_trait]
pub trait UserRepository {
    /// Insert a new user record. The store assigns the identifier.
    ///
    /// No uniqueness is checked here; inserting the same record twice yields
    /// two records.
    async fn insert(&self, user: NewUser) -> Result<UserId, RepositoryError>;
}
