use crate::domain::{
    error::DomainError,
    models::{
        registration::Registration,
        user::{NewUser, UserId},
    },
    repositories::user_repository::UserRepository,
    services::password_service::PasswordHasher,
};

pub struct RegisterUserUsecase<R: UserRepository, P: PasswordHasher> {
    user_repository: R,
    password_hasher: P,
}

impl<R: UserRepository, P: PasswordHasher> RegisterUserUsecase<R, P> {
    pub fn new(user_repository: R, password_hasher: P) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Hash the password and insert the user record.
    ///
    /// Nothing is written if hashing fails.
    pub async fn register(&self, registration: Registration) -> Result<UserId, DomainError>
    where
        R: Send + Sync,
        P: Send + Sync + 'static,
    {
        let (email, username, password) = registration.into_parts();

        // Hash password off the async workers
        let hasher = self.password_hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Hashing(e.to_string()))??;

        let user = NewUser::new(username, email, password_hash);
        let id = self.user_repository.insert(user).await?;

        Ok(id)
    }
}
