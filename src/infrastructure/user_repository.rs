use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

use crate::{
    domain::{
        error::RepositoryError,
        models::user::{NewUser, UserId},
        repositories::user_repository::UserRepository,
    },
    infrastructure::entities::users,
};

#[derive(Clone)]
pub struct SqlUserRepository {
    db: Arc<DatabaseConnection>,
}

impl SqlUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create the `users` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        let db = self.db.as_ref();
        let backend = db.get_database_backend();
        let mut statement = Schema::new(backend).create_table_from_entity(users::Entity);
        statement.if_not_exists();

        db.execute(backend.build(&statement))
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn insert(&self, user: NewUser) -> Result<UserId, RepositoryError> {
        let id = UserId::new();
        let user_model = users::ActiveModel {
            id: Set(*id.as_uuid()),
            username: Set(user.username().to_string()),
            email: Set(user.email().to_string()),
            password: Set(user.password().as_str().to_string()),
        };
        let insert_result = users::Entity::insert(user_model)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(UserId::from_uuid(insert_result.last_insert_id))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Transaction};

    use super::*;
    use crate::domain::models::user::HashedPassword;

    fn mock_db(exec_results: usize) -> Arc<DatabaseConnection> {
        let results: Vec<_> = (0..exec_results)
            .map(|_| MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            })
            .collect();
        Arc::new(
            MockDatabase::new(DatabaseBackend::MySql)
                .append_exec_results(results)
                .into_connection(),
        )
    }

    // the repository must be dropped first so the log can be taken
    fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
        Arc::try_unwrap(db)
            .unwrap_or_else(|_| panic!("connection still shared"))
            .into_transaction_log()
    }

    fn new_user() -> NewUser {
        NewUser::new(
            "alice".to_string(),
            "a@b.com".to_string(),
            HashedPassword::new("$argon2id$mock".to_string()),
        )
    }

    #[tokio::test]
    async fn test_insert_writes_one_users_row() {
        let db = mock_db(1);
        let repository = SqlUserRepository::new(Arc::clone(&db));

        let id = repository.insert(new_user()).await.unwrap();
        drop(repository);

        assert_eq!(
            transaction_log(db),
            [Transaction::from_sql_and_values(
                DatabaseBackend::MySql,
                "INSERT INTO `users` (`id`, `username`, `email`, `password`) VALUES (?, ?, ?, ?)",
                [
                    (*id.as_uuid()).into(),
                    "alice".into(),
                    "a@b.com".into(),
                    "$argon2id$mock".into(),
                ],
            )]
        );
    }

    #[tokio::test]
    async fn test_repository_clones_share_one_connection() {
        let repository = SqlUserRepository::new(mock_db(2));
        let other = repository.clone();

        repository.insert(new_user()).await.unwrap();
        other.insert(new_user()).await.unwrap();
        drop(repository);

        assert_eq!(transaction_log(other.db).len(), 2);
    }

    #[tokio::test]
    async fn test_each_insert_gets_a_fresh_id() {
        let repository = SqlUserRepository::new(mock_db(2));

        let first = repository.insert(new_user()).await.unwrap();
        let second = repository.insert(new_user()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_database_error_is_mapped() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repository = SqlUserRepository::new(Arc::new(db));

        let result = repository.insert(new_user()).await;
        match result {
            Err(RepositoryError::DatabaseError(message)) => {
                assert!(message.contains("connection reset"))
            }
            other => panic!("expected DatabaseError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ensure_schema_issues_create_table() {
        let db = mock_db(1);
        let repository = SqlUserRepository::new(Arc::clone(&db));

        repository.ensure_schema().await.unwrap();
        drop(repository);

        let log = transaction_log(db);
        assert_eq!(log.len(), 1);
        let statement = format!("{:?}", log[0]);
        assert!(statement.contains("CREATE TABLE IF NOT EXISTS `users`"), "got: {}", statement);
    }
}
