use thiserror::Error;

use crate::domain::models::registration::RegistrationRule;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Missing fields: {}", rule_names(.0))]
    MissingFields(Vec<RegistrationRule>),

    #[error("Invalid fields: {}", rule_names(.0))]
    InvalidFields(Vec<RegistrationRule>),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

fn rule_names(rules: &[RegistrationRule]) -> String {
    rules
        .iter()
        .map(|rule| rule.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
