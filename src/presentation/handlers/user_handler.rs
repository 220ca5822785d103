use std::sync::Arc;

use crate::{
    domain::{
        error::DomainError,
        models::registration::{FieldValue, Registration, RegistrationRule, ValidationPolicy},
        repositories::user_repository::UserRepository,
        services::password_service::PasswordHasher,
    },
    usecase::register_user_usecase::RegisterUserUsecase,
};
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Request

/// json for register request
///
/// Fields accept any JSON value so that absent, `null` and other falsy
/// values reach validation instead of failing deserialization.
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<Value>,
    pub username: Option<Value>,
    pub password: Option<Value>,
}

impl From<Option<Value>> for FieldValue {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => FieldValue::Missing,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => FieldValue::Missing,
            Some(Value::String(s)) => FieldValue::Text(s),
            Some(_) => FieldValue::NotText,
        }
    }
}

// Response

/// json body shared by every register response
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<RegistrationRule>,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            violations: Vec::new(),
        }
    }

    pub fn with_violations(message: &'static str, violations: Vec<RegistrationRule>) -> Self {
        Self {
            message,
            violations,
        }
    }
}

/* Router Function and Handler Function */

// User Router

/// function return Router object
/// Suppose to be merged into main router
pub fn create_user_router<
    R: UserRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static + Clone,
>(
    register_service: RegisterUserUsecase<R, P>,
    validation_policy: ValidationPolicy,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
        validation_policy: Arc::new(validation_policy),
    };

    Router::new()
        .route("/register", post(register::<R, P>))
        .with_state(state)
}

pub struct AppState<R: UserRepository, P: PasswordHasher> {
    pub register_service: Arc<RegisterUserUsecase<R, P>>,
    pub validation_policy: Arc<ValidationPolicy>,
}

impl<R: UserRepository, P: PasswordHasher> Clone for AppState<R, P> {
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
            validation_policy: Arc::clone(&self.validation_policy),
        }
    }
}

// handler function

/// handler function for register
async fn register<
    R: UserRepository + Send + Sync,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<R, P>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let registration = Registration::new(
        payload.email.into(),
        payload.username.into(),
        payload.password.into(),
        &state.validation_policy,
    )?;
    let username = registration.username().to_string();

    let id = state.register_service.register(registration).await?;
    tracing::info!(user_id = %id, %username, "user registered");

    Ok((StatusCode::CREATED, Json(MessageResponse::new("User registered"))))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_falsy_values_are_missing() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!(-0.0)] {
            assert_eq!(FieldValue::from(Some(value.clone())), FieldValue::Missing, "{}", value);
        }
        assert_eq!(FieldValue::from(None), FieldValue::Missing);
    }

    #[test]
    fn test_strings_pass_through() {
        assert_eq!(FieldValue::from(Some(json!("alice"))), FieldValue::Text("alice".to_string()));
        // empty string is rejected by the presence rule, not here
        assert_eq!(FieldValue::from(Some(json!(""))), FieldValue::Text(String::new()));
    }

    #[test]
    fn test_truthy_non_strings_are_not_text() {
        for value in [json!(true), json!(1), json!(-3.5), json!([]), json!({})] {
            assert_eq!(FieldValue::from(Some(value.clone())), FieldValue::NotText, "{}", value);
        }
    }
}
