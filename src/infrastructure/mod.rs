pub mod argon2_password_hasher;
pub mod entities;
pub mod user_repository;
