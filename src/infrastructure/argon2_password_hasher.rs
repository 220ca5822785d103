use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher as Argon2Hasher, SaltString, rand_core::OsRng},
};

use crate::domain::{
    error::DomainError,
    models::user::HashedPassword,
    services::password_service::PasswordHasher,
};

/// Work factor applied when none is configured
pub const DEFAULT_HASH_COST: u32 = 10;

/// Argon2id hasher. The work factor is the number of passes over memory.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn with_cost(work_factor: u32) -> Result<Self, DomainError> {
        Self::with_params(Params::DEFAULT_M_COST, work_factor)
    }

    pub fn with_params(memory_kib: u32, work_factor: u32) -> Result<Self, DomainError> {
        let params = Params::new(memory_kib, work_factor, Params::DEFAULT_P_COST, None)
            .map_err(|e| DomainError::Hashing(format!("invalid argon2 parameters: {}", e)))?;
        Ok(Self { params })
    }

    pub fn work_factor(&self) -> u32 {
        self.params.t_cost()
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|e| DomainError::Hashing(e.to_string()))?
            .to_string();

        Ok(HashedPassword::new(hash))
    }

    #[cfg(test)]
    fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> Result<bool, DomainError> {
        use argon2::{PasswordHash as Argon2Hash, password_hash::PasswordVerifier};

        // a malformed hash never matches
        let Ok(parsed_hash) = Argon2Hash::new(hashed_password.as_str()) else {
            return Ok(false);
        };

        // parameters are read back from the PHC string
        Ok(Argon2::default()
            .verify_password(plain_password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
