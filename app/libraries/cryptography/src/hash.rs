use bcrypt::BcryptError;

/// Salted bcrypt hashing with a fixed cost.
///
/// Built once at startup and shared through the application state. It also
/// keeps a throwaway hash so a login for an unknown user spends the same
/// verification time as one for a known user.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, BcryptError> {
        let dummy_hash = bcrypt::hash("dummy-password", cost)?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn hash(&self, password: &str) -> Result<String, BcryptError> {
        bcrypt::hash(password, self.cost)
    }

    pub fn verify(&self, password: &str, hashed: &str) -> Result<bool, BcryptError> {
        bcrypt::verify(password, hashed)
    }

    /// Burns one verification; the result is always `false`.
    pub fn verify_absent(&self, password: &str) -> bool {
        let _ = bcrypt::verify(password, &self.dummy_hash);
        false
    }
}
