//! The operator-supplied service credentials.

/// The single username/password pair shared by everyone using the service.
///
/// There is deliberately no per-user identity: a successful comparison
/// against this pair is the only authentication the service knows. The
/// rest of the application only sees [SharedCredentials::verify], so a
/// future multi-user scheme can replace this type without touching the
/// expense service.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedCredentials {
    username: String,
    password: String,
}

impl SharedCredentials {
    /// Create the credential pair from the operator-supplied values.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    /// Whether `username` and `password` match the configured pair.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

// Keep the password out of debug logs.
impl std::fmt::Debug for SharedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCredentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
