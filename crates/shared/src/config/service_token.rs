use subtle::ConstantTimeEq;

/// Shared secret that lets the order-service clear a cart on the user's behalf.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone)]
pub struct ServiceToken(String);

impl ServiceToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, candidate: &str) -> bool {
        !self.0.is_empty() && bool::from(self.0.as_bytes().ct_eq(candidate.as_bytes()))
    }
}

impl std::fmt::Debug for ServiceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceToken(***)")
    }
}
