use std::collections::BTreeSet;

use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Timestamps are **milliseconds** since the Unix epoch, not the seconds
/// convention of RFC 7519. Roles serialize in sorted order (`BTreeSet`) so
/// two tokens for the same identity carry byte-identical payloads apart
/// from the timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the identity's username
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (milliseconds since epoch)
    pub iat: i64,

    /// Expiration time (milliseconds since epoch)
    pub exp: i64,

    /// Role names granted to the subject
    pub roles: BTreeSet<String>,
}

impl Claims {
    /// Build claims for a freshly authenticated subject.
    ///
    /// # Arguments
    /// * `subject` - Stable identifier (username)
    /// * `issuer` - Configured issuer string
    /// * `roles` - Role names for downstream authorization
    /// * `ttl_ms` - Lifetime in milliseconds; `exp = iat + ttl_ms`
    pub fn new(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        roles: BTreeSet<String>,
        ttl_ms: i64,
    ) -> Self {
        let now = Utc::now().timestamp_millis();

        Self {
            sub: subject.into(),
            iss: issuer.into(),
            iat: now,
            exp: now + ttl_ms,
            roles,
        }
    }

    /// Check if the token is expired at the given instant.
    ///
    /// The boundary is inclusive: a token whose `exp` equals `now_ms` is
    /// already expired.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.exp
    }
}
