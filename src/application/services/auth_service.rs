//! Shared-secret authentication for the admin area.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Message signed with the admin password to produce the session token.
const SESSION_CONTEXT: &[u8] = b"linkgate:admin-session:v1";

/// Service guarding the admin pages with a single static password.
///
/// There is no session store: the auth cookie carries an HMAC-SHA256 of a
/// fixed context string keyed by the password. Every holder of the password
/// derives the same token, and changing the password invalidates all cookies.
/// The password itself never leaves the server after login.
pub struct AuthService {
    password: String,
    cookie_max_age: i64,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `password` - the admin password
    /// - `cookie_max_age` - lifetime of the auth cookie in seconds
    pub fn new(password: String, cookie_max_age: i64) -> Self {
        Self {
            password,
            cookie_max_age,
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.password.as_bytes()).expect("HMAC accepts any key length")
    }

    /// Lifetime of the auth cookie in seconds.
    pub fn cookie_max_age(&self) -> i64 {
        self.cookie_max_age
    }

    /// Returns true if `candidate` is exactly the admin password.
    ///
    /// Both sides are MACed first so the comparison runs in constant time.
    pub fn verify_password(&self, candidate: &str) -> bool {
        let mut expected = self.mac();
        expected.update(self.password.as_bytes());

        let mut given = self.mac();
        given.update(candidate.as_bytes());

        given
            .verify_slice(&expected.finalize().into_bytes())
            .is_ok()
    }

    /// The cookie value granted after a successful login.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn session_token(&self) -> String {
        let mut mac = self.mac();
        mac.update(SESSION_CONTEXT);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Checks the password and returns the session token on success.
    pub fn login(&self, candidate: &str) -> Option<String> {
        self.verify_password(candidate)
            .then(|| self.session_token())
    }

    /// Returns true if `cookie_value` is a valid session token.
    pub fn is_authenticated(&self, cookie_value: Option<&str>) -> bool {
        let Some(Ok(bytes)) = cookie_value.map(hex::decode) else {
            return false;
        };

        let mut mac = self.mac();
        mac.update(SESSION_CONTEXT);
        mac.verify_slice(&bytes).is_ok()
    }
}
