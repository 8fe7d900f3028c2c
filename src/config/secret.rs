//! Database credentials
//!
//! The PostgreSQL connection string embeds the password. It is kept in a
//! [`SecretString`] that is zeroed on drop and redacted in `Debug`; code that
//! needs the raw value calls `expose_secret()`, and code that only needs to
//! show it calls [`redacted`].
//!
//! ```rust
//! use ficha::config::{redacted, secret_string};
//! use secrecy::ExposeSecret;
//!
//! let url = secret_string("postgresql://ficha:pw@localhost/ficha".to_string());
//! assert!(url.expose_secret().starts_with("postgresql://"));
//! assert!(!format!("{url:?}").contains("pw"));
//! assert_eq!(redacted(&url), "postgresql://***@localhost/ficha");
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use zeroize::Zeroize;

/// Plain string payload of a [`SecretString`]
#[derive(Clone, Debug, Zeroize, Serialize, Deserialize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl Deref for SecretValue {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

pub type SecretString = Secret<SecretValue>;

#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// The connection string with everything before the host replaced by `***`
pub fn redacted(secret: &SecretString) -> String {
    let raw: &str = secret.expose_secret();
    let (scheme, rest) = raw.split_once("://").unwrap_or(("postgresql", raw));
    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => format!("{scheme}://{rest}"),
    }
}
