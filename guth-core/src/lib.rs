//! Core traits and types for guth stateless tokens.
//!
//! Two token schemes share one configuration and one transport encoding:
//! * [`EncryptedToken`] - a confidential message, encrypted and authenticated with a symmetric key.
//! * [`SignedToken`] - readable content with an expiry, protected by a keyed hash.
//!
//! The cryptography itself lives behind the [`CipherSuite`](suite::CipherSuite) trait.
#![forbid(unsafe_code)]

pub mod config;
pub mod encodings;
pub mod framing;
pub mod key;
pub mod scheme;
pub mod suite;
pub mod time;
pub mod tokens;
pub mod validation;

pub use config::Config;
pub use key::SecretKey;
pub use tokens::{EncryptedToken, SignedToken};

mod sealed {
    pub trait Sealed {}
}

/// Boxed error returned by [`Message`](encodings::Message) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
#[non_exhaustive]
/// Error returned for all token operations that can fail
pub enum GuthError {
    /// The key material is not valid for the cipher or hash.
    InvalidKey,
    /// The message could not be serialized.
    Serialization(BoxError),
    /// The decrypted bytes were not a valid message.
    Deserialization(BoxError),
    /// The ciphertext is too short to contain its IV and tag.
    TruncatedCiphertext,
    /// The token was not base64url encoded correctly.
    Encoding,
    /// The decoded token did not contain the expected fields.
    MalformedToken,
    /// The expiry field is not a timestamp in the canonical format.
    TimestampFormat,
    /// The token is past its expiry.
    ExpiredToken,
    /// The signature or authentication tag did not match.
    InvalidSignature,
    /// The content contains the field separator and cannot be framed.
    AmbiguousContent,
    /// The configured field separator could be confused with field contents.
    InvalidSeparator,
    /// The secure random source failed.
    RandomSource,
    /// Issuing now with the configured token lifetime puts the expiry out of range.
    LifetimeOverflow,
}

impl std::error::Error for GuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuthError::Serialization(x) | GuthError::Deserialization(x) => Some(&**x),
            _ => None,
        }
    }
}

impl std::fmt::Display for GuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuthError::InvalidKey => f.write_str("key is not valid for this cipher suite"),
            GuthError::Serialization(x) => write!(f, "could not serialize the message: {x}"),
            GuthError::Deserialization(x) => write!(f, "could not deserialize the message: {x}"),
            GuthError::TruncatedCiphertext => f.write_str("ciphertext is too short"),
            GuthError::Encoding => f.write_str("token could not be base64 decoded"),
            GuthError::MalformedToken => f.write_str("token fields could not be parsed"),
            GuthError::TimestampFormat => f.write_str("token expiry is not a valid timestamp"),
            GuthError::ExpiredToken => f.write_str("token has expired"),
            GuthError::InvalidSignature => f.write_str("token signature could not be validated"),
            GuthError::AmbiguousContent => f.write_str("content contains the field separator"),
            GuthError::InvalidSeparator => {
                f.write_str("field separator must contain a byte outside the timestamp alphabet")
            }
            GuthError::RandomSource => f.write_str("secure random source failed"),
            GuthError::LifetimeOverflow => f.write_str("token lifetime overflows the expiry"),
        }
    }
}
