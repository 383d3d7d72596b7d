//! guth tokens with AES-CFB and HMAC-SHA512 (RustCrypto)
//!
//! ```
//! use std::time::Duration;
//!
//! use guth_aes::{Config, G1, SecretKey};
//! use guth_core::scheme::TokenScheme;
//! use guth_json::Payload;
//!
//! // one configuration, fixed at start up
//! let config = Config::new(SecretKey::from_bytes(*b"0123456789abcdef"))
//!     .with_token_lifetime(Duration::from_secs(600));
//!
//! // signed tokens carry readable content until they expire
//! let signed = config.signed::<G1>();
//! let token = signed.wrap("6ba7b810-9dad-11d2-80b4-00c04fd430c8").unwrap();
//! let content = signed.unwrap(&token).unwrap();
//! assert_eq!(content, b"6ba7b810-9dad-11d2-80b4-00c04fd430c8");
//!
//! // encrypted tokens hide their payload
//! let encrypted = config.encrypted::<G1, Payload>();
//! let payload = Payload::now("6ba7b810-9dad-11d2-80b4-00c04fd430c8");
//! let token = encrypted.issue(payload.clone()).unwrap();
//! assert_eq!(encrypted.open(&token).unwrap(), payload);
//! ```
#![forbid(unsafe_code)]

/// Low level implementation primitives.
pub mod core;

pub use self::core::G1;
pub use guth_core::{Config, GuthError, SecretKey};

/// An encrypted token, `IV || ciphertext || tag`
pub type EncryptedToken = guth_core::EncryptedToken<core::G1>;
/// A signed token with an expiry
pub type SignedToken = guth_core::SignedToken<core::G1>;

/// The encrypted scheme over a [`Config`]
pub type Encrypted<'a, M> = guth_core::scheme::Encrypted<'a, core::G1, M>;
/// The signed scheme over a [`Config`]
pub type Signed<'a> = guth_core::scheme::Signed<'a, core::G1>;
