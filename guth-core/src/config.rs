//! Issuer/verifier configuration.
//!
//! A [`Config`] is built once at start up and shared by reference. Nothing in
//! this crate mutates it afterwards, so one value can back any number of
//! concurrent callers.

use std::time::Duration;

use crate::framing::Framing;
use crate::scheme::{Encrypted, Signed};
use crate::suite::CipherSuite;
use crate::{GuthError, SecretKey};

/// Settings shared by token issuers and verifiers.
#[derive(Clone, Debug)]
pub struct Config {
    secret_key: SecretKey,
    token_lifetime: Duration,
    framing: Framing,
}

impl Config {
    /// Lifetime of signed tokens unless configured otherwise.
    pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(10 * 60);

    pub fn new(secret_key: SecretKey) -> Self {
        Self {
            secret_key,
            token_lifetime: Self::DEFAULT_TOKEN_LIFETIME,
            framing: Framing::default(),
        }
    }

    /// How long a signed token stays valid after it is issued.
    pub fn with_token_lifetime(mut self, token_lifetime: Duration) -> Self {
        self.token_lifetime = token_lifetime;
        self
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    /// Use delimited framing for signed tokens, joined by `separator`.
    pub fn with_separator(self, separator: impl Into<Vec<u8>>) -> Result<Self, GuthError> {
        Ok(self.with_framing(Framing::delimited(separator)?))
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    pub fn framing(&self) -> &Framing {
        &self.framing
    }

    /// The encrypted scheme for messages of type `M`.
    pub fn encrypted<S: CipherSuite, M>(&self) -> Encrypted<'_, S, M> {
        Encrypted::new(self)
    }

    /// The signed scheme.
    pub fn signed<S: CipherSuite>(&self) -> Signed<'_, S> {
        Signed::new(self)
    }
}
