//! The two token schemes behind one interface.
//!
//! * [`Encrypted`] hides a [`Message`] from the token holder.
//! * [`Signed`] leaves the content readable but bounds it with an expiry.
//!
//! Both are cheap views over a shared [`Config`] and produce base64url text.

use std::marker::PhantomData;

use jiff::Timestamp;
use rand_core::{OsRng, TryCryptoRng};

use crate::encodings::Message;
use crate::sealed::Sealed;
use crate::suite::CipherSuite;
use crate::tokens::{EncryptedToken, SignedToken};
use crate::validation::{Expiry, Validate};
use crate::{Config, GuthError};

/// Issue and open tokens of one scheme.
pub trait TokenScheme: Sealed {
    /// What the token carries.
    type Message;

    /// Create a token string carrying `message`.
    fn issue(&self, message: Self::Message) -> Result<String, GuthError>;

    /// Check a token string and recover its message.
    fn open(&self, token: &str) -> Result<Self::Message, GuthError>;
}

/// Encrypted tokens carrying messages of type `M`.
pub struct Encrypted<'a, S, M> {
    config: &'a Config,
    _marker: PhantomData<fn() -> (S, M)>,
}

impl<'a, S, M> Encrypted<'a, S, M> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }
}

impl<S: CipherSuite, M: Message> Encrypted<'_, S, M> {
    /// Encrypt under an IV from the operating system RNG.
    pub fn encrypt(&self, message: &M) -> Result<EncryptedToken<S>, GuthError> {
        self.encrypt_with_rng(message, OsRng)
    }

    pub fn encrypt_with_rng(
        &self,
        message: &M,
        rng: impl TryCryptoRng,
    ) -> Result<EncryptedToken<S>, GuthError> {
        EncryptedToken::encrypt(message, self.config.secret_key(), rng)
    }

    pub fn decrypt(&self, token: EncryptedToken<S>) -> Result<M, GuthError> {
        token.decrypt(self.config.secret_key())
    }

    /// Open a token string and run `validation` on the decrypted message.
    pub fn open_with(
        &self,
        token: &str,
        validation: &impl Validate<Claims = M>,
    ) -> Result<M, GuthError> {
        token
            .parse::<EncryptedToken<S>>()?
            .decrypt_with(self.config.secret_key(), validation)
    }
}

impl<S, M> Sealed for Encrypted<'_, S, M> {}

impl<S: CipherSuite, M: Message> TokenScheme for Encrypted<'_, S, M> {
    type Message = M;

    fn issue(&self, message: M) -> Result<String, GuthError> {
        Ok(self.encrypt(&message)?.to_string())
    }

    fn open(&self, token: &str) -> Result<M, GuthError> {
        self.decrypt(token.parse()?)
    }
}

/// Signed tokens carrying raw content until `now + token_lifetime`.
pub struct Signed<'a, S> {
    config: &'a Config,
    _suite: PhantomData<fn() -> S>,
}

impl<'a, S> Signed<'a, S> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            _suite: PhantomData,
        }
    }
}

impl<S: CipherSuite> Signed<'_, S> {
    pub fn wrap(&self, content: impl Into<Vec<u8>>) -> Result<String, GuthError> {
        self.wrap_at(content, Timestamp::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// Fails with [`GuthError::LifetimeOverflow`] if `now + token_lifetime`
    /// is not a representable timestamp.
    pub fn wrap_at(&self, content: impl Into<Vec<u8>>, now: Timestamp) -> Result<String, GuthError> {
        let expires = now
            .checked_add(self.config.token_lifetime())
            .map_err(|_| GuthError::LifetimeOverflow)?;
        SignedToken::<S>::sign(content, expires, self.config.secret_key())?
            .encode(self.config.framing())
    }

    pub fn unwrap(&self, token: &str) -> Result<Vec<u8>, GuthError> {
        self.unwrap_at(token, Timestamp::now())
    }

    /// Validate a token as if the current time were `now`.
    pub fn unwrap_at(&self, token: &str, now: Timestamp) -> Result<Vec<u8>, GuthError> {
        SignedToken::<S>::decode(token, self.config.framing())?
            .validate(self.config.secret_key(), &Expiry::valid_at(now))
    }
}

impl<S> Sealed for Signed<'_, S> {}

impl<S: CipherSuite> TokenScheme for Signed<'_, S> {
    type Message = Vec<u8>;

    fn issue(&self, content: Vec<u8>) -> Result<String, GuthError> {
        self.wrap(content)
    }

    fn open(&self, token: &str) -> Result<Vec<u8>, GuthError> {
        self.unwrap(token)
    }
}
