//! Generic Tokens

use std::marker::PhantomData;

use jiff::Timestamp;
use rand_core::TryCryptoRng;

use crate::encodings::{Message, from_base64, to_base64};
use crate::framing::{Framing, length_prefixed};
use crate::suite::CipherSuite;
use crate::validation::{NoValidation, Validate};
use crate::{GuthError, SecretKey, time};

/// Mixed into the authentication tag of encrypted tokens.
pub const ENCRYPTED_HEADER: &str = ".encrypted.";
/// Mixed into the signature of signed tokens.
pub const SIGNED_HEADER: &str = ".signed.";

/// An encrypted token.
///
/// The wire form is `IV || ciphertext || tag`, available raw through
/// [`EncryptedToken::as_bytes`] or as base64url text through `Display`/`FromStr`.
///
/// The message inside is inaccessible until [`EncryptedToken::decrypt`] succeeds.
pub struct EncryptedToken<S> {
    pub(crate) blob: Vec<u8>,
    pub(crate) _suite: PhantomData<S>,
}

impl<S: CipherSuite> EncryptedToken<S> {
    /// Serialize and encrypt `message` under a fresh IV drawn from `rng`.
    #[doc(alias = "seal")]
    pub fn encrypt<M: Message>(
        message: &M,
        key: &SecretKey,
        rng: impl TryCryptoRng,
    ) -> Result<Self, GuthError> {
        let mut payload = S::iv(rng)?;
        message
            .encode(&mut payload)
            .map_err(GuthError::Serialization)?;

        Ok(Self {
            blob: S::encrypt(key, payload)?,
            _suite: PhantomData,
        })
    }

    /// Wrap a raw `IV || ciphertext || tag` blob received from elsewhere.
    pub fn from_bytes(blob: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: blob.into(),
            _suite: PhantomData,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.blob
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.blob
    }

    #[doc(alias = "unseal")]
    pub fn decrypt<M: Message>(self, key: &SecretKey) -> Result<M, GuthError> {
        self.decrypt_with(key, &NoValidation::dangerous_no_validation())
    }

    /// Decrypt, deserialize, then run `validation` on the message.
    pub fn decrypt_with<M: Message>(
        mut self,
        key: &SecretKey,
        validation: &impl Validate<Claims = M>,
    ) -> Result<M, GuthError> {
        let plaintext = S::decrypt(key, &mut self.blob)?;
        let message = M::decode(plaintext).map_err(GuthError::Deserialization)?;
        validation.validate(&message)?;
        Ok(message)
    }
}

/// A signed token.
///
/// The content is readable by anyone holding the token, but is only trusted
/// once [`SignedToken::validate`] has checked the expiry and the signature.
pub struct SignedToken<S> {
    content: Vec<u8>,
    expires: Timestamp,
    signature: Vec<u8>,
    _suite: PhantomData<S>,
}

impl<S: CipherSuite> SignedToken<S> {
    /// Sign `content` so that it is valid until `expires`.
    pub fn sign(
        content: impl Into<Vec<u8>>,
        expires: Timestamp,
        key: &SecretKey,
    ) -> Result<Self, GuthError> {
        let content = content.into();
        let signature = S::sign(key, &signing_input::<S>(&content, expires))?;
        Ok(Self::from_parts(content, expires, signature))
    }

    /// Assemble a token from its fields without signing it.
    pub fn from_parts(content: Vec<u8>, expires: Timestamp, signature: Vec<u8>) -> Self {
        Self {
            content,
            expires,
            signature,
            _suite: PhantomData,
        }
    }

    /// View the **unverified** content of this token
    pub fn unverified_content(&self) -> &[u8] {
        &self.content
    }

    pub fn expires(&self) -> Timestamp {
        self.expires
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Frame `content, expires, signature` and encode them as base64url.
    pub fn encode(&self, framing: &Framing) -> Result<String, GuthError> {
        let expires = time::render(self.expires);
        let joined = framing.join([&self.content, expires.as_bytes(), &self.signature])?;
        Ok(to_base64(&joined))
    }

    /// Inverse of [`SignedToken::encode`]. Nothing is verified yet.
    pub fn decode(token: &str, framing: &Framing) -> Result<Self, GuthError> {
        let bytes = from_base64(token)?;
        let [content, expires, signature] = framing.split(&bytes)?;
        let expires = time::parse(expires)?;
        Ok(Self::from_parts(
            content.to_vec(),
            expires,
            signature.to_vec(),
        ))
    }

    /// Recompute the signature and compare it in constant time.
    pub fn verify(&self, key: &SecretKey) -> Result<(), GuthError> {
        S::verify(
            key,
            &signing_input::<S>(&self.content, self.expires),
            &self.signature,
        )
    }

    /// Check the expiry, then the signature, and release the content.
    ///
    /// An expired token reports [`GuthError::ExpiredToken`] even when its
    /// signature is also wrong.
    pub fn validate(
        self,
        key: &SecretKey,
        validation: &impl Validate<Claims = Timestamp>,
    ) -> Result<Vec<u8>, GuthError> {
        validation.validate(&self.expires)?;
        self.verify(key)?;
        Ok(self.content)
    }
}

fn signing_input<S: CipherSuite>(content: &[u8], expires: Timestamp) -> Vec<u8> {
    let expires = time::render(expires);
    let mut out = Vec::with_capacity(64 + content.len() + expires.len());
    length_prefixed(
        [
            &[S::HEADER.as_bytes(), SIGNED_HEADER.as_bytes()],
            &[content],
            &[expires.as_bytes()],
        ],
        &mut out,
    );
    out
}
