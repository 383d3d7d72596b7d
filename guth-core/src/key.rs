//! Shared secret keys.

use core::fmt;

use crate::GuthError;

/// A symmetric secret shared by token issuers and verifiers.
///
/// The bytes are not validated here. Each cipher suite checks the key when it
/// is used and fails with [`GuthError::InvalidKey`] if it cannot accept it.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Box<[u8]>);

impl SecretKey {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into().into_boxed_slice())
    }

    /// Parse a key from hex text, as it is usually stored in configuration.
    pub fn from_hex(text: &str) -> Result<Self, GuthError> {
        hex::decode(text.trim())
            .map(Self::from_bytes)
            .map_err(|_| GuthError::InvalidKey)
    }

    /// Generate a random key of `len` bytes
    pub fn random(len: usize) -> Result<Self, GuthError> {
        let mut bytes = vec![0; len];
        getrandom::fill(&mut bytes).map_err(|_| GuthError::RandomSource)?;
        Ok(Self(bytes.into_boxed_slice()))
    }

    /// The raw key bytes. Keep these out of logs.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({} bytes)", self.0.len())
    }
}
