use rand_core::TryCryptoRng;

use crate::{GuthError, SecretKey};

/// An implementation of the guth cryptographic primitives.
///
/// This is a low level detail used to build cipher suite crates. Applications
/// should go through [`EncryptedToken`](crate::EncryptedToken) and
/// [`SignedToken`](crate::SignedToken) instead.
pub trait CipherSuite: 'static {
    /// Domain separation header mixed into every MAC and signature.
    const HEADER: &'static str;
    /// Size of the IV at the front of an encrypted blob.
    const BLOCK_SIZE: usize;

    /// Start a new encrypted payload: a fresh IV, ready for the plaintext to be appended.
    fn iv(rng: impl TryCryptoRng) -> Result<Vec<u8>, GuthError>;

    /// Encrypt `payload` in place, treating the first [`Self::BLOCK_SIZE`] bytes as the IV.
    ///
    /// Returns `IV || ciphertext || tag`.
    fn encrypt(key: &SecretKey, payload: Vec<u8>) -> Result<Vec<u8>, GuthError>;

    /// Authenticate and decrypt `IV || ciphertext || tag` in place, returning the plaintext.
    fn decrypt<'a>(key: &SecretKey, blob: &'a mut [u8]) -> Result<&'a [u8], GuthError>;

    /// Compute the keyed hash of `message`.
    fn sign(key: &SecretKey, message: &[u8]) -> Result<Vec<u8>, GuthError>;

    /// Check `signature` against the keyed hash of `message` in constant time.
    fn verify(key: &SecretKey, message: &[u8], signature: &[u8]) -> Result<(), GuthError>;
}
