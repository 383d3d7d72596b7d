mod local;
mod signed;

use guth_core::suite::CipherSuite;
use guth_core::{GuthError, SecretKey};
use rand_core::TryCryptoRng;

/// AES-CFB with an HMAC-SHA512 tag for encrypted tokens, HMAC-SHA512 for signed tokens.
///
/// The AES variant follows the key length: 16, 24 or 32 bytes.
pub struct G1;

impl CipherSuite for G1 {
    const HEADER: &'static str = "g1";
    const BLOCK_SIZE: usize = local::BLOCK_SIZE;

    fn iv(rng: impl TryCryptoRng) -> Result<Vec<u8>, GuthError> {
        local::iv(rng)
    }

    fn encrypt(key: &SecretKey, payload: Vec<u8>) -> Result<Vec<u8>, GuthError> {
        local::encrypt(key, payload)
    }

    fn decrypt<'a>(key: &SecretKey, blob: &'a mut [u8]) -> Result<&'a [u8], GuthError> {
        local::decrypt(key, blob)
    }

    fn sign(key: &SecretKey, message: &[u8]) -> Result<Vec<u8>, GuthError> {
        signed::sign(key, message)
    }

    fn verify(key: &SecretKey, message: &[u8], signature: &[u8]) -> Result<(), GuthError> {
        signed::verify(key, message, signature)
    }
}

struct PreAuthEncodeDigest<'a, M: digest::Update>(pub &'a mut M);
impl<M: digest::Update> guth_core::framing::WriteBytes for PreAuthEncodeDigest<'_, M> {
    fn write(&mut self, slice: &[u8]) {
        self.0.update(slice)
    }
}
