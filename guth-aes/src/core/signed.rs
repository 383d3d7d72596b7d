use guth_core::{GuthError, SecretKey};
use hmac::{Hmac, Mac};
use sha2::Sha512;

pub(super) fn sign(key: &SecretKey, message: &[u8]) -> Result<Vec<u8>, GuthError> {
    let mut mac = keyed(key)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub(super) fn verify(key: &SecretKey, message: &[u8], signature: &[u8]) -> Result<(), GuthError> {
    let mut mac = keyed(key)?;
    mac.update(message);
    // constant time, and rejects signatures of the wrong length
    mac.verify_slice(signature)
        .map_err(|_| GuthError::InvalidSignature)
}

fn keyed(key: &SecretKey) -> Result<Hmac<Sha512>, GuthError> {
    if key.is_empty() {
        return Err(GuthError::InvalidKey);
    }
    <Hmac<Sha512> as Mac>::new_from_slice(key.expose()).map_err(|_| GuthError::InvalidKey)
}
