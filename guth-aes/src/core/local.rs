use aes::{Aes128, Aes192, Aes256};
use cipher::{AsyncStreamCipher, BlockCipher, BlockEncryptMut, KeyInit, KeyIvInit};
use guth_core::framing::length_prefixed;
use guth_core::suite::CipherSuite;
use guth_core::tokens::ENCRYPTED_HEADER;
use guth_core::{GuthError, SecretKey};
use hmac::{Hmac, Mac};
use rand_core::TryCryptoRng;
use sha2::Sha512;

use super::{G1, PreAuthEncodeDigest};

pub(super) const BLOCK_SIZE: usize = 16;
const TAG_SIZE: usize = 64;

pub(super) fn iv(mut rng: impl TryCryptoRng) -> Result<Vec<u8>, GuthError> {
    let mut iv = [0; BLOCK_SIZE];
    rng.try_fill_bytes(&mut iv)
        .map_err(|_| GuthError::RandomSource)?;

    let mut payload = Vec::with_capacity(256);
    payload.extend_from_slice(&iv);
    Ok(payload)
}

pub(super) fn encrypt(key: &SecretKey, mut payload: Vec<u8>) -> Result<Vec<u8>, GuthError> {
    let key = key.expose();
    check_key(key)?;

    let (iv, plaintext) = payload
        .split_first_chunk_mut::<BLOCK_SIZE>()
        .ok_or(GuthError::TruncatedCiphertext)?;
    let iv: &[u8; BLOCK_SIZE] = iv;

    cfb(key, iv, plaintext, Direction::Encrypt)?;
    let mut mac = auth_mac(key, iv)?;
    preauth_local(&mut mac, iv, plaintext);
    payload.extend_from_slice(&mac.finalize().into_bytes());

    Ok(payload)
}

pub(super) fn decrypt<'a>(key: &SecretKey, blob: &'a mut [u8]) -> Result<&'a [u8], GuthError> {
    let key = key.expose();
    check_key(key)?;

    let (iv, rest) = blob
        .split_first_chunk_mut::<BLOCK_SIZE>()
        .ok_or(GuthError::TruncatedCiphertext)?;
    let (ciphertext, tag) = rest
        .split_last_chunk_mut::<TAG_SIZE>()
        .ok_or(GuthError::TruncatedCiphertext)?;
    let iv: &[u8; BLOCK_SIZE] = iv;

    let mut mac = auth_mac(key, iv)?;
    preauth_local(&mut mac, iv, ciphertext);
    mac.verify_slice(&tag[..])
        .map_err(|_| GuthError::InvalidSignature)?;
    cfb(key, iv, ciphertext, Direction::Decrypt)?;

    Ok(ciphertext)
}

fn check_key(key: &[u8]) -> Result<(), GuthError> {
    match key.len() {
        16 | 24 | 32 => Ok(()),
        _ => Err(GuthError::InvalidKey),
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn cfb(
    key: &[u8],
    iv: &[u8; BLOCK_SIZE],
    buf: &mut [u8],
    direction: Direction,
) -> Result<(), GuthError> {
    match key.len() {
        16 => cfb_with::<Aes128>(key, iv, buf, direction),
        24 => cfb_with::<Aes192>(key, iv, buf, direction),
        32 => cfb_with::<Aes256>(key, iv, buf, direction),
        _ => Err(GuthError::InvalidKey),
    }
}

fn cfb_with<C>(
    key: &[u8],
    iv: &[u8; BLOCK_SIZE],
    buf: &mut [u8],
    direction: Direction,
) -> Result<(), GuthError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    match direction {
        Direction::Encrypt => cfb_mode::Encryptor::<C>::new_from_slices(key, iv)
            .map_err(|_| GuthError::InvalidKey)?
            .encrypt(buf),
        Direction::Decrypt => cfb_mode::Decryptor::<C>::new_from_slices(key, iv)
            .map_err(|_| GuthError::InvalidKey)?
            .decrypt(buf),
    }
    Ok(())
}

/// Per-token authentication key, bound to the IV.
fn auth_mac(key: &[u8], iv: &[u8; BLOCK_SIZE]) -> Result<Hmac<Sha512>, GuthError> {
    let mut ak = [0; 64];
    hkdf::Hkdf::<Sha512>::new(Some(&iv[..]), key)
        .expand(b"guth-auth-key-for-cfb", &mut ak)
        .map_err(|_| GuthError::InvalidKey)?;
    <Hmac<Sha512> as Mac>::new_from_slice(&ak).map_err(|_| GuthError::InvalidKey)
}

fn preauth_local(mac: &mut Hmac<Sha512>, iv: &[u8], ciphertext: &[u8]) {
    length_prefixed(
        [
            &[G1::HEADER.as_bytes(), ENCRYPTED_HEADER.as_bytes()],
            &[iv],
            &[ciphertext],
        ],
        PreAuthEncodeDigest(mac),
    )
}
