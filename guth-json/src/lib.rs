#![forbid(unsafe_code)]
//! JSON messages for encrypted guth tokens.

use std::io::Write;
use std::time::Duration;

pub use jiff;

use guth_core::encodings::Message;
use guth_core::suite::CipherSuite;
pub use guth_core::validation::Validate;
use guth_core::{BoxError, EncryptedToken, GuthError, SecretKey};
use jiff::Timestamp;
use rand_core::{OsRng, TryCryptoRng};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// `Json` is a type wrapper to implement [`Message`] for all types that implement
/// [`serde::Serialize`] and [`serde::Deserialize`]
///
/// This uses [`serde_json`] internally, which by default offers a stack-overflow
/// protection limit on parsing JSON. Decrypted bytes are only parsed after the
/// token has been authenticated.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Json<T>(pub T);

impl<T: Serialize + DeserializeOwned> Message for Json<T> {
    fn encode(&self, writer: impl Write) -> Result<(), BoxError> {
        serde_json::to_writer(writer, &self.0).map_err(|err| Box::new(err) as _)
    }

    fn decode(payload: &[u8]) -> Result<Self, BoxError> {
        serde_json::from_slice(payload)
            .map_err(From::from)
            .map(Self)
    }
}

/// The standard encrypted token message: some content and when it was created.
///
/// Serialized as `{"content":"...","created":"<RFC 3339>"}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub content: String,
    pub created: Timestamp,
}

impl Payload {
    pub fn new(content: impl Into<String>, created: Timestamp) -> Self {
        Self {
            content: content.into(),
            created,
        }
    }

    /// A payload created at the current time.
    pub fn now(content: impl Into<String>) -> Self {
        Self::new(content, Timestamp::now())
    }

    /// Serialize and encrypt into a raw `IV || ciphertext || tag` blob.
    pub fn encrypt<S: CipherSuite>(&self, key: &SecretKey) -> Result<Vec<u8>, GuthError> {
        self.encrypt_with_rng::<S>(key, OsRng)
    }

    pub fn encrypt_with_rng<S: CipherSuite>(
        &self,
        key: &SecretKey,
        rng: impl TryCryptoRng,
    ) -> Result<Vec<u8>, GuthError> {
        Ok(EncryptedToken::<S>::encrypt(self, key, rng)?.into_bytes())
    }

    /// Decrypt `blob` and replace `self` with its contents.
    ///
    /// On error `self` is left untouched.
    pub fn decrypt<S: CipherSuite>(
        &mut self,
        blob: &[u8],
        key: &SecretKey,
    ) -> Result<(), GuthError> {
        *self = EncryptedToken::<S>::from_bytes(blob).decrypt(key)?;
        Ok(())
    }
}

impl Message for Payload {
    fn encode(&self, writer: impl Write) -> Result<(), BoxError> {
        serde_json::to_writer(writer, self).map_err(|err| Box::new(err) as _)
    }

    fn decode(payload: &[u8]) -> Result<Self, BoxError> {
        serde_json::from_slice(payload).map_err(From::from)
    }
}

/// Rejects payloads created more than `max_age` before `now`, or after `now`.
#[derive(Clone, Copy, Debug)]
pub struct MaxAge {
    now: Timestamp,
    max_age: Duration,
}

impl MaxAge {
    pub fn valid_now(max_age: Duration) -> Self {
        Self::valid_at(Timestamp::now(), max_age)
    }

    pub fn valid_at(now: Timestamp, max_age: Duration) -> Self {
        Self { now, max_age }
    }
}

impl Validate for MaxAge {
    type Claims = Payload;

    fn validate(&self, claims: &Payload) -> Result<(), GuthError> {
        if claims.created > self.now {
            return Err(GuthError::ExpiredToken);
        }

        match claims.created.checked_add(self.max_age) {
            Ok(expires) if expires <= self.now => Err(GuthError::ExpiredToken),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use guth_aes::G1;
    use guth_core::encodings::Message;
    use guth_core::{EncryptedToken, GuthError, SecretKey};
    use guth_test::FixedIv;
    use jiff::Timestamp;

    use super::{Json, MaxAge, Payload, Validate};

    fn key() -> SecretKey {
        SecretKey::from_bytes(*b"0123456789abcdef")
    }

    fn created() -> Timestamp {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn payload_json_layout() {
        let payload = Payload::new("6ba7b810-9dad-11d2-80b4-00c04fd430c8", created());
        let mut out = Vec::new();
        payload.encode(&mut out).unwrap();
        assert_eq!(
            out,
            br#"{"content":"6ba7b810-9dad-11d2-80b4-00c04fd430c8","created":"2024-01-01T00:00:00Z"}"#
        );
        assert_eq!(Payload::decode(&out).unwrap(), payload);
    }

    #[test]
    fn malformed_json_is_rejected() {
        for bad in [
            &b""[..],
            b"{}",
            br#"{"content":"a"}"#,
            br#"{"content":"a","created":"yesterday"}"#,
            br#"{"content":1,"created":"2024-01-01T00:00:00Z"}"#,
        ] {
            assert!(Payload::decode(bad).is_err());
        }
    }

    #[test]
    fn encrypt_decrypt() {
        let payload = Payload::new("user", created());
        let blob = payload.encrypt::<G1>(&key()).unwrap();

        let mut out = Payload::new("", Timestamp::UNIX_EPOCH);
        out.decrypt::<G1>(&blob, &key()).unwrap();
        assert_eq!(out, payload);
    }

    #[test]
    fn failed_decrypt_leaves_receiver_untouched() {
        let payload = Payload::new("user", created());
        let mut blob = payload
            .encrypt_with_rng::<G1>(&key(), FixedIv::new([7; 16]))
            .unwrap();

        let mut out = Payload::new("previous", Timestamp::UNIX_EPOCH);
        let wrong = SecretKey::from_bytes(*b"fedcba9876543210");
        assert!(matches!(
            out.decrypt::<G1>(&blob, &wrong),
            Err(GuthError::InvalidSignature)
        ));

        blob.truncate(10);
        assert!(matches!(
            out.decrypt::<G1>(&blob, &key()),
            Err(GuthError::TruncatedCiphertext)
        ));
        assert_eq!(out, Payload::new("previous", Timestamp::UNIX_EPOCH));
    }

    #[test]
    fn authenticated_garbage_is_a_deserialization_error() {
        let token =
            EncryptedToken::<G1>::encrypt(&b"not json".to_vec(), &key(), FixedIv::new([1; 16]))
                .unwrap();
        let mut out = Payload::new("previous", created());
        assert!(matches!(
            out.decrypt::<G1>(token.as_bytes(), &key()),
            Err(GuthError::Deserialization(_))
        ));
        assert_eq!(out.content, "previous");
    }

    #[test]
    fn json_wrapper() {
        let mut map = BTreeMap::new();
        map.insert("sub".to_owned(), "user".to_owned());

        let token = EncryptedToken::<G1>::encrypt(&Json(map.clone()), &key(), FixedIv::new([2; 16]))
            .unwrap();
        let Json(out): Json<BTreeMap<String, String>> = token.decrypt(&key()).unwrap();
        assert_eq!(out, map);
    }

    #[test]
    fn max_age() {
        let payload = Payload::new("user", created());
        let age = Duration::from_secs(600);

        assert!(MaxAge::valid_at(created(), age).validate(&payload).is_ok());
        assert!(
            MaxAge::valid_at(created() + Duration::from_secs(599), age)
                .validate(&payload)
                .is_ok()
        );
        assert!(matches!(
            MaxAge::valid_at(created() + Duration::from_secs(600), age).validate(&payload),
            Err(GuthError::ExpiredToken)
        ));
        assert!(matches!(
            MaxAge::valid_at(created() - Duration::from_secs(1), age).validate(&payload),
            Err(GuthError::ExpiredToken)
        ));
    }
}
