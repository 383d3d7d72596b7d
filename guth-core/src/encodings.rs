//! Message encodings and the base64url transport shared by both schemes.

use core::fmt;
use std::io::Write;
use std::marker::PhantomData;

use base64ct::{Base64UrlUnpadded, Encoding};

use crate::tokens::EncryptedToken;
use crate::{BoxError, GuthError, suite};

/// A message carried inside an encrypted token.
pub trait Message: Sized {
    /// Encode the message
    fn encode(&self, writer: impl Write) -> Result<(), BoxError>;

    /// Decode the message. Must not return a partially decoded value.
    fn decode(payload: &[u8]) -> Result<Self, BoxError>;
}

/// Raw bytes, passed through untouched.
impl Message for Vec<u8> {
    fn encode(&self, mut writer: impl Write) -> Result<(), BoxError> {
        writer.write_all(self).map_err(|err| Box::new(err) as _)
    }

    fn decode(payload: &[u8]) -> Result<Self, BoxError> {
        Ok(payload.to_owned())
    }
}

impl Message for String {
    fn encode(&self, mut writer: impl Write) -> Result<(), BoxError> {
        writer.write_all(self.as_bytes()).map_err(|err| Box::new(err) as _)
    }

    fn decode(payload: &[u8]) -> Result<Self, BoxError> {
        String::from_utf8(payload.to_owned()).map_err(From::from)
    }
}

/// Encode bytes for transport as text. Constant time with respect to the input.
pub fn to_base64(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decode transport text back into bytes.
pub fn from_base64(s: &str) -> Result<Vec<u8>, GuthError> {
    Base64UrlUnpadded::decode_vec(s).map_err(|_| GuthError::Encoding)
}

impl<S: suite::CipherSuite> fmt::Display for EncryptedToken<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_base64(self.as_bytes()))
    }
}

impl<S: suite::CipherSuite> std::str::FromStr for EncryptedToken<S> {
    type Err = GuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            blob: from_base64(s)?,
            _suite: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Message, from_base64, to_base64};
    use crate::GuthError;

    #[test]
    fn base64url_unpadded() {
        assert_eq!(to_base64(b"\xfb\xff"), "-_8");
        assert_eq!(from_base64("-_8").unwrap(), b"\xfb\xff");
        assert_eq!(from_base64("").unwrap(), b"");
    }

    #[test]
    fn base64_rejects_other_alphabets() {
        for s in ["+/8", "-_8=", "a", "not base64!"] {
            assert!(matches!(from_base64(s), Err(GuthError::Encoding)), "{s}");
        }
    }

    #[test]
    fn string_messages_must_be_utf8() {
        let mut out = Vec::new();
        "hello".to_owned().encode(&mut out).unwrap();
        assert_eq!(out, b"hello");
        assert!(String::decode(b"\xff").is_err());
    }
}
