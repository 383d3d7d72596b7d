//! Field framing for signed tokens.
//!
//! Fields are framed before they are base64url encoded. The default framing
//! writes a field count and per-field lengths, so any content can be carried.
//! The delimited framing joins fields with a separator and is kept for
//! compatibility with separator-based tokens.

use crate::GuthError;

/// Sink for framed bytes. Lets framing feed a MAC directly without buffering.
pub trait WriteBytes {
    fn write(&mut self, slice: &[u8]);
}

impl WriteBytes for Vec<u8> {
    fn write(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice);
    }
}

impl<W: WriteBytes + ?Sized> WriteBytes for &mut W {
    fn write(&mut self, slice: &[u8]) {
        W::write(self, slice);
    }
}

/// Length-prefixed encoding.
///
/// Writes the number of pieces as a little-endian `u64`, then for each piece
/// its total length as a little-endian `u64` followed by its bytes. A piece
/// may be given as several slices that are written back to back.
pub fn length_prefixed<const N: usize>(pieces: [&[&[u8]]; N], mut out: impl WriteBytes) {
    let len = N as u64;
    out.write(&len.to_le_bytes());
    for piece in pieces {
        let len: u64 = piece.iter().map(|x| x.len() as u64).sum();
        out.write(&len.to_le_bytes());
        for x in piece {
            out.write(x);
        }
    }
}

/// Inverse of [`length_prefixed`]. The input must hold exactly `N` fields and nothing else.
pub fn split_length_prefixed<const N: usize>(mut bytes: &[u8]) -> Result<[&[u8]; N], GuthError> {
    if take_u64(&mut bytes)? != N as u64 {
        return Err(GuthError::MalformedToken);
    }

    let mut fields: [&[u8]; N] = [&[]; N];
    for field in &mut fields {
        let len = usize::try_from(take_u64(&mut bytes)?).map_err(|_| GuthError::MalformedToken)?;
        if len > bytes.len() {
            return Err(GuthError::MalformedToken);
        }
        let (head, tail) = bytes.split_at(len);
        *field = head;
        bytes = tail;
    }

    if !bytes.is_empty() {
        return Err(GuthError::MalformedToken);
    }
    Ok(fields)
}

fn take_u64(bytes: &mut &[u8]) -> Result<u64, GuthError> {
    let (len, rest) = bytes
        .split_first_chunk::<8>()
        .ok_or(GuthError::MalformedToken)?;
    *bytes = rest;
    Ok(u64::from_le_bytes(*len))
}

/// Bytes that can appear in a rendered expiry timestamp.
const TIMESTAMP_ALPHABET: &[u8] = b"0123456789-:.TZ";

/// How the fields of a signed token are laid out before encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Framing {
    /// Field count and lengths precede the fields.
    #[default]
    LengthPrefixed,
    /// Fields joined by a separator. Content must never contain the separator.
    Delimited(Separator),
}

/// A field separator accepted by [`Framing::delimited`].
///
/// Never empty, and always holds a byte outside the timestamp alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Separator(Box<[u8]>);

impl Separator {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Framing {
    /// Delimited framing with the given separator.
    ///
    /// The separator must not be empty and must contain at least one byte that
    /// cannot occur in a rendered timestamp, otherwise the expiry field could
    /// be split.
    pub fn delimited(separator: impl Into<Vec<u8>>) -> Result<Self, GuthError> {
        let separator = separator.into();
        if !separator.iter().any(|b| !TIMESTAMP_ALPHABET.contains(b)) {
            return Err(GuthError::InvalidSeparator);
        }
        Ok(Framing::Delimited(Separator(separator.into_boxed_slice())))
    }

    /// Join `content, expires, signature` into one byte string.
    ///
    /// Fails with [`GuthError::AmbiguousContent`] unless [`Framing::split`]
    /// recovers exactly the same fields.
    pub fn join(&self, fields: [&[u8]; 3]) -> Result<Vec<u8>, GuthError> {
        let [content, expires, signature] = fields;
        match self {
            Framing::LengthPrefixed => {
                let mut out = Vec::with_capacity(32 + content.len() + expires.len() + signature.len());
                length_prefixed([&[content], &[expires], &[signature]], &mut out);
                Ok(out)
            }
            Framing::Delimited(sep) => {
                let sep = sep.as_bytes();
                let joined = [content, expires, signature].join(sep);

                // content ending in a prefix of the separator moves the first match left
                let first = find(&joined, sep);
                let second_from = content.len() + sep.len();
                let second = find(&joined[second_from..], sep);
                if first != Some(content.len()) || second != Some(expires.len()) {
                    return Err(GuthError::AmbiguousContent);
                }
                Ok(joined)
            }
        }
    }

    /// Split a byte string back into `content, expires, signature`.
    pub fn split<'a>(&self, bytes: &'a [u8]) -> Result<[&'a [u8]; 3], GuthError> {
        match self {
            Framing::LengthPrefixed => split_length_prefixed(bytes),
            Framing::Delimited(sep) => {
                let sep = sep.as_bytes();
                let (content, rest) = split_once(bytes, sep).ok_or(GuthError::MalformedToken)?;
                let (expires, signature) =
                    split_once(rest, sep).ok_or(GuthError::MalformedToken)?;
                Ok([content, expires, signature])
            }
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn split_once<'a>(bytes: &'a [u8], sep: &[u8]) -> Option<(&'a [u8], &'a [u8])> {
    let at = find(bytes, sep)?;
    Some((&bytes[..at], &bytes[at + sep.len()..]))
}

#[cfg(test)]
mod tests {
    use super::{Framing, length_prefixed, split_length_prefixed};
    use crate::GuthError;

    fn encode_vec<const N: usize>(pieces: [&[&[u8]]; N]) -> Vec<u8> {
        let mut vec = Vec::new();
        length_prefixed(pieces, &mut vec);
        vec
    }

    #[test]
    fn length_prefixed_layout() {
        let v = encode_vec([]);
        assert_eq!(v, b"\x00\x00\x00\x00\x00\x00\x00\x00");

        let v = encode_vec([&[b""]]);
        assert_eq!(
            v,
            b"\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00"
        );

        let v = encode_vec([&[b"te", b"st"]]);
        assert_eq!(
            v,
            b"\x01\x00\x00\x00\x00\x00\x00\x00\x04\x00\x00\x00\x00\x00\x00\x00test"
        );
    }

    #[test]
    fn split_rejects_bad_lengths() {
        let v = encode_vec([&[b"content"], &[b"expires"]]);
        assert!(matches!(
            split_length_prefixed::<3>(&v),
            Err(GuthError::MalformedToken)
        ));

        let mut v = encode_vec([&[b"a"], &[b"b"], &[b"c"]]);
        v.push(0);
        assert!(matches!(
            split_length_prefixed::<3>(&v),
            Err(GuthError::MalformedToken)
        ));

        let v = encode_vec([&[b"a"], &[b"b"], &[b"c"]]);
        assert!(matches!(
            split_length_prefixed::<3>(&v[..v.len() - 1]),
            Err(GuthError::MalformedToken)
        ));

        // a length that overruns the input
        let mut v = 3u64.to_le_bytes().to_vec();
        v.extend_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(
            split_length_prefixed::<3>(&v),
            Err(GuthError::MalformedToken)
        ));
    }

    #[test]
    fn length_prefixed_carries_any_content() {
        let framing = Framing::LengthPrefixed;
        let content = b"a|b\x00\x01|c";
        let joined = framing.join([content, b"expires", b"sig|nature"]).unwrap();
        let [c, e, s] = framing.split(&joined).unwrap();
        assert_eq!(c, content);
        assert_eq!(e, b"expires");
        assert_eq!(s, b"sig|nature");
    }

    #[test]
    fn delimited_splits_on_first_two_separators() {
        let framing = Framing::delimited("|").unwrap();
        let joined = framing.join([b"user", b"2024", b"sig|with|bars"]).unwrap();
        assert_eq!(joined, b"user|2024|sig|with|bars");

        let [c, e, s] = framing.split(&joined).unwrap();
        assert_eq!(c, b"user");
        assert_eq!(e, b"2024");
        assert_eq!(s, b"sig|with|bars");
    }

    #[test]
    fn delimited_needs_three_fields() {
        let framing = Framing::delimited("|").unwrap();
        assert!(matches!(
            framing.split(b"user|2024"),
            Err(GuthError::MalformedToken)
        ));
        assert!(matches!(framing.split(b""), Err(GuthError::MalformedToken)));
    }

    #[test]
    fn delimited_rejects_separator_in_content() {
        let framing = Framing::delimited("|").unwrap();
        assert!(matches!(
            framing.join([b"us|er", b"2024", b"sig"]),
            Err(GuthError::AmbiguousContent)
        ));
    }

    #[test]
    fn delimited_rejects_content_overlapping_the_separator() {
        let framing = Framing::delimited("||").unwrap();
        assert!(matches!(
            framing.join([b"x|", b"2024", b"sig"]),
            Err(GuthError::AmbiguousContent)
        ));
        assert!(matches!(
            framing.join([b"x", b"2024|", b"sig"]),
            Err(GuthError::AmbiguousContent)
        ));
    }

    #[test]
    fn delimited_join_always_splits_back() {
        let expires = b"2024-01-01T00:10:00.000000000Z";
        for sep in ["|", "||", "<|>", "ab", "\x00\x00\x01", "|.|"] {
            let framing = Framing::delimited(sep).unwrap();
            let sep = sep.as_bytes();

            // content ending in every prefix of the separator, with and without a tail
            for i in 0..=sep.len() {
                for tail in [&b""[..], b"x"] {
                    let content = [&b"user"[..], &sep[..i], tail].concat();
                    let signature = [sep, &b"sig"[..], sep].concat();
                    match framing.join([&content, expires, &signature]) {
                        Ok(joined) => {
                            let [c, e, s] = framing.split(&joined).unwrap();
                            assert_eq!(c, content);
                            assert_eq!(e, expires);
                            assert_eq!(s, signature);
                        }
                        Err(err) => assert!(matches!(err, GuthError::AmbiguousContent)),
                    }
                }
            }

            let plain = framing.join([b"user", expires, b"sig"]).unwrap();
            assert_eq!(framing.split(&plain).unwrap()[0], b"user");
        }
    }

    #[test]
    fn empty_separator_cannot_be_built() {
        assert!(matches!(
            Framing::delimited(Vec::<u8>::new()),
            Err(GuthError::InvalidSeparator)
        ));
    }

    #[test]
    fn separator_must_leave_timestamp_alphabet() {
        assert!(matches!(
            Framing::delimited(""),
            Err(GuthError::InvalidSeparator)
        ));
        assert!(matches!(
            Framing::delimited("-"),
            Err(GuthError::InvalidSeparator)
        ));
        assert!(matches!(
            Framing::delimited(":T"),
            Err(GuthError::InvalidSeparator)
        ));
        assert!(Framing::delimited("<-->").is_ok());
    }
}
