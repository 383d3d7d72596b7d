//! Helpers shared by the guth test suites.
//!
//! Vector files live in `guth-test/tests/vectors` and are found through this
//! crate's manifest directory, so any test binary in the workspace can load them.

use std::path::PathBuf;

use guth_core::GuthError;
use libtest_mimic::{Failed, Trial};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

/// Path of the named vector file.
pub fn vector_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vectors")
        .join(file)
}

/// Load and parse the named vector file.
pub fn read_test<T: DeserializeOwned>(file: &str) -> TestFile<T> {
    let path = vector_path(file);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("reading {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("parsing {}: {e}", path.display()))
}

/// One trial per vector in `file`, named `{group}::{vector name}`.
pub fn trials<T>(group: &str, file: &str, run: fn(T) -> Result<(), Failed>) -> Vec<Trial>
where
    T: DeserializeOwned + Send + 'static,
{
    read_test::<T>(file)
        .tests
        .into_iter()
        .map(|test| {
            let data = test.test_data;
            Trial::test(format!("{group}::{}", test.name), move || run(data))
        })
        .collect()
}

#[derive(Deserialize)]
pub struct TestFile<T> {
    pub tests: Vec<Test<T>>,
}

#[derive(Deserialize)]
pub struct Test<T> {
    pub name: String,
    #[serde(flatten)]
    pub test_data: T,
}

/// Deserializes only from the JSON boolean `B`, so an untagged enum can
/// branch on `expect-fail`.
#[derive(Debug)]
pub struct Flag<const B: bool>;

impl<'de, const B: bool> Deserialize<'de> for Flag<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match bool::deserialize(deserializer)? {
            v if v == B => Ok(Flag),
            v => Err(D::Error::custom(format_args!("expected {B}, got {v}"))),
        }
    }
}

/// The name a vector file uses for each error.
pub fn error_name(err: &GuthError) -> &'static str {
    match err {
        GuthError::InvalidKey => "invalid-key",
        GuthError::Serialization(_) => "serialization",
        GuthError::Deserialization(_) => "deserialization",
        GuthError::TruncatedCiphertext => "truncated-ciphertext",
        GuthError::Encoding => "encoding",
        GuthError::MalformedToken => "malformed-token",
        GuthError::TimestampFormat => "timestamp-format",
        GuthError::ExpiredToken => "expired-token",
        GuthError::InvalidSignature => "invalid-signature",
        GuthError::AmbiguousContent => "ambiguous-content",
        GuthError::InvalidSeparator => "invalid-separator",
        GuthError::RandomSource => "random-source",
        GuthError::LifetimeOverflow => "lifetime-overflow",
        _ => "unknown",
    }
}

/// Passes only when `result` failed with the error named `expected`.
pub fn expect_error<T>(result: Result<T, GuthError>, expected: &str) -> Result<(), Failed> {
    match result {
        Ok(_) => Err(format!("expected {expected}, but the token was accepted").into()),
        Err(err) if error_name(&err) == expected => Ok(()),
        Err(err) => Err(format!("expected {expected}, got {err:?}").into()),
    }
}

/// An IV source that hands out one fixed IV, for reproducing a token exactly.
#[derive(Clone, Debug)]
pub struct FixedIv {
    iv: [u8; 16],
    used: bool,
}

impl FixedIv {
    pub fn new(iv: [u8; 16]) -> Self {
        Self { iv, used: false }
    }
}

impl rand_core::RngCore for FixedIv {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        assert!(!self.used, "fixed iv already used");
        assert_eq!(dest.len(), self.iv.len(), "fixed iv requested with the wrong length");
        dest.copy_from_slice(&self.iv);
        self.used = true;
    }
}

// not really
impl rand_core::CryptoRng for FixedIv {}
