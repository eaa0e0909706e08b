//! Fixed-width trace and span identifiers, written as lowercase or
//! uppercase hex on the wire.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A 16-byte trace identifier (32 hex characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId([u8; 16]);

/// An 8-byte span identifier (16 hex characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanId([u8; 8]);

/// Why a hex identifier was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected_len} hex characters: {source}")]
pub struct ParseIdError {
    expected_len: usize,
    source: hex::FromHexError,
}

fn decode_hex<const N: usize>(s: &str) -> Result<[u8; N], ParseIdError> {
    let mut bytes = [0u8; N];
    hex::decode_to_slice(s, &mut bytes).map_err(|source| ParseIdError {
        expected_len: N * 2,
        source,
    })?;
    Ok(bytes)
}

macro_rules! hex_id {
    ($ty:ident, $len:literal) => {
        impl $ty {
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub const fn to_bytes(self) -> [u8; $len] {
                self.0
            }
        }

        impl FromStr for $ty {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_hex::<$len>(s).map(Self)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }
    };
}

hex_id!(TraceId, 16);
hex_id!(SpanId, 8);
