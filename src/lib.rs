#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![deny(clippy::suspicious)]
#![deny(unsafe_code)]

//! Streaming SHA-1 (FIPS 180-1)
//!
//! ```
//! let digest = mini_sha1::digest(&b"abc"[..]).unwrap();
//! assert_eq!(digest.to_hex(), "a9993e364706816aba3e25717850c26c9cd0d89d");
//!
//! let mut sha = mini_sha1::Sha1::new();
//! sha.update(b"a").update(b"bc");
//! assert_eq!(sha.finalize(), digest);
//! ```

pub mod core;
pub mod utils;

pub use crate::core::{
    digest, digest_bytes, digest_with_observer, hex_digest, Digest, ParseDigestError,
    Sha1, Sha1Error, DIGEST_SIZE,
};
