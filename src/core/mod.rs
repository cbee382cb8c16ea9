pub mod compress;
pub mod digest;
pub mod error;
pub mod padding;
pub mod schedule;
pub mod trace;

pub use digest::*;
pub use error::{ParseDigestError, Sha1Error};
