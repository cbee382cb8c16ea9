//! Computes SHA-1 digests
//!
//! There are two ways in. [`digest`] pulls a [`Read`] source through a
//! [`BlockReader`] one block at a time. [`Sha1`] is fed with repeated
//! [`Sha1::update`] calls and closed with [`Sha1::finalize`]. Both keep
//! at most one block of input around and produce identical digests for
//! identical input.

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use super::compress::{process_block, State, INITIAL_STATE};
use super::error::{ParseDigestError, Sha1Error};
use super::padding::{pad_tail, Block, BlockReader, BLOCK_SIZE};
use super::trace::{NoopObserver, TraceObserver};
use crate::utils::hex;

/// Size of a digest in bytes
pub const DIGEST_SIZE: usize = 20;

/// A finished 20-byte SHA-1 digest
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Serializes a hash state big-endian, word by word
    #[must_use]
    pub fn from_state(state: &State) -> Self {
        let mut bytes = [0u8; DIGEST_SIZE];
        for (out, word) in bytes.chunks_exact_mut(4).zip(state) {
            out.copy_from_slice(&word.to_be_bytes());
        }
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }

    /// Lowercase hexadecimal representation
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let len = bytes.len();
        let bytes: [u8; DIGEST_SIZE] =
            bytes.try_into().map_err(|_| ParseDigestError::Length(len))?;
        Ok(Self(bytes))
    }
}

/// Incremental SHA-1 hasher.
///
/// The hash state is set to the IV on creation, mutated once per full
/// block, and serialized exactly once by [`Sha1::finalize`], which
/// consumes the hasher.
#[derive(Debug, Clone)]
pub struct Sha1<O = NoopObserver> {
    state: State,
    buffer: Block,
    buffered: usize,
    length: u64,
    blocks: u64,
    observer: O,
}

impl Sha1 {
    #[must_use]
    pub fn new() -> Self {
        Self::with_observer(NoopObserver)
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: TraceObserver> Sha1<O> {
    /// Creates a hasher that reports its progress to `observer`
    pub fn with_observer(observer: O) -> Self {
        Self {
            state: INITIAL_STATE,
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
            length: 0,
            blocks: 0,
            observer,
        }
    }

    /// Feeds more message bytes into the hasher
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.length = self.length.wrapping_add(data.len() as u64);

        let mut data = data;
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take]
                .copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_SIZE {
                return self;
            }
            let block = self.buffer;
            self.process(&block);
            self.buffered = 0;
        }

        let mut chunks = data.chunks_exact(BLOCK_SIZE);
        for chunk in &mut chunks {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            self.process(&block);
        }

        let rest = chunks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
        self
    }

    /// Pads the message, processes the remaining block(s) and returns
    /// the digest
    #[must_use]
    pub fn finalize(mut self) -> Digest {
        let (last, extra) = pad_tail(&self.buffer[..self.buffered], self.length);
        self.process(&last);
        if let Some(extra) = extra {
            self.process(&extra);
        }

        log::debug!(
            "finalized sha1 over {} bytes in {} blocks",
            self.length,
            self.blocks
        );
        Digest::from_state(&self.state)
    }

    /// Discards everything fed so far and starts a new message
    pub fn reset(&mut self) {
        self.state = INITIAL_STATE;
        self.buffered = 0;
        self.length = 0;
        self.blocks = 0;
    }

    /// Number of message bytes fed so far, modulo 2^64
    #[must_use]
    pub fn len(&self) -> u64 {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn process(&mut self, block: &Block) {
        process_block(&mut self.state, block, self.blocks, &mut self.observer);
        self.blocks += 1;
    }
}

impl<O: TraceObserver> Write for Sha1<O> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Computes the digest of everything `reader` yields.
///
/// # Errors
///
/// Returns [`Sha1Error::Read`] if reading from `reader` fails. No
/// partial digest is produced.
pub fn digest<R: Read>(reader: R) -> Result<Digest, Sha1Error> {
    digest_with_observer(reader, NoopObserver)
}

/// Same as [`digest`], reporting every block, schedule and round to
/// `observer`
///
/// # Errors
///
/// Returns [`Sha1Error::Read`] if reading from `reader` fails.
pub fn digest_with_observer<R: Read, O: TraceObserver>(
    reader: R,
    mut observer: O,
) -> Result<Digest, Sha1Error> {
    let mut blocks = BlockReader::new(reader);
    let mut state = INITIAL_STATE;
    let mut index = 0u64;

    while let Some(block) = blocks.next_block()? {
        process_block(&mut state, &block, index, &mut observer);
        index += 1;
    }

    log::debug!(
        "streamed sha1 over {} bytes in {index} blocks",
        blocks.bytes_read()
    );
    Ok(Digest::from_state(&state))
}

/// Shortcut to hash an in-memory message
#[must_use]
pub fn digest_bytes(message: &[u8]) -> Digest {
    let mut sha = Sha1::new();
    sha.update(message);
    sha.finalize()
}

/// Shortcut to hash an in-memory message into lowercase hex
#[must_use]
pub fn hex_digest(message: &[u8]) -> String {
    digest_bytes(message).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trace::RecordingObserver;

    #[test]
    fn test_from_state() {
        let digest = Digest::from_state(&[
            0xA999_3E36,
            0x4706_816A,
            0xBA3E_2571,
            0x7850_C26C,
            0x9CD0_D89D,
        ]);
        assert_eq!(digest.to_hex(), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(digest.as_bytes()[..4], [0xA9, 0x99, 0x3E, 0x36]);
    }

    #[test]
    fn test_parse_digest() {
        let digest: Digest = "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709".parse().unwrap();
        assert_eq!(digest, digest_bytes(b""));
        assert_eq!(format!("{digest}"), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn test_parse_digest_bad_input() {
        assert!(matches!(
            "abcd".parse::<Digest>(),
            Err(ParseDigestError::Length(2))
        ));
        assert!(matches!("abc".parse::<Digest>(), Err(ParseDigestError::Hex(_))));
    }

    #[test]
    fn test_update_buffers_partial_block() {
        let mut sha = Sha1::new();
        sha.update(&[0u8; 10]);
        assert_eq!(sha.buffered, 10);
        assert_eq!(sha.blocks, 0);

        sha.update(&[0u8; 60]);
        assert_eq!(sha.buffered, 6);
        assert_eq!(sha.blocks, 1);
        assert_eq!(sha.len(), 70);
    }

    #[test]
    fn test_reset() {
        let mut sha = Sha1::new();
        sha.update(b"some data that is thrown away");
        sha.reset();
        assert!(sha.is_empty());
        sha.update(b"abc");
        assert_eq!(
            sha.finalize().to_hex(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_observer_sees_both_padding_blocks() {
        let mut observer = RecordingObserver::new();
        let mut sha = Sha1::with_observer(&mut observer);
        sha.update(&[b'a'; 56]);
        let digest = sha.finalize();

        assert_eq!(observer.blocks(), 2);
        assert_eq!(observer.states().len(), 2);
        assert_eq!(Digest::from_state(&observer.states()[1]), digest);
    }

    #[test]
    fn test_streaming_matches_incremental() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();

        let mut streamed = RecordingObserver::new();
        let a = digest_with_observer(&data[..], &mut streamed).unwrap();

        let mut incremental = RecordingObserver::new();
        let mut sha = Sha1::with_observer(&mut incremental);
        sha.update(&data);
        let b = sha.finalize();

        assert_eq!(a, b);
        assert_eq!(streamed.events, incremental.events);
    }
}
