//! Streaming message padding
//!
//! [`BlockReader`] turns any [`Read`] source of unknown length into the
//! sequence of 64-byte blocks SHA-1 consumes, appending the padding on
//! the fly: a single `0x80` byte, zeros, and the message length in bits
//! as a big-endian `u64` in the last 8 bytes. Only one block is ever
//! held in memory, regardless of the length of the source.

use std::io::{ErrorKind, Read};

use super::error::Sha1Error;

/// Size of a block in bytes
pub const BLOCK_SIZE: usize = 64;

/// Size of the trailing length field in bytes
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Marker byte placed right after the last message byte
const PAD_MARKER: u8 = 0x80;

/// One 64-byte unit of input to the compression function
pub type Block = [u8; BLOCK_SIZE];

/// Pads the final, partial chunk of a message.
///
/// `tail` holds the message bytes after the last full block, so it is
/// always shorter than [`BLOCK_SIZE`]. `message_len` is the length of
/// the whole message in bytes. The length field is written in bits,
/// modulo 2^64.
///
/// Returns the padded block and, when the marker and length field do not
/// both fit after `tail`, a second block made only of padding.
#[must_use]
pub fn pad_tail(tail: &[u8], message_len: u64) -> (Block, Option<Block>) {
    debug_assert!(tail.len() < BLOCK_SIZE, "tail must be a partial block");

    let bit_len = message_len.wrapping_mul(8).to_be_bytes();

    let mut block = [0u8; BLOCK_SIZE];
    block[..tail.len()].copy_from_slice(tail);
    block[tail.len()] = PAD_MARKER;

    let used = tail.len() + 1;
    if BLOCK_SIZE - used >= LENGTH_FIELD_SIZE {
        block[BLOCK_SIZE - LENGTH_FIELD_SIZE..].copy_from_slice(&bit_len);
        (block, None)
    } else {
        let mut extra = [0u8; BLOCK_SIZE];
        extra[BLOCK_SIZE - LENGTH_FIELD_SIZE..].copy_from_slice(&bit_len);
        (block, Some(extra))
    }
}

/// Reads a byte source block by block, padding the end of it.
///
/// Every call to [`BlockReader::next_block`] yields exactly one block
/// until the block carrying the length field has been returned, after
/// which it yields `None`.
#[derive(Debug)]
pub struct BlockReader<R> {
    reader: R,
    count: u64,
    pending: Option<Block>,
    finished: bool,
}

impl<R: Read> BlockReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            count: 0,
            pending: None,
            finished: false,
        }
    }

    /// Number of message bytes consumed from the source so far
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.count
    }

    /// Whether the final block has already been returned
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Gives back the wrapped source
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Produces the next block of the padded message.
    ///
    /// # Errors
    ///
    /// Returns [`Sha1Error::Read`] if the source fails. Nothing is
    /// emitted for the partially read block and the reader yields no
    /// further blocks afterwards.
    pub fn next_block(&mut self) -> Result<Option<Block>, Sha1Error> {
        if let Some(block) = self.pending.take() {
            self.finished = true;
            return Ok(Some(block));
        }
        if self.finished {
            return Ok(None);
        }

        let mut block = [0u8; BLOCK_SIZE];
        let n = match self.fill(&mut block) {
            Ok(n) => n,
            Err(err) => {
                self.finished = true;
                return Err(err.into());
            }
        };
        self.count = self.count.wrapping_add(n as u64);

        if n == BLOCK_SIZE {
            // The source may be exhausted right at this boundary, in
            // which case the next call reads nothing and emits a block
            // of pure padding.
            return Ok(Some(block));
        }

        let (last, extra) = pad_tail(&block[..n], self.count);
        match extra {
            Some(extra) => self.pending = Some(extra),
            None => self.finished = true,
        }
        Ok(Some(last))
    }

    /// Reads until `block` is full or the source reports end of stream
    fn fill(&mut self, block: &mut Block) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < BLOCK_SIZE {
            match self.reader.read(&mut block[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for BlockReader<R> {
    type Item = Result<Block, Sha1Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}
