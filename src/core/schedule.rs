//! Message schedule expansion

use super::padding::Block;

/// Number of words in one message schedule
pub const SCHEDULE_LEN: usize = 80;

/// Number of words carried directly from the block
const BLOCK_WORDS: usize = 16;

/// Creates the message schedule for a given block.
///
/// The block is read as 16 big-endian words, which are then extended
/// into 80 words where every word from index 16 onwards is
/// `rotl1(w[t-3] ^ w[t-8] ^ w[t-14] ^ w[t-16])`.
#[must_use]
pub fn message_schedule(block: &Block) -> [u32; SCHEDULE_LEN] {
    let mut words = [0u32; SCHEDULE_LEN];

    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    for t in BLOCK_WORDS..SCHEDULE_LEN {
        words[t] = (words[t - 3] ^ words[t - 8] ^ words[t - 14] ^ words[t - 16])
            .rotate_left(1);
    }

    words
}
