//! The SHA-1 compression function
//!
//! The algorithm follows FIPS 180-1 section 7, which is also what
//! <https://en.wikipedia.org/wiki/SHA-1#SHA-1_pseudocode> describes.

use super::padding::Block;
use super::schedule::{message_schedule, SCHEDULE_LEN};
use super::trace::TraceObserver;

/// Number of words in the hash state
pub const STATE_WORDS: usize = 5;

/// Five-word hash state, or the working variables `[a, b, c, d, e]`
pub type State = [u32; STATE_WORDS];

/// Initial hash state (IV)
pub const INITIAL_STATE: State =
    [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0];

const ROUND1_K: u32 = 0x5A82_7999;
const ROUND2_K: u32 = 0x6ED9_EBA1;
const ROUND3_K: u32 = 0x8F1B_BCDC;
const ROUND4_K: u32 = 0xCA62_C1D6;

/// Round function selected by the round index `t`
#[inline]
fn f(t: usize, b: u32, c: u32, d: u32) -> u32 {
    match t {
        0..=19 => (b & c) | ((!b) & d),
        40..=59 => (b & c) | (b & d) | (c & d),
        _ => b ^ c ^ d,
    }
}

/// Additive constant for round `t`
#[inline]
fn k(t: usize) -> u32 {
    match t {
        0..=19 => ROUND1_K,
        20..=39 => ROUND2_K,
        40..=59 => ROUND3_K,
        _ => ROUND4_K,
    }
}

/// One round: the variables are mixed and shifted down by one
#[inline]
fn step(t: usize, word: u32, [a, b, c, d, e]: State) -> State {
    let temp = a
        .rotate_left(5)
        .wrapping_add(f(t, b, c, d))
        .wrapping_add(e)
        .wrapping_add(word)
        .wrapping_add(k(t));

    [temp, a, b.rotate_left(30), c, d]
}

/// Runs the 80 rounds over `state` and returns the resulting working
/// variables. The caller still has to [`accumulate`] them.
#[must_use]
pub fn compress(state: &State, schedule: &[u32; SCHEDULE_LEN]) -> State {
    schedule
        .iter()
        .enumerate()
        .fold(*state, |vars, (t, &word)| step(t, word, vars))
}

fn compress_traced<O: TraceObserver>(
    state: &State,
    schedule: &[u32; SCHEDULE_LEN],
    index: u64,
    observer: &mut O,
) -> State {
    schedule
        .iter()
        .enumerate()
        .fold(*state, |vars, (t, &word)| {
            let vars = step(t, word, vars);
            observer.on_round(index, t, &vars);
            vars
        })
}

/// Adds the working variables into the hash state, word by word,
/// modulo 2^32
pub fn accumulate(state: &mut State, vars: &State) {
    for (h, v) in state.iter_mut().zip(vars) {
        *h = h.wrapping_add(*v);
    }
}

/// Processes one padded block: schedule, compress, accumulate.
///
/// `index` is only used to label the events sent to `observer`.
pub fn process_block<O: TraceObserver>(
    state: &mut State,
    block: &Block,
    index: u64,
    observer: &mut O,
) {
    observer.on_block(index, block);

    let schedule = message_schedule(block);
    observer.on_schedule(index, &schedule);

    let vars = compress_traced(state, &schedule, index, observer);
    accumulate(state, &vars);
    observer.on_state(index, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::padding::BLOCK_SIZE;
    use crate::core::trace::{NoopObserver, RecordingObserver};

    fn abc_block() -> Block {
        let mut block = [0u8; BLOCK_SIZE];
        block[..4].copy_from_slice(&[0x61, 0x62, 0x63, 0x80]);
        block[63] = 0x18;
        block
    }

    #[test]
    fn test_round_functions() {
        let (b, c, d) = (0xF0F0_F0F0, 0xCCCC_CCCC, 0xAAAA_AAAA);
        assert_eq!(f(0, b, c, d), 0xCACA_CACA);
        assert_eq!(f(19, b, c, d), 0xCACA_CACA);
        assert_eq!(f(20, b, c, d), b ^ c ^ d);
        assert_eq!(f(40, b, c, d), 0xE8E8_E8E8);
        assert_eq!(f(79, b, c, d), b ^ c ^ d);
    }

    #[test]
    fn test_round_constants() {
        assert_eq!(k(0), 0x5A82_7999);
        assert_eq!(k(19), 0x5A82_7999);
        assert_eq!(k(20), 0x6ED9_EBA1);
        assert_eq!(k(39), 0x6ED9_EBA1);
        assert_eq!(k(40), 0x8F1B_BCDC);
        assert_eq!(k(59), 0x8F1B_BCDC);
        assert_eq!(k(60), 0xCA62_C1D6);
        assert_eq!(k(79), 0xCA62_C1D6);
    }

    #[test]
    fn test_compress_abc() {
        let schedule = message_schedule(&abc_block());
        let vars = compress(&INITIAL_STATE, &schedule);
        assert_eq!(
            vars,
            [0x4254_1B35, 0x5738_D5E1, 0x2183_4873, 0x681E_6DF6, 0xD8FD_F6AD]
        );
    }

    #[test]
    fn test_accumulate_wraps() {
        let mut state = [u32::MAX, 1, 0, 0x8000_0000, 7];
        accumulate(&mut state, &[1, 1, 0, 0x8000_0000, 0]);
        assert_eq!(state, [0, 2, 0, 0, 7]);
    }

    #[test]
    fn test_process_block_abc() {
        let mut state = INITIAL_STATE;
        process_block(&mut state, &abc_block(), 0, &mut NoopObserver);
        assert_eq!(
            state,
            [0xA999_3E36, 0x4706_816A, 0xBA3E_2571, 0x7850_C26C, 0x9CD0_D89D]
        );
    }

    #[test]
    fn test_process_block_emits_rounds() {
        let mut state = INITIAL_STATE;
        let mut observer = RecordingObserver::new();
        process_block(&mut state, &abc_block(), 0, &mut observer);

        assert_eq!(observer.blocks(), 1);
        assert_eq!(
            observer.round(0, 0),
            Some([0x0116_FC33, 0x6745_2301, 0x7BF3_6AE2, 0x98BA_DCFE, 0x1032_5476])
        );
        assert_eq!(
            observer.round(0, 79),
            Some([0x4254_1B35, 0x5738_D5E1, 0x2183_4873, 0x681E_6DF6, 0xD8FD_F6AD])
        );
        assert_eq!(observer.states(), vec![state]);
        // block, schedule, 80 rounds, state
        assert_eq!(observer.events.len(), 83);
    }
}
