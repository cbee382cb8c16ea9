//! Optional tracing of the internals of a digest computation
//!
//! A [`TraceObserver`] is handed to a hasher for the lifetime of one
//! computation and is notified as blocks are scheduled and compressed.
//! Every method defaults to doing nothing, so [`NoopObserver`] costs
//! nothing once monomorphized.

use super::compress::State;
use super::padding::Block;
use super::schedule::SCHEDULE_LEN;

/// Log target used by [`LogObserver`]
pub const TRACE_TARGET: &str = "mini_sha1::trace";

/// Receives structured events while a digest is being computed.
///
/// `index` is the zero-based position of the block within the padded
/// message.
pub trait TraceObserver {
    /// A block is about to be processed
    fn on_block(&mut self, _index: u64, _block: &Block) {}

    /// The message schedule for a block has been expanded
    fn on_schedule(&mut self, _index: u64, _schedule: &[u32; SCHEDULE_LEN]) {}

    /// Round `t` finished, `vars` holds `[a, b, c, d, e]`
    fn on_round(&mut self, _index: u64, _t: usize, _vars: &State) {}

    /// The hash state after the block was accumulated
    fn on_state(&mut self, _index: u64, _state: &State) {}
}

impl<T: TraceObserver + ?Sized> TraceObserver for &mut T {
    fn on_block(&mut self, index: u64, block: &Block) {
        (**self).on_block(index, block);
    }

    fn on_schedule(&mut self, index: u64, schedule: &[u32; SCHEDULE_LEN]) {
        (**self).on_schedule(index, schedule);
    }

    fn on_round(&mut self, index: u64, t: usize, vars: &State) {
        (**self).on_round(index, t, vars);
    }

    fn on_state(&mut self, index: u64, state: &State) {
        (**self).on_state(index, state);
    }
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TraceObserver for NoopObserver {}

/// Forwards events to the `log` facade under [`TRACE_TARGET`].
///
/// Blocks and states are logged at `debug`, schedules and individual
/// rounds at `trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl TraceObserver for LogObserver {
    fn on_block(&mut self, index: u64, _block: &Block) {
        log::debug!(target: TRACE_TARGET, "processing block {index}");
    }

    fn on_schedule(&mut self, index: u64, schedule: &[u32; SCHEDULE_LEN]) {
        if !log::log_enabled!(target: TRACE_TARGET, log::Level::Trace) {
            return;
        }
        for (t, word) in schedule.iter().enumerate() {
            log::trace!(target: TRACE_TARGET, "block {index}: w[{t}] = 0x{word:08X}");
        }
    }

    fn on_round(&mut self, index: u64, t: usize, vars: &State) {
        let [a, b, c, d, e] = vars;
        log::trace!(
            target: TRACE_TARGET,
            "block {index}: t = {t:2}: {a:08X} {b:08X} {c:08X} {d:08X} {e:08X}"
        );
    }

    fn on_state(&mut self, index: u64, state: &State) {
        let [h0, h1, h2, h3, h4] = state;
        log::debug!(
            target: TRACE_TARGET,
            "block {index}: H = {h0:08X} {h1:08X} {h2:08X} {h3:08X} {h4:08X}"
        );
    }
}

/// A single event captured by [`RecordingObserver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Block { index: u64, block: Block },
    Schedule { index: u64, schedule: Box<[u32; SCHEDULE_LEN]> },
    Round { index: u64, t: usize, vars: State },
    State { index: u64, state: State },
}

/// Keeps every event in order of arrival
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<TraceEvent>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks that were processed
    #[must_use]
    pub fn blocks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Block { .. }))
            .count()
    }

    /// Hash states in the order they were produced
    #[must_use]
    pub fn states(&self) -> Vec<State> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::State { state, .. } => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// Working variables after round `t` of block `index`
    #[must_use]
    pub fn round(&self, index: u64, t: usize) -> Option<State> {
        self.events.iter().find_map(|e| match e {
            TraceEvent::Round { index: i, t: r, vars } if *i == index && *r == t => {
                Some(*vars)
            }
            _ => None,
        })
    }
}

impl TraceObserver for RecordingObserver {
    fn on_block(&mut self, index: u64, block: &Block) {
        self.events.push(TraceEvent::Block {
            index,
            block: *block,
        });
    }

    fn on_schedule(&mut self, index: u64, schedule: &[u32; SCHEDULE_LEN]) {
        self.events.push(TraceEvent::Schedule {
            index,
            schedule: Box::new(*schedule),
        });
    }

    fn on_round(&mut self, index: u64, t: usize, vars: &State) {
        self.events.push(TraceEvent::Round {
            index,
            t,
            vars: *vars,
        });
    }

    fn on_state(&mut self, index: u64, state: &State) {
        self.events.push(TraceEvent::State {
            index,
            state: *state,
        });
    }
}
