//! Preview playback scheduling
//!
//! Advances a cyclic index over the playback sequence at a fixed frame rate.
//! The scheduler owns no timer: hosts either call [`PreviewScheduler::tick`]
//! from their own repeating timer or feed elapsed wall time through
//! [`PreviewScheduler::advance`].

use std::time::Duration;

/// Default preview frame rate
pub const DEFAULT_FPS: u32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewScheduler {
    fps: u32,
    index: usize,
    playing: bool,
    /// Time accumulated toward the next tick
    pending: Duration,
}

impl Default for PreviewScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl PreviewScheduler {
    /// A playing scheduler at `fps` frames per second (at least 1).
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            index: 0,
            playing: true,
            pending: Duration::ZERO,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Time between ticks: one second divided by `fps`.
    pub fn period(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Change the frame rate. Restarts the period but keeps the index.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.max(1);
        self.pending = Duration::ZERO;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        self.pending = Duration::ZERO;
    }

    /// Flip between playing and paused. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_playing(!self.playing);
        self.playing
    }

    /// Raw index, which may be stale if the sequence has shrunk.
    pub fn raw_index(&self) -> usize {
        self.index
    }

    /// Index to show for a sequence of `len` frames, or `None` when empty.
    /// An out-of-range index reads as 0.
    pub fn current(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else if self.index >= len {
            Some(0)
        } else {
            Some(self.index)
        }
    }

    /// The playback sequence changed to `len` frames. Restarts the period and
    /// resets an out-of-range index to 0.
    pub fn sequence_changed(&mut self, len: usize) {
        if self.index >= len {
            self.index = 0;
        }
        self.pending = Duration::ZERO;
    }

    /// Advance one step over a sequence of `len` frames. Returns the new index,
    /// or `None` when paused or the sequence is empty.
    pub fn tick(&mut self, len: usize) -> Option<usize> {
        if !self.playing || len == 0 {
            return None;
        }
        if self.index >= len {
            self.index = 0;
        }
        self.index = (self.index + 1) % len;
        Some(self.index)
    }

    /// Feed `elapsed` wall time. Fires one tick per whole period accumulated
    /// and returns how many fired (saturating at `u32::MAX`).
    pub fn advance(&mut self, elapsed: Duration, len: usize) -> u32 {
        if !self.playing {
            return 0;
        }
        // Sub-nanosecond periods round up to 1ns
        let period = self.period().as_nanos().max(1);
        let pending = self.pending.saturating_add(elapsed).as_nanos();
        let steps = pending / period;
        self.pending = Duration::from_nanos((pending % period) as u64);
        if steps == 0 || len == 0 {
            return 0;
        }

        if self.index >= len {
            self.index = 0;
        }
        let len = len as u128;
        self.index = ((self.index as u128 + steps % len) % len) as usize;
        u32::try_from(steps).unwrap_or(u32::MAX)
    }
}
