//! Frame assembly from an arbitrarily-chunked byte stream.
//!
//! The assembler sits on the UART byte-arrival path. Each call to
//! [`FrameAssembler::feed`] may carry any number of bytes — a fragment of a
//! sentence, several whole sentences, or pure line noise — and completed
//! frames come out the other side in end-marker arrival order through
//! [`FrameAssembler::take_ready`].
//!
//! `feed` never blocks and never returns an error; anything that goes wrong
//! on the producer path (oversized frame, full queue) is counted in
//! [`AssemblerStats`] and the assembler resynchronizes on the next start
//! marker.

use heapless::{Deque, Vec};

use crate::{MAX_SENTENCE_LEN, START_MARKER};

/// Number of completed frames the queue can hold before dropping
///
/// A GNSS receiver emits a handful of sentences per second; eight frames of
/// headroom covers a consumer that polls at a fraction of that rate.
pub const FRAME_QUEUE_DEPTH: usize = 8;

/// One complete frame: the bytes strictly between the start marker and the
/// end-of-line marker, not yet validated or decoded.
pub type RawFrame = Vec<u8, MAX_SENTENCE_LEN>;

/// Diagnostics counters maintained by the assembler
///
/// The producer path must never raise, so problems surface here instead;
/// the consumer reads them via [`FrameAssembler::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AssemblerStats {
    /// Frames completed and queued
    pub frames_completed: u32,
    /// Partial frames discarded because they exceeded `MAX_SENTENCE_LEN`
    pub overflows: u32,
    /// Completed frames dropped because the queue was full
    pub frames_dropped: u32,
    /// In-progress frames abandoned when a fresh start marker arrived
    pub resyncs: u32,
    /// Bytes discarded outside any frame (noise, stripped line endings)
    pub bytes_discarded: u32,
}

/// Reassembles delimited frames from raw byte chunks
///
/// Start marker `$` opens a frame (and unconditionally restarts one already
/// in progress — after a lost end-of-line the next sentence wins instead of
/// gluing onto the stale half). CR or LF closes it. Bytes seen outside a
/// frame are discarded.
pub struct FrameAssembler {
    pending: RawFrame,
    in_frame: bool,
    queue: Deque<RawFrame, FRAME_QUEUE_DEPTH>,
    stats: AssemblerStats,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAssembler {
    /// Create a new frame assembler
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            in_frame: false,
            queue: Deque::new(),
            stats: AssemblerStats::default(),
        }
    }

    /// Feed a chunk of received bytes to the assembler
    ///
    /// May complete zero, one, or several frames. An empty chunk is a no-op.
    pub fn feed(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            self.feed_byte(byte);
        }
    }

    fn feed_byte(&mut self, byte: u8) {
        match byte {
            START_MARKER => {
                if self.in_frame && !self.pending.is_empty() {
                    self.stats.resyncs = self.stats.resyncs.wrapping_add(1);
                }
                self.pending.clear();
                self.in_frame = true;
            }
            b'\r' | b'\n' if self.in_frame => {
                let frame = core::mem::take(&mut self.pending);
                self.in_frame = false;
                if self.queue.push_back(frame).is_err() {
                    self.stats.frames_dropped = self.stats.frames_dropped.wrapping_add(1);
                } else {
                    self.stats.frames_completed = self.stats.frames_completed.wrapping_add(1);
                }
            }
            _ if self.in_frame => {
                if self.pending.push(byte).is_err() {
                    // No end-of-line within the length limit: abandon the
                    // accumulation and wait for the next start marker.
                    self.stats.overflows = self.stats.overflows.wrapping_add(1);
                    self.pending.clear();
                    self.in_frame = false;
                }
            }
            _ => {
                self.stats.bytes_discarded = self.stats.bytes_discarded.wrapping_add(1);
            }
        }
    }

    /// Remove and return the oldest completed frame, if any
    ///
    /// Never waits; an empty queue simply yields `None`.
    pub fn take_ready(&mut self) -> Option<RawFrame> {
        self.queue.pop_front()
    }

    /// Number of completed frames waiting to be taken
    pub fn ready(&self) -> usize {
        self.queue.len()
    }

    /// Snapshot of the diagnostics counters
    pub fn stats(&self) -> AssemblerStats {
        self.stats
    }

    /// Discard all buffered state, including queued frames
    ///
    /// Counters are preserved.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.in_frame = false;
        while self.queue.pop_front().is_some() {}
    }
}
