//! NMEA 0183 framing and sentence decoding
//!
//! This crate is the receive path of the Tessera GNSS module driver: it
//! turns the raw, arbitrarily-chunked byte stream coming out of a UART into
//! checksum-verified, semantically decoded navigation sentences.
//!
//! # Wire format
//!
//! ```text
//! ┌───┬──────────────────────────────┬───┬────────┬──────┐
//! │ $ │ GPRMC,123519,A,4807.038,N,…  │ * │ 6A     │ \r\n │
//! │   │ comma-separated payload      │   │ 2 hex  │      │
//! └───┴──────────────────────────────┴───┴────────┴──────┘
//! ```
//!
//! The checksum is the XOR of every payload byte between `$` and `*`. The
//! payload's first field is a five-character identifier: a two-character
//! talker ID (`GP`, `GN`, …) followed by a three-character sentence type
//! (`RMC`, `GGA`, …).
//!
//! # Pipeline
//!
//! Two pieces meet at an explicit frame queue, so the producer side (the
//! UART byte-arrival path) and the consumer side never wait on each other:
//!
//! 1. [`FrameAssembler`] — `feed()` raw chunks in, complete delimiter-
//!    stripped frames out via `take_ready()`. Content-agnostic.
//! 2. [`decode`] — validates one frame's checksum and parses it into a
//!    typed [`Sentence`], or reports a [`DecodeError`].
//!
//! The same [`checksum`] function signs outbound commands; see
//! [`encode_command`].

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod assembler;
pub mod command;
pub mod sentence;

pub use assembler::{AssemblerStats, FrameAssembler, RawFrame, FRAME_QUEUE_DEPTH};
pub use command::{encode_command, CommandError, MAX_COMMAND_LEN};
pub use sentence::{
    checksum, decode, Coordinate, Date, DecodeError, FixQuality, FixStatus, GenericSentence,
    GgaData, GllData, Hemisphere, RmcData, Sentence, Talker, UtcTime, VtgData,
};

/// Sentence start marker
pub const START_MARKER: u8 = b'$';

/// Separator between the payload and the two checksum hex digits
pub const CHECKSUM_DELIMITER: u8 = b'*';

/// Separator between payload fields
pub const FIELD_SEPARATOR: u8 = b',';

/// Maximum accepted sentence length between the delimiters
///
/// NMEA 0183 caps a sentence at 82 characters; the margin covers devices
/// that emit slightly oversized proprietary sentences.
pub const MAX_SENTENCE_LEN: usize = 100;
