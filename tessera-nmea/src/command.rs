//! Outbound command construction.
//!
//! Commands travel the same wire format as received sentences: the body is
//! wrapped in `$` … `*HH\r\n` with the checksum computed over the body
//! bytes, rendered as two uppercase hex digits.

use core::fmt::Write;

use heapless::String;

use crate::sentence::checksum;
use crate::MAX_SENTENCE_LEN;

/// Maximum encoded command length: `$` + body + `*HH` + CR LF
pub const MAX_COMMAND_LEN: usize = MAX_SENTENCE_LEN + 6;

/// Errors that can occur while encoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Body does not fit within `MAX_SENTENCE_LEN`
    BodyTooLong,
    /// Body contains a delimiter byte (`$`, `*`, CR, or LF)
    InvalidBody,
}

/// Encode a command body into a complete, checksum-signed wire string
///
/// ```
/// use tessera_nmea::encode_command;
///
/// let cmd = encode_command("PMTK251,38400").unwrap();
/// assert_eq!(cmd.as_str(), "$PMTK251,38400*27\r\n");
/// ```
pub fn encode_command(body: &str) -> Result<String<MAX_COMMAND_LEN>, CommandError> {
    if body.len() > MAX_SENTENCE_LEN {
        return Err(CommandError::BodyTooLong);
    }
    if body
        .bytes()
        .any(|b| matches!(b, b'$' | b'*' | b'\r' | b'\n'))
    {
        return Err(CommandError::InvalidBody);
    }

    let mut out = String::new();
    // Capacity is MAX_SENTENCE_LEN + 6 and the body length is checked above.
    write!(out, "${}*{:02X}\r\n", body, checksum(body.as_bytes()))
        .map_err(|_| CommandError::BodyTooLong)?;
    Ok(out)
}
