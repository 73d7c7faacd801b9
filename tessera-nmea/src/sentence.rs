//! Checksum validation and semantic decoding of one raw frame.
//!
//! [`decode`] takes the bytes between the start marker and the end-of-line
//! marker, verifies the trailing `*HH` checksum, and parses the payload
//! into a typed [`Sentence`]. Sentence types the decoder does not
//! specifically interpret come back as [`GenericSentence`] so that new
//! receiver firmware never turns into a hard error.
//!
//! A field left empty by the receiver (two consecutive commas) decodes to
//! `None`, never to a numeric zero: "no fix yet" and "fix at the equator"
//! are different answers.

use heapless::{String, Vec};

use crate::{CHECKSUM_DELIMITER, MAX_SENTENCE_LEN};

/// Maximum number of comma-separated fields in a recognized sentence
const MAX_FIELDS: usize = 16;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// No checksum delimiter found, or the payload is not valid text
    MalformedFrame,
    /// Checksum field is not exactly two hex digits
    InvalidChecksumFormat,
    /// Computed checksum does not match the transmitted one
    ChecksumMismatch,
    /// Recognized sentence type with the wrong number of fields
    FieldCountMismatch,
}

/// XOR checksum over a byte sequence
///
/// Computed over every byte strictly between the start marker and the
/// checksum delimiter. The same function verifies inbound sentences and
/// signs outbound commands.
pub fn checksum(data: &[u8]) -> u8 {
    let mut cs = 0u8;
    for &byte in data {
        cs ^= byte;
    }
    cs
}

/// Two-character talker ID prefixing a sentence type (`GP`, `GN`, `GL`, …)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Talker([u8; 2]);

impl Talker {
    fn from_ident(ident: &str) -> Self {
        let bytes = ident.as_bytes();
        Self([bytes[0], bytes[1]])
    }

    /// The talker ID as text
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or("")
    }
}

/// UTC time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UtcTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    /// Fractional seconds, in milliseconds
    pub millis: u16,
}

impl UtcTime {
    /// Parse an `hhmmss` or `hhmmss.sss` field
    fn parse(field: &str) -> Option<Self> {
        let bytes = field.as_bytes();
        if bytes.len() < 6 || !bytes[..6].iter().all(u8::is_ascii_digit) {
            return None;
        }
        let digit = |i: usize| bytes[i] - b'0';

        let mut millis = 0u16;
        if bytes.len() > 6 {
            if bytes[6] != b'.' {
                return None;
            }
            let mut scale = 100u16;
            for &byte in &bytes[7..] {
                if !byte.is_ascii_digit() {
                    return None;
                }
                if scale > 0 {
                    millis += (byte - b'0') as u16 * scale;
                    scale /= 10;
                }
            }
        }

        Some(Self {
            hours: digit(0) * 10 + digit(1),
            minutes: digit(2) * 10 + digit(3),
            seconds: digit(4) * 10 + digit(5),
            millis,
        })
    }
}

/// Calendar date as transmitted: two digits each of day, month, year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub day: u8,
    pub month: u8,
    /// Two-digit year as transmitted
    pub year: u8,
}

impl Date {
    /// Parse a `ddmmyy` field
    fn parse(field: &str) -> Option<Self> {
        let bytes = field.as_bytes();
        if bytes.len() != 6 || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let digit = |i: usize| bytes[i] - b'0';
        Some(Self {
            day: digit(0) * 10 + digit(1),
            month: digit(2) * 10 + digit(3),
            year: digit(4) * 10 + digit(5),
        })
    }

    /// Four-digit year, with years 80-99 mapped into the 1900s
    pub fn full_year(&self) -> u16 {
        if self.year >= 80 {
            1900 + self.year as u16
        } else {
            2000 + self.year as u16
        }
    }
}

/// Hemisphere letter attached to a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    fn parse(field: &str) -> Option<Self> {
        match field {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }
}

/// Latitude or longitude in the wire encoding: whole degrees plus decimal
/// minutes plus a hemisphere letter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    pub degrees: u16,
    pub minutes: f32,
    pub hemisphere: Hemisphere,
}

impl Coordinate {
    /// Parse a `ddmm.mmm` / `dddmm.mmm` value field and its hemisphere field
    ///
    /// Both fields must be present for the coordinate to exist.
    fn parse(value: &str, hemi: &str) -> Option<Self> {
        let hemisphere = Hemisphere::parse(hemi)?;
        // The split below indexes by byte; a corrupted field that slipped
        // past the 8-bit checksum must not land mid-character.
        if !value.is_ascii() {
            return None;
        }
        let int_len = value.find('.').unwrap_or(value.len());
        // At least one degree digit in front of the two minute digits
        if int_len < 3 {
            return None;
        }
        let split = int_len - 2;
        let degrees: u16 = value[..split].parse().ok()?;
        let minutes: f32 = value[split..].parse().ok()?;
        Some(Self {
            degrees,
            minutes,
            hemisphere,
        })
    }

    /// Signed decimal degrees (south and west negative)
    pub fn to_degrees(&self) -> f32 {
        let magnitude = self.degrees as f32 + self.minutes / 60.0;
        match self.hemisphere {
            Hemisphere::North | Hemisphere::East => magnitude,
            Hemisphere::South | Hemisphere::West => -magnitude,
        }
    }
}

/// RMC receiver status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixStatus {
    /// Data valid
    Active,
    /// Receiver warning, data invalid
    Void,
}

impl FixStatus {
    fn parse(field: &str) -> Option<Self> {
        match field {
            "A" => Some(FixStatus::Active),
            "V" => Some(FixStatus::Void),
            _ => None,
        }
    }
}

/// GGA fix quality indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixQuality {
    Invalid,
    Gps,
    Dgps,
    Pps,
    RtkFixed,
    RtkFloat,
    Estimated,
    Manual,
    Simulation,
}

impl FixQuality {
    fn parse(field: &str) -> Option<Self> {
        match field {
            "0" => Some(FixQuality::Invalid),
            "1" => Some(FixQuality::Gps),
            "2" => Some(FixQuality::Dgps),
            "3" => Some(FixQuality::Pps),
            "4" => Some(FixQuality::RtkFixed),
            "5" => Some(FixQuality::RtkFloat),
            "6" => Some(FixQuality::Estimated),
            "7" => Some(FixQuality::Manual),
            "8" => Some(FixQuality::Simulation),
            _ => None,
        }
    }
}

/// RMC - recommended minimum navigation data
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RmcData {
    pub talker: Talker,
    pub time: Option<UtcTime>,
    pub status: Option<FixStatus>,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub speed_knots: Option<f32>,
    pub course_deg: Option<f32>,
    pub date: Option<Date>,
    /// Magnetic variation in degrees, west negative
    pub magnetic_variation_deg: Option<f32>,
}

/// GGA - fix data
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GgaData {
    pub talker: Talker,
    pub time: Option<UtcTime>,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub quality: Option<FixQuality>,
    pub satellites_in_use: Option<u8>,
    pub hdop: Option<f32>,
    pub altitude_m: Option<f32>,
    pub geoid_separation_m: Option<f32>,
    pub dgps_age_s: Option<f32>,
    pub dgps_station_id: Option<u16>,
}

/// GLL - geographic position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GllData {
    pub talker: Talker,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub time: Option<UtcTime>,
    pub status: Option<FixStatus>,
}

/// VTG - track and ground speed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VtgData {
    pub talker: Talker,
    pub course_true_deg: Option<f32>,
    pub course_magnetic_deg: Option<f32>,
    pub speed_knots: Option<f32>,
    pub speed_kmh: Option<f32>,
}

/// A sentence type the decoder does not specifically interpret
///
/// Carries the checksum-verified payload text so callers can still get at
/// the raw fields.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GenericSentence {
    raw: String<MAX_SENTENCE_LEN>,
}

impl GenericSentence {
    /// The identifier field (everything before the first comma)
    pub fn ident(&self) -> &str {
        self.raw.split(',').next().unwrap_or("")
    }

    /// The raw field strings after the identifier
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.raw.split(',').skip(1)
    }

    /// The full payload text
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// A decoded, checksum-verified sentence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sentence {
    Rmc(RmcData),
    Gga(GgaData),
    Gll(GllData),
    Vtg(VtgData),
    Unknown(GenericSentence),
}

/// Decode one complete frame into a [`Sentence`]
///
/// `frame` holds the bytes strictly between the start marker and the
/// end-of-line marker, exactly as produced by the frame assembler.
pub fn decode(frame: &[u8]) -> Result<Sentence, DecodeError> {
    let delim = frame
        .iter()
        .rposition(|&b| b == CHECKSUM_DELIMITER)
        .ok_or(DecodeError::MalformedFrame)?;
    let payload = &frame[..delim];
    let digits = &frame[delim + 1..];

    if digits.len() != 2 {
        return Err(DecodeError::InvalidChecksumFormat);
    }
    let hi = hex_digit(digits[0]).ok_or(DecodeError::InvalidChecksumFormat)?;
    let lo = hex_digit(digits[1]).ok_or(DecodeError::InvalidChecksumFormat)?;
    let transmitted = (hi << 4) | lo;

    if checksum(payload) != transmitted {
        return Err(DecodeError::ChecksumMismatch);
    }

    let payload = core::str::from_utf8(payload).map_err(|_| DecodeError::MalformedFrame)?;
    let ident = payload.split(',').next().unwrap_or("");

    // Two-character talker + three-character sentence type. Anything else
    // (proprietary idents, future types) falls through to the generic path.
    if ident.len() == 5 && ident.bytes().all(|b| b.is_ascii_alphanumeric()) {
        let talker = Talker::from_ident(ident);
        match &ident[2..] {
            "RMC" => return parse_rmc(talker, payload),
            "GGA" => return parse_gga(talker, payload),
            "GLL" => return parse_gll(talker, payload),
            "VTG" => return parse_vtg(talker, payload),
            _ => {}
        }
    }

    let raw = String::try_from(payload).map_err(|_| DecodeError::MalformedFrame)?;
    Ok(Sentence::Unknown(GenericSentence { raw }))
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Split a payload into fields and enforce the expected arity
///
/// `max` is normally `min + 1` to tolerate the trailing mode field added in
/// NMEA 2.3.
fn split_fields(payload: &str, min: usize, max: usize) -> Result<Vec<&str, MAX_FIELDS>, DecodeError> {
    let mut fields = Vec::new();
    for field in payload.split(',') {
        fields
            .push(field)
            .map_err(|_| DecodeError::FieldCountMismatch)?;
    }
    if fields.len() < min || fields.len() > max {
        return Err(DecodeError::FieldCountMismatch);
    }
    Ok(fields)
}

/// Numeric field: empty or unparseable decodes as absent
fn num<T: core::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() {
        return None;
    }
    field.parse().ok()
}

fn parse_rmc(talker: Talker, payload: &str) -> Result<Sentence, DecodeError> {
    let f = split_fields(payload, 12, 13)?;

    let magnetic_variation_deg = match (num::<f32>(f[10]), f[11]) {
        (Some(value), "W") => Some(-value),
        (Some(value), _) => Some(value),
        (None, _) => None,
    };

    Ok(Sentence::Rmc(RmcData {
        talker,
        time: UtcTime::parse(f[1]),
        status: FixStatus::parse(f[2]),
        latitude: Coordinate::parse(f[3], f[4]),
        longitude: Coordinate::parse(f[5], f[6]),
        speed_knots: num(f[7]),
        course_deg: num(f[8]),
        date: Date::parse(f[9]),
        magnetic_variation_deg,
    }))
}

fn parse_gga(talker: Talker, payload: &str) -> Result<Sentence, DecodeError> {
    let f = split_fields(payload, 15, 15)?;

    Ok(Sentence::Gga(GgaData {
        talker,
        time: UtcTime::parse(f[1]),
        latitude: Coordinate::parse(f[2], f[3]),
        longitude: Coordinate::parse(f[4], f[5]),
        quality: FixQuality::parse(f[6]),
        satellites_in_use: num(f[7]),
        hdop: num(f[8]),
        altitude_m: num(f[9]),
        geoid_separation_m: num(f[11]),
        dgps_age_s: num(f[13]),
        dgps_station_id: num(f[14]),
    }))
}

fn parse_gll(talker: Talker, payload: &str) -> Result<Sentence, DecodeError> {
    let f = split_fields(payload, 7, 8)?;

    Ok(Sentence::Gll(GllData {
        talker,
        latitude: Coordinate::parse(f[1], f[2]),
        longitude: Coordinate::parse(f[3], f[4]),
        time: UtcTime::parse(f[5]),
        status: FixStatus::parse(f[6]),
    }))
}

fn parse_vtg(talker: Talker, payload: &str) -> Result<Sentence, DecodeError> {
    let f = split_fields(payload, 9, 10)?;

    Ok(Sentence::Vtg(VtgData {
        talker,
        course_true_deg: num(f[1]),
        course_magnetic_deg: num(f[3]),
        speed_knots: num(f[5]),
        speed_kmh: num(f[7]),
    }))
}
