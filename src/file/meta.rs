#![doc = r#"
Meta events: track-only messages carrying file metadata.

A meta event is laid out as `0xFF <type> <length:vlq> <payload>`. The
fixed-size types get small validated structs; text-bearing types carry
their raw bytes (rendering them as text is the presentation layer's
business); types this decoder does not recognize are preserved opaquely so
their exact declared length is still consumed.
"#]

use num_enum::TryFromPrimitive;

use crate::{
    bytes::{read_vlq, u16_from_be},
    reader::{ParseError, ReadResult, Reader, SmpteError, inv_data},
};

/// The meta-type bytes this decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MetaKind {
    /// `0x00`, 2 bytes: sequence number
    SequenceNumber = 0x00,
    /// `0x01`, variable: free text
    Text = 0x01,
    /// `0x02`, variable: copyright notice
    Copyright = 0x02,
    /// `0x03`, variable: sequence/track name
    TrackName = 0x03,
    /// `0x04`, variable: instrument name
    InstrumentName = 0x04,
    /// `0x05`, variable: lyric
    Lyric = 0x05,
    /// `0x06`, variable: marker
    Marker = 0x06,
    /// `0x07`, variable: cue point
    CuePoint = 0x07,
    /// `0x20`, 1 byte: MIDI channel prefix
    ChannelPrefix = 0x20,
    /// `0x2F`, 0 bytes: end of track
    EndOfTrack = 0x2F,
    /// `0x51`, 3 bytes: tempo in microseconds per quarter note
    SetTempo = 0x51,
    /// `0x54`, 5 bytes: SMPTE offset
    SmpteOffset = 0x54,
    /// `0x58`, 4 bytes: time signature
    TimeSignature = 0x58,
    /// `0x59`, 2 bytes: key signature
    KeySignature = 0x59,
    /// `0x7F`, variable: sequencer-specific data
    SequencerSpecific = 0x7F,
}

/// A decoded meta event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaEvent<'a> {
    /// Position of this sequence in a multi-sequence collection
    SequenceNumber(u16),
    /// Free text
    Text(&'a [u8]),
    /// Copyright notice
    Copyright(&'a [u8]),
    /// Sequence or track name
    TrackName(&'a [u8]),
    /// Instrument name
    InstrumentName(&'a [u8]),
    /// Lyric syllable
    Lyric(&'a [u8]),
    /// Rehearsal or section marker
    Marker(&'a [u8]),
    /// Cue point
    CuePoint(&'a [u8]),
    /// Channel all following metas apply to
    ChannelPrefix(u8),
    /// Terminates the track
    EndOfTrack,
    /// Tempo change
    Tempo(Tempo),
    /// Absolute SMPTE start time for the track
    SmpteOffset(SmpteOffset),
    /// Time signature change
    TimeSignature(TimeSignature),
    /// Key signature change
    KeySignature(KeySignature),
    /// Sequencer-specific payload, opaque
    SequencerSpecific(&'a [u8]),
    /// A meta type this decoder does not know. Skipped, never an error.
    Unknown {
        /// The meta-type byte
        kind: u8,
        /// The payload, consumed to its exact declared length
        data: &'a [u8],
    },
}

impl<'a> MetaEvent<'a> {
    /// True for the end-of-track marker.
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self, Self::EndOfTrack)
    }

    /// Decode a meta event whose `0xFF` status has already been consumed:
    /// one type byte, a variable-length payload length, then exactly that
    /// many payload bytes.
    pub(crate) fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let kind = reader.read_byte()?;
        let length = read_vlq(reader)? as usize;
        let data = reader.read_bytes(length)?;

        let Ok(known) = MetaKind::try_from(kind) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(kind, length, "skipping unrecognized meta event");
            return Ok(Self::Unknown { kind, data });
        };

        let event = match known {
            MetaKind::SequenceNumber => {
                Self::SequenceNumber(u16_from_be(fixed::<2>(reader, kind, data)?))
            }
            MetaKind::Text => Self::Text(data),
            MetaKind::Copyright => Self::Copyright(data),
            MetaKind::TrackName => Self::TrackName(data),
            MetaKind::InstrumentName => Self::InstrumentName(data),
            MetaKind::Lyric => Self::Lyric(data),
            MetaKind::Marker => Self::Marker(data),
            MetaKind::CuePoint => Self::CuePoint(data),
            MetaKind::ChannelPrefix => Self::ChannelPrefix(fixed::<1>(reader, kind, data)?[0]),
            // terminal regardless of payload, so a nonzero declared
            // length (already consumed) is tolerated
            MetaKind::EndOfTrack => Self::EndOfTrack,
            MetaKind::SetTempo => Self::Tempo(Tempo::from_bytes(fixed::<3>(reader, kind, data)?)),
            MetaKind::SmpteOffset => {
                Self::SmpteOffset(SmpteOffset::parse(data).map_err(|e| inv_data(reader, e))?)
            }
            MetaKind::TimeSignature => {
                Self::TimeSignature(TimeSignature::from_bytes(fixed::<4>(reader, kind, data)?))
            }
            MetaKind::KeySignature => {
                Self::KeySignature(KeySignature::from_bytes(fixed::<2>(reader, kind, data)?))
            }
            MetaKind::SequencerSpecific => Self::SequencerSpecific(data),
        };
        Ok(event)
    }
}

fn fixed<const N: usize>(reader: &Reader<'_>, kind: u8, data: &[u8]) -> ReadResult<[u8; N]> {
    if data.len() != N {
        return Err(inv_data(
            reader,
            ParseError::MetaLength {
                kind,
                expected: N,
                found: data.len(),
            },
        ));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(data);
    Ok(out)
}

/// A tempo, stored as microseconds per quarter note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo {
    micros_per_quarter_note: u32,
}

impl Tempo {
    /// Create a tempo from microseconds per quarter note.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self {
            micros_per_quarter_note,
        }
    }

    /// Decode the 3-byte big-endian payload of a set-tempo event.
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            micros_per_quarter_note: ((bytes[0] as u32) << 16)
                | ((bytes[1] as u32) << 8)
                | bytes[2] as u32,
        }
    }

    /// Microseconds per quarter note.
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.micros_per_quarter_note
    }

    /// Beats per minute. 500 000 µs/quarter is 120 BPM.
    ///
    /// A zero tempo payload yields 0 rather than dividing by zero.
    pub const fn bpm(&self) -> u32 {
        if self.micros_per_quarter_note == 0 {
            return 0;
        }
        60_000_000 / self.micros_per_quarter_note
    }
}

/// The 4-byte time-signature payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// Denominator as a power of two: 2 means a quarter note
    pub denominator_pow2: u8,
    /// MIDI clocks per metronome tick
    pub clocks_per_metronome: u8,
    /// Notated 32nd notes per 24 MIDI clocks
    pub thirty_seconds_per_24_clocks: u8,
}

impl TimeSignature {
    /// Decode the payload bytes in file order.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            numerator: bytes[0],
            denominator_pow2: bytes[1],
            clocks_per_metronome: bytes[2],
            thirty_seconds_per_24_clocks: bytes[3],
        }
    }

    /// The denominator as an ordinary number: 4 for x/4, 8 for x/8.
    pub const fn denominator(&self) -> u32 {
        2u32.saturating_pow(self.denominator_pow2 as u32)
    }
}

/// The 2-byte key-signature payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Sharps when positive, flats when negative
    pub sharps_flats: i8,
    /// True for a minor key
    pub minor: bool,
}

impl KeySignature {
    /// Decode the payload bytes in file order.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            sharps_flats: bytes[0] as i8,
            minor: bytes[1] != 0,
        }
    }
}

/// The possible FPS (Frames Per Second) values for SMPTE timing.
///
/// The file format defines only these four rates. "TwentyNine" is the
/// NTSC drop-frame rate, 30000/1001 fps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second, film
    TwentyFour,
    /// 25 frames per second, PAL/SECAM
    TwentyFive,
    /// 29.97 frames per second, NTSC drop-frame
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// The nominal integer rate used in division arithmetic.
    ///
    /// Drop-frame 29.97 returns 30 here, not 29.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// The precise rate, including the fractional drop-frame value.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

/// NTSC drop-frame rate: 29.97002997... fps
const DROP_FRAME: f64 = 30_000. / 1001.;

/// A track's absolute start position in SMPTE time code.
///
/// The 5-byte payload is `0rrhhhhh mm ss fr ff`: frame-rate bits and hour
/// packed into the first byte, then minute, second, frame and subframe
/// (hundredths of a frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate encoded with the offset
    pub fps: SmpteFps,
    /// Hour, 0..=23
    pub hour: u8,
    /// Minute, 0..=59
    pub minute: u8,
    /// Second, 0..=59
    pub second: u8,
    /// Frame within the second; the valid range depends on `fps`
    pub frame: u8,
    /// Hundredths of a frame, 0..=99
    pub subframe: u8,
}

impl SmpteOffset {
    /// Parse an offset from its 5-byte payload, range-checking each field.
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        if data.len() != 5 {
            return Err(SmpteError::Length(data.len()));
        }

        // 0 rr hhhhh
        let fps = match data[0] >> 5 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            3 => SmpteFps::Thirty,
            v => return Err(SmpteError::OffsetFrameRate(v)),
        };
        let hour = data[0] & 0b0001_1111;
        if hour > 23 {
            return Err(SmpteError::Hour(hour));
        }
        let minute = data[1];
        if minute > 59 {
            return Err(SmpteError::Minute(minute));
        }
        let second = data[2];
        if second > 59 {
            return Err(SmpteError::Second(second));
        }
        let frame = data[3];
        let subframe = data[4];
        if subframe > 99 {
            return Err(SmpteError::Subframe(subframe));
        }
        Ok(Self {
            fps,
            hour,
            minute,
            second,
            frame,
            subframe,
        })
    }

    /// The absolute position in microseconds at this offset's frame rate.
    pub const fn as_micros(&self) -> f64 {
        ((((self.hour as u64 * 3600) + (self.minute as u64) * 60 + self.second as u64) * 1_000_000)
            as f64)
            + ((self.frame as u64) * 1_000_000) as f64 / self.fps.as_f64()
            + ((self.subframe as u32) * 10_000) as f64 / self.fps.as_f64()
    }
}
