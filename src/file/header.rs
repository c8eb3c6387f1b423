use crate::{
    bytes::{u16_from_be, u32_from_be},
    file::SmpteFps,
    reader::{ParseError, ReadResult, Reader, SmpteError, inv_data},
};

/// The 4-byte tag opening the header chunk.
pub(crate) const HEADER_TAG: [u8; 4] = *b"MThd";

#[doc = r#"
The decoded header chunk of a MIDI file.

Fixed 14-byte layout: the `MThd` tag, a 4-byte length (6 for every file in
the wild, read but not enforced), then format, track count and division,
each a big-endian 16-bit word.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format: Format,
    track_count: u16,
    timing: Timing,
}

impl Header {
    /// Create a header from its parts.
    pub const fn new(format: Format, track_count: u16, timing: Timing) -> Self {
        Self {
            format,
            track_count,
            timing,
        }
    }

    /// How the file's tracks relate to each other.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// The number of track chunks the file declares.
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// How delta-time ticks are to be interpreted.
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    /// Read the header chunk. A tag other than `MThd` is reported, not
    /// silently ignored, and aborts the parse.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let tag = reader.read_exact::<4>()?;
        if tag != HEADER_TAG {
            return Err(inv_data(
                reader,
                ParseError::UnexpectedChunkTag {
                    expected: HEADER_TAG,
                    found: tag,
                },
            ));
        }
        // always 6 in practice; trusting the three fixed fields below
        // over this value costs nothing
        let _length = u32_from_be(reader.read_exact::<4>()?);

        let format = Format::from_word(u16_from_be(reader.read_exact::<2>()?))
            .map_err(|e| inv_data(reader, e))?;
        let track_count = u16_from_be(reader.read_exact::<2>()?);
        let timing =
            Timing::from_division(reader.read_exact::<2>()?).map_err(|e| inv_data(reader, e))?;

        Ok(Self {
            format,
            track_count,
            timing,
        })
    }
}

/// The relationship between a file's tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// Format 0: one track carrying every channel
    SingleMultiChannel,
    /// Format 1: tracks played together
    Simultaneous,
    /// Format 2: independent single-track patterns
    SequentiallyIndependent,
}

impl Format {
    const fn from_word(word: u16) -> Result<Self, ParseError> {
        match word {
            0 => Ok(Self::SingleMultiChannel),
            1 => Ok(Self::Simultaneous),
            2 => Ok(Self::SequentiallyIndependent),
            other => Err(ParseError::UnsupportedFormat(other)),
        }
    }
}

/// The header timing type.
///
/// The division word's top bit picks the interpretation: clear means
/// ticks per quarter note, set means SMPTE frames per second (as a
/// negative two's-complement byte) with ticks per frame in the low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// Delta times count fractions of a quarter note
    TicksPerQuarterNote(u16),
    /// Delta times count fractions of an SMPTE frame
    Smpte {
        /// Frames per second
        fps: SmpteFps,
        /// Ticks within each frame
        ticks_per_frame: u8,
    },
}

impl Timing {
    const fn from_division(bytes: [u8; 2]) -> Result<Self, ParseError> {
        if bytes[0] >> 7 == 0 {
            return Ok(Self::TicksPerQuarterNote(u16_from_be(bytes) & 0x7FFF));
        }
        let fps = match bytes[0] as i8 {
            -24 => SmpteFps::TwentyFour,
            -25 => SmpteFps::TwentyFive,
            // drop frame (29.97)
            -29 => SmpteFps::TwentyNine,
            -30 => SmpteFps::Thirty,
            other => return Err(ParseError::Smpte(SmpteError::HeaderFrameRate(other))),
        };
        Ok(Self::Smpte {
            fps,
            ticks_per_frame: bytes[1],
        })
    }

    /// Returns Some if delta times are defined as ticks per quarter note.
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(*t),
            _ => None,
        }
    }
}
