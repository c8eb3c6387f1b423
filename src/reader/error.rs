use super::Reader;
use thiserror::Error;

#[doc = r#"
An error produced while decoding a MIDI byte source.

Carries the byte offset at which the read failed alongside the error kind.
"#]
#[derive(Debug, Error)]
#[error("reading at position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// Structural decoding errors
    #[error("parsing {0}")]
    Parse(#[from] ParseError),
    /// The byte source ran out mid-read.
    #[error("unexpected end of data")]
    EndOfData,
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True if the byte source was exhausted mid-read
    pub const fn is_end_of_data(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::EndOfData)
    }

    /// Create a new structural decoding error
    pub const fn parse_error(position: usize, error: ParseError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Parse(error),
        }
    }

    /// Create a new end-of-data error
    pub const fn end_of_data(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::EndOfData,
        }
    }

    /// True if the error invalidates the rest of the file, not just the
    /// track it occurred in.
    ///
    /// A bad chunk tag, a runaway variable-length quantity or a track
    /// opening on a data byte means the structure itself can no longer be
    /// trusted, so no later boundary is reliable either.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            ReaderErrorKind::Parse(
                ParseError::UnexpectedChunkTag { .. }
                    | ParseError::VlqOverrun
                    | ParseError::UnsupportedFormat(_)
                    | ParseError::MissingRunningStatus(_)
            )
        )
    }
}

/// A structural decoding error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A chunk started with the wrong 4-byte tag.
    #[error("expected chunk tag {expected:?}, found {found:?}")]
    UnexpectedChunkTag {
        /// The tag mandated at this point in the file
        expected: [u8; 4],
        /// The four bytes actually present
        found: [u8; 4],
    },
    /// A variable-length quantity ran past the 4-byte standard maximum.
    #[error("variable-length quantity exceeds 4 bytes")]
    VlqOverrun,
    /// The header's format word was not 0, 1 or 2.
    #[error("unsupported file format {0}")]
    UnsupportedFormat(u16),
    /// A data byte appeared in status position before any status byte.
    #[error("data byte {0:#04x} in status position with no running status")]
    MissingRunningStatus(u8),
    /// A status byte outside the set this decoder understands.
    #[error("unknown status byte {0:#04x}")]
    UnknownStatusByte(u8),
    /// A fixed-size meta event declared the wrong payload length.
    #[error("meta event {kind:#04x} declared {found} payload bytes, expected {expected}")]
    MetaLength {
        /// The meta-type byte
        kind: u8,
        /// The payload size that type requires
        expected: usize,
        /// The length the event actually declared
        found: usize,
    },
    /// A byte expected to carry 7-bit data had its top bit set.
    #[error("expected data byte, found {0:#04x}")]
    InvalidDataByte(u8),
    /// SMPTE field errors
    #[error("smpte {0}")]
    Smpte(#[from] SmpteError),
}

/// An out-of-range field in SMPTE timing data.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SmpteError {
    /// Header division frame rate other than -24, -25, -29 or -30
    #[error("invalid header frame rate {0}")]
    HeaderFrameRate(i8),
    /// Offset frame-rate bits outside 0..=3
    #[error("invalid offset frame rate bits {0}")]
    OffsetFrameRate(u8),
    /// Offset payload of the wrong size
    #[error("offset length {0}, expected 5")]
    Length(usize),
    /// Hour greater than 23
    #[error("hour out of range: {0}")]
    Hour(u8),
    /// Minute greater than 59
    #[error("minute out of range: {0}")]
    Minute(u8),
    /// Second greater than 59
    #[error("second out of range: {0}")]
    Second(u8),
    /// Subframe greater than 99
    #[error("subframe out of range: {0}")]
    Subframe(u8),
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

pub(crate) fn inv_data(reader: &Reader<'_>, v: impl Into<ParseError>) -> ReaderError {
    ReaderError::parse_error(reader.buffer_position(), v.into())
}
