use core::fmt;

use crate::reader::ParseError;

#[doc = r#"
A single 7-bit MIDI data byte.

Every payload byte of a channel-voice event is interpreted as a 7-bit
number; the top bit distinguishes data from status bytes on the wire.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// Create a new data byte, checking that the top bit is clear.
    pub const fn new(byte: u8) -> Result<Self, ParseError> {
        if byte > 0x7F {
            return Err(ParseError::InvalidDataByte(byte));
        }
        Ok(Self(byte))
    }

    /// Create a data byte by masking off the top bit.
    ///
    /// Decoding uses this form: the wire format does not promise clean
    /// data bytes and the original seven bits are all that matter.
    pub const fn new_lossy(byte: u8) -> Self {
        Self(byte & 0x7F)
    }

    /// The underlying value, 0..=127.
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DataByte {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ParseError;
    fn try_from(byte: u8) -> Result<Self, ParseError> {
        Self::new(byte)
    }
}

#[doc = r#"
A note-on or note-off extracted from a track.

This is the record the per-track collector accumulates: pitch and
direction only. Velocity and channel are visible on the originating
[`VoiceEvent`](crate::message::VoiceEvent) but are not retained here.

Note that a note-on with velocity 0 is recorded as a note-on, even though
many files use it as a note-off by convention. Callers relying on that
convention must pair notes themselves.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    number: DataByte,
    on: bool,
}

impl Note {
    /// A key being pressed.
    pub const fn on(number: DataByte) -> Self {
        Self { number, on: true }
    }

    /// A key being released.
    pub const fn off(number: DataByte) -> Self {
        Self { number, on: false }
    }

    /// The note number, 0..=127. Middle C is 60.
    pub const fn number(&self) -> u8 {
        self.number.0
    }

    /// True for note-on, false for note-off.
    pub const fn is_on(&self) -> bool {
        self.on
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}",
            if self.on { "on" } else { "off" },
            self.number.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn data_byte_rejects_status_range() {
        assert_eq!(DataByte::new(0x7F).unwrap().value(), 127);
        assert_eq!(
            DataByte::new(0x80).unwrap_err(),
            ParseError::InvalidDataByte(0x80)
        );
        assert_eq!(DataByte::new_lossy(0x80).value(), 0);
        assert_eq!(DataByte::new_lossy(0xFF).value(), 0x7F);
    }

    #[test]
    fn note_accessors() {
        let note = Note::on(DataByte::new_lossy(60));
        assert!(note.is_on());
        assert_eq!(note.number(), 60);
        assert_eq!(Note::off(DataByte::new_lossy(60)).is_on(), false);
    }
}
