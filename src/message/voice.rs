use core::fmt;

use num_enum::TryFromPrimitive;

use crate::{
    note::DataByte,
    reader::{ParseError, ReadResult, Reader, inv_data},
};

/// The upper status nibble of each channel-voice event family.
///
/// Values mirror the wire encoding, so a status byte's top nibble converts
/// directly with `VoiceKind::try_from(status >> 4)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VoiceKind {
    /// `0x8n`: key released
    NoteOff = 0x8,
    /// `0x9n`: key pressed
    NoteOn = 0x9,
    /// `0xAn`: per-key pressure
    PolyAftertouch = 0xA,
    /// `0xBn`: controller change
    Controller = 0xB,
    /// `0xCn`: patch select
    ProgramChange = 0xC,
    /// `0xDn`: whole-channel pressure
    ChannelAftertouch = 0xD,
    /// `0xEn`: pitch wheel
    PitchBend = 0xE,
}

/// A MIDI channel, 0..=15, from the low nibble of a status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel(u8);

impl Channel {
    /// Create a channel from the low nibble of a byte.
    pub const fn from_status(status: u8) -> Self {
        Self(status & 0x0F)
    }

    /// The zero-based channel number.
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A channel-voice event and its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Key released
    NoteOff {
        /// Which key
        note: DataByte,
        /// Release velocity
        velocity: DataByte,
    },
    /// Key pressed.
    ///
    /// A velocity of 0 is surfaced as-is, not reinterpreted as a note-off.
    NoteOn {
        /// Which key
        note: DataByte,
        /// Strike velocity
        velocity: DataByte,
    },
    /// Pressure applied to one held key
    PolyAftertouch {
        /// Which key
        note: DataByte,
        /// Pressure amount
        amount: DataByte,
    },
    /// Controller change
    Controller {
        /// Controller number
        controller: DataByte,
        /// New controller value
        value: DataByte,
    },
    /// Patch select
    ProgramChange {
        /// Program number
        program: DataByte,
    },
    /// Pressure applied across the whole channel
    ChannelAftertouch {
        /// Pressure amount
        amount: DataByte,
    },
    /// Pitch wheel position, as its raw two 7-bit halves
    PitchBend {
        /// Low 7 bits
        lsb: DataByte,
        /// High 7 bits
        msb: DataByte,
    },
}

impl VoiceEvent {
    /// The 14-bit pitch-bend value, if this is a pitch-bend event.
    pub const fn bend(&self) -> Option<u16> {
        match self {
            Self::PitchBend { lsb, msb } => Some(((msb.0 as u16) << 7) | lsb.0 as u16),
            _ => None,
        }
    }
}

/// A channel-voice event tagged with its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceEvent {
    channel: Channel,
    event: VoiceEvent,
}

impl ChannelVoiceEvent {
    /// Create an event on a channel.
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// The channel this event addresses.
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The event itself.
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// Decode the payload of a channel-voice event whose status byte has
    /// already been consumed.
    ///
    /// Note-on and note-off carry note number and velocity; aftertouch,
    /// controller and pitch-bend carry two bytes; program change and
    /// channel aftertouch carry one.
    pub(crate) fn read(status: u8, reader: &mut Reader<'_>) -> ReadResult<Self> {
        let kind = VoiceKind::try_from(status >> 4)
            .map_err(|_| inv_data(reader, ParseError::UnknownStatusByte(status)))?;
        let channel = Channel::from_status(status);

        let event = match kind {
            VoiceKind::NoteOff => VoiceEvent::NoteOff {
                note: DataByte::new_lossy(reader.read_byte()?),
                velocity: DataByte::new_lossy(reader.read_byte()?),
            },
            VoiceKind::NoteOn => VoiceEvent::NoteOn {
                note: DataByte::new_lossy(reader.read_byte()?),
                velocity: DataByte::new_lossy(reader.read_byte()?),
            },
            VoiceKind::PolyAftertouch => VoiceEvent::PolyAftertouch {
                note: DataByte::new_lossy(reader.read_byte()?),
                amount: DataByte::new_lossy(reader.read_byte()?),
            },
            VoiceKind::Controller => VoiceEvent::Controller {
                controller: DataByte::new_lossy(reader.read_byte()?),
                value: DataByte::new_lossy(reader.read_byte()?),
            },
            VoiceKind::ProgramChange => VoiceEvent::ProgramChange {
                program: DataByte::new_lossy(reader.read_byte()?),
            },
            VoiceKind::ChannelAftertouch => VoiceEvent::ChannelAftertouch {
                amount: DataByte::new_lossy(reader.read_byte()?),
            },
            VoiceKind::PitchBend => VoiceEvent::PitchBend {
                lsb: DataByte::new_lossy(reader.read_byte()?),
                msb: DataByte::new_lossy(reader.read_byte()?),
            },
        };

        Ok(Self { channel, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nibble_table_round_trips() {
        assert_eq!(VoiceKind::try_from(0x8).unwrap(), VoiceKind::NoteOff);
        assert_eq!(VoiceKind::try_from(0xE).unwrap(), VoiceKind::PitchBend);
        assert!(VoiceKind::try_from(0x7).is_err());
        assert!(VoiceKind::try_from(0xF).is_err());
    }

    #[test]
    fn reads_two_byte_payload() {
        let mut reader = Reader::from_byte_slice(&[60, 100]);
        let event = ChannelVoiceEvent::read(0x93, &mut reader).unwrap();
        assert_eq!(event.channel().value(), 3);
        assert_eq!(
            *event.event(),
            VoiceEvent::NoteOn {
                note: DataByte::new_lossy(60),
                velocity: DataByte::new_lossy(100),
            }
        );
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reads_one_byte_payload() {
        let mut reader = Reader::from_byte_slice(&[12]);
        let event = ChannelVoiceEvent::read(0xC0, &mut reader).unwrap();
        assert_eq!(
            *event.event(),
            VoiceEvent::ProgramChange {
                program: DataByte::new_lossy(12)
            }
        );
    }

    #[test]
    fn pitch_bend_value_combines_halves() {
        let mut reader = Reader::from_byte_slice(&[0x00, 0x40]);
        let event = ChannelVoiceEvent::read(0xE0, &mut reader).unwrap();
        // center position
        assert_eq!(event.event().bend(), Some(0x2000));
    }
}
