#![doc = r#"
Structured track events.

Each decoded event is a [`TrackEvent`]: the delta-time that preceded it
and a [`TrackMessage`], the three-way split the file format itself makes:

```text
           |--------------|
           | TrackMessage |
           |--------------|
          /       |        \
|--------------| |------| |-----------------|
| ChannelVoice | | Meta | | SystemExclusive |
|--------------| |------| |-----------------|
```
"#]

mod voice;
pub use voice::*;

use crate::{
    bytes::read_vlq,
    file::MetaEvent,
    reader::{ReadResult, Reader},
};

/// A decoded track event: a delta-time and the message that followed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEvent<'a> {
    delta: u32,
    message: TrackMessage<'a>,
}

impl<'a> TrackEvent<'a> {
    /// Create an event from its parts.
    pub const fn new(delta: u32, message: TrackMessage<'a>) -> Self {
        Self { delta, message }
    }

    /// Ticks elapsed since the previous event in the same track.
    pub const fn delta(&self) -> u32 {
        self.delta
    }

    /// The message itself.
    pub const fn message(&self) -> &TrackMessage<'a> {
        &self.message
    }
}

/// The set of possible track messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMessage<'a> {
    /// A channel-voice message
    ChannelVoice(ChannelVoiceEvent),
    /// A meta message (status `0xFF`)
    Meta(MetaEvent<'a>),
    /// A system-exclusive message (status `0xF0`/`0xF7`)
    SystemExclusive(SysExEvent<'a>),
}

impl From<ChannelVoiceEvent> for TrackMessage<'_> {
    fn from(value: ChannelVoiceEvent) -> Self {
        Self::ChannelVoice(value)
    }
}

impl<'a> From<MetaEvent<'a>> for TrackMessage<'a> {
    fn from(value: MetaEvent<'a>) -> Self {
        Self::Meta(value)
    }
}

impl<'a> From<SysExEvent<'a>> for TrackMessage<'a> {
    fn from(value: SysExEvent<'a>) -> Self {
        Self::SystemExclusive(value)
    }
}

/// Whether a sysex event opened a transmission or continued/closed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SysExKind {
    /// Status `0xF0`
    Start,
    /// Status `0xF7`
    Continuation,
}

/// A system-exclusive payload, carried opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysExEvent<'a> {
    kind: SysExKind,
    prefix: u8,
    data: &'a [u8],
}

impl<'a> SysExEvent<'a> {
    /// Whether this event started or continued a transmission.
    pub const fn kind(&self) -> SysExKind {
        self.kind
    }

    /// The single byte between the status and the length prefix.
    ///
    /// The track layout this decoder reads places one byte ahead of the
    /// encoded length; it belongs to the length-prefix region, not the
    /// payload.
    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The vendor-defined payload. Never interpreted here.
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Decode a sysex event whose status byte has already been consumed:
    /// one prefix byte, then a variable-length payload length, then the
    /// payload itself.
    pub(crate) fn read(status: u8, reader: &mut Reader<'a>) -> ReadResult<Self> {
        let kind = if status == 0xF0 {
            SysExKind::Start
        } else {
            SysExKind::Continuation
        };
        let prefix = reader.read_byte()?;
        let length = read_vlq(reader)? as usize;
        let data = reader.read_bytes(length)?;
        Ok(Self { kind, prefix, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sysex_consumes_prefix_length_and_payload() {
        let bytes = [0x7E, 0x03, 0x01, 0x02, 0x03, 0xAA];
        let mut reader = Reader::from_byte_slice(&bytes);
        let event = SysExEvent::read(0xF0, &mut reader).unwrap();
        assert_eq!(event.kind(), SysExKind::Start);
        assert_eq!(event.prefix(), 0x7E);
        assert_eq!(event.data(), &[0x01, 0x02, 0x03]);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn sysex_continuation_status() {
        let bytes = [0x00, 0x00];
        let mut reader = Reader::from_byte_slice(&bytes);
        let event = SysExEvent::read(0xF7, &mut reader).unwrap();
        assert_eq!(event.kind(), SysExKind::Continuation);
        assert_eq!(event.data(), &[] as &[u8]);
    }
}
