#![doc = r#"
Track chunks and the per-track event decoder.

The decoder is a small state machine that repeats delta-time, status,
payload until it observes the end-of-track meta event or exhausts the
chunk's declared length. Running status is the one piece of state carried
across iterations: a data byte found where a status byte belongs means the
event reuses the previous status, and the byte is pushed back so the
payload readers see it again.
"#]

use crate::{
    bytes::{read_vlq, u32_from_be},
    file::MetaEvent,
    message::{ChannelVoiceEvent, SysExEvent, TrackEvent, TrackMessage, VoiceEvent},
    note::Note,
    reader::{ParseError, ReadResult, Reader, ReaderError, inv_data},
    sink::EventSink,
};

/// The 4-byte tag opening every track chunk.
pub(crate) const TRACK_TAG: [u8; 4] = *b"MTrk";

/// The 8-byte header preceding a track chunk body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackChunkHeader {
    length: u32,
}

impl TrackChunkHeader {
    /// The declared byte length of the chunk body.
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Read a track chunk header: the `MTrk` tag and a big-endian length.
    /// A mismatched tag means chunk framing is lost and aborts the parse.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let tag = reader.read_exact::<4>()?;
        if tag != TRACK_TAG {
            return Err(inv_data(
                reader,
                ParseError::UnexpectedChunkTag {
                    expected: TRACK_TAG,
                    found: tag,
                },
            ));
        }
        let length = u32_from_be(reader.read_exact::<4>()?);
        Ok(Self { length })
    }
}

/// What decoding one track chunk produced.
///
/// `notes` holds everything collected up to the point the track completed
/// or faulted, so the per-track result always lines up with its chunk.
#[derive(Debug)]
pub(crate) struct DecodedTrack {
    pub(crate) notes: Vec<Note>,
    pub(crate) fault: Option<ReaderError>,
}

/// Decodes one track chunk body from a cursor scoped to its declared
/// length.
pub(crate) struct TrackDecoder<'a> {
    reader: Reader<'a>,
    /// Most recently seen real status byte. Absent until the track's
    /// first status byte arrives.
    running_status: Option<u8>,
    notes: Vec<Note>,
}

impl<'a> TrackDecoder<'a> {
    pub(crate) fn new(reader: Reader<'a>) -> Self {
        Self {
            reader,
            running_status: None,
            notes: Vec::new(),
        }
    }

    /// Run the decode loop to completion.
    ///
    /// Errors that only poison this track become the returned `fault`;
    /// errors that poison the whole file's framing propagate as `Err`.
    pub(crate) fn run<S: EventSink>(
        mut self,
        track: u16,
        sink: &mut S,
    ) -> Result<DecodedTrack, ReaderError> {
        loop {
            // running out of declared bytes at an event boundary is an
            // implicit, non-fatal end of track
            if self.reader.remaining() == 0 {
                break;
            }
            let event = match self.next_event() {
                Ok(event) => event,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    return Ok(DecodedTrack {
                        notes: self.notes,
                        fault: Some(e),
                    });
                }
            };

            if let TrackMessage::ChannelVoice(voice) = event.message() {
                match voice.event() {
                    VoiceEvent::NoteOn { note, .. } => self.notes.push(Note::on(*note)),
                    VoiceEvent::NoteOff { note, .. } => self.notes.push(Note::off(*note)),
                    _ => {}
                }
            }
            let end = matches!(event.message(), TrackMessage::Meta(m) if m.is_end_of_track());
            sink.event(track, &event);
            if end {
                break;
            }
        }
        Ok(DecodedTrack {
            notes: self.notes,
            fault: None,
        })
    }

    /// One iteration of the state machine: delta-time, status, payload.
    fn next_event(&mut self) -> ReadResult<TrackEvent<'a>> {
        let delta = read_vlq(&mut self.reader)?;

        let byte = self.reader.read_byte()?;
        let status = if byte < 0x80 {
            // not a status byte but the first payload byte of an event
            // reusing the previous status; rewind so the payload reader
            // consumes it again
            self.reader.push_back(1);
            self.running_status
                .ok_or_else(|| inv_data(&self.reader, ParseError::MissingRunningStatus(byte)))?
        } else {
            self.running_status = Some(byte);
            byte
        };

        let message = match status {
            0x80..=0xEF => {
                TrackMessage::ChannelVoice(ChannelVoiceEvent::read(status, &mut self.reader)?)
            }
            0xFF => TrackMessage::Meta(MetaEvent::read(&mut self.reader)?),
            0xF0 | 0xF7 => {
                TrackMessage::SystemExclusive(SysExEvent::read(status, &mut self.reader)?)
            }
            other => return Err(inv_data(&self.reader, ParseError::UnknownStatusByte(other))),
        };

        Ok(TrackEvent::new(delta, message))
    }
}
