#![doc = r#"
Parsing a whole MIDI file: header chunk, then track chunks in file order.

Each track body decodes from a cursor scoped to the chunk's declared
length, so a fault inside one track abandons only that track: the file
cursor is already positioned at the next chunk boundary and later tracks
decode normally. Faults that break chunk framing itself (a bad tag, a
runaway length quantity) abort the parse.
"#]

mod header;
pub use header::*;

mod track;
pub use track::*;

mod meta;
pub use meta::*;

use crate::{
    note::Note,
    reader::{ReadResult, Reader, ReaderError},
    sink::{DiscardEvents, EventSink},
};

#[doc = r#"
A decoded MIDI file: its header and the notes of every track.

Obtained from [`MidiFile::parse`]. A successful parse may still carry
per-track faults; [`MidiFile::is_complete`] distinguishes a fully decoded
file from a partial one.
"#]
#[derive(Debug)]
pub struct MidiFile {
    header: Header,
    track_notes: Vec<Vec<Note>>,
    faults: Vec<TrackFault>,
}

impl MidiFile {
    /// Parse a byte source, discarding the event stream.
    ///
    /// `Err` means a fatal fault: a bad header, broken chunk framing or a
    /// runaway length encoding. Per-track faults do not end up here; they
    /// are collected on the returned file.
    pub fn parse(bytes: &[u8]) -> Result<Self, ReaderError> {
        Self::parse_with_sink(bytes, &mut DiscardEvents)
    }

    /// Parse a byte source, forwarding every decoded event to `sink`.
    pub fn parse_with_sink<S: EventSink>(bytes: &[u8], sink: &mut S) -> Result<Self, ReaderError> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = Header::read(&mut reader)?;

        let mut track_notes = Vec::with_capacity(header.track_count() as usize);
        let mut faults = Vec::new();

        for track in 0..header.track_count() {
            match Self::decode_one_track(&mut reader, track, sink) {
                Ok(decoded) => {
                    if let Some(fault) = decoded.fault {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(track, %fault, "abandoning track after fault");
                        faults.push(TrackFault::new(track, fault));
                    }
                    track_notes.push(decoded.notes);
                }
                Err(fatal) => return Err(fatal),
            }
        }

        Ok(Self {
            header,
            track_notes,
            faults,
        })
    }

    fn decode_one_track<S: EventSink>(
        reader: &mut Reader<'_>,
        track: u16,
        sink: &mut S,
    ) -> ReadResult<DecodedTrack> {
        let chunk = match TrackChunkHeader::read(reader) {
            Ok(chunk) => chunk,
            Err(e) if e.is_fatal() => return Err(e),
            // no header to be had for this track; there is still a chance
            // the next declared track exists, so record and carry on
            Err(e) => {
                return Ok(DecodedTrack {
                    notes: Vec::new(),
                    fault: Some(e),
                });
            }
        };
        // scoping the body to the declared length is what lets a faulted
        // track leave the cursor at the next chunk boundary
        let body = reader.child(chunk.length() as usize);
        TrackDecoder::new(body).run(track, sink)
    }

    /// The decoded header.
    pub const fn header(&self) -> Header {
        self.header
    }

    /// The note sequences, one per track chunk, in file order.
    ///
    /// A faulted track contributes the notes decoded before its fault, so
    /// indices always line up with chunk order.
    pub fn track_notes(&self) -> &[Vec<Note>] {
        &self.track_notes
    }

    /// Consume the file, returning the per-track note sequences.
    pub fn into_track_notes(self) -> Vec<Vec<Note>> {
        self.track_notes
    }

    /// The tracks that faulted, if any.
    pub fn faults(&self) -> &[TrackFault] {
        &self.faults
    }

    /// True when every declared track decoded to its end without fault.
    pub fn is_complete(&self) -> bool {
        self.faults.is_empty()
    }
}

/// A fault that ended one track's decode early.
#[derive(Debug)]
pub struct TrackFault {
    track: u16,
    error: ReaderError,
}

impl TrackFault {
    pub(crate) const fn new(track: u16, error: ReaderError) -> Self {
        Self { track, error }
    }

    /// The index of the faulted track chunk.
    pub const fn track(&self) -> u16 {
        self.track
    }

    /// What went wrong.
    pub const fn error(&self) -> &ReaderError {
        &self.error
    }
}
