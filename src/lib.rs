#![doc = r#"
Streaming decoder for Standard MIDI Files that extracts per-track note
events.

`midinote` walks the byte stream of a `.mid` file chunk by chunk: the
fixed 14-byte header, then each length-prefixed track. Within a track it
reconstructs delta-timed events (including running status, where a status
byte is omitted and inherited from the previous event), hands every event
to an optional sink for logging, and collects note-on/note-off pairs into
one ordered sequence per track.

# Example

```rust
use midinote::prelude::*;

let bytes: Vec<u8> = vec![
    // header: format 0, one track, 96 ticks per quarter note
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    // track: note-on 60, note-off 60, end of track
    b'M', b'T', b'r', b'k', 0, 0, 0, 12,
    0x00, 0x90, 60, 100,
    0x60, 0x80, 60, 0,
    0x00, 0xFF, 0x2F, 0x00,
];

let file = MidiFile::parse(&bytes)?;
assert!(file.is_complete());
assert_eq!(file.header().track_count(), 1);

let notes = &file.track_notes()[0];
assert_eq!(notes.len(), 2);
assert!(notes[0].is_on());
assert_eq!(notes[1].number(), 60);
# Ok::<(), midinote::reader::ReaderError>(())
```

To also get a readable event log, pass a sink:

```rust
# use midinote::prelude::*;
# let bytes: Vec<u8> = vec![
#     b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
#     b'M', b'T', b'r', b'k', 0, 0, 0, 12,
#     0x00, 0x90, 60, 100, 0x60, 0x80, 60, 0, 0x00, 0xFF, 0x2F, 0x00,
# ];
let mut log = EventLog::new();
let file = MidiFile::parse_with_sink(&bytes, &mut log)?;
for line in log.lines() {
    println!("{line}");
}
# Ok::<(), midinote::reader::ReaderError>(())
```

# Fault handling

Damage confined to one track (an unknown status byte, a truncated event)
abandons that track and is recorded in
[`MidiFile::faults`](file::MidiFile::faults); decoding resumes at the
next chunk boundary. Damage to the structure itself (a wrong `MThd`/
`MTrk` tag, a runaway variable-length quantity, a track opening on a
data byte) aborts the parse with an error.
"#]

/// Fixed-width big-endian and variable-length integer decoding.
pub mod bytes;

/// The file-level decoder: header, tracks, notes, faults.
pub mod file;

/// Structured track events.
pub mod message;

mod note;
pub use note::*;

/// The byte cursor and error types.
pub mod reader;

/// Event sinks and human-readable rendering.
pub mod sink;

/// Everything needed to parse a file and walk its results.
pub mod prelude {
    pub use crate::{
        file::{
            Format, Header, KeySignature, MetaEvent, MetaKind, MidiFile, SmpteFps, SmpteOffset,
            Tempo, TimeSignature, Timing, TrackChunkHeader, TrackFault,
        },
        message::{
            Channel, ChannelVoiceEvent, SysExEvent, SysExKind, TrackEvent, TrackMessage,
            VoiceEvent, VoiceKind,
        },
        note::{DataByte, Note},
        reader::{ParseError, ReadResult, Reader, ReaderError, ReaderErrorKind, SmpteError},
        sink::{DiscardEvents, EventLog, EventSink},
    };
}
