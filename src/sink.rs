#![doc = r#"
Event sinks: where decoded events go for presentation.

The decoder hands every event it reads to an [`EventSink`] as it goes, so
callers can log, print or inspect the full event stream without the note
data model carrying any of it. [`EventLog`] collects one rendered line per
event; [`DiscardEvents`] drops everything for callers that only want the
notes.
"#]

use core::fmt;

use crate::{
    file::MetaEvent,
    message::{ChannelVoiceEvent, SysExEvent, SysExKind, TrackEvent, TrackMessage, VoiceEvent},
};

/// A consumer of decoded track events.
///
/// Called once per event, in decode order, with the index of the track
/// chunk the event came from.
pub trait EventSink {
    /// Receive one decoded event.
    fn event(&mut self, track: u16, event: &TrackEvent<'_>);
}

/// A sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardEvents;

impl EventSink for DiscardEvents {
    fn event(&mut self, _track: u16, _event: &TrackEvent<'_>) {}
}

/// A sink that renders each event to a human-readable line.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    lines: Vec<String>,
}

impl EventLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered lines, in decode order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the log, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl EventSink for EventLog {
    fn event(&mut self, track: u16, event: &TrackEvent<'_>) {
        self.lines
            .push(format!("track {track} +{}: {}", event.delta(), event.message()));
    }
}

impl fmt::Display for TrackMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ChannelVoice(voice) => voice.fmt(f),
            Self::Meta(meta) => meta.fmt(f),
            Self::SystemExclusive(sysex) => sysex.fmt(f),
        }
    }
}

impl fmt::Display for ChannelVoiceEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[ch {}] {}", self.channel(), self.event())
    }
}

impl fmt::Display for VoiceEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoteOff { note, velocity } => write!(f, "note off {note} vel {velocity}"),
            Self::NoteOn { note, velocity } => write!(f, "note on {note} vel {velocity}"),
            Self::PolyAftertouch { note, amount } => write!(f, "aftertouch {note} amount {amount}"),
            Self::Controller { controller, value } => write!(f, "ctrl {controller} = {value}"),
            Self::ProgramChange { program } => write!(f, "program {program}"),
            Self::ChannelAftertouch { amount } => write!(f, "channel aftertouch {amount}"),
            Self::PitchBend { .. } => {
                // bend() is Some for this variant by construction
                write!(f, "pitch bend {}", self.bend().unwrap_or(0))
            }
        }
    }
}

impl fmt::Display for SysExEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            SysExKind::Start => write!(f, "sysex start, {} bytes", self.data().len()),
            SysExKind::Continuation => write!(f, "sysex continuation, {} bytes", self.data().len()),
        }
    }
}

impl fmt::Display for MetaEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::SequenceNumber(n) => write!(f, "sequence number {n}"),
            Self::Text(text) => write!(f, "text '{}'", String::from_utf8_lossy(text)),
            Self::Copyright(text) => write!(f, "copyright '{}'", String::from_utf8_lossy(text)),
            Self::TrackName(text) => write!(f, "track name '{}'", String::from_utf8_lossy(text)),
            Self::InstrumentName(text) => {
                write!(f, "instrument '{}'", String::from_utf8_lossy(text))
            }
            Self::Lyric(text) => write!(f, "lyric '{}'", String::from_utf8_lossy(text)),
            Self::Marker(text) => write!(f, "marker '{}'", String::from_utf8_lossy(text)),
            Self::CuePoint(text) => write!(f, "cue point '{}'", String::from_utf8_lossy(text)),
            Self::ChannelPrefix(channel) => write!(f, "channel prefix {channel}"),
            Self::EndOfTrack => write!(f, "end of track"),
            Self::Tempo(tempo) => write!(
                f,
                "tempo {} us/quarter ({} bpm)",
                tempo.micros_per_quarter_note(),
                tempo.bpm()
            ),
            Self::SmpteOffset(offset) => write!(
                f,
                "smpte offset {:02}:{:02}:{:02} frame {}.{:02}",
                offset.hour, offset.minute, offset.second, offset.frame, offset.subframe
            ),
            Self::TimeSignature(ts) => write!(
                f,
                "time signature {}/{} ({} clocks/metronome, {} 32nds/24 clocks)",
                ts.numerator,
                ts.denominator(),
                ts.clocks_per_metronome,
                ts.thirty_seconds_per_24_clocks
            ),
            Self::KeySignature(ks) => {
                let accidentals = match ks.sharps_flats {
                    0 => "no accidentals".to_string(),
                    n if n > 0 => format!("{n} sharps"),
                    n => format!("{} flats", -n),
                };
                write!(
                    f,
                    "key signature {accidentals}, {}",
                    if ks.minor { "minor" } else { "major" }
                )
            }
            Self::SequencerSpecific(data) => write!(f, "sequencer specific, {} bytes", data.len()),
            Self::Unknown { kind, data } => {
                write!(f, "unknown meta {kind:#04x}, {} bytes", data.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        file::Tempo,
        message::Channel,
        note::DataByte,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn log_lines_carry_track_delta_and_message() {
        let mut log = EventLog::new();
        let event = TrackEvent::new(
            96,
            TrackMessage::ChannelVoice(ChannelVoiceEvent::new(
                Channel::from_status(0x93),
                VoiceEvent::NoteOn {
                    note: DataByte::new_lossy(60),
                    velocity: DataByte::new_lossy(100),
                },
            )),
        );
        log.event(1, &event);
        assert_eq!(log.lines(), &["track 1 +96: [ch 3] note on 60 vel 100"]);
    }

    #[test]
    fn meta_rendering() {
        assert_eq!(
            TrackMessage::Meta(MetaEvent::Tempo(Tempo::new(500_000))).to_string(),
            "tempo 500000 us/quarter (120 bpm)"
        );
        assert_eq!(
            TrackMessage::Meta(MetaEvent::TrackName(b"lead")).to_string(),
            "track name 'lead'"
        );
        assert_eq!(
            TrackMessage::Meta(MetaEvent::EndOfTrack).to_string(),
            "end of track"
        );
    }
}
