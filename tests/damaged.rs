use midinote::prelude::*;
use pretty_assertions::assert_eq;

fn header(track_count: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06]);
    bytes.extend_from_slice(&[0x00, 0x00]);
    bytes.extend_from_slice(&track_count.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x60]);
    bytes
}

fn push_track(bytes: &mut Vec<u8>, declared_length: u32, body: &[u8]) {
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&declared_length.to_be_bytes());
    bytes.extend_from_slice(body);
}

#[test]
fn wrong_header_tag_is_fatal() {
    let mut bytes = header(1);
    bytes[0] = b'X';
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::Parse(ParseError::UnexpectedChunkTag { .. })
    ));
}

#[test]
fn wrong_track_tag_is_fatal() {
    let mut bytes = header(1);
    bytes.extend_from_slice(b"Trak");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x04]);
    bytes.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
    assert!(MidiFile::parse(&bytes).unwrap_err().is_fatal());
}

#[test]
fn runaway_vlq_is_fatal() {
    let mut bytes = header(1);
    // five continuation bytes in the first delta-time
    push_track(&mut bytes, 8, &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x90, 60]);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::Parse(ParseError::VlqOverrun)
    ));
}

#[test]
fn truncated_track_faults_but_later_tracks_decode() {
    let mut bytes = header(2);
    // declared length cuts the note-on off after its first payload byte
    push_track(&mut bytes, 3, &[0x00, 0x90, 60]);
    push_track(
        &mut bytes,
        8,
        &[
            0x00, 0x91, 36, 90, //
            0x00, 0xFF, 0x2F, 0x00,
        ],
    );

    let file = MidiFile::parse(&bytes).unwrap();
    assert!(!file.is_complete());

    assert_eq!(file.faults().len(), 1);
    let fault = &file.faults()[0];
    assert_eq!(fault.track(), 0);
    assert!(fault.error().is_end_of_data());

    // both chunks still have a notes entry, in file order
    assert_eq!(file.track_notes().len(), 2);
    assert!(file.track_notes()[0].is_empty());
    assert_eq!(file.track_notes()[1].len(), 1);
    assert_eq!(file.track_notes()[1][0].number(), 36);
}

#[test]
fn unknown_status_faults_only_its_own_track() {
    let mut bytes = header(2);
    push_track(
        &mut bytes,
        7,
        &[
            0x00, 0x90, 60, 100, //
            0x00, 0xF4, 0x00, // system common status, invalid in a file
        ],
    );
    push_track(
        &mut bytes,
        8,
        &[
            0x00, 0x92, 40, 80, //
            0x00, 0xFF, 0x2F, 0x00,
        ],
    );

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.faults().len(), 1);
    assert_eq!(file.faults()[0].track(), 0);
    assert!(matches!(
        file.faults()[0].error().error_kind(),
        ReaderErrorKind::Parse(ParseError::UnknownStatusByte(0xF4))
    ));

    // the fault kept the notes decoded before it
    assert_eq!(file.track_notes()[0].len(), 1);
    assert_eq!(file.track_notes()[1].len(), 1);
    assert_eq!(file.track_notes()[1][0].number(), 40);
}

#[test]
fn data_byte_with_no_running_status_is_fatal() {
    let mut bytes = header(1);
    push_track(&mut bytes, 3, &[0x00, 0x3C, 0x64]);

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::Parse(ParseError::MissingRunningStatus(0x3C))
    ));
}

#[test]
fn missing_track_chunks_fault_without_crashing() {
    // header promises two tracks, file contains one
    let mut bytes = header(2);
    push_track(
        &mut bytes,
        8,
        &[
            0x00, 0x90, 60, 100, //
            0x00, 0xFF, 0x2F, 0x00,
        ],
    );

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.track_notes().len(), 2);
    assert_eq!(file.track_notes()[0].len(), 1);
    assert_eq!(file.faults().len(), 1);
    assert_eq!(file.faults()[0].track(), 1);
    assert!(file.faults()[0].error().is_end_of_data());
}

#[test]
fn meta_length_mismatch_is_a_track_fault() {
    let mut bytes = header(2);
    // tempo declaring 2 payload bytes instead of 3
    push_track(&mut bytes, 6, &[0x00, 0xFF, 0x51, 0x02, 0x07, 0xA1]);
    push_track(
        &mut bytes,
        8,
        &[
            0x00, 0x90, 60, 100, //
            0x00, 0xFF, 0x2F, 0x00,
        ],
    );

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.faults().len(), 1);
    assert!(matches!(
        file.faults()[0].error().error_kind(),
        ReaderErrorKind::Parse(ParseError::MetaLength {
            kind: 0x51,
            expected: 3,
            found: 2,
        })
    ));
    assert_eq!(file.track_notes()[1].len(), 1);
}

#[test]
fn faulted_parse_is_still_idempotent() {
    let mut bytes = header(2);
    push_track(&mut bytes, 3, &[0x00, 0x90, 60]);
    push_track(
        &mut bytes,
        8,
        &[
            0x00, 0x91, 36, 90, //
            0x00, 0xFF, 0x2F, 0x00,
        ],
    );

    let first = MidiFile::parse(&bytes).unwrap();
    let second = MidiFile::parse(&bytes).unwrap();
    assert_eq!(first.header(), second.header());
    assert_eq!(first.track_notes(), second.track_notes());
    assert_eq!(first.faults().len(), second.faults().len());
}
