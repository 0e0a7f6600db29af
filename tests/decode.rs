//! End-to-end decoding over hand-built byte vectors.

use fit_decoder::crc::fit_crc;
use fit_decoder::profile::Sport;
use fit_decoder::{
    decode_file, decode_messages, DecodeOptions, FitError, MesgNum, MessageBody, MessageDecoder,
    RecordContent, RecordHeader, TypedMessage,
};

/// 12-byte file header declaring `data_size` bytes of records.
fn file_header(data_size: u32) -> Vec<u8> {
    let mut bytes = vec![
        12, 0x20, // header size, protocol version
        0x53, 0x08, // profile version
    ];
    bytes.extend_from_slice(&data_size.to_le_bytes());
    bytes.extend_from_slice(b".FIT");
    bytes
}

/// Appends the trailing CRC over everything built so far.
fn seal(mut bytes: Vec<u8>) -> Vec<u8> {
    let crc = fit_crc(&bytes, 0);
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes
}

/// Definition binding local type 0 to Record/20 with a single uint8
/// heart-rate field, followed by one data record carrying `heart_rate`.
fn heart_rate_records(heart_rate: u8) -> Vec<u8> {
    vec![
        0x40, // definition, local type 0
        0x00, 0x00, // reserved, little-endian
        0x14, 0x00, // global message number 20
        0x01, // one field
        0x03, 0x01, 0x02, // heart_rate: number 3, size 1, uint8
        0x00, // data, local type 0
        heart_rate,
    ]
}

#[test]
fn minimal_file_with_no_records() {
    let bytes = seal(file_header(0));
    let file = decode_file(&bytes).unwrap();
    assert_eq!(file.header.header_size, 12);
    assert_eq!(file.header.data_size, 0);
    assert!(file.is_empty());
    assert_eq!(file.crc, fit_crc(&bytes[..12], 0));
}

#[test]
fn fourteen_byte_header_with_zero_header_crc() {
    let mut bytes = vec![
        14, 0x20, // header size, protocol version
        0x53, 0x08, // profile version
        0x00, 0x00, 0x00, 0x00, // data size
    ];
    bytes.extend_from_slice(b".FIT");
    bytes.extend_from_slice(&[0x00, 0x00]); // blank header CRC, accepted
    bytes.extend_from_slice(&[0x00, 0x00]); // trailing CRC over zero record bytes
    let file = decode_file(&bytes).unwrap();
    assert_eq!(file.header.header_size, 14);
    assert_eq!(file.header.crc, Some(0));
    assert!(file.is_empty());
}

#[test]
fn single_heart_rate_record() {
    let records = heart_rate_records(75);
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let messages = decode_messages(&bytes, DecodeOptions::default()).unwrap();
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        TypedMessage::Documented {
            kind,
            body: MessageBody::Record(record),
            developer_fields,
            undocumented_fields,
        } => {
            assert_eq!(*kind, MesgNum::Record);
            assert_eq!(record.heart_rate, Some(75));
            assert_eq!(record.timestamp, None);
            assert!(developer_fields.is_empty());
            assert!(undocumented_fields.is_empty());
        }
        other => panic!("expected documented record message, got {:?}", other),
    }
}

#[test]
fn unknown_global_message_number_with_defaults() {
    let records = vec![
        0x40, // definition, local type 0
        0x00, 0x00, // reserved, little-endian
        0xE8, 0xFD, // global message number 65000
        0x01, // one field
        0x07, 0x01, 0x02, // number 7, size 1, uint8
        0x00, // data, local type 0
        0x2A,
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let mut decoder = MessageDecoder::new(DecodeOptions::default());
    let messages = decoder.decode(&bytes).unwrap();
    assert_eq!(
        decoder.warnings(),
        &[String::from(
            "DefinitionMessage references MesgNum 65000 which is not documented"
        )]
    );
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        TypedMessage::Undocumented {
            global_message_number,
            undocumented_fields,
            ..
        } => {
            assert_eq!(*global_message_number, 65000);
            assert_eq!(undocumented_fields.len(), 1);
            assert_eq!(undocumented_fields[0].definition.number, 7);
            assert_eq!(undocumented_fields[0].value.as_uint8(), Some(0x2A));
        }
        other => panic!("expected undocumented message, got {:?}", other),
    }

    let options = DecodeOptions {
        error_on_undocumented_message: true,
        ..DecodeOptions::default()
    };
    let err = decode_messages(&bytes, options).unwrap_err();
    assert!(err.to_string().contains("MesgNum 65000"));
}

#[test]
fn manufacturer_specific_message_warns_and_keeps_fields() {
    let records = vec![
        0x41, // definition, local type 1
        0x00, 0x00, // reserved, little-endian
        0x10, 0xFF, // global message number 0xFF10
        0x01, // one field
        0x00, 0x02, 0x84, // number 0, size 2, uint16
        0x01, // data, local type 1
        0x39, 0x05,
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let mut decoder = MessageDecoder::new(DecodeOptions::default());
    let messages = decoder.decode(&bytes).unwrap();
    assert_eq!(
        decoder.warnings(),
        &[String::from(
            "DefinitionMessage references MesgNum 65296 which is manufacturer specific"
        )]
    );
    match &messages[0] {
        TypedMessage::ManufacturerSpecific {
            global_message_number,
            undocumented_fields,
            ..
        } => {
            assert_eq!(*global_message_number, 0xFF10);
            assert_eq!(undocumented_fields[0].value.as_uint16(), Some(0x0539));
        }
        other => panic!("expected manufacturer specific message, got {:?}", other),
    }
}

#[test]
fn bad_magic_is_rejected() {
    let mut bytes = seal(file_header(0));
    bytes[8] = b'X';
    let err = decode_file(&bytes).unwrap_err();
    assert!(err.to_string().contains(".FIT"));
}

#[test]
fn trailing_crc_mismatch_is_rejected() {
    let mut bytes = seal(file_header(0));
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    let err = decode_file(&bytes).unwrap_err();
    assert!(err.to_string().contains("CRC"));
}

#[test]
fn flipping_a_record_byte_is_rejected() {
    let records = heart_rate_records(75);
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let mut bytes = seal(bytes);
    let data_index = bytes.len() - 3; // heart-rate value byte
    bytes[data_index] ^= 0x01;
    let err = decode_file(&bytes).unwrap_err();
    assert!(err.to_string().contains("CRC"));
}

#[test]
fn redefinition_rebinds_local_message_type() {
    let records = vec![
        0x42, // definition, local type 2
        0x00, 0x00, // reserved, little-endian
        0x14, 0x00, // global message number 20 (Record)
        0x01, // one field
        0x03, 0x01, 0x02, // heart_rate: number 3, size 1, uint8
        0x02, // data, local type 2, decodes against Record
        0x4B,
        0x42, // redefinition of local type 2
        0x00, 0x00, // reserved, little-endian
        0x15, 0x00, // global message number 21 (Event)
        0x01, // one field
        0x04, 0x01, 0x02, // event_group: number 4, size 1, uint8
        0x02, // data, local type 2, decodes against Event
        0x07,
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let messages = decode_messages(&bytes, DecodeOptions::default()).unwrap();
    assert_eq!(messages.len(), 2);
    match &messages[0] {
        TypedMessage::Documented {
            body: MessageBody::Record(record),
            ..
        } => assert_eq!(record.heart_rate, Some(75)),
        other => panic!("expected record message, got {:?}", other),
    }
    match &messages[1] {
        TypedMessage::Documented {
            body: MessageBody::Event(event),
            ..
        } => assert_eq!(event.event_group, Some(7)),
        other => panic!("expected event message, got {:?}", other),
    }
}

#[test]
fn data_record_before_any_definition_is_rejected() {
    let records = vec![0x03, 0x4B]; // data record, local type 3, never defined
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let err = decode_file(&bytes).unwrap_err();
    assert!(err
        .to_string()
        .contains("local message type 3 has not been previously defined"));
}

#[test]
fn compressed_timestamp_header_snapshots_reference() {
    let records = vec![
        0x40, // definition, local type 0
        0x00, 0x00, // reserved, little-endian
        0x14, 0x00, // global message number 20
        0x01, // one field
        0xFD, 0x04, 0x86, // timestamp: number 253, size 4, uint32
        0x00, // data, local type 0
        0x78, 0x56, 0x34, 0x12, // timestamp 0x12345678
        0x83, // compressed timestamp header: local type 0, offset 3
        0x00, 0x00, 0x00, 0x20, // timestamp 0x20000000
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let file = decode_file(&bytes).unwrap();
    assert_eq!(file.len(), 3);
    match &file.records[2].header {
        RecordHeader::CompressedTimestamp(header) => {
            assert_eq!(header.local_message_type, 0);
            assert_eq!(header.time_offset, 3);
            assert_eq!(header.previous_timestamp, Some(0x12345678));
        }
        other => panic!("expected compressed timestamp header, got {:?}", other),
    }
    match &file.records[2].content {
        RecordContent::Content(content) => {
            assert_eq!(content.fields, vec![vec![0x00, 0x00, 0x00, 0x20]]);
        }
        other => panic!("expected message content, got {:?}", other),
    }
}

#[test]
fn big_endian_architecture_decodes_fields() {
    let records = vec![
        0x40, // definition, local type 0
        0x00, 0x01, // reserved, big-endian
        0x00, 0x14, // global message number 20
        0x01, // one field
        0x07, 0x02, 0x84, // power: number 7, size 2, uint16
        0x00, // data, local type 0
        0x01, 0x2C, // 300 watts, big-endian
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let messages = decode_messages(&bytes, DecodeOptions::default()).unwrap();
    match &messages[0] {
        TypedMessage::Documented {
            body: MessageBody::Record(record),
            ..
        } => assert_eq!(record.power, Some(300)),
        other => panic!("expected record message, got {:?}", other),
    }
}

#[test]
fn invalid_enum_value_falls_back_or_fails() {
    let records = vec![
        0x40, // definition, local type 0
        0x00, 0x00, // reserved, little-endian
        0x12, 0x00, // global message number 18 (Session)
        0x01, // one field
        0x05, 0x01, 0x00, // sport: number 5, size 1, enum
        0x00, // data, local type 0
        0xC8, // 200, not in the sport catalog
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let messages = decode_messages(&bytes, DecodeOptions::default()).unwrap();
    match &messages[0] {
        TypedMessage::Documented {
            body: MessageBody::Session(session),
            ..
        } => assert_eq!(session.sport, Some(Sport::Invalid)),
        other => panic!("expected session message, got {:?}", other),
    }

    let options = DecodeOptions {
        error_on_invalid_enum_value: true,
        ..DecodeOptions::default()
    };
    let err = decode_messages(&bytes, options).unwrap_err();
    assert!(err.to_string().contains("not a valid Sport"));
}

#[test]
fn special_field_with_wrong_base_type_is_rejected() {
    let records = vec![
        0x40, // definition, local type 0
        0x00, 0x00, // reserved, little-endian
        0x14, 0x00, // global message number 20
        0x01, // one field
        0xFD, 0x02, 0x84, // timestamp declared uint16
        0x00, // data, local type 0
        0x01, 0x02,
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let err = decode_file(&bytes).unwrap_err();
    assert!(err.to_string().contains("timestamp field number 253"));
}

#[test]
fn developer_fields_are_preserved_verbatim() {
    let records = vec![
        0x60, // definition with developer data, local type 0
        0x00, 0x00, // reserved, little-endian
        0x14, 0x00, // global message number 20
        0x01, // one field
        0x03, 0x01, 0x02, // heart_rate: number 3, size 1, uint8
        0x01, // one developer field
        0x00, 0x02, 0x84, // number 0, size 2, uint16
        0x00, // data, local type 0
        0x4B, // heart rate 75
        0x39, 0x05, // developer field value
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let messages = decode_messages(&bytes, DecodeOptions::default()).unwrap();
    match &messages[0] {
        TypedMessage::Documented {
            body: MessageBody::Record(record),
            developer_fields,
            undocumented_fields,
            ..
        } => {
            assert_eq!(record.heart_rate, Some(75));
            assert!(undocumented_fields.is_empty());
            assert_eq!(developer_fields.len(), 1);
            assert_eq!(developer_fields[0].definition.number, 0);
            assert_eq!(developer_fields[0].value.as_uint16(), Some(0x0539));
        }
        other => panic!("expected record message, got {:?}", other),
    }
}

#[test]
fn truncated_input_is_rejected() {
    let records = heart_rate_records(75);
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records[..4]); // cut mid-definition
    let err = decode_file(&bytes).unwrap_err();
    assert!(err.to_string().contains("unexpected end of file"));
}

#[test]
fn bytes_after_trailing_crc_are_not_consumed() {
    let records = heart_rate_records(75);
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let mut bytes = seal(bytes);
    bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    assert!(decode_file(&bytes).is_ok());
}

#[test]
fn identical_input_produces_identical_warnings_and_output() {
    let records = vec![
        0x40, // definition, local type 0
        0x00, 0x00, // reserved, little-endian
        0xE8, 0xFD, // global message number 65000
        0x01, // one field
        0x07, 0x01, 0x02, // number 7, size 1, uint8
        0x00, // data, local type 0
        0x2A,
        0x00, // second data record, same warning text suppressed
        0x2B,
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    let mut first = MessageDecoder::new(DecodeOptions::default());
    let first_messages = first.decode(&bytes).unwrap();
    let mut second = MessageDecoder::new(DecodeOptions::default());
    let second_messages = second.decode(&bytes).unwrap();

    assert_eq!(first_messages, second_messages);
    assert_eq!(first.warnings(), second.warnings());
    assert_eq!(first.warnings().len(), 1);
}

#[test]
fn field_size_not_a_multiple_of_width_is_decoding_error() {
    let records = vec![
        0x40, // definition, local type 0
        0x00, 0x00, // reserved, little-endian
        0x14, 0x00, // global message number 20
        0x01, // one field
        0x07, 0x03, 0x84, // power declared uint16 with size 3
        0x00, // data, local type 0
        0x01, 0x02, 0x03,
    ];
    let mut bytes = file_header(records.len() as u32);
    bytes.extend_from_slice(&records);
    let bytes = seal(bytes);

    // The stream layer stores raw bytes; the typed layer decodes them.
    assert!(decode_file(&bytes).is_ok());
    let err = decode_messages(&bytes, DecodeOptions::default()).unwrap_err();
    match err {
        FitError::Decoding { width, actual, .. } => {
            assert_eq!(width, 2);
            assert_eq!(actual, 3);
        }
        other => panic!("expected decoding error, got {:?}", other),
    }
}
