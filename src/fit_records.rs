//! Record-stream layer: record headers, field and message definitions,
//! raw message content, and the stream decoder that produces them.

use std::collections::HashMap;
use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use tracing::debug;

use crate::base_types::BaseType;
use crate::error::FitError;
use crate::fit_header::{decode_file_header, FileHeader};
use crate::reader::ByteReader;

/// Byte order for the multi-byte fields of one message definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Architecture {
    LittleEndian = 0,
    BigEndian = 1,
}

/// Field number carrying the absolute timestamp in any message.
pub(crate) const TIMESTAMP_FIELD_NUMBER: u8 = 253;
pub(crate) const MESSAGE_INDEX_FIELD_NUMBER: u8 = 254;
pub(crate) const PART_INDEX_FIELD_NUMBER: u8 = 250;

/// One-byte record header with bit 7 clear: flags plus a 4-bit local
/// message type.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalRecordHeader {
    pub is_definition_message: bool,
    pub has_developer_data: bool,
    pub local_message_type: u8,
}

/// One-byte record header with bit 7 set: a 2-bit local message type and a
/// 5-bit offset against the most recent full timestamp. Never a
/// definition.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedTimestampRecordHeader {
    pub local_message_type: u8,
    pub time_offset: u8,
    /// Snapshot of the most recent full timestamp when this header was
    /// read; `None` if no timestamp field had been decoded yet. Offset
    /// resolution is left to the consumer.
    pub previous_timestamp: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordHeader {
    Normal(NormalRecordHeader),
    CompressedTimestamp(CompressedTimestampRecordHeader),
}

impl RecordHeader {
    pub fn local_message_type(&self) -> u8 {
        match self {
            RecordHeader::Normal(header) => header.local_message_type,
            RecordHeader::CompressedTimestamp(header) => header.local_message_type,
        }
    }

    pub fn is_definition_message(&self) -> bool {
        match self {
            RecordHeader::Normal(header) => header.is_definition_message,
            RecordHeader::CompressedTimestamp(_) => false,
        }
    }

    pub fn has_developer_data(&self) -> bool {
        match self {
            RecordHeader::Normal(header) => header.has_developer_data,
            RecordHeader::CompressedTimestamp(_) => false,
        }
    }
}

/// Three-byte field definition: number, total size in bytes (covering
/// arrays), and the decoded type byte.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub number: u8,
    pub size: u8,
    pub endian_ability: bool,
    pub base_type: BaseType,
}

/// Definition bound to a local message type by a definition record.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDefinition {
    pub architecture: Architecture,
    pub global_message_number: u16,
    pub field_definitions: Vec<FieldDefinition>,
    /// Present iff the owning header had the developer-data flag set.
    pub developer_field_definitions: Vec<FieldDefinition>,
}

/// Raw field bytes of one data record, index-aligned with the owning
/// definition's field lists. Values are decoded later against the
/// profile.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageContent {
    pub fields: Vec<Vec<u8>>,
    pub developer_fields: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordContent {
    Definition(MessageDefinition),
    Content(MessageContent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub header: RecordHeader,
    pub content: RecordContent,
}

/// A fully decoded FIT file: header, record stream, and the verified
/// trailing CRC.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub header: FileHeader,
    pub records: Vec<Record>,
    pub crc: u16,
}

impl File {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}

/// Decodes a whole FIT file from a borrowed byte buffer.
pub fn decode_file(bytes: &[u8]) -> Result<File, FitError> {
    Decoder::new(bytes).decode_file()
}

/// Stream decoder: consumes raw bytes into the low-level record stream
/// while the reader keeps the running CRC.
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: ByteReader<'a>,
    definitions: HashMap<u8, MessageDefinition>,
    most_recent_timestamp: Option<u32>,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Decoder {
            reader: ByteReader::new(bytes),
            definitions: HashMap::new(),
            most_recent_timestamp: None,
        }
    }

    pub fn decode_file(mut self) -> Result<File, FitError> {
        let header = decode_file_header(&mut self.reader)?;
        let records = self.decode_records(header.data_size)?;
        let crc = decode_crc(&mut self.reader, false)?;
        Ok(File {
            header,
            records,
            crc,
        })
    }

    fn decode_records(&mut self, data_size: u32) -> Result<Vec<Record>, FitError> {
        let start = self.reader.position();
        let mut records = Vec::new();
        while self.reader.position() - start < data_size as usize {
            records.push(self.decode_record()?);
        }
        Ok(records)
    }

    fn decode_record(&mut self) -> Result<Record, FitError> {
        let header_byte = self.reader.read_byte()?;
        let header = if bit_set(header_byte, 7) {
            RecordHeader::CompressedTimestamp(self.decode_compressed_timestamp_header(header_byte))
        } else {
            RecordHeader::Normal(decode_normal_header(header_byte)?)
        };

        let content = if header.is_definition_message() {
            RecordContent::Definition(self.decode_message_definition(&header)?)
        } else {
            RecordContent::Content(self.decode_message_content(&header)?)
        };

        Ok(Record { header, content })
    }

    fn decode_compressed_timestamp_header(
        &self,
        header_byte: u8,
    ) -> CompressedTimestampRecordHeader {
        CompressedTimestampRecordHeader {
            local_message_type: (header_byte >> 5) & 0x3,
            time_offset: header_byte & 0x1F,
            previous_timestamp: self.most_recent_timestamp,
        }
    }

    fn decode_message_definition(
        &mut self,
        header: &RecordHeader,
    ) -> Result<MessageDefinition, FitError> {
        let reserved_byte = self.reader.read_byte()?;
        if reserved_byte != 0 {
            return Err(FitError::Content(String::from(
                "reserved byte after record header is not 0",
            )));
        }

        let architecture_byte = self.reader.read_byte()?;
        let architecture = Architecture::try_from(architecture_byte).map_err(|_| {
            FitError::Content(format!(
                "invalid architecture, expected 0 or 1, read {}",
                architecture_byte
            ))
        })?;

        let global_bytes = self.reader.read_bytes(2)?;
        let global_message_number = match architecture {
            Architecture::LittleEndian => LittleEndian::read_u16(&global_bytes),
            Architecture::BigEndian => BigEndian::read_u16(&global_bytes),
        };

        let number_of_fields = self.reader.read_byte()?;
        let mut field_definitions = Vec::with_capacity(number_of_fields as usize);
        for _ in 0..number_of_fields {
            field_definitions.push(decode_field_definition(&mut self.reader)?);
        }

        let mut developer_field_definitions = Vec::new();
        if header.has_developer_data() {
            let number_of_developer_fields = self.reader.read_byte()?;
            for _ in 0..number_of_developer_fields {
                developer_field_definitions.push(decode_field_definition(&mut self.reader)?);
            }
        }

        let definition = MessageDefinition {
            architecture,
            global_message_number,
            field_definitions,
            developer_field_definitions,
        };
        debug!(
            "bound local message type {} to global message number {}",
            header.local_message_type(),
            global_message_number
        );
        self.definitions
            .insert(header.local_message_type(), definition.clone());
        Ok(definition)
    }

    fn decode_message_content(&mut self, header: &RecordHeader) -> Result<MessageContent, FitError> {
        let local_message_type = header.local_message_type();
        let definition = self
            .definitions
            .get(&local_message_type)
            .cloned()
            .ok_or_else(|| {
                FitError::Content(format!(
                    "local message type {} has not been previously defined",
                    local_message_type
                ))
            })?;

        let mut fields = Vec::with_capacity(definition.field_definitions.len());
        for field_definition in &definition.field_definitions {
            fields.push(self.decode_field_bytes(field_definition, definition.architecture)?);
        }
        let mut developer_fields = Vec::with_capacity(definition.developer_field_definitions.len());
        for field_definition in &definition.developer_field_definitions {
            developer_fields
                .push(self.decode_field_bytes(field_definition, definition.architecture)?);
        }

        Ok(MessageContent {
            fields,
            developer_fields,
        })
    }

    fn decode_field_bytes(
        &mut self,
        field_definition: &FieldDefinition,
        architecture: Architecture,
    ) -> Result<Vec<u8>, FitError> {
        let raw = self.reader.read_bytes(field_definition.size as usize)?;
        if field_definition.number == TIMESTAMP_FIELD_NUMBER {
            let value = field_definition.base_type.decode(&raw, architecture)?;
            if let Some(timestamp) = value.as_uint32() {
                self.most_recent_timestamp = Some(timestamp);
            }
        }
        Ok(raw)
    }
}

fn decode_normal_header(header_byte: u8) -> Result<NormalRecordHeader, FitError> {
    if bit_set(header_byte, 4) {
        return Err(FitError::Content(String::from(
            "reserved bit on record header is 1, expected 0",
        )));
    }
    Ok(NormalRecordHeader {
        is_definition_message: bit_set(header_byte, 6),
        has_developer_data: bit_set(header_byte, 5),
        local_message_type: header_byte & 0x0F,
    })
}

fn decode_field_definition(reader: &mut ByteReader) -> Result<FieldDefinition, FitError> {
    let number = reader.read_byte()?;
    let size = reader.read_byte()?;
    let type_byte = reader.read_byte()?;

    let reserved_bits = type_byte & 0x60;
    if reserved_bits != 0 {
        return Err(FitError::Content(format!(
            "invalid field definition reserved bits, expected 0, read {:#04X}",
            reserved_bits
        )));
    }

    let field_definition = FieldDefinition {
        number,
        size,
        endian_ability: bit_set(type_byte, 7),
        base_type: BaseType::from_number(type_byte & 0x1F)?,
    };
    check_special_field_type(&field_definition)?;
    Ok(field_definition)
}

/// Field numbers 253, 254 and 250 carry stream-level meaning and must
/// arrive with their documented base types.
pub(crate) fn check_special_field_type(
    field_definition: &FieldDefinition,
) -> Result<(), FitError> {
    let expected = match field_definition.number {
        TIMESTAMP_FIELD_NUMBER => ("timestamp", BaseType::Uint32),
        MESSAGE_INDEX_FIELD_NUMBER => ("message index", BaseType::Uint16),
        PART_INDEX_FIELD_NUMBER => ("part index", BaseType::Uint32),
        _ => return Ok(()),
    };
    if field_definition.base_type != expected.1 {
        return Err(FitError::Content(format!(
            "{} field number {} is expected to be of type {}, {} found",
            expected.0,
            field_definition.number,
            expected.1.info().type_name,
            field_definition.base_type.info().type_name
        )));
    }
    Ok(())
}

/// Snapshots the running CRC, reads the expected one, compares, resets.
///
/// `allow_zero` is the file-header concession: a stored CRC of 0 is
/// accepted without comparison.
pub(crate) fn decode_crc(reader: &mut ByteReader, allow_zero: bool) -> Result<u16, FitError> {
    let computed = reader.crc_current();
    let expected = reader.read_u16_le()?;
    reader.crc_reset();

    if allow_zero && expected == 0 {
        return Ok(expected);
    }
    if computed != expected {
        return Err(FitError::Content(format!(
            "invalid CRC, expected {:#06X}, computed {:#06X}",
            expected, computed
        )));
    }
    Ok(expected)
}

fn bit_set(byte: u8, position: u8) -> bool {
    byte & (1 << position) != 0
}
