use tracing::debug;

use crate::error::FitError;
use crate::fit_records::decode_crc;
use crate::reader::ByteReader;

/// FIT file header. All multi-byte fields are little-endian regardless of
/// any message architecture declared later in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// 12, or 14 when a header CRC is present.
    pub header_size: u8,
    pub protocol_version: u8,
    pub profile_version: u16,
    /// Length in bytes of the record stream that follows the header.
    pub data_size: u32,
    /// Always `.FIT`.
    pub data_type: String,
    /// Present iff `header_size` is 14. A stored value of 0 is accepted
    /// without comparison; some devices leave it blank.
    pub crc: Option<u16>,
}

pub(crate) fn decode_file_header(reader: &mut ByteReader) -> Result<FileHeader, FitError> {
    let header_size = reader.read_byte()?;
    let protocol_version = reader.read_byte()?;
    let profile_version = reader.read_u16_le()?;
    let data_size = reader.read_u32_le()?;
    let magic = reader.read_bytes(4)?;
    let data_type = String::from_utf8_lossy(&magic).into_owned();

    if header_size != 12 && header_size != 14 {
        return Err(FitError::Content(format!(
            "invalid header size, expected 12 or 14, read {}",
            header_size
        )));
    }
    if &magic[..] != &b".FIT"[..] {
        return Err(FitError::Content(format!(
            "invalid header data type, expected \".FIT\", read {:?}",
            data_type
        )));
    }

    let crc = if header_size == 14 {
        Some(decode_crc(reader, true)?)
    } else {
        None
    };

    debug!(
        "decoded file header: size {}, protocol {}, profile {}, data size {}",
        header_size, protocol_version, profile_version, data_size
    );

    Ok(FileHeader {
        header_size,
        protocol_version,
        profile_version,
        data_size,
        data_type,
        crc,
    })
}
