use byteorder::{ByteOrder, LittleEndian};

use crate::crc::Crc;
use crate::error::FitError;

/// Position-tracked cursor over a borrowed byte buffer.
///
/// Every byte handed out is fed to the CRC engine before being returned,
/// so the running CRC always covers exactly the consumed prefix. The
/// stream decoder snapshots [`crc_current`](ByteReader::crc_current)
/// right before reading an expected CRC, compares, then
/// [`crc_reset`](ByteReader::crc_reset)s.
#[derive(Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
    crc: Crc,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteReader {
            bytes,
            position: 0,
            crc: Crc::new(),
        }
    }

    pub fn read_byte(&mut self) -> Result<u8, FitError> {
        if self.bytes_left() == 0 {
            return Err(FitError::Content(String::from("unexpected end of file")));
        }
        let byte = self.bytes[self.position];
        self.position += 1;
        self.crc.update(byte);
        Ok(byte)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, FitError> {
        let mut bytes = Vec::with_capacity(count);
        for _ in 0..count {
            bytes.push(self.read_byte()?);
        }
        Ok(bytes)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, FitError> {
        let bytes = self.read_bytes(2)?;
        Ok(LittleEndian::read_u16(&bytes))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, FitError> {
        let bytes = self.read_bytes(4)?;
        Ok(LittleEndian::read_u32(&bytes))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, FitError> {
        let bytes = self.read_bytes(8)?;
        Ok(LittleEndian::read_u64(&bytes))
    }

    pub fn bytes_left(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn crc_current(&self) -> u16 {
        self.crc.current()
    }

    pub fn crc_reset(&mut self) {
        self.crc.reset()
    }
}
