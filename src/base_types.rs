//! The 17 primitive FIT base types and their decoding into values.

use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::FitError;
use crate::fit_records::Architecture;

/// FIT base types, keyed by base-type number (bits 0-4 of the
/// field-definition type byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum BaseType {
    Enum = 0,
    Sint8 = 1,
    Uint8 = 2,
    Sint16 = 3,
    Uint16 = 4,
    Sint32 = 5,
    Uint32 = 6,
    String = 7,
    Float32 = 8,
    Float64 = 9,
    Uint8z = 10,
    Uint16z = 11,
    Uint32z = 12,
    Byte = 13,
    Sint64 = 14,
    Uint64 = 15,
    Uint64z = 16,
}

/// Catalog metadata for one base type. Both `BaseType` and
/// `base_type_field` are unique keys over the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTypeInfo {
    pub base_type: BaseType,
    pub endian_ability: bool,
    /// The byte that appears in field definitions; high bit set iff
    /// endian-capable.
    pub base_type_field: u8,
    pub type_name: &'static str,
    /// Width in bytes. `string` is variable-width and treated as a 1-byte
    /// unit.
    pub size: u8,
    pub invalid_value: u64,
}

impl BaseType {
    pub fn from_number(number: u8) -> Result<Self, FitError> {
        BaseType::try_from(number)
            .map_err(|_| FitError::Content(format!("unknown base type number {}", number)))
    }

    pub fn info(self) -> BaseTypeInfo {
        match self {
            BaseType::Enum => BaseTypeInfo {
                base_type: self,
                endian_ability: false,
                base_type_field: 0x00,
                type_name: "enum",
                invalid_value: 0xFF,
                size: 1,
            },
            BaseType::Sint8 => BaseTypeInfo {
                base_type: self,
                endian_ability: false,
                base_type_field: 0x01,
                type_name: "sint8",
                invalid_value: 0x7F,
                size: 1,
            },
            BaseType::Uint8 => BaseTypeInfo {
                base_type: self,
                endian_ability: false,
                base_type_field: 0x02,
                type_name: "uint8",
                invalid_value: 0xFF,
                size: 1,
            },
            BaseType::Sint16 => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x83,
                type_name: "sint16",
                invalid_value: 0x7FFF,
                size: 2,
            },
            BaseType::Uint16 => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x84,
                type_name: "uint16",
                invalid_value: 0xFFFF,
                size: 2,
            },
            BaseType::Sint32 => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x85,
                type_name: "sint32",
                invalid_value: 0x7FFF_FFFF,
                size: 4,
            },
            BaseType::Uint32 => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x86,
                type_name: "uint32",
                invalid_value: 0xFFFF_FFFF,
                size: 4,
            },
            BaseType::String => BaseTypeInfo {
                base_type: self,
                endian_ability: false,
                base_type_field: 0x07,
                type_name: "string",
                invalid_value: 0x00,
                size: 1,
            },
            BaseType::Float32 => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x88,
                type_name: "float32",
                invalid_value: 0xFFFF_FFFF,
                size: 4,
            },
            BaseType::Float64 => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x89,
                type_name: "float64",
                invalid_value: 0xFFFF_FFFF_FFFF_FFFF,
                size: 8,
            },
            BaseType::Uint8z => BaseTypeInfo {
                base_type: self,
                endian_ability: false,
                base_type_field: 0x0A,
                type_name: "uint8z",
                invalid_value: 0x00,
                size: 1,
            },
            BaseType::Uint16z => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x8B,
                type_name: "uint16z",
                invalid_value: 0x0000,
                size: 2,
            },
            BaseType::Uint32z => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x8C,
                type_name: "uint32z",
                invalid_value: 0x0000_0000,
                size: 4,
            },
            BaseType::Byte => BaseTypeInfo {
                base_type: self,
                endian_ability: false,
                base_type_field: 0x0D,
                type_name: "byte",
                invalid_value: 0xFF,
                size: 1,
            },
            BaseType::Sint64 => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x8E,
                type_name: "sint64",
                invalid_value: 0x7FFF_FFFF_FFFF_FFFF,
                size: 8,
            },
            BaseType::Uint64 => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x8F,
                type_name: "uint64",
                invalid_value: 0xFFFF_FFFF_FFFF_FFFF,
                size: 8,
            },
            BaseType::Uint64z => BaseTypeInfo {
                base_type: self,
                endian_ability: true,
                base_type_field: 0x90,
                type_name: "uint64z",
                invalid_value: 0x0000_0000_0000_0000,
                size: 8,
            },
        }
    }

    /// Decodes a field's raw bytes in the given architecture.
    ///
    /// The byte count must be a positive multiple of the type width.
    /// Exactly one element's worth of bytes yields a scalar, more yield an
    /// ordered array. `string` fields decode the full slice as one text
    /// value with trailing NULs trimmed.
    pub fn decode(self, bytes: &[u8], architecture: Architecture) -> Result<Value, FitError> {
        let info = self.info();
        let width = info.size as usize;
        if bytes.is_empty() || bytes.len() % width != 0 {
            return Err(FitError::Decoding {
                type_name: info.type_name,
                width: info.size,
                actual: bytes.len(),
            });
        }

        if self == BaseType::String {
            let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
            let text = String::from_utf8_lossy(&bytes[..end]).into_owned();
            return Ok(Value::String(text));
        }

        let mut scalars = Vec::with_capacity(bytes.len() / width);
        for chunk in bytes.chunks(width) {
            scalars.push(self.decode_scalar(chunk, architecture));
        }
        if scalars.len() == 1 {
            Ok(Value::Scalar(scalars.remove(0)))
        } else {
            Ok(Value::Array(scalars))
        }
    }

    fn decode_scalar(self, chunk: &[u8], architecture: Architecture) -> Scalar {
        match self {
            BaseType::Enum => Scalar::Enum(chunk[0]),
            BaseType::Sint8 => Scalar::Sint8(chunk[0] as i8),
            BaseType::Uint8 => Scalar::Uint8(chunk[0]),
            BaseType::Sint16 => Scalar::Sint16(read_u16(chunk, architecture) as i16),
            BaseType::Uint16 => Scalar::Uint16(read_u16(chunk, architecture)),
            BaseType::Sint32 => Scalar::Sint32(read_u32(chunk, architecture) as i32),
            BaseType::Uint32 => Scalar::Uint32(read_u32(chunk, architecture)),
            BaseType::String => unreachable!("string fields decode as text"),
            BaseType::Float32 => Scalar::Float32(f32::from_bits(read_u32(chunk, architecture))),
            BaseType::Float64 => Scalar::Float64(f64::from_bits(read_u64(chunk, architecture))),
            BaseType::Uint8z => Scalar::Uint8z(chunk[0]),
            BaseType::Uint16z => Scalar::Uint16z(read_u16(chunk, architecture)),
            BaseType::Uint32z => Scalar::Uint32z(read_u32(chunk, architecture)),
            BaseType::Byte => Scalar::Byte(chunk[0]),
            BaseType::Sint64 => Scalar::Sint64(read_u64(chunk, architecture) as i64),
            BaseType::Uint64 => Scalar::Uint64(read_u64(chunk, architecture)),
            BaseType::Uint64z => Scalar::Uint64z(read_u64(chunk, architecture)),
        }
    }
}

fn read_u16(chunk: &[u8], architecture: Architecture) -> u16 {
    match architecture {
        Architecture::LittleEndian => LittleEndian::read_u16(chunk),
        Architecture::BigEndian => BigEndian::read_u16(chunk),
    }
}

fn read_u32(chunk: &[u8], architecture: Architecture) -> u32 {
    match architecture {
        Architecture::LittleEndian => LittleEndian::read_u32(chunk),
        Architecture::BigEndian => BigEndian::read_u32(chunk),
    }
}

fn read_u64(chunk: &[u8], architecture: Architecture) -> u64 {
    match architecture {
        Architecture::LittleEndian => LittleEndian::read_u64(chunk),
        Architecture::BigEndian => BigEndian::read_u64(chunk),
    }
}

/// A single decoded element of a numeric base type.
///
/// Invalid-value sentinels are preserved as-is; callers observe them at
/// the typed-resolver layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Enum(u8),
    Sint8(i8),
    Uint8(u8),
    Sint16(i16),
    Uint16(u16),
    Sint32(i32),
    Uint32(u32),
    Float32(f32),
    Float64(f64),
    Uint8z(u8),
    Uint16z(u16),
    Uint32z(u32),
    Byte(u8),
    Sint64(i64),
    Uint64(u64),
    Uint64z(u64),
}

/// A decoded field value: one scalar, a fixed-length array of scalars, or
/// the full byte slice reinterpreted as text for `string` fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Array(Vec<Scalar>),
    String(String),
}

impl Value {
    pub fn as_enum(&self) -> Option<u8> {
        match self {
            Value::Scalar(Scalar::Enum(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint8(&self) -> Option<u8> {
        match self {
            Value::Scalar(Scalar::Uint8(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint8z(&self) -> Option<u8> {
        match self {
            Value::Scalar(Scalar::Uint8z(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_sint8(&self) -> Option<i8> {
        match self {
            Value::Scalar(Scalar::Sint8(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint16(&self) -> Option<u16> {
        match self {
            Value::Scalar(Scalar::Uint16(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint16z(&self) -> Option<u16> {
        match self {
            Value::Scalar(Scalar::Uint16z(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_sint32(&self) -> Option<i32> {
        match self {
            Value::Scalar(Scalar::Sint32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint32(&self) -> Option<u32> {
        match self {
            Value::Scalar(Scalar::Uint32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint32z(&self) -> Option<u32> {
        match self {
            Value::Scalar(Scalar::Uint32z(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Collects `byte`-typed content, scalar or array, into one buffer.
    pub fn as_byte_buffer(&self) -> Option<Vec<u8>> {
        match self {
            Value::Scalar(Scalar::Byte(v)) => Some(vec![*v]),
            Value::Array(scalars) => {
                let mut bytes = Vec::with_capacity(scalars.len());
                for scalar in scalars {
                    match scalar {
                        Scalar::Byte(v) => bytes.push(*v),
                        _ => return None,
                    }
                }
                Some(bytes)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        let types = [
            BaseType::Enum,
            BaseType::Sint8,
            BaseType::Uint8,
            BaseType::Sint16,
            BaseType::Uint16,
            BaseType::Sint32,
            BaseType::Uint32,
            BaseType::String,
            BaseType::Float32,
            BaseType::Float64,
            BaseType::Uint8z,
            BaseType::Uint16z,
            BaseType::Uint32z,
            BaseType::Byte,
            BaseType::Sint64,
            BaseType::Uint64,
            BaseType::Uint64z,
        ];
        assert_eq!(types.len(), 17);

        let mut fields: Vec<u8> = types.iter().map(|t| t.info().base_type_field).collect();
        fields.sort_unstable();
        fields.dedup();
        assert_eq!(fields.len(), 17);

        for base_type in &types {
            let info = base_type.info();
            assert!(info.size > 0);
            assert_eq!(info.endian_ability, info.base_type_field & 0x80 != 0);
            assert_eq!(info.base_type_field & 0x1F, u8::from(*base_type));
        }
    }

    #[test]
    fn scalar_decode_respects_architecture() {
        let value = BaseType::Uint16
            .decode(&[0x0B, 0x0A], Architecture::LittleEndian)
            .unwrap();
        assert_eq!(value, Value::Scalar(Scalar::Uint16(0x0A0B)));

        let value = BaseType::Uint16
            .decode(&[0x0A, 0x0B], Architecture::BigEndian)
            .unwrap();
        assert_eq!(value, Value::Scalar(Scalar::Uint16(0x0A0B)));
    }

    #[test]
    fn multi_element_input_decodes_to_array() {
        let value = BaseType::Uint16
            .decode(&[0x01, 0x00, 0x02, 0x00], Architecture::LittleEndian)
            .unwrap();
        assert_eq!(
            value,
            Value::Array(vec![Scalar::Uint16(1), Scalar::Uint16(2)])
        );
    }

    #[test]
    fn string_decodes_full_slice_with_trailing_nuls_trimmed() {
        let value = BaseType::String
            .decode(b"GPS\0\0\0", Architecture::LittleEndian)
            .unwrap();
        assert_eq!(value, Value::String(String::from("GPS")));
    }

    #[test]
    fn length_not_a_multiple_of_width_fails() {
        let err = BaseType::Uint16
            .decode(&[0x01, 0x02, 0x03], Architecture::LittleEndian)
            .unwrap_err();
        match err {
            FitError::Decoding {
                type_name,
                width,
                actual,
            } => {
                assert_eq!(type_name, "uint16");
                assert_eq!(width, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("expected decoding error, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_fails() {
        assert!(BaseType::Uint8
            .decode(&[], Architecture::LittleEndian)
            .is_err());
    }

    #[test]
    fn invalid_sentinels_are_preserved() {
        let value = BaseType::Uint8
            .decode(&[0xFF], Architecture::LittleEndian)
            .unwrap();
        assert_eq!(value.as_uint8(), Some(0xFF));
    }
}
