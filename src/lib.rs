//! Decoder for the ANT+ FIT binary file format.
//!
//! FIT files are a self-describing record stream: definition records bind
//! a local message type to the shape of the data records that follow, and
//! data records pack field values in one of 17 primitive base types. An
//! outer file header and a trailing CRC frame the payload.
//!
//! Decoding happens in two passes:
//!
//! - [`decode_file`] consumes raw bytes into the low-level record stream
//!   (file header, record headers, field definitions, raw field bytes)
//!   while verifying the running CRC.
//! - [`decode_messages`] additionally resolves every data record against
//!   the profile catalog into [`TypedMessage`]s, separating documented
//!   fields from undocumented and developer fields and validating enum
//!   values.
//!
//! ```no_run
//! use fit_decoder::{decode_messages, DecodeOptions};
//!
//! let bytes = std::fs::read("activity.fit")?;
//! let messages = decode_messages(&bytes, DecodeOptions::default())?;
//! for message in &messages {
//!     println!("{:?}", message);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The decoder is strictly sequential and shares no state between calls;
//! the byte buffer is borrowed for the duration of one decode and the
//! returned values are fully owned by the caller.

pub mod base_types;
pub mod crc;
pub mod error;
pub mod fit_header;
pub mod fit_records;
pub mod messages;
pub mod profile;
pub mod reader;

pub use crate::base_types::{BaseType, BaseTypeInfo, Scalar, Value};
pub use crate::error::FitError;
pub use crate::fit_header::FileHeader;
pub use crate::fit_records::{
    decode_file, Architecture, CompressedTimestampRecordHeader, FieldDefinition, File,
    MessageContent, MessageDefinition, NormalRecordHeader, Record, RecordContent, RecordHeader,
};
pub use crate::messages::{
    decode_messages, DecodeOptions, DeveloperMessageField, MessageDecoder, TypedMessage,
    UndocumentedMessageField,
};
pub use crate::profile::{MesgNum, MessageBody};
