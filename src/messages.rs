//! Typed-message layer: resolves the record stream against the profile
//! catalog into strongly-typed messages.

use std::collections::HashMap;
use std::convert::TryFrom;

use tracing::warn;

use crate::base_types::Value;
use crate::error::FitError;
use crate::fit_records::{
    check_special_field_type, decode_file, Architecture, FieldDefinition, File, MessageContent,
    MessageDefinition, RecordContent, TIMESTAMP_FIELD_NUMBER,
};
use crate::profile::{MesgNum, MessageBody};

/// Tolerance toggles for message decoding. Each promotes one class of
/// tolerable inconsistency from a deduplicated warning to a fatal error.
/// All default to false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail when a definition references a global message number that is
    /// neither documented nor in the manufacturer specific range.
    pub error_on_undocumented_message: bool,
    /// Fail when a documented message carries a field number its kind does
    /// not expect.
    pub error_on_undocumented_field: bool,
    /// Fail when an enum-typed field carries a value outside the catalog;
    /// otherwise the kind's `Invalid` variant is substituted.
    pub error_on_invalid_enum_value: bool,
}

/// A field present in the wire definition but not expected by the
/// resolved message kind.
#[derive(Debug, Clone, PartialEq)]
pub struct UndocumentedMessageField {
    pub definition: FieldDefinition,
    pub value: Value,
}

/// A field declared through the developer-data extension. The definition
/// and decoded value are preserved verbatim; their semantics are not
/// interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct DeveloperMessageField {
    pub definition: FieldDefinition,
    pub value: Value,
}

/// A resolved message. The variant is chosen from the definition's global
/// message number; every variant carries the developer fields and the
/// fields its kind did not expect.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedMessage {
    Documented {
        kind: MesgNum,
        body: MessageBody,
        developer_fields: Vec<DeveloperMessageField>,
        undocumented_fields: Vec<UndocumentedMessageField>,
    },
    ManufacturerSpecific {
        global_message_number: u16,
        developer_fields: Vec<DeveloperMessageField>,
        undocumented_fields: Vec<UndocumentedMessageField>,
    },
    Undocumented {
        global_message_number: u16,
        developer_fields: Vec<DeveloperMessageField>,
        undocumented_fields: Vec<UndocumentedMessageField>,
    },
}

impl TypedMessage {
    pub fn developer_fields(&self) -> &[DeveloperMessageField] {
        match self {
            TypedMessage::Documented {
                developer_fields, ..
            }
            | TypedMessage::ManufacturerSpecific {
                developer_fields, ..
            }
            | TypedMessage::Undocumented {
                developer_fields, ..
            } => developer_fields,
        }
    }

    pub fn undocumented_fields(&self) -> &[UndocumentedMessageField] {
        match self {
            TypedMessage::Documented {
                undocumented_fields,
                ..
            }
            | TypedMessage::ManufacturerSpecific {
                undocumented_fields,
                ..
            }
            | TypedMessage::Undocumented {
                undocumented_fields,
                ..
            } => undocumented_fields,
        }
    }
}

/// Deduplicating warning sink. Each distinct text is admitted once per
/// decode call, in first-seen order, and forwarded to `tracing`.
#[derive(Debug, Default)]
struct Warnings {
    admitted: Vec<String>,
}

impl Warnings {
    fn push(&mut self, text: String) {
        if !self.admitted.iter().any(|seen| *seen == text) {
            warn!("{}", text);
            self.admitted.push(text);
        }
    }
}

/// Decodes a FIT byte buffer straight to typed messages.
pub fn decode_messages(
    bytes: &[u8],
    options: DecodeOptions,
) -> Result<Vec<TypedMessage>, FitError> {
    MessageDecoder::new(options).decode(bytes)
}

/// What a local message type is currently bound to, as seen by the
/// resolver.
#[derive(Debug, Clone)]
enum Binding {
    Documented(MesgNum, MessageDefinition),
    ManufacturerSpecific(MessageDefinition),
    Undocumented(MessageDefinition),
}

impl Binding {
    fn definition(&self) -> &MessageDefinition {
        match self {
            Binding::Documented(_, definition)
            | Binding::ManufacturerSpecific(definition)
            | Binding::Undocumented(definition) => definition,
        }
    }
}

/// Walks a record stream, maintaining the local message type table, and
/// resolves every data record into a [`TypedMessage`].
///
/// Retains the warning sequence of the last decode call for callers that
/// want it; [`decode_messages`] is the one-shot form.
#[derive(Debug)]
pub struct MessageDecoder {
    options: DecodeOptions,
    warnings: Warnings,
    most_recent_timestamp: Option<u32>,
}

impl MessageDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        MessageDecoder {
            options,
            warnings: Warnings::default(),
            most_recent_timestamp: None,
        }
    }

    /// Warning texts admitted by the last decode, in first-seen order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings.admitted
    }

    pub fn decode(&mut self, bytes: &[u8]) -> Result<Vec<TypedMessage>, FitError> {
        let file = decode_file(bytes)?;
        self.resolve(&file)
    }

    /// Resolves an already-decoded record stream.
    pub fn resolve(&mut self, file: &File) -> Result<Vec<TypedMessage>, FitError> {
        self.warnings.admitted.clear();
        self.most_recent_timestamp = None;

        let mut bindings: HashMap<u8, Binding> = HashMap::new();
        let mut messages = Vec::new();

        for record in file.iter() {
            match &record.content {
                RecordContent::Definition(definition) => {
                    let binding = self.classify(definition)?;
                    bindings.insert(record.header.local_message_type(), binding);
                }
                RecordContent::Content(content) => {
                    let local_message_type = record.header.local_message_type();
                    let binding = bindings.get(&local_message_type).ok_or_else(|| {
                        FitError::Content(format!(
                            "local message type {} has not been previously defined",
                            local_message_type
                        ))
                    })?;
                    messages.push(self.resolve_data(binding, content)?);
                }
            }
        }

        Ok(messages)
    }

    fn classify(&mut self, definition: &MessageDefinition) -> Result<Binding, FitError> {
        let number = definition.global_message_number;
        if let Ok(kind) = MesgNum::try_from(number) {
            return Ok(Binding::Documented(kind, definition.clone()));
        }
        if MesgNum::is_manufacturer_specific(number) {
            self.warnings.push(format!(
                "DefinitionMessage references MesgNum {} which is manufacturer specific",
                number
            ));
            return Ok(Binding::ManufacturerSpecific(definition.clone()));
        }

        let text = format!(
            "DefinitionMessage references MesgNum {} which is not documented",
            number
        );
        if self.options.error_on_undocumented_message {
            return Err(FitError::Content(text));
        }
        self.warnings.push(text);
        Ok(Binding::Undocumented(definition.clone()))
    }

    fn resolve_data(
        &mut self,
        binding: &Binding,
        content: &MessageContent,
    ) -> Result<TypedMessage, FitError> {
        let definition = binding.definition();
        let expected: &[u8] = match binding {
            Binding::Documented(kind, _) => kind.expected_field_numbers(),
            Binding::ManufacturerSpecific(_) | Binding::Undocumented(_) => &[],
        };

        let mut extracted: HashMap<u8, Value> = HashMap::new();
        let mut undocumented_fields = Vec::new();
        for (field_definition, raw) in definition.field_definitions.iter().zip(&content.fields) {
            let value = self.decode_field(field_definition, definition.architecture, raw)?;
            if expected.contains(&field_definition.number) {
                extracted.insert(field_definition.number, value);
            } else {
                undocumented_fields.push(UndocumentedMessageField {
                    definition: field_definition.clone(),
                    value,
                });
            }
        }

        let mut developer_fields = Vec::new();
        for (field_definition, raw) in definition
            .developer_field_definitions
            .iter()
            .zip(&content.developer_fields)
        {
            let value = field_definition
                .base_type
                .decode(raw, definition.architecture)?;
            developer_fields.push(DeveloperMessageField {
                definition: field_definition.clone(),
                value,
            });
        }

        match binding {
            Binding::Documented(kind, _) => {
                for undocumented in &undocumented_fields {
                    let text = format!(
                        "{:?} message has undocumented field number {}",
                        kind, undocumented.definition.number
                    );
                    if self.options.error_on_undocumented_field {
                        return Err(FitError::Content(text));
                    }
                    self.warnings.push(text);
                }
                let body =
                    kind.from_extracted_fields(&extracted, self.options.error_on_invalid_enum_value)?;
                Ok(TypedMessage::Documented {
                    kind: *kind,
                    body,
                    developer_fields,
                    undocumented_fields,
                })
            }
            Binding::ManufacturerSpecific(definition) => Ok(TypedMessage::ManufacturerSpecific {
                global_message_number: definition.global_message_number,
                developer_fields,
                undocumented_fields,
            }),
            Binding::Undocumented(definition) => Ok(TypedMessage::Undocumented {
                global_message_number: definition.global_message_number,
                developer_fields,
                undocumented_fields,
            }),
        }
    }

    fn decode_field(
        &mut self,
        field_definition: &FieldDefinition,
        architecture: Architecture,
        raw: &[u8],
    ) -> Result<Value, FitError> {
        check_special_field_type(field_definition)?;
        let value = field_definition.base_type.decode(raw, architecture)?;
        if field_definition.number == TIMESTAMP_FIELD_NUMBER {
            if let Some(timestamp) = value.as_uint32() {
                self.most_recent_timestamp = Some(timestamp);
            }
        }
        Ok(value)
    }
}
