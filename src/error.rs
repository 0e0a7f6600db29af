use thiserror::Error;

/// Errors surfaced while decoding a FIT byte stream.
///
/// A single failure aborts the decode call; there is no partial-result
/// surface.
#[derive(Debug, Error)]
pub enum FitError {
    /// The input violates the FIT file format, or a tolerated inconsistency
    /// was promoted to an error through
    /// [`DecodeOptions`](crate::messages::DecodeOptions).
    #[error("{0}")]
    Content(String),

    /// A base-type decode was handed a byte count that is not a positive
    /// multiple of the type width.
    #[error("cannot decode {type_name} from {actual} bytes, expected a positive multiple of {width}")]
    Decoding {
        type_name: &'static str,
        width: u8,
        actual: usize,
    },
}
