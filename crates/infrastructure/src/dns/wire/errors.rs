use rootwalk_domain::DomainError;
use thiserror::Error;

/// Structural faults found while parsing a datagram.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("message truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("compression pointer loop starting at offset {offset}")]
    PointerLoop { offset: usize },

    #[error("reserved label type 0x{byte:02x} at offset {offset}")]
    ReservedLabelType { offset: usize, byte: u8 },

    #[error("decoded name exceeds 255 octets")]
    NameTooLong,

    #[error("response ID mismatch: expected {expected:#06x}, got {actual:#06x}")]
    IdMismatch { expected: u16, actual: u16 },

    #[error("message is not a response (QR bit clear)")]
    NotAResponse,
}

impl From<WireError> for DomainError {
    fn from(err: WireError) -> Self {
        DomainError::Decode(err.to_string())
    }
}
