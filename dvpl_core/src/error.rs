use thiserror::Error;

/// Every way a DVPL encode or decode can fail.
///
/// Variants carry the values that disagreed so a caller can report what the
/// footer claimed against what the payload actually contained.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DvplError {
    #[error("DVPL footer is too small: container is {len} bytes, footer needs 20")]
    FooterTooSmall { len: usize },

    #[error("invalid DVPL footer signature: {found:?}")]
    InvalidSignature { found: String },

    #[error("payload is {payload_len} bytes but the footer says {compressed_size}")]
    SizeMismatch { payload_len: usize, compressed_size: u32 },

    #[error("CRC32 checksum mismatch: computed {computed} != footer {expected}")]
    ChecksumMismatch { computed: i32, expected: i32 },

    #[error(
        "uncompressed container has original size {original_size} but stored size {compressed_size}"
    )]
    UncompressedSizeMismatch { original_size: u32, compressed_size: u32 },

    #[error("decompressed block size does not match the original size: expected {expected}, got {actual}")]
    DecompressedSizeMismatch { expected: u32, actual: usize },

    #[error("unknown DVPL format type {type_tag}")]
    UnknownFormat { type_tag: u32 },

    #[error("payload of {len} bytes does not fit the 32-bit DVPL size fields")]
    PayloadTooLarge { len: usize },

    #[error("{provider} decompression failed: {message}")]
    Decompression { provider: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, DvplError>;
