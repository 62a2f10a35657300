use std::fmt;

use crate::error::{DvplError, Result};

/// Trailing signature of every DVPL container.
pub const MAGIC: &[u8; 4] = b"DVPL";

/// Fixed size of the DVPL footer in bytes.
///   original_size:u32 + compressed_size:u32 + crc32:i32 + type:u32 + magic[4]
///   = 4 + 4 + 4 + 4 + 4 = 20
pub const FOOTER_SIZE: usize = 20;

// ── Type tags ──────────────────────────────────────────────────────────────

pub const TYPE_NONE: u32 = 0;
pub const TYPE_LZ4: u32 = 1;
pub const TYPE_LZ4_HC: u32 = 2;

/// How the payload in front of the footer is stored.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// Stored verbatim.
    None = TYPE_NONE,
    /// LZ4 block. Legacy; never written by this crate but still decoded.
    Lz4 = TYPE_LZ4,
    /// LZ4 block produced by the high-compression compressor.
    Lz4Hc = TYPE_LZ4_HC,
}

impl CompressionType {
    pub fn is_compressed(self) -> bool {
        !matches!(self, CompressionType::None)
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionType::None => "none",
            CompressionType::Lz4 => "lz4",
            CompressionType::Lz4Hc => "lz4hc",
        }
    }
}

impl TryFrom<u32> for CompressionType {
    type Error = DvplError;

    fn try_from(type_tag: u32) -> Result<Self> {
        match type_tag {
            TYPE_NONE => Ok(CompressionType::None),
            TYPE_LZ4 => Ok(CompressionType::Lz4),
            TYPE_LZ4_HC => Ok(CompressionType::Lz4Hc),
            _ => Err(DvplError::UnknownFormat { type_tag }),
        }
    }
}

impl From<CompressionType> for u32 {
    fn from(kind: CompressionType) -> Self {
        kind as u32
    }
}

// ── Footer ─────────────────────────────────────────────────────────────────

/// Decoded representation of the 20-byte DVPL footer.
///
/// `type_tag` is kept raw so that an unknown value survives parsing and can be
/// reported by the decoder; use [`Footer::compression_type`] to interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footer {
    /// Size of the payload once decompressed.
    pub original_size: u32,
    /// Size of the payload as stored in front of the footer.
    pub compressed_size: u32,
    /// CRC-32 of the stored payload, bit-cast to `i32`.
    pub crc32: i32,
    pub type_tag: u32,
}

impl Footer {
    /// Serialize to exactly `FOOTER_SIZE` bytes. Performs no validation.
    pub fn to_bytes(&self) -> [u8; FOOTER_SIZE] {
        let mut buf = [0u8; FOOTER_SIZE];
        buf[0..4].copy_from_slice(&self.original_size.to_le_bytes());
        buf[4..8].copy_from_slice(&self.compressed_size.to_le_bytes());
        buf[8..12].copy_from_slice(&self.crc32.to_le_bytes());
        buf[12..16].copy_from_slice(&self.type_tag.to_le_bytes());
        buf[16..20].copy_from_slice(MAGIC);
        buf
    }

    /// Parse the footer from the last `FOOTER_SIZE` bytes of `container`,
    /// checking the signature.
    ///
    /// Payload size and checksum are not checked here; see
    /// [`crate::decoder::decode`].
    pub fn parse(container: &[u8]) -> Result<Self> {
        let (_, footer) = split_container(container)?;

        if &footer[16..20] != MAGIC {
            return Err(DvplError::InvalidSignature {
                found: String::from_utf8_lossy(&footer[16..20]).into_owned(),
            });
        }

        Ok(Self {
            original_size: u32::from_le_bytes(read_word(footer, 0)),
            compressed_size: u32::from_le_bytes(read_word(footer, 4)),
            crc32: i32::from_le_bytes(read_word(footer, 8)),
            type_tag: u32::from_le_bytes(read_word(footer, 12)),
        })
    }

    pub fn compression_type(&self) -> Result<CompressionType> {
        CompressionType::try_from(self.type_tag)
    }

    /// Total container length this footer describes.
    pub fn container_len(&self) -> u64 {
        self.compressed_size as u64 + FOOTER_SIZE as u64
    }
}

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Footer={{oSize={}, cSize={}, crc32={}, type={}}}",
            self.original_size, self.compressed_size, self.crc32, self.type_tag
        )
    }
}

/// Split a container into its payload span and its footer span.
pub fn split_container(container: &[u8]) -> Result<(&[u8], &[u8; FOOTER_SIZE])> {
    let payload_len = container
        .len()
        .checked_sub(FOOTER_SIZE)
        .ok_or(DvplError::FooterTooSmall { len: container.len() })?;
    let (payload, footer) = container.split_at(payload_len);
    let footer: &[u8; FOOTER_SIZE] = footer
        .try_into()
        .map_err(|_| DvplError::FooterTooSmall { len: container.len() })?;
    Ok((payload, footer))
}

fn read_word(footer: &[u8; FOOTER_SIZE], at: usize) -> [u8; 4] {
    [footer[at], footer[at + 1], footer[at + 2], footer[at + 3]]
}
