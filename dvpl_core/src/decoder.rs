use crate::checksum::crc32;
use crate::error::{DvplError, Result};
use crate::format::{split_container, CompressionType, Footer};
use crate::provider::CompressionProvider;

/// Unwrap a DVPL container and return the original payload.
///
/// # Validation sequence
/// 1. Parse the footer (length ≥ 20, signature `"DVPL"`).
/// 2. The payload span in front of the footer must be exactly
///    `compressed_size` bytes.
/// 3. Its CRC-32 must match the footer, before any decompression is tried.
/// 4. Branch on the type tag: 0 returns the span as-is once
///    `original_size == compressed_size`; 1 and 2 decompress and require
///    exactly `original_size` bytes back; anything else is rejected.
///
/// The first violated invariant ends the decode.
pub fn decode(container: &[u8], provider: &dyn CompressionProvider) -> Result<Vec<u8>> {
    let footer = Footer::parse(container)?;
    log::debug!("read {footer}");

    let (payload, _) = split_container(container)?;

    if payload.len() != footer.compressed_size as usize {
        return Err(DvplError::SizeMismatch {
            payload_len: payload.len(),
            compressed_size: footer.compressed_size,
        });
    }

    let computed = crc32(payload);
    if computed != footer.crc32 {
        return Err(DvplError::ChecksumMismatch {
            computed,
            expected: footer.crc32,
        });
    }

    match footer.compression_type()? {
        CompressionType::None => {
            if footer.original_size != footer.compressed_size {
                return Err(DvplError::UncompressedSizeMismatch {
                    original_size: footer.original_size,
                    compressed_size: footer.compressed_size,
                });
            }
            Ok(payload.to_vec())
        }
        CompressionType::Lz4 | CompressionType::Lz4Hc => {
            let raw = provider
                .decompress(payload, footer.original_size as usize)
                .map_err(|e| DvplError::Decompression {
                    provider: provider.name(),
                    message: format!("{e:#}"),
                })?;
            log::trace!(
                "{} decompressed {} bytes into {}",
                provider.name(),
                payload.len(),
                raw.len()
            );

            if raw.len() != footer.original_size as usize {
                return Err(DvplError::DecompressedSizeMismatch {
                    expected: footer.original_size,
                    actual: raw.len(),
                });
            }
            Ok(raw)
        }
    }
}

/// Read only the footer of a container, without touching the payload.
pub fn inspect(container: &[u8]) -> Result<Footer> {
    Footer::parse(container)
}
