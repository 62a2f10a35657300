use crate::checksum::crc32;
use crate::error::{DvplError, Result};
use crate::format::{CompressionType, Footer, FOOTER_SIZE};
use crate::provider::CompressionProvider;

/// Wrap `payload` in a DVPL container.
///
/// # Layout written
/// ```text
/// [PAYLOAD: raw bytes, or the LZ4HC block when compression paid off]
/// [FOOTER: 20 bytes: sizes, crc32 of the stored payload, type, "DVPL"]
/// ```
///
/// With `compress` set, the payload is compressed speculatively into a
/// scratch buffer sized by [`CompressionProvider::max_compressed_len`]. The
/// result is discarded, and the payload stored with type 0, when the provider
/// returns 0 bytes or the block is not strictly smaller than the input.
pub fn encode(
    payload: &[u8],
    compress: bool,
    provider: &dyn CompressionProvider,
) -> Result<Vec<u8>> {
    let original_size = size_field(payload.len())?;

    if compress {
        let mut scratch = vec![0u8; provider.max_compressed_len(payload.len())];
        let written = provider.compress_into(payload, &mut scratch);
        log::trace!(
            "{} compressed {} bytes into {} (scratch {})",
            provider.name(),
            payload.len(),
            written,
            scratch.len()
        );

        if written > 0 && written < payload.len() {
            scratch.truncate(written);
            let footer = Footer {
                original_size,
                compressed_size: size_field(written)?,
                crc32: crc32(&scratch),
                type_tag: CompressionType::Lz4Hc.into(),
            };
            log::debug!("storing compressed payload: {footer}");
            return Ok(assemble(&scratch, &footer));
        }

        log::debug!(
            "compression did not shrink {} bytes (got {}); storing uncompressed",
            payload.len(),
            written
        );
    }

    let footer = Footer {
        original_size,
        compressed_size: original_size,
        crc32: crc32(payload),
        type_tag: CompressionType::None.into(),
    };
    log::debug!("storing uncompressed payload: {footer}");
    Ok(assemble(payload, &footer))
}

fn assemble(stored: &[u8], footer: &Footer) -> Vec<u8> {
    let mut out = Vec::with_capacity(stored.len() + FOOTER_SIZE);
    out.extend_from_slice(stored);
    out.extend_from_slice(&footer.to_bytes());
    out
}

fn size_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| DvplError::PayloadTooLarge { len })
}
