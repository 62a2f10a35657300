use dvpl_core::CompressionProvider;
use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size};

/// Pure-Rust LZ4 block provider.
///
/// Compresses with the fast LZ4 matcher, so ratios are lower than
/// [`Lz4HcProvider`](crate::Lz4HcProvider), but the output is an ordinary LZ4
/// block that any LZ4 decoder (and every DVPL reader) accepts.
///
/// Best for: repacking large asset trees quickly.
pub struct Lz4FastProvider;

impl CompressionProvider for Lz4FastProvider {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn max_compressed_len(&self, raw_len: usize) -> usize {
        get_maximum_output_size(raw_len)
    }

    fn compress_into(&self, raw: &[u8], out: &mut [u8]) -> usize {
        match compress_into(raw, out) {
            Ok(written) => written,
            Err(e) => {
                log::debug!("lz4 could not compress {} bytes: {}", raw.len(), e);
                0
            }
        }
    }

    fn decompress(&self, compressed: &[u8], expected_len: usize) -> anyhow::Result<Vec<u8>> {
        decode_block(compressed, expected_len)
    }
}

/// Decode a raw LZ4 block into a buffer of `expected_len` bytes and trim it
/// to what the block actually produced.
pub(crate) fn decode_block(compressed: &[u8], expected_len: usize) -> anyhow::Result<Vec<u8>> {
    let mut raw = vec![0u8; expected_len];
    let written = decompress_into(compressed, &mut raw)
        .map_err(|e| anyhow::anyhow!("lz4 decompress error: {}", e))?;
    raw.truncate(written);
    Ok(raw)
}
