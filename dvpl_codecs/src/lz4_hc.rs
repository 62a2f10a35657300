use anyhow::Context;
use dvpl_core::CompressionProvider;
use lz4::block::{self, CompressionMode};

/// Default LZ4HC level, the reference library's own default.
pub const DEFAULT_HC_LEVEL: i32 = 9;

/// LZ4HC block provider backed by liblz4.
///
/// This is the compressor the DVPL type tag 2 is named after. Blocks are
/// written without a size prefix; decompression uses the bounded "safe"
/// decoder, so a block can never write past `expected_len`.
///
/// Best for: packing assets once and reading them many times.
pub struct Lz4HcProvider {
    /// Compression level (1 = fastest, 12 = smallest).
    pub level: i32,
}

impl Default for Lz4HcProvider {
    fn default() -> Self {
        Self {
            level: DEFAULT_HC_LEVEL,
        }
    }
}

impl Lz4HcProvider {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl CompressionProvider for Lz4HcProvider {
    fn name(&self) -> &'static str {
        "lz4hc"
    }

    fn max_compressed_len(&self, raw_len: usize) -> usize {
        // compress_bound only fails past i32::MAX; fall back to the LZ4 formula.
        block::compress_bound(raw_len).unwrap_or(raw_len + raw_len / 255 + 16)
    }

    fn compress_into(&self, raw: &[u8], out: &mut [u8]) -> usize {
        let mode = Some(CompressionMode::HIGHCOMPRESSION(self.level));
        match block::compress_to_buffer(raw, mode, false, out) {
            Ok(written) => written,
            Err(e) => {
                log::debug!("lz4hc could not compress {} bytes: {}", raw.len(), e);
                0
            }
        }
    }

    fn decompress(&self, compressed: &[u8], expected_len: usize) -> anyhow::Result<Vec<u8>> {
        let capacity = i32::try_from(expected_len)
            .with_context(|| format!("lz4 output size {expected_len} exceeds i32::MAX"))?;
        let mut raw = vec![0u8; expected_len];
        let written = block::decompress_to_buffer(compressed, Some(capacity), &mut raw)
            .context("lz4 decompress error")?;
        raw.truncate(written);
        Ok(raw)
    }
}
