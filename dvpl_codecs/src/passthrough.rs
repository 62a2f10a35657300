use dvpl_core::CompressionProvider;

use crate::lz4_fast::decode_block;

/// Provider that never compresses: every container it encodes is type 0.
///
/// Useful for:
/// - Packing files the game reads faster uncompressed.
/// - Data that is already compressed (textures, audio) where LZ4 would not
///   shrink it anyway.
///
/// It still decodes LZ4 blocks, so it can unpack any DVPL container.
pub struct StoreProvider;

impl CompressionProvider for StoreProvider {
    fn name(&self) -> &'static str {
        "store"
    }

    fn max_compressed_len(&self, _raw_len: usize) -> usize {
        0
    }

    fn compress_into(&self, _raw: &[u8], _out: &mut [u8]) -> usize {
        0
    }

    fn decompress(&self, compressed: &[u8], expected_len: usize) -> anyhow::Result<Vec<u8>> {
        decode_block(compressed, expected_len)
    }
}
