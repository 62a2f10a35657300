/// Block compression capability used by the encoder and decoder.
///
/// Implementations work on raw, unprefixed LZ4 blocks: the decompressed size
/// is never stored inside the block, it comes from the DVPL footer.
///
/// Providers hold no per-call state, so one value can be shared across
/// threads and used for any number of containers.
pub trait CompressionProvider: Send + Sync {
    /// Human-readable provider name for logs and CLI display.
    fn name(&self) -> &'static str;

    /// Upper bound on the compressed size of `raw_len` input bytes.
    ///
    /// The encoder sizes its scratch buffer with this before calling
    /// [`compress_into`](Self::compress_into).
    fn max_compressed_len(&self, raw_len: usize) -> usize;

    /// Compress `raw` into `out` and return the number of bytes written.
    ///
    /// Returning 0 means "did not compress". This is a signal, not an error:
    /// the encoder falls back to storing `raw` verbatim.
    fn compress_into(&self, raw: &[u8], out: &mut [u8]) -> usize;

    /// Decompress one block into at most `expected_len` bytes.
    ///
    /// Returns whatever the block actually produced; the decoder compares
    /// that length to the footer. Fails if the block is malformed or would
    /// produce more than `expected_len` bytes.
    fn decompress(&self, compressed: &[u8], expected_len: usize) -> anyhow::Result<Vec<u8>>;
}
