mod lz4_fast;
mod lz4_hc;
mod passthrough;

pub use lz4_fast::Lz4FastProvider;
pub use lz4_hc::{Lz4HcProvider, DEFAULT_HC_LEVEL};
pub use passthrough::StoreProvider;

use dvpl_core::CompressionProvider;

/// Resolve a provider from its CLI name.
///
/// `level` only applies to the LZ4HC provider.
pub fn provider_by_name(name: &str, level: i32) -> anyhow::Result<Box<dyn CompressionProvider>> {
    match name.to_ascii_lowercase().as_str() {
        "hc" | "lz4hc" => Ok(Box::new(Lz4HcProvider::new(level))),
        "fast" | "lz4" | "flex" => Ok(Box::new(Lz4FastProvider)),
        "store" | "none" => Ok(Box::new(StoreProvider)),
        other => anyhow::bail!(
            "unknown compressor '{}'. Valid options: hc, fast, store",
            other
        ),
    }
}
