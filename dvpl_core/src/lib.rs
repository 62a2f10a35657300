pub mod checksum;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod provider;

pub use checksum::crc32;
pub use decoder::{decode, inspect};
pub use encoder::encode;
pub use error::{DvplError, Result};
pub use format::{CompressionType, Footer, FOOTER_SIZE, MAGIC};
pub use provider::CompressionProvider;
