pub mod preview;

pub use preview::{NftMetadata, Preview};
