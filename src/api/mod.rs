pub mod cell;
pub mod codec;
pub mod config;

pub use cell::Cell;
pub use codec::Codec;
pub use config::CodecConfig;
