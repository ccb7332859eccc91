//! Decoder for self-describing MBC motion-controller log files.

/// Primitive reader, type catalog, value decoder and pack dispatcher.
pub mod mbc;
