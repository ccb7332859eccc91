use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, MbcError>;

/// Errors produced while opening and decoding MBC log files.
///
/// Running off the end of the byte source is deliberately absent: the reader
/// latches a "not good" state instead, which the pack loop treats as end of input.
#[derive(Debug, Error)]
pub enum MbcError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Pack tag outside the known snapshot/time-series/supervision set.
	#[error("unknown pack type {tag} at offset {at}")]
	UnknownPackType {
		/// Tag byte read from the stream.
		tag: u8,
		/// Byte offset of the tag.
		at: usize,
	},
	/// Scalar decode requested for a code with no primitive kind.
	#[error("unknown base type code {code}")]
	UnknownBaseType {
		/// Offending type code.
		code: u16,
	},
	/// Type code referenced by a variable or field is absent from the catalog.
	#[error("type code {code} not found in catalog")]
	MissingType {
		/// Missing type code.
		code: u16,
	},
	/// Bitfield definition declared a width outside `1..=32`.
	#[error("invalid bitfield width {bits}")]
	InvalidBitfieldWidth {
		/// Declared width in bits.
		bits: u8,
	},
	/// Time-series record count was negative but not the `-1` sentinel.
	#[error("negative record count {count}")]
	NegativeRecordCount {
		/// Parsed signed count.
		count: i32,
	},
	/// Time-series record count exceeded configured limit.
	#[error("too many records: count={count}, max={max}")]
	TooManyRecords {
		/// Declared or decoded record count.
		count: usize,
		/// Maximum permitted record count.
		max: usize,
	},
	/// Recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Array element count exceeded configured limit.
	#[error("decode array too large: count={count}, max={max}")]
	DecodeArrayTooLarge {
		/// Declared element count.
		count: usize,
		/// Maximum permitted element count.
		max: usize,
	},
}
