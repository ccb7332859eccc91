use std::fs;
use std::path::Path;

use log::info;

use crate::mbc::bytes::Cursor;
use crate::mbc::{DecodeOptions, Node, Result, decode_body, decode_header};

/// Decode only the file header.
pub fn read_header(bytes: &[u8]) -> Node {
	let mut cursor = Cursor::new(bytes);
	decode_header(&mut cursor)
}

/// Decode the header and every pack with default limits.
pub fn read_file(bytes: &[u8]) -> Result<(Node, Vec<Node>)> {
	read_file_with(bytes, &DecodeOptions::default())
}

/// Decode the header and every pack.
pub fn read_file_with(bytes: &[u8], opt: &DecodeOptions) -> Result<(Node, Vec<Node>)> {
	let mut cursor = Cursor::new(bytes);
	let header = decode_header(&mut cursor);
	let packs = decode_body(&mut cursor, opt)?;
	Ok((header, packs))
}

/// Log file loaded fully into memory.
pub struct LogFile {
	bytes: Vec<u8>,
}

impl LogFile {
	/// Read a log file into memory.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let log = Self::from_bytes(fs::read(path)?);
		info!("opened {} ({} bytes)", path.display(), log.bytes.len());
		Ok(log)
	}

	/// Wrap in-memory log bytes.
	pub fn from_bytes(bytes: Vec<u8>) -> Self {
		Self { bytes }
	}

	/// Raw log bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Decode only the header.
	pub fn read_header(&self) -> Node {
		read_header(&self.bytes)
	}

	/// Decode the header and every pack.
	pub fn read_file(&self, opt: &DecodeOptions) -> Result<(Node, Vec<Node>)> {
		read_file_with(&self.bytes, opt)
	}
}
