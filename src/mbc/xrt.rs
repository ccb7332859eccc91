use log::debug;

use crate::mbc::bytes::Cursor;
use crate::mbc::{DecodeOptions, Result, TypeCatalog, VarDef, parse_var_defs};

/// Per-pack schema: type catalog plus variable layout.
#[derive(Debug, Clone)]
pub struct Xrt {
	/// Schema version byte.
	pub version: u8,
	/// Type definitions by user code.
	pub types: TypeCatalog,
	/// Variables in file order.
	pub vars: Vec<VarDef>,
	/// Declared record length in bytes; `0` before [`Xrt::EXTENDED_VERSION`].
	pub nbytes: u16,
	/// File attribute byte; `0` before [`Xrt::EXTENDED_VERSION`].
	pub fattrib: u8,
}

impl Xrt {
	/// First version carrying the record length and attribute trailer.
	pub const EXTENDED_VERSION: u8 = 128;

	/// Parse one XRT block including its length prefix and checksum.
	pub fn parse(cursor: &mut Cursor<'_>, opt: &DecodeOptions) -> Result<Self> {
		let _len = cursor.read_u32_le();
		let version = cursor.read_u8();
		let types = TypeCatalog::parse(cursor, opt)?;
		let vars = parse_var_defs(cursor);

		let (nbytes, fattrib) = if version >= Self::EXTENDED_VERSION {
			(cursor.read_u16_le(), cursor.read_u8())
		} else {
			(0, 0)
		};
		let _crc = cursor.read_u32_be();

		debug!(
			"xrt version={version} types={} vars={} nbytes={nbytes} fattrib={fattrib}",
			types.len(),
			vars.len()
		);

		Ok(Self {
			version,
			types,
			vars,
			nbytes,
			fattrib,
		})
	}
}
