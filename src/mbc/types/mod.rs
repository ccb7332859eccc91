use std::collections::HashMap;

use log::trace;

use crate::mbc::bytes::Cursor;
use crate::mbc::{DecodeOptions, MbcError, Result};

/// Base code of a bitfield definition.
pub const BITFIELD_CODE: u16 = 4;
/// Base code of a pointer definition.
pub const POINTER_CODE: u16 = 5;
/// Base code of a fixed-size array definition.
pub const ARRAY_CODE: u16 = 6;
/// Base code of a record definition.
pub const RECORD_CODE: u16 = 7;

/// Fixed-width primitive kinds addressable by base code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
	/// Code 0.
	I32,
	/// Code 1.
	U32,
	/// Code 2.
	F32,
	/// Code 3.
	U8,
	/// Code 8, stored in complement form.
	I16,
	/// Code 9.
	U16,
}

impl ScalarKind {
	/// Map a base code to its scalar kind.
	pub fn from_code(code: u16) -> Option<Self> {
		match code {
			0 => Some(Self::I32),
			1 => Some(Self::U32),
			2 => Some(Self::F32),
			3 => Some(Self::U8),
			8 => Some(Self::I16),
			9 => Some(Self::U16),
			_ => None,
		}
	}

	/// Base code of this kind.
	pub fn code(self) -> u16 {
		match self {
			Self::I32 => 0,
			Self::U32 => 1,
			Self::F32 => 2,
			Self::U8 => 3,
			Self::I16 => 8,
			Self::U16 => 9,
		}
	}

	/// Encoded width in bytes.
	pub fn width(self) -> usize {
		match self {
			Self::U8 => 1,
			Self::I16 | Self::U16 => 2,
			Self::I32 | Self::U32 | Self::F32 => 4,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::I32 => "int32",
			Self::U32 => "uint32",
			Self::F32 => "float32",
			Self::U8 => "uint8",
			Self::I16 => "int16",
			Self::U16 => "uint16",
		}
	}
}

/// Recursive type definition parsed from an XRT type catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
	/// Fixed primitive.
	Scalar(ScalarKind),
	/// Sub-word integer read from a 32-bit window.
	Bitfield {
		/// Width in bits, `1..=32`.
		bits: u8,
		/// Declared signedness.
		signed: bool,
	},
	/// Opaque 32-bit pointer; never followed.
	Pointer {
		/// Referenced type code.
		target: u16,
		/// Storage class byte.
		storage: u8,
	},
	/// Fixed-count array of one element type.
	Array {
		/// Element definition.
		elem: Box<TypeDef>,
		/// Element count.
		len: u32,
	},
	/// Named fields in declaration order.
	Record(Vec<RecordField>),
	/// Indirect code resolved through the catalog at decode time.
	Ref(u16),
}

/// One field of a record definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
	/// Field name.
	pub name: String,
	/// Field type.
	pub ty: TypeDef,
}

impl TypeDef {
	/// Parse the definition body that follows `code` in the catalog stream.
	///
	/// Scalar and indirect codes carry no body.
	pub fn parse(cursor: &mut Cursor<'_>, code: u16, opt: &DecodeOptions) -> Result<Self> {
		parse_def(cursor, code, opt, 0)
	}
}

fn parse_def(cursor: &mut Cursor<'_>, code: u16, opt: &DecodeOptions, depth: u32) -> Result<TypeDef> {
	if depth >= opt.max_depth {
		return Err(MbcError::DecodeDepthExceeded { max_depth: opt.max_depth });
	}

	if let Some(kind) = ScalarKind::from_code(code) {
		return Ok(TypeDef::Scalar(kind));
	}

	match code {
		BITFIELD_CODE => {
			let raw = cursor.read_u8();
			let bits = raw & 0x7F;
			if bits == 0 || bits > 32 {
				return Err(MbcError::InvalidBitfieldWidth { bits });
			}
			Ok(TypeDef::Bitfield {
				bits,
				signed: raw & 0x80 != 0,
			})
		}
		POINTER_CODE => {
			let target = cursor.read_u16_le();
			let storage = cursor.read_u8();
			Ok(TypeDef::Pointer { target, storage })
		}
		ARRAY_CODE => {
			let elem_code = cursor.read_u16_le();
			let elem = parse_def(cursor, elem_code, opt, depth + 1)?;
			let len = cursor.read_u32_le();
			Ok(TypeDef::Array { elem: Box::new(elem), len })
		}
		RECORD_CODE => {
			let count = cursor.read_u8();
			let mut fields = Vec::with_capacity(usize::from(count));
			for _ in 0..count {
				let name = cursor.read_string();
				let field_code = cursor.read_u16_le();
				let ty = parse_def(cursor, field_code, opt, depth + 1)?;
				fields.push(RecordField { name, ty });
			}
			Ok(TypeDef::Record(fields))
		}
		_ => Ok(TypeDef::Ref(code)),
	}
}

/// Type definitions keyed by user code, populated in file order.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
	types: HashMap<u16, TypeDef>,
}

impl TypeCatalog {
	/// Create an empty catalog.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse `(base code, user code, body)` entries until a zero base code.
	///
	/// A later entry for the same user code replaces the earlier one.
	pub fn parse(cursor: &mut Cursor<'_>, opt: &DecodeOptions) -> Result<Self> {
		let mut catalog = Self::new();
		while cursor.good() {
			let base_code = cursor.read_u8();
			if base_code == 0 {
				break;
			}
			let user_code = cursor.read_u16_le();
			let def = TypeDef::parse(cursor, u16::from(base_code), opt)?;
			trace!("type {user_code} = base {base_code}: {def:?}");
			catalog.insert(user_code, def);
		}
		Ok(catalog)
	}

	/// Register `def` under `code`.
	pub fn insert(&mut self, code: u16, def: TypeDef) {
		self.types.insert(code, def);
	}

	/// Look up a definition.
	pub fn get(&self, code: u16) -> Option<&TypeDef> {
		self.types.get(&code)
	}

	/// Look up a definition, failing on absent codes.
	pub fn resolve(&self, code: u16) -> Result<&TypeDef> {
		self.get(code).ok_or(MbcError::MissingType { code })
	}

	/// Number of registered codes.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Return `true` when no code is registered.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Registered codes in ascending order.
	pub fn codes(&self) -> Vec<u16> {
		let mut codes: Vec<u16> = self.types.keys().copied().collect();
		codes.sort_unstable();
		codes
	}
}
