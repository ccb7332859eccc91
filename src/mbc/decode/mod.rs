use crate::mbc::bytes::Cursor;
use crate::mbc::{MbcError, Node, Result, ScalarKind, TypeCatalog, TypeDef, Value, Xrt};

/// Runtime limits for catalog construction and value decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum recursion depth through nested and referenced definitions.
	pub max_depth: u32,
	/// Maximum total array elements expanded while decoding one value,
	/// counted across every nested array.
	pub max_array_elems: usize,
	/// Maximum record count of one time-series pack.
	pub max_records: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_array_elems: 1 << 20,
			max_records: 1 << 24,
		}
	}
}

impl DecodeOptions {
	/// Preset with tight limits for untrusted input.
	pub fn strict() -> Self {
		Self {
			max_depth: 16,
			max_array_elems: 4096,
			max_records: 1 << 16,
		}
	}
}

/// Decode one scalar by base code.
pub fn read_base_type(cursor: &mut Cursor<'_>, code: u16) -> Result<Value> {
	let kind = ScalarKind::from_code(code).ok_or(MbcError::UnknownBaseType { code })?;
	Ok(read_scalar(cursor, kind))
}

fn read_scalar(cursor: &mut Cursor<'_>, kind: ScalarKind) -> Value {
	match kind {
		ScalarKind::I32 => Value::I32(cursor.read_i32_le()),
		ScalarKind::U32 => Value::U32(cursor.read_u32_le()),
		ScalarKind::F32 => Value::F32(cursor.read_f32_le()),
		ScalarKind::U8 => Value::U8(cursor.read_u8()),
		ScalarKind::I16 => Value::I16(cursor.read_i16_le()),
		ScalarKind::U16 => Value::U16(cursor.read_u16_le()),
	}
}

/// Decode `def` at the cursor into `out`, keyed by `key`.
///
/// Arrays and records flatten into `key[n]` and `key.field` entries of the
/// same node. References recurse with the unchanged key.
pub fn decode_value(cursor: &mut Cursor<'_>, types: &TypeCatalog, def: &TypeDef, key: &str, out: &mut Node, opt: &DecodeOptions) -> Result<()> {
	let mut ctx = DecodeCtx {
		types,
		opt,
		elems_left: opt.max_array_elems,
	};
	decode_impl(&mut ctx, cursor, def, key, out, 0)
}

struct DecodeCtx<'a> {
	types: &'a TypeCatalog,
	opt: &'a DecodeOptions,
	elems_left: usize,
}

fn decode_impl(ctx: &mut DecodeCtx<'_>, cursor: &mut Cursor<'_>, def: &TypeDef, key: &str, out: &mut Node, depth: u32) -> Result<()> {
	let opt = ctx.opt;
	if depth >= opt.max_depth {
		return Err(MbcError::DecodeDepthExceeded { max_depth: opt.max_depth });
	}

	match def {
		TypeDef::Scalar(kind) => out.insert(key, read_scalar(cursor, *kind)),
		TypeDef::Bitfield { bits, signed } => out.insert(key, cursor.read_bits(*bits, *signed)),
		TypeDef::Pointer { .. } => out.insert(key, cursor.read_u32_le()),
		TypeDef::Array { elem, len } => {
			let count = usize::try_from(*len).unwrap_or(usize::MAX);
			if count > ctx.elems_left {
				return Err(MbcError::DecodeArrayTooLarge {
					count,
					max: opt.max_array_elems,
				});
			}
			ctx.elems_left -= count;
			for idx in 0..count {
				decode_impl(ctx, cursor, elem, &format!("{key}[{idx}]"), out, depth + 1)?;
			}
		}
		TypeDef::Record(fields) => {
			for field in fields {
				decode_impl(ctx, cursor, &field.ty, &format!("{key}.{}", field.name), out, depth + 1)?;
			}
		}
		TypeDef::Ref(code) => {
			let types = ctx.types;
			let target = types.resolve(*code)?;
			decode_impl(ctx, cursor, target, key, out, depth + 1)?;
		}
	}

	Ok(())
}

/// Decode every variable of `xrt` as one record.
///
/// Each variable is read at `base + address`, where `base` is the cursor
/// position on entry. The cursor finishes at `base + nbytes` regardless of
/// how far the variables reached.
pub fn decode_variables(cursor: &mut Cursor<'_>, xrt: &Xrt, opt: &DecodeOptions) -> Result<Node> {
	let base = cursor.pos();
	let mut record = Node::new();

	for var in &xrt.vars {
		cursor.seek(base.saturating_add(var.address as usize));
		let fallback;
		let def = match xrt.types.get(var.type_code) {
			Some(def) => def,
			None => {
				let kind = ScalarKind::from_code(var.type_code).ok_or(MbcError::MissingType { code: var.type_code })?;
				fallback = TypeDef::Scalar(kind);
				&fallback
			}
		};
		decode_value(cursor, &xrt.types, def, &var.name, &mut record, opt)?;
	}

	cursor.seek(base.saturating_add(usize::from(xrt.nbytes)));
	Ok(record)
}
