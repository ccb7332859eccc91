use crate::mbc::bytes::Cursor;

/// One named variable of a pack record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDef {
	/// Variable name, used as the top-level key of its decoded value.
	pub name: String,
	/// Type code, resolved through the pack's type catalog.
	pub type_code: u16,
	/// Measurement type tag. Opaque.
	pub mtype: u8,
	/// Byte offset of the encoded value relative to the record base.
	pub address: u32,
	/// Attribute bitmask. Opaque.
	pub attrib: u16,
}

/// Parse variable descriptors until the end-of-list marker.
///
/// The list ends with a name that is a lone NUL byte on the wire, which reads
/// back as an empty name.
pub fn parse_var_defs(cursor: &mut Cursor<'_>) -> Vec<VarDef> {
	let mut vars = Vec::new();
	while cursor.good() {
		let name = cursor.read_string();
		if name.is_empty() {
			break;
		}
		vars.push(VarDef {
			name,
			type_code: cursor.read_u16_le(),
			mtype: cursor.read_u8(),
			address: cursor.read_u32_le(),
			attrib: cursor.read_u16_le(),
		});
	}
	vars
}
