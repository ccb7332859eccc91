use crate::mbc::Node;
use crate::mbc::bytes::Cursor;

/// Decode a supervision (fault table) block.
///
/// The leading length counts everything after itself, including the trailing
/// checksum. The fault mask vector is only present when the name and help
/// runs leave bytes before that length is reached.
pub fn decode_supervision(cursor: &mut Cursor<'_>) -> Node {
	let mut node = Node::new();
	let declared = cursor.read_u32_le().saturating_sub(4) as usize;
	let start = cursor.pos();

	node.insert("file_version", cursor.read_u8());
	node.insert("file_attribute", cursor.read_u8());
	let code_count = usize::from(cursor.read_u16_le());
	node.insert("faultcode", cursor.read_u16_vec(code_count));
	node.insert("faultnames", read_string_run(cursor));
	node.insert("faulthelp", read_string_run(cursor));

	if cursor.pos().saturating_sub(start) < declared {
		let mask_count = cursor.read_u32_le() as usize;
		node.insert("faultmask", cursor.read_u32_vec(mask_count));
	}

	let _crc = cursor.read_u32_le();
	node
}

fn read_string_run(cursor: &mut Cursor<'_>) -> Vec<String> {
	let len = cursor.read_u32_le() as usize;
	let start = cursor.pos();
	let mut out = Vec::new();
	while cursor.pos().saturating_sub(start) < len && !cursor.overran() {
		out.push(cursor.read_string());
	}
	out
}
