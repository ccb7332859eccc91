use crate::mbc::Node;
use crate::mbc::bytes::Cursor;

/// Decode the fixed file header.
///
/// The two trailing checksums are consumed and dropped.
pub fn decode_header(cursor: &mut Cursor<'_>) -> Node {
	let mut header = Node::new();
	header.insert("text", cursor.read_string());
	header.insert("mbc_id", cursor.read_string());
	header.insert("serial_number", cursor.read_string());
	header.insert("server_version", cursor.read_u16_le());
	header.insert("format_version", cursor.read_u8());
	header.insert("timestamp_year", cursor.read_u16_le());
	header.insert("timestamp_month", cursor.read_u8());
	header.insert("timestamp_day", cursor.read_u8());
	header.insert("timestamp_hour", cursor.read_u8());
	header.insert("timestamp_minute", cursor.read_u8());
	header.insert("timestamp_second", cursor.read_u8());
	header.insert("fault_counter", cursor.read_i32_le());
	let state_len = cursor.read_u32_le() as usize;
	header.insert("supervision_state", cursor.read_u8_vec(state_len));
	let _supervision_crc = cursor.read_u32_le();
	let _crc = cursor.read_u32_le();
	header
}
