use log::{debug, warn};

use crate::mbc::bytes::Cursor;
use crate::mbc::{DecodeOptions, MbcError, Node, Result, Xrt, decode_supervision, decode_variables};

/// Pack tag that carries no trailing checksum. Never produced by the known pack kinds.
const NO_TRAILER_TAG: u8 = 8;

/// Known top-level pack kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackKind {
	/// One record of every variable.
	Snapshot,
	/// Sampled or triggered records.
	TimeSeries,
	/// Supervision state and fault table.
	Supervision,
}

impl PackKind {
	/// Map a pack tag byte to its kind.
	pub fn from_tag(tag: u8) -> Option<Self> {
		match tag {
			0 => Some(Self::Snapshot),
			1 => Some(Self::TimeSeries),
			7 => Some(Self::Supervision),
			_ => None,
		}
	}

	/// Tag byte of this kind.
	pub fn tag(self) -> u8 {
		match self {
			Self::Snapshot => 0,
			Self::TimeSeries => 1,
			Self::Supervision => 7,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Snapshot => "snapshot",
			Self::TimeSeries => "time_series",
			Self::Supervision => "supervision",
		}
	}
}

/// Decode packs until the source is exhausted.
///
/// Each pack node gets its tag under `"type"`. An unknown tag aborts the
/// whole body; no partial list is returned.
pub fn decode_body(cursor: &mut Cursor<'_>, opt: &DecodeOptions) -> Result<Vec<Node>> {
	let mut packs = Vec::new();
	while cursor.good() {
		let at = cursor.pos();
		let tag = cursor.read_u8();
		let kind = PackKind::from_tag(tag).ok_or(MbcError::UnknownPackType { tag, at })?;
		debug!("pack {} ({}) at offset {at}", tag, kind.as_str());

		let mut pack = decode_pack(cursor, kind, opt)?;
		pack.insert("type", tag);

		if tag != NO_TRAILER_TAG && cursor.remaining() >= 4 {
			let _crc = cursor.read_u32_le();
		}
		packs.push(pack);
	}
	Ok(packs)
}

/// Decode the body of one pack whose tag was already consumed.
pub fn decode_pack(cursor: &mut Cursor<'_>, kind: PackKind, opt: &DecodeOptions) -> Result<Node> {
	match kind {
		PackKind::Snapshot => decode_snapshot(cursor, opt),
		PackKind::TimeSeries => decode_time_series(cursor, opt),
		PackKind::Supervision => Ok(decode_supervision_pack(cursor)),
	}
}

fn decode_snapshot(cursor: &mut Cursor<'_>, opt: &DecodeOptions) -> Result<Node> {
	let xrt = Xrt::parse(cursor, opt)?;
	decode_variables(cursor, &xrt, opt)
}

fn decode_time_series(cursor: &mut Cursor<'_>, opt: &DecodeOptions) -> Result<Node> {
	let mut pack = Node::new();
	pack.insert("sampling_rate", cursor.read_u32_le());
	pack.insert("pre_trigger_length", cursor.read_u32_le());
	let xrt = Xrt::parse(cursor, opt)?;

	let count = cursor.read_i32_le();
	let data = match count {
		-1 => read_until_exhausted(cursor, &xrt, opt)?,
		n if n < 0 => return Err(MbcError::NegativeRecordCount { count }),
		n => read_counted(cursor, &xrt, n as usize, opt)?,
	};
	debug!("time series: {} records (declared {count})", data.len());

	pack.insert("data", data);
	Ok(pack)
}

fn read_until_exhausted(cursor: &mut Cursor<'_>, xrt: &Xrt, opt: &DecodeOptions) -> Result<Vec<Node>> {
	let mut data = Vec::new();
	while cursor.good() {
		if data.len() >= opt.max_records {
			return Err(MbcError::TooManyRecords {
				count: data.len() + 1,
				max: opt.max_records,
			});
		}

		let start = cursor.pos();
		data.push(decode_variables(cursor, xrt, opt)?);
		if cursor.pos() == start {
			warn!("record at offset {start} consumed no bytes, stopping");
			break;
		}
	}
	Ok(data)
}

fn read_counted(cursor: &mut Cursor<'_>, xrt: &Xrt, count: usize, opt: &DecodeOptions) -> Result<Vec<Node>> {
	if count > opt.max_records {
		return Err(MbcError::TooManyRecords { count, max: opt.max_records });
	}

	let mut data = Vec::with_capacity(count.min(cursor.remaining()));
	for _ in 0..count {
		data.push(decode_variables(cursor, xrt, opt)?);
	}
	if cursor.overran() {
		warn!("declared {count} records ran past the end of the source, trailing records are zero-filled");
	}
	Ok(data)
}

fn decode_supervision_pack(cursor: &mut Cursor<'_>) -> Node {
	let state_len = cursor.read_u32_le() as usize;
	let states = cursor.read_u8_vec(state_len);
	let mut node = decode_supervision(cursor);
	node.insert("states", states);
	node
}

#[cfg(test)]
mod tests;
