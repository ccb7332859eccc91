//! Byte-level encoders for assembling MBC log fixtures in tests.

/// Append-only little-endian byte writer mirroring the decoder's primitive reads.
#[derive(Debug, Default, Clone)]
pub struct LogBuilder {
	bytes: Vec<u8>,
}

impl LogBuilder {
	/// Create an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current length in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return `true` when nothing was written yet.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Append raw bytes.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Append one unsigned byte.
	pub fn u8(self, value: u8) -> Self {
		self.raw(&[value])
	}

	/// Append a little-endian `u16`.
	pub fn u16(self, value: u16) -> Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a signed 16-bit value in the device's complement convention.
	pub fn i16(self, value: i16) -> Self {
		self.u16((value as u16) ^ 0xFFFF)
	}

	/// Append a little-endian `u32`.
	pub fn u32(self, value: u32) -> Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a big-endian `u32`.
	pub fn u32_be(self, value: u32) -> Self {
		self.raw(&value.to_be_bytes())
	}

	/// Append a little-endian `i32`.
	pub fn i32(self, value: i32) -> Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `f32`.
	pub fn f32(self, value: f32) -> Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a string as Latin-1 bytes plus a NUL terminator.
	///
	/// Characters above U+00FF are not representable and panic.
	pub fn cstr(self, value: &str) -> Self {
		let mut bytes: Vec<u8> = value
			.chars()
			.map(|ch| u8::try_from(u32::from(ch)).expect("latin-1 character"))
			.collect();
		bytes.push(0);
		self.raw(&bytes)
	}

	/// Pad with zero bytes up to `len` total bytes.
	pub fn pad_to(mut self, len: usize) -> Self {
		if self.bytes.len() < len {
			self.bytes.resize(len, 0);
		}
		self
	}

	/// Finish and return the encoded bytes.
	pub fn build(self) -> Vec<u8> {
		self.bytes
	}
}

/// Encoders for type-definition bodies, i.e. the bytes following a base code.
pub mod typedef {
	use super::LogBuilder;

	/// Bitfield body: width in the low 7 bits, sign flag in the high bit.
	pub fn bitfield(bits: u8, signed: bool) -> Vec<u8> {
		vec![(bits & 0x7F) | if signed { 0x80 } else { 0 }]
	}

	/// Pointer body: target code and storage class.
	pub fn pointer(target: u16, storage: u8) -> Vec<u8> {
		LogBuilder::new().u16(target).u8(storage).build()
	}

	/// Array body: element code, element body, element count.
	pub fn array(elem_code: u16, elem_body: &[u8], count: u32) -> Vec<u8> {
		LogBuilder::new().u16(elem_code).raw(elem_body).u32(count).build()
	}

	/// Record body: field count, then `(name, code, body)` per field.
	pub fn record(fields: &[(&str, u16, &[u8])]) -> Vec<u8> {
		let count = u8::try_from(fields.len()).expect("record field count fits u8");
		let mut out = LogBuilder::new().u8(count);
		for (name, code, body) in fields {
			out = out.cstr(name).u16(*code).raw(body);
		}
		out.build()
	}
}

/// Builder for one XRT schema block.
#[derive(Debug, Clone)]
pub struct XrtBuilder {
	version: u8,
	types: LogBuilder,
	vars: LogBuilder,
	nbytes: u16,
	fattrib: u8,
}

impl XrtBuilder {
	/// Start an XRT block with the given version byte.
	pub fn new(version: u8) -> Self {
		Self {
			version,
			types: LogBuilder::new(),
			vars: LogBuilder::new(),
			nbytes: 0,
			fattrib: 0,
		}
	}

	/// Register `user_code` as a definition of `base_code` with an encoded body.
	pub fn type_def(mut self, base_code: u8, user_code: u16, body: &[u8]) -> Self {
		self.types = self.types.u8(base_code).u16(user_code).raw(body);
		self
	}

	/// Append one variable descriptor.
	pub fn var(mut self, name: &str, type_code: u16, address: u32) -> Self {
		self.vars = self.vars.cstr(name).u16(type_code).u8(0).u32(address).u16(0);
		self
	}

	/// Set the declared record length (only emitted for versions >= 128).
	pub fn nbytes(mut self, nbytes: u16) -> Self {
		self.nbytes = nbytes;
		self
	}

	/// Set the file attribute byte (only emitted for versions >= 128).
	pub fn fattrib(mut self, fattrib: u8) -> Self {
		self.fattrib = fattrib;
		self
	}

	/// Encode the block including length prefix and trailing checksum.
	pub fn build(&self) -> Vec<u8> {
		let mut body = LogBuilder::new()
			.u8(self.version)
			.raw(&self.types.clone().build())
			.u8(0)
			.raw(&self.vars.clone().build())
			.u8(0);
		if self.version >= 128 {
			body = body.u16(self.nbytes).u8(self.fattrib);
		}
		let body = body.build();
		let len = u32::try_from(body.len() + 8).expect("xrt length fits u32");
		LogBuilder::new().u32(len).raw(&body).u32_be(0xDEAD_BEEF).build()
	}
}

/// Header values written by [`sample_header`].
pub mod sample {
	/// Banner text.
	pub const TEXT: &str = "MBC log file";
	/// Device id.
	pub const MBC_ID: &str = "MBC-4711";
	/// Serial number with a Latin-1 character.
	pub const SERIAL: &str = "SN-\u{e9}01";
	/// Server version.
	pub const SERVER_VERSION: u16 = 312;
	/// Format version.
	pub const FORMAT_VERSION: u8 = 3;
	/// Timestamp year.
	pub const YEAR: u16 = 2024;
	/// Fault counter.
	pub const FAULT_COUNTER: i32 = -2;
	/// Supervision state bytes.
	pub const SUPERVISION_STATE: [u8; 3] = [1, 0, 2];
}

/// Encode a complete file header with the values from [`sample`].
pub fn sample_header() -> LogBuilder {
	LogBuilder::new()
		.cstr(sample::TEXT)
		.cstr(sample::MBC_ID)
		.cstr(sample::SERIAL)
		.u16(sample::SERVER_VERSION)
		.u8(sample::FORMAT_VERSION)
		.u16(sample::YEAR)
		.u8(5)
		.u8(17)
		.u8(13)
		.u8(45)
		.u8(9)
		.i32(sample::FAULT_COUNTER)
		.u32(sample::SUPERVISION_STATE.len() as u32)
		.raw(&sample::SUPERVISION_STATE)
		.u32(0x1111_1111)
		.u32(0x2222_2222)
}

/// Encode a supervision block.
///
/// `faultmask` is only written when `Some`; the declared length always
/// matches the bytes written.
pub fn supervision_block(codes: &[u16], names: &[&str], help: &[&str], faultmask: Option<&[u32]>) -> Vec<u8> {
	let names_run = names.iter().fold(LogBuilder::new(), |out, name| out.cstr(name)).build();
	let help_run = help.iter().fold(LogBuilder::new(), |out, text| out.cstr(text)).build();

	let mut body = LogBuilder::new().u8(2).u8(0x40).u16(codes.len() as u16);
	for code in codes {
		body = body.u16(*code);
	}
	body = body.u32(names_run.len() as u32).raw(&names_run).u32(help_run.len() as u32).raw(&help_run);
	if let Some(mask) = faultmask {
		body = body.u32(mask.len() as u32);
		for item in mask {
			body = body.u32(*item);
		}
	}
	let body = body.build();

	LogBuilder::new()
		.u32(body.len() as u32 + 4)
		.raw(&body)
		.u32(0x3333_3333)
		.build()
}
