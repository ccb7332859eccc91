/// Forward cursor over an immutable MBC byte source.
///
/// Reads never fail. Asking for more bytes than remain zero-fills the missing
/// part, moves the cursor to the end and latches the "not good" state that the
/// pack loop uses as its termination condition.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	bit_pos: u32,
	failed: bool,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self {
			bytes,
			pos: 0,
			bit_pos: 0,
			failed: false,
		}
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return total source length in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return `true` for an empty source.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return `true` while no read overran the source and data remains.
	pub fn good(&self) -> bool {
		!self.failed && self.pos < self.bytes.len()
	}

	/// Return `true` once any read ran past the end of the source.
	pub fn overran(&self) -> bool {
		self.failed
	}

	/// Reposition the cursor to an absolute offset.
	///
	/// Seeking past the end is allowed; the next read then overruns. A latched
	/// overrun is not cleared.
	pub fn seek(&mut self, pos: usize) {
		self.pos = pos;
	}

	fn take<const N: usize>(&mut self) -> [u8; N] {
		let mut out = [0_u8; N];
		let avail = self.remaining().min(N);
		if avail > 0 {
			out[..avail].copy_from_slice(&self.bytes[self.pos..self.pos + avail]);
		}
		if avail < N {
			self.overrun();
		} else {
			self.pos += N;
		}
		out
	}

	fn overrun(&mut self) {
		self.pos = self.pos.max(self.bytes.len());
		self.failed = true;
	}

	/// Read one unsigned byte.
	pub fn read_u8(&mut self) -> u8 {
		self.take::<1>()[0]
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> u16 {
		u16::from_le_bytes(self.take::<2>())
	}

	/// Read a signed 16-bit value in the device's complement convention.
	///
	/// The stored word is the bitwise complement of the value: `raw ^ 0xFFFF`,
	/// not a two's-complement reinterpretation of `raw`.
	pub fn read_i16_le(&mut self) -> i16 {
		(self.read_u16_le() ^ 0xFFFF) as i16
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> u32 {
		u32::from_le_bytes(self.take::<4>())
	}

	/// Read a big-endian `u32`. Only used for discarded checksums.
	pub fn read_u32_be(&mut self) -> u32 {
		u32::from_be_bytes(self.take::<4>())
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> i32 {
		i32::from_le_bytes(self.take::<4>())
	}

	/// Read a little-endian IEEE-754 `f32`.
	pub fn read_f32_le(&mut self) -> f32 {
		f32::from_le_bytes(self.take::<4>())
	}

	/// Read a zero-terminated Latin-1 string and return it as UTF-8.
	///
	/// The terminator is consumed but not returned. Hitting the end of the
	/// source before a terminator latches the overrun state.
	pub fn read_string(&mut self) -> String {
		let rem = self.bytes.get(self.pos..).unwrap_or_default();
		match rem.iter().position(|byte| *byte == 0) {
			Some(end) => {
				let text = latin1_to_utf8(&rem[..end]);
				self.pos += end + 1;
				text
			}
			None => {
				let text = latin1_to_utf8(rem);
				self.overrun();
				text
			}
		}
	}

	/// Read `count` unsigned bytes.
	pub fn read_u8_vec(&mut self, count: usize) -> Vec<u8> {
		self.read_vec(count, Self::read_u8)
	}

	/// Read `count` little-endian `u16` values.
	pub fn read_u16_vec(&mut self, count: usize) -> Vec<u16> {
		self.read_vec(count, Self::read_u16_le)
	}

	/// Read `count` little-endian `u32` values.
	pub fn read_u32_vec(&mut self, count: usize) -> Vec<u32> {
		self.read_vec(count, Self::read_u32_le)
	}

	fn read_vec<T>(&mut self, count: usize, read: fn(&mut Self) -> T) -> Vec<T> {
		let width = size_of::<T>();
		let fits = self.remaining() / width;
		let mut out = Vec::with_capacity(count.min(fits));
		for _ in 0..count.min(fits) {
			out.push(read(self));
		}
		if count > fits {
			self.overrun();
		}
		out
	}

	/// Read a bitfield of `size` bits from a fresh little-endian 32-bit word.
	///
	/// Every call consumes four bytes. The bit offset inside the word carries
	/// over between calls modulo 8. Sign extension only happens for signed
	/// single-bit fields.
	pub fn read_bits(&mut self, size: u8, signed: bool) -> i32 {
		let size = u32::from(size);
		let mask = if size >= 32 { u32::MAX } else { (1_u32 << size) - 1 };
		let word = self.read_u32_le();
		let value = (word >> self.bit_pos) & mask;
		self.bit_pos = (self.bit_pos + size) & 7;

		let has_sign = size == 1;
		if signed && has_sign { (value | !mask) as i32 } else { value as i32 }
	}
}

/// Convert Latin-1 bytes to a UTF-8 string.
///
/// Bytes below `0x80` pass through; every other byte becomes a two-byte sequence.
pub fn latin1_to_utf8(bytes: &[u8]) -> String {
	bytes.iter().copied().map(char::from).collect()
}
