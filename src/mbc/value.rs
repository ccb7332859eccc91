use std::collections::BTreeMap;

use serde::Serialize;

/// One decoded value in the output tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
	/// Unsigned 8-bit integer.
	U8(u8),
	/// Signed 8-bit integer.
	I8(i8),
	/// Unsigned 16-bit integer.
	U16(u16),
	/// Signed 16-bit integer.
	I16(i16),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Signed 32-bit integer.
	I32(i32),
	/// IEEE-754 single-precision float.
	F32(f32),
	/// UTF-8 text.
	String(String),
	/// Byte sequence.
	U8s(Vec<u8>),
	/// Signed 8-bit sequence.
	I8s(Vec<i8>),
	/// Unsigned 16-bit sequence.
	U16s(Vec<u16>),
	/// Signed 16-bit sequence.
	I16s(Vec<i16>),
	/// Unsigned 32-bit sequence.
	U32s(Vec<u32>),
	/// Signed 32-bit sequence.
	I32s(Vec<i32>),
	/// Float sequence.
	F32s(Vec<f32>),
	/// String sequence.
	Strings(Vec<String>),
	/// Nested keyed record.
	Node(Node),
	/// Ordered record sequence.
	Nodes(Vec<Node>),
}

impl Value {
	/// Stable lowercase label for the active variant.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::U8(_) => "uint8",
			Self::I8(_) => "int8",
			Self::U16(_) => "uint16",
			Self::I16(_) => "int16",
			Self::U32(_) => "uint32",
			Self::I32(_) => "int32",
			Self::F32(_) => "float32",
			Self::String(_) => "string",
			Self::U8s(_) => "uint8[]",
			Self::I8s(_) => "int8[]",
			Self::U16s(_) => "uint16[]",
			Self::I16s(_) => "int16[]",
			Self::U32s(_) => "uint32[]",
			Self::I32s(_) => "int32[]",
			Self::F32s(_) => "float32[]",
			Self::Strings(_) => "string[]",
			Self::Node(_) => "node",
			Self::Nodes(_) => "node[]",
		}
	}

	/// Return the node sequence, if this is one.
	pub fn as_nodes(&self) -> Option<&[Node]> {
		match self {
			Self::Nodes(nodes) => Some(nodes),
			_ => None,
		}
	}
}

macro_rules! impl_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::$variant(value)
				}
			}
		)*
	};
}

impl_from! {
	u8 => U8,
	i8 => I8,
	u16 => U16,
	i16 => I16,
	u32 => U32,
	i32 => I32,
	f32 => F32,
	String => String,
	Vec<u8> => U8s,
	Vec<i8> => I8s,
	Vec<u16> => U16s,
	Vec<i16> => I16s,
	Vec<u32> => U32s,
	Vec<i32> => I32s,
	Vec<f32> => F32s,
	Vec<String> => Strings,
	Node => Node,
	Vec<Node> => Nodes,
}

/// Keyed record of decoded values.
///
/// Keys are unique; re-inserting a key replaces its value. Iteration is in
/// key order, which carries no meaning beyond making output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Node {
	entries: BTreeMap<String, Value>,
}

impl Node {
	/// Create an empty node.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace `key`.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.entries.insert(key.into(), value.into());
	}

	/// Look up a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Return `true` when `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Number of keys.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return `true` when the node has no keys.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate keys in sorted order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Iterate `(key, value)` pairs in sorted key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}
}
