use mbclog::mbc::{DecodeOptions, Value};
use serde::Serialize;

/// Decode limit overrides shared by decoding commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LimitArgs {
	/// Start from the tight preset instead of the defaults.
	#[arg(long)]
	pub strict: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
	#[arg(long = "max-records")]
	pub max_records: Option<usize>,
}

impl LimitArgs {
	/// Apply overrides on top of the selected preset.
	pub(crate) fn decode_options(&self) -> DecodeOptions {
		let mut decode = if self.strict { DecodeOptions::strict() } else { DecodeOptions::default() };
		if let Some(max_depth) = self.max_depth {
			decode.max_depth = max_depth;
		}
		if let Some(max_array) = self.max_array {
			decode.max_array_elems = max_array;
		}
		if let Some(max_records) = self.max_records {
			decode.max_records = max_records;
		}
		decode
	}
}

/// Print `payload` as one JSON document.
pub(crate) fn emit_json<T: Serialize>(payload: &T, pretty: bool) {
	let rendered = if pretty {
		serde_json::to_string_pretty(payload)
	} else {
		serde_json::to_string(payload)
	};
	match rendered {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode failed: {err}"),
	}
}

/// Render a value on one line for `key: value` output.
pub(crate) fn render_value(value: &Value) -> String {
	match value {
		Value::U8(v) => v.to_string(),
		Value::I8(v) => v.to_string(),
		Value::U16(v) => v.to_string(),
		Value::I16(v) => v.to_string(),
		Value::U32(v) => v.to_string(),
		Value::I32(v) => v.to_string(),
		Value::F32(v) => v.to_string(),
		Value::String(v) => v.clone(),
		Value::U8s(v) => render_list(v),
		Value::I8s(v) => render_list(v),
		Value::U16s(v) => render_list(v),
		Value::I16s(v) => render_list(v),
		Value::U32s(v) => render_list(v),
		Value::I32s(v) => render_list(v),
		Value::F32s(v) => render_list(v),
		Value::Strings(v) => {
			let quoted: Vec<String> = v.iter().map(|item| format!("{item:?}")).collect();
			format!("[{}]", quoted.join(", "))
		}
		Value::Node(node) => format!("{{{} keys}}", node.len()),
		Value::Nodes(nodes) => format!("[{} records]", nodes.len()),
	}
}

fn render_list<T: ToString>(items: &[T]) -> String {
	let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
	format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
	use mbclog::mbc::{DecodeOptions, Node, Value};

	use super::{LimitArgs, render_value};

	#[test]
	fn strict_preset_keeps_explicit_overrides() {
		let args = LimitArgs {
			strict: true,
			max_records: Some(5),
			..LimitArgs::default()
		};
		let opt = args.decode_options();
		let strict = DecodeOptions::strict();
		assert_eq!(opt.max_depth, strict.max_depth);
		assert_eq!(opt.max_array_elems, strict.max_array_elems);
		assert_eq!(opt.max_records, 5);
	}

	#[test]
	fn renders_scalars_lists_and_containers() {
		assert_eq!(render_value(&Value::I16(-3)), "-3");
		assert_eq!(render_value(&Value::String("MBC".to_owned())), "MBC");
		assert_eq!(render_value(&Value::U8s(vec![1, 2])), "[1, 2]");
		assert_eq!(render_value(&Value::Strings(vec!["a".to_owned()])), "[\"a\"]");
		assert_eq!(render_value(&Value::Nodes(vec![Node::new(), Node::new()])), "[2 records]");
	}
}
