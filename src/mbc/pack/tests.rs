use mbclog_testkit::{LogBuilder, XrtBuilder, supervision_block};

use crate::mbc::bytes::Cursor;
use crate::mbc::{DecodeOptions, MbcError, Node, PackKind, Value, decode_body};

fn counter_xrt(version: u8) -> Vec<u8> {
	XrtBuilder::new(version).var("counter", 1, 0).nbytes(4).build()
}

fn decode_all(bytes: &[u8]) -> (Vec<Node>, usize) {
	let mut cursor = Cursor::new(bytes);
	let packs = decode_body(&mut cursor, &DecodeOptions::default()).expect("body decodes");
	(packs, cursor.pos())
}

#[test]
fn pack_tags_map_to_kinds() {
	assert_eq!(PackKind::from_tag(0), Some(PackKind::Snapshot));
	assert_eq!(PackKind::from_tag(1), Some(PackKind::TimeSeries));
	assert_eq!(PackKind::from_tag(7), Some(PackKind::Supervision));
	assert_eq!(PackKind::from_tag(8), None);
	assert_eq!(PackKind::Supervision.tag(), 7);
}

#[test]
fn snapshot_pack_decodes_variables_and_skips_trailer() {
	let bytes = LogBuilder::new()
		.u8(0)
		.raw(&counter_xrt(0x80))
		.u32(41)
		.u32(0xCAFE_F00D)
		.build();

	let (packs, end) = decode_all(&bytes);
	assert_eq!(end, bytes.len());
	assert_eq!(packs.len(), 1);
	assert_eq!(packs[0].get("counter"), Some(&Value::U32(41)));
	assert_eq!(packs[0].get("type"), Some(&Value::U8(0)));
}

#[test]
fn time_series_reads_until_exhaustion() {
	let bytes = LogBuilder::new()
		.u8(1)
		.u32(1000)
		.u32(25)
		.raw(&counter_xrt(0x80))
		.i32(-1)
		.u32(1)
		.u32(2)
		.build();

	let (packs, end) = decode_all(&bytes);
	assert_eq!(end, bytes.len(), "cursor sits at end of data");
	assert_eq!(packs.len(), 1);

	let pack = &packs[0];
	assert_eq!(pack.get("type"), Some(&Value::U8(1)));
	assert_eq!(pack.get("sampling_rate"), Some(&Value::U32(1000)));
	assert_eq!(pack.get("pre_trigger_length"), Some(&Value::U32(25)));
	let data = pack.get("data").and_then(Value::as_nodes).expect("data is a node sequence");
	assert_eq!(data.len(), 2);
	assert_eq!(data[0].get("counter"), Some(&Value::U32(1)));
	assert_eq!(data[1].get("counter"), Some(&Value::U32(2)));
}

#[test]
fn time_series_reads_declared_count_then_next_pack() {
	let bytes = LogBuilder::new()
		.u8(1)
		.u32(500)
		.u32(0)
		.raw(&counter_xrt(0x80))
		.i32(3)
		.u32(10)
		.u32(20)
		.u32(30)
		.u32(0)
		.u8(0)
		.raw(&counter_xrt(0x80))
		.u32(99)
		.build();

	let (packs, end) = decode_all(&bytes);
	assert_eq!(end, bytes.len());
	assert_eq!(packs.len(), 2);
	let data = packs[0].get("data").and_then(Value::as_nodes).expect("data present");
	let counters: Vec<_> = data.iter().map(|record| record.get("counter").cloned()).collect();
	assert_eq!(counters, vec![Some(Value::U32(10)), Some(Value::U32(20)), Some(Value::U32(30))]);
	assert_eq!(packs[1].get("counter"), Some(&Value::U32(99)));
}

#[test]
fn declared_count_past_end_yields_zero_filled_records() {
	let bytes = LogBuilder::new().u8(1).u32(0).u32(0).raw(&counter_xrt(0x80)).i32(3).u32(7).build();

	let (packs, _) = decode_all(&bytes);
	assert_eq!(packs.len(), 1);
	let data = packs[0].get("data").and_then(Value::as_nodes).expect("data present");
	let counters: Vec<_> = data.iter().map(|record| record.get("counter").cloned()).collect();
	assert_eq!(counters, vec![Some(Value::U32(7)), Some(Value::U32(0)), Some(Value::U32(0))]);
}

#[test]
fn old_xrt_without_record_length_does_not_spin() {
	let bytes = LogBuilder::new().u8(1).u32(0).u32(0).raw(&counter_xrt(1)).i32(-1).u32(5).build();

	let (packs, _) = decode_all(&bytes);
	let data = packs[0].get("data").and_then(Value::as_nodes).expect("data present");
	assert_eq!(data.len(), 1);
	assert_eq!(data[0].get("counter"), Some(&Value::U32(5)));
}

#[test]
fn negative_count_other_than_sentinel_is_rejected() {
	let bytes = LogBuilder::new().u8(1).u32(0).u32(0).raw(&counter_xrt(0x80)).i32(-2).build();
	let err = decode_body(&mut Cursor::new(&bytes), &DecodeOptions::default()).expect_err("count is invalid");
	assert!(matches!(err, MbcError::NegativeRecordCount { count: -2 }));
}

#[test]
fn declared_count_above_limit_is_rejected() {
	let bytes = LogBuilder::new().u8(1).u32(0).u32(0).raw(&counter_xrt(0x80)).i32(1000).build();
	let opt = DecodeOptions {
		max_records: 10,
		..DecodeOptions::default()
	};
	let err = decode_body(&mut Cursor::new(&bytes), &opt).expect_err("too many records");
	assert!(matches!(err, MbcError::TooManyRecords { count: 1000, max: 10 }));
}

#[test]
fn unknown_pack_type_aborts_whole_body() {
	let bytes = LogBuilder::new()
		.u8(0)
		.raw(&counter_xrt(0x80))
		.u32(1)
		.u32(0)
		.u8(99)
		.build();
	let snapshot_len = bytes.len() - 1;

	let err = decode_body(&mut Cursor::new(&bytes), &DecodeOptions::default()).expect_err("tag 99 is unknown");
	assert!(matches!(err, MbcError::UnknownPackType { tag: 99, at } if at == snapshot_len));
}

#[test]
fn supervision_pack_merges_states_and_omits_satisfied_faultmask() {
	let bytes = LogBuilder::new()
		.u8(7)
		.u32(2)
		.raw(&[4, 5])
		.raw(&supervision_block(&[100, 200], &[], &[], None))
		.u32(0)
		.build();

	let (packs, end) = decode_all(&bytes);
	assert_eq!(end, bytes.len());
	let pack = &packs[0];
	assert_eq!(pack.get("type"), Some(&Value::U8(7)));
	assert_eq!(pack.get("states"), Some(&Value::U8s(vec![4, 5])));
	assert_eq!(pack.get("faultcode"), Some(&Value::U16s(vec![100, 200])));
	assert_eq!(pack.get("faultnames"), Some(&Value::Strings(Vec::new())));
	assert_eq!(pack.get("faulthelp"), Some(&Value::Strings(Vec::new())));
	assert!(!pack.contains_key("faultmask"));
}

#[test]
fn supervision_pack_reads_faultmask_when_bytes_remain() {
	let bytes = LogBuilder::new()
		.u8(7)
		.u32(0)
		.raw(&supervision_block(&[1], &["Overtemp", "Overcurrent"], &["Cool down"], Some(&[0xF, 0x30])))
		.build();

	let (packs, end) = decode_all(&bytes);
	assert_eq!(end, bytes.len());
	let pack = &packs[0];
	assert_eq!(pack.get("file_version"), Some(&Value::U8(2)));
	assert_eq!(pack.get("file_attribute"), Some(&Value::U8(0x40)));
	assert_eq!(
		pack.get("faultnames"),
		Some(&Value::Strings(vec!["Overtemp".to_owned(), "Overcurrent".to_owned()]))
	);
	assert_eq!(pack.get("faulthelp"), Some(&Value::Strings(vec!["Cool down".to_owned()])));
	assert_eq!(pack.get("faultmask"), Some(&Value::U32s(vec![0xF, 0x30])));
	assert_eq!(pack.get("states"), Some(&Value::U8s(Vec::new())));
}
