mod bytes;
mod decode;
mod error;
mod file;
mod header;
mod pack;
mod supervision;
mod types;
mod value;
mod vars;
mod xrt;

/// Primitive reader and Latin-1 conversion.
pub use bytes::{Cursor, latin1_to_utf8};
/// Catalog-driven value decoding and options.
pub use decode::{DecodeOptions, decode_value, decode_variables, read_base_type};
/// Error and result aliases.
pub use error::{MbcError, Result};
/// File-level entry points.
pub use file::{LogFile, read_file, read_file_with, read_header};
/// Fixed header decoder.
pub use header::decode_header;
/// Pack dispatcher.
pub use pack::{PackKind, decode_body, decode_pack};
/// Supervision block decoder.
pub use supervision::decode_supervision;
/// Type catalog model.
pub use types::{ARRAY_CODE, BITFIELD_CODE, POINTER_CODE, RECORD_CODE, RecordField, ScalarKind, TypeCatalog, TypeDef};
/// Decoded value tree.
pub use value::{Node, Value};
/// Variable catalog.
pub use vars::{VarDef, parse_var_defs};
/// Per-pack schema block.
pub use xrt::Xrt;
