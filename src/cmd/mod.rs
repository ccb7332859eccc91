/// Whole-file JSON dump command.
pub mod dump;
/// Header print command.
pub mod header;
/// Pack summary command.
pub mod info;
/// Shared rendering helpers.
pub mod util;
