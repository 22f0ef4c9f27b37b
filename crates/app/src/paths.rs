//! Output path derivation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension appended to compressed files.
pub const COMPRESSED_EXTENSION: &str = "compressed";

/// Extension appended to decompressed files.
pub const DECOMPRESSED_EXTENSION: &str = "decompressed";

/// `<input>.compressed`
pub fn compressed_path(input: &Path) -> PathBuf {
    append_extension(input, COMPRESSED_EXTENSION)
}

/// `<input>` minus a trailing `.compressed`, plus `.decompressed`.
pub fn decompressed_path(input: &Path) -> PathBuf {
    let base = if input.extension().is_some_and(|ext| ext == COMPRESSED_EXTENSION) {
        input.with_extension("")
    } else {
        input.to_path_buf()
    };
    append_extension(&base, DECOMPRESSED_EXTENSION)
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
