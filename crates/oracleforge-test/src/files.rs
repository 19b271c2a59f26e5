//! Temporary formula files.

use std::io::Write;

use tempfile::NamedTempFile;

/// Writes `contents` to a fresh temporary file that lives as long as the
/// returned handle.
///
/// ```
/// let file = oracleforge_test::files::temp_file("1 -2 0\n");
/// assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "1 -2 0\n");
/// ```
pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap_or_else(|err| panic!("temp file: {err}"));
    file.write_all(contents.as_bytes())
        .and_then(|()| file.flush())
        .unwrap_or_else(|err| panic!("writing temp file: {err}"));
    file
}

/// Path of `file` as a string constant for oracle inputs.
pub fn path_str(file: &NamedTempFile) -> String {
    file.path().display().to_string()
}
