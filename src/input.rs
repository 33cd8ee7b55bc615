//! Reading the file list from standard input.
//! One path per line, or one per NUL-terminated record with `--null`.

use std::io::{self, BufRead};
use std::path::PathBuf;

/// Read paths from `reader`. Empty records are skipped; in line mode a
/// trailing `\r` is stripped so CRLF lists work.
pub fn read_paths<R: BufRead>(mut reader: R, null_delimited: bool) -> io::Result<Vec<PathBuf>> {
    let delim = if null_delimited { b'\0' } else { b'\n' };
    let mut paths = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(delim, &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&delim) {
            buf.pop();
        }
        if !null_delimited && buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.is_empty() {
            continue;
        }
        paths.push(bytes_to_path(std::mem::take(&mut buf))?);
    }
    Ok(paths)
}

#[cfg(unix)]
fn bytes_to_path(bytes: Vec<u8>) -> io::Result<PathBuf> {
    use std::os::unix::ffi::OsStringExt;
    Ok(PathBuf::from(std::ffi::OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: Vec<u8>) -> io::Result<PathBuf> {
    String::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
