// Bounded reads over the dated log file

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

const CHUNK_SIZE: u64 = 8 * 1024;

/// Opens `path` only if it is a regular file. The type is checked before `open`, so a
/// FIFO or device at the log path fails fast instead of blocking in `open(2)`.
fn open_regular(path: &Path) -> std::io::Result<File> {
    if !std::fs::metadata(path)?.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", path.display()),
        ));
    }
    File::open(path)
}

/// Returns the last `max_lines` lines of `path`, reading backwards in chunks so
/// only the tail is loaded. A trailing newline does not count as an extra line.
pub fn read_tail(path: &Path, max_lines: usize) -> std::io::Result<String> {
    let mut file = open_regular(path)?;
    let len = file.seek(SeekFrom::End(0))?;
    if len == 0 || max_lines == 0 {
        return Ok(String::new());
    }

    // Chunks in reverse file order; joined once at the end.
    let mut chunks: Vec<Vec<u8>> = Vec::new();
    let mut newlines_seen = 0usize;
    let mut pos = len;
    // The final byte may be a terminating newline; it closes the last line rather than
    // separating two lines, so we need one more separator than max_lines in that case.
    let mut newlines_needed = max_lines;
    let mut checked_trailing = false;

    while pos > 0 {
        let read_len = CHUNK_SIZE.min(pos);
        pos -= read_len;
        file.seek(SeekFrom::Start(pos))?;
        let mut chunk = vec![0u8; read_len as usize];
        file.read_exact(&mut chunk)?;
        if !checked_trailing {
            checked_trailing = true;
            if chunk.last() == Some(&b'\n') {
                newlines_needed += 1;
            }
        }
        newlines_seen += chunk.iter().filter(|b| **b == b'\n').count();
        chunks.push(chunk);
        if newlines_seen >= newlines_needed {
            break;
        }
    }

    let buf: Vec<u8> = chunks.into_iter().rev().flatten().collect();
    let start = tail_start(&buf, newlines_needed);
    Ok(String::from_utf8_lossy(&buf[start..]).into_owned())
}

/// Index just after the `n`-th newline counted from the end, or 0 if there are fewer.
fn tail_start(buf: &[u8], n: usize) -> usize {
    buf.iter()
        .enumerate()
        .rev()
        .filter(|(_, b)| **b == b'\n')
        .nth(n - 1)
        .map(|(i, _)| i + 1)
        .unwrap_or(0)
}

/// Counts occurrences of `marker` over every line of `path`, streaming the file.
pub fn count_occurrences(path: &Path, marker: &str) -> std::io::Result<u64> {
    if marker.is_empty() {
        return Ok(0);
    }
    let mut reader = BufReader::new(open_regular(path)?);
    let mut line = Vec::new();
    let mut count = 0u64;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        count += String::from_utf8_lossy(&line).matches(marker).count() as u64;
    }
    Ok(count)
}
