//! Reading and writing the frequency file formats
//!
//! * `xx_term_rank.csv`: one term per line, rank is the line number.
//! * `xx_char_freq.csv`: `character,count` rows in any order. Fields may be
//!   double-quoted CSV style; repeated characters are summed.

use crate::error::{LoadError, Result};
use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read at most `max_lines` lines of a term-rank source, in order.
///
/// Lines are trimmed; the caller decides how duplicates and blanks rank.
pub fn read_rank_lines<R: BufRead>(reader: R, max_lines: usize, path: &Path) -> Result<Vec<String>> {
    reader
        .lines()
        .take(max_lines)
        .map(|line| {
            line.map(|l| l.trim().to_string()).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

/// Read `character,count` rows, summing repeated characters.
///
/// Blank lines are skipped. A row without a count, with a non-integer count,
/// or whose first field is not exactly one character is rejected.
pub fn read_char_counts<R: BufRead>(reader: R, path: &Path) -> Result<HashMap<char, u64>> {
    let mut counts = HashMap::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let malformed = |reason: String| LoadError::MalformedRow {
            path: path.to_path_buf(),
            line: index + 1,
            reason,
        };

        let (key, count) = split_row(&line).ok_or_else(|| malformed("expected `character,count`".to_string()))?;
        let mut chars = key.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => return Err(malformed(format!("'{key}' is not a single character"))),
        };
        let count: u64 = count
            .trim()
            .parse()
            .map_err(|_| malformed(format!("count '{}' is not an integer", count.trim())))?;
        *counts.entry(ch).or_insert(0) += count;
    }
    Ok(counts)
}

/// Split a CSV row into its first two fields.
fn split_row(line: &str) -> Option<(String, &str)> {
    let (key, rest) = if let Some(quoted) = line.strip_prefix('"') {
        let mut key = String::new();
        let mut chars = quoted.char_indices().peekable();
        let mut end = None;
        while let Some((i, ch)) = chars.next() {
            if ch == '"' {
                if let Some((_, '"')) = chars.peek() {
                    chars.next();
                    key.push('"');
                } else {
                    end = Some(i + 1);
                    break;
                }
            } else {
                key.push(ch);
            }
        }
        let rest = &quoted[end?..];
        (key, rest.strip_prefix(',')?)
    } else {
        let (key, rest) = line.split_once(',')?;
        (key.to_string(), rest)
    };
    let count = rest.split(',').next().unwrap_or(rest);
    Some((key, count))
}

/// Write ranked items one per line, keeping the first `max_records` when positive.
pub fn write_rank_file<S: AsRef<str>>(path: &Path, items: &[S], max_records: usize) -> io::Result<()> {
    let limit = if max_records > 0 { max_records.min(items.len()) } else { items.len() };
    let mut writer = BufWriter::new(File::create(path)?);
    for (i, item) in items[..limit].iter().enumerate() {
        if i > 0 {
            writer.write_all(b"\n")?;
        }
        writer.write_all(item.as_ref().as_bytes())?;
    }
    writer.flush()?;
    tracing::debug!("Wrote {} entries to {}", limit, path.display());
    Ok(())
}

/// Write `key,count` rows by descending count, keeping the first `max_records` when positive.
pub fn write_freq_file<K: Display>(path: &Path, freqs: &HashMap<K, u64>, max_records: usize) -> io::Result<()> {
    let mut items: Vec<(&K, &u64)> = freqs.iter().collect();
    items.sort_by(|a, b| b.1.cmp(a.1));
    if max_records > 0 {
        items.truncate(max_records);
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for (key, count) in &items {
        writeln!(writer, "{},{}", quote_field(&key.to_string()), count)?;
    }
    writer.flush()?;
    tracing::debug!("Wrote {} frequencies to {}", items.len(), path.display());
    Ok(())
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Open a file for buffered reading, mapping failures to [`LoadError::Io`].
pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}
