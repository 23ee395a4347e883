//! On-disk layout of distance tables.
//!
//! A table is written as one or more text units. Each unit is a run of
//! decimal distances, each followed by a comma (`0,1,1,-1,`), in ascending
//! index order. A reader recovers `index -> distance` from position alone:
//!
//! - [`Layout::Flat`]: a single `optimal.txt` holding every index.
//! - [`Layout::Partitioned`]: consecutive equal-size chunks, one file per
//!   value of the leading state coordinate, named `<value>.txt`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::{StateCodec, TripleCodec};
use crate::error::{Error, Result};
use crate::table::{DistanceTable, UNREACHED};

/// File name of the single unit written by [`Layout::Flat`].
pub const FLAT_UNIT_NAME: &str = "optimal.txt";

const UNIT_EXTENSION: &str = "txt";

/// How table indices are spread over output units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    Flat,
    /// `parts` chunks of `chunk_len` entries; chunk `p` is named `first_label + p`.
    Partitioned {
        chunk_len: usize,
        parts: usize,
        first_label: i64,
    },
}

/// One output file and the table indices it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub file_name: String,
    pub range: Range<usize>,
}

impl Layout {
    /// One unit per value of the first triple component, rest in row-major order.
    pub fn by_first_component(codec: &TripleCodec) -> Self {
        let radix = codec.radix();
        Layout::Partitioned {
            chunk_len: radix * radix,
            parts: radix,
            first_label: i64::from(codec.bounds().min()),
        }
    }

    /// Units covering a table of `len` entries, in index order.
    pub fn units(&self, len: usize) -> Result<Vec<Unit>> {
        match *self {
            Layout::Flat => Ok(vec![Unit {
                file_name: FLAT_UNIT_NAME.to_string(),
                range: 0..len,
            }]),
            Layout::Partitioned {
                chunk_len,
                parts,
                first_label,
            } => {
                if chunk_len.checked_mul(parts) != Some(len) {
                    return Err(Error::InvalidDomain(format!(
                        "{parts} partitions of {chunk_len} entries do not cover a table of {len}"
                    )));
                }
                Ok((0..parts)
                    .map(|p| Unit {
                        file_name: format!("{}.{UNIT_EXTENSION}", first_label + p as i64),
                        range: p * chunk_len..(p + 1) * chunk_len,
                    })
                    .collect())
            }
        }
    }
}

/// Write entries in unit text format.
pub fn write_unit<W: Write>(writer: &mut W, entries: &[i32]) -> std::io::Result<()> {
    for distance in entries {
        write!(writer, "{distance},")?;
    }
    Ok(())
}

/// Parse unit text. A trailing comma and surrounding whitespace are accepted.
///
/// Entries below the unreached sentinel are malformed.
pub fn parse_unit(text: &str, path: &Path) -> Result<Vec<i32>> {
    let body = text.trim();
    let body = body.strip_suffix(',').unwrap_or(body);
    if body.is_empty() {
        return Ok(Vec::new());
    }
    body.split(',')
        .enumerate()
        .map(|(position, entry)| {
            entry
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|&d| d >= UNREACHED)
                .ok_or_else(|| Error::Parse {
                    path: path.to_path_buf(),
                    position,
                    entry: entry.to_string(),
                })
        })
        .collect()
}

pub fn read_unit(path: &Path) -> Result<Vec<i32>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_unit(&text, path)
}

/// Create `dir` if needed and remove table units left by a previous run.
///
/// Only `*.txt` files directly inside `dir` are removed.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut removed = 0usize;
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        let is_unit = path.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(UNIT_EXTENSION);
        if is_unit {
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            removed += 1;
        }
    }
    debug!(dir = %dir.display(), removed, "prepared output directory");
    Ok(())
}

/// Write every unit of `table` into `dir`. Returns the paths written, in order.
///
/// A failure leaves the directory in an unusable state.
pub fn write_table(table: &DistanceTable, layout: &Layout, dir: &Path) -> Result<Vec<PathBuf>> {
    let units = layout.units(table.len())?;
    let mut written = Vec::with_capacity(units.len());

    for unit in units {
        let path = dir.join(&unit.file_name);
        let file = File::create(&path).map_err(|e| Error::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        write_unit(&mut writer, &table.entries()[unit.range])
            .and_then(|()| writer.flush())
            .map_err(|e| Error::io(&path, e))?;
        written.push(path);
    }

    info!(dir = %dir.display(), units = written.len(), "wrote distance table");
    Ok(written)
}

/// Reassemble a table of `len` entries from the units of `layout` in `dir`.
pub fn load_table(dir: &Path, layout: &Layout, len: usize) -> Result<DistanceTable> {
    let mut entries = Vec::with_capacity(len);
    for unit in layout.units(len)? {
        let path = dir.join(&unit.file_name);
        let chunk = read_unit(&path)?;
        if chunk.len() != unit.range.len() {
            return Err(Error::UnitLength {
                path,
                found: chunk.len(),
                expected: unit.range.len(),
            });
        }
        entries.extend(chunk);
    }
    Ok(DistanceTable::from_entries(entries))
}
