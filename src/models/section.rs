//! Section traits shared by every record type
//!
//! A SWMM input file is a sequence of `[SECTION]` blocks. Most sections are
//! tables (one row per record under a `;;` column header); a few are single
//! blocks of `KEY value` lines. Records implement [`TableRecord`], blocks
//! implement [`SectionBlock`], and both implement [`Validate`].

use std::io::Write;

use crate::error::Result;

/// Record-level validation, run before anything is written
pub trait Validate {
    /// Check the record's own invariants (not cross references)
    fn validate(&self) -> Result<()>;
}

/// One row (or group of rows) of a tabular section
pub trait TableRecord: Validate {
    /// Section header: `[NAME]` plus the `;;` column comment lines,
    /// every line terminated by `\n`
    const HEADER: &'static str;

    /// The record rendered as inp text, without a trailing newline
    fn to_inp(&self) -> String;
}

/// A section written as a whole
pub trait SectionBlock: Validate {
    /// Bracketed section name opening the block
    const SECTION: &'static str;

    /// The full block rendered as inp text, terminated by `\n`
    fn to_inp(&self) -> String;
}

/// Write a tabular section: header followed by one line per record
pub fn write_section<W: Write, T: TableRecord>(stream: &mut W, records: &[T]) -> Result<()> {
    stream.write_all(T::HEADER.as_bytes())?;
    for record in records {
        writeln!(stream, "{}", record.to_inp())?;
    }
    Ok(())
}

/// Write a block section
pub fn write_block<W: Write, B: SectionBlock>(stream: &mut W, block: &B) -> Result<()> {
    stream.write_all(block.to_inp().as_bytes())?;
    Ok(())
}

/// Render a tabular section into a `String`
pub fn section_to_string<T: TableRecord>(records: &[T]) -> String {
    let mut out = String::from(T::HEADER);
    for record in records {
        out.push_str(&record.to_inp());
        out.push('\n');
    }
    out
}

/// Validate every record of a slice, stopping at the first failure
pub fn validate_all<T: Validate>(records: &[T]) -> Result<()> {
    records.iter().try_for_each(Validate::validate)
}
