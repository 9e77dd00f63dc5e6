//! Vocabulary table loader.
//!
//! The table is a comma-separated file with a fixed seven-column header:
//!
//! ```text
//! Type,Tag,Title,Regexp,Other,ReleaseType,TypeExclusive
//! source,WEB-DL,Web (DL),web[\-\_\. ]?dl,,movie,
//! ```
//!
//! Fields are not escaped; a field wrapped in double quotes has the quotes
//! removed. Rows with the wrong number of columns are skipped.

use std::collections::HashMap;

use winnow::combinator::separated;
use winnow::prelude::*;
use winnow::token::take_till;
use winnow::ModalResult;

use super::info::TagInfo;
use crate::error::{Error, Result};
use crate::model::{ReleaseType, TagType};

/// Expected header columns, in order.
pub(crate) const HEADER: [&str; 7] = [
    "Type",
    "Tag",
    "Title",
    "Regexp",
    "Other",
    "ReleaseType",
    "TypeExclusive",
];

/// Entries loaded from a table, grouped by category in table order.
pub(crate) type Infos = HashMap<TagType, Vec<TagInfo>>;

fn field<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_till(0.., ',').map(unquote).parse_next(input)
}

fn row<'s>(input: &mut &'s str) -> ModalResult<Vec<&'s str>> {
    separated(1.., field, ',').parse_next(input)
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

/// Splits one line into its columns.
pub(crate) fn split_row(line: &str) -> Vec<&str> {
    row.parse(line).unwrap_or_else(|_| vec![line])
}

/// Parses `data` into per-category entry lists.
pub(crate) fn load(data: &str) -> Result<Infos> {
    let mut lines = data
        .trim()
        .split('\n')
        .map(|l| l.trim_end_matches('\r'))
        .enumerate()
        .map(|(idx, l)| (idx + 1, l));

    let (header_line, header) = lines.next().unwrap_or((1, ""));
    check_header(header_line, header)?;

    let mut infos = Infos::new();
    let mut seen: HashMap<(TagType, String), usize> = HashMap::new();

    for (line, text) in lines {
        if text.trim().is_empty() {
            continue;
        }
        let cols = split_row(text);
        let [category, tag, title, regexp, other, release_type, exclusive] = cols[..] else {
            tracing::warn!(line, columns = cols.len(), "skipping vocabulary row with wrong column count");
            continue;
        };

        let typ: TagType = category.parse().map_err(|_| Error::UnknownCategory {
            line,
            category: category.to_string(),
        })?;

        if let Some(&previous) = seen.get(&(typ, tag.to_string())) {
            return Err(Error::DuplicateTag {
                line,
                previous,
                category: category.to_string(),
                tag: tag.to_string(),
            });
        }
        if tag.is_empty() {
            return Err(Error::MissingTag { line });
        }

        let release_type = if release_type.is_empty() {
            ReleaseType::Unknown
        } else {
            release_type.parse().map_err(|_| Error::UnknownReleaseType {
                line,
                name: release_type.to_string(),
            })?
        };

        let info = TagInfo::new(tag, title, regexp, other, release_type, exclusive == "1")
            .map_err(|source| Error::Pattern {
                line,
                tag: tag.to_string(),
                pattern: regexp.to_string(),
                source: Box::new(source),
            })?;

        seen.insert((typ, tag.to_string()), line);
        infos.entry(typ).or_default().push(info);
    }

    Ok(infos)
}

fn check_header(line: usize, header: &str) -> Result<()> {
    let cols = split_row(header);
    if cols.len() != HEADER.len() {
        return Err(Error::Header {
            line,
            columns: cols.len(),
        });
    }
    for (found, expected) in cols.iter().zip(HEADER) {
        if found.trim() != expected {
            return Err(Error::HeaderName {
                line,
                found: found.to_string(),
                expected,
            });
        }
    }
    Ok(())
}
