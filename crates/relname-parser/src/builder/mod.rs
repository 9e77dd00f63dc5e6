//! Turns a lexed token sequence into a [`Release`].
//!
//! The builder runs a fixed sequence of passes over the tags:
//!
//! 1. positional fixups demote vocabulary that is really title text
//! 2. fields are collected from the tags
//! 3. the release type is inferred
//! 4. tags exclusive to another release type are demoted, and fields are
//!    collected again
//! 5. the type is inferred once more
//! 6. type-specific title, subtitle and artist extraction
//! 7. leftover text is recorded, and may become the group or checksum
//!
//! Type-only parsing stops after step 5.

mod collect;
mod fixups;
mod inspect;
mod titles;
mod unset;

use tracing::trace;

use crate::config::ParserConfig;
use crate::lexer::month_number;
use crate::model::{Release, ReleaseType, Tag, TagType};
use crate::registry::Registry;

/// Builds a release from the tags of one input. `pivot` is the index of
/// the first tag that was peeled off the end of the input.
pub(crate) fn build(
    registry: &Registry,
    config: &ParserConfig,
    tags: Vec<Tag>,
    pivot: usize,
) -> Release {
    let mut release = Release::new(tags, pivot);

    fixups::apply(registry, &mut release);
    collect::collect(registry, &mut release);
    release.release_type = inspect::inspect(registry, &mut release, true);
    trace!(release_type = %release.release_type, "initial type");

    unset::unset(registry, &mut release);
    release.release_type = inspect::inspect(registry, &mut release, false);
    trace!(release_type = %release.release_type, "inferred type");

    if config.type_only {
        return release;
    }

    special_date(&mut release);
    let end = titles::titles(registry, config, &mut release);
    trace!(end, title = %release.title, "titles extracted");
    titles::unused(&mut release, end, config.extract_unused);
    release
}

/// Magazines often name the month before a bare year: `Mag.June.2015`.
fn special_date(release: &mut Release) {
    if release.release_type != ReleaseType::Magazine
        || release.year == 0
        || release.month != 0
        || release.day != 0
    {
        return;
    }
    let Some(idx) = release
        .primary_date_index()
        .or_else(|| release.date_indices().first().copied())
    else {
        return;
    };

    let tags = release.tags();
    let mut i = idx.saturating_sub(1);
    while i > 0 && tags[i].is(&[TagType::Delim]) {
        i -= 1;
    }
    if idx == 0 || !tags[i].is(&[TagType::Text]) {
        return;
    }
    let text = tags[i].text().into_owned();
    let Some(month) = month_number(&text) else {
        return;
    };

    let year = release.year.to_string();
    release.month = month;
    *release.tag_mut(i) = Tag::new(
        TagType::Date,
        None,
        [text, year, format!("{:02}", month), String::new()],
    );
    release.push_date(i);
}
