//! Reclassification passes run before fields are collected.
//!
//! The lexers match vocabulary wherever it appears. These passes demote
//! tags whose position shows they are part of a title, such as a language
//! name in the middle of a movie name or a leading year.

use crate::model::{Release, Tag, TagType};
use crate::registry::Registry;

const SEPARATORS: [TagType; 2] = [TagType::Whitespace, TagType::Delim];

/// Types that only ever start a name when they are really title words.
const NEVER_FIRST: [TagType; 12] = [
    TagType::Platform,
    TagType::Arch,
    TagType::Source,
    TagType::Resolution,
    TagType::Codec,
    TagType::Hdr,
    TagType::Audio,
    TagType::Other,
    TagType::Cut,
    TagType::Edition,
    TagType::Language,
    TagType::Region,
];

/// Types demoted when found inside the title span.
const TITLE_WORDS: [TagType; 5] = [
    TagType::Collection,
    TagType::Language,
    TagType::Other,
    TagType::Arch,
    TagType::Platform,
];

/// Runs every pass over the tokens of `release`.
pub(super) fn apply(registry: &Registry, release: &mut Release) {
    let pivot = release.pivot();
    release.with_tags(|tags, release| {
        fix_first_date(tags, pivot);

        let pivots = Pivots::find(&tags[..pivot], pivot);
        if let Some(date) = pivots.date {
            release.set_primary_date(date);
        }
        for j in (0..pivots.date.unwrap_or(tags.len())).rev() {
            if tags[j].is(&[TagType::Date]) {
                tags[j].demote();
                release.push_date(j);
            }
        }

        let special = match (pivots.date, pivots.series) {
            (Some(d), Some(s)) => Some(d.min(s)),
            (d, s) => d.or(s),
        };
        if let Some(end) = special {
            fix_special(registry, tags, end, pivots.series.is_some());
        }

        let text_end = text_end(tags, pivots.pos);
        for tag in tags[..text_end].iter_mut() {
            if tag.is(&[TagType::Language, TagType::Arch, TagType::Platform]) {
                tag.demote();
            }
        }
        fix_first(tags, pivot);

        let text_start = tags[..pivot]
            .iter()
            .position(|t| t.is(&[TagType::Text]))
            .unwrap_or(pivot);
        fix_bad(registry, tags, text_start, text_end);
        fix_no_text(tags, text_end);
        fix_isolated(registry, tags, pivot);
        fix_music(registry, tags, pivot);
    });
}

/// Last position of each pivot type before the end tags.
#[derive(Debug, Default)]
struct Pivots {
    date: Option<usize>,
    series: Option<usize>,
    /// Earliest of the recorded positions, or the pivot when none.
    pos: usize,
}

impl Pivots {
    fn find(tags: &[Tag], pivot: usize) -> Self {
        const TYPES: [TagType; 5] = [
            TagType::Date,
            TagType::Source,
            TagType::Series,
            TagType::Resolution,
            TagType::Version,
        ];
        let mut seen = [false; 5];
        let mut out = Self {
            pos: pivot,
            ..Self::default()
        };
        for (i, tag) in tags.iter().enumerate().rev() {
            let Some(k) = TYPES.iter().position(|&t| t == tag.typ()) else {
                continue;
            };
            if seen[k] {
                continue;
            }
            seen[k] = true;
            out.pos = i;
            match tag.typ() {
                TagType::Date => out.date = Some(i),
                TagType::Series => out.series = Some(i),
                _ => {}
            }
        }
        out
    }
}

fn text_end(tags: &[Tag], mut i: usize) -> usize {
    while i > 0 && !tags[i - 1].is(&[TagType::Text]) {
        i -= 1;
    }
    i
}

fn first_word(tags: &[Tag], pivot: usize) -> Option<usize> {
    tags[..pivot].iter().position(|t| !t.is(&SEPARATORS))
}

/// A name that starts with its only date uses the date as a title word,
/// as in `2012.2009.1080p`.
fn fix_first_date(tags: &mut [Tag], pivot: usize) {
    let Some(last) = tags[..pivot].iter().rposition(|t| t.is(&[TagType::Date])) else {
        return;
    };
    let Some(first) = first_word(tags, pivot) else {
        return;
    };
    if first < last {
        return;
    }
    if first > 0 && tags[first - 1].is(&[TagType::Delim]) && tags[first - 1].delim().ends_with('(')
    {
        return;
    }
    if tags[first].is(&[TagType::Date]) {
        tags[first].demote();
    }
}

fn fix_first(tags: &mut [Tag], pivot: usize) {
    if let Some(i) = first_word(tags, pivot) {
        if tags[i].is(&NEVER_FIRST) {
            tags[i].demote();
        }
    }
}

/// Common words that are also vocabulary, such as `Web` or `Red`.
fn is_impostor(registry: &Registry, tag: &Tag, series: bool) -> bool {
    let text = tag.text();
    match tag.typ() {
        TagType::Collection => {
            let c = tag.normalize(registry);
            c == "CC" || c == "RED" || (c == "AMZN" && text.to_lowercase() == "amazon")
        }
        TagType::Source => text == "Web",
        TagType::Cut => text == "Uncut" || text.to_lowercase() == "dc",
        TagType::Other => {
            let o = tag.normalize(registry);
            o == "MD" || o == "RESTORATiON"
        }
        TagType::Arch | TagType::Platform => series,
        _ => false,
    }
}

fn fix_special(registry: &Registry, tags: &mut [Tag], end: usize, series: bool) {
    for tag in tags[..end].iter_mut() {
        if is_impostor(registry, tag, series) {
            tag.demote();
        }
    }
}

fn fix_bad(registry: &Registry, tags: &mut [Tag], start: usize, end: usize) {
    const TRAILING: [TagType; 7] = [
        TagType::Language,
        TagType::Edition,
        TagType::Cut,
        TagType::Other,
        TagType::Collection,
        TagType::Delim,
        TagType::Source,
    ];
    let mut i = end;
    while i > start && tags[i - 1].is(&TRAILING) {
        i -= 1;
    }
    let Some(span) = tags.get_mut(start..i) else {
        return;
    };
    for tag in span {
        let keep = match tag.typ() {
            TagType::Collection => tag.normalize(registry) == "IMAX",
            TagType::Other => tag.normalize(registry) == "REMiX",
            _ => false,
        };
        if keep || is_impostor(registry, tag, false) {
            continue;
        }
        if tag.is(&TITLE_WORDS) {
            tag.demote();
        }
    }
}

/// With no free text at all, a collection name is the title.
fn fix_no_text(tags: &mut [Tag], end: usize) {
    let m = (end + 1).min(tags.len());
    if tags[..m].iter().any(|t| t.is(&[TagType::Text])) {
        return;
    }
    for tag in tags[..m].iter_mut() {
        if tag.is(&[TagType::Collection]) {
            tag.demote();
        }
    }
}

/// Whether walking away from `i` over separators reaches free text.
fn isolated(tags: &[Tag], i: usize, forward: bool) -> bool {
    let step = |j: usize| if forward { j + 1 } else { j.wrapping_sub(1) };
    let mut j = step(i);
    while j > 0 && j < tags.len().saturating_sub(1) && tags[j].is(&SEPARATORS) {
        j = step(j);
    }
    j < tags.len() && tags[j].is(&[TagType::Text])
}

fn fix_isolated(registry: &Registry, tags: &mut [Tag], pivot: usize) {
    if pivot < 3 {
        return;
    }
    for i in (1..pivot - 1).rev() {
        let tag = &tags[i];
        if !tag.is(&TITLE_WORDS) {
            continue;
        }
        if tag.is(&[TagType::Other]) && tag.normalize(registry) == "REMiX" {
            continue;
        }
        let head = &tags[..pivot];
        if !isolated(head, i, false) || !isolated(head, i, true) {
            continue;
        }
        let mut j = i + 1;
        while j < pivot && !tags[j].is(&[TagType::Text]) {
            j += 1;
        }
        let last_word = j == pivot - 1
            || (j < pivot - 1 && tags[j + 1].is(&[TagType::Delim, TagType::Whitespace]) && j + 2 == pivot);
        if last_word {
            continue;
        }
        tags[i].demote();
    }
}

fn fix_music(registry: &Registry, tags: &mut [Tag], pivot: usize) {
    let music_excl = tags[..pivot]
        .iter()
        .any(|t| t.is(&[TagType::Audio]) && t.info_excl(registry));

    let mut audio_count = 0;
    let mut cbr = None;
    for i in 0..pivot {
        let tag = tags[i].clone();
        if tag.is(&[TagType::Audio]) {
            if tag.normalize(registry) == "CBR" {
                cbr = Some(i);
            }
            audio_count += 1;
        }

        if i != 0 && tag.is(&[TagType::Other]) && tag.normalize(registry) == "BOOTLEG" {
            let delim = |j: usize| {
                tags.get(j)
                    .filter(|t| t.is(&[TagType::Delim]))
                    .map(|t| t.delim().to_string())
            };
            let prev = delim(i - 1).unwrap_or_default();
            let next = delim(i + 1).unwrap_or_default();
            let wrapped = (prev.ends_with('-') && next.starts_with('-'))
                || (prev.ends_with('(') && next.starts_with(')'));
            if !wrapped {
                tags[i].demote();
            }
        }

        if music_excl {
            if tag.single_ep() {
                tags[i].demote();
            } else if tag.is(&[TagType::Arch]) && tag.normalize(registry) == "16bit" {
                tags[i].reclassify(TagType::Audio, Some(TagType::Audio));
            }
        }
    }

    if let (Some(i), 1) = (cbr, audio_count) {
        tags[i].reclassify(TagType::Container, Some(TagType::Container));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;

    fn fixed(input: &str) -> Vec<Tag> {
        let scanner = Scanner::new(Registry::builtin()).unwrap();
        let (tags, pivot) = scanner.scan(input);
        let mut release = Release::new(tags, pivot);
        apply(scanner.registry(), &mut release);
        release.tags().to_vec()
    }

    fn typ_of(tags: &[Tag], text: &str) -> Option<TagType> {
        tags.iter().find(|t| t.original() == text).map(Tag::typ)
    }

    #[test]
    fn test_leading_date_is_title() {
        let tags = fixed("2012.2009.1080p.BluRay.x264-GRPNAME");
        assert_eq!(typ_of(&tags, "2012"), Some(TagType::Text));
        assert_eq!(typ_of(&tags, "2009"), Some(TagType::Date));
    }

    #[test]
    fn test_earlier_dates_demoted() {
        let scanner = Scanner::new(Registry::builtin()).unwrap();
        let (tags, pivot) = scanner.scan("Movie.1984.Remake.2020.1080p.WEB.x264-GRPNAME");
        let mut release = Release::new(tags, pivot);
        apply(scanner.registry(), &mut release);
        assert_eq!(release.primary_date().map(Tag::date), Some((2020, 0, 0)));
        assert_eq!(release.dates().len(), 1);
        assert_eq!(release.dates()[0].typ(), TagType::Text);
    }

    #[test]
    fn test_language_in_title_demoted() {
        let tags = fixed("The.French.Connection.1971.1080p.BluRay.x264-GRPNAME");
        assert_eq!(typ_of(&tags, "French"), Some(TagType::Text));
    }

    #[test]
    fn test_language_after_title_kept() {
        let tags = fixed("Movie.2010.GERMAN.1080p.BluRay.x264-GRPNAME");
        assert_eq!(typ_of(&tags, "GERMAN"), Some(TagType::Language));
    }

    #[test]
    fn test_no_title_text() {
        for input in ["S01E02", "S01E02.720p", "   ", "⭐⭐", "1080p.x264", "()"] {
            let scanner = Scanner::new(Registry::builtin()).unwrap();
            let (tags, pivot) = scanner.scan(input);
            let mut release = Release::new(tags, pivot);
            apply(scanner.registry(), &mut release);
            assert_eq!(release.to_string(), input);
        }
    }

    #[test]
    fn test_isolated_word_between_text_demoted() {
        let tags = fixed("Movie.Name.2010.Alpha.GERMAN.Beta.Words.1080p.BluRay.x264-GRPNAME");
        assert_eq!(typ_of(&tags, "GERMAN"), Some(TagType::Text));
    }

    #[test]
    fn test_isolated_word_before_last_text_kept() {
        let tags = fixed("Movie.Name.2010.Alpha.GERMAN.Beta-GRPNAME");
        assert_eq!(typ_of(&tags, "GERMAN"), Some(TagType::Language));
    }

    #[test]
    fn test_word_after_date_not_isolated() {
        let tags = fixed("Movie.2010.GERMAN.Alpha.Words.1080p.BluRay.x264-GRPNAME");
        assert_eq!(typ_of(&tags, "GERMAN"), Some(TagType::Language));
    }

    #[test]
    fn test_first_word_never_metadata() {
        let tags = fixed("Web.Of.Lies.2010.720p.HDTV.x264-GRPNAME");
        assert_eq!(typ_of(&tags, "Web"), Some(TagType::Text));
    }
}
