//! Title, subtitle and artist extraction.
//!
//! Each release type has its own layout. All of them build text the same
//! way: absorb a run of permitted tags, turning delimiters between them
//! into spaces or punctuation, then tidy the result.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::ParserConfig;
use crate::model::{Release, ReleaseType, Tag, TagType};
use crate::normalize::normalize;
use crate::registry::Registry;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid title regex {}: {}", pattern, e))
}

/// Spaced or dotted single letters, such as `S H I E L D`.
static MISSING: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\b[A-Z][\. ][A-Z](?:[\. ][A-Z])*[\. ]?\b"));
/// A lone dotted capital after a word, such as the `J.` in `Agent J.Smith`.
static BAD: LazyLock<Regex> = LazyLock::new(|| regex(r"[^A-Z][-\. ][A-Z]\.($|[^A-Z])"));
static FIX: LazyLock<Regex> = LazyLock::new(|| regex(r"([A-Z])\."));
static SPACES: LazyLock<Regex> = LazyLock::new(|| regex(r"\s+"));
static ELLIPSIS: LazyLock<Regex> = LazyLock::new(|| regex(r"\.{3,}"));
static CHECKSUM: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)^[a-f0-9]{8}$"));

/// Stripped from both ends of every extracted title.
const EDGE: &[char] = &[
    ' ', '\t', '\n', '\x0c', '\r', '(', ')', '[', ']', '{', '}', '~', '/', '\\', '_', ',', '-',
];
/// Stripped where a title is split into title and subtitle.
const SPLIT_EDGE: &[char] = &[
    ' ', '\t', '\n', '\x0c', '\r', '-', '.', '_', ',', '(', ')', '[', ']', '{', '}', '~', '/',
    '\\',
];
const TITLE_TRIM: &[char] = &[
    ' ', '\t', '\n', '\x0c', '\r', '(', ')', ',', '-', '_', '[', ']', '{', '}', '~', '/', '\\',
];
const BREAK: &[char] = &[
    ' ', '\t', '\n', '\x0c', '\r', '(', ')', '+', ',', '.', '_', '[', ']', '{', '}', '~', '/',
    '\\',
];

const ARTIST_SEPARATORS: [&str; 3] = [" - ", "--", "~"];

/// Fills `artist`, `title`, `subtitle` and `alt` for the inferred type.
/// Returns the index of the first tag not absorbed.
pub(super) fn titles(registry: &Registry, config: &ParserConfig, release: &mut Release) -> usize {
    let typ = release.release_type;
    release.with_tags(|tags, r| {
        let tags = &*tags;
        let (end, aka) = match typ {
            ReleaseType::Movie => (movie(tags, r), true),
            ReleaseType::Series | ReleaseType::Episode => (episode(tags, r), true),
            ReleaseType::Music => (music(registry, tags, r), false),
            ReleaseType::Book | ReleaseType::Audiobook => (book(registry, tags, r), false),
            ReleaseType::App | ReleaseType::Game => {
                (span(tags, r, &[TagType::Text, TagType::Date]), false)
            }
            _ => (span(tags, r, &[TagType::Text]), false),
        };

        if aka && config.expand_aka && r.alt.is_empty() {
            if let Some((title, alt)) = r.title.split_once(" AKA ") {
                if !title.is_empty() && !alt.is_empty() {
                    let (title, alt) = (title.to_string(), alt.to_string());
                    r.title = title;
                    r.alt = alt;
                }
            }
        }
        end
    })
}

/// Records leftover free text from `from` on and, when `promote` is set,
/// turns the last leftover into the checksum or group if those are unset.
pub(super) fn unused(release: &mut Release, from: usize, promote: bool) {
    release.with_tags(|tags, r| {
        for (j, tag) in tags.iter().enumerate().skip(from) {
            if tag.is(&[TagType::Text]) {
                r.push_unused(j);
            }
        }
        if !promote {
            return;
        }
        let Some(last) = r.last_unused() else {
            return;
        };
        let s = tags[last].text();
        if r.sum.is_empty() && CHECKSUM.is_match(&s) && s.contains(|c: char| c.is_ascii_digit()) {
            r.sum = s.into_owned();
            r.pop_unused();
        } else if r.group.is_empty() && (s.is_empty() || !s.chars().all(|c| c.is_ascii_digit())) {
            r.group = s.into_owned();
            r.pop_unused();
        }
    });
}

/// Joins the leading run of `types` tags and the delimiters between them.
/// Stops at any other tag or at a bracketing delimiter. Returns the text
/// and the number of tags consumed.
fn title(tags: &[Tag], types: &[TagType]) -> (String, usize) {
    let mut s = String::new();
    let mut i = 0;
    while i < tags.len() {
        let tag = &tags[i];
        if tag.is(types) {
            s.push_str(&tag.title_text());
        } else if tag.is(&[TagType::Delim]) {
            let d = tag.delim();
            if d == "__" || d.contains(['(', ')', '[', ']', '{', '}', '/']) {
                break;
            }
            s.push_str(&delim_text(tags, i, types));
        } else {
            break;
        }
        i += 1;
    }
    (polish(&s), i)
}

fn polish(s: &str) -> String {
    let s = MISSING.replace_all(s, |caps: &Captures<'_>| {
        format!("{}. ", caps[0].trim().replace(' ', "."))
    });
    let s = s.replacen(". .", ". ", 1);
    let s = BAD.replace_all(&s, |caps: &Captures<'_>| FIX.replace_all(&caps[0], "$1").into_owned());
    let s = SPACES.replace_all(&s, " ");
    let s = ELLIPSIS.replace_all(&s, "...");
    let s = html_escape::decode_html_entities(&s);
    let s = if s.matches('+').count() > 1 {
        s.replace('+', " ")
    } else {
        s.into_owned()
    };
    s.trim_matches(EDGE).to_string()
}

fn single(s: &str, pred: fn(&char) -> bool) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if pred(&c))
}

/// Title text for the delimiter at `tags[i]`. A lone `.` survives between
/// two single capitals or two single digits (`U.S.`, `2.0`).
fn delim_text(tags: &[Tag], i: usize, types: &[TagType]) -> String {
    let d = tags[i].delim();
    match d {
        "..." => return "...".to_string(),
        ".." | ". " => return ". ".to_string(),
        "" => return " ".to_string(),
        _ => {}
    }
    let mapped: String = d
        .chars()
        .map(|c| if "-+,.~".contains(c) { c } else { ' ' })
        .collect();
    let s = SPACES.replace_all(&mapped, " ");
    if s != "." || i == tags.len() - 1 {
        return SPACES.replace_all(&s.replace('.', " "), " ").into_owned();
    }

    let ante = if i > 1 && tags[i - 2].is(&[TagType::Delim]) {
        tags[i - 2].delim()
    } else {
        ""
    };
    let text = |j: usize| {
        tags.get(j)
            .filter(|t| t.is(types))
            .map(|t| t.text().into_owned())
            .unwrap_or_default()
    };
    let prev = if i > 0 { text(i - 1) } else { String::new() };
    let next = text(i + 1);
    let joined = !ante.contains(['-', '~']);
    let letters = single(&prev, char::is_ascii_uppercase) && single(&next, char::is_ascii_uppercase);
    let digits = single(&prev, char::is_ascii_digit) && single(&next, char::is_ascii_digit);
    if joined && (letters || digits) {
        ".".to_string()
    } else {
        " ".to_string()
    }
}

fn first_of(tags: &[Tag], from: usize, types: &[TagType]) -> usize {
    tags.iter()
        .skip(from)
        .position(|t| t.is(types))
        .map_or(tags.len(), |p| from + p)
}

fn span(tags: &[Tag], r: &mut Release, types: &[TagType]) -> usize {
    let pos = first_of(tags, 0, types);
    let (title, offset) = title(&tags[pos..], types);
    r.title = title;
    pos + offset
}

fn movie(tags: &[Tag], r: &mut Release) -> usize {
    const SUBTITLE: [TagType; 3] = [TagType::Text, TagType::Cut, TagType::Edition];

    let start = first_of(tags, 0, &[TagType::Text]);
    let (title, offset) = title(&tags[start..], &[TagType::Text]);
    r.title = title;

    let date = tags.iter().position(|t| t.is(&[TagType::Date]));
    let res = tags.iter().position(|t| t.is(&[TagType::Resolution]));
    let (Some(date), Some(res)) = (date, res) else {
        return box_title(tags, r, start, offset);
    };
    if date + 2 >= res {
        return box_title(tags, r, start, offset);
    }

    let between = tags[date + 1..res]
        .iter()
        .all(|t| t.is(&[TagType::Delim, TagType::Text, TagType::Cut, TagType::Edition]));
    if between {
        let mut sub = date + 1;
        while sub < res - 1 && !tags[sub].is(&SUBTITLE) {
            sub += 1;
        }
        if sub < res - 1 {
            r.subtitle = self::title(&tags[sub..res - 1], &SUBTITLE).0;
        }
    }

    if r.subtitle.is_empty() {
        if let Some((head, last)) = r.title.rsplit_once('~') {
            let title = head.trim_end_matches(SPLIT_EDGE).to_string();
            let subtitle = last.trim_start_matches(SPLIT_EDGE).to_string();
            r.title = title;
            r.subtitle = subtitle;
        }
    }

    (start + offset).min(res)
}

/// Boxsets put the edition after the title: `Movie.The.Complete.Collection`.
/// A `The` shortly before the edition starts the subtitle.
fn box_title(tags: &[Tag], r: &mut Release, start: usize, offset: usize) -> usize {
    let n = start + offset;
    if n >= tags.len()
        || n == 0
        || r.disc.is_empty()
        || !tags[n].is(&[TagType::Cut, TagType::Edition])
    {
        return n;
    }

    let floor = start.max(n.saturating_sub(9));
    for pos in (floor + 1..n).rev() {
        if normalize(&tags[pos - 1].text()) != "the" {
            continue;
        }
        let (prefix, _) = title(&tags[pos - 1..n], &[TagType::Text]);
        let (suffix, suffix_len) = title(
            &tags[n..],
            &[TagType::Text, TagType::Cut, TagType::Edition],
        );

        let mut keep = r.title.len().saturating_sub(prefix.len());
        while !r.title.is_char_boundary(keep) {
            keep -= 1;
        }
        r.title.truncate(keep);
        let trimmed = r.title.trim_end_matches(SPLIT_EDGE).len();
        r.title.truncate(trimmed);
        r.subtitle = format!("{} {}", prefix, suffix.trim_end_matches(['.', '-', '_']));
        return n + suffix_len;
    }
    n
}

fn episode(tags: &[Tag], r: &mut Release) -> usize {
    const SKIP: [TagType; 13] = [
        TagType::Delim,
        TagType::Source,
        TagType::Resolution,
        TagType::Collection,
        TagType::Date,
        TagType::Series,
        TagType::Version,
        TagType::Disc,
        TagType::Other,
        TagType::Cut,
        TagType::Edition,
        TagType::Language,
        TagType::Container,
    ];

    let mut pos = movie(tags, r);
    let marker = if r.month != 0 && r.day != 0 {
        TagType::Date
    } else {
        TagType::Series
    };
    while pos < tags.len() && !tags[pos].is(&[marker]) {
        if tags[pos].is(&[TagType::Text]) {
            r.push_unused(pos);
        }
        pos += 1;
    }
    if pos == tags.len() {
        return pos;
    }

    pos += 1;
    while pos < tags.len() && tags[pos].is(&SKIP) {
        pos += 1;
    }
    if pos == tags.len() || !tags[pos].is(&[TagType::Text]) {
        return pos;
    }
    let (subtitle, offset) = title(&tags[pos..], &[TagType::Text]);
    r.subtitle = subtitle;
    pos + offset
}

/// Text and remix markers starting at the first text tag from `i`.
fn mix_title(registry: &Registry, tags: &[Tag], pivot: usize, i: usize) -> (String, usize) {
    let mut start = i;
    while start < pivot && !tags[start].is(&[TagType::Text]) {
        start += 1;
    }
    if start >= tags.len() {
        return (String::new(), i);
    }
    let mut end = start;
    while end < pivot && tags[end].is(&[TagType::Delim, TagType::Text, TagType::Other]) {
        if tags[end].is(&[TagType::Other]) && tags[end].normalize(registry) != "REMiX" {
            break;
        }
        end += 1;
    }
    let (title, offset) = title(&tags[start..end], &[TagType::Text, TagType::Other]);
    (title, start + offset)
}

/// Steps over a date at `i`. Returns the new index, whether a date was
/// skipped, and whether a delimiter follows.
fn check_date(tags: &[Tag], pivot: usize, mut i: usize) -> (usize, bool, bool) {
    if i >= pivot {
        return (i, false, false);
    }
    let mut skipped = false;
    if tags[i].is(&[TagType::Date]) {
        i += 1;
        skipped = true;
    }
    let delim = i < pivot && tags[i].is(&[TagType::Delim]);
    (i, skipped, delim)
}

fn music(registry: &Registry, tags: &[Tag], r: &mut Release) -> usize {
    let pivot = r.pivot();
    let (title, mut i) = mix_title(registry, tags, pivot, 0);
    r.title = title;

    let split = [" - ", "--", "~", "-"]
        .iter()
        .find_map(|sep| r.title.rsplit_once(sep));
    if let Some((artist, title)) = split {
        let (artist, title) = (artist.trim().to_string(), title.trim().to_string());
        r.artist = artist;
        r.title = title;
    }

    let (at, mut skipped, mut ok) = check_date(tags, pivot, i);
    i = at;
    if ok {
        let delim = tags[i].delim().to_string();

        if r.artist.is_empty() && delim.ends_with('(') {
            let (title, z1) = mix_title(registry, tags, pivot, i + 1);
            let (subtitle, z2) = mix_title(registry, tags, pivot, z1 + 1);
            if !title.is_empty() && !subtitle.is_empty() {
                r.artist = std::mem::take(&mut r.title);
                r.title = format!("({}) {}", title, subtitle);
                (i, skipped, ok) = check_date(tags, pivot, z2);
                if !ok {
                    return i;
                }
            }
        }

        if r.artist.is_empty() && (skipped || delim.starts_with(')')) {
            let (title, z) = mix_title(registry, tags, pivot, i + 1);
            if !title.is_empty() {
                r.artist = std::mem::replace(&mut r.title, title);
                i = z;
            }
        }

        let continues = delim.ends_with('(') || delim == "__" || delim.contains(['-', '~']);
        let text_next = i + 1 < pivot && tags[i + 1].is(&[TagType::Text]);
        if r.subtitle.is_empty() && continues && text_next {
            (r.subtitle, i) = mix_title(registry, tags, pivot, i + 1);
        }
    }

    if r.subtitle.is_empty() && !r.artist.is_empty() {
        let split = ARTIST_SEPARATORS
            .iter()
            .find_map(|sep| r.artist.split_once(sep));
        if let Some((artist, title)) = split {
            let artist = artist.trim_end_matches(TITLE_TRIM).to_string();
            let title = title.trim_start_matches(BREAK).to_string();
            r.artist = artist;
            r.subtitle = std::mem::replace(&mut r.title, title);
        }
    }
    i
}

fn book(registry: &Registry, tags: &[Tag], r: &mut Release) -> usize {
    const SPAN: [TagType; 5] = [
        TagType::Text,
        TagType::Platform,
        TagType::Arch,
        TagType::Other,
        TagType::Region,
    ];
    const WORDS: [TagType; 4] = [
        TagType::Text,
        TagType::Platform,
        TagType::Arch,
        TagType::Region,
    ];

    let mut pos = 0;
    while pos < tags.len() {
        pos = first_of(tags, pos, &SPAN);
        if pos >= tags.len() {
            break;
        }
        let tag = &tags[pos];
        let other = tag.is(&[TagType::Other]);
        if other && tag.info_type(registry) != ReleaseType::Book {
            pos += 1;
            continue;
        }
        let (s, offset) = if other && tag.normalize(registry) == "Strategy.Guide" {
            (tag.text().replace('.', " "), 2)
        } else {
            title(&tags[pos..], &WORDS)
        };
        if !r.title.is_empty() && !s.is_empty() {
            r.title.push(' ');
        }
        r.title.push_str(&s);
        pos += offset.max(1);
    }

    if let Some((head, last)) = r.title.rsplit_once(';') {
        let title = head.trim_end_matches(TITLE_TRIM).to_string();
        let subtitle = last.trim_start_matches(TITLE_TRIM).to_string();
        r.title = title;
        r.subtitle = subtitle;
    }

    if r.artist.is_empty() {
        let split = ARTIST_SEPARATORS
            .iter()
            .find_map(|sep| r.title.split_once(sep));
        if let Some((artist, title)) = split {
            let artist = artist.trim_end_matches(TITLE_TRIM).to_string();
            let title = title.trim_start_matches(BREAK).to_string();
            r.artist = artist;
            r.title = title;
        }
    }

    if r.subtitle.is_empty() {
        let split = ARTIST_SEPARATORS
            .iter()
            .find_map(|sep| r.title.split_once(sep));
        if let Some((title, subtitle)) = split {
            let title = title.trim_end_matches(BREAK).to_string();
            let subtitle = subtitle.trim_start_matches(TITLE_TRIM).to_string();
            r.title = title;
            r.subtitle = subtitle;
        }
    }

    if r.artist.is_empty() {
        if let Some((artist, title)) = r.title.rsplit_once('-') {
            let artist = artist.trim_end_matches(TITLE_TRIM);
            let title = title.trim_start_matches(BREAK);
            let numbered = artist.ends_with(|c: char| c.is_ascii_digit())
                || title.starts_with(|c: char| c.is_ascii_digit());
            if !numbered {
                let (artist, title) = (artist.to_string(), title.to_string());
                r.artist = artist;
                r.title = title;
            }
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Tag {
        Tag::plain(TagType::Text, s)
    }

    fn delim(s: &str) -> Tag {
        Tag::plain(TagType::Delim, s)
    }

    #[test]
    fn test_title_joins_words() {
        let tags = [text("The"), delim("."), text("Matrix"), delim("."), text("Reloaded")];
        assert_eq!(title(&tags, &[TagType::Text]), ("The Matrix Reloaded".to_string(), 5));
    }

    #[test]
    fn test_title_stops_at_brackets() {
        let tags = [text("Artist"), delim(" ("), text("Live")];
        assert_eq!(title(&tags, &[TagType::Text]), ("Artist".to_string(), 1));
    }

    #[test]
    fn test_title_keeps_acronyms() {
        let tags = [
            text("S"),
            delim("."),
            text("H"),
            delim("."),
            text("I"),
            delim("."),
            text("E"),
            delim("."),
            text("L"),
            delim("."),
            text("D"),
        ];
        assert_eq!(title(&tags, &[TagType::Text]).0, "S.H.I.E.L.D.");
    }

    #[test]
    fn test_title_keeps_decimal() {
        let tags = [text("Movie"), delim("."), text("2"), delim("."), text("0")];
        assert_eq!(title(&tags, &[TagType::Text]).0, "Movie 2.0");
    }

    #[test]
    fn test_title_keeps_dashes() {
        let tags = [text("Spider"), delim("-"), text("Man")];
        assert_eq!(title(&tags, &[TagType::Text]).0, "Spider-Man");
    }

    #[test]
    fn test_title_ellipsis_and_entities() {
        let tags = [text("Wait"), delim("..."), text("Tom&amp;Jerry")];
        assert_eq!(title(&tags, &[TagType::Text]).0, "Wait...Tom&Jerry");
    }

    #[test]
    fn test_title_plus_signs() {
        let tags = [text("A+B+C")];
        assert_eq!(title(&tags, &[TagType::Text]).0, "A B C");
        let tags = [text("C+")];
        assert_eq!(title(&tags, &[TagType::Text]).0, "C+");
    }

    #[test]
    fn test_title_trims_edges() {
        let tags = [delim("-"), text("Name"), delim("_")];
        assert_eq!(title(&tags, &[TagType::Text]).0, "Name");
    }

    #[test]
    fn test_polish_spaced_letters() {
        assert_eq!(polish("Agents of S H I E L D"), "Agents of S.H.I.E.L.D.");
    }
}
