//! Main parsed release structure.

use std::fmt;

use super::{ReleaseType, Tag, TagType};

/// The structured record extracted from a release name.
///
/// Scalar fields hold the first (or most specific) match of their category;
/// list fields accumulate every match. The final token sequence is kept so
/// the original input can always be reconstructed with [`Release::to_string`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Release {
    /// Inferred release type
    pub release_type: ReleaseType,
    pub artist: String,
    pub title: String,
    pub subtitle: String,
    /// Alternate title, split from an `AKA` title
    pub alt: String,
    pub platform: String,
    pub arch: String,
    pub source: String,
    pub resolution: String,
    pub collection: String,
    pub year: u32,
    pub month: u32,
    pub day: u32,
    /// Season number
    pub series: u32,
    pub episode: u32,
    pub version: String,
    pub disc: String,
    pub codec: Vec<String>,
    pub hdr: Vec<String>,
    pub audio: Vec<String>,
    pub channels: String,
    pub other: Vec<String>,
    pub cut: Vec<String>,
    pub edition: Vec<String>,
    pub language: Vec<String>,
    pub size: String,
    pub region: String,
    pub container: String,
    pub genre: String,
    /// Catalog identifier
    pub id: String,
    /// Release group
    pub group: String,
    /// Generic `key:value` bracketed metadata
    pub meta: Vec<String>,
    pub site: String,
    /// Bracketed CRC32 checksum
    pub sum: String,
    /// Archive password
    pub pass: String,
    /// Whether the release is marked as a request
    pub req: bool,
    /// File extension, lowercased
    pub ext: String,

    tags: Vec<Tag>,
    primary_date: Option<usize>,
    dates: Vec<usize>,
    unused: Vec<usize>,
    pivot: usize,
}

impl Release {
    /// Creates an empty release over a token sequence whose first `pivot`
    /// tokens were lexed from the front of the input.
    pub(crate) fn new(tags: Vec<Tag>, pivot: usize) -> Self {
        Self {
            tags,
            pivot,
            ..Self::default()
        }
    }

    /// Clears every extracted field, keeping tokens and bookkeeping indices.
    pub(crate) fn reset_fields(&mut self) {
        let tags = std::mem::take(&mut self.tags);
        let primary_date = self.primary_date;
        let dates = std::mem::take(&mut self.dates);
        let unused = std::mem::take(&mut self.unused);
        *self = Self {
            tags,
            primary_date,
            dates,
            unused,
            pivot: self.pivot,
            ..Self::default()
        };
    }

    /// Final token sequence.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub(crate) fn tags_mut(&mut self) -> &mut [Tag] {
        &mut self.tags
    }

    /// Runs `f` with the tokens detached so fields and tokens can be
    /// updated together. `tags()` is empty while `f` runs.
    pub(crate) fn with_tags<R>(&mut self, f: impl FnOnce(&mut [Tag], &mut Self) -> R) -> R {
        let mut tags = std::mem::take(&mut self.tags);
        let out = f(&mut tags, self);
        self.tags = tags;
        out
    }

    pub(crate) fn tag_mut(&mut self, idx: usize) -> &mut Tag {
        &mut self.tags[idx]
    }

    /// Number of tokens lexed from the front of the input.
    pub fn pivot(&self) -> usize {
        self.pivot
    }

    /// Free-text tokens that were not absorbed into a title.
    pub fn unused(&self) -> Vec<&Tag> {
        self.unused.iter().map(|&i| &self.tags[i]).collect()
    }

    /// Date tokens other than the one chosen as the release date.
    pub fn dates(&self) -> Vec<&Tag> {
        self.dates.iter().map(|&i| &self.tags[i]).collect()
    }

    /// The date token chosen as the release date, if any.
    pub fn primary_date(&self) -> Option<&Tag> {
        self.primary_date.map(|i| &self.tags[i])
    }

    pub(crate) fn primary_date_index(&self) -> Option<usize> {
        self.primary_date
    }

    pub(crate) fn set_primary_date(&mut self, idx: usize) {
        self.primary_date = Some(idx);
    }

    pub(crate) fn date_indices(&self) -> &[usize] {
        &self.dates
    }

    pub(crate) fn push_date(&mut self, idx: usize) {
        self.dates.push(idx);
    }

    pub(crate) fn push_unused(&mut self, idx: usize) {
        self.unused.push(idx);
    }

    pub(crate) fn last_unused(&self) -> Option<usize> {
        self.unused.last().copied()
    }

    pub(crate) fn pop_unused(&mut self) {
        self.unused.pop();
    }

    /// Every `(season, episode)` pair named by the series tokens, sorted.
    ///
    /// Tokens without a season inherit the season of the nearest preceding
    /// token that has one. A bare episode joined to the previous token by a
    /// `-` delimiter expands to the full range, so `S01E01-E03` yields
    /// episodes 1, 2 and 3.
    pub fn series_episodes(&self) -> Vec<(u32, u32)> {
        let mut v = Vec::new();
        let mut last_series: Option<usize> = None;

        for (i, tag) in self.tags.iter().enumerate() {
            if !tag.is(&[TagType::Series]) {
                continue;
            }
            let (series, _) = tag.series();
            for episode in tag.episodes() {
                let mut season = series;
                if season == 0 {
                    if let Some(last) = last_series {
                        let (last_season, last_episode) = self.tags[last].series();
                        season = last_season;
                        let after_dash = i > 0
                            && self.tags[i - 1].is(&[TagType::Delim])
                            && self.tags[i - 1].original() == "-";
                        if after_dash {
                            v.extend((last_episode + 1..episode).map(|e| (season, e)));
                        }
                    }
                }
                v.push((season, episode));
            }
            if series != 0 {
                last_series = Some(i);
            }
        }

        v.sort_unstable();
        v
    }

    /// Flattened view of the release with list fields joined.
    pub fn summary(&self) -> ReleaseSummary {
        ReleaseSummary::from(self)
    }
}

impl fmt::Display for Release {
    /// Writes the original input, reassembled from the tokens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in &self.tags {
            f.write_str(tag.original())?;
        }
        Ok(())
    }
}

/// A flat, string-oriented view of a [`Release`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseSummary {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub release_type: ReleaseType,
    pub artist: String,
    pub title: String,
    pub subtitle: String,
    pub alt: String,
    pub platform: String,
    pub arch: String,
    pub source: String,
    pub resolution: String,
    pub collection: String,
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub series: u32,
    pub episode: u32,
    /// `SxxEyy` pairs, only set when there is more than one
    pub series_episodes: String,
    pub version: String,
    pub disc: String,
    pub codec: String,
    pub hdr: String,
    pub audio: String,
    pub channels: String,
    pub other: String,
    pub cut: String,
    pub edition: String,
    pub language: String,
    pub size: String,
    pub region: String,
    pub container: String,
    pub genre: String,
    pub id: String,
    pub group: String,
    pub meta: String,
    pub site: String,
    pub sum: String,
    pub pass: String,
    pub req: u8,
    pub ext: String,
    pub unused: String,
}

impl ReleaseSummary {
    /// Non-empty fields as `(name, value)` pairs, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let numbers = [
            ("year", self.year),
            ("month", self.month),
            ("day", self.day),
            ("series", self.series),
            ("episode", self.episode),
        ];
        let mut out = Vec::new();
        let release_type = if self.release_type == ReleaseType::Unknown {
            String::new()
        } else {
            self.release_type.to_string()
        };
        let head = [
            ("type", release_type),
            ("artist", self.artist.clone()),
            ("title", self.title.clone()),
            ("subtitle", self.subtitle.clone()),
            ("alt", self.alt.clone()),
            ("platform", self.platform.clone()),
            ("arch", self.arch.clone()),
            ("source", self.source.clone()),
            ("resolution", self.resolution.clone()),
            ("collection", self.collection.clone()),
        ];
        out.extend(head);
        out.extend(
            numbers
                .into_iter()
                .filter(|(_, n)| *n != 0)
                .map(|(k, n)| (k, n.to_string())),
        );
        let tail = [
            ("series_episodes", self.series_episodes.clone()),
            ("version", self.version.clone()),
            ("disc", self.disc.clone()),
            ("codec", self.codec.clone()),
            ("hdr", self.hdr.clone()),
            ("audio", self.audio.clone()),
            ("channels", self.channels.clone()),
            ("other", self.other.clone()),
            ("cut", self.cut.clone()),
            ("edition", self.edition.clone()),
            ("language", self.language.clone()),
            ("size", self.size.clone()),
            ("region", self.region.clone()),
            ("container", self.container.clone()),
            ("genre", self.genre.clone()),
            ("id", self.id.clone()),
            ("group", self.group.clone()),
            ("meta", self.meta.clone()),
            ("site", self.site.clone()),
            ("sum", self.sum.clone()),
            ("pass", self.pass.clone()),
            ("req", if self.req != 0 { "1".to_string() } else { String::new() }),
            ("ext", self.ext.clone()),
            ("unused", self.unused.clone()),
        ];
        out.extend(tail);
        out.retain(|(_, v)| !v.is_empty());
        out
    }
}

impl From<&Release> for ReleaseSummary {
    fn from(r: &Release) -> Self {
        let pairs = r.series_episodes();
        let series_episodes = if pairs.len() > 1 {
            pairs
                .iter()
                .map(|(s, e)| format!("S{:02}E{:02}", s, e))
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            String::new()
        };
        let unused = r
            .unused()
            .iter()
            .map(|t| t.text().into_owned())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            release_type: r.release_type,
            artist: r.artist.clone(),
            title: r.title.clone(),
            subtitle: r.subtitle.clone(),
            alt: r.alt.clone(),
            platform: r.platform.clone(),
            arch: r.arch.clone(),
            source: r.source.clone(),
            resolution: r.resolution.clone(),
            collection: r.collection.clone(),
            year: r.year,
            month: r.month,
            day: r.day,
            series: r.series,
            episode: r.episode,
            series_episodes,
            version: r.version.clone(),
            disc: r.disc.clone(),
            codec: r.codec.join(" "),
            hdr: r.hdr.join(" "),
            audio: r.audio.join(" "),
            channels: r.channels.clone(),
            other: r.other.join(" "),
            cut: r.cut.join(" "),
            edition: r.edition.join(" "),
            language: r.language.join(" "),
            size: r.size.clone(),
            region: r.region.clone(),
            container: r.container.clone(),
            genre: r.genre.clone(),
            id: r.id.clone(),
            group: r.group.clone(),
            meta: r.meta.join(" "),
            site: r.site.clone(),
            sum: r.sum.clone(),
            pass: r.pass.clone(),
            req: u8::from(r.req),
            ext: r.ext.clone(),
            unused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(v: &[&str]) -> Tag {
        Tag::new(TagType::Series, None, v.iter().copied())
    }

    fn delim(s: &str) -> Tag {
        Tag::plain(TagType::Delim, s)
    }

    #[test]
    fn test_display_reassembles_input() {
        let tags = vec![
            Tag::plain(TagType::Text, "Show"),
            delim("."),
            series(&["S01E02", "01", "02"]),
        ];
        let r = Release::new(tags, 3);
        assert_eq!(r.to_string(), "Show.S01E02");
    }

    #[test]
    fn test_series_episodes_range() {
        let tags = vec![
            series(&["S01E01", "01", "01"]),
            delim("-"),
            series(&["E03", "", "03"]),
        ];
        let r = Release::new(tags, 3);
        assert_eq!(r.series_episodes(), vec![(1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_series_episodes_inherit_season_without_range() {
        let tags = vec![
            series(&["S02E05", "02", "05"]),
            delim("."),
            series(&["E07", "", "07"]),
        ];
        let r = Release::new(tags, 3);
        assert_eq!(r.series_episodes(), vec![(2, 5), (2, 7)]);
    }

    #[test]
    fn test_series_episodes_sorted() {
        let tags = vec![
            series(&["S02E01", "02", "01"]),
            delim("."),
            series(&["S01E04E05", "01", "04", "05"]),
        ];
        let r = Release::new(tags, 3);
        assert_eq!(r.series_episodes(), vec![(1, 4), (1, 5), (2, 1)]);
    }

    #[test]
    fn test_reset_fields_keeps_tokens() {
        let mut r = Release::new(vec![Tag::plain(TagType::Text, "x")], 1);
        r.title = "x".to_string();
        r.push_unused(0);
        r.reset_fields();
        assert!(r.title.is_empty());
        assert_eq!(r.tags().len(), 1);
        assert_eq!(r.unused().len(), 1);
    }

    #[test]
    fn test_summary_joins_lists() {
        let mut r = Release::new(Vec::new(), 0);
        r.codec = vec!["x264".to_string(), "H.264".to_string()];
        r.req = true;
        let s = r.summary();
        assert_eq!(s.codec, "x264 H.264");
        assert_eq!(s.req, 1);
        assert!(s.series_episodes.is_empty());
    }

    #[test]
    fn test_summary_fields_skip_empty() {
        let mut r = Release::new(Vec::new(), 0);
        r.title = "Title".to_string();
        r.year = 2001;
        let fields = r.summary().fields();
        assert_eq!(
            fields,
            vec![("title", "Title".to_string()), ("year", "2001".to_string())]
        );
    }
}
