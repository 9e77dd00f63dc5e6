//! Copies tag values into release fields.

use crate::model::{Release, TagType};
use crate::registry::Registry;

/// Clears every field and collects it again from the current tags.
pub(super) fn recollect(registry: &Registry, release: &mut Release) {
    release.reset_fields();
    collect(registry, release);
}

/// Fills release fields from the tags.
///
/// Scalar fields keep the first match except `group` and `ext`, which keep
/// the last, and `source`, which prefers anything over `CD` and anything
/// but `CD` over `DVD`. Date components still unset afterwards are taken
/// from demoted dates, nearest the primary date last.
pub(super) fn collect(registry: &Registry, release: &mut Release) {
    release.with_tags(|tags, r| {
        for tag in tags.iter() {
            let norm = || tag.normalize(registry);
            match tag.typ() {
                TagType::Platform if r.platform.is_empty() => r.platform = norm(),
                TagType::Arch if r.arch.is_empty() => r.arch = norm(),
                TagType::Source => {
                    let s = norm();
                    if r.source.is_empty() || r.source == "CD" || (r.source == "DVD" && s != "CD") {
                        r.source = s;
                    }
                }
                TagType::Resolution if r.resolution.is_empty() => r.resolution = norm(),
                TagType::Collection if r.collection.is_empty() => r.collection = norm(),
                TagType::Date => (r.year, r.month, r.day) = tag.date(),
                TagType::Series => {
                    let (series, episode) = tag.series();
                    if r.series == 0 {
                        r.series = series;
                    }
                    if r.episode == 0 {
                        r.episode = episode;
                    }
                }
                TagType::Version if r.version.is_empty() => r.version = norm(),
                TagType::Disc if r.disc.is_empty() => r.disc = norm(),
                TagType::Codec => r.codec.push(norm()),
                TagType::Hdr => r.hdr.push(norm()),
                TagType::Audio => r.audio.push(norm()),
                TagType::Channels if r.channels.is_empty() => r.channels = norm(),
                TagType::Other => r.other.push(norm()),
                TagType::Cut => r.cut.push(norm()),
                TagType::Edition => r.edition.push(norm()),
                TagType::Language => r.language.push(norm()),
                TagType::Size if r.size.is_empty() => r.size = norm(),
                TagType::Region if r.region.is_empty() => r.region = norm(),
                TagType::Container if r.container.is_empty() => r.container = norm(),
                TagType::Genre if r.genre.is_empty() => r.genre = norm(),
                TagType::Id if r.id.is_empty() => r.id = norm(),
                TagType::Group => r.group = norm(),
                TagType::Meta => {
                    let (k, v) = tag.meta();
                    match k {
                        "site" if r.site.is_empty() => r.site = v.to_string(),
                        "sum" if r.sum.is_empty() => r.sum = v.to_string(),
                        "pass" if r.pass.is_empty() => r.pass = v.to_string(),
                        "req" => r.req = true,
                        // Already-filled site, sum and pass land here too.
                        _ => r.meta.push(format!("{}:{}", k, v)),
                    }
                }
                TagType::Ext => r.ext = norm(),
                _ => {}
            }
        }

        let fallback = r
            .date_indices()
            .iter()
            .rev()
            .chain(r.primary_date_index().iter())
            .map(|&i| tags[i].date())
            .collect::<Vec<_>>();
        for (year, month, day) in fallback {
            if r.year == 0 {
                r.year = year;
            }
            if r.month == 0 {
                r.month = month;
            }
            if r.day == 0 {
                r.day = day;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;

    fn collected(input: &str) -> Release {
        let scanner = Scanner::new(Registry::builtin()).unwrap();
        let (tags, pivot) = scanner.scan(input);
        let mut release = Release::new(tags, pivot);
        collect(scanner.registry(), &mut release);
        release
    }

    #[test]
    fn test_collect_movie_fields() {
        let r = collected("Movie.2010.1080p.BluRay.DTS.x264-GRPNAME");
        assert_eq!(r.year, 2010);
        assert_eq!(r.resolution, "1080p");
        assert_eq!(r.source, "BluRay");
        assert_eq!(r.codec, vec!["x264".to_string()]);
        assert_eq!(r.audio, vec!["DTS".to_string()]);
        assert_eq!(r.group, "GRPNAME");
    }

    #[test]
    fn test_collect_meta() {
        let r = collected("Show.S01E02.720p.HDTV.x264-GRPNAME [ABCD1234]");
        assert_eq!((r.series, r.episode), (1, 2));
        assert_eq!(r.sum, "ABCD1234");
        assert!(r.meta.is_empty());
    }

    #[test]
    fn test_collect_source_preference() {
        let r = collected("Artist-Album-CD-WEB-2004-GRPNAME");
        assert_eq!(r.source, "WEB");
    }

    #[test]
    fn test_recollect_clears_fields() {
        let scanner = Scanner::new(Registry::builtin()).unwrap();
        let (tags, pivot) = scanner.scan("Movie.2010.1080p-GRPNAME");
        let mut release = Release::new(tags, pivot);
        collect(scanner.registry(), &mut release);
        release.tags_mut()[2].demote();
        recollect(scanner.registry(), &mut release);
        assert_eq!(release.year, 0);
        assert_eq!(release.resolution, "1080p");
    }
}
