//! Release type inference.

use crate::model::{Release, ReleaseType, TagType};
use crate::registry::Registry;

/// Tag types that separate `-`-delimited fields in music names such as
/// `Artist-Album-2004-FLAC-GROUP`.
const MUSIC_FIELDS: [TagType; 7] = [
    TagType::Date,
    TagType::Codec,
    TagType::Hdr,
    TagType::Audio,
    TagType::Resolution,
    TagType::Source,
    TagType::Language,
];

/// Infers the release type from the tags and collected fields.
///
/// An already known type is returned unchanged. Registry entries that name
/// a release type are consulted from the end of the input backwards, then
/// the collected fields decide. On the `initial` pass, platform and
/// architecture tags that were demoted are restored and inspection runs
/// once more.
pub(super) fn inspect(registry: &Registry, release: &mut Release, initial: bool) -> ReleaseType {
    if release.release_type != ReleaseType::Unknown {
        return release.release_type;
    }
    if let Some(typ) = from_vocabulary(registry, release) {
        return typ;
    }
    if music_runs(release) > 1 {
        return ReleaseType::Music;
    }
    if let Some(typ) = from_fields(registry, release) {
        return typ;
    }

    if initial {
        let mut reverted = false;
        release.with_tags(|tags, r| {
            for tag in tags.iter_mut().rev() {
                if !tag.was(&[TagType::Platform, TagType::Arch]) {
                    continue;
                }
                tag.revert();
                reverted = true;
                match tag.typ() {
                    TagType::Platform => r.platform = tag.normalize(registry),
                    TagType::Arch => r.arch = tag.normalize(registry),
                    _ => {}
                }
            }
        });
        if reverted {
            return inspect(registry, release, false);
        }
    }
    ReleaseType::Unknown
}

fn from_vocabulary(registry: &Registry, r: &Release) -> Option<ReleaseType> {
    let tags = r.tags();
    for (i, tag) in tags.iter().enumerate().rev() {
        let typ = tag.info_type(registry);
        match typ {
            ReleaseType::Book | ReleaseType::Game => {
                let narrower = tags[..i].iter().rev().map(|t| t.info_type(registry)).find(|t| {
                    t.is_in(&[ReleaseType::Comic, ReleaseType::Education, ReleaseType::Magazine])
                });
                return Some(narrower.unwrap_or(typ));
            }
            ReleaseType::Series | ReleaseType::Episode => {
                let boxset = r.other.iter().any(|o| o == "BOXSET");
                let episode = r.episode != 0 || (r.series == 0 && !boxset);
                return Some(if episode {
                    ReleaseType::Episode
                } else {
                    ReleaseType::Series
                });
            }
            ReleaseType::Education if r.series == 0 && r.episode == 0 => return Some(typ),
            ReleaseType::Music => {
                let audiobook = tags[..i]
                    .iter()
                    .any(|t| t.info_type(registry) == ReleaseType::Audiobook);
                return Some(if audiobook { ReleaseType::Audiobook } else { typ });
            }
            ReleaseType::Audiobook | ReleaseType::Comic | ReleaseType::Magazine => {
                return Some(typ)
            }
            _ => {}
        }
        let dated = r.series != 0 || r.episode != 0 || r.day != 0 || r.month != 0;
        if tag.info_excl(registry) && r.version.is_empty() && !dated {
            return Some(typ);
        }
    }
    None
}

/// Number of metadata tags wrapped in `-` delimiters on both sides.
fn music_runs(r: &Release) -> usize {
    let tags = r.tags();
    if tags.len() < 3 {
        return 0;
    }
    (1..tags.len() - 1)
        .filter(|&i| {
            tags[i].is(&MUSIC_FIELDS)
                && tags[i - 1].is(&[TagType::Delim])
                && tags[i - 1].delim().ends_with('-')
                && tags[i + 1].is(&[TagType::Delim])
                && tags[i + 1].delim().starts_with('-')
        })
        .count()
}

fn from_fields(registry: &Registry, r: &Release) -> Option<ReleaseType> {
    let seen = |typ: ReleaseType| r.tags().iter().any(|t| t.info_type(registry) == typ);
    let series_tag = r.tags().iter().any(|t| t.is(&[TagType::Series]));

    if r.episode != 0 || (r.year != 0 && r.month != 0 && r.day != 0) {
        Some(ReleaseType::Episode)
    } else if r.series != 0 || series_tag {
        Some(ReleaseType::Series)
    } else if seen(ReleaseType::App) || (!r.version.is_empty() && r.resolution.is_empty()) {
        Some(ReleaseType::App)
    } else if seen(ReleaseType::Movie) || !r.resolution.is_empty() {
        Some(ReleaseType::Movie)
    } else if (r.source.is_empty() || r.source == "WEB") && r.resolution.is_empty() && r.year != 0 {
        Some(ReleaseType::Music)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::collect::collect;
    use crate::lexer::Scanner;

    fn inspected(input: &str) -> ReleaseType {
        let scanner = Scanner::new(Registry::builtin()).unwrap();
        let (tags, pivot) = scanner.scan(input);
        let mut release = Release::new(tags, pivot);
        collect(scanner.registry(), &mut release);
        inspect(scanner.registry(), &mut release, true)
    }

    #[test]
    fn test_inspect_movie() {
        assert_eq!(
            inspected("Movie.2010.1080p.BluRay.x264-GRPNAME"),
            ReleaseType::Movie
        );
    }

    #[test]
    fn test_inspect_episode() {
        assert_eq!(
            inspected("Show.S01E02.720p.HDTV.x264-GRPNAME"),
            ReleaseType::Episode
        );
        assert_eq!(
            inspected("Show.2012.10.23.Guest.Name.HDTV.x264-GRPNAME"),
            ReleaseType::Episode
        );
    }

    #[test]
    fn test_inspect_series() {
        assert_eq!(inspected("Show.S01.720p.HDTV.x264-GRPNAME"), ReleaseType::Series);
    }

    #[test]
    fn test_inspect_music_runs() {
        assert_eq!(
            inspected("Artist-Album-2004-FLAC-GRPNAME"),
            ReleaseType::Music
        );
    }

    #[test]
    fn test_inspect_unknown() {
        assert_eq!(inspected("just some words"), ReleaseType::Unknown);
    }
}
