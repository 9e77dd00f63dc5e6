//! Demotes tags that belong to a different release type than the one
//! inferred.

use std::sync::LazyLock;

use regex::Regex;

use super::collect::recollect;
use crate::model::{Release, ReleaseType, Tag, TagType};
use crate::registry::Registry;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").unwrap_or_else(|e| panic!("invalid digits regex: {}", e)));

/// Types whose exclusive vocabulary is demoted under a foreign release type.
const EXCLUSIVE: [TagType; 19] = [
    TagType::Platform,
    TagType::Arch,
    TagType::Source,
    TagType::Resolution,
    TagType::Collection,
    TagType::Codec,
    TagType::Hdr,
    TagType::Audio,
    TagType::Channels,
    TagType::Other,
    TagType::Cut,
    TagType::Edition,
    TagType::Language,
    TagType::Size,
    TagType::Region,
    TagType::Container,
    TagType::Genre,
    TagType::Group,
    TagType::Ext,
];

pub(super) fn unset(registry: &Registry, release: &mut Release) {
    let typ = release.release_type;
    let media = typ.is_in(&[
        ReleaseType::Movie,
        ReleaseType::Series,
        ReleaseType::Episode,
        ReleaseType::Music,
        ReleaseType::Game,
    ]);

    release.with_tags(|tags, r| {
        let mut grab_source = false;
        for tag in tags.iter_mut() {
            if grab_source && tag.is(&[TagType::Source]) && r.source.is_empty() {
                r.source = tag.normalize(registry);
            }

            let ityp = tag.info_type(registry);
            if ityp != typ && tag.info_excl(registry) && tag.is(&EXCLUSIVE) {
                if is_collected(registry, r, tag) {
                    tag.demote();
                }
            } else if !media
                && tag.is(&[TagType::Source])
                && ityp.is_in(&[ReleaseType::Movie, ReleaseType::Series, ReleaseType::Episode])
            {
                if r.source == tag.normalize(registry) {
                    r.source.clear();
                }
                tag.demote();
                grab_source = true;
            } else if !media && tag.is(&[TagType::Channels]) {
                tag.demote();
                r.channels.clear();
            }
        }

        if typ.is_in(&[ReleaseType::Movie, ReleaseType::Episode, ReleaseType::Series]) {
            version_to_date(registry, tags, r);
        }
    });

    recollect(registry, release);
}

/// Whether the normalized value of `tag` is what its field holds.
fn is_collected(registry: &Registry, r: &Release, tag: &Tag) -> bool {
    let s = tag.normalize(registry);
    let has = |list: &[String]| list.contains(&s);
    match tag.typ() {
        TagType::Platform => r.platform == s && !r.other.iter().any(|o| o == "Strategy.Guide"),
        TagType::Arch => r.arch == s,
        TagType::Source => r.source == s,
        TagType::Resolution => r.resolution == s,
        TagType::Codec => has(&r.codec),
        TagType::Hdr => has(&r.hdr),
        TagType::Audio => has(&r.audio),
        TagType::Channels => r.channels == s,
        TagType::Other => has(&r.other),
        TagType::Cut => has(&r.cut),
        TagType::Edition => has(&r.edition),
        TagType::Language => has(&r.language),
        TagType::Size => r.size == s,
        TagType::Region => r.region == s,
        TagType::Container => r.container == s,
        TagType::Genre => r.genre == s,
        TagType::Group => r.group == s,
        TagType::Ext => r.ext == s,
        _ => false,
    }
}

/// Turns a `v12.10.23` version on a video release into the date it is.
fn version_to_date(registry: &Registry, tags: &mut [Tag], r: &mut Release) {
    let dotted = r
        .version
        .get(1..)
        .is_some_and(|rest| rest.matches('.').count() == 2);
    if !dotted {
        return;
    }
    for tag in tags.iter_mut() {
        if !tag.is(&[TagType::Version]) || tag.normalize(registry) != r.version {
            continue;
        }
        let parts: Vec<&str> = DIGITS.find_iter(&r.version).map(|m| m.as_str()).collect();
        let [y, m, d] = parts[..] else {
            continue;
        };
        let year = if y.len() == 2 {
            format!("20{}", y)
        } else {
            y.to_string()
        };
        let month = format!("{:02}", crate::model::parse_int(m));
        let day = format!("{:02}", crate::model::parse_int(d));
        *tag = Tag::new(
            TagType::Date,
            None,
            [tag.original().to_string(), year, month, day],
        );
        r.version.clear();
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::collect::collect;
    use crate::lexer::Scanner;

    fn unset_as(input: &str, typ: ReleaseType) -> Release {
        let scanner = Scanner::new(Registry::builtin()).unwrap();
        let (tags, pivot) = scanner.scan(input);
        let mut release = Release::new(tags, pivot);
        collect(scanner.registry(), &mut release);
        release.release_type = typ;
        unset(scanner.registry(), &mut release);
        release
    }

    #[test]
    fn test_foreign_exclusive_tag_demoted() {
        let r = unset_as("Movie.2010.1080p.BluRay.x264-GRPNAME", ReleaseType::Music);
        assert_eq!(r.resolution, "1080p");
        let r = unset_as("Artist-Album-2004-WEBFLAC-GRPNAME", ReleaseType::Movie);
        assert!(r.source.is_empty());
    }

    #[test]
    fn test_channels_dropped_outside_video() {
        let r = unset_as("Book.2010.AAC2.0-GRPNAME", ReleaseType::Book);
        assert!(r.channels.is_empty());
        let r = unset_as("Movie.2010.AAC2.0-GRPNAME", ReleaseType::Movie);
        assert_eq!(r.channels, "2.0");
    }

    #[test]
    fn test_dotted_version_becomes_date() {
        let r = unset_as("Show.v12.10.23.720p.HDTV-GRPNAME", ReleaseType::Episode);
        assert!(r.version.is_empty());
        assert_eq!((r.year, r.month, r.day), (2012, 10, 23));
    }
}
