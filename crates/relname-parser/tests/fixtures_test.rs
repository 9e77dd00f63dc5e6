//! Fixture-driven checks over the built-in vocabulary.
//!
//! Each case in `tests/fixtures/releases.json` names an input and the
//! summary fields it must produce. Fields not listed are not checked.

use std::collections::BTreeMap;
use std::fs;

use relname_parser::{parse, Parser, ParserConfig, ReleaseType, Tag, TagType};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TestCase {
    input: String,
    expected: BTreeMap<String, String>,
}

fn load(path: &str) -> Vec<TestCase> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {}", path, e));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("parse {}: {}", path, e))
}

#[test]
fn test_release_fixtures() {
    let cases = load(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/releases.json"));
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in &cases {
        let fields: BTreeMap<_, _> = parse(&case.input).summary().fields().into_iter().collect();
        for (key, want) in &case.expected {
            let got = fields.get(key.as_str()).map(String::as_str).unwrap_or("");
            if got != want {
                failures.push(format!("{}: {}: expected {:?}, got {:?}", case.input, key, want, got));
            }
        }
    }

    assert!(failures.is_empty(), "fixture failures:\n{}", failures.join("\n"));
}

#[test]
fn test_round_trip_preserves_input() {
    let inputs = [
        "The.Matrix.1999.1080p.BluRay.x264-GRPNAME",
        "Show.S01E01-E03.720p.HDTV.x264-GRPNAME",
        "Artist-Album-(WEB)-2004-FLAC-GRPNAME",
        "  leading and trailing  ",
        "[Group] Anime Title - 01 [1080p][ABCD1234].mkv",
        "Movie (2010) [1080p] {imdb-tt0000000}",
        "Wait...What.2012.DVDRip.XviD-GRPNAME",
        "Mag.June.2015.PDF-GRPNAME",
        "Some_App_v1.2.3_Incl_Keygen-GRPNAME",
        "_-.--__",
        "Ünïcödé.Tïtlé.2020.WEB-DL.1080p",
    ];
    let parser = Parser::default();
    for input in inputs {
        assert_eq!(parser.parse(input).to_string(), input);
        let (tags, _) = parser.tokenize(input);
        assert_eq!(tags.iter().map(Tag::original).collect::<String>(), input);
    }
}

#[test]
fn test_series_episode_range() {
    let release = parse("Show.S01E01-E03.720p.HDTV.x264-GRPNAME");
    assert_eq!(release.series_episodes(), vec![(1, 1), (1, 2), (1, 3)]);
    assert_eq!(release.summary().series_episodes, "S01E01 S01E02 S01E03");
}

#[test]
fn test_single_episode_has_no_pairs_in_summary() {
    let release = parse("Show.S01E02.720p.HDTV.x264-GRPNAME");
    assert_eq!(release.series_episodes(), vec![(1, 2)]);
    assert!(release.summary().series_episodes.is_empty());
}

#[test]
fn test_type_only_config() {
    let parser = Parser::new(ParserConfig::builder().type_only(true).build());
    let release = parser.parse("Artist-Album-2004-FLAC-GRPNAME");
    assert_eq!(release.release_type, ReleaseType::Music);
    assert!(release.artist.is_empty());
    assert!(release.title.is_empty());
}

#[test]
fn test_summary_fields_skip_empty() {
    let fields = parse("The.Matrix.1999.1080p.BluRay.x264-GRPNAME").summary().fields();
    assert_eq!(fields.first(), Some(&("type", "movie".to_string())));
    assert!(fields.iter().all(|(_, v)| !v.is_empty()));
    assert!(!fields.iter().any(|(k, _)| *k == "month"));
}

#[test]
fn test_music_with_bracketed_audio() {
    let release = parse("Artist - Album (2005) [FLAC]");
    assert_eq!(release.release_type, ReleaseType::Music);
    assert_eq!(release.artist, "Artist");
    assert_eq!(release.title, "Album");
    assert_eq!(release.year, 2005);
    assert!(release.audio.iter().any(|a| a == "FLAC"));
}

#[test]
fn test_names_without_title_text() {
    for input in ["S01E02", "S01E02.720p", "   ", "⭐⭐", "1080p.x264", "FLAC", "...", "()", "é"] {
        let release = parse(input);
        assert_eq!(release.to_string(), input);
    }
    assert_eq!(parse("S01E02").release_type, ReleaseType::Episode);
}

/// No release keeps a field value whose vocabulary entry is exclusive to
/// another release type.
#[test]
fn test_foreign_exclusive_values_not_collected() {
    let parser = Parser::default();
    let registry = parser.registry();
    let inputs = [
        "Show.Name.S01.PS4.720p.HDTV.x264.BOXSET-GRPNAME",
        "Artist-Album-2004-WEBFLAC-GRPNAME",
        "The.Matrix.1999.1080p.BluRay.x264-GRPNAME",
        "Some.Mag.June.2015.MAGAZiNE.PDF-GRPNAME",
        "Game.Name.PS4-GRPNAME",
    ];
    for input in inputs {
        let release = parser.parse(input);
        if release.release_type == ReleaseType::Unknown {
            continue;
        }
        for tag in release.tags() {
            let foreign = tag.info_excl(registry) && tag.info_type(registry) != release.release_type;
            if !foreign || tag.is(&[TagType::Text]) {
                continue;
            }
            let value = tag.normalize(registry);
            let collected = match tag.typ() {
                TagType::Platform => release.platform == value,
                TagType::Source => release.source == value,
                TagType::Audio => release.audio.contains(&value),
                TagType::Other => release.other.contains(&value),
                _ => false,
            };
            assert!(!collected, "{}: {} kept as {}", input, tag, tag.typ());
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_summary_serializes() {
    let summary = parse("Show.S01E02.720p.HDTV.x264-GRPNAME").summary();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["type"], "episode");
    assert_eq!(json["title"], "Show");
    assert_eq!(json["series"], 1);
    assert_eq!(json["episode"], 2);
}
