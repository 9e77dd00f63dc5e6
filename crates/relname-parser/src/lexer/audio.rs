//! Audio formats, optionally followed by a channel layout (`DTS-HD.MA.5.1`).

use regex::Regex;

use super::{alternation, compile, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

#[derive(Debug)]
pub(crate) struct AudioLexer {
    re: Regex,
}

impl AudioLexer {
    pub fn new(registry: &Registry) -> Result<Self> {
        let channels = registry
            .infos(TagType::Channels)
            .iter()
            .map(|info| regex::escape(info.tag()).replace(r"\.", r"[\._ ]?"))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"(?i)^({})(?:[\-\_\. ]?(?P<ch>{}))?(?:\b|[\-\_\. ])",
            alternation(registry, TagType::Audio),
            channels
        );
        Ok(Self {
            re: compile("audio", &pattern)?,
        })
    }
}

impl Lexer for AudioLexer {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        let Some(caps) = self.re.captures(st.rest()) else {
            return false;
        };
        let full = caps[0].len();
        if full == 0 || caps[1].is_empty() {
            return false;
        }
        let audio = Some(TagType::Audio);
        match caps.name("ch").filter(|m| !m.is_empty()) {
            Some(ch) => {
                let tags = [
                    Tag::new(TagType::Audio, audio, [st.slice(0, ch.start()), &caps[1]]),
                    Tag::new(
                        TagType::Channels,
                        Some(TagType::Channels),
                        [st.slice(ch.start(), full), ch.as_str()],
                    ),
                ];
                st.emit(full, tags);
            }
            None => {
                let tag = Tag::new(TagType::Audio, audio, [st.slice(0, full), &caps[1]]);
                st.emit(full, [tag]);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::tests::scan;
    use crate::model::{Tag, TagType};

    fn of(tags: &[Tag], typ: TagType) -> Vec<Tag> {
        tags.iter().filter(|t| t.typ() == typ).cloned().collect()
    }

    #[test]
    fn test_audio_with_channels() {
        let (tags, _) = scan("Movie.2010.1080p.BluRay.DTS-HD.MA.5.1.x264-GRPNAME");
        let audio = of(&tags, TagType::Audio);
        assert_eq!(audio[0].value(), "DTS-HD.MA");
        let channels = of(&tags, TagType::Channels);
        assert_eq!(channels[0].value(), "5.1");
    }

    #[test]
    fn test_audio_alone() {
        let (tags, _) = scan("Artist-Album-2004-FLAC-GRPNAME");
        let audio = of(&tags, TagType::Audio);
        assert_eq!(audio[0].value(), "FLAC");
        assert!(of(&tags, TagType::Channels).is_empty());
    }

    #[test]
    fn test_audio_channels_lossless() {
        let input = "Movie.2010.AAC2.0.x264";
        let (tags, _) = scan(input);
        let joined: String = tags.iter().map(Tag::original).collect();
        assert_eq!(joined, input);
        assert_eq!(of(&tags, TagType::Channels)[0].value(), "2.0");
    }
}
