//! Per-category precedence ordering.
//!
//! Lookup is first-match-wins, so the order of each category's entries
//! decides which entry claims an ambiguous value. Every ordering here is
//! derived from a sort key, which keeps it a total order.

use std::cmp::Reverse;

use super::info::TagInfo;
use crate::model::TagType;

/// Sorts `infos` in place using the ordering for `category`.
pub(crate) fn sort_infos(category: TagType, infos: &mut [TagInfo]) {
    match category {
        TagType::Ext => {
            // Count how many longer entries end with each tag; suffixes sort
            // after every entry that contains them.
            let lowered: Vec<String> = infos.iter().map(|i| i.tag().to_lowercase()).collect();
            infos.sort_by_cached_key(|i| {
                let tag = i.tag().to_lowercase();
                let count = lowered
                    .iter()
                    .filter(|other| other.len() > tag.len() && other.ends_with(tag.as_str()))
                    .count();
                (count, locale_key(i.tag()))
            });
        }
        TagType::Resolution | TagType::Channels => {
            infos.sort_by_cached_key(|i| {
                let num = if i.is_template() { 0 } else { leading_number(i.tag()) };
                (i.is_template(), Reverse(num), locale_key(i.tag()))
            });
        }
        TagType::Platform | TagType::Codec | TagType::Hdr => {
            infos.sort_by_cached_key(|i| (Reverse(char_len(i.tag())), locale_key(i.tag())));
        }
        _ => {
            infos.sort_by_cached_key(|i| {
                let len = if i.is_template() { 0 } else { char_len(i.tag()) };
                (i.is_template(), Reverse(len), locale_key(i.tag()))
            });
        }
    }
}

/// Case-insensitive ordering, with lowercase before uppercase on ties.
fn locale_key(s: &str) -> (String, Reverse<String>) {
    (s.to_lowercase(), Reverse(s.to_string()))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// First run of ASCII digits in `s`, or 0.
fn leading_number(s: &str) -> u64 {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
