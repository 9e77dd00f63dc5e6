//! Calendar dates in the common release name layouts.

use chrono::NaiveDate;
use phf::phf_map;
use regex::{Captures, Regex};

use super::{compile_all, LexState, Lexer};
use crate::error::Result;
use crate::model::{Tag, TagType};
use crate::registry::Registry;

static MONTHS: phf::Map<&'static str, u32> = phf_map! {
    "jan" => 1, "january" => 1,
    "feb" => 2, "february" => 2,
    "mar" => 3, "march" => 3,
    "apr" => 4, "april" => 4,
    "may" => 5,
    "jun" => 6, "june" => 6,
    "jul" => 7, "july" => 7,
    "aug" => 8, "august" => 8,
    "sep" => 9, "sept" => 9, "september" => 9,
    "oct" => 10, "october" => 10,
    "nov" => 11, "november" => 11,
    "dec" => 12, "december" => 12,
};

/// Month number of an English month name or abbreviation.
pub(crate) fn month_number(s: &str) -> Option<u32> {
    MONTHS.get(s.to_lowercase().as_str()).copied()
}

const YEAR: &str = r"(?P<year>(?:19|20)\d{2})";
const SEP: &str = r"[\-\_\. ]";
const MON: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sept?|Oct|Nov|Dec";
const MONTH_NAME: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

fn patterns() -> Vec<String> {
    vec![
        format!(r"^{YEAR}(?:{SEP}(?P<month>\d{{2}}){SEP}(?P<day>\d{{2}}))?\b"),
        format!(r"^{YEAR}{SEP}(?P<month>\d{{2}})\b"),
        format!(r"^(?P<month>\d{{2}}){SEP}(?P<day>\d{{2}}){SEP}{YEAR}\b"),
        format!(r"^(?P<day>\d{{2}}){SEP}(?P<month>\d{{2}}){SEP}{YEAR}\b"),
        format!(r"^(?:(?P<dday>\d{{1,2}})(?:th|st|nd|rd)?{SEP})?(?P<mon>{MON}){SEP}{YEAR}\b"),
        format!(r"^(?P<dday>\d{{1,2}}){SEP}(?P<month_name>{MONTH_NAME}){SEP}{YEAR}\b"),
        format!(r"^(?P<mon>{MON}){SEP}(?P<dday>\d{{1,2}}){SEP}{YEAR}\b"),
        format!(r"^(?P<yy>[12]\d){SEP}(?P<month>\d\d?){SEP}(?P<day>\d\d?)\b"),
    ]
}

#[derive(Debug)]
pub(crate) struct DateLexer {
    patterns: Vec<Regex>,
}

impl DateLexer {
    pub fn new() -> Result<Self> {
        let patterns = patterns();
        let refs: Vec<&str> = patterns.iter().map(String::as_str).collect();
        Ok(Self {
            patterns: compile_all("date", &refs)?,
        })
    }
}

/// `(year, month, day)` strings of a match, or `None` if a component is
/// malformed or the date does not exist.
fn components(caps: &Captures<'_>) -> Option<(String, String, String)> {
    let get = |name: &str| caps.name(name).map(|m| m.as_str()).filter(|s| !s.is_empty());

    let mut year = get("year").unwrap_or_default().to_string();
    let mut month = String::new();
    let mut day = String::new();

    if let Some(yy) = get("yy") {
        if yy.len() != 2 {
            return None;
        }
        year = format!("20{}", yy);
    }
    if let Some(m) = get("month") {
        if m.len() != 2 {
            return None;
        }
        month = m.to_string();
    }
    if let Some(d) = get("day") {
        if d.len() != 2 {
            return None;
        }
        day = d.to_string();
    }
    if let Some(d) = get("dday") {
        day = format!("{:0>2}", d);
    }
    if let Some(m) = get("mon") {
        month = format!("{:02}", month_number(m)?);
    }
    if let Some(m) = get("month_name") {
        if m.len() <= 3 {
            return None;
        }
        month = format!("{:02}", month_number(m)?);
    }

    let y: i32 = year.parse().ok()?;
    let m: u32 = if month.is_empty() { 1 } else { month.parse().ok()? };
    let d: u32 = if day.is_empty() { 1 } else { day.parse().ok()? };
    NaiveDate::from_ymd_opt(y, m, d)?;
    Some((year, month, day))
}

impl Lexer for DateLexer {
    fn name(&self) -> &'static str {
        "date"
    }

    fn lex(&self, _: &Registry, st: &mut LexState<'_>) -> bool {
        for re in &self.patterns {
            let Some(caps) = re.captures(st.rest_buf()) else {
                continue;
            };
            let Some((year, month, day)) = components(&caps) else {
                continue;
            };
            let len = caps[0].len();
            let tag = Tag::new(
                TagType::Date,
                None,
                [st.slice(0, len), &year, &month, &day],
            );
            st.emit(len, [tag]);
            return true;
        }
        false
    }
}
