//! Tag registry: the typed vocabulary the lexers and builder consult.
//!
//! A [`Registry`] holds every [`TagInfo`] grouped by category and sorted
//! for first-match-wins lookup. It is immutable once built and can be
//! shared freely between threads.
//!
//! ```
//! use relname_parser::registry::Registry;
//! use relname_parser::TagType;
//!
//! let registry = Registry::builtin();
//! let info = registry.find(TagType::Source, "bluray").unwrap();
//! assert_eq!(info.tag(), "BluRay");
//! ```

mod info;
mod sort;
mod table;

pub use info::TagInfo;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use crate::error::Result;
use crate::model::{ReleaseType, TagType};

/// Vocabulary table shipped with the crate.
pub const BUILTIN_TABLE: &str = include_str!("../../data/taginfo.csv");

/// Group names containing delimiters, which the tail group heuristic would
/// otherwise split.
const BUILTIN_GROUPS: [(&str, ReleaseType); 4] = [
    ("CODEX", ReleaseType::Game),
    ("DARKSiDERS", ReleaseType::Game),
    ("D-Z0N3", ReleaseType::Movie),
    ("MrSeeN-SiMPLE", ReleaseType::Unknown),
];

static BUILTIN: LazyLock<Arc<Registry>> = LazyLock::new(|| {
    let registry = Registry::from_csv(BUILTIN_TABLE)
        .unwrap_or_else(|e| panic!("built-in vocabulary table is invalid: {}", e));
    Arc::new(registry)
});

/// Sorted vocabulary entries per category.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    infos: HashMap<TagType, Vec<TagInfo>>,
    short: HashSet<String>,
}

impl Registry {
    /// The process-wide registry built from [`BUILTIN_TABLE`].
    pub fn builtin() -> Arc<Registry> {
        Arc::clone(&BUILTIN)
    }

    /// Builds a registry from vocabulary table text.
    ///
    /// The built-in delimiter-containing group names are appended to the
    /// `group` category unless the table already defines them.
    pub fn from_csv(data: &str) -> Result<Self> {
        let mut infos = table::load(data)?;
        let groups = infos.entry(TagType::Group).or_default();
        for (tag, typ) in BUILTIN_GROUPS {
            if groups.iter().any(|g| g.tag() == tag) {
                continue;
            }
            // Literal tags always compile.
            if let Ok(info) = TagInfo::new(tag, tag, "", "", typ, false) {
                groups.push(info);
            }
        }
        let registry = Self::from_infos(infos);
        tracing::debug!(
            categories = registry.infos.len(),
            entries = registry.len(),
            short = registry.short.len(),
            "loaded vocabulary"
        );
        Ok(registry)
    }

    /// Builds a registry from already constructed entries, sorting each
    /// category for lookup.
    pub fn from_infos(mut infos: HashMap<TagType, Vec<TagInfo>>) -> Self {
        for (category, list) in infos.iter_mut() {
            sort::sort_infos(*category, list);
        }
        let short = short_tokens(&infos);
        Self { infos, short }
    }

    /// Entries of `category`, in lookup order.
    pub fn infos(&self, category: TagType) -> &[TagInfo] {
        self.infos.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First entry of `category` whose matcher accepts all of `s`.
    pub fn find(&self, category: TagType, s: &str) -> Option<&TagInfo> {
        self.infos(category).iter().find(|info| info.is_match(s))
    }

    /// Whether `s` (compared uppercased) is a short vocabulary fragment.
    ///
    /// Short fragments are the 1 to 4 character pieces of every tag outside
    /// the hdr and language categories; text equal to one is too ambiguous
    /// to be claimed as a group or bracketed site name.
    pub fn is_short(&self, s: &str) -> bool {
        self.short.contains(&s.to_uppercase())
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.infos.values().map(Vec::len).sum()
    }

    /// Returns true if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Categories with at least one entry.
    pub fn categories(&self) -> impl Iterator<Item = TagType> + '_ {
        self.infos.keys().copied()
    }
}

fn short_tokens(infos: &HashMap<TagType, Vec<TagInfo>>) -> HashSet<String> {
    infos
        .iter()
        .filter(|(category, _)| !matches!(category, TagType::Hdr | TagType::Language))
        .flat_map(|(_, list)| list.iter())
        .flat_map(|info| info.tag().split(crate::lexer::is_delim))
        .filter(|field| {
            let len = field.chars().count();
            (1..5).contains(&len) && !field.contains('$')
        })
        .map(str::to_uppercase)
        .collect()
}
