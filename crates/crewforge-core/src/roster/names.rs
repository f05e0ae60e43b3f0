//! Name resolution for references written on buddy forms and crew lists.
//!
//! References are matched by id first, then by full name, then (for friend
//! choices only) by the short forms `Last` and `Last, F`. Names compare
//! case-insensitively with whitespace collapsed. A short form that would
//! match more than one person is ambiguous and never resolves.

use std::collections::HashMap;

use crate::index::PersonIndex;

/// Collapses whitespace and lowercases a name for comparison.
pub(crate) fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Default)]
pub(crate) struct NameResolver {
    by_id: HashMap<String, PersonIndex>,
    by_name: HashMap<String, PersonIndex>,
    // `None` marks a key shared by several people.
    by_short: HashMap<String, Option<PersonIndex>>,
}

impl NameResolver {
    pub(crate) fn insert(&mut self, id: &str, name: &str, index: PersonIndex) {
        self.by_id.insert(id.to_string(), index);

        let full = normalize(name);
        self.by_name.entry(full.clone()).or_insert(index);

        let words: Vec<&str> = full.split(' ').collect();
        if words.len() < 2 {
            return;
        }
        let last = words[words.len() - 1];
        let initial: String = words[0].chars().take(1).collect();
        for key in [last.to_string(), format!("{last}, {initial}")] {
            self.by_short
                .entry(key)
                .and_modify(|slot| {
                    if *slot != Some(index) {
                        *slot = None;
                    }
                })
                .or_insert(Some(index));
        }
    }

    /// Resolves a reference by id or full name.
    pub(crate) fn resolve(&self, reference: &str) -> Option<PersonIndex> {
        let reference = reference.trim();
        if let Some(&index) = self.by_id.get(reference) {
            return Some(index);
        }
        self.by_name.get(&normalize(reference)).copied()
    }

    /// Resolves a friend choice, additionally accepting unambiguous short
    /// forms.
    pub(crate) fn resolve_loose(&self, reference: &str) -> Option<PersonIndex> {
        self.resolve(reference)
            .or_else(|| self.by_short.get(&normalize(reference)).copied().flatten())
    }
}
