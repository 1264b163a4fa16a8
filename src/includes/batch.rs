//! A contiguous run of include directives, keyed case-insensitively.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::directive::IncludeDirective;

/// Outcome of adding a directive to a batch
#[derive(Debug, PartialEq, Eq)]
pub enum Admission {
    /// First occurrence of the key; the directive was stored
    Inserted,
    /// Key already present with the exact same rendered form; nothing stored
    ConsistentDuplicate,
    /// Key already present with a different rendered form; nothing stored
    InconsistentDuplicate,
}

/// Directives of one batch, at most one per lower-cased target
#[derive(Debug, Default)]
pub struct IncludeBatch {
    includes: BTreeMap<String, IncludeDirective>,
}

impl IncludeBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `directive` unless its key is already taken
    pub fn admit(&mut self, directive: IncludeDirective) -> Admission {
        match self.includes.entry(directive.key()) {
            Entry::Vacant(slot) => {
                slot.insert(directive);
                Admission::Inserted
            }
            Entry::Occupied(stored) => {
                if stored.get().to_string() == directive.to_string() {
                    Admission::ConsistentDuplicate
                } else {
                    Admission::InconsistentDuplicate
                }
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.includes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }

    /// Stored directives in ascending key order
    pub fn into_sorted(self) -> impl Iterator<Item = IncludeDirective> {
        self.includes.into_values()
    }
}
