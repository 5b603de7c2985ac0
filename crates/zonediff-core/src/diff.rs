//! Record-set diff engine.
//!
//! Pairs each old record set with the first new record set sharing its
//! identity key, then reports:
//!
//! - **missing**: old record sets with no counterpart in `new`
//! - **mismatched**: (old, new) pairs whose full content differs, unless the
//!   record type is excluded
//!
//! The diff is one-directional. Record sets that exist only in `new` are
//! never reported: the question answered is "did everything in the old zone
//! survive into the new one".

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::{RecordSet, RecordType};

// ── Identity keys ────────────────────────────────────────────────────

/// How old and new record sets are paired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum KeyPolicy {
    /// `(name, type)`. Routing-policy record sets sharing a name and type
    /// all collapse onto the first one.
    NameType,
    /// `(name, type, set identifier)`. The identifier takes part when
    /// present; record sets without one pair exactly as under `NameType`.
    #[default]
    NameTypeSetIdentifier,
}

/// The key a record set is paired by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityKey<'a> {
    pub name: &'a str,
    pub record_type: RecordType,
    pub set_identifier: Option<&'a str>,
}

impl KeyPolicy {
    pub fn key(self, record: &RecordSet) -> IdentityKey<'_> {
        IdentityKey {
            name: &record.name,
            record_type: record.record_type,
            set_identifier: match self {
                Self::NameType => None,
                Self::NameTypeSetIdentifier => record.set_identifier.as_deref(),
            },
        }
    }
}

// ── Exclusions ───────────────────────────────────────────────────────

/// Record types whose content differences are never reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeExclusions(BTreeSet<RecordType>);

impl TypeExclusions {
    /// Exclude nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// `NS` and `SOA`: the apex records every hosted zone gets assigned,
    /// which differ between any two zones.
    pub fn zone_apex_defaults() -> Self {
        [RecordType::Ns, RecordType::Soa].into_iter().collect()
    }

    pub fn contains(&self, record_type: RecordType) -> bool {
        self.0.contains(&record_type)
    }

    pub fn insert(&mut self, record_type: RecordType) {
        self.0.insert(record_type);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordType> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<RecordType> for TypeExclusions {
    fn from_iter<I: IntoIterator<Item = RecordType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── Result ───────────────────────────────────────────────────────────

/// An old record set and the new record set it was paired with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MismatchedPair {
    pub old: RecordSet,
    pub new: RecordSet,
}

/// Output of [`compare`]. Both lists follow the order of the old collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiffResult {
    pub missing: Vec<RecordSet>,
    pub mismatched: Vec<MismatchedPair>,
}

impl DiffResult {
    /// `true` when every old record set survived unchanged.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }
}

// ── Engine ───────────────────────────────────────────────────────────

/// Compare two record collections with the default key policy.
pub fn compare(old: &[RecordSet], new: &[RecordSet], excluded: &TypeExclusions) -> DiffResult {
    compare_with(old, new, excluded, KeyPolicy::default())
}

/// Compare two record collections.
///
/// For each old record set, in order, the first new record set with the same
/// identity key is its counterpart. No counterpart: missing. Counterpart of
/// an excluded type: matched, nothing else checked. Otherwise the pair is
/// mismatched unless every field is equal.
///
/// Never fails; an empty `new` reports every old record set as missing.
pub fn compare_with(
    old: &[RecordSet],
    new: &[RecordSet],
    excluded: &TypeExclusions,
    policy: KeyPolicy,
) -> DiffResult {
    // First occurrence wins, same as a front-to-back scan of `new`.
    let mut index: HashMap<IdentityKey<'_>, &RecordSet> = HashMap::with_capacity(new.len());
    for record in new {
        if let Entry::Vacant(slot) = index.entry(policy.key(record)) {
            slot.insert(record);
        }
    }

    let mut diff = DiffResult::default();
    for record in old {
        match index.get(&policy.key(record)) {
            None => diff.missing.push(record.clone()),
            Some(counterpart)
                if excluded.contains(record.record_type) || *counterpart == record => {}
            Some(counterpart) => diff.mismatched.push(MismatchedPair {
                old: record.clone(),
                new: (*counterpart).clone(),
            }),
        }
    }
    diff
}
