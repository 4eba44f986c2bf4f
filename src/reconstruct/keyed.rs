//! Identity-indexed views over member-like lists.

use crate::types::{MemberId, MemberIdentity};
use std::collections::HashMap;

/// A list indexed by member id.
///
/// Duplicate ids collapse to one entry: the position is the first
/// occurrence, the record is the last one.
pub(crate) struct KeyedView<'a, T> {
    order: Vec<MemberId>,
    entries: HashMap<MemberId, &'a T>,
}

impl<'a, T: MemberIdentity> KeyedView<'a, T> {
    pub(crate) fn build(items: &'a [T]) -> Self {
        let mut order = Vec::with_capacity(items.len());
        let mut entries = HashMap::with_capacity(items.len());

        for item in items {
            let id = item.member_id();
            if entries.insert(id, item).is_none() {
                order.push(id);
            }
        }

        Self { order, entries }
    }

    pub(crate) fn get(&self, id: MemberId) -> Option<&'a T> {
        self.entries.get(&id).copied()
    }

    pub(crate) fn contains(&self, id: MemberId) -> bool {
        self.entries.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Entries in first-seen order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.entries.get(id).copied())
    }
}

/// Presence diff of two keyed views.
pub(crate) struct SetDiff<'a, T> {
    /// In `to` only, in `to` order.
    pub added: Vec<&'a T>,
    /// In `from` only, in `from` order.
    pub removed: Vec<&'a T>,
    /// In both, as `(from, to)` pairs in `to` order.
    pub retained: Vec<(&'a T, &'a T)>,
}

pub(crate) fn diff_keyed<'a, T: MemberIdentity>(
    from: &KeyedView<'a, T>,
    to: &KeyedView<'a, T>,
) -> SetDiff<'a, T> {
    let mut added = Vec::new();
    let mut retained = Vec::new();

    for after in to.iter() {
        match from.get(after.member_id()) {
            Some(before) => retained.push((before, after)),
            None => added.push(after),
        }
    }

    let removed = from
        .iter()
        .filter(|before| !to.contains(before.member_id()))
        .collect();

    SetDiff {
        added,
        removed,
        retained,
    }
}
