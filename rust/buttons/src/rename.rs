// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collision-free batch renaming.
//!
//! Renaming a batch in place can fail half way when a new name is still held
//! by a later entity of the batch (renaming grids `2, 1` to `1, 2`). The
//! renamer therefore works in two passes: every entity first gets a unique
//! temporary name, then every entity gets its final name. Final names skip
//! anything used outside the batch.
//!
//! The renamer only edits names through [`NameStore`]. Run [`UniqueRenamer::apply`]
//! inside [`Document::with_transaction`] to make the batch all-or-nothing.

use rustc_hash::FxHashSet;

use archforge_model::{Document, ElementId, Result};

/// Name storage the renamer works against.
pub trait NameStore {
    fn name(&self, id: ElementId) -> Result<String>;

    fn set_name(&mut self, id: ElementId, name: &str) -> Result<()>;

    /// Names sharing a namespace with `batch` and held by entities outside it.
    fn names_in_use(&self, batch: &[ElementId]) -> Result<FxHashSet<String>>;
}

impl NameStore for Document {
    fn name(&self, id: ElementId) -> Result<String> {
        Ok(self.get(id)?.name().to_string())
    }

    fn set_name(&mut self, id: ElementId, name: &str) -> Result<()> {
        Document::set_name(self, id, name)
    }

    fn names_in_use(&self, batch: &[ElementId]) -> Result<FxHashSet<String>> {
        let Some(first) = batch.first() else {
            return Ok(FxHashSet::default());
        };
        let category = self.get(*first)?.category();
        let members: FxHashSet<ElementId> = batch.iter().copied().collect();
        Ok(self
            .elements_of(category)
            .filter(|e| !members.contains(&e.id()))
            .map(|e| e.name().to_string())
            .collect())
    }
}

/// Token generator for final names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    /// `1, 2, 3, …`
    Numeric { next: u64 },
    /// `A, B, …, Z, AA, AB, …`; `next` is 1-based.
    Alphabetic { next: u64 },
}

impl Sequence {
    pub fn numeric() -> Self {
        Sequence::Numeric { next: 1 }
    }

    pub fn alphabetic() -> Self {
        Sequence::Alphabetic { next: 1 }
    }
}

impl Iterator for Sequence {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            Sequence::Numeric { next } => {
                let token = next.to_string();
                *next += 1;
                Some(token)
            }
            Sequence::Alphabetic { next } => {
                let token = alphabetic_label(*next);
                *next += 1;
                Some(token)
            }
        }
    }
}

/// Spreadsheet-style column label for a 1-based index.
pub fn alphabetic_label(mut index: u64) -> String {
    let mut label = Vec::new();
    while index > 0 {
        index -= 1;
        label.push(b'A' + (index % 26) as u8);
        index /= 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Letter suffix for the n-th (0-based) item: `A, B, …, Z, AA, …`.
pub fn letter_suffix(n: usize) -> String {
    alphabetic_label(n as u64 + 1)
}

/// Prefix and suffix around a generated token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingScheme {
    pub prefix: String,
    pub suffix: String,
}

impl NamingScheme {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), suffix: suffix.into() }
    }

    pub fn format(&self, token: &str) -> String {
        format!("{}{}{}", self.prefix, token, self.suffix)
    }
}

/// `base` if free, else the first free `base_1`, `base_2`, … .
pub fn unique_name(base: &str, taken: &FxHashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1u64..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// One planned rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    pub id: ElementId,
    pub original: String,
    pub temporary: String,
    pub target: String,
}

/// Renames for a batch, in batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    pub entries: Vec<RenameEntry>,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose final name differs from the original.
    pub fn changed(&self) -> impl Iterator<Item = &RenameEntry> {
        self.entries.iter().filter(|e| e.original != e.target)
    }
}

/// Plans and applies two-pass renames.
#[derive(Debug, Clone)]
pub struct UniqueRenamer {
    temp_marker: String,
}

impl Default for UniqueRenamer {
    fn default() -> Self {
        Self::new("_temp")
    }
}

impl UniqueRenamer {
    pub fn new(temp_marker: impl Into<String>) -> Self {
        Self { temp_marker: temp_marker.into() }
    }

    /// Plans final names for `batch`, in order, drawn from `sequence`.
    ///
    /// Generated names already used outside the batch, or already handed to
    /// an earlier entity of the batch, are skipped.
    pub fn plan<S: NameStore + ?Sized>(
        &self,
        store: &S,
        batch: &[ElementId],
        sequence: Sequence,
        scheme: &NamingScheme,
    ) -> Result<RenamePlan> {
        self.plan_groups(store, &[(batch, sequence)], scheme)
    }

    /// Plans one batch made of several groups, each numbered by its own
    /// sequence. All groups share one namespace: a name given to one group
    /// is never given to another.
    pub fn plan_groups<S: NameStore + ?Sized>(
        &self,
        store: &S,
        groups: &[(&[ElementId], Sequence)],
        scheme: &NamingScheme,
    ) -> Result<RenamePlan> {
        let batch: Vec<ElementId> = groups.iter().flat_map(|(ids, _)| ids.iter().copied()).collect();
        let outside = store.names_in_use(&batch)?;
        let originals = batch.iter().map(|id| store.name(*id)).collect::<Result<Vec<_>>>()?;

        let mut targets = Vec::with_capacity(batch.len());
        let mut assigned = FxHashSet::default();
        for (ids, sequence) in groups {
            let mut sequence = *sequence;
            for id in ids.iter() {
                let target = loop {
                    let token = sequence.next().unwrap_or_default();
                    let candidate = scheme.format(&token);
                    if outside.contains(&candidate) || assigned.contains(&candidate) {
                        tracing::debug!(element = %id, name = %candidate, "Generated name taken, advancing");
                        continue;
                    }
                    break candidate;
                };
                assigned.insert(target.clone());
                targets.push(target);
            }
        }

        // Temporary names avoid every name that exists during either pass.
        let mut taken: FxHashSet<String> = outside;
        taken.extend(originals.iter().cloned());
        taken.extend(targets.iter().cloned());

        let mut entries = Vec::with_capacity(batch.len());
        for ((id, original), target) in batch.into_iter().zip(originals).zip(targets) {
            let temporary = unique_name(&format!("{}{}", original, self.temp_marker), &taken);
            taken.insert(temporary.clone());
            entries.push(RenameEntry { id, original, temporary, target });
        }
        Ok(RenamePlan { entries })
    }

    /// Applies a plan: temporary names first, then final names.
    ///
    /// Stops at the first failing rename, leaving earlier renames in place;
    /// callers roll back through the enclosing transaction.
    pub fn apply<S: NameStore + ?Sized>(&self, store: &mut S, plan: &RenamePlan) -> Result<usize> {
        for entry in &plan.entries {
            store.set_name(entry.id, &entry.temporary)?;
        }
        for entry in &plan.entries {
            store.set_name(entry.id, &entry.target)?;
            tracing::debug!(element = %entry.id, from = %entry.original, to = %entry.target, "Renamed");
        }
        Ok(plan.changed().count())
    }
}
