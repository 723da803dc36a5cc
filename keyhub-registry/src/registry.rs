//! Registry state: per-owner ordered shortcut collections.
//!
//! Pure state container with no locking, logging, or notification; the
//! manager wraps it and layers those on. Owner entries and the registrations
//! inside them are kept in insertion order because that order is observable:
//! it decides which callbacks run first when several registrations match one
//! event.

use keyhub_combo::KeyCombo;

use crate::registration::{ShortcutRegistration, ShortcutSnapshot};

/// One owner's ordered shortcut list.
#[derive(Debug)]
struct OwnerEntry {
    owner_id: String,
    shortcuts: Vec<ShortcutRegistration>,
}

/// All registered shortcuts, grouped by owner in first-registration order.
///
/// An owner entry exists iff it has at least one registration; removal paths
/// drop entries that become empty.
#[derive(Debug, Default)]
pub(crate) struct RegistryState {
    owners: Vec<OwnerEntry>,
}

impl RegistryState {
    /// Append a registration to its owner's list, creating the owner entry
    /// on first registration.
    pub(crate) fn insert(&mut self, registration: ShortcutRegistration) {
        match self.entry_mut(&registration.owner_id) {
            Some(entry) => entry.shortcuts.push(registration),
            None => self.owners.push(OwnerEntry {
                owner_id: registration.owner_id.clone(),
                shortcuts: vec![registration],
            }),
        }
    }

    /// Remove every registration of `owner_id` whose combination equals any
    /// of `combos`; drops the owner entry if its list empties.
    ///
    /// Returns the number of removed registrations.
    pub(crate) fn remove_matching(&mut self, owner_id: &str, combos: &[KeyCombo]) -> usize {
        let Some(index) = self.owner_index(owner_id) else {
            return 0;
        };
        let entry = &mut self.owners[index];
        let before = entry.shortcuts.len();
        entry
            .shortcuts
            .retain(|reg| !combos.iter().any(|combo| reg.keys.canonical_eq(combo)));
        let removed = before - entry.shortcuts.len();
        if entry.shortcuts.is_empty() {
            self.owners.remove(index);
        }
        removed
    }

    /// Flip `enabled` in place on every registration of `owner_id` whose
    /// combination equals any of `combos`. Order is untouched.
    ///
    /// Returns the number of affected registrations.
    pub(crate) fn set_enabled(&mut self, owner_id: &str, combos: &[KeyCombo], enabled: bool) -> usize {
        let Some(entry) = self.entry_mut(owner_id) else {
            return 0;
        };
        let mut changed = 0;
        for reg in &mut entry.shortcuts {
            if combos.iter().any(|combo| reg.keys.canonical_eq(combo)) {
                reg.enabled = enabled;
                changed += 1;
            }
        }
        changed
    }

    /// Delete an owner's entire list. Returns the number of removed
    /// registrations (0 for unknown owners).
    pub(crate) fn clear_owner(&mut self, owner_id: &str) -> usize {
        match self.owner_index(owner_id) {
            Some(index) => self.owners.remove(index).shortcuts.len(),
            None => 0,
        }
    }

    /// Delete everything.
    pub(crate) fn clear_all(&mut self) {
        self.owners.clear();
    }

    pub(crate) fn has_owner(&self, owner_id: &str) -> bool {
        self.owner_index(owner_id).is_some()
    }

    pub(crate) fn owner_ids(&self) -> Vec<String> {
        self.owners.iter().map(|e| e.owner_id.clone()).collect()
    }

    /// Total registrations across all owners.
    pub(crate) fn len(&self) -> usize {
        self.owners.iter().map(|e| e.shortcuts.len()).sum()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Snapshots for one owner, in registration order.
    pub(crate) fn snapshot_owner(&self, owner_id: &str) -> Vec<ShortcutSnapshot> {
        self.owners
            .iter()
            .find(|e| e.owner_id == owner_id)
            .map(|e| e.shortcuts.iter().map(ShortcutRegistration::snapshot).collect())
            .unwrap_or_default()
    }

    /// Snapshots for every owner, owners in first-registration order.
    pub(crate) fn snapshot_all(&self) -> Vec<(String, Vec<ShortcutSnapshot>)> {
        self.owners
            .iter()
            .map(|e| {
                (
                    e.owner_id.clone(),
                    e.shortcuts.iter().map(ShortcutRegistration::snapshot).collect(),
                )
            })
            .collect()
    }

    /// Clone of every enabled registration, flattened in dispatch order:
    /// owners in first-registration order, registrations in insertion order.
    ///
    /// Dispatch iterates this copy so callbacks can freely mutate the
    /// registry mid-pass.
    pub(crate) fn dispatch_snapshot(&self) -> Vec<ShortcutRegistration> {
        self.owners
            .iter()
            .flat_map(|e| e.shortcuts.iter().filter(|reg| reg.enabled).cloned())
            .collect()
    }

    fn entry_mut(&mut self, owner_id: &str) -> Option<&mut OwnerEntry> {
        self.owners.iter_mut().find(|e| e.owner_id == owner_id)
    }

    fn owner_index(&self, owner_id: &str) -> Option<usize> {
        self.owners.iter().position(|e| e.owner_id == owner_id)
    }
}
