// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pseudonym allocation with sticky per-user assignments.
//!
//! A user's first allocation picks a random unclaimed catalog entry and pins
//! it to that user for the life of the process. Later allocations for the
//! same user return the pinned entry, so leaving and rejoining keeps the
//! same identity. A pinned base name is never handed to anyone else until an
//! admin removes the assignment.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::catalog::{Catalog, CatalogEntry};
use crate::id::UserId;

/// Owns the catalog, the sticky assignments, and the in-use set.
pub struct NameAllocator {
    catalog: Catalog,
    assignments: HashMap<UserId, CatalogEntry>,
    in_use: HashSet<String>,
    rng: StdRng,
}

impl NameAllocator {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    /// Construct with an explicit random source (seeded in tests).
    pub fn with_rng(catalog: Catalog, rng: StdRng) -> Self {
        Self { catalog, assignments: HashMap::new(), in_use: HashSet::new(), rng }
    }

    /// Hand out a display name for `user`.
    ///
    /// Returns the user's sticky name if they have one, ignoring `active`.
    /// Otherwise picks uniformly among entries that are neither active nor
    /// claimed by any sticky assignment. `None` means the catalog is
    /// exhausted.
    pub fn allocate(&mut self, user: UserId, active: &HashSet<String>) -> Option<String> {
        if let Some(entry) = self.assignments.get(&user) {
            return Some(entry.display());
        }

        let claimed: HashSet<&str> = self.assignments.values().map(|e| e.name.as_str()).collect();
        let candidates: Vec<&CatalogEntry> = self
            .catalog
            .entries()
            .iter()
            .filter(|e| !claimed.contains(e.name.as_str()) && !active.contains(&e.display()))
            .collect();

        let chosen = (*candidates.choose(&mut self.rng)?).clone();
        let display = chosen.display();

        self.in_use = active.clone();
        self.in_use.insert(display.clone());
        self.assignments.insert(user, chosen);
        Some(display)
    }

    /// Return a display name to the free pool. The sticky assignment stays.
    pub fn release(&mut self, display_name: &str, user: UserId) {
        if self.in_use.remove(display_name) {
            tracing::debug!(%user, "released display name");
        }
    }

    pub fn available_count(&self) -> usize {
        self.catalog.len().saturating_sub(self.in_use.len())
    }

    pub fn total_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn in_use_count(&self) -> usize {
        self.in_use.len()
    }

    pub fn is_valid_name(&self, name: &str) -> bool {
        self.catalog.contains(name)
    }

    pub fn assignment(&self, user: UserId) -> Option<&CatalogEntry> {
        self.assignments.get(&user)
    }

    /// Drop the sticky assignment for `user`, freeing its base name.
    pub fn remove_permanent_assignment(&mut self, user: UserId) -> bool {
        self.assignments.remove(&user).is_some()
    }
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
