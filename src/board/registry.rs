//! The territory registry.
//!
//! Owns every territory of a session in a fixed number of slots addressed
//! by 1-based index. Slots start empty and are filled during setup; the
//! slot count never changes after creation.

use super::territory::{
    parse_troops, Faction, Field, FieldIssue, LabelPolicy, Territory, TerritoryName,
};

/// Errors raised by registry construction, lookup, and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("territory count must be positive, got {0}")]
    InvalidSize(i64),

    #[error("cannot allocate {0} territory slots")]
    TooManyTerritories(i64),

    #[error("invalid {field}: {issue}")]
    InvalidField { field: Field, issue: FieldIssue },

    #[error("territory {index} is out of range (valid: 1..={len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("territory {0} has not been registered yet")]
    EmptySlot(usize),

    #[error("territory {0} cannot be borrowed twice")]
    AliasedSlots(usize),
}

/// Fixed-size, 1-indexed collection of territory slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    slots: Vec<Option<Territory>>,
    policy: LabelPolicy,
}

impl Registry {
    /// Allocates `n` empty slots using the default label policy.
    pub fn create(n: i64) -> Result<Self, RegistryError> {
        Self::with_policy(n, LabelPolicy::default())
    }

    /// Allocates `n` empty slots using the given label policy.
    ///
    /// A count the allocator cannot satisfy is reported as
    /// `TooManyTerritories` instead of aborting.
    pub fn with_policy(n: i64, policy: LabelPolicy) -> Result<Self, RegistryError> {
        if n <= 0 {
            return Err(RegistryError::InvalidSize(n));
        }
        let len = usize::try_from(n).map_err(|_| RegistryError::TooManyTerritories(n))?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(len)
            .map_err(|_| RegistryError::TooManyTerritories(n))?;
        slots.resize(len, None);
        Ok(Registry { slots, policy })
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a registry has at least one slot.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn policy(&self) -> LabelPolicy {
        self.policy
    }

    /// Converts a 1-based index into a slot offset.
    fn offset(&self, index: usize) -> Result<usize, RegistryError> {
        if index == 0 || index > self.slots.len() {
            return Err(RegistryError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        Ok(index - 1)
    }

    /// Validates and stores a territory at `index`.
    ///
    /// All fields are validated before the slot is touched, so a failed
    /// call leaves the registry exactly as it was.
    pub fn set(
        &mut self,
        index: usize,
        name: &str,
        faction: &str,
        troops: i64,
    ) -> Result<&Territory, RegistryError> {
        let offset = self.offset(index)?;
        let name = TerritoryName::parse(name, self.policy).map_err(|issue| {
            RegistryError::InvalidField {
                field: Field::Name,
                issue,
            }
        })?;
        let faction = Faction::parse(faction, self.policy).map_err(|issue| {
            RegistryError::InvalidField {
                field: Field::Faction,
                issue,
            }
        })?;
        let troops = parse_troops(troops).map_err(|issue| RegistryError::InvalidField {
            field: Field::Troops,
            issue,
        })?;

        let stored = self.slots[offset].insert(Territory::new(name, faction, troops));
        Ok(&*stored)
    }

    /// Returns a read-only view of the territory at `index`.
    pub fn get(&self, index: usize) -> Result<&Territory, RegistryError> {
        let offset = self.offset(index)?;
        self.slots[offset]
            .as_ref()
            .ok_or(RegistryError::EmptySlot(index))
    }

    /// Returns a mutable handle to the territory at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Territory, RegistryError> {
        let offset = self.offset(index)?;
        self.slots[offset]
            .as_mut()
            .ok_or(RegistryError::EmptySlot(index))
    }

    /// Returns mutable handles to two distinct territories.
    pub fn get_pair_mut(
        &mut self,
        a: usize,
        b: usize,
    ) -> Result<(&mut Territory, &mut Territory), RegistryError> {
        let oa = self.offset(a)?;
        let ob = self.offset(b)?;
        if oa == ob {
            return Err(RegistryError::AliasedSlots(a));
        }

        let (lo, hi) = (oa.min(ob), oa.max(ob));
        let (head, tail) = self.slots.split_at_mut(hi);
        let first = head[lo].as_mut().ok_or(RegistryError::EmptySlot(lo + 1))?;
        let second = tail[0].as_mut().ok_or(RegistryError::EmptySlot(hi + 1))?;
        if oa < ob {
            Ok((first, second))
        } else {
            Ok((second, first))
        }
    }

    /// Returns true once every slot holds a territory.
    pub fn is_populated(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Returns the 1-based indices of slots that are still empty.
    pub fn missing(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Iterates over populated slots as `(index, territory)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Territory)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|t| (i + 1, t)))
    }

    /// Copies every slot in index order.
    pub fn snapshot(&self) -> Vec<Option<Territory>> {
        self.slots.clone()
    }

    /// Returns the distinct factions present, in order of first appearance.
    pub fn factions(&self) -> Vec<Faction> {
        let mut seen: Vec<Faction> = Vec::new();
        for (_, t) in self.iter() {
            if !seen.contains(&t.faction) {
                seen.push(t.faction.clone());
            }
        }
        seen
    }

    /// Counts populated territories controlled by `faction`.
    pub fn count_faction(&self, faction: &Faction) -> usize {
        self.iter().filter(|(_, t)| &t.faction == faction).count()
    }
}
