use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Item name -> owned quantity.
///
/// Copy-on-write: cloning shares storage, and the first write through a handle detaches it. A
/// recursive call holding its own handle can never observe a write made through another.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    items: Arc<BTreeMap<String, u32>>,
}

/// A consumption the ledger could not cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    pub item: String,
    pub needed: u32,
    pub available: u32,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "needed {} {} but only {} available",
            self.needed, self.item, self.available
        )
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: &str) -> bool {
        self.count(item) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(|&c| c == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn set(&mut self, item: impl Into<String>, count: u32) {
        let items = Arc::make_mut(&mut self.items);
        let item = item.into();
        if count == 0 {
            items.remove(&item);
        } else {
            items.insert(item, count);
        }
    }

    pub fn add(&mut self, item: &str, count: u32) {
        if count == 0 {
            return;
        }
        let current = self.count(item);
        self.set(item, current.saturating_add(count));
    }

    /// Remove `count` of `item`, failing without modification if the ledger holds fewer.
    pub fn take(&mut self, item: &str, count: u32) -> Result<(), Shortfall> {
        if count == 0 {
            return Ok(());
        }
        let available = self.count(item);
        if available < count {
            return Err(Shortfall {
                item: item.to_string(),
                needed: count,
                available,
            });
        }
        self.set(item, available - count);
        Ok(())
    }

    /// A new ledger with `other`'s quantities subtracted (saturating at zero).
    pub fn without(&self, other: &Ledger) -> Ledger {
        if other.is_empty() {
            return self.clone();
        }
        let mut out = self.clone();
        for (item, count) in other.iter() {
            let left = out.count(item).saturating_sub(count);
            out.set(item, left);
        }
        out
    }

    /// A new ledger holding this ledger's quantities plus `other`'s.
    pub fn plus(&self, other: &Ledger) -> Ledger {
        let mut out = self.clone();
        for (item, count) in other.iter() {
            out.add(item, count);
        }
        out
    }

    /// Per-item maximum of both ledgers.
    pub fn max_with(&self, other: &Ledger) -> Ledger {
        let mut out = self.clone();
        for (item, count) in other.iter() {
            if count > out.count(item) {
                out.set(item, count);
            }
        }
        out
    }

    /// Whether both handles still share storage (no write has detached them).
    pub fn shares_storage_with(&self, other: &Ledger) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.items.iter()).finish()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut ledger = Ledger::new();
        for (item, count) in iter {
            let item = item.into();
            ledger.add(&item, count);
        }
        ledger
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Ledger {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.as_ref().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Ledger {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = BTreeMap::<String, u32>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
