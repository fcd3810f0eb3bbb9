#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an executor may treat the members of a [`VariantGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VariantMode {
    /// Commit to exactly one member for the life of the step.
    #[default]
    OneOf,
    /// Any member is acceptable; switch between them opportunistically.
    AnyOf,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variant<T> {
    pub value: T,
}

/// An ordered, duplicate-free set of interchangeable values.
///
/// Order is preference order: the first variant is the one an executor falls back to, and the
/// one the feasibility replay simulates when nothing better matches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariantGroup<T> {
    #[cfg_attr(feature = "serde", serde(rename = "variantMode"))]
    pub mode: VariantMode,
    pub variants: Vec<Variant<T>>,
}

impl<T: PartialEq> VariantGroup<T> {
    pub fn new(mode: VariantMode) -> Self {
        Self {
            mode,
            variants: Vec::new(),
        }
    }

    pub fn single(value: T) -> Self {
        Self {
            mode: VariantMode::OneOf,
            variants: vec![Variant { value }],
        }
    }

    /// Build a group from values, dropping later duplicates.
    pub fn from_values(mode: VariantMode, values: impl IntoIterator<Item = T>) -> Self {
        let mut group = Self::new(mode);
        for value in values {
            group.push(value);
        }
        group
    }

    /// Append `value` unless an equal value is already present. Returns whether it was added.
    pub fn push(&mut self, value: T) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.variants.push(Variant { value });
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.variants.iter().any(|v| &v.value == value)
    }

    pub fn position(&self, value: &T) -> Option<usize> {
        self.variants.iter().position(|v| &v.value == value)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.variants.first().map(|v| &v.value)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.variants.get(index).map(|v| &v.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.variants.iter().map(|v| &v.value)
    }

    /// Keep only the variants at the given indices, preserving order.
    pub fn retain_indices(&mut self, keep: &[usize]) {
        let mut index = 0;
        self.variants.retain(|_| {
            let kept = keep.contains(&index);
            index += 1;
            kept
        });
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.variants.retain(|v| keep(&v.value));
    }

    /// Move the variant at `index` to the front. Out-of-range indices are ignored.
    pub fn promote(&mut self, index: usize) {
        if index < self.variants.len() && index != 0 {
            let variant = self.variants.remove(index);
            self.variants.insert(0, variant);
        }
    }

    /// Resolve the value for a variant index of a sibling group aligned with this one.
    ///
    /// Groups are either singletons (every aligned index maps to the one value) or parallel to
    /// their sibling, index for index.
    pub fn aligned(&self, index: usize) -> Option<&T> {
        if self.variants.len() == 1 {
            self.first()
        } else {
            self.get(index)
        }
    }

    pub fn map<U: PartialEq>(&self, f: impl FnMut(&T) -> U) -> VariantGroup<U> {
        VariantGroup::from_values(self.mode, self.iter().map(f))
    }
}

impl<T: PartialEq> FromIterator<T> for VariantGroup<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(VariantMode::OneOf, iter)
    }
}
