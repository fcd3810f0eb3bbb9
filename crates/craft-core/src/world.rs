use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What is known about one block or entity type near the agent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ResourceInfo {
    pub count: u32,
    pub closest_distance: f64,
    pub average_distance: f64,
}

/// Block/entity name -> local availability.
///
/// Produced by the caller from a live scan; the planner only reads it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorldSnapshot {
    resources: BTreeMap<String, ResourceInfo>,
}

impl WorldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        name: impl Into<String>,
        count: u32,
        closest_distance: f64,
        average_distance: f64,
    ) -> Self {
        self.insert(
            name,
            ResourceInfo {
                count,
                closest_distance,
                average_distance,
            },
        );
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, info: ResourceInfo) {
        self.resources.insert(name.into(), info);
    }

    pub fn get(&self, name: &str) -> Option<&ResourceInfo> {
        self.resources.get(name)
    }

    pub fn count(&self, name: &str) -> u32 {
        self.get(name).map(|r| r.count).unwrap_or(0)
    }

    pub fn closest_distance(&self, name: &str) -> Option<f64> {
        self.get(name)
            .filter(|r| r.count > 0)
            .map(|r| r.closest_distance)
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceInfo)> {
        self.resources.iter().map(|(k, v)| (k.as_str(), v))
    }
}
