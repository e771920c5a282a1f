//! Contracts for the rendering and asset collaborators
//!
//! The simulation writes transforms across this boundary and never reads
//! anything back; collision always runs against the authoritative
//! collision shapes, not against anything attached here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::ObstacleKind;

/// Opaque identifier for a visual representation owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayHandle(pub u64);

/// Opaque identifier for a loaded decorative asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle(pub u64);

/// Asset cache polled by the decorative-rendering layer
///
/// `get` returns `None` until a kind's asset finishes loading. The
/// simulation must behave identically whether or not anything has
/// loaded; only the renderer consults this.
pub trait AssetCache {
    fn get(&self, kind: ObstacleKind) -> Option<AssetHandle>;
}

/// Asset cache backed by a plain map; the loading collaborator inserts
/// handles as assets become ready.
#[derive(Debug, Default)]
pub struct LoadedAssets {
    ready: HashMap<ObstacleKind, AssetHandle>,
}

impl LoadedAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a kind's asset as ready
    pub fn insert(&mut self, kind: ObstacleKind, handle: AssetHandle) {
        self.ready.insert(kind, handle);
    }
}

impl AssetCache for LoadedAssets {
    fn get(&self, kind: ObstacleKind) -> Option<AssetHandle> {
        self.ready.get(&kind).copied()
    }
}
