//! Light kinds
//!
//! The kind decides which derivation routine a sync pass runs and which dirty
//! bits the first pass requests. It is picked once, when the light is
//! created, and never changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dirty_bits::DirtyBits;

/// Prim type token of a light whose parameters arrive as a ready descriptor
pub const SIMPLE_LIGHT_TYPE: &str = "simpleLight";

/// Prim type token of an environment (dome) light
pub const DOME_LIGHT_TYPE: &str = "domeLight";

/// The closed set of light kinds the synchronizer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightKind {
    /// Descriptor supplied verbatim by the scene source, with its own transform
    Simple,
    /// Environment light, optionally textured
    Dome,
    /// Any other scene light, approximated as a point light
    Area,
}

impl LightKind {
    /// Map a scene prim type token onto a kind.
    ///
    /// Everything that is neither a simple light nor a dome light (rect, disk,
    /// sphere, cylinder, distant, ...) goes through the area light path.
    pub fn from_prim_type(prim_type: &str) -> Self {
        match prim_type {
            SIMPLE_LIGHT_TYPE => Self::Simple,
            DOME_LIGHT_TYPE => Self::Dome,
            _ => Self::Area,
        }
    }

    /// Dirty bits the first sync pass of a new light should carry.
    ///
    /// Simple lights sync everything. Dome and area lights only pull their
    /// transform and params; they do not take part in shadowing through
    /// this path.
    pub fn initial_dirty_mask(self) -> DirtyBits {
        match self {
            Self::Simple => DirtyBits::ALL_DIRTY,
            Self::Dome | Self::Area => DirtyBits::PARAMS | DirtyBits::TRANSFORM,
        }
    }
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Simple => "simple",
            Self::Dome => "dome",
            Self::Area => "area",
        };
        f.write_str(name)
    }
}
