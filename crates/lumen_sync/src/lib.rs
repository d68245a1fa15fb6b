//! # Lumen Sync
//!
//! Incremental synchronization of scene lights into render-ready light
//! descriptors.
//!
//! ## Features
//!
//! - **Dirty-bit driven**: each pass re-reads only the categories flagged as changed
//! - **Three light kinds**: simple lights, textured dome lights and area lights
//!   approximated as point lights
//! - **Shadow collections**: change notification only when a collection actually changes
//! - **GPU packing**: descriptors packed into a `bytemuck::Pod` upload layout
//! - **Scene descriptions**: lights authored in RON or TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use lumen_sync::prelude::*;
//!
//! let id = LightId::new("/World/Key");
//! let mut source = InMemorySceneSource::new();
//! source.set_param(&id, tokens::COLOR, Value::Vec3(Vec3::new(1.0, 0.5, 0.25)));
//! source.set_param(&id, tokens::INTENSITY, Value::Float(2.0));
//! source.set_param(&id, tokens::EXPOSURE, Value::Float(0.0));
//!
//! let mut tracker = CollectionChangeTracker::new();
//! let mut light = LightSynchronizer::new(id, LightKind::from_prim_type("rectLight"));
//! let mut dirty = light.initial_dirty_bits();
//!
//! let report = light.sync(&source, &mut tracker, &mut dirty);
//! assert!(report.is_clean());
//! assert!(dirty.is_clean());
//! assert!(light.light().is_some_and(|l| l.has_intensity));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod lighting;
pub mod scene;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{
            scene::{LightDescription, RuntimeConfig, SceneDescription},
            Config, ConfigError,
        },
        foundation::math::{Mat4d, Vec3, Vec4},
        lighting::{
            tokens, AssetPath, AttributeError, DirtyBits, GpuLight, LightDescriptor, LightId,
            LightKind, LightSynchronizer, ParamKey, PrimCollection, ShadowParams, SyncReport,
            Value,
        },
        scene::{
            ChangeTracker, CollectionChangeTracker, InMemorySceneSource, LightHandle,
            LightRegistry, RegistrySyncSummary, SceneSource,
        },
    };
}
