//! Light synchronization
//!
//! Everything needed to turn a scene light into a render-ready descriptor:
//! dirty bits, light kinds, loosely typed attribute values, the descriptor
//! and collection records, and the per-light synchronizer itself.

pub mod collection;
pub mod descriptor;
pub mod dirty_bits;
pub mod kind;
pub mod light;
pub mod value;

pub use collection::{PrimCollection, DEFAULT_MATERIAL_TAG};
pub use descriptor::{GpuLight, LightDescriptor, ShadowParams};
pub use dirty_bits::DirtyBits;
pub use kind::{LightKind, DOME_LIGHT_TYPE, SIMPLE_LIGHT_TYPE};
pub use light::{effective_intensity, LightSynchronizer, SyncReport, MAX_EXPOSURE, MIN_EXPOSURE};
pub use value::{tokens, AssetPath, AttributeError, LightId, ParamKey, Value, ValueType};
