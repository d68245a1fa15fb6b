//! Incremental light synchronizer
//!
//! A `LightSynchronizer` keeps a render-ready snapshot of one scene light.
//! Each sync pass looks at the dirty bits handed in by the caller, re-reads
//! only the flagged categories from the scene source, and leaves the bits
//! `CLEAN`. Renderers read the snapshot back through [`LightSynchronizer::get`]
//! or the typed accessors when they aggregate lights for a frame.
//!
//! ## Pass order
//!
//! 1. `TRANSFORM`: world transform into the cache
//! 2. `PARAMS`: descriptor derived according to the light kind
//! 3. `TRANSFORM | PARAMS`: cached transform folded into the descriptor
//! 4. `SHADOW_PARAMS`: shadow parameters, verbatim
//! 5. `COLLECTION`: shadow collection, with change notification
//! 6. dirty bits reset to `CLEAN`
//!
//! Bad optional attributes never stop a pass. They are logged, reported in
//! the returned [`SyncReport`], and treated as absent.

use crate::foundation::math::{extract_translation, point_from_translation, utils, Mat4d, Vec3, Vec4};
use crate::scene::{ChangeTracker, SceneSource};

use super::collection::PrimCollection;
use super::descriptor::{LightDescriptor, ShadowParams};
use super::dirty_bits::DirtyBits;
use super::kind::LightKind;
use super::value::{tokens, AttributeError, LightId, ParamKey, Value, ValueType};

/// Lowest exposure, in stops, applied to an area light
pub const MIN_EXPOSURE: f32 = -50.0;

/// Highest exposure, in stops, applied to an area light
pub const MAX_EXPOSURE: f32 = 50.0;

/// Intensity after applying exposure, clamped to `[MIN_EXPOSURE, MAX_EXPOSURE]` stops
pub fn effective_intensity(intensity: f32, exposure: f32) -> f32 {
    intensity * 2.0_f32.powf(utils::clamp(exposure, MIN_EXPOSURE, MAX_EXPOSURE))
}

/// Outcome of one sync pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Dirty bits the pass acted on
    pub refreshed: DirtyBits,
    /// Attributes that were missing or mistyped
    pub diagnostics: Vec<AttributeError>,
    /// Whether the change tracker was told about a new shadow collection
    pub collection_notified: bool,
}

impl SyncReport {
    /// True when every attribute read cleanly
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// One field per cache key; an unset key is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
struct ParamCache {
    transform: Option<Mat4d>,
    params: Option<LightDescriptor>,
    shadow_params: Option<ShadowParams>,
    shadow_collection: Option<PrimCollection>,
}

/// Render-ready cache of one scene light, refreshed incrementally
#[derive(Debug, Clone)]
pub struct LightSynchronizer {
    id: LightId,
    kind: LightKind,
    cache: ParamCache,
}

impl LightSynchronizer {
    /// Bind a light identity and kind; the cache starts empty
    pub fn new(id: LightId, kind: LightKind) -> Self {
        Self {
            id,
            kind,
            cache: ParamCache::default(),
        }
    }

    /// Identifier of the light
    pub fn id(&self) -> &LightId {
        &self.id
    }

    /// Kind fixed at construction
    pub fn kind(&self) -> LightKind {
        self.kind
    }

    /// Dirty bits the first pass of this light should carry
    pub fn initial_dirty_bits(&self) -> DirtyBits {
        self.kind.initial_dirty_mask()
    }

    /// Run one synchronization pass.
    ///
    /// `dirty_bits` is read to decide what to refresh and is always `CLEAN`
    /// when this returns.
    pub fn sync(
        &mut self,
        source: &dyn SceneSource,
        tracker: &mut dyn ChangeTracker,
        dirty_bits: &mut DirtyBits,
    ) -> SyncReport {
        let bits = *dirty_bits;
        let mut report = SyncReport {
            refreshed: bits,
            ..SyncReport::default()
        };

        if bits.contains(DirtyBits::TRANSFORM) {
            self.cache.transform = Some(source.transform(&self.id));
        }

        if bits.contains(DirtyBits::PARAMS) {
            self.cache.params = match self.kind {
                LightKind::Simple => read_optional(
                    &self.id,
                    tokens::PARAMS,
                    source.get(&self.id, tokens::PARAMS),
                    ValueType::Light,
                    Value::into_light,
                    &mut report.diagnostics,
                ),
                LightKind::Dome => Some(self.prepare_dome_light(source, &mut report.diagnostics)),
                LightKind::Area => {
                    Some(self.approximate_area_light(source, &mut report.diagnostics))
                }
            };
        }

        if bits.intersects(DirtyBits::TRANSFORM | DirtyBits::PARAMS) {
            self.apply_transform();
        }

        if bits.contains(DirtyBits::SHADOW_PARAMS) {
            self.cache.shadow_params = read_optional(
                &self.id,
                tokens::SHADOW_PARAMS,
                source.get(&self.id, tokens::SHADOW_PARAMS),
                ValueType::ShadowParams,
                Value::into_shadow_params,
                &mut report.diagnostics,
            );
        }

        if bits.contains(DirtyBits::COLLECTION) {
            report.collection_notified = self.sync_shadow_collection(source, tracker, &mut report.diagnostics);
        }

        log::debug!(
            "Synced {} light {} ({:?}, {} diagnostics)",
            self.kind,
            self.id,
            bits,
            report.diagnostics.len()
        );

        *dirty_bits = DirtyBits::CLEAN;
        report
    }

    /// Cached value for a key, or `None` if the key was never set
    pub fn get(&self, key: ParamKey) -> Option<Value> {
        match key {
            ParamKey::Transform => self.cache.transform.map(Value::Matrix),
            ParamKey::Params => self.cache.params.clone().map(Value::Light),
            ParamKey::ShadowParams => self.cache.shadow_params.clone().map(Value::ShadowParams),
            ParamKey::ShadowCollection => {
                self.cache.shadow_collection.clone().map(Value::Collection)
            }
        }
    }

    /// Cached world transform
    pub fn transform(&self) -> Option<&Mat4d> {
        self.cache.transform.as_ref()
    }

    /// Cached light descriptor
    pub fn light(&self) -> Option<&LightDescriptor> {
        self.cache.params.as_ref()
    }

    /// Cached shadow parameters
    pub fn shadow_params(&self) -> Option<&ShadowParams> {
        self.cache.shadow_params.as_ref()
    }

    /// Cached shadow collection
    pub fn shadow_collection(&self) -> Option<&PrimCollection> {
        self.cache.shadow_collection.as_ref()
    }

    /// Release the light. Nothing external is owned, so there is nothing to free.
    pub fn finalize(&mut self) {}

    fn prepare_dome_light(
        &self,
        source: &dyn SceneSource,
        diagnostics: &mut Vec<AttributeError>,
    ) -> LightDescriptor {
        // Dome lights never cast shadows through this path
        let mut light = LightDescriptor {
            has_shadow: false,
            is_dome_light: true,
            ..LightDescriptor::default()
        };

        light.dome_light_texture_file = read_optional(
            &self.id,
            tokens::TEXTURE_FILE,
            source.light_param_value(&self.id, tokens::TEXTURE_FILE),
            ValueType::AssetPath,
            Value::into_asset_path,
            diagnostics,
        );

        light
    }

    #[allow(clippy::float_cmp)]
    fn approximate_area_light(
        &self,
        source: &dyn SceneSource,
        diagnostics: &mut Vec<AttributeError>,
    ) -> LightDescriptor {
        let color = read_required(
            &self.id,
            tokens::COLOR,
            source.light_param_value(&self.id, tokens::COLOR),
            ValueType::Vec3,
            Value::into_vec3,
            Vec3::new(1.0, 1.0, 1.0),
            diagnostics,
        );
        let intensity = read_required(
            &self.id,
            tokens::INTENSITY,
            source.light_param_value(&self.id, tokens::INTENSITY),
            ValueType::Float,
            Value::into_float,
            1.0,
            diagnostics,
        );
        let exposure = read_required(
            &self.id,
            tokens::EXPOSURE,
            source.light_param_value(&self.id, tokens::EXPOSURE),
            ValueType::Float,
            Value::into_float,
            0.0,
            diagnostics,
        );

        let intensity = effective_intensity(intensity, exposure);
        let diffuse = Vec4::new(color.x * intensity, color.y * intensity, color.z * intensity, 1.0);

        // Shadows are not supported for approximated area lights
        let defaults = LightDescriptor::default();
        LightDescriptor {
            diffuse,
            specular: defaults.specular * intensity,
            has_shadow: false,
            has_intensity: intensity != 0.0,
            ..defaults
        }
    }

    // Simple lights carry their own transform inside the params descriptor.
    fn apply_transform(&mut self) {
        let transform = self.cache.transform.unwrap_or_else(Mat4d::identity);
        match self.kind {
            LightKind::Simple => {}
            LightKind::Dome => {
                let light = self.cache.params.get_or_insert_with(LightDescriptor::default);
                light.transform = transform;
            }
            LightKind::Area => {
                let light = self.cache.params.get_or_insert_with(LightDescriptor::default);
                light.position = point_from_translation(&extract_translation(&transform));
            }
        }
    }

    fn sync_shadow_collection(
        &mut self,
        source: &dyn SceneSource,
        tracker: &mut dyn ChangeTracker,
        diagnostics: &mut Vec<AttributeError>,
    ) -> bool {
        let fetched = read_optional(
            &self.id,
            tokens::SHADOW_COLLECTION,
            source.get(&self.id, tokens::SHADOW_COLLECTION),
            ValueType::Collection,
            Value::into_collection,
            diagnostics,
        );

        match fetched {
            Some(collection) => {
                if self.cache.shadow_collection.as_ref() == Some(&collection) {
                    return false;
                }
                tracker.mark_collection_dirty(&collection.name);
                self.cache.shadow_collection = Some(collection);
                true
            }
            None => {
                self.cache.shadow_collection = Some(PrimCollection::default());
                false
            }
        }
    }
}

/// Read an optional attribute. Absent is fine; a wrong type is reported and
/// treated as absent.
fn read_optional<T>(
    id: &LightId,
    attribute: &'static str,
    value: Option<Value>,
    expected: ValueType,
    extract: fn(Value) -> Result<T, Value>,
    diagnostics: &mut Vec<AttributeError>,
) -> Option<T> {
    match extract(value?) {
        Ok(value) => Some(value),
        Err(other) => {
            let err = AttributeError::TypeMismatch {
                light: id.clone(),
                attribute,
                expected,
                found: other.value_type(),
            };
            log::warn!("{}", err);
            diagnostics.push(err);
            None
        }
    }
}

/// Read a required attribute, substituting `fallback` when the source breaks
/// its contract.
fn read_required<T>(
    id: &LightId,
    attribute: &'static str,
    value: Option<Value>,
    expected: ValueType,
    extract: fn(Value) -> Result<T, Value>,
    fallback: T,
    diagnostics: &mut Vec<AttributeError>,
) -> T {
    let err = match value.map(extract) {
        Some(Ok(value)) => return value,
        Some(Err(other)) => AttributeError::TypeMismatch {
            light: id.clone(),
            attribute,
            expected,
            found: other.value_type(),
        },
        None => AttributeError::Missing {
            light: id.clone(),
            attribute,
        },
    };
    log::error!("{}", err);
    diagnostics.push(err);
    fallback
}
