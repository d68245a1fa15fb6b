//! Scene source - authoritative light attributes
//!
//! The synchronizer never owns scene data. It asks a `SceneSource` for the
//! values it needs and derives its cache from whatever comes back. Required
//! attributes are expected to be present and correctly typed; optional ones
//! may be absent or hold an unexpected type.

use std::collections::HashMap;

use crate::config::scene::{LightDescription, SceneDescription};
use crate::foundation::math::{translation, Mat4d};
use crate::lighting::{tokens, AssetPath, LightDescriptor, LightId, PrimCollection, Value};

/// Read access to authoritative light state
pub trait SceneSource {
    /// Value of a light schema parameter such as `color` or `textureFile`
    fn light_param_value(&self, id: &LightId, param: &str) -> Option<Value>;

    /// World transform of a light
    fn transform(&self, id: &LightId) -> Mat4d;

    /// Generic attribute lookup (`params`, `shadowParams`, `shadowCollection`)
    fn get(&self, id: &LightId, key: &str) -> Option<Value>;
}

#[derive(Debug, Clone)]
struct LightRecord {
    transform: Mat4d,
    params: HashMap<String, Value>,
    attributes: HashMap<String, Value>,
}

impl Default for LightRecord {
    fn default() -> Self {
        Self {
            transform: Mat4d::identity(),
            params: HashMap::new(),
            attributes: HashMap::new(),
        }
    }
}

/// Scene source backed by in-memory maps
///
/// Lights that were never inserted answer with no values and an identity
/// transform.
#[derive(Debug, Clone, Default)]
pub struct InMemorySceneSource {
    lights: HashMap<LightId, LightRecord>,
}

impl InMemorySceneSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source holding every light of a scene description
    pub fn from_description(description: &SceneDescription) -> Self {
        let mut source = Self::new();
        for light in &description.lights {
            source.load_light(light);
        }
        source
    }

    /// Add (or reset) a light with an identity transform and no attributes
    pub fn insert_light(&mut self, id: LightId) {
        self.lights.insert(id, LightRecord::default());
    }

    /// Remove a light; returns whether it existed
    pub fn remove_light(&mut self, id: &LightId) -> bool {
        self.lights.remove(id).is_some()
    }

    /// Whether the light exists in this source
    pub fn contains(&self, id: &LightId) -> bool {
        self.lights.contains_key(id)
    }

    /// Number of lights
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// True when the source holds no lights
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Set the world transform, creating the light if needed
    pub fn set_transform(&mut self, id: &LightId, transform: Mat4d) {
        self.record_mut(id).transform = transform;
    }

    /// Set a light schema parameter, creating the light if needed
    pub fn set_param(&mut self, id: &LightId, param: &str, value: Value) {
        self.record_mut(id).params.insert(param.to_string(), value);
    }

    /// Remove a light schema parameter
    pub fn clear_param(&mut self, id: &LightId, param: &str) {
        if let Some(record) = self.lights.get_mut(id) {
            record.params.remove(param);
        }
    }

    /// Set a generic attribute, creating the light if needed
    pub fn set_attribute(&mut self, id: &LightId, key: &str, value: Value) {
        self.record_mut(id).attributes.insert(key.to_string(), value);
    }

    /// Remove a generic attribute
    pub fn clear_attribute(&mut self, id: &LightId, key: &str) {
        if let Some(record) = self.lights.get_mut(id) {
            record.attributes.remove(key);
        }
    }

    /// Author one described light
    pub fn load_light(&mut self, light: &LightDescription) {
        let id = light.id.clone();
        self.insert_light(id.clone());

        let [x, y, z] = light.translation;
        self.set_transform(&id, translation(x, y, z));

        self.set_param(&id, tokens::COLOR, Value::Vec3(light.color.into()));
        self.set_param(&id, tokens::INTENSITY, Value::Float(light.intensity));
        self.set_param(&id, tokens::EXPOSURE, Value::Float(light.exposure));

        if let Some(texture) = &light.texture_file {
            self.set_param(&id, tokens::TEXTURE_FILE, Value::AssetPath(AssetPath::new(texture)));
        }
        if let Some(params) = &light.simple_params {
            self.set_attribute(&id, tokens::PARAMS, Value::Light(params.clone()));
        }
        if let Some(shadow) = &light.shadow_params {
            self.set_attribute(&id, tokens::SHADOW_PARAMS, Value::ShadowParams(shadow.clone()));
        }
        if let Some(collection) = &light.shadow_collection {
            self.set_attribute(
                &id,
                tokens::SHADOW_COLLECTION,
                Value::Collection(collection.clone()),
            );
        }
    }

    /// Store a ready-made descriptor for a simple light
    pub fn set_simple_params(&mut self, id: &LightId, params: LightDescriptor) {
        self.set_attribute(id, tokens::PARAMS, Value::Light(params));
    }

    /// Store the shadow collection of a light
    pub fn set_shadow_collection(&mut self, id: &LightId, collection: PrimCollection) {
        self.set_attribute(id, tokens::SHADOW_COLLECTION, Value::Collection(collection));
    }

    fn record_mut(&mut self, id: &LightId) -> &mut LightRecord {
        self.lights.entry(id.clone()).or_default()
    }
}

impl SceneSource for InMemorySceneSource {
    fn light_param_value(&self, id: &LightId, param: &str) -> Option<Value> {
        self.lights.get(id)?.params.get(param).cloned()
    }

    fn transform(&self, id: &LightId) -> Mat4d {
        self.lights
            .get(id)
            .map_or_else(Mat4d::identity, |record| record.transform)
    }

    fn get(&self, id: &LightId, key: &str) -> Option<Value> {
        self.lights.get(id)?.attributes.get(key).cloned()
    }
}
