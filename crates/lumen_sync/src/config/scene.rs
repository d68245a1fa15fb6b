//! Scene descriptions
//!
//! A small authoring format for lights: enough to stand up an in-memory scene
//! source and a light registry without a full scene graph behind them.

use serde::{Deserialize, Serialize};

use super::Config;
use crate::lighting::{LightDescriptor, LightId, LightKind, PrimCollection, ShadowParams};

/// Settings for a run over a scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Number of sync passes to run
    pub passes: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            passes: 2,
        }
    }
}

/// One authored light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDescription {
    /// Scene path of the light
    pub id: LightId,
    /// Prim type token, e.g. `rectLight`, `domeLight` or `simpleLight`
    pub prim_type: String,
    /// Linear RGB color
    pub color: [f32; 3],
    /// Intensity before exposure
    pub intensity: f32,
    /// Exposure in stops
    pub exposure: f32,
    /// World translation
    pub translation: [f64; 3],
    /// Environment texture, dome lights only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_file: Option<String>,
    /// Shadow collection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_collection: Option<PrimCollection>,
    /// Shadow parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_params: Option<ShadowParams>,
    /// Ready-made descriptor, simple lights only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_params: Option<LightDescriptor>,
}

impl Default for LightDescription {
    fn default() -> Self {
        Self {
            id: LightId::new(""),
            prim_type: "rectLight".to_string(),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            exposure: 0.0,
            translation: [0.0, 0.0, 0.0],
            texture_file: None,
            shadow_collection: None,
            shadow_params: None,
            simple_params: None,
        }
    }
}

impl LightDescription {
    /// Kind derived from the prim type
    pub fn kind(&self) -> LightKind {
        LightKind::from_prim_type(&self.prim_type)
    }
}

/// A set of lights plus runtime settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Runtime settings
    pub runtime: RuntimeConfig,
    /// Authored lights
    pub lights: Vec<LightDescription>,
}

impl Config for SceneDescription {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    const STUDIO: &str = r#"(
        runtime: (log_level: "debug", passes: 3),
        lights: [
            (
                id: "/World/Key",
                prim_type: "rectLight",
                color: (1.0, 0.9, 0.8),
                intensity: 4.0,
                exposure: 1.0,
                translation: (2.0, 3.0, 1.0),
                shadow_collection: Some((name: "keyShadow", root_paths: ["/World"])),
            ),
            (
                id: "/World/Sky",
                prim_type: "domeLight",
                texture_file: Some("sky.exr"),
            ),
        ],
    )"#;

    #[test]
    fn test_parse_ron_scene() {
        let scene = SceneDescription::from_ron_str(STUDIO).unwrap();
        assert_eq!(scene.runtime.log_level, "debug");
        assert_eq!(scene.runtime.passes, 3);
        assert_eq!(scene.lights.len(), 2);

        let key = &scene.lights[0];
        assert_eq!(key.kind(), LightKind::Area);
        assert_eq!(key.color, [1.0, 0.9, 0.8]);
        let collection = key.shadow_collection.as_ref().unwrap();
        assert_eq!(collection.name, "keyShadow");
        // Fields left out fall back to their defaults
        assert!(collection.material_tag.is_empty());

        let sky = &scene.lights[1];
        assert_eq!(sky.kind(), LightKind::Dome);
        assert_eq!(sky.intensity, 1.0);
        assert_eq!(sky.texture_file.as_deref(), Some("sky.exr"));
    }

    #[test]
    fn test_empty_scene_uses_defaults() {
        let scene = SceneDescription::from_ron_str("()").unwrap();
        assert_eq!(scene, SceneDescription::default());
    }

    #[test]
    fn test_toml_scene() {
        let scene = SceneDescription::from_toml_str(
            r#"
            [runtime]
            passes = 1

            [[lights]]
            id = "/World/Fill"
            intensity = 0.5
            translation = [1.0, 0.0, -1.0]
            "#,
        )
        .unwrap();

        assert_eq!(scene.runtime.passes, 1);
        assert_eq!(scene.runtime.log_level, "info");
        assert_eq!(scene.lights[0].id, LightId::new("/World/Fill"));
        assert_eq!(scene.lights[0].translation, [1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let scene = SceneDescription::from_ron_str(STUDIO).unwrap();
        let dir = std::env::temp_dir();

        for ext in ["ron", "toml"] {
            let path = dir.join(format!("lumen_sync_scene_{}.{}", std::process::id(), ext));
            let path = path.to_string_lossy().into_owned();
            scene.save_to_file(&path).unwrap();
            let loaded = SceneDescription::load_from_file(&path).unwrap();
            let _ = std::fs::remove_file(&path);
            assert_eq!(loaded, scene, "{} round trip", ext);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let err = SceneDescription::default().save_to_file("scene.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));

        let err = SceneDescription::load_from_file("/nonexistent/scene.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
