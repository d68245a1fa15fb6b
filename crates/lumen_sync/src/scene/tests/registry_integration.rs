//! Registry workflows over a described scene
//!
//! Loads a small studio scene, runs it through the registry the way a host
//! would across several frames, and checks what ends up in the GPU buffer.

use crate::config::scene::SceneDescription;
use crate::config::Config;
use crate::foundation::math::{translation, Vec4};
use crate::lighting::{
    tokens, DirtyBits, GpuLight, LightId, LightKind, ParamKey, PrimCollection, Value,
};
use crate::scene::{CollectionChangeTracker, InMemorySceneSource, LightRegistry};
use approx::assert_relative_eq;

const STUDIO: &str = r#"(
    lights: [
        (
            id: "/World/Key",
            prim_type: "rectLight",
            color: (1.0, 0.0, 0.0),
            intensity: 2.0,
            translation: (1.0, 2.0, 3.0),
        ),
        (
            id: "/World/Sky",
            prim_type: "domeLight",
            texture_file: Some("sky.exr"),
        ),
        (
            id: "/World/Simple",
            prim_type: "simpleLight",
            simple_params: Some((has_shadow: true, shadow_resolution: 1024)),
            shadow_params: Some((enabled: true, resolution: 1024)),
            shadow_collection: Some((name: "simpleShadow", root_paths: ["/World/Props"])),
        ),
    ],
)"#;

fn studio() -> (SceneDescription, InMemorySceneSource, LightRegistry) {
    let scene = SceneDescription::from_ron_str(STUDIO).unwrap();
    let source = InMemorySceneSource::from_description(&scene);
    let registry = LightRegistry::from_description(&scene);
    (scene, source, registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_syncs_every_light() {
        let (scene, source, mut registry) = studio();
        let mut tracker = CollectionChangeTracker::new();

        assert_eq!(registry.len(), scene.lights.len());
        let summary = registry.sync_all(&source, &mut tracker);

        assert_eq!(summary.synced, 3);
        assert!(summary.diagnostics.is_empty());
        // Only the simple light carries the collection bit initially
        assert_eq!(summary.collections_notified, 1);
        assert_eq!(tracker.take_dirty_collections(), vec!["simpleShadow".to_string()]);

        for id in registry.ids() {
            assert_eq!(registry.pending_bits(id), Some(DirtyBits::CLEAN));
        }
    }

    #[test]
    fn test_described_lights_derive_expected_descriptors() {
        let (_, source, mut registry) = studio();
        let mut tracker = CollectionChangeTracker::new();
        registry.sync_all(&source, &mut tracker);

        let key = registry.get(&LightId::new("/World/Key")).unwrap();
        assert_eq!(key.kind(), LightKind::Area);
        let descriptor = key.light().unwrap();
        assert_relative_eq!(descriptor.diffuse, Vec4::new(2.0, 0.0, 0.0, 1.0));
        assert_eq!(descriptor.position, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert!(key.shadow_collection().is_none());

        let sky = registry.get(&LightId::new("/World/Sky")).unwrap();
        let descriptor = sky.light().unwrap();
        assert!(descriptor.is_dome_light);
        assert_eq!(
            descriptor.dome_light_texture_file.as_ref().map(|p| p.authored.as_str()),
            Some("sky.exr")
        );

        let simple = registry.get(&LightId::new("/World/Simple")).unwrap();
        assert!(simple.light().unwrap().has_shadow);
        assert_eq!(simple.shadow_params().unwrap().resolution, 1024);
        assert!(simple.shadow_collection().unwrap().contains_path("/World/Props/Chair"));
    }

    #[test]
    fn test_edit_resyncs_only_marked_light() {
        let (_, mut source, mut registry) = studio();
        let mut tracker = CollectionChangeTracker::new();
        registry.sync_all(&source, &mut tracker);

        let key = LightId::new("/World/Key");
        source.set_param(&key, tokens::EXPOSURE, Value::Float(1.0));
        source.set_transform(&key, translation(-1.0, 0.0, 0.0));
        assert!(registry.mark_dirty(&key, DirtyBits::PARAMS | DirtyBits::TRANSFORM));

        let summary = registry.sync_all(&source, &mut tracker);
        assert_eq!(summary.synced, 1);
        assert_eq!(summary.skipped, 2);

        let descriptor = registry.get(&key).unwrap().light().unwrap();
        assert_relative_eq!(descriptor.diffuse, Vec4::new(4.0, 0.0, 0.0, 1.0));
        assert_eq!(descriptor.position, Vec4::new(-1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_collection_versions_across_frames() {
        let (_, mut source, mut registry) = studio();
        let mut tracker = CollectionChangeTracker::new();
        let simple = LightId::new("/World/Simple");
        registry.sync_all(&source, &mut tracker);

        // Same collection again: no new version
        registry.mark_dirty(&simple, DirtyBits::COLLECTION);
        registry.sync_all(&source, &mut tracker);
        assert_eq!(tracker.collection_version("simpleShadow"), 1);

        source.set_shadow_collection(
            &simple,
            PrimCollection::new("simpleShadow").with_exclude_paths(["/World/Props/Lamp"]),
        );
        registry.mark_dirty(&simple, DirtyBits::COLLECTION);
        let summary = registry.sync_all(&source, &mut tracker);

        assert_eq!(summary.collections_notified, 1);
        assert_eq!(tracker.collection_version("simpleShadow"), 2);
        assert_eq!(tracker.global_collection_version(), 2);
    }

    #[test]
    fn test_mistyped_attributes_surface_in_summary() {
        let (_, mut source, mut registry) = studio();
        let mut tracker = CollectionChangeTracker::new();
        let sky = LightId::new("/World/Sky");
        source.set_param(&sky, tokens::TEXTURE_FILE, Value::Int(7));

        let summary = registry.sync_all(&source, &mut tracker);
        assert_eq!(summary.diagnostics.len(), 1);
        assert_eq!(summary.diagnostics[0].attribute(), tokens::TEXTURE_FILE);
        assert!(registry
            .get(&sky)
            .unwrap()
            .light()
            .unwrap()
            .dome_light_texture_file
            .is_none());
    }

    #[test]
    fn test_removed_light_leaves_gpu_buffer() {
        let (_, source, mut registry) = studio();
        let mut tracker = CollectionChangeTracker::new();
        registry.sync_all(&source, &mut tracker);
        assert_eq!(registry.gpu_lights().len(), 3);

        assert!(registry.remove(&LightId::new("/World/Sky")));
        let lights = registry.gpu_lights();
        assert_eq!(lights.len(), 2);
        assert!(lights.iter().all(|light| light.flags & GpuLight::IS_DOME == 0));

        let bytes: &[u8] = bytemuck::cast_slice(&lights);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<GpuLight>());
    }

    #[test]
    fn test_unsynced_light_has_no_cache() {
        let (_, _, registry) = studio();
        let key = registry.get(&LightId::new("/World/Key")).unwrap();
        for param in ParamKey::ALL {
            assert!(key.get(param).is_none());
        }
        assert!(registry.gpu_lights().is_empty());
    }
}
