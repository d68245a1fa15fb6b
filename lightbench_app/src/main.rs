//! Light sync bench
//!
//! Loads a scene description, registers its lights and drives a few sync
//! passes the way a renderer would between frames, editing the scene in
//! between to show incremental updates.

use lumen_sync::foundation::logging;
use lumen_sync::foundation::math::translation;
use lumen_sync::prelude::*;

const DEFAULT_SCENE: &str = "lightbench_app/scenes/studio.ron";

struct LightBenchApp {
    scene: SceneDescription,
    source: InMemorySceneSource,
    registry: LightRegistry,
    tracker: CollectionChangeTracker,
}

impl LightBenchApp {
    fn new(scene: SceneDescription) -> Self {
        let source = InMemorySceneSource::from_description(&scene);
        let registry = LightRegistry::from_description(&scene);
        log::info!("Registered {} lights", registry.len());

        Self {
            scene,
            source,
            registry,
            tracker: CollectionChangeTracker::new(),
        }
    }

    fn run(&mut self) {
        for pass in 0..self.scene.runtime.passes {
            if pass > 0 {
                self.edit_scene(pass);
            }

            let summary = self.registry.sync_all(&self.source, &mut self.tracker);
            for diagnostic in &summary.diagnostics {
                log::warn!("Pass {}: {}", pass, diagnostic);
            }
            for name in self.tracker.take_dirty_collections() {
                log::info!(
                    "Pass {}: collection '{}' now at version {}",
                    pass,
                    name,
                    self.tracker.collection_version(&name)
                );
            }
        }

        self.report();
    }

    // Nudge the first light and re-evaluate the simple light's collection,
    // which is unchanged and so must not notify again.
    #[allow(clippy::cast_precision_loss)]
    fn edit_scene(&mut self, pass: u32) {
        let ids: Vec<LightId> = self.registry.ids().cloned().collect();

        if let Some(id) = ids.first() {
            let offset = f64::from(pass);
            self.source.set_transform(id, translation(offset, 2.0, 0.0));
            self.source.set_param(id, tokens::EXPOSURE, Value::Float(pass as f32));
            self.registry.mark_dirty(id, DirtyBits::TRANSFORM | DirtyBits::PARAMS);
        }

        for id in &ids {
            if self.registry.get(id).map(LightSynchronizer::kind) == Some(LightKind::Simple) {
                self.registry.mark_dirty(id, DirtyBits::COLLECTION);
            }
        }
    }

    fn report(&self) {
        for id in self.registry.ids() {
            let Some(light) = self.registry.get(id) else {
                continue;
            };
            match light.light() {
                Some(descriptor) => log::info!(
                    "{} [{}] diffuse={:?} position={:?} intensity={} dome={}",
                    id,
                    light.kind(),
                    descriptor.diffuse.as_slice(),
                    descriptor.position.as_slice(),
                    descriptor.has_intensity,
                    descriptor.is_dome_light
                ),
                None => log::info!("{} [{}] no descriptor", id, light.kind()),
            }

            if let Some(collection) = light.shadow_collection() {
                let probe = "/World/Props/Teapot";
                log::info!(
                    "{} shadow collection '{}' contains {}: {}",
                    id,
                    collection.name,
                    probe,
                    collection.contains_path(probe)
                );
            }
        }

        let gpu_lights = self.registry.gpu_lights();
        let bytes: &[u8] = bytemuck::cast_slice(&gpu_lights);
        log::info!(
            "Packed {} lights into {} bytes ({} collection notifications)",
            gpu_lights.len(),
            bytes.len(),
            self.tracker.notification_count()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SCENE.to_string());
    let scene = SceneDescription::load_from_file(&path)?;

    logging::init_with_level(&scene.runtime.log_level);
    log::info!("Loaded scene {} with {} lights", path, scene.lights.len());

    let mut app = LightBenchApp::new(scene);
    app.run();
    Ok(())
}
