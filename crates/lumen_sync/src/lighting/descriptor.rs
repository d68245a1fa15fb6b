//! Render-ready light descriptors
//!
//! `LightDescriptor` is the record the rest of the rendering pipeline consumes:
//! every physical quantity already folded into the fixed-function terms a
//! shader expects (diffuse, specular, position, attenuation, ...).
//! `GpuLight` is the same record packed for a uniform or storage buffer.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4d, Vec3, Vec4};
use super::value::AssetPath;

/// Render-ready light record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDescriptor {
    /// Ambient term (RGBA)
    pub ambient: Vec4,
    /// Diffuse term with intensity folded in (RGBA)
    pub diffuse: Vec4,
    /// Specular term with intensity folded in (RGBA)
    pub specular: Vec4,
    /// Homogeneous world position (w = 1 for positional lights)
    pub position: Vec4,
    /// Spot cone axis
    pub spot_direction: Vec3,
    /// Spot cone half angle in degrees; 180 disables the cone
    pub spot_cutoff: f32,
    /// Spot cone falloff exponent
    pub spot_falloff: f32,
    /// Constant, linear and quadratic attenuation factors
    pub attenuation: Vec3,
    /// World transform of the light
    pub transform: Mat4d,
    /// Whether the light casts shadows
    pub has_shadow: bool,
    /// Shadow map resolution in texels
    pub shadow_resolution: u32,
    /// Depth bias applied when sampling the shadow map
    pub shadow_bias: f32,
    /// Shadow filter width
    pub shadow_blur: f32,
    /// Position and direction are expressed in camera space
    pub is_camera_space_light: bool,
    /// Environment light sampled from a texture
    pub is_dome_light: bool,
    /// False when the effective intensity is zero and the light can be skipped
    pub has_intensity: bool,
    /// Environment texture of a dome light
    pub dome_light_texture_file: Option<AssetPath>,
}

impl Default for LightDescriptor {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(1.0, 1.0, 1.0, 1.0),
            specular: Vec4::new(1.0, 1.0, 1.0, 1.0),
            position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            spot_direction: Vec3::new(0.0, 0.0, -1.0),
            spot_cutoff: 180.0,
            spot_falloff: 0.0,
            attenuation: Vec3::new(1.0, 0.0, 0.0),
            transform: Mat4d::identity(),
            has_shadow: false,
            shadow_resolution: 512,
            shadow_bias: 0.0,
            shadow_blur: 0.0,
            is_camera_space_light: false,
            is_dome_light: false,
            has_intensity: true,
            dome_light_texture_file: None,
        }
    }
}

impl LightDescriptor {
    /// Create a descriptor with default terms
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diffuse term
    pub fn with_diffuse(mut self, diffuse: Vec4) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the specular term
    pub fn with_specular(mut self, specular: Vec4) -> Self {
        self.specular = specular;
        self
    }

    /// Set the homogeneous position
    pub fn with_position(mut self, position: Vec4) -> Self {
        self.position = position;
        self
    }

    /// Enable or disable shadow casting
    pub fn with_shadow(mut self, has_shadow: bool) -> Self {
        self.has_shadow = has_shadow;
        self
    }

    /// Pack the descriptor into its GPU layout
    pub fn to_gpu(&self) -> GpuLight {
        let mut flags = 0;
        if self.has_shadow {
            flags |= GpuLight::HAS_SHADOW;
        }
        if self.is_dome_light {
            flags |= GpuLight::IS_DOME;
        }
        if self.has_intensity {
            flags |= GpuLight::HAS_INTENSITY;
        }
        if self.dome_light_texture_file.is_some() {
            flags |= GpuLight::HAS_TEXTURE;
        }

        GpuLight {
            position: self.position.into(),
            ambient: self.ambient.into(),
            diffuse: self.diffuse.into(),
            specular: self.specular.into(),
            spot_direction: [
                self.spot_direction.x,
                self.spot_direction.y,
                self.spot_direction.z,
                self.spot_cutoff,
            ],
            attenuation: [
                self.attenuation.x,
                self.attenuation.y,
                self.attenuation.z,
                self.spot_falloff,
            ],
            flags,
            shadow_resolution: self.shadow_resolution,
            shadow_bias: self.shadow_bias,
            shadow_blur: self.shadow_blur,
        }
    }
}

/// Shadow parameters, passed through from the scene source untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowParams {
    /// Whether shadows are rendered for this light
    pub enabled: bool,
    /// Shadow map resolution in texels
    pub resolution: u32,
    /// Depth bias
    pub bias: f32,
    /// Filter width
    pub blur: f32,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            enabled: false,
            resolution: 512,
            bias: -0.001,
            blur: 0.0,
        }
    }
}

/// Light record packed for upload.
///
/// Rows are 16 bytes so the layout matches std140/std430 without padding
/// surprises; the trailing scalars fill exactly one more row.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    /// xyz position, w = 1 for positional lights
    pub position: [f32; 4],
    /// Ambient RGBA
    pub ambient: [f32; 4],
    /// Diffuse RGBA
    pub diffuse: [f32; 4],
    /// Specular RGBA
    pub specular: [f32; 4],
    /// xyz spot axis, w = cutoff in degrees
    pub spot_direction: [f32; 4],
    /// xyz attenuation, w = spot falloff
    pub attenuation: [f32; 4],
    /// Bitfield of `HAS_SHADOW`, `IS_DOME`, `HAS_INTENSITY`, `HAS_TEXTURE`
    pub flags: u32,
    /// Shadow map resolution
    pub shadow_resolution: u32,
    /// Shadow depth bias
    pub shadow_bias: f32,
    /// Shadow filter width
    pub shadow_blur: f32,
}

impl GpuLight {
    /// Light casts shadows
    pub const HAS_SHADOW: u32 = 1 << 0;
    /// Light is a dome light
    pub const IS_DOME: u32 = 1 << 1;
    /// Light contributes (non-zero intensity)
    pub const HAS_INTENSITY: u32 = 1 << 2;
    /// Dome light has an environment texture bound
    pub const HAS_TEXTURE: u32 = 1 << 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor_terms() {
        let light = LightDescriptor::default();
        assert_eq!(light.specular, Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(light.position, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(light.transform, Mat4d::identity());
        assert!(light.has_intensity);
        assert!(!light.has_shadow);
        assert!(!light.is_dome_light);
        assert!(light.dome_light_texture_file.is_none());
    }

    #[test]
    fn test_gpu_layout_size() {
        assert_eq!(std::mem::size_of::<GpuLight>(), 7 * 16);
    }

    #[test]
    fn test_to_gpu_flags() {
        let mut light = LightDescriptor::new()
            .with_diffuse(Vec4::new(2.0, 0.0, 0.0, 1.0))
            .with_shadow(true);
        light.is_dome_light = true;
        light.dome_light_texture_file = Some(AssetPath::new("sky.exr"));

        let gpu = light.to_gpu();
        assert_eq!(gpu.diffuse, [2.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            gpu.flags,
            GpuLight::HAS_SHADOW | GpuLight::IS_DOME | GpuLight::HAS_INTENSITY | GpuLight::HAS_TEXTURE
        );
        assert_eq!(gpu.spot_direction[3], 180.0);

        let bytes: &[u8] = bytemuck::bytes_of(&gpu);
        assert_eq!(bytes.len(), std::mem::size_of::<GpuLight>());
    }
}
