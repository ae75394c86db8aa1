//! Tunables for the logo. Everything is plain data with a `Default`; nothing is
//! validated, so odd values (negative depth, zero spacing) flow straight into
//! the geometry.

use glam::Vec3;
use std::f32::consts::FRAC_PI_3;

/// Options for the letterform builder.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoConfig {
    /// Extrusion depth along +Z.
    pub depth: f32,
    /// Fill colour as `0xRRGGBB`.
    pub color: u32,
    /// Extra gap added per letter index.
    pub letter_spacing: f32,
    pub bevel: bool,
    pub bevel_size: f32,
    pub bevel_thickness: f32,
    pub bevel_segments: u32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            depth: 0.2,
            color: 0x0099ff,
            letter_spacing: 0.1,
            bevel: true,
            bevel_size: 0.02,
            bevel_thickness: 0.02,
            bevel_segments: 3,
        }
    }
}

/// Rotation behaviour of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// Fraction of the remaining distance covered each frame.
    pub smoothing: f32,
    /// Radians per pixel of drag.
    pub drag_sensitivity: f32,
    /// Radians added to `target.y` per idle frame.
    pub auto_rotate_step: f32,
    /// Peak of the idle bobbing around X.
    pub bob_amplitude: f32,
    /// Angular frequency of the idle bobbing, radians per second.
    pub bob_frequency: f32,
    /// `target.x` is kept within `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            drag_sensitivity: 0.01,
            auto_rotate_step: 0.01,
            bob_amplitude: 0.2,
            bob_frequency: 0.5,
            pitch_limit: FRAC_PI_3,
        }
    }
}

/// Camera, lights and framing of the logo inside the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
    pub ambient_intensity: f32,
    /// `(direction towards the light, intensity)` pairs.
    pub directional_lights: Vec<(Vec3, f32)>,
    pub logo_base_rotation: Vec3,
    pub logo_scale: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 5.0,
            ambient_intensity: 0.5,
            directional_lights: vec![
                (Vec3::new(1.0, 1.0, 1.0), 0.8),
                (Vec3::new(-1.0, 0.5, 0.5), 0.4),
                (Vec3::new(0.0, -1.0, -1.0), 0.3),
            ],
            logo_base_rotation: Vec3::new(0.15, 0.0, 0.0),
            logo_scale: 0.9,
        }
    }
}

/// Splits `0xRRGGBB` into linear 0..1 channels.
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}
