//! Minimal scene graph: a perspective camera, a handful of lights and groups of
//! meshes. The renderer only ever reads it.

use crate::config::{rgb, LogoConfig, SceneConfig};
use crate::extrude::{extrude, Bevel, ExtrudeOptions, Geometry};
use crate::glyphs::WORDMARK;
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::rc::Rc;

/// Shift applied to every letter so the word is centred on the group origin.
pub const LOGO_CENTER_OFFSET: Vec3 = Vec3::new(-2.35, -0.5, 0.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    projection: Mat4,
}

impl Camera {
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y: fov_degrees.to_radians(),
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Recomputes the aspect ratio from a pixel size. A zero height falls back
    /// to a square aspect instead of dividing by zero.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        self.update_projection();
    }

    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { color: Vec3, intensity: f32 },
    /// `direction` points from the scene towards the light.
    Directional { color: Vec3, intensity: f32, direction: Vec3 },
}

/// Phong surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Rc<Material>,
    pub position: Vec3,
}

#[derive(Debug, Clone)]
pub struct Group {
    pub position: Vec3,
    /// Euler angles, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: f32,
    pub children: Vec<Mesh>,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            children: Vec::new(),
        }
    }
}

impl Group {
    pub fn matrix(&self) -> Mat4 {
        let Vec3 { x, y, z } = self.rotation;
        let rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub lights: Vec<Light>,
    groups: Vec<Group>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn add_group(&mut self, group: Group) -> NodeId {
        self.groups.push(group);
        NodeId(self.groups.len() - 1)
    }

    pub fn group(&self, id: NodeId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn group_mut(&mut self, id: NodeId) -> Option<&mut Group> {
        self.groups.get_mut(id.0)
    }

    /// Every mesh with its world matrix, in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = (Mat4, &Mesh)> + '_ {
        self.groups.iter().flat_map(|group| {
            let parent = group.matrix();
            group
                .children
                .iter()
                .map(move |mesh| (parent * Mat4::from_translation(mesh.position), mesh))
        })
    }
}

/// Camera placed on +Z looking at the origin.
pub fn camera_for(config: &SceneConfig, width: u32, height: u32) -> Camera {
    let mut camera = Camera::perspective(config.fov_degrees, 1.0, config.near, config.far);
    camera.position = Vec3::new(0.0, 0.0, config.camera_distance);
    camera.set_viewport(width, height);
    camera
}

pub fn lights_for(config: &SceneConfig) -> Vec<Light> {
    let white = Vec3::ONE;
    std::iter::once(Light::Ambient { color: white, intensity: config.ambient_intensity })
        .chain(config.directional_lights.iter().map(|&(direction, intensity)| Light::Directional {
            color: white,
            intensity,
            direction: direction.normalize_or_zero(),
        }))
        .collect()
}

/// Builds the five extruded letters of the wordmark. All letters share one
/// material; the group itself sits at the origin with identity transform.
pub fn build_logo(config: &LogoConfig) -> Group {
    let material = Rc::new(Material {
        color: rgb(config.color),
        specular: rgb(0x333333),
        shininess: 70.0,
    });
    let options = ExtrudeOptions {
        depth: config.depth,
        bevel: config.bevel.then_some(Bevel {
            size: config.bevel_size,
            thickness: config.bevel_thickness,
            segments: config.bevel_segments,
        }),
    };
    let center = LOGO_CENTER_OFFSET - Vec3::new(0.0, 0.0, config.depth / 2.0);

    let children = WORDMARK
        .iter()
        .enumerate()
        .map(|(i, glyph)| Mesh {
            geometry: extrude(glyph.outline, &options),
            material: Rc::clone(&material),
            position: center + Vec3::X * glyph.offset(i, config.letter_spacing),
        })
        .collect();

    Group { children, ..Group::default() }
}

/// Lights, camera and the logo group placed at its base rotation and scale.
pub fn logo_scene(
    scene_config: &SceneConfig,
    logo_config: &LogoConfig,
    width: u32,
    height: u32,
) -> (Scene, Camera, NodeId) {
    let mut scene = Scene::new();
    for light in lights_for(scene_config) {
        scene.add_light(light);
    }
    let mut logo = build_logo(logo_config);
    logo.rotation = scene_config.logo_base_rotation;
    logo.scale = scene_config.logo_scale;
    let id = scene.add_group(logo);
    (scene, camera_for(scene_config, width, height), id)
}
