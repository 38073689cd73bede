//! Static scene description: camera, light rig, and the two-material card.
//!
//! Nothing here touches the GPU. The web renderer reads these values each
//! frame; the render loop only mutates the card transform and the highlight
//! light position, and `update` only mutates the two materials.

use super::config::{srgb_hex_to_linear, CardConfig, MaterialChanges};
use super::constants::*;
use super::interaction::MountRect;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn framing_card(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_Y_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

/// Light arriving from `position` toward the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    fn from_rig((color, intensity, position): (u32, f32, Vec3)) -> Self {
        Self {
            color: srgb_hex_to_linear(color),
            intensity,
            position,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
    pub position: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub key: DirectionalLight,
    pub fill: DirectionalLight,
    pub rim: DirectionalLight,
    pub highlight: PointLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: srgb_hex_to_linear(AMBIENT_COLOR),
                intensity: AMBIENT_INTENSITY,
            },
            key: DirectionalLight::from_rig(KEY_LIGHT),
            fill: DirectionalLight::from_rig(FILL_LIGHT),
            rim: DirectionalLight::from_rig(RIM_LIGHT),
            highlight: PointLight {
                color: Vec3::ONE,
                intensity: HIGHLIGHT_INTENSITY,
                range: HIGHLIGHT_RANGE,
                position: HIGHLIGHT_CENTER,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialSlot {
    Edge = 0,
    Face = 1,
}

/// Material used by each box face, in +X, -X, +Y, -Y, +Z, -Z order.
pub const FACE_MATERIALS: [MaterialSlot; 6] = [
    MaterialSlot::Edge,
    MaterialSlot::Edge,
    MaterialSlot::Edge,
    MaterialSlot::Edge,
    MaterialSlot::Face,
    MaterialSlot::Face,
];

/// Physically inspired surface parameters. `color` is linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub reflectivity: f32,
    pub env_intensity: f32,
    pub ior: f32,
}

impl Material {
    pub fn face(config: &CardConfig) -> Self {
        Self {
            color: srgb_hex_to_linear(config.card_color),
            roughness: face_roughness(config.glossiness),
            metalness: FACE_METALNESS,
            clearcoat: FACE_CLEARCOAT,
            clearcoat_roughness: FACE_CLEARCOAT_ROUGHNESS,
            reflectivity: config.reflectivity,
            env_intensity: config.env_map_intensity,
            ior: FACE_IOR,
        }
    }

    pub fn edge(config: &CardConfig) -> Self {
        Self {
            color: srgb_hex_to_linear(config.edge_color),
            roughness: edge_roughness(config.glossiness),
            metalness: EDGE_METALNESS,
            clearcoat: EDGE_CLEARCOAT,
            clearcoat_roughness: EDGE_CLEARCOAT_ROUGHNESS,
            reflectivity: config.reflectivity * EDGE_REFLECTIVITY_SCALE,
            env_intensity: config.env_map_intensity * EDGE_ENV_INTENSITY_SCALE,
            ior: EDGE_IOR,
        }
    }
}

#[inline]
pub fn face_roughness(glossiness: f32) -> f32 {
    1.0 - glossiness
}

#[inline]
pub fn edge_roughness(glossiness: f32) -> f32 {
    (1.0 - glossiness).max(EDGE_MIN_ROUGHNESS)
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardMesh {
    pub size: Vec3,
    /// Euler rotation about x then y; z stays zero.
    pub rotation: Vec2,
    pub position: Vec3,
    materials: [Material; 2],
}

impl CardMesh {
    pub fn new(config: &CardConfig) -> Self {
        Self {
            size: config.card_size(),
            rotation: Vec2::ZERO,
            position: Vec3::ZERO,
            materials: [Material::edge(config), Material::face(config)],
        }
    }

    pub fn material(&self, slot: MaterialSlot) -> &Material {
        &self.materials[slot as usize]
    }

    pub fn materials(&self) -> &[Material; 2] {
        &self.materials
    }

    pub fn face_material(&self, face: usize) -> &Material {
        self.material(FACE_MATERIALS[face])
    }

    /// Push the live-mapped fields flagged in `changes` into the materials.
    pub fn apply_material_changes(&mut self, config: &CardConfig, changes: MaterialChanges) {
        let [edge, face] = &mut self.materials;
        if changes.card_color {
            face.color = srgb_hex_to_linear(config.card_color);
        }
        if changes.edge_color {
            edge.color = srgb_hex_to_linear(config.edge_color);
        }
        if changes.glossiness {
            face.roughness = face_roughness(config.glossiness);
            edge.roughness = edge_roughness(config.glossiness);
        }
        if changes.reflectivity {
            face.reflectivity = config.reflectivity;
            edge.reflectivity = config.reflectivity * EDGE_REFLECTIVITY_SCALE;
        }
        if changes.env_map_intensity {
            face.env_intensity = config.env_map_intensity;
            edge.env_intensity = config.env_map_intensity * EDGE_ENV_INTENSITY_SCALE;
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_rotation_translation(rotation, self.position)
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub lights: LightRig,
    pub card: CardMesh,
}

impl Scene {
    pub fn build(config: &CardConfig, mount: &MountRect) -> Self {
        Self {
            camera: Camera::framing_card(mount.aspect()),
            lights: LightRig::default(),
            card: CardMesh::new(config),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CardVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub material: u32,
}

// (normal, u, v) per face with u × v = normal so the quads wind CCW from outside.
const FACE_FRAMES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

/// Box of extent `size` centered at the origin: four vertices and two
/// triangles per face, each vertex tagged with its face's material slot.
pub fn box_geometry(size: Vec3) -> (Vec<CardVertex>, Vec<u16>) {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (face, (normal, u, v)) in FACE_FRAMES.iter().enumerate() {
        let base = vertices.len() as u16;
        for (s, t) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (*normal + *u * s + *v * t) * half;
            vertices.push(CardVertex {
                position: p.to_array(),
                normal: normal.to_array(),
                material: FACE_MATERIALS[face] as u32,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}
