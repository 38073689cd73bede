// Host-side tests for scene construction, materials and card geometry.

use floating_card::core::{
    box_geometry, edge_roughness, face_roughness, CardConfig, CardMesh, MaterialChanges,
    MaterialSlot, MountRect, Scene, FACE_MATERIALS,
};
use glam::Vec3;

#[test]
fn face_table_maps_sides_to_edge_and_front_back_to_face() {
    assert_eq!(&FACE_MATERIALS[..4], &[MaterialSlot::Edge; 4]);
    assert_eq!(&FACE_MATERIALS[4..], &[MaterialSlot::Face; 2]);
}

#[test]
fn scene_frames_card_for_mount_aspect() {
    let scene = Scene::build(&CardConfig::default(), &MountRect::new(0.0, 0.0, 800.0, 400.0));
    assert!((scene.camera.aspect - 2.0).abs() < 1e-6);
    assert!((scene.camera.eye - Vec3::new(0.0, 0.0, 3.2)).length() < 1e-6);
    assert!((scene.camera.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    assert_eq!(scene.card.size, Vec3::new(2.5, 3.5, 0.05));
}

#[test]
fn light_rig_has_fixed_directional_lights() {
    let scene = Scene::build(&CardConfig::default(), &MountRect::new(0.0, 0.0, 1.0, 1.0));
    let l = &scene.lights;
    assert_eq!(l.ambient.intensity, 0.3);
    assert_eq!(l.key.intensity, 1.2);
    assert_eq!(l.fill.intensity, 0.7);
    assert_eq!(l.rim.intensity, 0.8);
    assert_eq!(l.key.position, Vec3::new(2.0, 2.0, 5.0));
    assert_eq!(l.highlight.position, Vec3::new(2.0, 1.0, 3.0));
}

#[test]
fn materials_derive_from_config() {
    let c = CardConfig::default();
    let card = CardMesh::new(&c);
    let face = card.material(MaterialSlot::Face);
    let edge = card.material(MaterialSlot::Edge);
    assert!((face.roughness - 0.1).abs() < 1e-6);
    assert!((edge.roughness - 0.1).abs() < 1e-6);
    assert!((face.reflectivity - 0.7).abs() < 1e-6);
    assert!((edge.reflectivity - 0.63).abs() < 1e-6);
    assert!((edge.env_intensity - 0.96).abs() < 1e-6);
    assert_ne!(face.color, edge.color);
    assert_eq!(card.face_material(4), face);
    assert_eq!(card.face_material(0), edge);
}

#[test]
fn edge_roughness_has_floor() {
    assert!((face_roughness(0.95) - 0.05).abs() < 1e-6);
    assert!((edge_roughness(0.95) - 0.1).abs() < 1e-6);
    assert!((edge_roughness(0.3) - 0.7).abs() < 1e-6);
}

#[test]
fn material_changes_touch_only_flagged_fields() {
    let mut c = CardConfig::default();
    let mut card = CardMesh::new(&c);
    let before = *card.material(MaterialSlot::Edge);
    c.card_color = 0xff0000;
    c.glossiness = 0.2; // changed in config but not flagged
    card.apply_material_changes(
        &c,
        MaterialChanges {
            card_color: true,
            ..Default::default()
        },
    );
    let face = card.material(MaterialSlot::Face);
    assert!((face.color - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    assert!((face.roughness - 0.1).abs() < 1e-6);
    assert_eq!(*card.material(MaterialSlot::Edge), before);
}

#[test]
fn box_geometry_has_four_vertices_per_face() {
    let (vertices, indices) = box_geometry(Vec3::new(2.5, 3.5, 0.05));
    assert_eq!(vertices.len(), 24);
    assert_eq!(indices.len(), 36);
    assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    for v in &vertices {
        let p = Vec3::from_array(v.position);
        assert!((p.x.abs() - 1.25).abs() < 1e-6);
        assert!((p.y.abs() - 1.75).abs() < 1e-6);
        assert!((p.z.abs() - 0.025).abs() < 1e-6);
    }
    let face_tagged = vertices
        .iter()
        .filter(|v| v.material == MaterialSlot::Face as u32)
        .count();
    assert_eq!(face_tagged, 8);
}

#[test]
fn box_triangles_wind_counter_clockwise_from_outside() {
    let (vertices, indices) = box_geometry(Vec3::ONE);
    for tri in indices.chunks(3) {
        let a = Vec3::from_array(vertices[tri[0] as usize].position);
        let b = Vec3::from_array(vertices[tri[1] as usize].position);
        let c = Vec3::from_array(vertices[tri[2] as usize].position);
        let n = Vec3::from_array(vertices[tri[0] as usize].normal);
        assert!((b - a).cross(c - a).dot(n) > 0.0);
    }
}

#[test]
fn model_matrix_applies_rotation_and_float() {
    let mut card = CardMesh::new(&CardConfig::default());
    card.position.y = 0.1;
    card.rotation = glam::Vec2::new(0.0, std::f32::consts::FRAC_PI_2);
    let m = card.model_matrix();
    let p = m.transform_point3(Vec3::X);
    // Quarter turn about y takes +X to -Z
    assert!((p - Vec3::new(0.0, 0.1, -1.0)).length() < 1e-5);
}
