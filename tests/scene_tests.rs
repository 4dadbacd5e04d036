//! Scene Graph Tests
//!
//! Tests for:
//! - World matrix propagation through the hierarchy
//! - Attach/remove semantics (components cleaned up with nodes)
//! - NodeBuilder wiring
//! - Camera aspect updates and look_at
//! - Light iteration with world transforms

use glam::Vec3;

use heartfield::assets::AssetServer;
use heartfield::resources::material::Material;
use heartfield::resources::mesh::Mesh;
use heartfield::resources::primitives::{SphereOptions, create_sphere};
use heartfield::scene::{Camera, Light, Node, Scene, Transform};

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

#[test]
fn world_matrix_propagates_to_children() {
    let mut scene = Scene::new();

    let mut parent = Node::new("parent");
    parent.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let parent_key = scene.add_node(parent);

    let mut child = Node::new("child");
    child.transform.position = Vec3::new(0.0, 2.0, 0.0);
    let child_key = scene.add_to_parent(child, parent_key);

    scene.update_world_matrices();

    let child_world: Vec3 = scene
        .get_node(child_key)
        .unwrap()
        .world_matrix()
        .translation
        .into();
    assert!(vec3_approx(child_world, Vec3::new(1.0, 2.0, 0.0)));
}

#[test]
fn scaled_parent_scales_child_translation() {
    let mut scene = Scene::new();

    let mut parent = Node::new("parent");
    parent.transform.scale = Vec3::splat(2.0);
    let parent_key = scene.add_node(parent);

    let mut child = Node::new("child");
    child.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let child_key = scene.add_to_parent(child, parent_key);

    scene.update_world_matrices();

    let child_world: Vec3 = scene
        .get_node(child_key)
        .unwrap()
        .world_matrix()
        .translation
        .into();
    assert!(vec3_approx(child_world, Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn attach_reparents_node() {
    let mut scene = Scene::new();

    let a = scene.add_node(Node::new("a"));
    let b = scene.add_node(Node::new("b"));
    let c = scene.add_to_parent(Node::new("c"), a);

    scene.attach(c, b);

    assert_eq!(scene.get_node(c).unwrap().parent(), Some(b));
    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[c]);
}

#[test]
fn remove_node_cleans_up_subtree_and_components() {
    let assets = AssetServer::new();
    let mut scene = Scene::new();

    let geometry = assets.add_geometry(create_sphere(&SphereOptions::default()));
    let material = assets.add_material(Material::new_standard(
        Vec3::ONE,
        0.0,
        0.5,
        Vec3::ZERO,
    ));

    let root = scene.add_node(Node::new("root"));
    scene.add_mesh_to_parent(Mesh::new(geometry, material), root);
    scene.add_light_to_parent(Light::new_point(Vec3::ONE, 1.0, 5.0), root);

    assert_eq!(scene.meshes.len(), 1);
    assert_eq!(scene.lights.len(), 1);
    assert_eq!(scene.node_count(), 3);

    scene.remove_node(root);

    assert_eq!(scene.meshes.len(), 0);
    assert_eq!(scene.lights.len(), 0);
    assert_eq!(scene.node_count(), 0);

    // Removing again is a no-op.
    scene.remove_node(root);
}

#[test]
fn node_builder_wires_parent_and_transform() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("parent"));

    let key = scene
        .build_node("built")
        .with_position(Vec3::new(1.0, 2.0, 3.0))
        .with_scale(2.0)
        .with_parent(parent)
        .build();

    let node = scene.get_node(key).unwrap();
    assert_eq!(node.parent(), Some(parent));
    assert!(vec3_approx(node.transform.position, Vec3::new(1.0, 2.0, 3.0)));
    assert!(vec3_approx(node.transform.scale, Vec3::splat(2.0)));
    assert!(scene.get_node(parent).unwrap().children().contains(&key));
}

#[test]
fn camera_aspect_update_changes_projection() {
    let mut camera = Camera::new_perspective(75.0, 1.0, 0.1, 1000.0);
    let before = camera.view_projection_matrix();

    camera.set_aspect(2.0);

    assert_eq!(camera.aspect, 2.0);
    assert_ne!(before, camera.view_projection_matrix());
}

#[test]
fn look_at_points_forward_axis_at_target() {
    let mut transform = Transform::new();
    transform.position = Vec3::new(0.0, 0.0, 30.0);
    transform.look_at(Vec3::ZERO, Vec3::Y);

    // -Z is the forward axis; rotated it must aim at the origin.
    let forward = transform.rotation * Vec3::NEG_Z;
    let expected = (Vec3::ZERO - transform.position).normalize();
    assert!(vec3_approx(forward, expected));
}

#[test]
fn iter_active_lights_reports_world_positions() {
    let mut scene = Scene::new();

    let group = scene.add_node({
        let mut n = Node::new("group");
        n.transform.position = Vec3::new(5.0, 0.0, 0.0);
        n
    });
    let light = scene.add_light_to_parent(Light::new_point(Vec3::ONE, 1.0, 10.0), group);
    if let Some(node) = scene.get_node_mut(light) {
        node.transform.position = Vec3::new(0.0, 1.0, 0.0);
    }

    scene.update_world_matrices();

    let collected: Vec<Vec3> = scene
        .iter_active_lights()
        .map(|(_, world)| world.translation.into())
        .collect();
    assert_eq!(collected.len(), 1);
    assert!(vec3_approx(collected[0], Vec3::new(5.0, 1.0, 0.0)));
}

#[test]
fn invisible_nodes_are_skipped_by_mesh_iteration() {
    let assets = AssetServer::new();
    let mut scene = Scene::new();

    let geometry = assets.add_geometry(create_sphere(&SphereOptions::default()));
    let material = assets.add_material(Material::new_standard(
        Vec3::ONE,
        0.0,
        0.5,
        Vec3::ZERO,
    ));

    let visible = scene.add_mesh(Mesh::new(geometry, material));
    let hidden = scene.add_mesh(Mesh::new(geometry, material));
    scene.get_node_mut(hidden).unwrap().visible = false;

    let keys: Vec<_> = scene.iter_visible_meshes().map(|(k, _, _)| k).collect();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0], visible);
}
