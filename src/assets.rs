//! glTF import into the scene graph.

use std::path::Path;

use anyhow::Context;
use glam::Vec3;

use crate::scene_graph::{ObjectId, Scene};

/// Imports a glTF/GLB file and parents its default scene to a new group.
///
/// Returns the group, which is what the animation drivers move.
pub fn load_gltf_group(
    scene: &mut Scene,
    group_name: &str,
    path: &Path,
    scale: f32,
) -> anyhow::Result<ObjectId> {
    let (document, buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to import {}", path.display()))?;

    spawn_document(scene, group_name, &path.display().to_string(), &document, &buffers, scale)
}

/// Imports an in-memory glTF/GLB.
pub fn load_gltf_group_from_slice(
    scene: &mut Scene,
    group_name: &str,
    bytes: &[u8],
    scale: f32,
) -> anyhow::Result<ObjectId> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).context("Failed to import embedded glTF")?;

    spawn_document(scene, group_name, group_name, &document, &buffers, scale)
}

fn spawn_document(
    scene: &mut Scene,
    group_name: &str,
    file_name: &str,
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    scale: f32,
) -> anyhow::Result<ObjectId> {
    let gltf_scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .with_context(|| format!("No scenes in {file_name}"))?;

    scene.load_gltf_meshes(file_name, buffers, &gltf_scene)?;
    let group = scene.spawn_group(group_name, Vec3::ZERO, scale);
    let roots = scene.spawn_gltf_scene(file_name, buffers, &gltf_scene, Some(group))?;

    log::info!(
        "Loaded {} ({} root nodes, {} objects in scene)",
        file_name,
        roots.len(),
        scene.object_count()
    );

    Ok(group)
}
