use glam::{EulerRot, Mat4, Quat, Vec3};
use id_arena::Arena;
use std::collections::HashMap;

use crate::math::bounds::AABB;
use crate::model::{Buffers, Model};
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::scene_model::{SceneModel, SceneModelId};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    pub objects: Arena<Object3D>,
    pub models: Arena<SceneModel>,
    gltf_mesh_to_model: HashMap<(String, usize), SceneModelId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            models: Arena::new(),
            gltf_mesh_to_model: HashMap::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    /// Adds an empty root node that imported scenes can be parented to.
    pub fn spawn_group(&mut self, name: &str, translation: Vec3, scale: f32) -> ObjectId {
        self.add_object(Object3D::group(name, translation, scale))
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    #[cfg(test)]
    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn add_model(&mut self, model: SceneModel) -> SceneModelId {
        self.models.alloc(model)
    }

    pub fn get_model(&self, id: SceneModelId) -> Option<&SceneModel> {
        self.models.get(id)
    }

    /// Loads every mesh referenced by a glTF scene without spawning any
    /// objects. Meshes already loaded from `file_name` are reused.
    pub fn load_gltf_meshes(
        &mut self,
        file_name: &str,
        buffers: Buffers,
        scene: &gltf::Scene,
    ) -> anyhow::Result<()> {
        let mut pending: Vec<gltf::Node> = scene.nodes().collect();

        while let Some(node) = pending.pop() {
            if let Some(mesh) = node.mesh() {
                self.gltf_mesh_model(file_name, buffers, mesh, node.name().unwrap_or("Unnamed"))?;
            }
            pending.extend(node.children());
        }

        Ok(())
    }

    /// Spawns every root node of a glTF scene under `parent`. All meshes are
    /// loaded first, so a broken mesh leaves the object arena untouched.
    pub fn spawn_gltf_scene(
        &mut self,
        file_name: &str,
        buffers: Buffers,
        scene: &gltf::Scene,
        parent: Option<ObjectId>,
    ) -> anyhow::Result<Vec<ObjectId>> {
        self.load_gltf_meshes(file_name, buffers, scene)?;

        scene
            .nodes()
            .map(|node| self.spawn_gltf_node(file_name, buffers, &node, parent))
            .collect()
    }

    fn gltf_mesh_model(
        &mut self,
        file_name: &str,
        buffers: Buffers,
        mesh: gltf::Mesh,
        node_name: &str,
    ) -> anyhow::Result<SceneModelId> {
        let key = (file_name.to_string(), mesh.index());

        if let Some(model_id) = self.gltf_mesh_to_model.get(&key).copied() {
            return Ok(model_id);
        }

        let mesh_name = mesh
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("{} (Mesh)", node_name));

        let model = Model::from_gltf(mesh_name, mesh, buffers)?;
        log::debug!(
            "Loaded mesh {} from {}: {} vertices, {} triangles",
            model.name,
            file_name,
            model.vertex_count(),
            model.triangle_count()
        );
        let model_id = self.add_model(SceneModel::new(model));
        self.gltf_mesh_to_model.insert(key, model_id);

        Ok(model_id)
    }

    fn spawn_gltf_node(
        &mut self,
        file_name: &str,
        buffers: Buffers,
        node: &gltf::Node,
        parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let mut object = Object3D::default();
        let node_name = node.name().unwrap_or("Unnamed").to_string();
        let (translation, rotation, scale) = node.transform().decomposed();

        if scale[0] != scale[1] || scale[0] != scale[2] {
            log::warn!(
                "Node {} in {} has non-uniform scale {:?}; using {}",
                node_name,
                file_name,
                scale,
                scale[0]
            );
        }

        let (x, y, z) = Quat::from_array(rotation).to_euler(EulerRot::XYZ);
        object
            .transform
            .set_transform(translation.into(), Vec3::new(x, y, z), scale[0]);

        if let Some(mesh) = node.mesh() {
            object.model_id = Some(self.gltf_mesh_model(file_name, buffers, mesh, &node_name)?);
        }

        object.name = node_name;
        let object_id = self.add_object(object);

        if let Some(parent_id) = parent {
            self.set_object_parent(object_id, Some(parent_id));
        }

        for child in node.children() {
            self.spawn_gltf_node(file_name, buffers, &child, Some(object_id))?;
        }

        Ok(object_id)
    }

    /// Updates all object transforms in hierarchical order
    fn update_transforms(&self) {
        let root_objects = self
            .objects
            .iter()
            .filter(|(_, object)| object.is_root())
            .map(|(id, _)| id);

        for root_id in root_objects {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY);
        }
    }

    fn update_object_transform_recursive(&self, object_id: ObjectId, parent_world_matrix: Mat4) {
        if let Some(object) = self.objects.get(object_id) {
            if object.transform.is_world_dirty() {
                let local_matrix = *object.transform.get_local_matrix();
                let world_matrix = parent_world_matrix * local_matrix;
                object.transform.set_world_matrix(world_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(old_parent_id) = self.objects.get(child_id).and_then(|child| child.parent_id) {
            if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                old_parent.child_ids.retain(|&id| id != child_id);
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent) = new_parent_id.and_then(|id| self.objects.get_mut(id)) {
                new_parent.child_ids.push(child_id);
            }
        }

        self.invalidate_object_hierarchy(child_id);
    }

    /// Writes position and Euler rotation, keeping scale. Returns `false`
    /// if the object no longer exists.
    pub fn set_object_pose(&mut self, object_id: ObjectId, translation: Vec3, rotation: Vec3) -> bool {
        let Some(object) = self.objects.get_mut(object_id) else {
            return false;
        };
        let scale = object.transform.scale();
        object.transform.set_transform(translation, rotation, scale);
        self.invalidate_object_hierarchy(object_id);
        true
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    /// World-space bounds of every mesh at or below `root`, as of the last
    /// `late_update`.
    pub fn subtree_bounds(&self, root: ObjectId) -> Option<AABB> {
        let object = self.objects.get(root)?;

        let own = object
            .model_id
            .and_then(|id| self.get_model(id))
            .and_then(SceneModel::bounds)
            .map(|bounds| bounds.transformed(&object.transform.get_world_matrix()));

        object
            .child_ids
            .iter()
            .filter_map(|&child_id| self.subtree_bounds(child_id))
            .chain(own)
            .reduce(|bounds, other| bounds.union(&other))
    }

    pub fn early_update(&mut self) {
        for (_, object) in self.objects.iter() {
            object.transform.reset_flags();
        }
    }

    pub fn late_update(&mut self) {
        self.update_transforms();
    }
}
