use glam::Vec3;
use id_arena::Id;

#[cfg(test)]
use crate::scene_graph::scene::Scene;
use crate::scene_graph::scene_model::SceneModelId;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

pub struct Object3D {
    pub name: String,
    pub transform: Transform,
    pub model_id: Option<SceneModelId>,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    /// An empty group node, used to animate a whole imported scene at once.
    pub fn group(name: impl Into<String>, translation: Vec3, scale: f32) -> Self {
        let mut transform = Transform::from_translation(translation);
        transform.set_scale(scale);

        Self {
            name: name.into(),
            transform,
            ..Default::default()
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    #[cfg(test)]
    pub fn parent<'a>(&self, scene: &'a Scene) -> Option<&'a Object3D> {
        self.parent_id.and_then(|id| scene.get_object(id))
    }

    #[cfg(test)]
    pub fn children<'a, 'b>(&'a self, scene: &'b Scene) -> impl Iterator<Item = &'b Object3D> + 'b
    where
        'a: 'b,
    {
        self.child_ids
            .iter()
            .filter_map(move |id| scene.get_object(*id))
    }

    /// World-space origin as of the last `Scene::late_update`.
    #[cfg(test)]
    pub fn world_position(&self) -> Vec3 {
        self.transform.get_world_matrix().transform_point3(Vec3::ZERO)
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Transform::from_translation(Vec3::ZERO),
            model_id: None,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }
}
