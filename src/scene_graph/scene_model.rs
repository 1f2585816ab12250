use id_arena::Id;

use crate::math::bounds::AABB;
use crate::model::Model;

pub type SceneModelId = Id<SceneModel>;

/// A mesh shared by every object that references it.
pub struct SceneModel {
    pub model: Model,
}

impl SceneModel {
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    pub fn bounds(&self) -> Option<AABB> {
        self.model.bounds()
    }
}
