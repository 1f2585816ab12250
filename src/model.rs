use anyhow::{bail, Context};
use glam::Vec3;
use gltf::buffer;

use crate::math::bounds::AABB;

pub struct MeshPrimitive {
    pub vertex_count: usize,
    pub index_count: usize,
    pub bounds: AABB,
}

/// Geometry summary of a glTF mesh. Only what the showcase needs for
/// hover bounds and logging is kept; vertex data stays with the file.
pub struct Model {
    pub name: String,
    pub primitives: Vec<MeshPrimitive>,
}

pub type Buffers<'a> = &'a [buffer::Data];

impl Model {
    pub fn from_gltf(
        name: impl Into<String>,
        mesh: gltf::Mesh,
        buffers: Buffers,
    ) -> anyhow::Result<Model> {
        let mut model = Model {
            name: name.into(),
            primitives: Vec::new(),
        };

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                bail!("Unsupported primitive mode: {:?}", primitive.mode());
            }

            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

            let positions = reader
                .read_positions()
                .with_context(|| format!("Primitive without positions in {}", model.name))?
                .map(Vec3::from)
                .collect::<Vec<Vec3>>();

            let bounds = AABB::from_points(positions.iter().copied())
                .with_context(|| format!("Primitive without vertices in {}", model.name))?;

            let index_count = reader
                .read_indices()
                .map(|indices| indices.into_u32().count())
                .unwrap_or(positions.len());

            model.primitives.push(MeshPrimitive {
                vertex_count: positions.len(),
                index_count,
                bounds,
            });
        }

        if model.primitives.is_empty() {
            bail!("Mesh without primitives: {}", model.name);
        }

        Ok(model)
    }

    /// Union of all primitive bounds, in mesh space.
    pub fn bounds(&self) -> Option<AABB> {
        self.primitives
            .iter()
            .map(|primitive| primitive.bounds)
            .reduce(|bounds, other| bounds.union(&other))
    }

    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|primitive| primitive.vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.primitives
            .iter()
            .map(|primitive| primitive.index_count / 3)
            .sum()
    }
}
