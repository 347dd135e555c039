//! Scene: the ordered collection of model instances and lights rendering
//! operates over. Built once, then immutable for the duration of a render.

use crate::geometry::model::ModelInstance;
use crate::math::{Aabb, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec3,
    pub intensity: Vec3,
}

#[derive(Default)]
pub struct Scene {
    pub models: Vec<ModelInstance>,
    pub lights: Vec<Light>,
    pub aabb: Aabb,
}

impl Scene {
    pub fn new() -> Scene {
        Scene { models: Vec::new(), lights: Vec::new(), aabb: Aabb::empty() }
    }

    pub fn add_model(&mut self, instance: ModelInstance) {
        self.aabb.expand(&instance.aabb);
        self.models.push(instance);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }
}
