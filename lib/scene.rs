use crate::ray::{Ray, RayHit, HIT_EPSILON};
use crate::surface::SceneObject;

/// Ordered collection of objects. Order breaks ties between equally
/// distant hits: the earlier object wins.
#[derive(Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Scene {
        return Scene { objects: Vec::new() };
    }

    pub fn push(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        return self.objects.len() - 1;
    }

    pub fn len(&self) -> usize {
        return self.objects.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.objects.is_empty();
    }

    pub fn get(&self, index: usize) -> &SceneObject {
        return &self.objects[index];
    }

    /// Nearest object struck by `r` at a distance beyond [`HIT_EPSILON`].
    pub fn closest_hit(&self, r: &Ray) -> Option<RayHit> {
        let mut result: Option<(usize, f32)> = None;

        for (index, obj) in self.objects.iter().enumerate() {
            let Some(t) = obj.surface.intersect(r.origin, r.direction) else {
                continue;
            };
            if t <= HIT_EPSILON {
                continue;
            }
            if result.map_or(true, |(_, nearest)| t < nearest) {
                result = Some((index, t));
            }
        }

        return result.map(|(index, distance)| RayHit { index, point: r.at(distance), distance });
    }
}
