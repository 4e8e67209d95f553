//! Entities and the entity layer

use crate::tags;
use serde::{Deserialize, Serialize};

/// A dynamic object placed in the world.
///
/// Only the generic movement/state fields below are persisted. Runtime
/// state such as sprites, animators, and collision boxes is rebuilt by the
/// factory that produced the entity, after these fields are restored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    /// Type tag used as the factory key when the entity is reconstructed.
    pub tag: String,
    pub name: String,
    pub id: i32,
    /// Position on the tile grid [x, y].
    pub grid_position: [f32; 2],
    /// Position in world coordinates [x, y].
    pub world_position: [f32; 2],
    /// World position on the previous frame.
    pub previous_position: [f32; 2],
    /// Position projected to the screen.
    pub screen_position: [f32; 2],
    /// Offset of the collision box from the world position.
    pub collision_offset: [f32; 2],
    /// Distance past the screen edges before the entity counts as off-screen.
    pub offscreen_range: [f32; 2],
    /// Facing direction (unit-ish vector).
    pub facing: [f32; 2],
    pub velocity: [f32; 2],
    pub acceleration: [f32; 2],
    /// Offset applied when y-sorting against other entities.
    pub y_sort_offset: f32,
    pub active: bool,
    pub visible: bool,
    pub alive: bool,
}

impl Entity {
    pub fn new(name: String, id: i32) -> Self {
        Self {
            tag: tags::ENTITY.to_string(),
            name,
            id,
            grid_position: [0.0, 0.0],
            world_position: [0.0, 0.0],
            previous_position: [0.0, 0.0],
            screen_position: [0.0, 0.0],
            collision_offset: [0.0, 0.0],
            offscreen_range: [0.0, 0.0],
            facing: [0.0, 1.0],
            velocity: [0.0, 0.0],
            acceleration: [0.0, 0.0],
            y_sort_offset: 0.0,
            active: true,
            visible: true,
            alive: true,
        }
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(String::new(), 0)
    }
}

/// Ordered collection of entities belonging to a map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityLayer {
    /// Type tag used as the factory key when the layer is reconstructed.
    pub tag: String,
    pub name: String,
    pub entities: Vec<Entity>,
}

impl EntityLayer {
    pub fn new(name: String) -> Self {
        Self {
            tag: tags::ENTITY_LAYER.to_string(),
            name,
            entities: Vec::new(),
        }
    }

    /// Add an entity, keeping insertion order.
    pub fn add(&mut self, entity: Entity) {
        self.entities.push(entity);
    }
}

impl Default for EntityLayer {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_defaults() {
        let entity = Entity::new("ball".to_string(), 3);
        assert_eq!(entity.tag, tags::ENTITY);
        assert_eq!(entity.name, "ball");
        assert_eq!(entity.id, 3);
        assert!(entity.active);
        assert!(entity.visible);
        assert!(entity.alive);
        assert_eq!(entity.facing, [0.0, 1.0]);
    }

    #[test]
    fn test_entity_layer_keeps_order() {
        let mut layer = EntityLayer::new("actors".to_string());
        layer.add(Entity::new("a".to_string(), 0));
        layer.add(Entity::new("b".to_string(), 1));

        assert_eq!(layer.entities.len(), 2);
        assert_eq!(layer.entities[0].name, "a");
        assert_eq!(layer.entities[1].name, "b");
    }
}
