//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: физическое тело персонажа (Dude), здоровье (Health)
//! - movement: velocity тела (PhysicsBody)

pub mod actor;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
