//! Combat systems (strategic layer logic)

mod damage;
mod projectile;
mod swordsman;

#[cfg(test)]
mod swordsman_tests;

// Re-export all systems
pub use damage::*;
pub use projectile::*;
pub use swordsman::*;
