//! Combat components

pub mod projectile;
pub mod stamina;
pub mod state;
pub mod swing;
pub mod swordsman;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod projectile_tests;

// Re-export all components
pub use projectile::*;
pub use stamina::*;
pub use state::*;
pub use swing::*;
pub use swordsman::*;
