//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only)
//! plus explicit context. Per-run bookkeeping that is not component data
//! (spawn registries) is owned by the engine and passed in.

pub mod cleanup;
pub mod contact;
pub mod health;
pub mod melee;
pub mod movement;
pub mod pickup;
pub mod snapshot;
pub mod spawner;
