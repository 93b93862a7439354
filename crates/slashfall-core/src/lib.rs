//! Core types and definitions for the slashfall simulation.
//!
//! This crate defines the vocabulary shared by the engine and its hosts:
//! the health, damage and progression ledgers, components, commands,
//! state snapshots, events, configuration and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod damage;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod health;
pub mod progression;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
