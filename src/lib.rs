//! Strikecraft game library
//!
//! A small real-time 3D arena combat game: fly a craft, fight waves of mines
//! and orbiters, and spend score on stat upgrades between fights.  The
//! simulation is headless and lives in [`simulation::SimulationPlugin`]; the
//! binary adds windowing, rendering and sound on top.

pub mod audio;
pub mod body;
pub mod bullet;
pub mod camera;
pub mod catalog;
pub mod collision;
pub mod config;
pub mod constants;
pub mod craft;
pub mod damage;
pub mod enemy;
pub mod error;
pub mod graphics;
pub mod menu;
pub mod rendering;
pub mod session;
pub mod simulation;
pub mod stats;
