// src/session/mod.rs

//! Session layer root module.
//!
//! This module organizes the runtime around the game rules:
//! - The controller actor owning the game state and its timers
//! - The messages it accepts and publishes
//! - The terminal front-end driving it from stdin

pub mod messages;
pub mod controller;
pub mod terminal;

pub use controller::GameController;
