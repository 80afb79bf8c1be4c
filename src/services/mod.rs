//! Use-case functions bridging routes and the domain/state layer.

pub mod catalog_service;
pub mod documentation;
pub mod game_service;
pub mod health_service;
pub mod pacing;
pub mod suggest_service;
