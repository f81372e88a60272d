//! Platform-free core of the neuron backdrop: spring-smoothed parallax orbs
//! and a pointer-reactive particle web.

pub mod composer;
pub mod config;
pub mod constants;
pub mod error;
pub mod graph;
pub mod headless;
pub mod host;
pub mod orbs;
pub mod particles;
pub mod pointer;
pub mod spring;
pub mod state;
pub mod surface;
pub mod theme;

pub use composer::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use graph::{edge_alpha, ConnectionGraph, Edge};
pub use host::*;
pub use orbs::*;
pub use particles::*;
pub use pointer::*;
pub use spring::*;
pub use state::*;
pub use surface::*;
pub use theme::*;
