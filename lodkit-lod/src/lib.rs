//! Level-of-detail generation
//!
//! This crate turns selected scene objects into LOD sets:
//! - An ordered list of decimation ratios
//! - A host boundary (`LodHost`, `MeshReducer`) and an in-memory `Scene`
//! - The generator, with optional grid slicing before duplication
//! - Session state, TOML settings and operator commands

pub mod command;
pub mod generator;
pub mod host;
pub mod levels;
pub mod scene;
pub mod session;
pub mod settings;

pub use command::*;
pub use generator::*;
pub use host::*;
pub use levels::*;
pub use scene::*;
pub use session::*;
pub use settings::*;
