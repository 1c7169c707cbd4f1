//! Asset loading
//!
//! Terrain meshes are read from Wavefront OBJ files.

pub mod obj_loader;

pub use obj_loader::{ObjError, ObjLoader};
