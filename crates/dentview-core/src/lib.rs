pub mod canvas;
pub mod color;
pub mod config;
pub mod consts;
pub mod detection;
pub mod error;
pub mod font;
pub mod geometry;
pub mod io;
pub mod render;
#[cfg(feature = "service")]
pub mod service;
pub mod source;
