pub mod image_io;

pub use image_io::{
    decode_bytes, load_rgba, load_source, load_source_image, probe_dimensions, save_composite,
};
