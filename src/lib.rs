pub mod classes;
pub mod detection;
pub mod engine;
pub mod error;
pub mod models;
pub mod render;

pub use classes::ClassNameTable;
pub use detection::{Candidate, Detector, decode_output};
pub use engine::{RawOutput, SsdNetwork};
pub use error::DnnError;
pub use models::{BoundingBox, Detection};
pub use render::Renderer;

#[cfg(feature = "gui")]
pub mod gui;
