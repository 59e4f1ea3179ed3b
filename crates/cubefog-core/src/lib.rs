pub mod constants;
pub mod error;
pub mod face;
pub mod hdr;
pub mod orientation;

pub use error::BakeError;
pub use face::{CubeFace, ALL_FACES, FACE_SLOT_ORDER};
pub use hdr::{FaceImage, HdrPixel, StripImage};
pub use orientation::{capture_poses, Orientation, RotationStep, CAPTURE_STEPS};
