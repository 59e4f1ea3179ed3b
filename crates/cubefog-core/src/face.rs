use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the six axis-aligned cube map faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum CubeFace {
    PositiveX = 0,
    NegativeX = 1,
    PositiveY = 2,
    NegativeY = 3,
    PositiveZ = 4,
    NegativeZ = 5,
}

/// All six faces in axis order.
pub const ALL_FACES: [CubeFace; 6] = [
    CubeFace::PositiveX,
    CubeFace::NegativeX,
    CubeFace::PositiveY,
    CubeFace::NegativeY,
    CubeFace::PositiveZ,
    CubeFace::NegativeZ,
];

/// Horizontal slot of each face in a stitched strip, left to right.
///
/// This is the layout the cube importer slices the strip with: the upward
/// view sits in slot 2, the downward view in slot 3.
pub const FACE_SLOT_ORDER: [CubeFace; 6] = [
    CubeFace::PositiveX,
    CubeFace::NegativeX,
    CubeFace::PositiveY,
    CubeFace::NegativeY,
    CubeFace::PositiveZ,
    CubeFace::NegativeZ,
];

impl CubeFace {
    /// Unit vector pointing out of this face. Y-up.
    pub fn axis(self) -> Vec3 {
        match self {
            CubeFace::PositiveX => Vec3::X,
            CubeFace::NegativeX => Vec3::NEG_X,
            CubeFace::PositiveY => Vec3::Y,
            CubeFace::NegativeY => Vec3::NEG_Y,
            CubeFace::PositiveZ => Vec3::Z,
            CubeFace::NegativeZ => Vec3::NEG_Z,
        }
    }

    /// Tag used in artifact file names, e.g. `X_POS`.
    pub fn tag(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "X_POS",
            CubeFace::NegativeX => "X_NEG",
            CubeFace::PositiveY => "Y_POS",
            CubeFace::NegativeY => "Y_NEG",
            CubeFace::PositiveZ => "Z_POS",
            CubeFace::NegativeZ => "Z_NEG",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        ALL_FACES.into_iter().find(|face| face.tag() == tag)
    }

    /// Strip slot index of this face (see [`FACE_SLOT_ORDER`]).
    pub fn slot(self) -> usize {
        match self {
            CubeFace::PositiveX => 0,
            CubeFace::NegativeX => 1,
            CubeFace::PositiveY => 2,
            CubeFace::NegativeY => 3,
            CubeFace::PositiveZ => 4,
            CubeFace::NegativeZ => 5,
        }
    }

    pub fn from_slot(slot: usize) -> Option<Self> {
        FACE_SLOT_ORDER.get(slot).copied()
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CubeFace::PositiveX => "+X",
            CubeFace::NegativeX => "-X",
            CubeFace::PositiveY => "+Y",
            CubeFace::NegativeY => "-Y",
            CubeFace::PositiveZ => "+Z",
            CubeFace::NegativeZ => "-Z",
        };
        f.write_str(label)
    }
}
