use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in original-image pixel coordinates (x1 < x2, y1 < y2).
/// The detector clamps coordinates to the image bounds before handing them
/// over, so they are not re-validated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

/// One candidate object as reported by the external detector.
/// `class_id` is a positional reference into the session's class catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub bbox: BoundingBox,
    pub class_id: u32,
    pub confidence: f32,
}

/// Full inference result for one image, as produced by the detector service.
/// Boxes are already in the original image's coordinate space; `width` and
/// `height` are the original pixel dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorOutput {
    pub width: u32,
    pub height: u32,
    pub detections: Vec<RawDetection>,
}

impl DetectorOutput {
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        serde_json::from_reader(reader).context("failed to parse detector output")
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open detections file {}", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("invalid detections file {}", path.display()))
    }
}
