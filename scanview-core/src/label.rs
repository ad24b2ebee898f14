use crate::FrameId;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2d detection bounding box in detection-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    /// The center of the box, which is the pixel whose depth stands in for
    /// the whole detected object.
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// A detected object awaiting 3d localization: the frame the detector chose
/// as the object's best view, plus its bounding box in that frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelCandidate {
    pub frame_id: FrameId,
    pub bbox: BoundingBox,
}

/// A successfully localized object label, in normalized space. Immutable once
/// produced; consumed by the label renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalizedLabel {
    /// Label position in normalized space.
    pub position: Point3<f64>,
    /// The frame whose depth and pose produced the position.
    pub source_frame_id: FrameId,
    /// The aligned position of the source camera, for drawing the
    /// label-to-camera sight line.
    pub source_camera_position: Point3<f64>,
}

/// Why a single label failed to localize. Every variant is a per-label soft
/// failure: the remaining labels in a batch are unaffected, and the caller
/// aggregates these into "N of M labels placed" reporting.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LabelRejection {
    /// No aligned pose exists for the candidate's frame.
    #[error("no camera pose for frame {frame_id}")]
    UnknownFrame { frame_id: FrameId },
    /// The depth provider had no depth map for the frame.
    #[error("no depth map for frame {frame_id}")]
    MissingDepth { frame_id: FrameId },
    /// The intrinsics provider had no intrinsics for the frame.
    #[error("no intrinsics for frame {frame_id}")]
    MissingIntrinsics { frame_id: FrameId },
    /// The bbox center mapped outside the depth map.
    #[error("depth coordinate ({x}, {y}) is outside the depth map")]
    OutOfFrame { x: i64, y: i64 },
    /// The depth sample was outside the plausible indoor range.
    #[error("depth {meters} m is outside the plausible range")]
    ImplausibleDepth { meters: f64 },
    /// The unprojected point fell outside the normalized scene bounds.
    #[error("localized point lies outside the scene bounds")]
    OutOfBounds { position: Point3<f64> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_center() {
        let bbox = BoundingBox {
            x: 10.0,
            y: 20.0,
            w: 4.0,
            h: 8.0,
        };
        assert_eq!(bbox.center(), Point2::new(12.0, 24.0));
    }
}
