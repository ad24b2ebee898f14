use crate::{FrameId, Intrinsics};
use serde::{Deserialize, Serialize};

/// One record of the exported trajectory description: a frame identifier plus
/// the flat 16-element camera-to-world pose array, in capture order.
///
/// The field names mirror the capture pipeline's JSON export, where the frame
/// identifier doubles as the timestamp-derived filename stem used by the
/// external frame and depth loaders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    #[serde(rename = "frame_index")]
    pub frame_id: FrameId,
    /// Flat 4x4 pose, storage order not guaranteed by the exporter.
    #[serde(rename = "cameraPoseARFrame")]
    pub pose: Vec<f64>,
    /// Row-major 3x3 intrinsics matrix of the frame's image, if exported.
    #[serde(default)]
    pub intrinsics: Option<[f64; 9]>,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub timestamp: u64,
}

impl TrajectoryRecord {
    /// Expands the exported 3x3 intrinsics matrix into [`Intrinsics`] for a
    /// detection image of the given dimensions. The matrix is row-major, so
    /// `fx`, `cx`, `fy`, `cy` live at elements 0, 2, 4, and 5.
    pub fn detection_intrinsics(&self, width: u32, height: u32) -> Option<Intrinsics> {
        self.intrinsics.map(|k| Intrinsics {
            fx: k[0],
            fy: k[4],
            cx: k[2],
            cy: k[5],
            width,
            height,
        })
    }
}

/// The trajectory description as exported by the capture pipeline.
///
/// `scan_folder` is an opaque base path for the external frame and depth
/// loaders; this core carries it through without interpreting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryFile {
    #[serde(default)]
    pub scan_folder: Option<String>,
    pub frame_count: usize,
    pub poses: Vec<TrajectoryRecord>,
}

impl TrajectoryFile {
    /// Restores capture order for records that arrived unsorted. The exporter
    /// normally sorts by timestamp already, so this is a no-op in the common
    /// case.
    pub fn sort_by_timestamp(&mut self) {
        self.poses.sort_by_key(|record| record.timestamp);
    }
}
