//! # `scanview`
//!
//! Batteries-included entry point for the scanview engine: takes a
//! reconstructed point cloud and the camera trajectory of the capture that
//! produced it, brings both into one normalized coordinate frame, places
//! semantic object labels in 3d from per-frame 2d detections and depth, and
//! indexes the aligned cameras for display and frame lookup.
//!
//! The core types live in the root of the crate (re-exported from
//! `scanview-core`); each processing stage lives in its own module:
//!
//! * [`align`] - point cloud normalization and trajectory alignment
//! * [`label`] - depth-based 3d label localization
//! * [`index`] - display selection and frame lookup over the trajectory
//!
//! The stages form a one-way pipeline. Normalize the cloud once, align the
//! trajectory against the resulting transform, then hand the shared read-only
//! results to label localization and the camera index:
//!
//! ```
//! use scanview::align::{align_trajectory, normalize_point_cloud, parse_trajectory};
//! use scanview::index::CameraIndex;
//! use scanview::nalgebra::Point3;
//! use scanview::{FrameId, PointCloud, TrajectoryRecord};
//! use std::collections::BTreeSet;
//!
//! let cloud = PointCloud::new(vec![
//!     Point3::new(4.0, 4.0, 4.0),
//!     Point3::new(6.0, 6.0, 6.0),
//! ]);
//! let records: Vec<TrajectoryRecord> = vec![/* exported by the capture pipeline */];
//!
//! let normalization = normalize_point_cloud(&cloud);
//! let parsed = parse_trajectory(&records);
//! let alignment = align_trajectory(&parsed.poses, &normalization.transform);
//! let index = CameraIndex::build(&alignment.aligned_poses, &BTreeSet::<FrameId>::new());
//! ```
//!
//! If you are building a production application, depend on the individual
//! member crates instead so you only pull in the stages you use.

pub use scanview_core::*;

/// Point cloud normalization and camera trajectory alignment
pub mod align {
    pub use scanview_align::*;
}

/// Depth-based 3d localization of detected object labels
pub mod label {
    pub use scanview_label::*;
}

/// Display selection and frame lookup over an aligned trajectory
pub mod index {
    pub use scanview_index::*;
}
