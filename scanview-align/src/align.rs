use crate::normalize::centroid;
use log::{debug, error, warn};
use scanview_core::nalgebra::{Point3, Vector3};
use scanview_core::{
    AlignedCameraPose, NormalizationTransform, RawCameraPose, SceneBounds, TrajectoryRecord,
};

/// The ceiling on the post-alignment distance between the camera centroid and
/// the origin, in normalized units. The alignment construction makes the
/// residual zero up to floating-point summation error; anything above this is
/// a pipeline bug, not misaligned input.
pub const RESIDUAL_EPSILON: f64 = 1e-4;

/// A trajectory parsed from exported records, with degenerate records dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTrajectory {
    /// Valid poses in capture order.
    pub poses: Vec<RawCameraPose>,
    /// How many records were dropped (wrong pose array length or degenerate
    /// matrix). Retained for "N of M" reporting.
    pub skipped: usize,
}

/// Parses trajectory records into raw camera poses, preserving capture order.
///
/// Each record resolves the pose array's storage-order ambiguity and is
/// decomposed into position and rotation. A malformed record is dropped with
/// a warning and counted; it never aborts the rest of the trajectory.
pub fn parse_trajectory(records: &[TrajectoryRecord]) -> ParsedTrajectory {
    let mut poses = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for record in records {
        match RawCameraPose::from_flat(record.frame_id, &record.pose) {
            Ok(pose) => poses.push(pose),
            Err(err) => {
                warn!("dropping pose for frame {}: {}", record.frame_id, err);
                skipped += 1;
            }
        }
    }
    debug!(
        "parsed {} of {} trajectory records",
        poses.len(),
        records.len()
    );
    ParsedTrajectory { poses, skipped }
}

/// The aligned trajectory plus the diagnostics the caller needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    /// The pure translation applied after centering and scaling, in
    /// normalized units. Label localization applies this same vector to
    /// depth-derived world points.
    pub translation: Vector3<f64>,
    /// Poses in capture order with positions in normalized space.
    pub aligned_poses: Vec<AlignedCameraPose>,
    /// Post-alignment distance from the camera centroid to the origin.
    pub residual_error: f64,
}

/// Aligns a camera trajectory with a normalized point cloud.
///
/// The point cloud's centroid sits at the origin of normalized space, so the
/// cameras are first pushed through the identical center/scale pipeline and
/// then translated by the negated scaled camera centroid:
///
/// ```text
/// aligned = (raw - transform.center) * transform.scale + translation
/// translation = -((camera_centroid - transform.center) * transform.scale)
/// ```
///
/// Both the cloud and the cameras must go through the *same* center and scale
/// before the translation is computed; skipping either on one side leaves a
/// nonzero residual. Rotations are never modified.
pub fn align_trajectory(
    poses: &[RawCameraPose],
    transform: &NormalizationTransform,
) -> AlignmentResult {
    if poses.is_empty() {
        return AlignmentResult {
            translation: Vector3::zeros(),
            aligned_poses: Vec::new(),
            residual_error: 0.0,
        };
    }

    let positions: Vec<Point3<f64>> = poses.iter().map(|pose| pose.position).collect();
    let camera_centroid = centroid(&positions);
    let translation = -transform.apply(&camera_centroid).coords;

    let aligned_poses: Vec<AlignedCameraPose> = poses
        .iter()
        .map(|pose| AlignedCameraPose {
            frame_id: pose.frame_id,
            position: transform.apply(&pose.position) + translation,
            rotation: pose.rotation,
            matrix: pose.matrix,
        })
        .collect();

    let aligned_positions: Vec<Point3<f64>> =
        aligned_poses.iter().map(|pose| pose.position).collect();
    let residual_error = centroid(&aligned_positions).coords.norm();
    if residual_error > RESIDUAL_EPSILON {
        error!(
            "alignment residual {} exceeds {}; the transform pipeline is inconsistent",
            residual_error, RESIDUAL_EPSILON
        );
        debug_assert!(
            residual_error <= RESIDUAL_EPSILON,
            "alignment residual {} exceeds {}",
            residual_error,
            RESIDUAL_EPSILON
        );
    }

    if let Some(bounds) = SceneBounds::from_points(&aligned_positions) {
        debug!(
            "aligned {} cameras; position bounds x [{:.2}, {:.2}] y [{:.2}, {:.2}] z [{:.2}, {:.2}]",
            aligned_poses.len(),
            bounds.min.x, bounds.max.x,
            bounds.min.y, bounds.max.y,
            bounds.min.z, bounds.max.z,
        );
    }

    AlignmentResult {
        translation,
        aligned_poses,
        residual_error,
    }
}
