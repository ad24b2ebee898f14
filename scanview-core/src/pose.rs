use derive_more::{Display, From, Into};
use nalgebra::{Matrix3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The stable identifier of a capture frame.
///
/// This is the key used everywhere a frame is looked up: depth maps,
/// intrinsics, source images, and best-view matching. It is **not** the index
/// of the pose within the trajectory. The trajectory may drop degenerate poses
/// during parsing, so the two diverge in practice and must never be conflated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into, Display, Serialize,
    Deserialize,
)]
pub struct FrameId(pub u64);

/// Reasons a single pose record is dropped during trajectory parsing. These
/// are per-record failures; the rest of the trajectory is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoseParseError {
    /// The flat pose array did not contain exactly 16 elements.
    #[error("pose array has {got} elements, expected 16")]
    WrongLength { got: usize },
    /// The pose matrix contained non-finite values or was not invertible.
    #[error("pose matrix is degenerate")]
    Degenerate,
}

/// Decodes a flat 16-element pose array into a 4x4 camera-to-world matrix.
///
/// The source format does not guarantee whether the 16 floats are stored
/// row-major or column-major, so both hypotheses are decoded and compared:
/// row-major reads the translation from elements (3, 7, 11), column-major
/// from elements (12, 13, 14). Whichever hypothesis yields the larger
/// translation magnitude wins, because the wrong reading folds the real
/// translation into the rotation block and leaves a small or zero apparent
/// translation. Cameras in a capture walkthrough are essentially never at the
/// exact reconstruction origin, so the heuristic is reliable in practice.
pub fn decode_pose_matrix(values: &[f64; 16]) -> Matrix4<f64> {
    let row_major = Matrix4::from_row_slice(values);
    let column_major = Matrix4::from_column_slice(values);
    let row_translation = Vector3::new(values[3], values[7], values[11]);
    let column_translation = Vector3::new(values[12], values[13], values[14]);
    if row_translation.norm_squared() >= column_translation.norm_squared() {
        row_major
    } else {
        column_major
    }
}

/// A camera pose in the original reconstruction frame, parsed from a flat
/// 16-element pose array plus a frame identifier.
///
/// `matrix` is the full camera-to-world matrix exactly as decoded, in raw
/// reconstruction units. Label localization transforms camera-space points
/// through this matrix, so it must stay unscaled and unaligned even after the
/// trajectory itself has been aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCameraPose {
    pub frame_id: FrameId,
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub matrix: Matrix4<f64>,
}

impl RawCameraPose {
    /// Parses a pose from a flat pose array, resolving the storage-order
    /// ambiguity with [`decode_pose_matrix`] and decomposing the result into
    /// position and rotation.
    ///
    /// The decomposition tolerates a uniform scale in the rotation block
    /// (reconstruction exporters occasionally bake one in); the scale is
    /// divided out before extracting the quaternion and is not otherwise
    /// acted upon. Fails if the array length is not 16 or the matrix is
    /// non-finite or non-invertible.
    pub fn from_flat(frame_id: FrameId, values: &[f64]) -> Result<Self, PoseParseError> {
        let values: &[f64; 16] = values
            .try_into()
            .map_err(|_| PoseParseError::WrongLength { got: values.len() })?;
        let matrix = decode_pose_matrix(values);
        if !matrix.iter().all(|v| v.is_finite()) {
            return Err(PoseParseError::Degenerate);
        }

        let linear = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        if linear.determinant().abs() < 1e-12 {
            return Err(PoseParseError::Degenerate);
        }

        let position = Point3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
        let rotation = rotation_of(&linear);
        Ok(Self {
            frame_id,
            position,
            rotation,
            matrix,
        })
    }
}

/// Extracts the rotation from a linear block that may carry a uniform scale.
fn rotation_of(linear: &Matrix3<f64>) -> UnitQuaternion<f64> {
    let scale = linear.column(0).norm();
    let unscaled = linear / scale;
    UnitQuaternion::from_matrix(&unscaled)
}

/// A camera pose whose position has been carried into normalized space:
/// centered and scaled with the point cloud's transform, then translated so
/// that the camera centroid lands on the point-cloud centroid.
///
/// Alignment is a pure translation. `rotation` and `matrix` are byte-for-byte
/// the raw pose's; cameras keep pointing the same direction, only their
/// positions move. The sequence of aligned poses preserves capture order,
/// which previous/next frame lookups depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedCameraPose {
    pub frame_id: FrameId,
    /// Camera position in normalized space.
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
    /// The raw camera-to-world matrix in reconstruction units, untouched by
    /// alignment. Used to carry camera-space points into the raw world frame.
    pub matrix: Matrix4<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Rotation3;

    fn walkthrough_pose() -> Matrix4<f64> {
        let rotation = Rotation3::from_euler_angles(0.1, -0.4, 0.25);
        let mut matrix = rotation.to_homogeneous();
        matrix[(0, 3)] = 1.5;
        matrix[(1, 3)] = -0.7;
        matrix[(2, 3)] = 2.25;
        matrix
    }

    #[test]
    fn row_major_and_column_major_decode_to_the_same_pose() {
        let matrix = walkthrough_pose();
        let row_major: Vec<f64> = (0..4)
            .flat_map(|r| (0..4).map(move |c| (r, c)))
            .map(|(r, c)| matrix[(r, c)])
            .collect();
        let column_major: Vec<f64> = matrix.as_slice().to_vec();

        let from_row = decode_pose_matrix(row_major.as_slice().try_into().unwrap());
        let from_column = decode_pose_matrix(column_major.as_slice().try_into().unwrap());
        assert_relative_eq!(from_row, matrix, epsilon = 1e-12);
        assert_relative_eq!(from_column, matrix, epsilon = 1e-12);
    }

    #[test]
    fn decoded_rotation_is_a_unit_quaternion() {
        let matrix = walkthrough_pose();
        let pose = RawCameraPose::from_flat(FrameId(3), matrix.as_slice()).unwrap();
        assert_relative_eq!(pose.rotation.norm(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(pose.position, Point3::new(1.5, -0.7, 2.25), epsilon = 1e-12);
    }

    #[test]
    fn uniform_scale_in_the_rotation_block_is_divided_out() {
        let mut matrix = walkthrough_pose();
        for r in 0..3 {
            for c in 0..3 {
                matrix[(r, c)] *= 1.3;
            }
        }
        let pose = RawCameraPose::from_flat(FrameId(0), matrix.as_slice()).unwrap();
        assert_relative_eq!(pose.rotation.norm(), 1.0, epsilon = 1e-9);
        let expected = RawCameraPose::from_flat(FrameId(0), walkthrough_pose().as_slice())
            .unwrap()
            .rotation;
        assert_relative_eq!(pose.rotation.angle_to(&expected), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn wrong_length_is_a_structural_error() {
        assert_eq!(
            RawCameraPose::from_flat(FrameId(0), &[0.0; 15]),
            Err(PoseParseError::WrongLength { got: 15 })
        );
    }

    #[test]
    fn degenerate_matrix_is_rejected() {
        assert_eq!(
            RawCameraPose::from_flat(FrameId(0), &[0.0; 16]),
            Err(PoseParseError::Degenerate)
        );
        let mut nan = [0.0; 16];
        nan[0] = f64::NAN;
        assert_eq!(
            RawCameraPose::from_flat(FrameId(0), &nan),
            Err(PoseParseError::Degenerate)
        );
    }
}
