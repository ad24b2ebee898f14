//! Converts 2d object detections into 3d label positions by unprojecting
//! through per-frame depth.
//!
//! Each detected object comes with the frame chosen as its best view and a
//! bounding box in that frame's detection image. Localization samples the
//! depth map at the box center, reconstructs a metric depth, unprojects the
//! pixel into camera space, carries it through the camera's raw
//! camera-to-world matrix, and finally applies the same center/scale/translate
//! pipeline the trajectory aligner applied, so the label lands in normalized
//! space next to the geometry it belongs to.
//!
//! Every failure along the way is a typed, per-label rejection
//! ([`LabelRejection`](scanview_core::LabelRejection)); one bad label never
//! aborts a batch. The per-label computation shares only read-only state, so
//! [`localize_all`] maps over candidates in parallel when the `rayon` feature
//! is enabled.

mod batch;

pub use batch::*;

use scanview_core::nalgebra::{Point3, Vector3};
use scanview_core::{
    AlignedCameraPose, DepthFrame, Intrinsics, LabelCandidate, LabelRejection, LocalizedLabel,
    NormalizationTransform, DEPTH_MAX_METERS,
};

/// Margin added to the scene bounds when accepting a localized label, in
/// normalized units. Depth noise routinely pushes points on walls and floors
/// slightly past the point cloud's own extent.
pub const BOUNDS_MARGIN: f64 = 0.1;

/// Everything one label localization reads. All fields are shared, read-only
/// state except the depth and intrinsics, which are supplied per frame by the
/// caller (or looked up by [`localize_all`] through the provider traits).
#[derive(Debug, Clone, Copy)]
pub struct LocalizeInputs<'a> {
    /// The aligned pose of the candidate's frame.
    pub pose: &'a AlignedCameraPose,
    /// The frame's depth map, in meters.
    pub depth: &'a DepthFrame,
    /// The frame's intrinsics in detection-image pixel space.
    pub intrinsics: &'a Intrinsics,
    /// The active point-cloud transform.
    pub transform: &'a NormalizationTransform,
    /// The trajectory alignment translation, applied after center/scale.
    pub alignment_translation: Vector3<f64>,
}

/// Localizes one detected object in 3d.
///
/// The steps, in order, with their rejection conditions:
///
/// 1. The bbox center is taken in detection-image pixels.
/// 2. It is mapped into depth-map pixels by the fixed ratio of detection
///    image width to depth map width (the two are proportionally scaled
///    exports of the same sensor, so one axis ratio suffices).
/// 3. The depth map is sampled at the floored coordinate; outside the map is
///    [`OutOfFrame`](LabelRejection::OutOfFrame).
/// 4. The sample must be a plausible indoor depth in
///    `(0, DEPTH_MAX_METERS]` meters; otherwise
///    [`ImplausibleDepth`](LabelRejection::ImplausibleDepth). Edge pixels
///    produce invalid and zero readings constantly, and box centers land on
///    edges often.
/// 5. The pixel is unprojected into camera space. The camera looks down its
///    own -Z axis, so the camera-space z is `-depth`; flipping this sign
///    places every label behind its camera.
/// 6. The camera-space point goes through the *raw* camera-to-world matrix
///    and then through the identical center/scale/translate pipeline the
///    trajectory went through.
/// 7. The result must land inside the scene bounds plus [`BOUNDS_MARGIN`];
///    otherwise [`OutOfBounds`](LabelRejection::OutOfBounds). Points are
///    rejected, never clamped.
pub fn localize(
    candidate: &LabelCandidate,
    inputs: &LocalizeInputs,
) -> Result<LocalizedLabel, LabelRejection> {
    let center = candidate.bbox.center();

    // Detection image and depth map are proportionally scaled, so the width
    // ratio maps between their pixel grids.
    let ratio = inputs.intrinsics.width as f64 / inputs.depth.width as f64;
    let depth_x = (center.x / ratio).floor() as i64;
    let depth_y = (center.y / ratio).floor() as i64;

    let sample = inputs.depth.sample(depth_x, depth_y).ok_or(
        LabelRejection::OutOfFrame {
            x: depth_x,
            y: depth_y,
        },
    )? as f64;

    if !sample.is_finite() || sample <= 0.0 || sample > DEPTH_MAX_METERS {
        return Err(LabelRejection::ImplausibleDepth { meters: sample });
    }

    // Unproject the *detection-image* pixel with the detection-image
    // intrinsics; the depth map was only consulted for the range.
    let camera_point = unproject(center.x, center.y, sample, inputs.intrinsics);
    let world = inputs.pose.matrix * camera_point.to_homogeneous();
    let raw_world = Point3::from(world.xyz() / world.w);

    let position = inputs.transform.apply(&raw_world) + inputs.alignment_translation;

    if !inputs
        .transform
        .bounds
        .contains_with_margin(&position, BOUNDS_MARGIN)
    {
        return Err(LabelRejection::OutOfBounds { position });
    }

    Ok(LocalizedLabel {
        position,
        source_frame_id: candidate.frame_id,
        source_camera_position: inputs.pose.position,
    })
}

/// Unprojects a detection-image pixel at a known metric depth into camera
/// space. The camera looks down -Z.
fn unproject(px: f64, py: f64, depth: f64, intrinsics: &Intrinsics) -> Point3<f64> {
    Point3::new(
        (px - intrinsics.cx) * depth / intrinsics.fx,
        (py - intrinsics.cy) * depth / intrinsics.fy,
        -depth,
    )
}
