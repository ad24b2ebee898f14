//! Brings a reconstructed point cloud and its camera trajectory into one
//! metrically consistent frame.
//!
//! The capture pipeline exports the point cloud re-centered at the origin but
//! leaves the camera trajectory in the original reconstruction frame, so the
//! two disagree about where "zero" is. This crate resolves the disagreement in
//! two stages:
//!
//! * [`normalize_point_cloud`] computes the cloud's centroid and a uniform
//!   scale that brings its largest extent to
//!   [`TARGET_EXTENT`](scanview_core::TARGET_EXTENT), producing the
//!   [`NormalizationTransform`](scanview_core::NormalizationTransform) every
//!   other stage shares.
//! * [`align_trajectory`] pushes every camera position through the *same*
//!   center/scale pipeline and then translates the whole trajectory so the
//!   camera centroid lands on the point-cloud centroid (the origin of
//!   normalized space). Alignment is a pure translation; camera orientations
//!   are untouched.
//!
//! Both clouds and cameras come from one consistent reconstruction, so a
//! translation is all that is ever needed; the residual distance between the
//! aligned camera centroid and the origin is zero by construction, and a
//! nonzero residual indicates a bug in the transform pipeline rather than bad
//! input data.

mod align;
mod normalize;

pub use align::*;
pub use normalize::*;
