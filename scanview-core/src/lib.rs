//! # Scanview Core
//!
//! This library provides the common types shared by every crate in the scanview
//! workspace: point clouds, the normalization transform that places a scan in a
//! canonical viewing frame, raw and aligned camera poses, per-frame depth maps
//! and intrinsics, and detection label types. The crate is intentionally small
//! and mostly consists of data types; the algorithms that operate on them live
//! in `scanview-align`, `scanview-label`, and `scanview-index`.
//!
//! A scan arrives as two artifacts that disagree about where "zero" is: the
//! exported point cloud is already re-centered at the origin of the
//! reconstruction, while the camera trajectory is exported in the original
//! reconstruction frame. Everything downstream of this crate exists to bring
//! the two (plus 3d label positions derived from per-frame depth) into one
//! *normalized space*: the frame obtained by centering a scan on its centroid
//! and uniformly scaling it to a fixed target extent.
//!
//! Frame identifiers deserve a warning: a [`FrameId`] is the stable key used
//! for depth/intrinsics lookup and best-view matching. It is **not** the index
//! of a pose within the trajectory, and conflating the two is the classic bug
//! in this domain, which is why the identifier is a newtype rather than a bare
//! integer.

mod depth;
mod label;
mod point;
mod pose;
mod trajectory;
mod transform;

pub use depth::*;
pub use label::*;
pub use nalgebra;
pub use point::*;
pub use pose::*;
pub use trajectory::*;
pub use transform::*;
