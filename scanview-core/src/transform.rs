use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// The extent of the largest axis of a scan after normalization. Every loaded
/// scan is uniformly scaled so that its biggest dimension equals this value,
/// which keeps camera controls and label sizes consistent across scans of very
/// different physical size.
pub const TARGET_EXTENT: f64 = 10.0;

/// An axis-aligned bounding box in normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl SceneBounds {
    /// Computes the axis-aligned bounding box of the given points, or `None`
    /// if the iterator is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in points {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }

    /// The size of the box along each axis.
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// The largest of the three axis extents.
    pub fn max_extent(&self) -> f64 {
        let e = self.extents();
        e.x.max(e.y).max(e.z)
    }

    /// Whether the point lies inside the box expanded by `margin` on every
    /// side. A small margin tolerates surface noise in depth-derived points
    /// that land just past a wall or floor.
    pub fn contains_with_margin(&self, point: &Point3<f64>, margin: f64) -> bool {
        (0..3).all(|axis| {
            point[axis] >= self.min[axis] - margin && point[axis] <= self.max[axis] + margin
        })
    }

    /// Grows the box uniformly by the given scale factor about the origin.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            min: (self.min.coords * scale).into(),
            max: (self.max.coords * scale).into(),
        }
    }
}

/// The canonical transform from raw reconstruction coordinates into normalized
/// space, produced once per loaded point cloud by the normalizer.
///
/// A raw point `p` maps to normalized space as `(p - center) * scale`. The
/// same `center` and `scale` must be applied to every other artifact of the
/// scan (camera positions, depth-derived label points); mixing a point cloud's
/// transform with a different scan's trajectory produces garbage, which is why
/// loading a new scan creates a fresh `NormalizationTransform` rather than
/// mutating this one.
///
/// `bounds` is the axis-aligned box of the *normalized* point cloud and is the
/// authoritative region inside which any depth-derived label must fall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationTransform {
    pub center: Point3<f64>,
    pub scale: f64,
    pub bounds: SceneBounds,
}

impl NormalizationTransform {
    /// Maps a raw reconstruction-frame point into normalized space.
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        ((point - self.center) * self.scale).into()
    }
}
