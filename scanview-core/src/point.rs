use nalgebra::Point3;

/// An ordered sequence of reconstructed 3d points, with an optional color per
/// point. Color is an orthogonal attribute carried only for the renderer;
/// nothing in the alignment pipeline reads it.
///
/// A `PointCloud` is immutable once loaded. The normalizer borrows it to
/// compute a [`NormalizationTransform`](crate::NormalizationTransform) and the
/// renderer borrows it afterwards; loading a new scan produces a new instance
/// rather than mutating this one in place.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    positions: Vec<Point3<f64>>,
    colors: Option<Vec<[u8; 3]>>,
}

impl PointCloud {
    /// Creates a point cloud from positions only.
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self {
            positions,
            colors: None,
        }
    }

    /// Creates a point cloud with a color per point.
    ///
    /// # Panics
    ///
    /// Panics if `colors` is not the same length as `positions`.
    pub fn with_colors(positions: Vec<Point3<f64>>, colors: Vec<[u8; 3]>) -> Self {
        assert_eq!(positions.len(), colors.len());
        Self {
            positions,
            colors: Some(colors),
        }
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn colors(&self) -> Option<&[[u8; 3]]> {
        self.colors.as_deref()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromIterator<Point3<f64>> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
