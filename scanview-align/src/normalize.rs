use log::warn;
use scanview_core::nalgebra::{Point3, Vector3};
use scanview_core::{NormalizationTransform, PointCloud, SceneBounds, TARGET_EXTENT};

/// The outcome of normalizing a point cloud.
///
/// `degenerate` flags a cloud whose points are all coincident (or absent), in
/// which case the scale falls back to `1.0` instead of dividing by zero.
/// Normalization never hard-fails; a degenerate scan still loads, it just
/// cannot be meaningfully scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub transform: NormalizationTransform,
    pub degenerate: bool,
}

/// Computes the canonical transform that centers a point cloud on its centroid
/// and uniformly scales its largest extent to
/// [`TARGET_EXTENT`](scanview_core::TARGET_EXTENT).
///
/// The center is the arithmetic mean of all positions, not the bounding-box
/// center: the trajectory aligner centers the cameras on *their* mean, and the
/// two stages must agree on center-of-mass semantics or the alignment residual
/// stops being zero. The returned bounds are the axis-aligned box of the
/// normalized cloud, which later acts as the acceptance region for
/// depth-derived labels.
pub fn normalize_point_cloud(cloud: &PointCloud) -> Normalization {
    let positions = cloud.positions();
    if positions.is_empty() {
        warn!("normalizing an empty point cloud; using the identity transform");
        let origin = Point3::origin();
        return Normalization {
            transform: NormalizationTransform {
                center: origin,
                scale: 1.0,
                bounds: SceneBounds {
                    min: origin,
                    max: origin,
                },
            },
            degenerate: true,
        };
    }

    let center = centroid(positions);
    let centered: Vec<Point3<f64>> = positions.iter().map(|p| (p - center).into()).collect();
    // from_points is infallible here since positions is non-empty.
    let centered_bounds = SceneBounds::from_points(&centered).unwrap();
    let max_extent = centered_bounds.max_extent();

    let (scale, degenerate) = if max_extent > 0.0 {
        (TARGET_EXTENT / max_extent, false)
    } else {
        warn!("point cloud has zero extent ({} coincident points); scale falls back to 1", positions.len());
        (1.0, true)
    };

    Normalization {
        transform: NormalizationTransform {
            center,
            scale,
            bounds: centered_bounds.scaled(scale),
        },
        degenerate,
    }
}

/// Arithmetic mean of a non-empty set of points.
pub(crate) fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Point3::from(sum / points.len() as f64)
}
