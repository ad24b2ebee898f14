use crate::{localize, LocalizeInputs};
use log::{debug, info};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use scanview_core::nalgebra::Vector3;
use scanview_core::{
    AlignedCameraPose, DepthProvider, FrameId, IntrinsicsProvider, LabelCandidate, LabelRejection,
    LocalizedLabel, NormalizationTransform,
};
use std::collections::HashMap;

/// The aggregate outcome of localizing a batch of candidates. Carries enough
/// to drive "N of M labels placed" reporting: every rejection keeps the index
/// of the candidate it belongs to and the typed reason.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizationReport {
    pub labels: Vec<LocalizedLabel>,
    /// `(candidate index, reason)` for every rejected candidate.
    pub rejections: Vec<(usize, LabelRejection)>,
    pub total: usize,
}

impl LocalizationReport {
    pub fn placed(&self) -> usize {
        self.labels.len()
    }

    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }
}

/// Localizes every candidate against one aligned trajectory.
///
/// Depth maps and intrinsics are pulled per frame from the providers; a
/// provider miss rejects only the labels that needed that frame. Candidates
/// share nothing mutable, so with the `rayon` feature the per-label work runs
/// as a parallel map; the report is identical either way.
pub fn localize_all(
    candidates: &[LabelCandidate],
    poses: &[AlignedCameraPose],
    transform: &NormalizationTransform,
    alignment_translation: Vector3<f64>,
    depths: &(impl DepthProvider + Sync),
    intrinsics: &(impl IntrinsicsProvider + Sync),
) -> LocalizationReport {
    let poses_by_frame: HashMap<FrameId, &AlignedCameraPose> =
        poses.iter().map(|pose| (pose.frame_id, pose)).collect();

    let localize_one = |candidate: &LabelCandidate| -> Result<LocalizedLabel, LabelRejection> {
        let frame_id = candidate.frame_id;
        let pose = poses_by_frame
            .get(&frame_id)
            .ok_or(LabelRejection::UnknownFrame { frame_id })?;
        let depth = depths
            .depth(frame_id)
            .ok_or(LabelRejection::MissingDepth { frame_id })?;
        let frame_intrinsics = intrinsics
            .intrinsics(frame_id)
            .ok_or(LabelRejection::MissingIntrinsics { frame_id })?;
        localize(
            candidate,
            &LocalizeInputs {
                pose,
                depth: &depth,
                intrinsics: &frame_intrinsics,
                transform,
                alignment_translation,
            },
        )
    };

    #[cfg(not(feature = "rayon"))]
    let outcomes: Vec<Result<LocalizedLabel, LabelRejection>> =
        candidates.iter().map(localize_one).collect();

    #[cfg(feature = "rayon")]
    let outcomes: Vec<Result<LocalizedLabel, LabelRejection>> =
        candidates.par_iter().map(localize_one).collect();

    let mut labels = Vec::new();
    let mut rejections = Vec::new();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(label) => labels.push(label),
            Err(rejection) => {
                debug!("label {} rejected: {}", index, rejection);
                rejections.push((index, rejection));
            }
        }
    }

    info!("placed {} of {} labels", labels.len(), candidates.len());
    LocalizationReport {
        labels,
        rejections,
        total: candidates.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanview_core::nalgebra::{Matrix4, Point3, UnitQuaternion};
    use scanview_core::{BoundingBox, DepthFrame, Intrinsics, SceneBounds};

    struct MapDepths(HashMap<FrameId, DepthFrame>);

    impl DepthProvider for MapDepths {
        fn depth(&self, frame_id: FrameId) -> Option<DepthFrame> {
            self.0.get(&frame_id).cloned()
        }
    }

    struct FixedIntrinsics(Intrinsics);

    impl IntrinsicsProvider for FixedIntrinsics {
        fn intrinsics(&self, _frame_id: FrameId) -> Option<Intrinsics> {
            Some(self.0)
        }
    }

    fn pose(frame_id: u64) -> AlignedCameraPose {
        AlignedCameraPose {
            frame_id: FrameId(frame_id),
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            matrix: Matrix4::identity(),
        }
    }

    fn transform() -> NormalizationTransform {
        NormalizationTransform {
            center: Point3::origin(),
            scale: 1.0,
            bounds: SceneBounds {
                min: Point3::new(-50.0, -50.0, -50.0),
                max: Point3::new(50.0, 50.0, 50.0),
            },
        }
    }

    fn candidate(frame_id: u64) -> LabelCandidate {
        LabelCandidate {
            frame_id: FrameId(frame_id),
            bbox: BoundingBox {
                x: -5.0,
                y: -5.0,
                w: 10.0,
                h: 10.0,
            },
        }
    }

    #[test]
    fn batch_reports_per_label_outcomes() {
        let poses = vec![pose(1), pose(2), pose(3)];
        let mut depth_maps = HashMap::new();
        depth_maps.insert(FrameId(1), DepthFrame::new(16, 12, vec![2.0; 16 * 12]));
        // Frame 2 has an edge-invalid (zero) depth everywhere.
        depth_maps.insert(FrameId(2), DepthFrame::new(16, 12, vec![0.0; 16 * 12]));
        // Frame 3 has no depth map at all.
        let depths = MapDepths(depth_maps);
        let intrinsics = FixedIntrinsics(Intrinsics {
            fx: 500.0,
            fy: 500.0,
            cx: 0.0,
            cy: 0.0,
            width: 64,
            height: 48,
        });

        let candidates = vec![candidate(1), candidate(2), candidate(3), candidate(9)];
        let report = localize_all(
            &candidates,
            &poses,
            &transform(),
            Vector3::zeros(),
            &depths,
            &intrinsics,
        );

        assert_eq!(report.total, 4);
        assert_eq!(report.placed(), 1);
        assert_eq!(report.rejected(), 3);
        assert_eq!(report.labels[0].source_frame_id, FrameId(1));
        assert_eq!(
            report.rejections,
            vec![
                (1, LabelRejection::ImplausibleDepth { meters: 0.0 }),
                (2, LabelRejection::MissingDepth { frame_id: FrameId(3) }),
                (3, LabelRejection::UnknownFrame { frame_id: FrameId(9) }),
            ]
        );
    }

    #[test]
    fn empty_batch_is_an_empty_report() {
        let report = localize_all(
            &[],
            &[pose(1)],
            &transform(),
            Vector3::zeros(),
            &MapDepths(HashMap::new()),
            &FixedIntrinsics(Intrinsics {
                fx: 1.0,
                fy: 1.0,
                cx: 0.0,
                cy: 0.0,
                width: 1,
                height: 1,
            }),
        );
        assert_eq!(report.total, 0);
        assert_eq!(report.placed(), 0);
        assert_eq!(report.rejected(), 0);
    }
}
