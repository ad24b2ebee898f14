//! Maps between renderer-facing camera handles and the aligned trajectory.
//!
//! The renderer cannot afford to draw every camera of a dense walkthrough, so
//! a decimated subset is selected for display. Selection must never hide the
//! cameras a user actually wants to inspect: any pose whose frame is some
//! label's best view is always displayed, decimation or not. The index also
//! answers "which frame does this camera show" and "what are the previous and
//! next frames" for the frame viewer; neighbors follow *trajectory order*, so
//! a decimated-out pose is still a perfectly good neighbor.

use log::debug;
use scanview_core::{AlignedCameraPose, FrameId};
use std::collections::{BTreeSet, HashMap};

/// Every how many trajectory indices a camera is selected for display. Fixed
/// decimation keeps display cost bounded on long walkthroughs.
pub const DISPLAY_STRIDE: usize = 2;

/// One displayed camera: a stable renderer-facing handle, the index of the
/// underlying pose in the trajectory, and whether the pose's frame is some
/// label's best view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraIndexEntry {
    pub display_handle: u32,
    pub trajectory_index: u32,
    pub is_best_view: bool,
}

/// The display selection over an aligned trajectory plus both lookup maps.
///
/// The whole index is rebuilt whenever the best-view set changes: membership
/// in the displayed set depends on the set as a whole, so incremental updates
/// would have to re-derive the selection anyway. [`CameraIndex::build`] is
/// cheap (one pass over the trajectory) and rebuilding keeps the maps
/// trivially consistent.
#[derive(Debug, Clone, Default)]
pub struct CameraIndex {
    entries: Vec<CameraIndexEntry>,
    handle_to_index: HashMap<u32, u32>,
    /// Frame id of *every* trajectory index, displayed or not, so neighbor
    /// lookups can resolve decimated-out poses.
    frames: Vec<FrameId>,
}

impl CameraIndex {
    /// Builds the index over an aligned trajectory.
    ///
    /// A pose is selected for display when its trajectory index is a multiple
    /// of [`DISPLAY_STRIDE`] or its frame is in `best_views`. Handles are
    /// assigned in selection order.
    pub fn build(poses: &[AlignedCameraPose], best_views: &BTreeSet<FrameId>) -> Self {
        let mut entries = Vec::new();
        let mut handle_to_index = HashMap::new();
        let frames: Vec<FrameId> = poses.iter().map(|pose| pose.frame_id).collect();

        for (trajectory_index, pose) in poses.iter().enumerate() {
            let is_best_view = best_views.contains(&pose.frame_id);
            if trajectory_index % DISPLAY_STRIDE != 0 && !is_best_view {
                continue;
            }
            let display_handle = entries.len() as u32;
            handle_to_index.insert(display_handle, trajectory_index as u32);
            entries.push(CameraIndexEntry {
                display_handle,
                trajectory_index: trajectory_index as u32,
                is_best_view,
            });
        }

        debug!(
            "camera index selected {} of {} poses ({} best views)",
            entries.len(),
            poses.len(),
            best_views.len()
        );
        Self {
            entries,
            handle_to_index,
            frames,
        }
    }

    /// The displayed cameras in handle order.
    pub fn entries(&self) -> &[CameraIndexEntry] {
        &self.entries
    }

    /// Resolves a display handle (from a click or hover) to its trajectory
    /// index.
    pub fn trajectory_index(&self, handle: u32) -> Option<u32> {
        self.handle_to_index.get(&handle).copied()
    }

    /// The frame shown by a trajectory index, displayed or not.
    pub fn frame_id(&self, trajectory_index: u32) -> Option<FrameId> {
        self.frames.get(trajectory_index as usize).copied()
    }

    /// Whether the displayed camera behind a handle is a best-view camera.
    pub fn is_best_view(&self, handle: u32) -> Option<bool> {
        let index = self.trajectory_index(handle)?;
        self.entries
            .iter()
            .find(|entry| entry.trajectory_index == index)
            .map(|entry| entry.is_best_view)
    }

    /// The previous and next trajectory indices of a pose, in capture order.
    ///
    /// Neighbors are defined on the full trajectory, not on the displayed
    /// subset: the frame viewer steps through capture order even when the
    /// neighboring pose was decimated out of display.
    pub fn neighbors(&self, trajectory_index: u32) -> (Option<u32>, Option<u32>) {
        if trajectory_index as usize >= self.frames.len() {
            return (None, None);
        }
        let previous = trajectory_index.checked_sub(1);
        let next = if (trajectory_index as usize) + 1 < self.frames.len() {
            Some(trajectory_index + 1)
        } else {
            None
        };
        (previous, next)
    }
}
