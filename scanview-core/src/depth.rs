use crate::FrameId;
use serde::{Deserialize, Serialize};

/// The ceiling of the plausible metric depth range for an indoor capture, in
/// meters. Depth sensors produce frequent invalid readings at surface edges,
/// and bounding-box centers land on edges all the time; reconstructed values
/// outside `(0, DEPTH_MAX_METERS]` are rejected rather than trusted.
pub const DEPTH_MAX_METERS: f64 = 10.0;

/// One frame's depth map, already decoded to metric meters.
///
/// Decoding the capture pipeline's packed depth encoding back into floats is
/// the loader's job; this core only ever sees finished metric samples. The
/// depth map is typically exported at a lower resolution than the detection
/// image, so consumers scale pixel coordinates before sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthFrame {
    pub width: u32,
    pub height: u32,
    /// Row-major samples, `width * height` of them, in meters.
    pub samples: Vec<f32>,
}

impl DepthFrame {
    /// Creates a depth frame.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != width * height`.
    pub fn new(width: u32, height: u32, samples: Vec<f32>) -> Self {
        assert_eq!(samples.len(), width as usize * height as usize);
        Self {
            width,
            height,
            samples,
        }
    }

    /// Samples the depth at an integer pixel coordinate, or `None` if the
    /// coordinate falls outside `[0, width) x [0, height)`. Coordinates are
    /// signed because they are produced by scaling and flooring a detection
    /// image coordinate, which can legitimately land below zero.
    ///
    /// The fields are public and deserializable, so `samples` is not
    /// guaranteed to match the declared dimensions; a sample past the end of
    /// an undersized buffer is `None` as well.
    pub fn sample(&self, x: i64, y: i64) -> Option<f32> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.samples
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

/// Pinhole intrinsics of one frame's *detection image*, in that image's pixel
/// space. The depth map for the same frame usually has different dimensions;
/// `width`/`height` here are the detection image's, and the ratio between them
/// and the depth map's is what maps detection pixels to depth pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    /// Detection image width in pixels.
    pub width: u32,
    /// Detection image height in pixels.
    pub height: u32,
}

/// Supplies the decoded depth map for a frame on demand.
///
/// File resolution, format probing, and caching are the provider's concern;
/// the localizer just pulls an already-decoded frame per lookup and treats
/// `None` as a per-label structural rejection.
pub trait DepthProvider {
    fn depth(&self, frame_id: FrameId) -> Option<DepthFrame>;
}

/// Supplies the detection-image intrinsics for a frame on demand.
pub trait IntrinsicsProvider {
    fn intrinsics(&self, frame_id: FrameId) -> Option<Intrinsics>;
}
