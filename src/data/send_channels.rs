use crate::common::{DetectError, Detection, RawOutput};

/// One raw tensor queued for post-processing, scaled against `image_width x image_height`.
#[derive(Debug, Clone)]
pub struct DetectionJob {
    pub id: u64,
    pub raw: RawOutput,
    pub image_width: u32,
    pub image_height: u32,
}

#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub id: u64,
    pub result: Result<Vec<Detection>, DetectError>,
}

/// Worker side of the channels.
#[derive(Debug)]
pub struct DetectionState {
    pub job_rx: crossbeam_channel::Receiver<Box<DetectionJob>>,
    pub det_tx: crossbeam_channel::Sender<DetectionOutcome>,
}

/// Caller side of the channels.
#[derive(Debug)]
pub struct SendState {
    pub job_tx: crossbeam_channel::Sender<Box<DetectionJob>>,
    pub det_rx: crossbeam_channel::Receiver<DetectionOutcome>,
}

/// Creates a connected pair of channel ends.
pub fn channels() -> (SendState, DetectionState) {
    let (job_tx, job_rx) = crossbeam_channel::unbounded();
    let (det_tx, det_rx) = crossbeam_channel::unbounded();
    (SendState { job_tx, det_rx }, DetectionState { job_rx, det_tx })
}
