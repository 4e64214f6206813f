use std::thread::JoinHandle;
use std::time::Instant;
use crate::data::send_channels::{self, DetectionOutcome, DetectionState, SendState};
use crate::detection_runners::grid_detector::DetectionPipeline;

/// Runs a [`DetectionPipeline`] on a background thread fed through channels.
///
/// The thread exits once every job sender has been dropped. Outcomes nobody
/// reads are simply discarded, which is how a caller cancels a detection.
pub struct DetectionWorker {
    handle: JoinHandle<()>,
}

impl DetectionWorker {
    pub fn spawn(pipeline: DetectionPipeline) -> anyhow::Result<(Self, SendState)> {
        let (send_state, detection_state) = send_channels::channels();
        let handle = std::thread::Builder::new()
            .name("grid-detect-worker".to_string())
            .spawn(move || detection_loop(pipeline, detection_state))?;

        log::info!("Detection worker started");
        Ok((Self { handle }, send_state))
    }

    /// Waits for the worker to drain its queue and stop.
    pub fn join(self) -> anyhow::Result<()> {
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("Detection worker panicked"))
    }
}

fn detection_loop(pipeline: DetectionPipeline, detection_state: DetectionState) {
    // MESSAGE LOOP STARTS HERE
    while let Ok(job) = detection_state.job_rx.recv() {
        let detect_time = Instant::now();
        let result = pipeline.run(&job.raw, job.image_width, job.image_height);

        match &result {
            Ok(detections) => log::debug!(
                "Job {}: {} detections in {:.2?}",
                job.id,
                detections.len(),
                detect_time.elapsed()
            ),
            Err(err) => log::error!("Job {}: detection failed, skipping: {}", job.id, err),
        }

        if detection_state.det_tx.send(DetectionOutcome { id: job.id, result }).is_err() {
            log::debug!("Outcome receiver dropped, discarding job {}", job.id);
        }
    }

    log::info!("Detection worker stopped");
}
