use std::sync::Arc;
use grid_detect::common::{Anchor, ModelConfig, RawOutput};
use grid_detect::data::DetectionJob;
use grid_detect::detection_runners::{CropRegion, DetectionPipeline, DetectionWorker, Detector, InferenceEngine};
use image::{DynamicImage, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use ndarray::Array4;

mod colours;

use synthetic::{overlapping_pair, GridBuilder};

fn config() -> ModelConfig {
    ModelConfig::new()
        .with_anchors(&[Anchor::new(1.0, 1.0)])
        .with_names(&["cat", "dog"])
        .with_nc(2)
        .with_input_size(100)
}

struct FixedEngine {
    output: RawOutput,
}

impl InferenceEngine for FixedEngine {
    fn infer(&mut self, input: &Array4<f32>) -> anyhow::Result<RawOutput> {
        anyhow::ensure!(input.shape() == [1, 100, 100, 3], "unexpected input shape {:?}", input.shape());
        Ok(self.output.clone())
    }
}

#[test]
fn worker_answers_every_job_in_order() {
    let pipeline = DetectionPipeline::new(&config()).unwrap();
    let (worker, send_state) = DetectionWorker::spawn(pipeline).unwrap();

    let jobs = [
        overlapping_pair(),
        GridBuilder::new(2, 2, 1, 2).build(),
        // wrong class count, reported as an error outcome
        GridBuilder::new(2, 2, 1, 3).build(),
    ];
    for (id, raw) in jobs.into_iter().enumerate() {
        send_state
            .job_tx
            .send(Box::new(DetectionJob { id: id as u64, raw, image_width: 100, image_height: 100 }))
            .unwrap();
    }

    let outcomes: Vec<_> = (0..3).map(|_| send_state.det_rx.recv().unwrap()).collect();
    assert_eq!(outcomes.iter().map(|o| o.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(outcomes[0].result.as_ref().unwrap().len(), 1);
    assert!(outcomes[1].result.as_ref().unwrap().is_empty());
    assert!(outcomes[2].result.is_err());

    drop(send_state);
    worker.join().unwrap();
}

#[test]
fn dropped_outcomes_do_not_stop_the_worker() {
    let pipeline = DetectionPipeline::new(&config()).unwrap();
    let (worker, send_state) = DetectionWorker::spawn(pipeline).unwrap();
    let job_tx = send_state.job_tx.clone();
    drop(send_state);

    for id in 0..4 {
        let job = DetectionJob { id, raw: overlapping_pair(), image_width: 64, image_height: 64 };
        job_tx.send(Box::new(job)).unwrap();
    }
    drop(job_tx);

    worker.join().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_runs_agree() {
    let pipeline = Arc::new(DetectionPipeline::new(&config()).unwrap());
    let raw = Arc::new(overlapping_pair());
    let expected = pipeline.run(&raw, 320, 240).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = pipeline.clone();
            let raw = raw.clone();
            tokio::task::spawn_blocking(move || pipeline.run(&raw, 320, 240))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), expected);
    }
}

#[test]
fn detector_maps_detections_into_the_source_image() {
    let engine = FixedEngine { output: overlapping_pair() };
    let mut detector = Detector::new(engine, &config()).unwrap().with_profile(true);

    let image = DynamicImage::new_rgb8(300, 200);
    let crop = CropRegion::centered(300, 200);
    let result = detector.detect(&image, &crop).unwrap();

    assert_eq!(result.len(), 1);
    let rect = result[0].rect;
    assert!((rect.x - 95.257).abs() < 0.05, "{rect:?}");
    assert!(rect.y.abs() < 1e-3);
    assert!((rect.width - 100.0).abs() < 1e-2);
    assert!((rect.height - 100.0).abs() < 1e-2);
}

#[test]
fn detections_render_onto_an_image() {
    let pipeline = DetectionPipeline::new(&config()).unwrap();
    let result = pipeline.run(&overlapping_pair(), 100, 100).unwrap();

    let mut img = RgbImage::new(100, 100);
    for det in result.iter().map(|d| d.clamped(100.0, 100.0)) {
        let (x, y, w, h) = det.rect.as_xy_wh_i32();
        let rect = Rect::at(x, y).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(&mut img, rect, colours::get_class_colour(det.class_index));
    }

    assert_eq!(*img.get_pixel(23, 0), colours::get_class_colour(0));
    assert_eq!(*img.get_pixel(50, 25), image::Rgb([0, 0, 0]));
}
