use grid_detect::common::{apply_display_threshold, Anchor, ModelConfig};
use grid_detect::detection_runners::DetectionPipeline;


use synthetic::GridBuilder;

fn pipeline() -> DetectionPipeline {
    let config = ModelConfig::new()
        .with_anchors(&[Anchor::new(1.0, 1.0), Anchor::new(2.5, 2.5)])
        .with_names(&["cat", "dog", "bird"])
        .with_nc(3);
    DetectionPipeline::new(&config).unwrap()
}

#[test]
fn no_detections() {
    let raw = GridBuilder::new(13, 13, 2, 3)
        .with_objectness(-50.0)
        .build();

    let result = pipeline().run(&raw, 416, 416).unwrap();
    assert_eq!(result.len(), 0);
}

#[test]
fn empty_grid_yields_no_detections() {
    let raw = GridBuilder::new(0, 0, 2, 3).build();

    let result = pipeline().run(&raw, 416, 416).unwrap();
    assert!(result.is_empty());
}

#[test]
fn display_filter_on_nothing_is_nothing() {
    assert!(apply_display_threshold(&[], 0.5, Some(3)).is_empty());
}
