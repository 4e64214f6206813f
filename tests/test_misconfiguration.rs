use grid_detect::common::{Anchor, DetectError, RawOutput};
use grid_detect::detection_runners::grid_detector::{grid_decoder, pipeline};
use ndarray::{ArrayD, IxDyn};


use synthetic::{names, overlapping_pair, GridBuilder};

#[test]
fn short_label_table_raises_index_error() {
    // best box predicts class 1, the table only names class 0
    let raw = GridBuilder::new(2, 2, 1, 2)
        .with_cell(0, 0, 0, &[0.0, 0.0, 0.0, 0.0, 5.0, -5.0, 5.0])
        .build();

    let err = pipeline::run(&raw, &[Anchor::new(1.0, 1.0)], 2, 0.1, 0.3, 100, 100, &names(&["cat"])).unwrap_err();
    assert_eq!(err, DetectError::Index { index: 1, len: 1 });
}

#[test]
fn short_label_table_is_fine_while_unused() {
    let result = pipeline::run(&overlapping_pair(), &[Anchor::new(1.0, 1.0)], 2, 0.1, 0.3, 100, 100, &names(&["cat"])).unwrap();
    assert_eq!(result.len(), 1);
}

#[test]
fn class_count_mismatch_is_a_shape_error() {
    let raw = GridBuilder::new(2, 2, 1, 2).build();
    let err = grid_decoder::decode(&raw, &[Anchor::new(1.0, 1.0)], 3).unwrap_err();
    assert!(matches!(err, DetectError::Shape(_)), "{err}");
}

#[test]
fn anchor_count_mismatch_is_a_shape_error() {
    let raw = GridBuilder::new(2, 2, 1, 2).build();
    let anchors = [Anchor::new(1.0, 1.0), Anchor::new(2.0, 2.0)];

    let err = pipeline::run(&raw, &anchors, 2, 0.1, 0.3, 100, 100, &names(&["cat", "dog"])).unwrap_err();
    assert!(matches!(err, DetectError::Shape(_)), "{err}");
}

#[test]
fn engine_output_that_does_not_split_across_anchors() {
    let output = ArrayD::<f32>::zeros(IxDyn(&[1, 13, 13, 424]));
    assert!(matches!(RawOutput::from_engine_output(&output, 5), Err(DetectError::Shape(_))));
}

#[test]
fn errors_convert_into_anyhow() {
    let raw = GridBuilder::new(1, 1, 1, 1).build();
    let res: anyhow::Result<_> = grid_decoder::decode(&raw, &[], 1).map_err(anyhow::Error::from);
    assert!(res.unwrap_err().to_string().starts_with("shape error"));
}
