use crate::common::{CornerBox, DecodedBox};

/// Center-form normalized box to corner form, still in `0..1` image fractions.
pub fn to_corners(bbox: &DecodedBox) -> CornerBox {
    let (cx, cy, w, h) = bbox.cxcy_wh();
    CornerBox::from_cxcy_wh(cx, cy, w, h)
}

/// Scales a normalized corner box to absolute pixels of an `image_width x image_height` image.
/// No clamping happens here.
pub fn scale_to_image(bbox: CornerBox, image_width: f32, image_height: f32) -> CornerBox {
    bbox.scale(image_width, image_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_box_maps_to_pixels() {
        let decoded = DecodedBox {
            center_x: 0.5,
            center_y: 0.25,
            width: 0.2,
            height: 0.1,
            ..Default::default()
        };
        let corners = to_corners(&decoded);
        let pixels = scale_to_image(corners, 200., 400.);

        assert!((pixels.left - 80.).abs() < 1e-4);
        assert!((pixels.right - 120.).abs() < 1e-4);
        assert!((pixels.top - 80.).abs() < 1e-4);
        assert!((pixels.bottom - 120.).abs() < 1e-4);
    }
}
