#![allow(dead_code)]

use image::Rgb;

pub(crate) fn get_class_colour(class: usize) -> Rgb<u8> {
    match class {
        0 => Rgb([128, 0, 128]),
        1 => Rgb([0, 255, 0]),
        _ => Rgb([0, 0, 255])
    }
}
