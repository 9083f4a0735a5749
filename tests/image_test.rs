mod common;

use common::test_utils::{png_bytes, scratch_dir};
use spin_demos::resources::texture::{Pixels, check_dimensions, decode_flipped, load_image};

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const WHITE: [u8; 4] = [255, 255, 255, 128];

#[test]
fn rows_are_flipped_bottom_to_top() {
    // Top row red/green, bottom row blue/white.
    let bytes = png_bytes(&[&[RED, GREEN], &[BLUE, WHITE]]);
    let pixels = decode_flipped(&bytes).expect("valid png");

    assert_eq!((pixels.width, pixels.height), (2, 2));
    assert_eq!(pixels.data.len(), 2 * 2 * 4);
    assert_eq!(pixels.pixel(0, 0), Some(BLUE));
    assert_eq!(pixels.pixel(1, 0), Some(WHITE));
    assert_eq!(pixels.pixel(0, 1), Some(RED));
    assert_eq!(pixels.pixel(1, 1), Some(GREEN));
    assert_eq!(pixels.pixel(2, 0), None);
}

#[test]
fn odd_row_count_keeps_middle_row() {
    let bytes = png_bytes(&[&[RED], &[GREEN], &[BLUE]]);
    let pixels = decode_flipped(&bytes).expect("valid png");
    assert_eq!(pixels.pixel(0, 0), Some(BLUE));
    assert_eq!(pixels.pixel(0, 1), Some(GREEN));
    assert_eq!(pixels.pixel(0, 2), Some(RED));
}

#[test]
fn garbage_is_rejected() {
    assert!(decode_flipped(b"definitely not an image").is_err());
    assert!(decode_flipped(&[]).is_err());
}

#[test]
fn missing_file_names_the_path() {
    let dir = scratch_dir("missing-image");
    let path = dir.join("doge.png");
    let err = load_image(&path).expect_err("file does not exist");
    assert!(format!("{:#}", err).contains("doge.png"));
}

#[test]
fn image_is_loaded_from_disk() {
    let dir = scratch_dir("load-image");
    let path = dir.join("tiny.png");
    std::fs::write(&path, png_bytes(&[&[RED, GREEN]])).expect("write test image");

    let pixels = load_image(&path).expect("readable png");
    assert_eq!((pixels.width, pixels.height), (2, 1));
    assert_eq!(pixels.pixel(1, 0), Some(GREEN));
}

#[test]
fn oversized_images_are_rejected() {
    let wide = Pixels {
        width: 9,
        height: 1,
        data: vec![0; 9 * 4],
    };
    let err = check_dimensions(wide, 8).expect_err("wider than the limit");
    assert!(err.to_string().contains("9x1"));

    let fits = Pixels {
        width: 8,
        height: 8,
        data: vec![0; 8 * 8 * 4],
    };
    assert!(check_dimensions(fits, 8).is_ok());
}
