//! Decode generated patterns directly, as a noiseless camera aligned with
//! the projector would see them.

use graycode_core::{BitPlaneLayout, GrayImage, GrayImageView};
use graycode_decode::{Correspondence, DecodeParams, Decoder, RangeGuard};
use graycode_pattern::PatternSet;

fn self_decode(width: usize, height: usize, params: &DecodeParams) -> Decoder {
    let layout = BitPlaneLayout::new(width, height).expect("layout");
    let patterns = PatternSet::generate(&layout);
    let captures: Vec<GrayImageView<'_>> = patterns.iter().map(GrayImage::view).collect();
    let mut decoder = Decoder::new(layout, width, height).expect("decoder");
    decoder.decode_with(&captures, params).expect("decode");
    decoder
}

fn assert_identity(decoder: &Decoder) {
    let (w, h) = decoder.camera_size();
    for y in 0..h {
        for x in 0..w {
            assert_eq!(
                decoder.correspondence_at(x, y),
                Some(Correspondence::new(x as i32, y as i32)),
                "pixel ({x}, {y})"
            );
        }
    }
    assert_eq!(decoder.map().decoded_count(), w * h);
}

#[test]
fn power_of_two_projector_decodes_to_identity() {
    assert_identity(&self_decode(8, 8, &DecodeParams::default()));
    assert_identity(&self_decode(32, 16, &DecodeParams::default()));
}

#[test]
fn non_power_of_two_projector_decodes_to_identity() {
    for (w, h) in [(2, 3), (5, 7), (6, 6), (100, 37), (129, 65)] {
        assert_identity(&self_decode(w, h, &DecodeParams::default()));
    }
}

#[test]
fn vga_square_corners_decode_exactly() {
    let decoder = self_decode(640, 640, &DecodeParams::default());
    assert_eq!(decoder.required_image_count(), 44);
    assert_eq!(
        decoder.correspondence_at(0, 0),
        Some(Correspondence::new(0, 0))
    );
    assert_eq!(
        decoder.correspondence_at(639, 639),
        Some(Correspondence::new(639, 639))
    );
    assert_eq!(
        decoder.correspondence_at(320, 17),
        Some(Correspondence::new(320, 17))
    );
}

#[test]
fn identity_holds_for_every_mode_on_clean_patterns() {
    let modes = [
        DecodeParams::strict(64),
        DecodeParams::strict(255),
        DecodeParams {
            range_guard: RangeGuard::Legacy,
            ..DecodeParams::default()
        },
    ];
    for params in &modes {
        assert_identity(&self_decode(23, 11, params));
    }
}

#[test]
fn visualization_is_a_horizontal_ramp() {
    let decoder = self_decode(16, 4, &DecodeParams::default());
    let img = decoder.visualize(graycode_core::Axis::Column);
    assert_eq!(img.width, 16);
    assert_eq!(img.get(0, 2), Some(0));
    assert_eq!(img.get(15, 2), Some(255));
    assert_eq!(img.get(5, 0), Some(85));
}
