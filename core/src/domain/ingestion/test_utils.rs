use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat, RgbImage};

fn encode(format: ImageFormat) -> Bytes {
    let image = DynamicImage::ImageRgb8(RgbImage::new(4, 3));
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format)
        .expect("encoding a blank test image");
    Bytes::from(buffer.into_inner())
}

pub(crate) fn sample_png() -> Bytes {
    encode(ImageFormat::Png)
}

pub(crate) fn sample_jpeg() -> Bytes {
    encode(ImageFormat::Jpeg)
}
