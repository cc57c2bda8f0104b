/// Errors returned by [`Decoder::decode`](crate::Decoder::decode).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected {expected} captured images, got {got}")]
    ImageCount { expected: usize, got: usize },
    #[error("captured image {index} is missing")]
    MissingImage { index: usize },
    #[error(
        "captured image {index} is {width}x{height} ({len} bytes), \
         expected {expected_width}x{expected_height}"
    )]
    ImageSize {
        index: usize,
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
        len: usize,
    },
}
