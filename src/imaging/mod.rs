mod png_codec;

pub use png_codec::{decode_png, encode_png, MAX_DECODE_PIXELS};
