//! Streaming basE93 and basE91 binary-to-text codecs, plus a JSON dialect that uses them
//! to carry binary data.
//!
//! The codecs keep a small carry state between calls, so input can be fed in chunks of
//! any size and the output is identical to encoding everything at once:
//!
//! ```
//! let mut encoder = base93_codec::base93::encoder();
//! let mut text = Vec::new();
//! encoder.encode_to_vec(b"foo", &mut text);
//! encoder.encode_to_vec(b"bar", &mut text);
//! encoder.encode_end_to_vec(&mut text);
//! assert_eq!(text, b"kq61B'qC");
//! assert_eq!(base93_codec::base93::decode(&text), b"foobar");
//! ```

pub mod base64;
pub mod base91;
pub mod base93;
pub mod base_common;
pub mod base_packed;
pub mod config;
pub mod json_esc;

pub use config::{BinaryFormat, Configuration};
pub use json_esc::{JsonEsc, Value};
