//! Streaming 13/14-bit packing shared by the basE91 and basE93 alphabets.
//!
//! Bytes are queued little-endian into a bit accumulator. Every time more than 13 bits
//! are queued, the low 13 bits are emitted as a digit pair, or the low 14 bits when the
//! 13-bit value is small enough that the extra bit still fits under `N * N`.

pub mod decode;
pub mod encode;
mod state;

use std::{error, fmt};

pub use crate::base_common::Alphabet;
pub use decode::Decoder;
pub use encode::Encoder;
pub use state::State;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    BufferTooSmall,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "Output buffer too small"),
        }
    }
}

/// Largest 13-bit value that is packed together with a 14th bit for a radix.
///
/// A digit pair holds values up to `radix * radix - 1`, so a 13-bit value `v` may take
/// a 14th bit only when `v + 8192` still fits: `v <= radix * radix - 8193`.
pub const fn threshold(radix: usize) -> u32 {
    assert!(radix * radix > 8192, "radix too small for 13-bit digit pairs");
    assert!(radix * radix - 8193 < 8192, "radix too large for 13-bit digit pairs");
    (radix * radix - 8193) as u32
}

/// Output capacity that always suffices for one `encode_into` call on `len` input
/// bytes, whatever the carried state. Also covers a whole one-shot encode including
/// the finalizer's tail.
pub const fn max_encoded_len(len: usize) -> usize {
    2 * (len * 8 / 13 + 1)
}

/// Output capacity that always suffices for one `decode_into` call on `len` input
/// characters, including a low digit carried over from the previous call.
pub const fn max_decoded_len(len: usize) -> usize {
    len + 1
}

pub(crate) fn write(output: &mut [u8], index: &mut usize, byte: u8) -> Result<(), Error> {
    *output.get_mut(*index).ok_or(Error::BufferTooSmall)? = byte;
    *index += 1;
    Ok(())
}
