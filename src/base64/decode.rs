use super::{Alphabet, ALPHABET};
use crate::{base_common::alphabet, base_packed};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    BufferTooSmall,
    NonAsciiCharacter { character: u8, index: usize },
    InvalidCharacter { character: char, index: usize },
    TrailingBits,
    DanglingCharacter,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "Output buffer too small"),
            Self::InvalidCharacter { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
            Self::NonAsciiCharacter { character, index } => write!(f, "Non-ascii character {:#04x} at index {}", character, index),
            Self::TrailingBits => write!(f, "Non-zero bits after the last byte"),
            Self::DanglingCharacter => write!(f, "Single character left after the last byte"),
        }
    }
}

impl From<alphabet::DecodeError> for Error {
    fn from(error: alphabet::DecodeError) -> Self {
        match error {
            alphabet::DecodeError::InvalidCharacter { character, index } => Error::InvalidCharacter { character, index },
            alphabet::DecodeError::NonAsciiCharacter { character, index } => Error::NonAsciiCharacter { character, index },
        }
    }
}

impl From<base_packed::Error> for Error {
    fn from(error: base_packed::Error) -> Self {
        match error {
            base_packed::Error::BufferTooSmall => Error::BufferTooSmall,
        }
    }
}

/// Upper bound on the bytes decoded from `len` characters.
pub const fn max_decoded_len(len: usize) -> usize {
    len * 6 / 8 + 1
}

/// Streaming base64 decoder. Once a `=` is seen only more `=` may follow; any other
/// character outside the alphabet is an error reporting its offset in the whole stream.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    alphabet: &'a Alphabet<64>,
    accumulator: u32,
    bits: u32,
    offset: usize,
    padded: bool,
}

impl<'a> Decoder<'a> {
    pub const fn new(alphabet: &'a Alphabet<64>) -> Self {
        Self {
            alphabet,
            accumulator: 0,
            bits: 0,
            offset: 0,
            padded: false,
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.bits = 0;
        self.offset = 0;
        self.padded = false;
    }

    pub fn decode_into<O: AsMut<[u8]> + ?Sized>(&mut self, input: impl AsRef<[u8]>, output: &mut O) -> Result<usize, Error> {
        let output = output.as_mut();
        let mut index = 0;
        self.decode_with(input.as_ref(), |byte| Ok(base_packed::write(output, &mut index, byte)?))?;
        Ok(index)
    }

    pub fn decode_to_vec(&mut self, input: impl AsRef<[u8]>, output: &mut Vec<u8>) -> Result<(), Error> {
        self.decode_with(input.as_ref(), |byte| {
            output.push(byte);
            Ok(())
        })
    }

    /// Checks that the input ended on a whole byte with no set bits left over, and resets.
    pub fn decode_end(&mut self) -> Result<(), Error> {
        let (accumulator, bits) = (self.accumulator, self.bits);
        self.reset();
        if bits == 6 {
            Err(Error::DanglingCharacter)
        } else if accumulator != 0 {
            Err(Error::TrailingBits)
        } else {
            Ok(())
        }
    }

    fn decode_with(&mut self, input: &[u8], mut emit: impl FnMut(u8) -> Result<(), Error>) -> Result<(), Error> {
        for (position, &value) in input.iter().enumerate() {
            if value == b'=' {
                self.padded = true;
                continue;
            }
            let digit = self.alphabet.decode(value, self.offset + position)?;
            if self.padded {
                return Err(Error::InvalidCharacter {
                    character: char::from(value),
                    index: self.offset + position,
                });
            }
            self.accumulator = (self.accumulator << 6) | u32::from(digit);
            self.bits += 6;
            if self.bits >= 8 {
                self.bits -= 8;
                emit((self.accumulator >> self.bits) as u8)?;
                self.accumulator &= (1 << self.bits) - 1;
            }
        }
        self.offset += input.len();
        Ok(())
    }
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Self::new(&ALPHABET)
    }
}

pub fn decode_into<O: AsMut<[u8]> + ?Sized>(input: impl AsRef<[u8]>, output: &mut O) -> Result<usize, Error> {
    let mut decoder = Decoder::default();
    let len = decoder.decode_into(input, output)?;
    decoder.decode_end()?;
    Ok(len)
}

pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
    let input = input.as_ref();
    let mut output = Vec::with_capacity(max_decoded_len(input.len()));
    let mut decoder = Decoder::default();
    decoder.decode_to_vec(input, &mut output)?;
    decoder.decode_end()?;
    Ok(output)
}
