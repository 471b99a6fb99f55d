use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    DuplicateCharacter { character: char, first: usize, second: usize },
    NonPrintableCharacter { character: u8, index: usize },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    NonAsciiCharacter { character: u8, index: usize },
    InvalidCharacter { character: char, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCharacter { character, first, second } => {
                write!(f, "Duplicate character '{}' at indexes {} and {}", character, first, second)
            }
            Self::NonPrintableCharacter { character, index } => {
                write!(f, "Non-printable character {:#04x} at index {}", character, index)
            }
        }
    }
}

impl error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
            Self::NonAsciiCharacter { character, index } => write!(f, "Non-ascii character {:#04x} at index {}", character, index),
        }
    }
}

/// Forward and reverse lookup tables for an alphabet of `N` printable ASCII characters.
///
/// The reverse table covers every byte value. Bytes outside the alphabet map to the
/// sentinel `N`, which is never a valid digit.
#[derive(Clone, Debug)]
pub struct Alphabet<const N: usize> {
    encode: [u8; N],
    decode: [u8; 256],
}

impl<const N: usize> Alphabet<N> {
    pub const SENTINEL: u8 = N as u8;

    pub const fn new(characters: &[u8; N]) -> Result<Self, Error> {
        let mut encode = [0u8; N];
        let mut decode = [N as u8; 256];

        let mut index = 0;
        while index < N {
            let character = characters[index];
            if character < 0x20 || character > 0x7e {
                return Err(Error::NonPrintableCharacter { index, character });
            }
            if decode[character as usize] != N as u8 {
                return Err(Error::DuplicateCharacter {
                    character: character as char,
                    first: decode[character as usize] as usize,
                    second: index,
                });
            }
            encode[index] = character;
            decode[character as usize] = index as u8;
            index += 1;
        }

        Ok(Self { encode, decode })
    }

    pub fn encode(&self, digit: usize) -> u8 {
        self.encode[digit]
    }

    /// Reverse table entry for `character`: its digit, or [`Self::SENTINEL`].
    pub fn lookup(&self, character: u8) -> u8 {
        self.decode[character as usize]
    }

    pub fn digit(&self, character: u8) -> Option<u8> {
        let digit = self.lookup(character);
        if digit == Self::SENTINEL {
            None
        } else {
            Some(digit)
        }
    }

    pub fn contains(&self, character: u8) -> bool {
        self.digit(character).is_some()
    }

    /// Strict lookup reporting where an unknown character was found.
    pub fn decode(&self, character: u8, index: usize) -> Result<u8, DecodeError> {
        if character >= 128 {
            return Err(DecodeError::NonAsciiCharacter { index, character });
        }
        self.digit(character).ok_or(DecodeError::InvalidCharacter {
            character: character as char,
            index,
        })
    }

    pub const fn characters(&self) -> &[u8; N] {
        &self.encode
    }

    pub const fn len(&self) -> usize {
        N
    }
}
