use super::{Alphabet, ALPHABET};
use crate::base_packed::write;
pub use crate::base_packed::Error;
use std::convert::Infallible;

/// Exact length of the padded encoding of `len` bytes.
pub const fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

/// Streaming padded base64 encoder.
#[derive(Clone, Debug)]
pub struct Encoder<'a> {
    alphabet: &'a Alphabet<64>,
    accumulator: u32,
    bits: u32,
    position: u8,
}

impl<'a> Encoder<'a> {
    pub const fn new(alphabet: &'a Alphabet<64>) -> Self {
        Self {
            alphabet,
            accumulator: 0,
            bits: 0,
            position: 0,
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.bits = 0;
        self.position = 0;
    }

    pub fn encode_into<O: AsMut<[u8]> + ?Sized>(&mut self, input: impl AsRef<[u8]>, output: &mut O) -> Result<usize, Error> {
        let output = output.as_mut();
        let mut index = 0;
        self.encode_with(input.as_ref(), |character| write(output, &mut index, character))?;
        Ok(index)
    }

    /// Writes the last partial sextet and the `=` padding, then resets.
    pub fn encode_end_into<O: AsMut<[u8]> + ?Sized>(&mut self, output: &mut O) -> Result<usize, Error> {
        let output = output.as_mut();
        let mut index = 0;
        self.encode_end_with(|character| write(output, &mut index, character))?;
        Ok(index)
    }

    pub fn encode_to_vec(&mut self, input: impl AsRef<[u8]>, output: &mut Vec<u8>) {
        let result = self.encode_with(input.as_ref(), |character| {
            output.push(character);
            Ok::<(), Infallible>(())
        });
        if let Err(never) = result {
            match never {}
        }
    }

    pub fn encode_end_to_vec(&mut self, output: &mut Vec<u8>) {
        let result = self.encode_end_with(|character| {
            output.push(character);
            Ok::<(), Infallible>(())
        });
        if let Err(never) = result {
            match never {}
        }
    }

    fn put<E>(&mut self, character: u8, emit: &mut impl FnMut(u8) -> Result<(), E>) -> Result<(), E> {
        emit(character)?;
        self.position = (self.position + 1) % 4;
        Ok(())
    }

    fn encode_with<E>(&mut self, input: &[u8], mut emit: impl FnMut(u8) -> Result<(), E>) -> Result<(), E> {
        for &value in input {
            self.accumulator = (self.accumulator << 8) | u32::from(value);
            self.bits += 8;
            while self.bits >= 6 {
                self.bits -= 6;
                let character = self.alphabet.encode(((self.accumulator >> self.bits) & 0x3f) as usize);
                self.put(character, &mut emit)?;
            }
            self.accumulator &= (1 << self.bits) - 1;
        }
        Ok(())
    }

    fn encode_end_with<E>(&mut self, mut emit: impl FnMut(u8) -> Result<(), E>) -> Result<(), E> {
        if self.bits > 0 {
            let character = self.alphabet.encode(((self.accumulator << (6 - self.bits)) & 0x3f) as usize);
            self.put(character, &mut emit)?;
        }
        while self.position != 0 {
            self.put(b'=', &mut emit)?;
        }
        self.reset();
        Ok(())
    }
}

impl Default for Encoder<'static> {
    fn default() -> Self {
        Self::new(&ALPHABET)
    }
}

pub fn encode_into<O: AsMut<[u8]> + ?Sized>(input: impl AsRef<[u8]>, output: &mut O) -> Result<usize, Error> {
    let output = output.as_mut();
    let mut encoder = Encoder::default();
    let len = encoder.encode_into(input, output)?;
    Ok(len + encoder.encode_end_into(&mut output[len..])?)
}

pub fn encode(input: impl AsRef<[u8]>) -> String {
    let input = input.as_ref();
    let mut output = Vec::with_capacity(encoded_len(input.len()));
    let mut encoder = Encoder::default();
    encoder.encode_to_vec(input, &mut output);
    encoder.encode_end_to_vec(&mut output);
    output.into_iter().map(char::from).collect()
}
