use super::{threshold, write, Alphabet, Error, State};
use log::trace;
use std::convert::Infallible;

/// Streaming encoder over an alphabet of `N` characters.
///
/// Feed any number of chunks through [`Encoder::encode_into`], then call
/// [`Encoder::encode_end_into`] once. The finalizer leaves the encoder ready for a new
/// stream.
#[derive(Clone, Debug)]
pub struct Encoder<'a, const N: usize> {
    alphabet: &'a Alphabet<N>,
    state: State,
}

impl<'a, const N: usize> Encoder<'a, N> {
    const RADIX: u32 = N as u32;
    const THRESHOLD: u32 = threshold(N);

    pub const fn new(alphabet: &'a Alphabet<N>) -> Self {
        Self {
            alphabet,
            state: State::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Encodes `input` into `output`, returning the number of characters written.
    ///
    /// [`super::max_encoded_len`] gives a capacity that is always enough. On
    /// `BufferTooSmall` the stream is left mid-pair and must be reset.
    pub fn encode_into<O: AsMut<[u8]> + ?Sized>(&mut self, input: impl AsRef<[u8]>, output: &mut O) -> Result<usize, Error> {
        let output = output.as_mut();
        let mut index = 0;
        self.encode_with(input.as_ref(), |character| write(output, &mut index, character))?;
        Ok(index)
    }

    /// Flushes the residual bits into `output` (0, 1 or 2 characters) and resets the state.
    pub fn encode_end_into<O: AsMut<[u8]> + ?Sized>(&mut self, output: &mut O) -> Result<usize, Error> {
        let output = output.as_mut();
        let mut index = 0;
        self.encode_end_with(|character| write(output, &mut index, character))?;
        Ok(index)
    }

    pub fn encode_to_vec(&mut self, input: impl AsRef<[u8]>, output: &mut Vec<u8>) {
        let input = input.as_ref();
        output.reserve(super::max_encoded_len(input.len()));
        let result = self.encode_with(input, |character| {
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

    fn encode_with<E>(&mut self, input: &[u8], mut emit: impl FnMut(u8) -> Result<(), E>) -> Result<(), E> {
        for &byte in input {
            self.state.push(u32::from(byte), 8);
            if self.state.bit_count > 13 {
                let value = if self.state.queue & 0x1fff > Self::THRESHOLD {
                    self.state.take(13)
                } else {
                    self.state.take(14)
                };
                emit(self.alphabet.encode((value % Self::RADIX) as usize))?;
                emit(self.alphabet.encode((value / Self::RADIX) as usize))?;
            }
        }
        Ok(())
    }

    fn encode_end_with<E>(&mut self, mut emit: impl FnMut(u8) -> Result<(), E>) -> Result<(), E> {
        if self.state.bit_count > 0 {
            let queue = self.state.queue;
            trace!("flushing {} residual bits", self.state.bit_count);
            emit(self.alphabet.encode((queue % Self::RADIX) as usize))?;
            if self.state.bit_count > 7 || queue > Self::RADIX - 1 {
                emit(self.alphabet.encode((queue / Self::RADIX) as usize))?;
            }
        }
        self.state.reset();
        Ok(())
    }
}
