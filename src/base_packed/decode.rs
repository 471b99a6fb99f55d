use super::{threshold, write, Alphabet, Error, State};
use log::trace;
use std::convert::Infallible;

/// Streaming decoder over an alphabet of `N` characters.
///
/// Bytes outside the alphabet are skipped, so encoded text may be wrapped or padded
/// with whitespace that is not itself part of the alphabet. Decoding never fails on
/// content; only the output capacity is checked.
#[derive(Clone, Debug)]
pub struct Decoder<'a, const N: usize> {
    alphabet: &'a Alphabet<N>,
    state: State,
}

impl<'a, const N: usize> Decoder<'a, N> {
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

    /// Decodes `input` into `output`, returning the number of bytes written.
    ///
    /// [`super::max_decoded_len`] gives a capacity that is always enough.
    pub fn decode_into<O: AsMut<[u8]> + ?Sized>(&mut self, input: impl AsRef<[u8]>, output: &mut O) -> Result<usize, Error> {
        let output = output.as_mut();
        let mut index = 0;
        self.decode_with(input.as_ref(), |byte| write(output, &mut index, byte))?;
        Ok(index)
    }

    /// Emits the byte held by a lone trailing low digit, if any, and resets the state.
    pub fn decode_end_into<O: AsMut<[u8]> + ?Sized>(&mut self, output: &mut O) -> Result<usize, Error> {
        let output = output.as_mut();
        let mut index = 0;
        self.decode_end_with(|byte| write(output, &mut index, byte))?;
        Ok(index)
    }

    pub fn decode_to_vec(&mut self, input: impl AsRef<[u8]>, output: &mut Vec<u8>) {
        let input = input.as_ref();
        output.reserve(super::max_decoded_len(input.len()));
        let result = self.decode_with(input, |byte| {
            output.push(byte);
            Ok::<(), Infallible>(())
        });
        if let Err(never) = result {
            match never {}
        }
    }

    pub fn decode_end_to_vec(&mut self, output: &mut Vec<u8>) {
        let result = self.decode_end_with(|byte| {
            output.push(byte);
            Ok::<(), Infallible>(())
        });
        if let Err(never) = result {
            match never {}
        }
    }

    fn decode_with<E>(&mut self, input: &[u8], mut emit: impl FnMut(u8) -> Result<(), E>) -> Result<(), E> {
        for &character in input {
            let Some(digit) = self.alphabet.digit(character) else {
                continue;
            };
            match self.state.pending.take() {
                None => self.state.pending = Some(digit),
                Some(low) => {
                    let value = u32::from(low) + u32::from(digit) * Self::RADIX;
                    let bits = if value & 0x1fff > Self::THRESHOLD { 13 } else { 14 };
                    self.state.push(value, bits);
                    while self.state.bit_count > 7 {
                        emit(self.state.take(8) as u8)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn decode_end_with<E>(&mut self, mut emit: impl FnMut(u8) -> Result<(), E>) -> Result<(), E> {
        if let Some(low) = self.state.pending {
            trace!("flushing trailing digit with {} queued bits", self.state.bit_count);
            emit((self.state.queue | u32::from(low) << self.state.bit_count) as u8)?;
        }
        self.state.reset();
        Ok(())
    }
}
