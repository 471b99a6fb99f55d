/// Carry state of one stream direction.
///
/// `bit_count` stays below 22 between calls: the encoder queues at most 13 bits plus one
/// byte before emitting, and the decoder drains to at most 7 bits before adding a 14-bit
/// value. A `u32` queue therefore never loses bits.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    pub(super) queue: u32,
    pub(super) bit_count: u32,
    pub(super) pending: Option<u8>,
}

impl State {
    pub const fn new() -> Self {
        Self {
            queue: 0,
            bit_count: 0,
            pending: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0 && self.pending.is_none()
    }

    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Low digit of a pair still waiting for its high digit.
    pub fn pending(&self) -> Option<u8> {
        self.pending
    }

    pub(super) fn push(&mut self, value: u32, bits: u32) {
        debug_assert!(self.bit_count + bits < 22);
        self.queue |= value << self.bit_count;
        self.bit_count += bits;
    }

    pub(super) fn take(&mut self, bits: u32) -> u32 {
        debug_assert!(bits <= self.bit_count);
        let value = self.queue & ((1 << bits) - 1);
        self.queue >>= bits;
        self.bit_count -= bits;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::State;

    #[test]
    fn push_take() {
        let mut state = State::new();
        assert!(state.is_empty());
        state.push(0xab, 8);
        state.push(0x3, 2);
        assert_eq!(state.bit_count(), 10);
        assert_eq!(state.take(8), 0xab);
        assert_eq!(state.take(2), 0x3);
        assert!(state.is_empty());
    }

    #[test]
    fn reset() {
        let mut state = State::new();
        state.push(1, 5);
        state.pending = Some(7);
        state.reset();
        assert_eq!(state, State::default());
    }
}
