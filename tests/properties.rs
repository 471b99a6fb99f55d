use base93_codec::{base91, base93 as b93};
use proptest::prelude::*;

fn encode_chunked(input: &[u8], chunk: usize) -> Vec<u8> {
    let mut encoder = b93::encoder();
    let mut output = Vec::new();
    for piece in input.chunks(chunk) {
        encoder.encode_to_vec(piece, &mut output);
    }
    encoder.encode_end_to_vec(&mut output);
    output
}

fn decode_chunked(input: &[u8], chunk: usize) -> Vec<u8> {
    let mut decoder = b93::decoder();
    let mut output = Vec::new();
    for piece in input.chunks(chunk) {
        decoder.decode_to_vec(piece, &mut output);
    }
    decoder.decode_end_to_vec(&mut output);
    output
}

fn noise() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("outside the alphabet", |&byte| !b93::ALPHABET.contains(byte))
}

proptest! {
    #[test]
    fn prop_round_trip(input in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(b93::decode(b93::encode(&input)), input.clone());
        prop_assert_eq!(base91::decode(base91::encode(&input)), input);
    }

    #[test]
    fn prop_chunk_invariance(input in proptest::collection::vec(any::<u8>(), 0..512), encode_chunk in 1usize..40, decode_chunk in 1usize..40) {
        let whole = b93::encode(&input);
        let chunked = encode_chunked(&input, encode_chunk);
        prop_assert_eq!(&chunked, whole.as_bytes());
        prop_assert_eq!(decode_chunked(&chunked, decode_chunk), input);
    }

    #[test]
    fn prop_alphabet_purity(input in proptest::collection::vec(any::<u8>(), 0..512)) {
        let text = b93::encode(&input);
        prop_assert!(text.bytes().all(|character| b93::ALPHABET.contains(character)));
        prop_assert!(text.len() <= b93::max_encoded_len(input.len()));
        let text = base91::encode(&input);
        prop_assert!(text.bytes().all(|character| base91::ALPHABET.contains(character)));
    }

    #[test]
    fn prop_noise_tolerance(
        input in proptest::collection::vec(any::<u8>(), 0..256),
        inserts in proptest::collection::vec((any::<prop::sample::Index>(), noise()), 0..32),
    ) {
        let mut text = b93::encode(&input).into_bytes();
        for (index, byte) in inserts {
            let position = index.index(text.len() + 1);
            text.insert(position, byte);
        }
        prop_assert_eq!(b93::decode(&text), input);
    }

    #[test]
    fn prop_into_buffers(input in proptest::collection::vec(any::<u8>(), 0..256), chunk in 1usize..32) {
        let mut encoder = b93::encoder();
        let mut text = Vec::new();
        for piece in input.chunks(chunk) {
            let mut buffer = vec![0u8; b93::max_encoded_len(piece.len())];
            let len = encoder.encode_into(piece, &mut buffer);
            prop_assert!(len.is_ok());
            text.extend_from_slice(&buffer[..len.unwrap_or_default()]);
        }
        let mut tail = [0u8; 2];
        let len = encoder.encode_end_into(&mut tail).unwrap_or_default();
        text.extend_from_slice(&tail[..len]);

        let mut decoder = b93::decoder();
        let mut output = Vec::new();
        for piece in text.chunks(chunk) {
            let mut buffer = vec![0u8; b93::max_decoded_len(piece.len())];
            let len = decoder.decode_into(piece, &mut buffer);
            prop_assert!(len.is_ok());
            output.extend_from_slice(&buffer[..len.unwrap_or_default()]);
        }
        let mut tail = [0u8; 1];
        let len = decoder.decode_end_into(&mut tail).unwrap_or_default();
        output.extend_from_slice(&tail[..len]);
        prop_assert_eq!(output, input);
    }
}

#[test]
fn empty_input() {
    assert_eq!(b93::encode(b""), "");
    assert!(b93::decode(b"").is_empty());
    assert_eq!(encode_chunked(b"", 3), b"");
    assert!(decode_chunked(b"\r\n\t\"", 1).is_empty());
}

#[test]
fn patterns_differ() {
    let ones = b93::encode([0xff, 0xff, 0xff]);
    let zeros = b93::encode([0x00, 0x00, 0x00]);
    assert_ne!(ones, zeros);
    assert_eq!(b93::decode(&ones), [0xff, 0xff, 0xff]);
    assert_eq!(b93::decode(&zeros), [0x00, 0x00, 0x00]);
}
