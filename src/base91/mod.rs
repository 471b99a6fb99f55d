//! basE91 variant whose alphabet avoids `"`, `'`, `\` and the space, so encoded text can
//! sit inside a JSON string without escaping. The last character is `-`.

pub use crate::base_packed::{max_decoded_len, max_encoded_len, Alphabet, Error};

pub const ALPHABET: Alphabet<91> =
    match Alphabet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,./:;<=>?@[]^_`{|}~-") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("Could not build alphabet"),
    };

pub const THRESHOLD: u32 = crate::base_packed::threshold(91);

pub type Encoder = crate::base_packed::Encoder<'static, 91>;
pub type Decoder = crate::base_packed::Decoder<'static, 91>;

pub fn encoder() -> Encoder {
    Encoder::new(&ALPHABET)
}

pub fn decoder() -> Decoder {
    Decoder::new(&ALPHABET)
}

pub fn encode_into<O: AsMut<[u8]> + ?Sized>(input: impl AsRef<[u8]>, output: &mut O) -> Result<usize, Error> {
    let output = output.as_mut();
    let mut encoder = encoder();
    let len = encoder.encode_into(input, output)?;
    Ok(len + encoder.encode_end_into(&mut output[len..])?)
}

pub fn encode(input: impl AsRef<[u8]>) -> String {
    let mut output = Vec::new();
    let mut encoder = encoder();
    encoder.encode_to_vec(input, &mut output);
    encoder.encode_end_to_vec(&mut output);
    output.into_iter().map(char::from).collect()
}

pub fn decode_into<O: AsMut<[u8]> + ?Sized>(input: impl AsRef<[u8]>, output: &mut O) -> Result<usize, Error> {
    let output = output.as_mut();
    let mut decoder = decoder();
    let len = decoder.decode_into(input, output)?;
    Ok(len + decoder.decode_end_into(&mut output[len..])?)
}

pub fn decode(input: impl AsRef<[u8]>) -> Vec<u8> {
    let mut output = Vec::new();
    let mut decoder = decoder();
    decoder.decode_to_vec(input, &mut output);
    decoder.decode_end_to_vec(&mut output);
    output
}

#[cfg(test)]
mod tests {
    const BINARY: [u8; 33] = [
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 127,
    ];
    const TEXT: &str = ":C#(:C?hVB$MSiVEwndBAMZRxwFfBB;IW<}YQVH`H";

    #[test]
    fn alphabet() {
        assert_eq!(super::THRESHOLD, 88);
        for character in [b'"', b'\'', b'\\', b' '] {
            assert!(!super::ALPHABET.contains(character));
        }
        assert_eq!(super::ALPHABET.encode(90), b'-');
    }

    #[test]
    fn encode() {
        assert_eq!(super::encode(b""), "");
        assert_eq!(super::encode([0x00]), "AA");
        assert_eq!(super::encode([0xff, 0xff, 0xff]), "B-tW");
        assert_eq!(super::encode([91, 82, 112, 207]), "6zj=z");
        assert_eq!(super::encode(b"foobar"), "dr/2s)uC");
        assert_eq!(super::encode(BINARY), TEXT);
    }

    #[test]
    fn decode() {
        assert_eq!(super::decode(""), b"");
        assert_eq!(super::decode("B-tW"), [0xff, 0xff, 0xff]);
        assert_eq!(super::decode("6zj=z"), [91, 82, 112, 207]);
        assert_eq!(super::decode("dr/2 s)uC\n"), b"foobar");
        assert_eq!(super::decode(TEXT), BINARY);
    }

    #[test]
    fn into_buffers() {
        let mut encoded = [0u8; super::max_encoded_len(6)];
        assert_eq!(super::encode_into(b"foobar", &mut encoded), Ok(8));
        let mut decoded = [0u8; super::max_decoded_len(8)];
        assert_eq!(super::decode_into(&encoded[..8], &mut decoded), Ok(6));
        assert_eq!(&decoded[..6], b"foobar");
    }

    #[test]
    fn last_byte() {
        let mut zeros = Vec::new();
        let mut ones = Vec::new();
        let mut evens = Vec::new();
        for i in 1..127u8 {
            zeros.push(0);
            ones.push(255);
            evens.push(i * 2);
            assert_eq!(super::decode(super::encode(&zeros)), zeros);
            assert_eq!(super::decode(super::encode(&ones)), ones);
            assert_eq!(super::decode(super::encode(&evens)), evens);
        }
    }
}
