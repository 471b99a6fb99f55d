//! basE93: 93 printable ASCII characters, including the space.

pub use crate::base_packed::{max_decoded_len, max_encoded_len, Alphabet, Error};

pub const ALPHABET: Alphabet<93> =
    match Alphabet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&'()*+,-./:;<=>?@[]^_`{|}~ ") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("Could not build alphabet"),
    };

/// 13-bit values up to this one are packed with a 14th bit.
pub const THRESHOLD: u32 = crate::base_packed::threshold(93);

pub type Encoder = crate::base_packed::Encoder<'static, 93>;
pub type Decoder = crate::base_packed::Decoder<'static, 93>;

pub fn encoder() -> Encoder {
    Encoder::new(&ALPHABET)
}

pub fn decoder() -> Decoder {
    Decoder::new(&ALPHABET)
}

/// One-shot encode into a caller buffer sized with [`max_encoded_len`].
pub fn encode_into<O: AsMut<[u8]> + ?Sized>(input: impl AsRef<[u8]>, output: &mut O) -> Result<usize, Error> {
    let output = output.as_mut();
    let mut encoder = encoder();
    let len = encoder.encode_into(input, output)?;
    Ok(len + encoder.encode_end_into(&mut output[len..])?)
}

pub fn encode(input: impl AsRef<[u8]>) -> String {
    encode_with_prefix("", input)
}

/// Encodes `input` after a verbatim `prefix`.
pub fn encode_with_prefix(prefix: &str, input: impl AsRef<[u8]>) -> String {
    let mut output = Vec::new();
    let mut encoder = encoder();
    encoder.encode_to_vec(input, &mut output);
    encoder.encode_end_to_vec(&mut output);
    let mut text = String::with_capacity(prefix.len() + output.len());
    text.push_str(prefix);
    text.extend(output.into_iter().map(char::from));
    text
}

/// One-shot decode into a caller buffer sized with [`max_decoded_len`].
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
    const TEXT: &str = "*CLhr|aIk{7|3H;+quJW*W0GC6|'1Q339EDUV[>V";

    #[test]
    fn alphabet() {
        assert_eq!(super::ALPHABET.len(), 93);
        assert_eq!(super::THRESHOLD, 456);
        assert_eq!(super::ALPHABET.encode(0), b'A');
        assert_eq!(super::ALPHABET.encode(92), b' ');
        assert_eq!(super::ALPHABET.lookup(b'"'), 93);
        assert_eq!(super::ALPHABET.lookup(b'\\'), 93);
        assert_eq!(super::ALPHABET.lookup(b'\n'), 93);
        assert_eq!(super::ALPHABET.lookup(b'~'), 91);
        for (digit, &character) in super::ALPHABET.characters().iter().enumerate() {
            assert_eq!(super::ALPHABET.lookup(character) as usize, digit);
        }
    }

    #[test]
    fn encode() {
        assert_eq!(super::encode(b""), "");
        assert_eq!(super::encode([0x00]), "AA");
        assert_eq!(super::encode([0xff]), ")C");
        assert_eq!(super::encode([0x00, 0x00, 0x00]), "AAAA");
        assert_eq!(super::encode([0xff, 0xff, 0xff]), "H{BW");
        assert_eq!(super::encode([91, 82, 112, 207]), "xy'/z");
        assert_eq!(super::encode(b"Hello, World!"), "yOeJ#:{A0-)<gY)F");
        assert_eq!(super::encode(BINARY), TEXT);
    }

    #[test]
    fn decode() {
        assert_eq!(super::decode(""), b"");
        assert_eq!(super::decode("AA"), [0x00]);
        assert_eq!(super::decode("H{BW"), [0xff, 0xff, 0xff]);
        assert_eq!(super::decode("xy'/z"), [91, 82, 112, 207]);
        assert_eq!(super::decode("yOeJ#:{A0-)<gY)F"), b"Hello, World!");
        assert_eq!(super::decode(TEXT), BINARY);
    }

    #[test]
    fn prefix() {
        let text = super::encode_with_prefix("\u{1b}Bin:", BINARY);
        assert_eq!(text, format!("\u{1b}Bin:{}", TEXT));
        assert_eq!(super::decode(&text["\u{1b}Bin:".len()..]), BINARY);
    }

    #[test]
    fn into_buffers() {
        let mut encoded = [0u8; super::max_encoded_len(BINARY.len())];
        let len = super::encode_into(BINARY, &mut encoded);
        assert_eq!(len, Ok(TEXT.len()));
        assert_eq!(&encoded[..TEXT.len()], TEXT.as_bytes());

        let mut decoded = [0u8; super::max_decoded_len(TEXT.len())];
        assert_eq!(super::decode_into(TEXT, &mut decoded), Ok(BINARY.len()));
        assert_eq!(&decoded[..BINARY.len()], BINARY);

        let mut small = [0u8; 4];
        assert_eq!(super::encode_into(BINARY, &mut small), Err(super::Error::BufferTooSmall));
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
