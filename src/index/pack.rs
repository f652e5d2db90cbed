use crate::core::constants::ADDRESS_DELIMITER;
use crate::dictionary::Dictionary;
use crate::error::{CodecError, DictionaryError, PackError};

/// Three dictionary positions `(i1, i2, i3)` encoding one scrambled id as
/// the base-`N` number `i1*N^2 + i2*N + i3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordTriple(pub [u32; 3]);

impl WordTriple {
    pub fn new(i1: u32, i2: u32, i3: u32) -> Self {
        Self([i1, i2, i3])
    }

    pub fn digits(&self) -> [u32; 3] {
        self.0
    }
}

/// Splits a scrambled id into three base-`radix` digits, most significant
/// first.
///
/// # Example
/// ```
/// use w3a_rs::{pack, WordTriple};
///
/// let triple = pack(286, 8).unwrap();
/// assert_eq!(triple, WordTriple::new(4, 3, 6));
/// ```
///
/// # Errors
///
/// - [`PackError::OutOfRange`] - `scrambled_id >= radix^3`
pub fn pack(scrambled_id: u64, radix: u64) -> Result<WordTriple, PackError> {
    let n = radix as u128;
    let id = scrambled_id as u128;
    let out_of_range = || PackError::OutOfRange { id, radix };

    if n.checked_pow(3).is_some_and(|capacity| id >= capacity) {
        return Err(out_of_range());
    }

    let digit = |value: u128| u32::try_from(value).map_err(|_| out_of_range());

    Ok(WordTriple([
        digit(id / (n * n))?,
        digit((id / n) % n)?,
        digit(id % n)?,
    ]))
}

/// Joins three base-`radix` digits back into a scrambled id.
///
/// # Errors
///
/// - [`PackError::DigitOutOfRange`] - a digit is `>= radix`
/// - [`PackError::OutOfRange`] - the value does not fit in a `u64`
pub fn unpack(triple: WordTriple, radix: u64) -> Result<u64, PackError> {
    let n = radix as u128;
    let mut value: u128 = 0;

    for digit in triple.0 {
        if digit as u64 >= radix {
            return Err(PackError::DigitOutOfRange { digit, radix });
        }
        value = value * n + digit as u128;
    }

    u64::try_from(value).map_err(|_| PackError::OutOfRange { id: value, radix })
}

/// Renders a triple as `"w1.w2.w3"`.
pub fn to_words(triple: WordTriple, dictionary: &Dictionary) -> Result<String, DictionaryError> {
    let [i1, i2, i3] = triple.0;
    Ok(format!(
        "{}{d}{}{d}{}",
        dictionary.word_at(i1)?,
        dictionary.word_at(i2)?,
        dictionary.word_at(i3)?,
        d = ADDRESS_DELIMITER
    ))
}

/// Parses `"w1.w2.w3"` into a triple.
///
/// Surrounding whitespace is ignored, on the whole text and on each word,
/// and words are matched case-insensitively.
///
/// # Errors
///
/// - [`PackError::MalformedAddress`] - not exactly three non-empty words
/// - [`DictionaryError::UnknownWord`] - a word is not in the dictionary
pub fn from_words(text: &str, dictionary: &Dictionary) -> Result<WordTriple, CodecError> {
    let tokens: Vec<&str> = text.trim().split(ADDRESS_DELIMITER).map(str::trim).collect();

    if tokens.len() != 3 || tokens.iter().any(|token| token.is_empty()) {
        return Err(PackError::MalformedAddress(text.to_string()).into());
    }

    let mut digits = [0u32; 3];
    for (slot, token) in digits.iter_mut().zip(&tokens) {
        *slot = dictionary.index_of(token)?;
    }

    Ok(WordTriple(digits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn toy_dictionary() -> Dictionary {
        Dictionary::from_words(
            ["ant", "bee", "cat", "dog", "elk", "fox", "gnu", "hen"],
            512,
        )
        .unwrap()
    }

    #[test]
    fn test_pack_digits() -> Result<(), PackError> {
        assert_eq!(pack(0, 8)?, WordTriple::new(0, 0, 0));
        assert_eq!(pack(286, 8)?, WordTriple::new(4, 3, 6));
        assert_eq!(pack(511, 8)?, WordTriple::new(7, 7, 7));
        assert_eq!(pack(1_000_000, 40_000)?, WordTriple::new(0, 25, 0));
        Ok(())
    }

    #[test]
    fn test_pack_unpack_every_toy_id() -> Result<(), PackError> {
        let mut seen = HashSet::new();
        for id in 0..512 {
            let triple = pack(id, 8)?;
            assert!(seen.insert(triple));
            assert_eq!(unpack(triple, 8)?, id);
        }
        Ok(())
    }

    #[test]
    fn test_pack_out_of_range() {
        assert_eq!(pack(512, 8), Err(PackError::OutOfRange { id: 512, radix: 8 }));
        assert!(matches!(pack(0, 0), Err(PackError::OutOfRange { .. })));
    }

    #[test]
    fn test_unpack_digit_out_of_range() {
        assert_eq!(
            unpack(WordTriple::new(1, 8, 0), 8),
            Err(PackError::DigitOutOfRange { digit: 8, radix: 8 })
        );
    }

    #[test]
    fn test_unpack_overflow() {
        let max = u32::MAX;
        let result = unpack(WordTriple::new(max - 1, max - 1, max - 1), max as u64);
        assert!(matches!(result, Err(PackError::OutOfRange { .. })));
    }

    #[test]
    fn test_to_words() -> Result<(), DictionaryError> {
        let dict = toy_dictionary();
        assert_eq!(to_words(WordTriple::new(4, 3, 6), &dict)?, "elk.dog.gnu");
        assert!(matches!(
            to_words(WordTriple::new(0, 0, 9), &dict),
            Err(DictionaryError::IndexOutOfRange { index: 9, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_from_words() -> Result<(), CodecError> {
        let dict = toy_dictionary();
        assert_eq!(from_words("elk.dog.gnu", &dict)?, WordTriple::new(4, 3, 6));
        assert_eq!(
            from_words("  Elk . dog.GNU\n", &dict)?,
            WordTriple::new(4, 3, 6)
        );
        Ok(())
    }

    #[test]
    fn test_malformed_addresses() {
        let dict = toy_dictionary();
        for text in ["apple.banana", "ant..bee", "ant.bee.cat.dog", "", "  ", "ant bee cat", ".ant.bee"] {
            assert!(
                matches!(
                    from_words(text, &dict),
                    Err(CodecError::Pack(PackError::MalformedAddress(_)))
                ),
                "{:?} should be malformed",
                text
            );
        }
    }

    #[test]
    fn test_unknown_word() {
        let dict = toy_dictionary();
        let result = from_words("ant.bee.doesnotexist", &dict);
        assert!(matches!(
            result,
            Err(CodecError::Dictionary(DictionaryError::UnknownWord(word))) if word == "doesnotexist"
        ));
    }

    proptest! {
        #[test]
        fn pack_unpack_round_trip(radix in 1u64..100_000, seed in any::<u64>()) {
            let id = seed % (radix * radix * radix);
            let triple = pack(id, radix).unwrap();
            for digit in triple.digits() {
                prop_assert!((digit as u64) < radix);
            }
            prop_assert_eq!(unpack(triple, radix).unwrap(), id);
        }
    }
}
