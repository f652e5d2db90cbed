use crate::core::constants::ADDRESS_DELIMITER;
use crate::error::{CodecError, DictionaryError};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;
use tracing::info;

/// Ordered, deduplicated word list used as the digits of an address.
///
/// The position of a word is its digit value, so the order of the list is
/// part of the address format: reordering, adding or removing words
/// re-labels every cell. Words are stored trimmed and lowercased.
///
/// A `Dictionary` is immutable once loaded and is meant to be shared behind
/// an `Arc` by every codec that uses it.
///
/// # Example
///
/// ```
/// use w3a_rs::Dictionary;
///
/// # fn main() -> Result<(), w3a_rs::DictionaryError> {
/// let dict = Dictionary::load("ant\nbee\ncat\n", 27)?;
/// assert_eq!(dict.index_of(" Bee ")?, 1);
/// assert_eq!(dict.word_at(2)?, "cat");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashMap<String, u32>,
}

impl Dictionary {
    /// Parses a newline-separated word list.
    ///
    /// Blank lines and lines starting with `#` are skipped. `required_cells`
    /// is the number of cells that need an address; the dictionary is
    /// rejected if `len^3` is smaller.
    pub fn load(source: &str, required_cells: u64) -> Result<Self, DictionaryError> {
        let words = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        Self::from_words(words, required_cells)
    }

    /// Builds a dictionary from an in-memory list of words.
    pub fn from_words<I, S>(words: I, required_cells: u64) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        let mut index: HashMap<String, u32> = HashMap::new();

        for raw in words {
            let word = normalize(raw.as_ref());
            if word.is_empty()
                || word.contains(char::is_whitespace)
                || word.contains(ADDRESS_DELIMITER)
            {
                return Err(DictionaryError::InvalidWord(raw.as_ref().to_string()));
            }

            let position =
                u32::try_from(list.len()).map_err(|_| DictionaryError::TooLarge(list.len()))?;

            match index.entry(word.clone()) {
                Entry::Occupied(_) => return Err(DictionaryError::Duplicate(word)),
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
            list.push(word);
        }

        if list.is_empty() {
            return Err(DictionaryError::Empty);
        }

        let dictionary = Self {
            words: list,
            index,
        };

        if dictionary.capacity() < required_cells as u128 {
            return Err(DictionaryError::TooSmall {
                size: dictionary.len(),
                capacity: dictionary.capacity(),
                required: required_cells,
            });
        }

        info!(
            words = dictionary.len(),
            capacity = %dictionary.capacity(),
            "dictionary loaded"
        );

        Ok(dictionary)
    }

    /// Reads a newline-separated word list from a file.
    pub fn from_path(path: impl AsRef<Path>, required_cells: u64) -> Result<Self, CodecError> {
        let source = fs::read_to_string(path)?;
        Ok(Self::load(&source, required_cells)?)
    }

    /// Returns the position of a word, ignoring case and surrounding whitespace.
    pub fn index_of(&self, word: &str) -> Result<u32, DictionaryError> {
        let word = normalize(word);
        self.index
            .get(&word)
            .copied()
            .ok_or(DictionaryError::UnknownWord(word))
    }

    /// Returns the word at a position.
    pub fn word_at(&self, index: u32) -> Result<&str, DictionaryError> {
        self.words
            .get(index as usize)
            .map(String::as_str)
            .ok_or(DictionaryError::IndexOutOfRange {
                index: index as u64,
                size: self.words.len(),
            })
    }

    /// Number of words, `N`.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The dictionary size as the radix of the word packer.
    pub fn radix(&self) -> u64 {
        self.words.len() as u64
    }

    /// Number of distinct three-word addresses, `N^3`.
    pub fn capacity(&self) -> u128 {
        (self.words.len() as u128).pow(3)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}
