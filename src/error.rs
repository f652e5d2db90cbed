use thiserror::Error;

/// Errors raised while building or querying a [`Dictionary`](crate::Dictionary).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    /// The word list contained no words.
    #[error("dictionary is empty")]
    Empty,
    /// A word appears more than once (after trimming and lowercasing).
    #[error("duplicate word in dictionary: {0}")]
    Duplicate(String),
    /// `size^3` is smaller than the number of cells that need an address.
    #[error("dictionary of {size} words addresses {capacity} cells, grid needs {required}")]
    TooSmall {
        size: usize,
        capacity: u128,
        required: u64,
    },
    /// More words than a `u32` digit can index.
    #[error("dictionary of {0} words is too large")]
    TooLarge(usize),
    /// A word contains whitespace or the address delimiter.
    #[error("invalid dictionary word: {0:?}")]
    InvalidWord(String),
    /// The word is not part of the dictionary.
    #[error("unknown word: {0}")]
    UnknownWord(String),
    /// The index is not below the dictionary size.
    #[error("word index {index} out of range for dictionary of {size} words")]
    IndexOutOfRange { index: u64, size: usize },
}

/// Errors raised by the lat/lon grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A coordinate or cell id outside the legal domain.
    #[error("out of range: {0}")]
    OutOfRange(String),
    /// The configured angular step cannot partition the globe.
    #[error("invalid grid step: {0}")]
    InvalidStep(String),
    /// `rows * cols` does not fit in a `u64`.
    #[error("grid of {rows} x {cols} cells is too large")]
    TooManyCells { rows: u64, cols: u64 },
}

/// Errors raised while packing ids into word triples.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// The scrambled id does not fit in three base-N digits.
    #[error("id {id} does not fit in three base-{radix} digits")]
    OutOfRange { id: u128, radix: u64 },
    /// One of the digits is not below the radix.
    #[error("digit {digit} out of range for radix {radix}")]
    DigitOutOfRange { digit: u32, radix: u64 },
    /// The address text is not three non-empty words joined by the delimiter.
    #[error("malformed address: {0:?}")]
    MalformedAddress(String),
}

/// Errors raised while configuring the scrambler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrambleError {
    #[error("scrambler needs at least {min} rounds, got {rounds}")]
    TooFewRounds { rounds: usize, min: usize },
    #[error("scrambler domain must not be empty")]
    EmptyDomain,
}

/// Error type for w3a-rs operations.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Pack(#[from] PackError),
    #[error(transparent)]
    Scramble(#[from] ScrambleError),
    /// The address format version is not supported.
    #[error("unsupported address format version: {0}")]
    UnsupportedVersion(u8),
    /// The scrambler and grid disagree on the number of cells.
    #[error("scrambler covers {scrambler} ids but the grid has {grid} cells")]
    DomainMismatch { scrambler: u64, grid: u64 },
    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(String),
    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<std::io::Error> for CodecError {
    fn from(e: std::io::Error) -> Self {
        CodecError::Io(e.to_string())
    }
}

impl From<csv::Error> for CodecError {
    fn from(e: csv::Error) -> Self {
        CodecError::Csv(e.to_string())
    }
}
