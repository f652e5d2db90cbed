pub mod pack;
pub mod scramble;

pub use pack::{WordTriple, from_words, pack, to_words, unpack};
pub use scramble::{ScrambleConfig, Scrambler};
