use crate::core::constants::{DEFAULT_SCRAMBLE_KEYS, MIN_SCRAMBLE_ROUNDS};
use crate::error::{GridError, ScrambleError};
use serde::{Deserialize, Serialize};

const MIX_A: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX_B: u64 = 0xD6E8_FEB8_6659_FD93;

/// Round keys for the [`Scrambler`], one per Feistel round.
///
/// The keys are part of the address format. They are fixed for the life of
/// a dictionary/grid pairing; tests substitute shorter key lists to get a
/// different toy permutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    pub keys: Vec<u64>,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            keys: DEFAULT_SCRAMBLE_KEYS.to_vec(),
        }
    }
}

impl ScrambleConfig {
    pub fn new(keys: Vec<u64>) -> Self {
        Self { keys }
    }
}

/// Fixed permutation of `[0, domain)` that breaks the locality of cell ids.
///
/// Neighbouring cells have consecutive (or `cols`-apart) ids. The scrambler
/// maps them to ids spread over the whole domain so that one address gives
/// no hint of the addresses around it.
///
/// # Construction
///
/// A balanced Feistel network over `2h` bits, where `h` is half the bit
/// length of `domain - 1` rounded up:
///
/// | Step | Operation                                                   |
/// |------|-------------------------------------------------------------|
/// | 1    | Split `x` into high half `L` and low half `R` of `h` bits   |
/// | 2    | For each key `k`: `(L, R) = (R, L ^ F(R, k))`               |
/// | 3    | Join `L` and `R` back into one `2h`-bit value               |
///
/// `F` is a multiply/xor-shift mix of `R ^ k` truncated to `h` bits. Every
/// Feistel network is a bijection on `[0, 2^2h)` whatever `F` is; decryption
/// runs the rounds backwards. Since `2^2h` may exceed `domain`, the
/// permutation is restricted by cycle walking: it is re-applied until the
/// value lands back inside the domain. `2^2h < 4 * domain`, so this takes a
/// handful of iterations at most on average, and it always terminates
/// because the starting value lies on the same cycle.
///
/// Only wrapping `u64` arithmetic is used, so the output is identical on
/// every platform.
///
/// # Example
///
/// ```
/// use w3a_rs::{ScrambleConfig, Scrambler};
///
/// # fn main() -> Result<(), w3a_rs::CodecError> {
/// let scrambler = Scrambler::new(&ScrambleConfig::default(), 512)?;
/// let scrambled = scrambler.scramble(0)?;
/// assert_eq!(scrambled, 286);
/// assert_eq!(scrambler.unscramble(scrambled)?, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrambler {
    keys: Vec<u64>,
    domain: u64,
    half_bits: u32,
    half_mask: u64,
}

impl Scrambler {
    pub fn new(config: &ScrambleConfig, domain: u64) -> Result<Self, ScrambleError> {
        if config.keys.len() < MIN_SCRAMBLE_ROUNDS {
            return Err(ScrambleError::TooFewRounds {
                rounds: config.keys.len(),
                min: MIN_SCRAMBLE_ROUNDS,
            });
        }
        if domain == 0 {
            return Err(ScrambleError::EmptyDomain);
        }

        let bits = u64::BITS - (domain - 1).leading_zeros();
        let half_bits = bits.div_ceil(2).max(1);
        let half_mask = (1u64 << half_bits) - 1;

        Ok(Self {
            keys: config.keys.clone(),
            domain,
            half_bits,
            half_mask,
        })
    }

    /// Number of ids the permutation covers.
    pub fn domain(&self) -> u64 {
        self.domain
    }

    pub fn rounds(&self) -> usize {
        self.keys.len()
    }

    /// Maps a cell id to its scrambled id.
    pub fn scramble(&self, cell_id: u64) -> Result<u64, GridError> {
        self.check(cell_id)?;
        let mut value = cell_id;
        loop {
            value = self.encrypt(value);
            if value < self.domain {
                return Ok(value);
            }
        }
    }

    /// Maps a scrambled id back to its cell id.
    pub fn unscramble(&self, scrambled_id: u64) -> Result<u64, GridError> {
        self.check(scrambled_id)?;
        let mut value = scrambled_id;
        loop {
            value = self.decrypt(value);
            if value < self.domain {
                return Ok(value);
            }
        }
    }

    fn check(&self, value: u64) -> Result<(), GridError> {
        if value >= self.domain {
            return Err(GridError::OutOfRange(format!(
                "id {} >= {}",
                value, self.domain
            )));
        }
        Ok(())
    }

    fn encrypt(&self, value: u64) -> u64 {
        let mut left = value >> self.half_bits;
        let mut right = value & self.half_mask;

        for &key in &self.keys {
            let next = left ^ self.round(right, key);
            left = right;
            right = next;
        }

        (left << self.half_bits) | right
    }

    fn decrypt(&self, value: u64) -> u64 {
        let mut left = value >> self.half_bits;
        let mut right = value & self.half_mask;

        for &key in self.keys.iter().rev() {
            let prev = right ^ self.round(left, key);
            right = left;
            left = prev;
        }

        (left << self.half_bits) | right
    }

    fn round(&self, half: u64, key: u64) -> u64 {
        let mut x = half ^ key;
        x = x.wrapping_mul(MIX_A);
        x ^= x >> 32;
        x = x.wrapping_mul(MIX_B);
        x ^= x >> 32;
        x & self.half_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn toy() -> Scrambler {
        Scrambler::new(&ScrambleConfig::default(), 512).unwrap()
    }

    #[test]
    fn test_toy_permutation_is_total_bijection() -> Result<(), GridError> {
        let scrambler = toy();
        let mut seen = HashSet::new();

        for id in 0..512 {
            let scrambled = scrambler.scramble(id)?;
            assert!(scrambled < 512);
            assert!(seen.insert(scrambled), "{} hit twice", scrambled);
            assert_eq!(scrambler.unscramble(scrambled)?, id);
        }
        assert_eq!(seen.len(), 512);
        Ok(())
    }

    #[test]
    fn test_toy_fixed_values() -> Result<(), GridError> {
        let scrambler = toy();
        assert_eq!(scrambler.scramble(0)?, 286);
        assert_eq!(scrambler.scramble(1)?, 416);
        assert_eq!(scrambler.scramble(511)?, 216);
        Ok(())
    }

    #[test]
    fn test_not_identity_or_reversal() -> Result<(), GridError> {
        let scrambler = toy();
        let mut fixed = 0;
        let mut reversed = 0;

        for id in 0..512 {
            let scrambled = scrambler.scramble(id)?;
            if scrambled == id {
                fixed += 1;
            }
            if scrambled == 511 - id {
                reversed += 1;
            }
        }

        assert_eq!(fixed, 0);
        assert!(reversed < 8);
        Ok(())
    }

    #[test]
    fn test_default_domain_round_trip() -> Result<(), GridError> {
        let scrambler = Scrambler::new(&ScrambleConfig::default(), 41_990_400_000_000).unwrap();

        assert_eq!(scrambler.scramble(0)?, 41_573_320_024_768);
        assert_eq!(scrambler.scramble(1)?, 21_006_331_720_200);
        assert_eq!(scrambler.unscramble(18_168_089_769_752)?, 41_990_399_999_999);

        for id in [0, 1, 123_456_789, 41_990_399_999_999] {
            assert_eq!(scrambler.unscramble(scrambler.scramble(id)?)?, id);
        }
        Ok(())
    }

    #[test]
    fn test_adjacent_cells_spread_like_random_pairs() -> Result<(), GridError> {
        // Grid of 1000 rows x 2000 cols, neighbours east and north.
        let (rows, cols) = (1000u64, 2000u64);
        let total = rows * cols;
        let scrambler = Scrambler::new(&ScrambleConfig::default(), total).unwrap();
        let samples = 2000u64;

        let mut adjacent = 0.0;
        let mut random = 0.0;
        for i in 0..samples {
            let row = (i * 7919) % (rows - 1);
            let col = (i * 104_729) % (cols - 1);
            let id = row * cols + col;
            let s = scrambler.scramble(id)?;
            adjacent += s.abs_diff(scrambler.scramble(id + 1)?) as f64;
            adjacent += s.abs_diff(scrambler.scramble(id + cols)?) as f64;

            let x = (i * 2_654_435_761) % total;
            let y = (i * 40_503 + 977) % total;
            random += scrambler.scramble(x)?.abs_diff(scrambler.scramble(y)?) as f64;
        }

        let adjacent_mean = adjacent / (2 * samples) as f64 / total as f64;
        let random_mean = random / samples as f64 / total as f64;

        // Uniform pairs average a third of the domain apart.
        assert!(adjacent_mean > 0.25, "adjacent mean {}", adjacent_mean);
        assert!(
            (adjacent_mean - random_mean).abs() / random_mean < 0.15,
            "adjacent {} vs random {}",
            adjacent_mean,
            random_mean
        );
        Ok(())
    }

    #[test]
    fn test_keys_change_permutation() -> Result<(), GridError> {
        let default = toy();
        let other = Scrambler::new(&ScrambleConfig::new(vec![1, 2, 3, 4]), 512).unwrap();

        let differs = (0..512).any(|id| default.scramble(id).ok() != other.scramble(id).ok());
        assert!(differs);
        Ok(())
    }

    #[test]
    fn test_single_cell_domain() -> Result<(), GridError> {
        let scrambler = Scrambler::new(&ScrambleConfig::default(), 1).unwrap();
        assert_eq!(scrambler.scramble(0)?, 0);
        assert_eq!(scrambler.unscramble(0)?, 0);
        Ok(())
    }

    #[test]
    fn test_out_of_range_ids() {
        let scrambler = toy();
        assert!(matches!(scrambler.scramble(512), Err(GridError::OutOfRange(_))));
        assert!(matches!(
            scrambler.unscramble(u64::MAX),
            Err(GridError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_invalid_config() {
        assert_eq!(
            Scrambler::new(&ScrambleConfig::new(vec![1, 2]), 512),
            Err(ScrambleError::TooFewRounds { rounds: 2, min: 3 })
        );
        assert_eq!(
            Scrambler::new(&ScrambleConfig::default(), 0),
            Err(ScrambleError::EmptyDomain)
        );
    }

    #[test]
    fn test_full_width_domain() -> Result<(), GridError> {
        let scrambler = Scrambler::new(&ScrambleConfig::default(), u64::MAX).unwrap();
        for id in [0, 42, u64::MAX - 1] {
            assert_eq!(scrambler.unscramble(scrambler.scramble(id)?)?, id);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn scramble_is_invertible(domain in 1u64..1_000_000_000_000, seed in any::<u64>()) {
            let scrambler = Scrambler::new(&ScrambleConfig::default(), domain).unwrap();
            let id = seed % domain;
            let scrambled = scrambler.scramble(id).unwrap();
            prop_assert!(scrambled < domain);
            prop_assert_eq!(scrambler.unscramble(scrambled).unwrap(), id);
        }
    }
}
