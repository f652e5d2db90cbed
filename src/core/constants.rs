/// Address format version for encoding/decoding
pub const ADDRESS_FORMAT_VERSION: u8 = 1;

/// Canonical separator between the three words of an address
pub const ADDRESS_DELIMITER: char = '.';

/// Latitude domain [min, max] in degrees
pub const LAT_RANGE: [f64; 2] = [-90.0, 90.0];

/// Longitude domain [min, max] in degrees
pub const LON_RANGE: [f64; 2] = [-180.0, 180.0];

/// Default latitude step, about 3.09 metres at any latitude
pub const DEFAULT_STEP_DEGREES: f64 = 1.0 / 36000.0;

/// Default longitude step as a multiple of the latitude step
pub const DEFAULT_LON_STEP_FACTOR: f64 = 2.0;

/// Round keys of the default scrambler, one per Feistel round.
///
/// Part of the address format: changing any of them re-labels every cell.
pub const DEFAULT_SCRAMBLE_KEYS: [u64; 6] = [
    0x243F_6A88_85A3_08D3,
    0x1319_8A2E_0370_7344,
    0xA409_3822_299F_31D0,
    0x082E_FA98_EC4E_6C89,
    0x4528_21E6_38D0_1377,
    0xBE54_66CF_34E9_0C6C,
];

/// Minimum number of Feistel rounds
pub const MIN_SCRAMBLE_ROUNDS: usize = 3;

/// Tolerance when deciding whether a step divides the domain exactly
pub(crate) const STEP_EPSILON: f64 = 1e-6;
