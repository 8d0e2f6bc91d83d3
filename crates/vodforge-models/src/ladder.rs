//! Rendition ladder: target vertical resolution to nominal bitrate.
//!
//! The ladder feeds the BANDWIDTH attribute of master-playlist
//! stream-info lines. Heights outside the ladder fall back to
//! [`DEFAULT_BANDWIDTH`].

/// Bandwidth used for heights not present in the ladder.
pub const DEFAULT_BANDWIDTH: u64 = 2_000_000;

/// Nominal bandwidth per target height, highest first.
const LADDER: &[(u32, u64)] = &[
    (2160, 16_000_000),
    (1440, 10_000_000),
    (1080, 8_000_000),
    (720, 5_000_000),
    (480, 2_500_000),
    (360, 1_000_000),
];

/// Look up the nominal bandwidth for a rendition height.
pub fn bandwidth_for_height(height: u32) -> u64 {
    LADDER
        .iter()
        .find(|(h, _)| *h == height)
        .map(|(_, bw)| *bw)
        .unwrap_or(DEFAULT_BANDWIDTH)
}
