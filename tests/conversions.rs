use proptest::prelude::*;
use tea5767_rs::data_types::Injection;
use tea5767_rs::registers::{
    BAND_MAX_HZ, BAND_MIN_HZ, PLL_STEP_HZ, band_wrap, pll_to_frequency, pll_word, split_pll, to_pll_bytes,
};

#[test]
fn pll_for_known_stations() {
    // 4 * (90.1 MHz + 225 kHz) / 32768 = 11026.0 -> 0x2B12
    assert_eq!(pll_word(90_100_000, Injection::High), 11026);
    assert_eq!(to_pll_bytes(90_100_000), (0x2B, 0x12));
    assert_eq!(to_pll_bytes(88_100_000), (0x2A, 0x1D));
    assert_eq!(to_pll_bytes(BAND_MIN_HZ), (0x29, 0xD4));
    assert_eq!(to_pll_bytes(BAND_MAX_HZ), (0x33, 0x8E));
}

#[test]
fn low_side_pll_uses_difference_frequency() {
    // 4 * (90.1 MHz - 225 kHz) / 32768 = 10971.07 -> 0x2ADB
    assert_eq!(pll_word(90_100_000, Injection::Low), 0x2ADB);
}

#[test]
fn out_of_band_wraps_to_opposite_edge() {
    assert_eq!(band_wrap(87_499_999), BAND_MAX_HZ);
    assert_eq!(band_wrap(107_900_001), BAND_MIN_HZ);
    assert_eq!(band_wrap(0), BAND_MAX_HZ);
    assert_eq!(band_wrap(u32::MAX), BAND_MIN_HZ);
    assert_eq!(band_wrap(BAND_MIN_HZ), BAND_MIN_HZ);
    assert_eq!(band_wrap(BAND_MAX_HZ), BAND_MAX_HZ);

    assert_eq!(to_pll_bytes(87_499_999), to_pll_bytes(BAND_MAX_HZ));
    assert_eq!(to_pll_bytes(107_900_001), to_pll_bytes(BAND_MIN_HZ));
}

#[test]
fn split_masks_to_six_and_eight_bits() {
    assert_eq!(split_pll(0x2B12), (0x2B, 0x12));
    assert_eq!(split_pll(0xFFFF), (0x3F, 0xFF));
}

#[test]
fn reconstruct_known_station() {
    let back = pll_to_frequency(11026, Injection::High);
    assert_eq!(back, 90_099_992);
}

proptest! {
    #[test]
    fn high_side_reconstruction_within_one_step(hz in BAND_MIN_HZ..=BAND_MAX_HZ) {
        let back = pll_to_frequency(pll_word(hz, Injection::High), Injection::High);
        prop_assert!(back <= hz);
        prop_assert!(hz - back < PLL_STEP_HZ);
    }

    #[test]
    fn low_side_reconstruction_within_one_step(hz in BAND_MIN_HZ..=BAND_MAX_HZ) {
        let back = pll_to_frequency(pll_word(hz, Injection::Low), Injection::Low);
        prop_assert!(back <= hz);
        prop_assert!(hz - back < PLL_STEP_HZ);
    }

    #[test]
    fn pll_word_fits_fourteen_bits(hz in any::<u32>()) {
        let (msb, _) = to_pll_bytes(hz);
        prop_assert!(msb <= 0x3F);
        prop_assert!(pll_word(hz, Injection::High) <= 0x3FFF);
    }
}
