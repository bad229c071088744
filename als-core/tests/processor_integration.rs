//! Sample processor integration tests
//!
//! Drives [`AmbientLight`] the way a chip driver would: enable once, then
//! feed raw readings on a simulated clock and act on the returned
//! [`Disposition`].
//!
//! ## Test Scope
//!
//! - Reporting: first report, bursts, hysteresis window, rate limiting
//! - Calibration mode and two-point calibration
//! - Dynamic resolution stepping and its poll delays
//! - Lifecycle: disable/enable, independent instances

mod common;

use als_core::{AmbientLight, Disposition, FixedPoint, LightConfig};
use common::{basic_config, resolution_table, Driver, DELAY_US, HW_MASK};

const MS: u64 = 1_000_000;

fn plain(cfg: LightConfig) -> Driver {
    Driver::new(AmbientLight::new(cfg, HW_MASK))
}

// ===== REPORTING =====

#[test]
fn first_sample_after_enable_reports() {
    let mut driver = plain(basic_config());

    assert_eq!(driver.step(2000, 0), Disposition::UpdateThresholds);
    assert_eq!(driver.sink.reports, vec![(2000, 0)]);
    assert_eq!(driver.light.threshold_window(), Some((1900, 2100)));
    assert_eq!(driver.light.poll_delay_ms, 100);
}

#[test]
fn zero_report_count_behaves_as_one() {
    let mut driver = plain(LightConfig { report_n: 0, ..basic_config() });
    assert_eq!(driver.light.cfg.report_n, 1);

    assert_eq!(driver.step(2000, 0), Disposition::UpdateThresholds);
    assert_eq!(driver.sink.count(), 1);
}

#[test]
fn readings_inside_window_are_suppressed() {
    let mut driver = plain(basic_config());
    driver.step(2000, 0);

    for hw in [1900, 1950, 2050, 2100] {
        assert_eq!(driver.step_period(hw), Disposition::NoChange);
    }
    assert_eq!(driver.sink.count(), 1);

    // Just outside
    assert_eq!(driver.step_period(2101), Disposition::UpdateThresholds);
    assert_eq!(driver.sink.last(), Some((2101, driver.now())));
    assert_eq!(driver.light.threshold_window(), Some((2001, 2201)));
}

#[test]
fn single_crossing_reports_exactly_report_n_times() {
    let mut driver = plain(basic_config());
    driver.step(2000, 0);
    driver.light.cfg.report_n = 3;
    let before = driver.sink.count();

    // One crossing, then readings inside the window programmed at 2000
    assert_eq!(driver.step_period(2150), Disposition::PollNext);
    assert_eq!(driver.step_period(2090), Disposition::PollNext);
    assert_eq!(driver.step_period(2090), Disposition::UpdateThresholds);
    assert_eq!(driver.sink.count() - before, 3);
    assert_eq!(driver.light.report, 0);
    assert_eq!(driver.light.threshold_window(), Some((1990, 2190)));

    assert_eq!(driver.step_period(2090), Disposition::NoChange);
    assert_eq!(driver.sink.count() - before, 3);
}

#[test]
fn burst_reports_until_reading_settles() {
    let mut driver = plain(basic_config());
    driver.step(2000, 0);
    driver.light.cfg.report_n = 3;

    // Leaving the window arms a burst of three
    assert_eq!(driver.step_period(5000), Disposition::PollNext);
    assert_eq!(driver.light.report, 2);
    // Still outside the old window: burst starts over
    assert_eq!(driver.step_period(5000), Disposition::PollNext);
    assert_eq!(driver.light.report, 2);

    // Back inside: the burst runs out and programs a new window
    assert_eq!(driver.step_period(2000), Disposition::PollNext);
    assert_eq!(driver.step_period(2050), Disposition::UpdateThresholds);
    assert_eq!(driver.light.threshold_window(), Some((1950, 2150)));
    assert_eq!(driver.sink.count(), 5);

    assert_eq!(driver.step_period(2050), Disposition::NoChange);
    assert_eq!(driver.sink.count(), 5);
}

#[test]
fn thresholds_only_programmed_at_end_of_burst() {
    let cfg = LightConfig { report_n: 2, ..basic_config() };
    let mut driver = plain(cfg);

    assert_eq!(driver.step(2000, 0), Disposition::PollNext);
    assert_eq!(driver.light.threshold_window(), None);

    // Sentinels still armed: every reading counts as a crossing
    assert_eq!(driver.step_period(2000), Disposition::PollNext);
    assert_eq!(driver.light.report, 1);
    assert_eq!(driver.sink.count(), 2);
}

#[test]
fn window_clamps_to_counter_range() {
    let mut driver = plain(basic_config());

    driver.step(30, 0);
    assert_eq!(driver.light.threshold_window(), Some((0, 130)));

    driver.step_period(HW_MASK);
    assert_eq!(driver.light.threshold_window(), Some((HW_MASK - 100, HW_MASK)));
}

// ===== RATE LIMITING =====

#[test]
fn early_crossing_waits_for_remaining_period() {
    let mut driver = plain(basic_config());
    driver.step(2000, 0);

    // Crossing 30ms after the last report
    assert_eq!(driver.step(5000, 30_000), Disposition::PollNext);
    assert_eq!(driver.sink.count(), 1);
    assert_eq!(driver.light.poll_delay_ms, 70);

    assert_eq!(driver.step(5000, 70_000), Disposition::UpdateThresholds);
    assert_eq!(driver.sink.last(), Some((5000, 100 * MS)));
}

#[test]
fn remaining_wait_never_below_minimum_delay() {
    let mut driver = plain(basic_config());
    driver.step(2000, 0);

    // 20ms left, but the part can't sample faster than 50ms
    driver.step(5000, 80_000);
    assert_eq!(driver.sink.count(), 1);
    assert_eq!(driver.light.poll_delay_ms, 50);
}

#[test]
fn poll_delay_follows_requested_period() {
    let mut driver = plain(basic_config());
    driver.step(2000, 0);
    assert_eq!(driver.light.poll_delay_ms, DELAY_US / 1000);

    // Faster than the part allows
    driver.light.delay_us = 10_000;
    driver.step_period(2000);
    assert_eq!(driver.light.poll_delay_ms, 50);
}

// ===== CALIBRATION =====

#[test]
fn calibration_mode_reports_every_sample() {
    let cfg = LightConfig {
        resolution: FixedPoint::from_int(1),
        scale: FixedPoint::ONE,
        ..basic_config()
    };
    let mut driver = plain(cfg);
    assert!(driver.light.calibration_en);

    for (i, hw) in [500, 501, 502, 502].into_iter().enumerate() {
        // Well inside both the window and the rate limit
        let disposition = driver.step(hw, if i == 0 { 0 } else { 1_000 });
        assert_eq!(disposition, Disposition::PollNext);
        assert_eq!(driver.light.poll_delay_ms, 50);
    }

    let lux: Vec<u32> = driver.sink.reports.iter().map(|(lux, _)| *lux).collect();
    assert_eq!(lux, vec![500, 501, 502, 502]);
}

#[test]
fn two_point_calibration_applied_to_reports() {
    let cfg = LightConfig {
        uncal_lo: 100,
        uncal_hi: 1100,
        cal_lo: 80,
        cal_hi: 1280,
        ..basic_config()
    };
    let mut driver = plain(cfg);

    driver.step(600, 0);
    assert_eq!(driver.sink.last(), Some((680, 0)));
    // Thresholds stay in raw counts
    assert_eq!(driver.light.threshold_window(), Some((500, 700)));
}

#[test]
fn unusable_threshold_reports_every_sample() {
    let mut driver = plain(LightConfig { thresh_lo: HW_MASK, ..basic_config() });

    for _ in 0..3 {
        assert_eq!(driver.step_period(2000), Disposition::NoChange);
    }
    assert_eq!(driver.sink.count(), 3);
    assert!(!driver.light.thresholds_valid);
    assert_eq!(driver.light.threshold_window(), None);
}

// ===== DYNAMIC RESOLUTION =====

#[test]
fn dark_reading_steps_down_one_index_per_sample() {
    let mut driver = Driver::new(AmbientLight::with_table(basic_config(), HW_MASK, resolution_table(0, 2)));
    assert_eq!(driver.light.resolution_index(), Some(2));
    assert_eq!(driver.light.poll_delay_ms, 100);

    assert_eq!(driver.step(0, 0), Disposition::PollNext);
    assert_eq!(driver.light.resolution_index(), Some(1));
    assert_eq!(driver.light.poll_delay_ms, 200);

    assert_eq!(driver.step(0, 200_000), Disposition::PollNext);
    assert_eq!(driver.light.resolution_index(), Some(0));
    assert_eq!(driver.light.poll_delay_ms, 400);

    // Bottom of the range: report at the new resolution, stay put
    assert_eq!(driver.step(0, 400_000), Disposition::UpdateThresholds);
    assert_eq!(driver.light.resolution_index(), Some(0));
    assert!(!driver.light.resolution_changed());
    assert_eq!(driver.sink.count(), 3);

    assert_eq!(driver.step(0, 400_000), Disposition::NoChange);
    assert_eq!(driver.sink.count(), 3);
}

#[test]
fn saturated_reading_steps_up() {
    let mut driver = Driver::new(AmbientLight::with_table(basic_config(), HW_MASK, resolution_table(0, 2)));
    driver.light.select_resolution(0);

    assert_eq!(driver.step(HW_MASK, 0), Disposition::PollNext);
    assert!(driver.light.hw_limit_hi);
    assert_eq!(driver.light.resolution_index(), Some(1));
    assert_eq!(driver.light.cfg.delay_us_min, 200_000);
}

#[test]
fn limits_restrict_stepping() {
    let mut driver = Driver::new(AmbientLight::with_table(basic_config(), HW_MASK, resolution_table(1, 1)));
    assert_eq!(driver.light.resolution_index(), Some(1));

    driver.step(HW_MASK, 0);
    assert_eq!(driver.light.resolution_index(), Some(1));
    driver.step(0, 200_000);
    assert_eq!(driver.light.resolution_index(), Some(1));
}

#[test]
fn resolution_change_rescales_lux() {
    let mut driver = Driver::new(AmbientLight::with_table(basic_config(), HW_MASK, resolution_table(0, 2)));

    // 0.08 lux/count at the widest range
    driver.step(1000, 0);
    assert_eq!(driver.sink.last(), Some((8000, 0)));

    driver.light.select_resolution(1);
    driver.step(1000, 200_000);
    assert_eq!(driver.sink.last(), Some((2000, 200 * MS)));
}

// ===== LIFECYCLE =====

#[test]
fn enable_rearms_first_report() {
    let mut driver = plain(basic_config());
    driver.step(2000, 0);

    driver.light.disable();
    assert_eq!(driver.light.report, 0);
    assert_eq!(driver.light.threshold_window(), None);

    driver.light.enable();
    // Inside the old window and well inside the period
    assert_eq!(driver.step(2000, 10_000), Disposition::UpdateThresholds);
    assert_eq!(driver.sink.count(), 2);
}

#[test]
fn instances_are_independent() {
    let mut bright = plain(basic_config());
    let mut dim = plain(LightConfig { thresh_lo: 10, thresh_hi: 10, ..basic_config() });

    bright.step(40_000, 0);
    dim.step(20, 0);
    bright.step_period(40_050);

    assert_eq!(bright.sink.count(), 1);
    assert_eq!(dim.sink.count(), 1);
    assert_eq!(bright.light.threshold_window(), Some((39_900, 40_100)));
    assert_eq!(dim.light.threshold_window(), Some((10, 30)));
}
