//! Basic Reporting Example
//!
//! Feeds a simulated light level through the sample processor and shows
//! which readings get reported and what the driver is told to do.
//!
//! ## What You'll Learn
//!
//! - Configuring scale, resolution and hysteresis
//! - The enable / sample / read cycle
//! - How the threshold window suppresses small changes
//! - What each `Disposition` asks of the driver
//! - Timestamping samples from a host monotonic clock
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_reporting
//! ```

use als_core::{
    time::{MonotonicTime, TimeSource},
    AmbientLight, Disposition, FixedPoint, LightConfig,
};

fn main() {
    println!("ALS Basic Reporting Example");
    println!("===========================\n");

    // 0.01 lux per count, reported against a 0.01 scale so the framework
    // sees whole counts. Re-report when the reading moves 2% of full scale.
    let config = LightConfig {
        resolution: FixedPoint::new(0, 10_000_000),
        scale: FixedPoint::new(0, 10_000_000),
        thresh_lo: 1300,
        thresh_hi: 1300,
        report_n: 1,
        delay_us_min: 50_000,
        ..LightConfig::default()
    };

    let mut light = AmbientLight::new(config, 0xFFFF);
    light.delay_us = 200_000;
    light.enable();

    // Host stand-in for the kernel's monotonic clock
    let clock = MonotonicTime::new();
    // Office, a passing shadow, lights dimmed, then lights off
    let readings = [30_000, 30_400, 29_100, 31_500, 18_000, 17_900, 2_000, 0];

    println!("{:>8}  {:>6}  {:>18}  {:>10}", "time", "raw", "disposition", "reported");
    for raw in readings {
        light.sample(raw, clock.now());

        let mut reported = None;
        let disposition = light.read(&mut |lux: u32, _ts: u64| reported = Some(lux));

        let action = match disposition {
            Disposition::NoChange => "no change",
            Disposition::UpdateThresholds => "update thresholds",
            Disposition::PollNext => "poll next",
        };
        let reported = reported.map_or_else(|| "-".to_string(), |lux| lux.to_string());
        println!(
            "{:>6}ms  {:>6}  {:>18}  {:>10}",
            clock.now() / 1_000_000,
            raw,
            action,
            reported
        );

        if let Some((lo, hi)) = light.threshold_window() {
            println!("          window [{lo}, {hi}], next poll in {}ms", light.poll_delay_ms);
        }

        // Re-arm the poll timer the way the driver would
        std::thread::sleep(std::time::Duration::from_millis(u64::from(light.poll_delay_ms)));
    }

    println!("\n{}", "=".repeat(60));
    println!("Key Insights:");
    println!("  - The first reading after enable() is always reported");
    println!("  - Readings inside the window are dropped without work");
    println!("  - A new window is centred on every reported reading");
}
