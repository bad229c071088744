//! Auto-Ranging Example
//!
//! Loads a sensor with a three-step gain table from JSON and walks it from
//! direct sunlight into a dark room.
//!
//! ## What You'll Learn
//!
//! - Describing a sensor setup in JSON
//! - Restricting the usable gain range with board properties
//! - How saturation moves the resolution index one step per sample
//! - Poll delays following each entry's integration time
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_auto_ranging
//! ```

use als_core::{read_index_limits, ConfigResult, SensorSetup, TableSetup};

const SETUP: &str = r#"{
    "hw_mask": 65535,
    "config": {
        "scale": { "ival": 0, "fval": 10000000 },
        "thresh_lo": 200,
        "thresh_hi": 200,
        "report_n": 1
    },
    "table": {
        "entries": [
            { "resolution": { "fval": 5000000 },   "max_range": { "ival": 327 },   "milliamp": { "fval": 100000000 }, "delay_min_ms": 400 },
            { "resolution": { "fval": 20000000 },  "max_range": { "ival": 1310 },  "milliamp": { "fval": 110000000 }, "delay_min_ms": 200 },
            { "resolution": { "fval": 80000000 },  "max_range": { "ival": 5242 },  "milliamp": { "fval": 120000000 }, "delay_min_ms": 100 }
        ],
        "limits": { "lo": 0, "hi": 2 }
    }
}"#;

fn main() -> ConfigResult<()> {
    println!("ALS Auto-Ranging Example");
    println!("========================\n");

    let mut setup = SensorSetup::from_json(SETUP)?;

    // A dark cover glass makes the finest gain useless on this board
    let board = [
        ("light_dynamic_resolution_index_limit_low", 1u32),
        ("light_dynamic_resolution_index_limit_high", 2),
    ];
    let limits = read_index_limits(&board, None)?;
    if let Some(table) = setup.table.take() {
        setup.table = Some(TableSetup { entries: table.entries, limits });
    }
    println!("Usable index range: {}..={}\n", limits.lo, limits.hi);

    let mut light = setup.build()?;
    light.delay_us = 100_000;
    light.enable();

    let mut now = 0u64;
    // Sunlight saturates the wide range, then the room goes dark
    let readings = [65_535, 65_535, 40_000, 500, 0, 0, 0, 0];

    for raw in readings {
        light.sample(raw, now);
        let disposition = light.read(&mut |lux: u32, _ts: u64| println!("  report {lux} lux"));

        println!(
            "t={:>5}ms raw {:>5} -> index {:?}, {:?}, next poll {}ms",
            now / 1_000_000,
            raw,
            light.resolution_index(),
            disposition,
            light.poll_delay_ms
        );

        now += u64::from(light.poll_delay_ms) * 1_000_000;
    }

    println!("\n{}", "=".repeat(60));
    println!("Key Insights:");
    println!("  - Sensors start at the widest legal range");
    println!("  - One index step per sample, never past the board limits");
    println!("  - After a change the next poll waits for the new integration time");
    Ok(())
}
