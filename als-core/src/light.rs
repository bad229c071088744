//! Ambient light sample processor
//!
//! ## Driver Contract
//!
//! ```text
//! enable()                          once per activation
//!   │
//!   ▼
//! read HW ─► sample(hw, ts) ─► read(reporter) ─┬─ NoChange          keep thresholds / polling
//!   ▲                                           ├─ UpdateThresholds  program hw_thresh_lo/hi
//!   │                                           └─ PollNext          poll again after poll_delay_ms
//!   └───────────────────────────────────────────┘
//! ```
//!
//! Interrupt-driven drivers program `hw_thresh_lo`/`hw_thresh_hi` on
//! `UpdateThresholds` and only fall back to polling on `PollNext`. Polled
//! drivers always re-arm with `poll_delay_ms`.
//!
//! ## Reporting Policy
//!
//! A *trigger* arms a burst of `report_n` reports. Triggers are:
//! - the first sample after `enable()` (thresholds start at the disabled
//!   sentinels, so every reading is outside the window)
//! - a reading outside `[hw_thresh_lo, hw_thresh_hi]`
//! - a resolution change on the previous sample
//! - every sample, when thresholds are unusable or calibration mode is on
//!
//! Reports within a burst are spaced at least `delay_us` apart. A sample
//! arriving early is not reported; instead the poll delay is shortened to
//! the time remaining. The last report of a burst programs a new window of
//! `thresh_lo`/`thresh_hi` counts around the reported reading.
//!
//! ## Calibration Mode
//!
//! `scale == (1, 0)` reports every sample at the minimum delay, bypassing
//! rate limiting, so a technician can watch raw behaviour while tuning.

use crate::calibration::linear_value;
use crate::config::LightConfig;
use crate::constants::{HW_THRESH_HI_DISABLED, HW_THRESH_LO_DISABLED, NS_PER_US, US_PER_MS};
use crate::resolution::ResolutionTable;
use crate::time::{elapsed_ns, us_to_ns, Timestamp};
use crate::traits::LuxReporter;

/// What the driver has to do after a sample was processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Disposition {
    /// Nothing changed; keep the current thresholds and polling
    NoChange,
    /// Program `hw_thresh_lo`/`hw_thresh_hi`; polled drivers use `poll_delay_ms`
    UpdateThresholds,
    /// Poll again after `poll_delay_ms`, even if interrupt driven
    PollNext,
}

impl Disposition {
    /// Legacy integer code: `0`, `1` or `-1`
    pub const fn code(&self) -> i32 {
        match self {
            Disposition::NoChange => 0,
            Disposition::UpdateThresholds => 1,
            Disposition::PollNext => -1,
        }
    }
}

impl From<Disposition> for i32 {
    fn from(disposition: Disposition) -> Self {
        disposition.code()
    }
}

/// Runtime state of one ambient light sensor
///
/// Public fields are the exchange area with the driver: it writes `hw`,
/// `timestamp` and `delay_us` before [`read`](Self::read) and reads
/// `hw_thresh_lo`, `hw_thresh_hi` and `poll_delay_ms` afterwards.
#[derive(Debug, Clone)]
pub struct AmbientLight {
    /// Active configuration; resolution fields follow the table index
    pub cfg: LightConfig,
    table: Option<ResolutionTable>,
    /// Largest raw value the hardware can produce
    pub hw_mask: u32,
    /// Latest raw reading
    pub hw: u32,
    /// Low interrupt threshold (`u32::MAX` while disabled)
    pub hw_thresh_lo: u32,
    /// High interrupt threshold (`0` while disabled)
    pub hw_thresh_hi: u32,
    /// `cfg.thresh_lo` is usable for this hardware
    pub thresh_valid_lo: bool,
    /// `cfg.thresh_hi` is usable for this hardware
    pub thresh_valid_hi: bool,
    /// Both thresholds usable; hysteresis is active
    pub thresholds_valid: bool,
    /// Reading is at or near zero
    pub hw_limit_lo: bool,
    /// Reading is at or near full scale
    pub hw_limit_hi: bool,
    /// Reports left in the current burst
    pub report: u32,
    /// Timestamp of the latest sample (ns)
    pub timestamp: Timestamp,
    /// Timestamp of the latest report (ns)
    pub timestamp_report: Timestamp,
    /// Requested sampling period (µs)
    pub delay_us: u32,
    /// Poll delay computed by the last call (ms)
    pub poll_delay_ms: u32,
    /// Calibration mode is active
    pub calibration_en: bool,
    /// Latest calibrated value
    pub lux: u32,
    nld_i: usize,
    nld_i_change: bool,
}

impl AmbientLight {
    /// Sensor without dynamic resolution
    pub fn new(cfg: LightConfig, hw_mask: u32) -> Self {
        Self {
            cfg,
            table: None,
            hw_mask,
            hw: 0,
            hw_thresh_lo: HW_THRESH_LO_DISABLED,
            hw_thresh_hi: HW_THRESH_HI_DISABLED,
            thresh_valid_lo: false,
            thresh_valid_hi: false,
            thresholds_valid: false,
            hw_limit_lo: false,
            hw_limit_hi: false,
            report: 0,
            timestamp: 0,
            timestamp_report: 0,
            delay_us: 0,
            poll_delay_ms: 0,
            calibration_en: false,
            lux: 0,
            nld_i: 0,
            nld_i_change: false,
        }
    }

    /// Sensor that ranges across `table`
    pub fn with_table(cfg: LightConfig, hw_mask: u32, table: ResolutionTable) -> Self {
        let mut light = Self::new(cfg, hw_mask);
        light.nld_i = table.index_hi();
        light.table = Some(table);
        light
    }

    /// Dynamic resolution table, if configured
    pub fn table(&self) -> Option<&ResolutionTable> {
        self.table.as_ref()
    }

    /// Active resolution table index, if a table is configured
    pub fn resolution_index(&self) -> Option<usize> {
        self.table.as_ref().map(|_| self.nld_i)
    }

    /// True if the resolution index changed during the last call
    pub fn resolution_changed(&self) -> bool {
        self.nld_i_change
    }

    /// Programmed threshold window, `None` while the disabled sentinels are set
    pub fn threshold_window(&self) -> Option<(u32, u32)> {
        (self.hw_thresh_lo <= self.hw_thresh_hi).then_some((self.hw_thresh_lo, self.hw_thresh_hi))
    }

    /// Store a raw reading (clamped to `hw_mask`) and its timestamp
    pub fn sample(&mut self, hw: u32, timestamp: Timestamp) {
        self.hw = hw.min(self.hw_mask);
        self.timestamp = timestamp;
    }

    /// Reset derived state before sampling starts
    ///
    /// Safe to call repeatedly. The first sample afterwards always reports.
    ///
    /// `poll_delay_ms` is set from `delay_us_min` with or without a table.
    /// Legacy drivers only set it without one; with a table the value is the
    /// starting entry's `delay_min_ms` either way.
    pub fn enable(&mut self) {
        if self.cfg.report_n == 0 {
            self.cfg.report_n = 1;
        }
        self.report = self.cfg.report_n;
        self.timestamp_report = 0;
        self.hw_thresh_hi = HW_THRESH_HI_DISABLED;
        self.hw_thresh_lo = HW_THRESH_LO_DISABLED;

        if let Some(index) = self.table.as_ref().map(ResolutionTable::index_hi) {
            self.select_resolution(index);
        }
        self.poll_delay_ms = self.cfg.delay_us_min / US_PER_MS;

        self.calibration_en = self.cfg.calibration_scale();
        if self.calibration_en {
            log_info!(
                "ALS calibration mode: scale {}.{:09} offset {}.{:09}",
                self.cfg.scale.ival,
                self.cfg.scale.fval,
                self.cfg.offset.ival,
                self.cfg.offset.fval
            );
        }
    }

    /// Stop reporting until the next [`enable`](Self::enable)
    pub fn disable(&mut self) {
        self.report = 0;
        self.calibration_en = false;
        self.hw_thresh_hi = HW_THRESH_HI_DISABLED;
        self.hw_thresh_lo = HW_THRESH_LO_DISABLED;
    }

    /// Make table entry `index` the active resolution
    ///
    /// Returns `PollNext` since thresholds and poll timing computed for the
    /// old resolution no longer apply. Indices outside the table are ignored.
    pub fn select_resolution(&mut self, index: usize) -> Disposition {
        let Some(entry) = self.table.as_ref().and_then(|table| table.get(index)).copied() else {
            log_warn!("Ignoring resolution index {} outside table", index);
            return Disposition::NoChange;
        };

        log_debug!("ALS resolution index {} -> {}", self.nld_i, index);
        self.nld_i = index;
        self.nld_i_change = true;
        self.cfg.apply_entry(&entry);
        Disposition::PollNext
    }

    /// Process the sample stored in `hw`/`timestamp`
    ///
    /// Reports at most one calibrated value to `reporter`, updates the
    /// threshold window, resolution and `poll_delay_ms`, and tells the
    /// driver what to do next.
    pub fn read<R>(&mut self, reporter: &mut R) -> Disposition
    where
        R: LuxReporter + ?Sized,
    {
        let report_n = self.cfg.report_n;
        let mut report_delay_min = true;
        let mut poll_delay_us = 0u32;

        if self.calibration_en {
            self.report = report_n;
        }

        // Rate limit unless a full burst is already pending
        if self.report < report_n {
            let elapsed = elapsed_ns(self.timestamp_report, self.timestamp);
            let period = us_to_ns(self.delay_us);
            if elapsed < period {
                poll_delay_us = ((period - elapsed) / NS_PER_US) as u32;
                report_delay_min = false;
            }
        }

        let (thresh_lo, thresh_hi) = self.update_threshold_flags();
        self.update_limit_flags(thresh_lo, thresh_hi);

        if self.nld_i_change || !self.thresholds_valid || self.outside_window() {
            self.report = report_n;
        }

        let mut disposition = Disposition::NoChange;
        if self.report > 0 && report_delay_min {
            self.report -= 1;
            self.timestamp_report = self.timestamp;
            self.lux = self.calibrated();
            log_trace!("ALS report {} lux (hw {}) at {}", self.lux, self.hw, self.timestamp_report);
            reporter.report(self.lux, self.timestamp_report);

            if self.thresholds_valid && self.report == 0 {
                self.hw_thresh_lo = self.hw.saturating_sub(thresh_lo);
                self.hw_thresh_hi = self.hw.saturating_add(thresh_hi).min(self.hw_mask);
                log_debug!("ALS thresholds [{}, {}]", self.hw_thresh_lo, self.hw_thresh_hi);
                disposition = Disposition::UpdateThresholds;
            }
        }

        self.nld_i_change = false;
        if let Some(index) = self.next_resolution_index() {
            disposition = self.select_resolution(index);
        }

        self.poll_delay_ms = match self.changed_entry_delay_ms() {
            Some(delay_ms) => delay_ms,
            None => {
                if report_delay_min {
                    poll_delay_us = self.delay_us;
                }
                if poll_delay_us < self.cfg.delay_us_min || self.calibration_en {
                    poll_delay_us = self.cfg.delay_us_min;
                }
                poll_delay_us / US_PER_MS
            }
        };

        if self.report > 0 || self.calibration_en {
            disposition = Disposition::PollNext;
        }
        disposition
    }

    /// Validate the configured deltas against the hardware range
    ///
    /// Returns the deltas to use, zero for an unusable one.
    fn update_threshold_flags(&mut self) -> (u32, u32) {
        let mut thresh_lo = self.cfg.thresh_lo;
        let mut thresh_hi = self.cfg.thresh_hi;

        self.thresh_valid_lo = thresh_lo < self.hw_mask;
        if !self.thresh_valid_lo {
            thresh_lo = 0;
        }
        self.thresh_valid_hi = thresh_hi < self.hw_mask;
        if !self.thresh_valid_hi {
            thresh_hi = 0;
        }
        self.thresholds_valid = self.thresh_valid_lo && self.thresh_valid_hi;
        (thresh_lo, thresh_hi)
    }

    fn update_limit_flags(&mut self, thresh_lo: u32, thresh_hi: u32) {
        self.hw_limit_lo = self.hw < thresh_lo || self.hw == 0;
        self.hw_limit_hi =
            self.hw == self.hw_mask || self.hw > self.hw_mask.saturating_sub(thresh_hi);
    }

    fn outside_window(&self) -> bool {
        self.hw < self.hw_thresh_lo || self.hw > self.hw_thresh_hi
    }

    fn calibrated(&self) -> u32 {
        let linear = linear_value(self.hw, self.cfg.resolution, self.cfg.scale);
        self.cfg.calibration_points().apply(linear)
    }

    /// One step along the table, high saturation first
    fn next_resolution_index(&self) -> Option<usize> {
        let table = self.table.as_ref()?;
        if self.hw_limit_hi {
            if let Some(index) = table.step_up(self.nld_i) {
                return Some(index);
            }
        }
        if self.hw_limit_lo {
            return table.step_down(self.nld_i);
        }
        None
    }

    fn changed_entry_delay_ms(&self) -> Option<u32> {
        if !self.nld_i_change {
            return None;
        }
        self.table
            .as_ref()
            .and_then(|table| table.get(self.nld_i))
            .map(|entry| entry.delay_min_ms)
    }
}
