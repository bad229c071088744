//! Dynamic resolution index limits from board properties
//!
//! Boards describe which part of a driver's resolution table is usable with
//! two unsigned properties:
//!
//! ```text
//! <dev>_dynamic_resolution_index_limit_low  = <u32>
//! <dev>_dynamic_resolution_index_limit_high = <u32>
//! ```
//!
//! `<dev>` defaults to `light`. Both properties are required, and `high`
//! must not be below `low`. Where the properties come from (device tree,
//! ACPI, a JSON file) is abstracted behind [`PropertySource`].

use core::fmt::Write;

use heapless::String;

use crate::constants::{DEFAULT_DEVICE_NAME, MAX_PROPERTY_NAME};
use crate::errors::{ConfigError, ConfigResult, LimitBound};
use crate::resolution::{ResolutionEntry, ResolutionTable};

/// Read-only source of named unsigned properties
pub trait PropertySource {
    /// Value of `name`, or `None` if absent or not a `u32`
    fn read_u32(&self, name: &str) -> Option<u32>;
}

impl<'a> PropertySource for [(&'a str, u32)] {
    fn read_u32(&self, name: &str) -> Option<u32> {
        self.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
    }
}

impl<'a, const N: usize> PropertySource for [(&'a str, u32); N] {
    fn read_u32(&self, name: &str) -> Option<u32> {
        self.as_slice().read_u32(name)
    }
}

#[cfg(feature = "alloc")]
impl<K> PropertySource for alloc::collections::BTreeMap<K, u32>
where
    K: core::borrow::Borrow<str> + Ord,
{
    fn read_u32(&self, name: &str) -> Option<u32> {
        self.get(name).copied()
    }
}

#[cfg(feature = "json")]
impl PropertySource for serde_json::Map<alloc::string::String, serde_json::Value> {
    fn read_u32(&self, name: &str) -> Option<u32> {
        self.get(name)?.as_u64()?.try_into().ok()
    }
}

/// Legal index range within a resolution table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexLimits {
    /// Lowest usable index (highest gain)
    pub lo: u32,
    /// Highest usable index (widest range)
    pub hi: u32,
}

impl IndexLimits {
    /// Build a resolution table restricted to these limits
    pub fn table(&self, entries: &[ResolutionEntry]) -> ConfigResult<ResolutionTable> {
        ResolutionTable::new(entries, self.lo, self.hi)
    }
}

/// Property name for one bound of `dev`
fn property_name(dev: &str, bound: LimitBound) -> ConfigResult<String<MAX_PROPERTY_NAME>> {
    let mut name = String::new();
    write!(name, "{}_dynamic_resolution_index_limit_{}", dev, bound.suffix())
        .map_err(|_| ConfigError::NameTooLong)?;
    Ok(name)
}

fn read_limit<S>(source: &S, dev: &str, bound: LimitBound) -> ConfigResult<u32>
where
    S: PropertySource + ?Sized,
{
    let name = property_name(dev, bound)?;
    source.read_u32(&name).ok_or_else(|| {
        log_warn!("Missing property {}", name.as_str());
        ConfigError::MissingLimit { bound }
    })
}

/// Read both resolution index limits for `dev_name` (default `"light"`)
pub fn read_index_limits<S>(source: &S, dev_name: Option<&str>) -> ConfigResult<IndexLimits>
where
    S: PropertySource + ?Sized,
{
    let dev = dev_name.unwrap_or(DEFAULT_DEVICE_NAME);
    let lo = read_limit(source, dev, LimitBound::Low)?;
    let hi = read_limit(source, dev, LimitBound::High)?;

    if hi < lo {
        log_warn!("{}: dynamic resolution index limits inverted ({} > {})", dev, lo, hi);
        return Err(ConfigError::InvertedLimits { lo, hi });
    }

    Ok(IndexLimits { lo, hi })
}
