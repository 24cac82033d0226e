//! Status report
//!
//! Format:
//! - `S:` marker
//! - six positions in axis order
//! - six minimum-endstop states (`1` = triggered)
//! - optionally six maximum-endstop states
//!
//! All fields are comma-separated.

use core::fmt::{self, Write};

use crate::axis::AXIS_COUNT;

/// Snapshot of every axis, taken at the moment of a status request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    /// Current step position per axis
    pub positions: [i32; AXIS_COUNT],
    /// Minimum endstop triggered per axis
    pub min_endstops: [bool; AXIS_COUNT],
    /// Maximum endstop triggered per axis, when a full set is fitted
    pub max_endstops: Option<[bool; AXIS_COUNT]>,
}

impl StatusReport {
    /// Create a report without maximum endstops
    pub fn new(positions: [i32; AXIS_COUNT], min_endstops: [bool; AXIS_COUNT]) -> Self {
        Self {
            positions,
            min_endstops,
            max_endstops: None,
        }
    }

    /// Attach the maximum endstop states
    pub fn with_max_endstops(mut self, max_endstops: [bool; AXIS_COUNT]) -> Self {
        self.max_endstops = Some(max_endstops);
        self
    }

    /// Write the report body (no terminator)
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str("S:")?;
        for (i, position) in self.positions.iter().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            write!(out, "{}", position)?;
        }
        write_flags(out, &self.min_endstops)?;
        if let Some(max) = &self.max_endstops {
            write_flags(out, max)?;
        }
        Ok(())
    }
}

fn write_flags<W: Write>(out: &mut W, flags: &[bool; AXIS_COUNT]) -> fmt::Result {
    for &flag in flags {
        out.write_char(',')?;
        out.write_char(if flag { '1' } else { '0' })?;
    }
    Ok(())
}
