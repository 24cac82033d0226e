//! Host Command Protocol
//!
//! This crate defines the ASCII protocol spoken between the host and the
//! rig controller. Every message is a single line terminated by `\n`.
//!
//! # Protocol Overview
//!
//! ```text
//! host → rig    M<axis><int>   move relative          A<axis><int>  move absolute
//!               H<axis>        home                   K<axis>       kill axis
//!               P<V|A><int>    set shared profile     S             status
//!               E              emergency stop
//!
//! rig → host    OK             acknowledgment         ERR<n>        error code
//!               D<axis>        motion complete        ENDSTOP<axis> endstop trip
//!               S:<p1..p6>,<min1..min6>[,<max1..max6>]  status (telemetry channel)
//! ```
//!
//! Axis operands are `1`-`6` on the wire and `0`-`5` internally
//! (see [`AxisId`]).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod axis;
pub mod command;
pub mod line;
pub mod response;
pub mod status;

pub use axis::{AxisId, AXIS_COUNT};
pub use command::{parse_line, Command, CommandKind, ParseError, ProfileParam};
pub use line::{LineAssembler, LineError, MAX_LINE_LEN};
pub use response::{EncodeError, ErrorCode, OutLine, Response, Route, MAX_OUT_LINE_LEN};
pub use status::StatusReport;
