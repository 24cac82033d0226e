//! Outbound messages
//!
//! Every message the rig sends is a [`Response`]: either the reply to the
//! command just handled, or an asynchronous notification raised by a tick.
//! Responses encode to a single `\n`-terminated line.

use core::fmt::Write;

use heapless::String;

use crate::axis::AxisId;
use crate::status::StatusReport;

/// Maximum encoded line length, terminator included
pub const MAX_OUT_LINE_LEN: usize = 128;

/// Encoded outbound line
pub type OutLine = String<MAX_OUT_LINE_LEN>;

/// Error codes reported to the host as `ERR<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorCode {
    /// Unknown command, malformed operand, or unknown profile parameter
    BadCommand,
    /// Axis operand outside `1`-`6`
    BadAxis,
    /// Target outside the configured travel range
    OutOfRange,
    /// Homing or command watchdog timed out
    Timeout,
    /// Negative move requested while the minimum endstop is active
    EndstopActive,
}

impl ErrorCode {
    /// Numeric code printed after `ERR`
    pub const fn code(self) -> u8 {
        match self {
            ErrorCode::BadCommand => 1,
            ErrorCode::BadAxis => 2,
            ErrorCode::OutOfRange => 4,
            ErrorCode::Timeout => 5,
            ErrorCode::EndstopActive => 6,
        }
    }
}

/// Output channel a response is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// Replies and notifications
    Command,
    /// Status reports
    Telemetry,
}

/// Errors that can occur while encoding a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Line buffer too small for the encoded response
    BufferTooSmall,
}

impl From<core::fmt::Error> for EncodeError {
    fn from(_: core::fmt::Error) -> Self {
        EncodeError::BufferTooSmall
    }
}

/// Messages from the rig to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Generic acknowledgment
    Ok,
    /// Command rejected or operation failed
    Error(ErrorCode),
    /// Axis motion completed (`D<axis>`)
    Done(AxisId),
    /// Axis stopped by its minimum endstop (`ENDSTOP<axis>`)
    Endstop(AxisId),
    /// Status report (`S:...`)
    Status(StatusReport),
}

impl Response {
    /// Channel this response belongs on
    pub fn route(&self) -> Route {
        match self {
            Response::Status(_) => Route::Telemetry,
            _ => Route::Command,
        }
    }

    /// Encode into a `\n`-terminated line
    pub fn encode(&self) -> Result<OutLine, EncodeError> {
        let mut line = OutLine::new();
        match self {
            Response::Ok => line.write_str("OK")?,
            Response::Error(code) => write!(line, "ERR{}", code.code())?,
            Response::Done(axis) => write!(line, "D{}", axis.number())?,
            Response::Endstop(axis) => write!(line, "ENDSTOP{}", axis.number())?,
            Response::Status(report) => report.write_to(&mut line)?,
        }
        line.push('\n').map_err(|_| EncodeError::BufferTooSmall)?;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(n: usize) -> AxisId {
        AxisId::new(n).unwrap()
    }

    #[test]
    fn test_error_codes() {
        let codes: Vec<u8> = [
            ErrorCode::BadCommand,
            ErrorCode::BadAxis,
            ErrorCode::OutOfRange,
            ErrorCode::Timeout,
            ErrorCode::EndstopActive,
        ]
        .iter()
        .map(|c| c.code())
        .collect();
        assert_eq!(codes, vec![1, 2, 4, 5, 6]);
    }

    #[test]
    fn test_encode_replies() {
        assert_eq!(Response::Ok.encode().unwrap().as_str(), "OK\n");
        assert_eq!(
            Response::Error(ErrorCode::EndstopActive).encode().unwrap().as_str(),
            "ERR6\n"
        );
    }

    #[test]
    fn test_encode_notifications_use_wire_numbers() {
        assert_eq!(Response::Done(axis(0)).encode().unwrap().as_str(), "D1\n");
        assert_eq!(
            Response::Endstop(axis(5)).encode().unwrap().as_str(),
            "ENDSTOP6\n"
        );
    }

    #[test]
    fn test_routes() {
        assert_eq!(Response::Ok.route(), Route::Command);
        assert_eq!(Response::Done(axis(2)).route(), Route::Command);
        let status = StatusReport::new([0; 6], [false; 6]);
        assert_eq!(Response::Status(status).route(), Route::Telemetry);
    }
}
