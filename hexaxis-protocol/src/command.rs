//! Command tokenizer
//!
//! Turns one received line into a typed [`Command`]. The first character
//! selects the command kind, the rest are its operands. Operand rules:
//!
//! - axis: exactly one digit `1`-`6`, anything else is [`ParseError::BadAxis`]
//! - integer: optional sign then ASCII digits; empty reads as `0` for moves
//! - nothing may follow the operands of `M`, `A`, `H`, `K` and `P`

use crate::axis::AxisId;
use crate::response::ErrorCode;

/// Shared motion profile parameter selected by `P<param><value>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileParam {
    /// Maximum velocity in steps/s
    Velocity,
    /// Acceleration in steps/s²
    Acceleration,
}

/// A fully tokenized host command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `M<axis><signed int>`: move by a signed number of steps
    MoveRelative { axis: AxisId, delta: i32 },
    /// `A<axis><int>`: move to an absolute step position
    MoveAbsolute { axis: AxisId, position: i32 },
    /// `H<axis>`: seek the minimum endstop and define it as zero
    Home { axis: AxisId },
    /// `S`: report positions and endstop states
    Status,
    /// `E`: drop the shared driver enable line
    EmergencyStop,
    /// `K<axis>`: decelerate one axis to a stop
    KillAxis { axis: AxisId },
    /// `P<V|A><int>`: update the shared profile on all axes
    SetProfile { param: ProfileParam, value: u32 },
}

/// Command kind without operands, used for logging and outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    MoveRelative,
    MoveAbsolute,
    Home,
    Status,
    EmergencyStop,
    KillAxis,
    SetProfile,
}

impl Command {
    /// Get the kind of this command
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::MoveRelative { .. } => CommandKind::MoveRelative,
            Command::MoveAbsolute { .. } => CommandKind::MoveAbsolute,
            Command::Home { .. } => CommandKind::Home,
            Command::Status => CommandKind::Status,
            Command::EmergencyStop => CommandKind::EmergencyStop,
            Command::KillAxis { .. } => CommandKind::KillAxis,
            Command::SetProfile { .. } => CommandKind::SetProfile,
        }
    }

    /// Axis addressed by this command, if any
    pub fn axis(&self) -> Option<AxisId> {
        match *self {
            Command::MoveRelative { axis, .. }
            | Command::MoveAbsolute { axis, .. }
            | Command::Home { axis }
            | Command::KillAxis { axis } => Some(axis),
            Command::Status | Command::EmergencyStop | Command::SetProfile { .. } => None,
        }
    }
}

/// Errors that can occur while tokenizing a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Leading character does not name a command
    UnknownCommand,
    /// Axis operand missing or outside `1`-`6`
    BadAxis,
    /// Integer operand malformed, out of range, or followed by garbage
    BadOperand,
    /// `P` followed by something other than `V` or `A`
    UnknownParam,
}

impl From<ParseError> for ErrorCode {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::BadAxis => ErrorCode::BadAxis,
            ParseError::UnknownCommand | ParseError::BadOperand | ParseError::UnknownParam => {
                ErrorCode::BadCommand
            }
        }
    }
}

/// Tokenize one line (without terminator)
///
/// Returns `Ok(None)` for an empty line, which the protocol ignores.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    if line.is_empty() {
        return Ok(None);
    }
    if !line.is_ascii() {
        return Err(ParseError::UnknownCommand);
    }

    let (head, rest) = line.split_at(1);
    let command = match head.as_bytes()[0] {
        b'M' => {
            let (axis, operand) = split_axis(rest)?;
            Command::MoveRelative {
                axis,
                delta: parse_steps(operand)?,
            }
        }
        b'A' => {
            let (axis, operand) = split_axis(rest)?;
            Command::MoveAbsolute {
                axis,
                position: parse_steps(operand)?,
            }
        }
        b'H' => Command::Home {
            axis: axis_only(rest)?,
        },
        b'K' => Command::KillAxis {
            axis: axis_only(rest)?,
        },
        b'S' => Command::Status,
        b'E' => Command::EmergencyStop,
        b'P' => {
            let mut bytes = rest.bytes();
            let param = match bytes.next() {
                Some(b'V') => ProfileParam::Velocity,
                Some(b'A') => ProfileParam::Acceleration,
                _ => return Err(ParseError::UnknownParam),
            };
            let value: u32 = rest[1..].parse().map_err(|_| ParseError::BadOperand)?;
            if value == 0 {
                return Err(ParseError::BadOperand);
            }
            Command::SetProfile { param, value }
        }
        _ => return Err(ParseError::UnknownCommand),
    };

    Ok(Some(command))
}

/// Split the leading axis digit from the remaining operand text
fn split_axis(rest: &str) -> Result<(AxisId, &str), ParseError> {
    let digit = *rest.as_bytes().first().ok_or(ParseError::BadAxis)?;
    let axis = AxisId::from_digit(digit).ok_or(ParseError::BadAxis)?;
    Ok((axis, &rest[1..]))
}

/// Axis digit with nothing after it
fn axis_only(rest: &str) -> Result<AxisId, ParseError> {
    let (axis, operand) = split_axis(rest)?;
    if !operand.is_empty() {
        return Err(ParseError::BadOperand);
    }
    Ok(axis)
}

/// Signed step count; an absent operand means zero steps
fn parse_steps(operand: &str) -> Result<i32, ParseError> {
    if operand.is_empty() {
        return Ok(0);
    }
    operand.parse().map_err(|_| ParseError::BadOperand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn axis(n: usize) -> AxisId {
        AxisId::new(n).unwrap()
    }

    #[test]
    fn test_empty_line_is_ignored() {
        assert_eq!(parse_line(""), Ok(None));
    }

    #[test]
    fn test_move_relative() {
        assert_eq!(
            parse_line("M11000"),
            Ok(Some(Command::MoveRelative {
                axis: axis(0),
                delta: 1000
            }))
        );
        assert_eq!(
            parse_line("M6-250"),
            Ok(Some(Command::MoveRelative {
                axis: axis(5),
                delta: -250
            }))
        );
        assert_eq!(
            parse_line("M3+7"),
            Ok(Some(Command::MoveRelative {
                axis: axis(2),
                delta: 7
            }))
        );
    }

    #[test]
    fn test_move_without_operand_is_zero() {
        assert_eq!(
            parse_line("M2"),
            Ok(Some(Command::MoveRelative {
                axis: axis(1),
                delta: 0
            }))
        );
    }

    #[test]
    fn test_move_absolute() {
        assert_eq!(
            parse_line("A45000"),
            Ok(Some(Command::MoveAbsolute {
                axis: axis(3),
                position: 5000
            }))
        );
    }

    #[test]
    fn test_absolute_axis_seven_is_bad_axis() {
        // "A7..." names axis 7, which does not exist
        assert_eq!(parse_line("A799999999"), Err(ParseError::BadAxis));
        assert_eq!(
            parse_line("A199999999"),
            Ok(Some(Command::MoveAbsolute {
                axis: axis(0),
                position: 99_999_999
            }))
        );
    }

    #[test]
    fn test_bad_axis() {
        assert_eq!(parse_line("M0100"), Err(ParseError::BadAxis));
        assert_eq!(parse_line("M"), Err(ParseError::BadAxis));
        assert_eq!(parse_line("Hx"), Err(ParseError::BadAxis));
        assert_eq!(parse_line("K9"), Err(ParseError::BadAxis));
    }

    #[test]
    fn test_bad_operand() {
        assert_eq!(parse_line("M1abc"), Err(ParseError::BadOperand));
        assert_eq!(parse_line("M1-"), Err(ParseError::BadOperand));
        assert_eq!(parse_line("M112x"), Err(ParseError::BadOperand));
        assert_eq!(parse_line("M19999999999"), Err(ParseError::BadOperand));
        assert_eq!(parse_line("H12"), Err(ParseError::BadOperand));
    }

    #[test]
    fn test_home_and_kill() {
        assert_eq!(parse_line("H3"), Ok(Some(Command::Home { axis: axis(2) })));
        assert_eq!(parse_line("K4"), Ok(Some(Command::KillAxis { axis: axis(3) })));
    }

    #[test]
    fn test_status_and_stop_ignore_trailing() {
        assert_eq!(parse_line("S"), Ok(Some(Command::Status)));
        assert_eq!(parse_line("Sxyz"), Ok(Some(Command::Status)));
        assert_eq!(parse_line("E"), Ok(Some(Command::EmergencyStop)));
    }

    #[test]
    fn test_profile() {
        assert_eq!(
            parse_line("PV2000"),
            Ok(Some(Command::SetProfile {
                param: ProfileParam::Velocity,
                value: 2000
            }))
        );
        assert_eq!(
            parse_line("PA750"),
            Ok(Some(Command::SetProfile {
                param: ProfileParam::Acceleration,
                value: 750
            }))
        );
    }

    #[test]
    fn test_profile_errors() {
        assert_eq!(parse_line("PX100"), Err(ParseError::UnknownParam));
        assert_eq!(parse_line("P"), Err(ParseError::UnknownParam));
        assert_eq!(parse_line("PV"), Err(ParseError::BadOperand));
        assert_eq!(parse_line("PV0"), Err(ParseError::BadOperand));
        assert_eq!(parse_line("PV-5"), Err(ParseError::BadOperand));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse_line("Z"), Err(ParseError::UnknownCommand));
        assert_eq!(parse_line("m11000"), Err(ParseError::UnknownCommand));
        assert_eq!(parse_line("é"), Err(ParseError::UnknownCommand));
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(ErrorCode::from(ParseError::UnknownCommand), ErrorCode::BadCommand);
        assert_eq!(ErrorCode::from(ParseError::UnknownParam), ErrorCode::BadCommand);
        assert_eq!(ErrorCode::from(ParseError::BadOperand), ErrorCode::BadCommand);
        assert_eq!(ErrorCode::from(ParseError::BadAxis), ErrorCode::BadAxis);
    }

    proptest! {
        #[test]
        fn prop_tokenizer_is_total(line in "\\PC{0,24}") {
            // Never panics, whatever the host sends
            let _ = parse_line(&line);
        }

        #[test]
        fn prop_move_relative_accepts_any_i32(n in 1usize..=6, delta in any::<i32>()) {
            let line = format!("M{}{}", n, delta);
            prop_assert_eq!(
                parse_line(&line),
                Ok(Some(Command::MoveRelative { axis: axis(n - 1), delta }))
            );
        }
    }
}
