//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use hexaxis_protocol::{LineError, OutLine, MAX_LINE_LEN};

/// A received line, or the reason it was discarded
pub type RxLine = Result<String<MAX_LINE_LEN>, LineError>;

/// Channel capacity for received lines
const LINE_CHANNEL_SIZE: usize = 4;

/// Channel capacity for command channel replies
const COMMAND_TX_SIZE: usize = 32;

/// Channel capacity for telemetry lines
const TELEMETRY_TX_SIZE: usize = 4;

/// Lines from the command UART to the control task
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, RxLine, LINE_CHANNEL_SIZE> = Channel::new();

/// Replies and notifications for the command UART
pub static COMMAND_TX: Channel<CriticalSectionRawMutex, OutLine, COMMAND_TX_SIZE> = Channel::new();

/// Status lines for the telemetry UART
pub static TELEMETRY_TX: Channel<CriticalSectionRawMutex, OutLine, TELEMETRY_TX_SIZE> = Channel::new();
