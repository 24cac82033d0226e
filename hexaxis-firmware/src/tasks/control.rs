//! Control task
//!
//! Owns the machine. Each loop iteration drains received lines through the
//! dispatcher, then runs one motion tick. The tick period bounds the
//! highest step rate any axis can reach.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use hexaxis_core::Outcome;
use hexaxis_protocol::{ErrorCode, Response, Route, AXIS_COUNT};

use crate::board::Machine;
use crate::channels::{COMMAND_TX, LINE_CHANNEL, TELEMETRY_TX};

/// Control loop period in microseconds
pub const CONTROL_PERIOD_US: u64 = 100;

/// Free command slots needed before another line is taken: two replies,
/// one pending `D<n>`/`ENDSTOP<n>` per axis, and a watchdog `ERR5`
const COMMAND_TX_HEADROOM: usize = 2 + AXIS_COUNT + 1;

/// Control task - command dispatch and motion ticks
#[embassy_executor::task]
pub async fn control_task(mut machine: Machine) {
    info!("Control task started");

    let mut ticker = Ticker::every(Duration::from_micros(CONTROL_PERIOD_US));
    let mut sink = route;

    loop {
        // Unread lines wait in LINE_CHANNEL, which holds the host back
        while COMMAND_TX.free_capacity() >= COMMAND_TX_HEADROOM {
            let Ok(received) = LINE_CHANNEL.try_receive() else {
                break;
            };
            let now = now_us();
            let outcome = match received {
                Ok(line) => machine.handle_line(&line, now, &mut sink),
                Err(e) => machine.handle_line_error(e, now, &mut sink),
            };
            match outcome {
                Outcome::Accepted(kind) => debug!("Command: {:?}", kind),
                Outcome::Rejected(code) => debug!("Rejected: {:?}", code),
                Outcome::Ignored => {}
            }
        }

        if machine.tick(now_us(), &mut sink) {
            warn!("No command for {} ms, drivers disabled", hexaxis_core::config::MOVE_TIMEOUT_MS);
        }

        ticker.next().await;
    }
}

/// Wrapping microsecond timestamp
fn now_us() -> u32 {
    Instant::now().as_micros() as u32
}

/// Encode a response and queue it on the channel its route names
fn route(response: Response) {
    match response {
        Response::Endstop(axis) => warn!("Endstop hit on axis {}", axis.number()),
        Response::Error(ErrorCode::Timeout) => info!("Timeout reported (homing or watchdog)"),
        _ => {}
    }

    let line = match response.encode() {
        Ok(line) => line,
        Err(e) => {
            warn!("Failed to encode response: {:?}", e);
            return;
        }
    };

    let (channel, sent) = match response.route() {
        Route::Command => ("command", COMMAND_TX.try_send(line).is_ok()),
        Route::Telemetry => ("telemetry", TELEMETRY_TX.try_send(line).is_ok()),
    };
    if !sent {
        error!("{} channel full, dropping line", channel);
    }
}
