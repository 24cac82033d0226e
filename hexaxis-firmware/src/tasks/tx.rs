//! UART transmit tasks
//!
//! Drain the outbound channels onto their serial ports.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_io_async::Write;

use hexaxis_protocol::OutLine;

use crate::channels::{COMMAND_TX, TELEMETRY_TX};

/// Command TX task - replies and notifications on UART0
#[embassy_executor::task]
pub async fn command_tx_task(tx: BufferedUartTx) {
    info!("Command TX task started");
    write_lines(tx, &COMMAND_TX).await
}

/// Telemetry TX task - status lines on UART1
#[embassy_executor::task]
pub async fn telemetry_tx_task(tx: BufferedUartTx) {
    info!("Telemetry TX task started");
    write_lines(tx, &TELEMETRY_TX).await
}

async fn write_lines<const N: usize>(
    mut tx: BufferedUartTx,
    channel: &'static Channel<CriticalSectionRawMutex, OutLine, N>,
) -> ! {
    loop {
        let line = channel.receive().await;
        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("UART write error: {:?}", e);
        }
    }
}
