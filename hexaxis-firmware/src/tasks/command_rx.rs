//! Command UART receive task
//!
//! Assembles host lines and hands them to the control task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use hexaxis_protocol::LineAssembler;

use crate::channels::LINE_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Command RX task - splits the byte stream into lines
#[embassy_executor::task]
pub async fn command_rx_task(mut rx: BufferedUartRx) {
    info!("Command RX task started");

    let mut assembler = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match assembler.feed(byte) {
                        Ok(Some(line)) => LINE_CHANNEL.send(Ok(line)).await,
                        Ok(None) => {}
                        Err(e) => {
                            debug!("Discarded line: {:?}", e);
                            LINE_CHANNEL.send(Err(e)).await;
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
                assembler.reset();
            }
        }
    }
}
