//! Hexaxis - Six-Axis Stepper Rig Firmware
//!
//! Main firmware binary for RP2040-based six-axis boards. A host sends one
//! ASCII command per line on UART0; status lines go out on UART1.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Instant;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use hexaxis_core::config::MachineConfig;
use hexaxis_core::Dispatcher;

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static CMD_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static CMD_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static TLM_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static TLM_RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Hexaxis firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = board::BAUD_RATE;

    // Command channel
    let tx_buf = CMD_TX_BUF.init([0u8; 256]);
    let rx_buf = CMD_RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config.clone());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (cmd_tx, cmd_rx) = uart.split();

    // Telemetry channel (transmit only)
    let tx_buf = TLM_TX_BUF.init([0u8; 256]);
    let rx_buf = TLM_RX_BUF.init([0u8; 16]);
    let uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tlm_tx, _tlm_rx) = uart.split();

    info!("UARTs initialized at {} baud", board::BAUD_RATE);

    let engines = [
        board::engine(p.PIN_2.into(), p.PIN_3.into()),
        board::engine(p.PIN_6.into(), p.PIN_7.into()),
        board::engine(p.PIN_8.into(), p.PIN_9.into()),
        board::engine(p.PIN_10.into(), p.PIN_11.into()),
        board::engine(p.PIN_12.into(), p.PIN_13.into()),
        board::engine(p.PIN_14.into(), p.PIN_15.into()),
    ];
    let endstops = board::endstops([
        p.PIN_16.into(),
        p.PIN_17.into(),
        p.PIN_18.into(),
        p.PIN_19.into(),
        p.PIN_20.into(),
        p.PIN_21.into(),
    ]);
    let enable = board::enable(p.PIN_22.into());

    let config = MachineConfig::default();
    let now = Instant::now().as_micros() as u32;
    let machine = match Dispatcher::new(engines, endstops, enable, &config, now) {
        Ok(machine) => machine,
        Err(e) => {
            error!("Invalid machine config: {:?}", e);
            return;
        }
    };
    info!(
        "Machine ready: travel {}..{} steps, {} steps/s, {} steps/s^2",
        config.travel.min_steps,
        config.travel.max_steps,
        config.profile.velocity,
        config.profile.acceleration
    );

    spawner.spawn(tasks::command_rx_task(cmd_rx)).unwrap();
    spawner.spawn(tasks::command_tx_task(cmd_tx)).unwrap();
    spawner.spawn(tasks::telemetry_tx_task(tlm_tx)).unwrap();
    spawner.spawn(tasks::control_task(machine)).unwrap();

    info!("All tasks spawned, firmware running");
}
