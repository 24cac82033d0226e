//! Embassy async tasks
//!
//! Each task handles a specific subsystem:
//! - command_rx: Assembles host lines from UART0
//! - control: Dispatches commands and runs the motion tick
//! - tx: Writes replies to UART0 and telemetry to UART1

pub mod command_rx;
pub mod control;
pub mod tx;

pub use command_rx::command_rx_task;
pub use control::control_task;
pub use tx::{command_tx_task, telemetry_tx_task};
