//! Line assembly for the command channel
//!
//! Bytes arrive from the UART in arbitrary chunks. The assembler collects
//! them until a `\n` terminator and hands out the completed line.
//! - `\r` is dropped wherever it appears
//! - a line longer than [`MAX_LINE_LEN`] is discarded up to its terminator
//! - a line containing non-ASCII bytes is discarded up to its terminator

use heapless::String;

/// Maximum accepted line length, terminator excluded
pub const MAX_LINE_LEN: usize = 64;

/// Errors reported when a discarded line is terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the buffer
    TooLong,
    /// Line contained a non-ASCII byte
    NotAscii,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblerState {
    /// Collecting bytes of a valid line
    Collecting,
    /// Dropping bytes until the next terminator
    Discarding(LineError),
}

/// State machine for assembling incoming lines
#[derive(Debug, Clone)]
pub struct LineAssembler {
    state: AssemblerState,
    buffer: String<MAX_LINE_LEN>,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAssembler {
    /// Create a new line assembler
    pub fn new() -> Self {
        Self {
            state: AssemblerState::Collecting,
            buffer: String::new(),
        }
    }

    /// Reset the assembler, dropping any partial line
    pub fn reset(&mut self) {
        self.state = AssemblerState::Collecting;
        self.buffer.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line (which may
    /// be empty), `Ok(None)` when more bytes are needed, or `Err` when a
    /// discarded line is terminated.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<MAX_LINE_LEN>>, LineError> {
        match (byte, self.state) {
            (b'\n', AssemblerState::Collecting) => {
                let line = self.buffer.clone();
                self.reset();
                Ok(Some(line))
            }
            (b'\n', AssemblerState::Discarding(err)) => {
                self.reset();
                Err(err)
            }
            (b'\r', _) | (_, AssemblerState::Discarding(_)) => Ok(None),
            (byte, AssemblerState::Collecting) => {
                if !byte.is_ascii() {
                    self.discard(LineError::NotAscii);
                } else if self.buffer.push(byte as char).is_err() {
                    self.discard(LineError::TooLong);
                }
                Ok(None)
            }
        }
    }

    fn discard(&mut self, err: LineError) {
        self.buffer.clear();
        self.state = AssemblerState::Discarding(err);
    }
}
