//! Fake pins and delay for driver tests

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use hexaxis_hal::{InputPin, OutputPin};

/// Output pin that counts rising edges
#[derive(Debug, Clone, Default)]
pub struct FakeOutput {
    pub high: Rc<Cell<bool>>,
    pub rising_edges: Rc<Cell<u32>>,
}

impl OutputPin for FakeOutput {
    fn set_high(&mut self) {
        if !self.high.get() {
            self.rising_edges.set(self.rising_edges.get() + 1);
        }
        self.high.set(true);
    }

    fn set_low(&mut self) {
        self.high.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.high.get()
    }
}

/// Input pin driven by the test
#[derive(Debug, Clone, Default)]
pub struct FakeInput {
    pub high: Rc<Cell<bool>>,
}

impl FakeInput {
    pub fn new(high: bool) -> Self {
        Self {
            high: Rc::new(Cell::new(high)),
        }
    }
}

impl InputPin for FakeInput {
    fn is_high(&self) -> bool {
        self.high.get()
    }
}

/// Delay that returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
