pub mod alu;
pub mod cpu;
pub mod handlers;
pub mod irq;
pub mod registers;
pub mod sm83;
pub mod timer;

pub const T_CYCLES_PER_SECOND: u32 = 4_194_304;

/// Oscillator clocks delivered to the peripherals per machine cycle.
pub const CLOCKS_PER_TICK: u32 = 4;
