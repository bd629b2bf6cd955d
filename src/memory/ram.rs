use crate::config::PowerOnState;
use crate::memory::registers::InterruptFlags;
use crate::memory::{INTERRUPT_FLAGS_REGISTER, UNUSABLE_END, VRAM_START};

/// The flat 64 KiB backing store behind every address nobody else claims.
///
/// Components never go through the bus to touch it: interrupt requests and
/// mirrored writes use the direct accessors so they don't get routed back
/// into a component.
#[derive(Clone)]
pub struct Ram {
    memory: Vec<u8>,
}

impl Ram {
    pub fn new(power_on: PowerOnState) -> Ram {
        let mut memory = vec![0u8; 0x10000];

        if let PowerOnState::Randomized { seed } = power_on {
            // xorshift64, never seeded with zero
            let mut state = if seed == 0 { 0x9e37_79b9_7f4a_7c15 } else { seed };
            for byte in &mut memory[VRAM_START as usize..=UNUSABLE_END as usize] {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                *byte = (state >> 24) as u8;
            }
        }

        memory[INTERRUPT_FLAGS_REGISTER as usize] = InterruptFlags::VBLANK.bits();

        Ram { memory }
    }

    #[inline]
    pub fn direct_read(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    #[inline]
    pub fn direct_write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    /// Raises the given bits in IF.
    #[inline]
    pub fn request_interrupt(&mut self, flags: InterruptFlags) {
        self.memory[INTERRUPT_FLAGS_REGISTER as usize] |= flags.bits();
    }

    #[inline]
    pub fn interrupt_flags(&self) -> InterruptFlags {
        InterruptFlags::from(self.memory[INTERRUPT_FLAGS_REGISTER as usize])
    }
}
