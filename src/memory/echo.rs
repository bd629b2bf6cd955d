use crate::memory::component::Addressable;
use crate::memory::ram::Ram;
use crate::memory::{ECHO_RAM_END, ECHO_RAM_START};

const MIRROR_OFFSET: u16 = ECHO_RAM_START - 0xc000;

/// $E000-$FDFF mirrors work RAM at $C000-$DDFF.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoRam;

impl Addressable for EchoRam {
    fn mapped_ranges(&self) -> &'static [(u16, u16)] {
        &[(ECHO_RAM_START, ECHO_RAM_END)]
    }

    #[inline]
    fn mmio_read(&self, addr: u16, ram: &Ram) -> Option<u8> {
        Some(ram.direct_read(addr - MIRROR_OFFSET))
    }

    #[inline]
    fn mmio_write(&mut self, addr: u16, value: u8, ram: &mut Ram) -> bool {
        ram.direct_write(addr - MIRROR_OFFSET, value);
        true
    }
}
