use crate::lr35902::T_CYCLES_PER_SECOND;
use crate::memory::mapper::{Mapper, Storage};
use crate::memory::{EXTERNAL_RAM_END, EXTERNAL_RAM_START, ROM_BANK_SIZE};
use log::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RtcRegisters {
    seconds: u8,
    minutes: u8,
    hours: u8,
    days: u16,
    halt: bool,
    carry: bool,
}

impl RtcRegisters {
    fn control_byte(&self) -> u8 {
        let mut out = ((self.days >> 8) as u8) & 0x01;
        if self.halt {
            out |= 0x40;
        }
        if self.carry {
            out |= 0x80;
        }
        out
    }
}

/// Real-time clock driven by emulated time, not the host clock.
#[derive(Debug, Clone, Default)]
struct Rtc {
    live: RtcRegisters,
    latched: RtcRegisters,
    subsecond_clocks: u32,
}

impl Rtc {
    fn latch(&mut self) {
        self.latched = self.live;
    }

    fn read(&self, register: u8) -> u8 {
        match register {
            0x08 => self.latched.seconds & 0x3f,
            0x09 => self.latched.minutes & 0x3f,
            0x0a => self.latched.hours & 0x1f,
            0x0b => self.latched.days as u8,
            0x0c => self.latched.control_byte(),
            _ => 0xff,
        }
    }

    fn write(&mut self, register: u8, value: u8) {
        match register {
            0x08 => {
                self.live.seconds = value & 0x3f;
                self.subsecond_clocks = 0;
            }
            0x09 => self.live.minutes = value & 0x3f,
            0x0a => self.live.hours = value & 0x1f,
            0x0b => self.live.days = (self.live.days & 0x0100) | value as u16,
            0x0c => {
                self.live.days = (self.live.days & 0x00ff) | (((value & 0x01) as u16) << 8);
                self.live.halt = value & 0x40 != 0;
                self.live.carry = value & 0x80 != 0;
            }
            _ => {}
        }
    }

    fn step(&mut self, clocks: u32) {
        if self.live.halt {
            return;
        }

        self.subsecond_clocks += clocks;
        while self.subsecond_clocks >= T_CYCLES_PER_SECOND {
            self.subsecond_clocks -= T_CYCLES_PER_SECOND;
            self.second_tick();
        }
    }

    fn second_tick(&mut self) {
        if self.live.seconds == 59 {
            self.live.seconds = 0;
            self.minute_tick();
        } else {
            self.live.seconds = (self.live.seconds + 1) & 0x3f;
        }
    }

    fn minute_tick(&mut self) {
        if self.live.minutes == 59 {
            self.live.minutes = 0;
            self.hour_tick();
        } else {
            self.live.minutes = (self.live.minutes + 1) & 0x3f;
        }
    }

    fn hour_tick(&mut self) {
        if self.live.hours == 23 {
            self.live.hours = 0;
            self.day_tick();
        } else {
            self.live.hours = (self.live.hours + 1) & 0x1f;
        }
    }

    fn day_tick(&mut self) {
        if self.live.days >= 0x01ff {
            self.live.days = 0;
            self.live.carry = true;
        } else {
            self.live.days += 1;
        }
    }
}

#[derive(Clone)]
pub struct Mbc3 {
    storage: Storage,
    rom_bank: u8,
    /// $00-$03 selects a RAM bank, $08-$0C an RTC register.
    ram_bank: u8,
    ram_enabled: bool,
    last_latch_write: u8,
    rtc: Option<Rtc>,
}

impl Mbc3 {
    pub fn new(storage: Storage, has_timer: bool) -> Mbc3 {
        Mbc3 {
            storage,
            rom_bank: 1,
            ram_bank: 0,
            ram_enabled: false,
            last_latch_write: 0xff,
            rtc: has_timer.then(Rtc::default),
        }
    }

    fn rom_offset(&self) -> usize {
        (self.rom_bank as usize & (self.storage.rom_banks.max(1) - 1)) * ROM_BANK_SIZE
    }

    fn ram_index(&self, addr: u16) -> Option<usize> {
        if self.storage.ram.is_empty() || self.ram_bank > 0x03 {
            return None;
        }

        let layout = self.storage.ram_layout;
        let bank = self.ram_bank as usize & (layout.banks.max(1) - 1);
        let offset = (addr - EXTERNAL_RAM_START) as usize & (layout.bank_size - 1);
        Some((bank * layout.bank_size + offset) % self.storage.ram.len())
    }
}

impl Mapper for Mbc3 {
    #[inline]
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3fff => self.storage.rom_at(addr as usize),
            0x4000..=0x7fff => self.storage.rom_at(self.rom_offset() + (addr as usize - ROM_BANK_SIZE)),
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => {
                if !self.ram_enabled {
                    return 0xff;
                }
                match (self.ram_bank, &self.rtc) {
                    (0x08..=0x0c, Some(rtc)) => rtc.read(self.ram_bank),
                    _ => self.ram_index(addr).map_or(0xff, |index| self.storage.ram[index]),
                }
            }
            _ => 0xff,
        }
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1fff => {
                self.ram_enabled = data & 0x0f == 0x0a;
                debug!("MBC3: RAM and RTC enabled: {}", self.ram_enabled);
            }
            0x2000..=0x3fff => {
                self.rom_bank = data & 0b0111_1111;
                if self.rom_bank == 0 {
                    self.rom_bank = 1;
                }
                debug!("MBC3: Switched to ROM bank {}", self.rom_bank);
            }
            0x4000..=0x5fff => {
                self.ram_bank = data & 0x0f;
                debug!("MBC3: Selected RAM bank/RTC register ${:02x}", self.ram_bank);
            }
            0x6000..=0x7fff => {
                if self.last_latch_write == 0x00 && data == 0x01 {
                    if let Some(rtc) = self.rtc.as_mut() {
                        rtc.latch();
                        debug!("MBC3: RTC latched");
                    }
                }
                self.last_latch_write = data;
            }
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => {
                if !self.ram_enabled {
                    return;
                }
                let register = self.ram_bank;
                if let (0x08..=0x0c, Some(rtc)) = (register, self.rtc.as_mut()) {
                    rtc.write(register, data);
                    return;
                }
                if let Some(index) = self.ram_index(addr) {
                    self.storage.ram[index] = data;
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, clocks: u32) {
        if let Some(rtc) = self.rtc.as_mut() {
            rtc.step(clocks);
        }
    }

    fn dump_ram(&self) -> Vec<u8> {
        self.storage.ram.clone()
    }

    fn load_ram(&mut self, ram: Vec<u8>) {
        self.storage.load_ram(ram);
    }

    #[inline]
    fn current_rom_bank(&self) -> u16 {
        self.rom_bank as u16
    }

    #[inline]
    fn current_ram_bank(&self) -> u8 {
        self.ram_bank
    }

    #[inline]
    fn name(&self) -> String {
        if self.rtc.is_some() {
            String::from("MBC3+RTC")
        } else {
            String::from("MBC3")
        }
    }
}
