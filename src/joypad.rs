use crate::memory::component::{Addressable, Clocked};
use crate::memory::ram::Ram;
use crate::memory::registers::InterruptFlags;
use crate::memory::JOYPAD_REGISTER;
use log::warn;

const SELECT_DIRECTIONS: u8 = 0b0001_0000;
const SELECT_BUTTONS: u8 = 0b0010_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cross {
    Right,
    Left,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
}

impl Cross {
    fn mask(self) -> u8 {
        match self {
            Cross::Right => 0b0001,
            Cross::Left => 0b0010,
            Cross::Up => 0b0100,
            Cross::Down => 0b1000,
        }
    }
}

impl Button {
    fn mask(self) -> u8 {
        match self {
            Button::A => 0b0001,
            Button::B => 0b0010,
            Button::Select => 0b0100,
            Button::Start => 0b1000,
        }
    }
}

/// P1 at $FF00. Select lines and key lines are active low on the bus; pressed
/// keys are kept active high internally.
#[derive(Clone)]
pub struct Joypad {
    select: u8,
    cross: u8,
    buttons: u8,
    last_lines: u8,
}

impl Joypad {
    pub fn new() -> Joypad {
        Joypad {
            select: SELECT_DIRECTIONS | SELECT_BUTTONS,
            cross: 0,
            buttons: 0,
            last_lines: 0x0f,
        }
    }

    pub fn press_cross(&mut self, key: Cross) {
        self.cross |= key.mask();
    }

    pub fn release_cross(&mut self, key: Cross) {
        self.cross &= !key.mask();
    }

    pub fn press_button(&mut self, key: Button) {
        self.buttons |= key.mask();
    }

    pub fn release_button(&mut self, key: Button) {
        self.buttons &= !key.mask();
    }

    /// Low nibble of P1 as the CPU would see it.
    fn lines(&self) -> u8 {
        let mut pressed = 0;
        if self.select & SELECT_DIRECTIONS == 0 {
            pressed |= self.cross;
        }
        if self.select & SELECT_BUTTONS == 0 {
            pressed |= self.buttons;
        }
        !pressed & 0x0f
    }
}

impl Default for Joypad {
    fn default() -> Joypad {
        Joypad::new()
    }
}

impl Addressable for Joypad {
    fn mapped_ranges(&self) -> &'static [(u16, u16)] {
        &[(JOYPAD_REGISTER, JOYPAD_REGISTER)]
    }

    fn mmio_read(&self, _addr: u16, _ram: &Ram) -> Option<u8> {
        if self.select & (SELECT_DIRECTIONS | SELECT_BUTTONS) == 0 {
            warn!("Joypad has buttons and d-pad mode selected");
        }
        Some(0xc0 | self.select | self.lines())
    }

    fn mmio_write(&mut self, _addr: u16, value: u8, _ram: &mut Ram) -> bool {
        self.select = value & (SELECT_DIRECTIONS | SELECT_BUTTONS);
        true
    }
}

impl Clocked for Joypad {
    fn update(&mut self, _clocks: u32, ram: &mut Ram) {
        let lines = self.lines();
        if self.last_lines & !lines != 0 {
            ram.request_interrupt(InterruptFlags::JOYPAD);
        }
        self.last_lines = lines;
    }
}
