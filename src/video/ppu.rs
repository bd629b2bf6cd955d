use crate::circuits::RisingEdgeDetector;
use crate::memory::component::{Addressable, Clocked};
use crate::memory::ram::Ram;
use crate::memory::registers::{InterruptFlags, LcdControl, LcdStatus};
use crate::memory::{VRAM_END, VRAM_START};
use crate::video::palette::Palette;
use crate::video::state::State;
use crate::video::tile::TileRow;
use crate::video::*;
use log::debug;

/// Line clock at which mode 2 switches to mode 3.
const VRAM_READ_START: i32 = 88;
/// Line clock at which mode 3 ends for SCX % 8 == 0.
const HBLANK_START: i32 = 260;
/// Line clock at which a new line enters mode 2, or mode 1 on line 144.
const LINE_START: i32 = 4;
/// Offset between the line clock and the pixel being output during mode 3.
const PIXEL_DELAY: i32 = 84;
const VBLANK_LINE: u8 = 144;
const LAST_LINE: u8 = 153;

/// Scanline-based DMG PPU. Background only; pixels are resolved lazily while
/// mode 3 advances.
#[derive(Clone)]
pub struct Ppu {
    clock: i32,
    lcd_pointer: i32,
    end_of_frame: bool,
    vram_clock_offset: i32,
    /// Line 0 spends its first line-time still in VBLANK after 153 wraps.
    zero_line_delay: bool,
    /// Clocks accumulated while the display is off.
    off_clock: u32,

    lcdc: LcdControl,
    stat: LcdStatus,
    mode: State,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,

    code_area: usize,
    tile_area: usize,
    signed_tiles: bool,
    code_address_y: usize,
    tile_offset_y: usize,

    vram: Vec<u8>,
    /// Column major: `screen[x * SCREEN_HEIGHT + y]`.
    screen: Vec<u8>,
    stat_line: RisingEdgeDetector,
}

impl Ppu {
    pub fn new() -> Ppu {
        let mut ppu = Ppu {
            clock: 416,
            lcd_pointer: 0,
            end_of_frame: false,
            vram_clock_offset: 0,
            zero_line_delay: true,
            off_clock: 0,
            lcdc: LcdControl::from(0x91),
            stat: LcdStatus::COINCIDENCE,
            mode: State::VBlank,
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            code_area: TILEMAP_0_OFFSET,
            tile_area: TILESET_UNSIGNED_OFFSET,
            signed_tiles: false,
            code_address_y: 0,
            tile_offset_y: 0,
            vram: vec![0; VRAM_SIZE],
            screen: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            stat_line: RisingEdgeDetector::new(),
        };

        ppu.select_areas();
        ppu
    }

    /// Row-major copy of the last frame (one shade 0-3 per pixel). Clears the
    /// end-of-frame flag.
    pub fn draw(&mut self) -> Vec<u8> {
        let mut bitmap = vec![0; SCREEN_WIDTH * SCREEN_HEIGHT];
        for x in 0..SCREEN_WIDTH {
            for y in 0..SCREEN_HEIGHT {
                bitmap[y * SCREEN_WIDTH + x] = self.screen[x * SCREEN_HEIGHT + y];
            }
        }
        self.end_of_frame = false;
        bitmap
    }

    /// Whether VBLANK (or a display-off frame period) started since the last `draw`.
    #[inline]
    pub fn check_end_of_frame(&self) -> bool {
        self.end_of_frame
    }

    #[inline]
    pub fn mode(&self) -> State {
        self.mode
    }

    #[inline]
    pub fn ly(&self) -> u8 {
        self.ly
    }

    #[inline]
    pub fn line_clock(&self) -> i32 {
        self.clock
    }

    #[inline]
    pub fn is_display_enabled(&self) -> bool {
        self.lcdc.contains(LcdControl::LCD_DISPLAY)
    }

    fn write_lcdc(&mut self, value: u8) {
        let was_enabled = self.is_display_enabled();
        self.lcdc = LcdControl::from(value);
        self.select_areas();

        match (was_enabled, self.is_display_enabled()) {
            (true, false) => {
                debug!("PPU: Display off");
                self.ly = 0;
                self.mode = State::HBlank;
                self.off_clock = 0;
                self.screen.fill(0);
                self.stat_line.reset();
            }
            (false, true) => {
                debug!("PPU: Display on");
                self.ly = 0;
                self.clock = 0;
                self.lcd_pointer = 0;
                self.vram_clock_offset = 0;
                self.zero_line_delay = false;
                self.mode = State::HBlank;
            }
            _ => {}
        }

        self.precalculate_offset_y();
    }

    /// Tile map and tile data bases selected by LCDC.
    fn select_areas(&mut self) {
        self.code_area = if self.lcdc.contains(LcdControl::BG_TILE_MAP) {
            TILEMAP_1_OFFSET
        } else {
            TILEMAP_0_OFFSET
        };
        self.signed_tiles = !self.lcdc.contains(LcdControl::BG_TILE_DATA);
        self.tile_area = if self.signed_tiles {
            TILESET_SIGNED_OFFSET
        } else {
            TILESET_UNSIGNED_OFFSET
        };
    }

    fn write_stat(&mut self, value: u8) {
        self.stat = (self.stat & LcdStatus::COINCIDENCE) | (LcdStatus::from(value) & LcdStatus::WRITABLE);
    }

    fn read_stat(&self) -> u8 {
        0x80 | self.stat.bits() | self.mode.as_u8()
    }

    /// Caches the tile map row and the row inside a tile for the current LY/SCY.
    fn precalculate_offset_y(&mut self) {
        let y = self.ly.wrapping_add(self.scy) as usize;
        self.code_address_y = ((y >> 3) << 5) + self.code_area;
        self.tile_offset_y = (y % 8) << 1;
    }

    /// VRAM offset of the tile row under background pixel `x`.
    fn tile_address(&self, x: usize) -> usize {
        let code_address = self.code_address_y + (x >> 3);
        let index = self.vram[code_address];
        let start = if self.signed_tiles {
            (self.tile_area as isize + ((index as i8 as isize) << 4)) as usize
        } else {
            self.tile_area + ((index as usize) << 4)
        };
        start + self.tile_offset_y
    }

    fn render_pixel(&mut self, lx: usize) {
        let color = if self.lcdc.contains(LcdControl::BG_DISPLAY) {
            let x = (lx + self.scx as usize) & 0xff;
            let address = self.tile_address(x);
            TileRow::new(self.vram[address], self.vram[address + 1]).color(x)
        } else {
            0
        };
        self.screen[lx * SCREEN_HEIGHT + self.ly as usize] = Palette::shade(self.bgp, color);
    }

    fn update_stat_line(&mut self, ram: &mut Ram) {
        self.stat.set(LcdStatus::COINCIDENCE, self.ly == self.lyc);

        let line = (self.stat.contains(LcdStatus::HBLANK_INTERRUPT) && self.mode == State::HBlank)
            || (self.stat.contains(LcdStatus::VBLANK_INTERRUPT) && self.mode == State::VBlank)
            || (self.stat.contains(LcdStatus::OAM_INTERRUPT) && self.mode == State::OamScan)
            || (self.stat.contains(LcdStatus::COINCIDENCE_INTERRUPT) && self.stat.contains(LcdStatus::COINCIDENCE));

        if self.stat_line.check(line) {
            ram.request_interrupt(InterruptFlags::LCD_STAT);
        }
    }

    fn update_display_off(&mut self, clocks: u32) {
        self.off_clock += clocks;
        if self.off_clock >= FRAME_CLOCKS {
            self.off_clock -= FRAME_CLOCKS;
            self.end_of_frame = true;
        }
    }

    fn update_display_on(&mut self, clocks: u32, ram: &mut Ram) {
        if self.mode != State::VBlank {
            if self.mode == State::Drawing && self.clock >= HBLANK_START + self.vram_clock_offset {
                self.mode = State::HBlank;
                self.lcd_pointer = 0;
                self.vram_clock_offset = 0;
            } else if self.clock == VRAM_READ_START {
                self.mode = State::Drawing;
                // Background fine scroll delays the end of mode 3
                self.vram_clock_offset = (self.scx & 7) as i32;
            } else if self.clock == LINE_START {
                if self.ly == VBLANK_LINE {
                    self.mode = State::VBlank;
                    ram.request_interrupt(InterruptFlags::VBLANK);
                    self.end_of_frame = true;
                } else {
                    self.mode = State::OamScan;
                }
            }

            if self.mode == State::Drawing {
                while self.lcd_pointer < self.clock - PIXEL_DELAY {
                    if (self.lcd_pointer as usize) < SCREEN_WIDTH {
                        self.render_pixel(self.lcd_pointer as usize);
                    }
                    self.lcd_pointer += 1;
                }
            }
        } else if self.clock == LINE_START && self.ly == LAST_LINE {
            self.zero_line_delay = true;
            self.ly = 0;
            self.precalculate_offset_y();
        }

        if self.clock >= LINE_CLOCKS {
            if !self.zero_line_delay {
                self.ly = self.ly.wrapping_add(1);
                self.precalculate_offset_y();
            } else {
                self.zero_line_delay = false;
            }

            if self.ly < VBLANK_LINE {
                self.mode = State::HBlank;
            }
            self.lcd_pointer = 0;
            self.clock -= LINE_CLOCKS;
        }

        self.clock += clocks as i32;
    }
}

impl Default for Ppu {
    fn default() -> Ppu {
        Ppu::new()
    }
}

impl Addressable for Ppu {
    fn mapped_ranges(&self) -> &'static [(u16, u16)] {
        &[(VRAM_START, VRAM_END), (LCD_CONTROL_REGISTER, 0xff9f)]
    }

    fn mmio_read(&self, addr: u16, _ram: &Ram) -> Option<u8> {
        match addr {
            // VRAM stays visible during mode 3
            VRAM_START..=VRAM_END => Some(self.vram[(addr - VRAM_START) as usize]),
            LCD_CONTROL_REGISTER => Some(self.lcdc.bits()),
            LCD_STATUS_REGISTER => Some(self.read_stat()),
            SCROLL_Y_REGISTER => Some(self.scy),
            SCROLL_X_REGISTER => Some(self.scx),
            SCANLINE_Y_REGISTER => Some(self.ly),
            SCANLINE_Y_COMPARE_REGISTER => Some(self.lyc),
            BG_PALETTE_REGISTER => Some(self.bgp),
            OBJ0_PALETTE_REGISTER => Some(self.obp0),
            OBJ1_PALETTE_REGISTER => Some(self.obp1),
            WINDOW_Y_REGISTER => Some(self.wy),
            WINDOW_X_REGISTER => Some(self.wx),
            _ => None,
        }
    }

    fn mmio_write(&mut self, addr: u16, value: u8, _ram: &mut Ram) -> bool {
        match addr {
            VRAM_START..=VRAM_END => self.vram[(addr - VRAM_START) as usize] = value,
            LCD_CONTROL_REGISTER => self.write_lcdc(value),
            LCD_STATUS_REGISTER => self.write_stat(value),
            SCROLL_Y_REGISTER => {
                self.scy = value;
                self.precalculate_offset_y();
            }
            SCROLL_X_REGISTER => self.scx = value,
            SCANLINE_Y_REGISTER => {
                self.ly = 0;
                self.precalculate_offset_y();
            }
            SCANLINE_Y_COMPARE_REGISTER => self.lyc = value,
            BG_PALETTE_REGISTER => self.bgp = value,
            OBJ0_PALETTE_REGISTER => self.obp0 = value,
            OBJ1_PALETTE_REGISTER => self.obp1 = value,
            WINDOW_Y_REGISTER => self.wy = value,
            WINDOW_X_REGISTER => self.wx = value,
            _ => return false,
        }
        true
    }
}

impl Clocked for Ppu {
    fn update(&mut self, clocks: u32, ram: &mut Ram) {
        if !self.is_display_enabled() {
            self.update_display_off(clocks);
            return;
        }

        self.update_display_on(clocks, ram);
        self.update_stat_line(ram);
    }
}

impl std::fmt::Display for Ppu {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "MODE: {}  CLOCK: {}  LY: {}  LYC: {}  LCDC: ${:02x}  STAT: ${:02x}  SCX: ${:02x}  SCY: ${:02x}  BGP: ${:02x}  EOF: {}",
            self.mode,
            self.clock,
            self.ly,
            self.lyc,
            self.lcdc.bits(),
            self.read_stat(),
            self.scx,
            self.scy,
            self.bgp,
            self.end_of_frame
        )
    }
}
