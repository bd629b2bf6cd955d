pub mod palette;
pub mod ppu;
pub mod state;
pub mod tile;

pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 144;

pub const VRAM_SIZE: usize = 0x2000;

/// Tile map and tile data bases, as offsets into VRAM.
pub const TILEMAP_0_OFFSET: usize = 0x1800;
pub const TILEMAP_1_OFFSET: usize = 0x1c00;
pub const TILESET_UNSIGNED_OFFSET: usize = 0x0000;
pub const TILESET_SIGNED_OFFSET: usize = 0x1000;

pub const LCD_CONTROL_REGISTER: u16 = 0xff40;
pub const LCD_STATUS_REGISTER: u16 = 0xff41;
pub const SCROLL_Y_REGISTER: u16 = 0xff42;
pub const SCROLL_X_REGISTER: u16 = 0xff43;
pub const SCANLINE_Y_REGISTER: u16 = 0xff44;
pub const SCANLINE_Y_COMPARE_REGISTER: u16 = 0xff45;
pub const BG_PALETTE_REGISTER: u16 = 0xff47;
pub const OBJ0_PALETTE_REGISTER: u16 = 0xff48;
pub const OBJ1_PALETTE_REGISTER: u16 = 0xff49;
pub const WINDOW_Y_REGISTER: u16 = 0xff4a;
pub const WINDOW_X_REGISTER: u16 = 0xff4b;

/// Clocks per scanline and per frame.
pub const LINE_CLOCKS: i32 = 456;
pub const FRAME_CLOCKS: u32 = 70224;
