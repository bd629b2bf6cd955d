use crate::lr35902::T_CYCLES_PER_SECOND;
use crate::memory::cartridge::Cartridge;
use crate::memory::header::Header;
use crate::tests::{build_rom, rom_only, BANK_MARKER};

const SWITCHABLE_MARKER: u16 = 0x4000 + BANK_MARKER as u16;
const FIXED_MARKER: u16 = BANK_MARKER as u16;

fn cartridge(cartridge_type: u8, rom_size: u8, ram_size: u8) -> Cartridge {
    Cartridge::from_bytes(build_rom(cartridge_type, rom_size, ram_size)).unwrap()
}

#[test]
fn test_rom_only() {
    let mut cartridge = rom_only();
    let mapper = cartridge.mapper_mut();

    assert_eq!(mapper.read(FIXED_MARKER), 0);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 1);
    assert_eq!(mapper.read(0xa000), 0xff);

    mapper.write(0x2000, 0x05);
    mapper.write(0xa000, 0x12);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 1);
    assert_eq!(mapper.read(0xa000), 0xff);
    assert!(mapper.dump_ram().is_empty());
}

#[test]
fn test_mbc1_rom_banking() {
    let mut cartridge = cartridge(0x01, 0x06, 0x00);
    let mapper = cartridge.mapper_mut();
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 1);

    mapper.write(0x2000, 0x1f);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 31);

    // Zero is checked before the upper bits are applied
    mapper.write(0x2000, 0x20);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 1);

    mapper.write(0x2000, 0x1f);
    mapper.write(0x4000, 0x01);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 63);
    assert_eq!(mapper.current_rom_bank(), 63);
    assert_eq!(mapper.read(FIXED_MARKER), 0);

    mapper.write(0x6000, 0x01);
    assert_eq!(mapper.read(FIXED_MARKER), 32, "Mode 1 moves the fixed window");
}

#[test]
fn test_mbc1_bank_masked_to_rom_size() {
    let mut cartridge = cartridge(0x01, 0x02, 0x00);
    let mapper = cartridge.mapper_mut();

    mapper.write(0x2000, 0x09);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 1);
}

#[test]
fn test_mbc1_ram_banking() {
    let mut cartridge = cartridge(0x03, 0x00, 0x03);
    let mapper = cartridge.mapper_mut();

    mapper.write(0xa000, 0x55);
    assert_eq!(mapper.read(0xa000), 0xff, "RAM starts disabled");

    mapper.write(0x0000, 0x0a);
    mapper.write(0x6000, 0x01);
    mapper.write(0x4000, 0x02);
    mapper.write(0xa000, 0x55);
    assert_eq!(mapper.current_ram_bank(), 2);
    assert_eq!(mapper.read(0xa000), 0x55);

    mapper.write(0x6000, 0x00);
    assert_eq!(mapper.read(0xa000), 0x00);

    mapper.write(0x6000, 0x01);
    assert_eq!(mapper.read(0xa000), 0x55);
    assert_eq!(mapper.dump_ram()[0x4000], 0x55);

    mapper.write(0x0000, 0x00);
    assert_eq!(mapper.read(0xa000), 0xff);
}

#[test]
fn test_mbc3_rom_banking() {
    let mut cartridge = cartridge(0x13, 0x06, 0x03);
    let mapper = cartridge.mapper_mut();

    mapper.write(0x2000, 0x7f);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 127);

    mapper.write(0x2000, 0x00);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 1);

    mapper.write(0x2000, 0xff);
    assert_eq!(mapper.current_rom_bank(), 0x7f);
    assert_eq!(mapper.read(FIXED_MARKER), 0);
}

#[test]
fn test_mbc3_ram_banking() {
    let mut cartridge = cartridge(0x13, 0x00, 0x03);
    let mapper = cartridge.mapper_mut();

    mapper.write(0x0000, 0x0a);
    mapper.write(0x4000, 0x01);
    mapper.write(0xa123, 0x77);
    assert_eq!(mapper.read(0xa123), 0x77);
    assert_eq!(mapper.dump_ram()[0x2123], 0x77);

    mapper.write(0x4000, 0x00);
    assert_eq!(mapper.read(0xa123), 0x00);

    // No RTC on this cartridge
    mapper.write(0x4000, 0x08);
    assert_eq!(mapper.read(0xa000), 0xff);
    assert_eq!(mapper.name(), "MBC3");
}

fn latch(cartridge: &mut Cartridge) {
    cartridge.mapper_mut().write(0x6000, 0x00);
    cartridge.mapper_mut().write(0x6000, 0x01);
}

#[test]
fn test_mbc3_rtc_counts_emulated_seconds() {
    let mut cartridge = cartridge(0x10, 0x00, 0x03);
    assert_eq!(cartridge.mapper().name(), "MBC3+RTC");

    cartridge.mapper_mut().write(0x0000, 0x0a);
    cartridge.mapper_mut().write(0x4000, 0x08);
    cartridge.mapper_mut().update(T_CYCLES_PER_SECOND * 2);
    assert_eq!(cartridge.mapper().read(0xa000), 0, "Nothing latched yet");

    latch(&mut cartridge);
    assert_eq!(cartridge.mapper().read(0xa000), 2);

    cartridge.mapper_mut().update(T_CYCLES_PER_SECOND);
    assert_eq!(cartridge.mapper().read(0xa000), 2, "Reads come from the latched copy");

    latch(&mut cartridge);
    assert_eq!(cartridge.mapper().read(0xa000), 3);
}

#[test]
fn test_mbc3_rtc_halt() {
    let mut cartridge = cartridge(0x10, 0x00, 0x03);
    let mapper = cartridge.mapper_mut();

    mapper.write(0x0000, 0x0a);
    mapper.write(0x4000, 0x0c);
    mapper.write(0xa000, 0x40);
    mapper.update(T_CYCLES_PER_SECOND * 5);

    mapper.write(0x6000, 0x00);
    mapper.write(0x6000, 0x01);
    assert_eq!(mapper.read(0xa000), 0x40);

    mapper.write(0x4000, 0x08);
    assert_eq!(mapper.read(0xa000), 0);
}

#[test]
fn test_mbc3_rtc_day_overflow_sets_carry() {
    let mut cartridge = cartridge(0x10, 0x00, 0x03);
    let mapper = cartridge.mapper_mut();
    mapper.write(0x0000, 0x0a);

    for (register, value) in [(0x08, 59), (0x09, 59), (0x0a, 23), (0x0b, 0xff), (0x0c, 0x01)] {
        mapper.write(0x4000, register);
        mapper.write(0xa000, value);
    }
    mapper.update(T_CYCLES_PER_SECOND);

    mapper.write(0x6000, 0x00);
    mapper.write(0x6000, 0x01);
    for (register, expected) in [(0x08, 0), (0x09, 0), (0x0a, 0), (0x0b, 0), (0x0c, 0x80)] {
        mapper.write(0x4000, register);
        assert_eq!(mapper.read(0xa000), expected, "RTC register {:02x}", register);
    }
}

#[test]
fn test_mbc5_rom_banking() {
    let mut cartridge = cartridge(0x19, 0x05, 0x00);
    let mapper = cartridge.mapper_mut();
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 1);

    mapper.write(0x2000, 0x25);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 0x25);

    mapper.write(0x2000, 0x00);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 1, "Bank 0 reads as bank 1");

    mapper.write(0x2000, 0x45);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 0x05, "Bank is masked to the ROM size");
    assert_eq!(mapper.read(FIXED_MARKER), 0);
}

#[test]
fn test_mbc5_ninth_bank_bit() {
    let mut cartridge = cartridge(0x19, 0x08, 0x00);
    let mapper = cartridge.mapper_mut();

    mapper.write(0x3000, 0x01);
    mapper.write(0x2000, 0x02);
    assert_eq!(mapper.current_rom_bank(), 0x102);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 0x02);

    mapper.write(0x3000, 0x00);
    assert_eq!(mapper.current_rom_bank(), 0x02);
}

#[test]
fn test_mbc5_ram_banking() {
    let mut cartridge = cartridge(0x1a, 0x00, 0x03);
    let mapper = cartridge.mapper_mut();
    assert_eq!(mapper.read(0xa000), 0xff);

    mapper.write(0x0000, 0x0a);
    mapper.write(0xa000, 0x11);
    mapper.write(0x4000, 0x02);
    mapper.write(0xa000, 0x22);
    assert_eq!(mapper.read(0xa000), 0x22);

    mapper.write(0x4000, 0x00);
    assert_eq!(mapper.read(0xa000), 0x11);

    let ram = mapper.dump_ram();
    assert_eq!(ram.len(), 0x8000);
    assert_eq!(ram[0x0000], 0x11);
    assert_eq!(ram[0x4000], 0x22);
}

#[test]
fn test_mbc5_without_ram() {
    let mut cartridge = cartridge(0x19, 0x00, 0x00);
    let mapper = cartridge.mapper_mut();

    mapper.write(0x0000, 0x0a);
    mapper.write(0xa000, 0x11);
    assert_eq!(mapper.read(0xa000), 0xff);
    assert_eq!(mapper.read(0xbfff), 0xff);
}

#[test]
fn test_declared_rom_size_is_padded() {
    let mut rom = build_rom(0x19, 0x00, 0x00);
    rom[0x148] = 0x01;
    rom[0x14d] = Header::compute_checksum(&rom);

    let mut cartridge = Cartridge::from_bytes(rom).unwrap();
    let mapper = cartridge.mapper_mut();
    mapper.write(0x2000, 0x03);
    assert_eq!(mapper.read(SWITCHABLE_MARKER), 0xff);
}

#[test]
fn test_battery_ram_reload() {
    let mut cartridge = cartridge(0x1b, 0x00, 0x02);
    cartridge.mapper_mut().load_ram(vec![0x99; 0x4000]);
    cartridge.mapper_mut().write(0x0000, 0x0a);

    assert_eq!(cartridge.mapper().read(0xbfff), 0x99);
    assert_eq!(cartridge.mapper().dump_ram().len(), 0x2000);
}
