use crate::error::{DmgError, RomReadSnafu, UnsupportedCartridgeTypeSnafu};
use crate::memory::component::{Addressable, Clocked};
use crate::memory::header::{cartridge_type_name, Header};
use crate::memory::mapper::mbc1::Mbc1;
use crate::memory::mapper::mbc3::Mbc3;
use crate::memory::mapper::mbc5::Mbc5;
use crate::memory::mapper::rom::Rom;
use crate::memory::mapper::{Mapper, Storage};
use crate::memory::ram::Ram;
use crate::memory::{EXTERNAL_RAM_END, EXTERNAL_RAM_START};
use log::{info, warn};
use snafu::ResultExt;
use std::io::Read;

/// Which controller a cartridge type byte selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperKind {
    RomOnly,
    Mbc1,
    Mbc3 { timer: bool },
    Mbc5,
}

impl MapperKind {
    pub fn from_code(code: u8) -> Result<MapperKind, DmgError> {
        match code {
            0x00 => Ok(MapperKind::RomOnly),
            0x01..=0x03 => Ok(MapperKind::Mbc1),
            0x0f | 0x10 => Ok(MapperKind::Mbc3 { timer: true }),
            0x11..=0x13 => Ok(MapperKind::Mbc3 { timer: false }),
            0x19..=0x1e => Ok(MapperKind::Mbc5),
            code => UnsupportedCartridgeTypeSnafu {
                code,
                name: cartridge_type_name(code),
            }
            .fail(),
        }
    }
}

#[derive(Clone)]
pub struct Cartridge {
    header: Header,
    kind: MapperKind,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Cartridge, DmgError> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom).context(RomReadSnafu)?;
        Cartridge::from_bytes(rom)
    }

    pub fn from_bytes(rom: Vec<u8>) -> Result<Cartridge, DmgError> {
        let header = Header::parse(&rom)?;
        let kind = MapperKind::from_code(header.cartridge_type)?;

        let checksum = Header::compute_checksum(&rom);
        if checksum != header.header_checksum {
            warn!(
                "Header checksum mismatch: expected ${:02x}, computed ${:02x}",
                header.header_checksum, checksum
            );
        }

        let storage = Storage::new(rom, &header)?;
        let mapper: Box<dyn Mapper> = match kind {
            MapperKind::RomOnly => Box::new(Rom::new(storage)),
            MapperKind::Mbc1 => Box::new(Mbc1::new(storage)),
            MapperKind::Mbc3 { timer } => Box::new(Mbc3::new(storage, timer)),
            MapperKind::Mbc5 => Box::new(Mbc5::new(storage)),
        };

        info!(
            "Loaded \"{}\" ({}, mapper {})",
            header.title,
            header.cartridge_type_name(),
            mapper.name()
        );

        Ok(Cartridge { header, kind, mapper })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn kind(&self) -> MapperKind {
        self.kind
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    pub fn mapper_mut(&mut self) -> &mut dyn Mapper {
        self.mapper.as_mut()
    }
}

impl Addressable for Cartridge {
    fn mapped_ranges(&self) -> &'static [(u16, u16)] {
        &[(0x0000, 0x7fff), (EXTERNAL_RAM_START, EXTERNAL_RAM_END)]
    }

    #[inline]
    fn mmio_read(&self, addr: u16, _ram: &Ram) -> Option<u8> {
        Some(self.mapper.read(addr))
    }

    #[inline]
    fn mmio_write(&mut self, addr: u16, value: u8, _ram: &mut Ram) -> bool {
        self.mapper.write(addr, value);
        true
    }
}

impl Clocked for Cartridge {
    #[inline]
    fn update(&mut self, clocks: u32, _ram: &mut Ram) {
        self.mapper.update(clocks);
    }
}

impl std::fmt::Display for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", self.mapper.describe())?;
        write!(f, "{}", self.header)
    }
}
