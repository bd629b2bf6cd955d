/// What the work RAM, video RAM and high RAM contain right after power on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerOnState {
    /// Pseudo-random garbage in $8000-$FEFF, reproducible from the seed.
    Randomized { seed: u64 },
    /// Everything zeroed. Handy for tests that inspect memory.
    Zeroed,
}

impl Default for PowerOnState {
    fn default() -> PowerOnState {
        PowerOnState::Randomized { seed: 0x2545_f491_4f6c_dd1d }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardConfig {
    pub power_on: PowerOnState,
}

impl BoardConfig {
    pub fn zeroed() -> BoardConfig {
        BoardConfig {
            power_on: PowerOnState::Zeroed,
        }
    }

    pub fn with_seed(seed: u64) -> BoardConfig {
        BoardConfig {
            power_on: PowerOnState::Randomized { seed },
        }
    }
}
