use bitflags::bitflags;

macro_rules! registers {
    (
        $enum_name:ident, $slice_name:ident {
            $($name:ident = $val:expr),* $(,)?
        }
    ) => {
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum $enum_name {
            $($name = $val),*
        }

        pub const $slice_name: &[$enum_name] = &[
            $($enum_name::$name),*
        ];

        impl $enum_name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($enum_name::$name => stringify!($name),)*
                }
            }
        }

        impl Register for $enum_name {
            fn addr(self) -> u8 {
                self as u8
            }
        }

        impl NamedRegister for $enum_name {
            fn name(&self) -> &'static str {
                self.name()
            }
        }

        impl From<$enum_name> for u8 {
            fn from(r: $enum_name) -> u8 {
                r as u8
            }
        }
    };
}

#[derive(Clone, Copy, Debug)]
pub enum RegOp {
    Read,
    Write,
}

pub trait NamedRegister: Register {
    fn name(&self) -> &'static str;
}

pub trait Register: Copy {
    fn addr(self) -> u8;
}

pub struct RegConfig<R: Register> {
    pub op: RegOp,
    pub reg: R,
    pub value: u8,
}

registers! {
    AccReg, ACC_REGS {
        ChipId = 0x00,
        AccdXLsb = 0x02,
        AccdXMsb = 0x03,
        AccdYLsb = 0x04,
        AccdYMsb = 0x05,
        AccdZLsb = 0x06,
        AccdZMsb = 0x07,
        PmuRange = 0x0F,
        PmuBw = 0x10,
        PmuLpw = 0x11,
    }
}

registers! {
    GyroReg, GYRO_REGS {
        ChipId = 0x00,
        RateXLsb = 0x02,
        RateXMsb = 0x03,
        RateYLsb = 0x04,
        RateYMsb = 0x05,
        RateZLsb = 0x06,
        RateZMsb = 0x07,
        Range = 0x0F,
        Bw = 0x10,
    }
}

registers! {
    MagReg, MAG_REGS {
        ChipId = 0x40,
        DataXLsb = 0x42,
        DataXMsb = 0x43,
        DataYLsb = 0x44,
        DataYMsb = 0x45,
        DataZLsb = 0x46,
        DataZMsb = 0x47,
        PowerCtrl = 0x4B,
        OpMode = 0x4C,
    }
}

/* PMU_RANGE
 * B7   B6   B5   B4   B3   B2   B1   B0
 * 0    0    0    0    R3   R2   R1   R0
*/
#[repr(u8)]
pub enum AccRange {
    G2 = 0x03,
    G4 = 0x05,
    G8 = 0x08,
    G16 = 0x0C,
}

/* MAG POWER_CTRL
 * B7   B6   B5   B4   B3   B2   B1   B0
 * SRST 0    0    0    0    0    SRST PWR
*/
bitflags! {
    pub struct MagPowerFlags: u8 {
        const POWER_ON   = 1 << 0;
        const SOFT_RESET = (1 << 7) | (1 << 1);
    }
}
