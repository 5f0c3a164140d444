use crate::registers::*;

// Wake-up sequences for the three sub-devices. Order within a table matters:
// range select, then output data rate, then power mode.

pub const CONFIG_WAKEUP_ACC: &[RegConfig<AccReg>] = &[
    RegConfig {
        op: RegOp::Write,
        reg: AccReg::PmuRange,
        value: AccRange::G2 as u8, // ±2 g range
    },
    RegConfig {
        op: RegOp::Write,
        reg: AccReg::PmuBw,
        value: 0x0C, // 100 Hz output data rate
    },
    RegConfig {
        op: RegOp::Write,
        reg: AccReg::PmuLpw,
        value: 0x08, // leave sleep mode
    },
];

pub const CONFIG_WAKEUP_GYRO: &[RegConfig<GyroReg>] = &[
    RegConfig {
        op: RegOp::Write,
        reg: GyroReg::Range,
        value: 0x04, // ±2000 °/s range
    },
    RegConfig {
        op: RegOp::Write,
        reg: GyroReg::Bw,
        value: 0x07, // 100 Hz output data rate
    },
];

pub const CONFIG_WAKEUP_MAG: &[RegConfig<MagReg>] = &[
    RegConfig {
        op: RegOp::Write,
        reg: MagReg::PowerCtrl,
        value: MagPowerFlags::SOFT_RESET.bits() | MagPowerFlags::POWER_ON.bits(), // power mode + data rate
    },
    RegConfig {
        op: RegOp::Write,
        reg: MagReg::OpMode,
        value: 0x00, // normal mode, control registers writable
    },
];
