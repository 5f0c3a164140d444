#![cfg_attr(not(test), no_std)]

pub mod configs;
pub mod registers;

use core::fmt::Debug;
use embedded_hal::i2c::I2c;
use log::debug;

use registers::*;

pub use configs::*;

/// Trait alias to support both I2c<SevenBitAddress> and I2c without address mode.
pub trait CompatibleI2c<E>: I2c<Error = E> {}
impl<T, E> CompatibleI2c<E> for T where T: I2c<Error = E> {}

pub const MAG_ADDRESS: u8 = 0x13;
pub const ACC_ADDRESS: u8 = 0x19;
pub const GYRO_ADDRESS: u8 = 0x69;

pub const ACC_CHIP_ID: u8 = 0xFA;
pub const GYRO_CHIP_ID: u8 = 0x0F;
pub const MAG_CHIP_ID: u8 = 0x32;

// Output scaling at the ranges selected by the wake-up tables.
const ACC_LSB_PER_MS2: f32 = 16.0;
const GYRO_LSB_PER_DPS: f32 = 131.0;
const MAG_UT_PER_LSB: f32 = 0.3;

/// One scaled sample: m/s² (accelerometer), °/s (gyroscope) or µT (magnetometer).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug)]
pub enum Error<E> {
    I2c(E),
}

/// Decodes a 6-byte data-register window into three signed little-endian
/// 16-bit axes, low byte first.
pub fn decode_axes(buf: &[u8; 6]) -> [i16; 3] {
    [
        i16::from_le_bytes([buf[0], buf[1]]),
        i16::from_le_bytes([buf[2], buf[3]]),
        i16::from_le_bytes([buf[4], buf[5]]),
    ]
}

/// BMX055 driver. Owns the bus handle; the three sub-devices share the bus
/// under distinct addresses.
pub struct Bmx055<I2C, E> {
    i2c: I2C,
    acc_address: u8,
    gyro_address: u8,
    mag_address: u8,
    _error: core::marker::PhantomData<E>,
}

impl<I2C, E> Bmx055<I2C, E>
where
    I2C: CompatibleI2c<E>,
    E: Debug,
{
    pub fn new(i2c: I2C) -> Self {
        Self::with_addresses(i2c, ACC_ADDRESS, GYRO_ADDRESS, MAG_ADDRESS)
    }

    /// For boards that strap the address pins away from the defaults.
    pub fn with_addresses(i2c: I2C, acc_address: u8, gyro_address: u8, mag_address: u8) -> Self {
        Self {
            i2c,
            acc_address,
            gyro_address,
            mag_address,
            _error: core::marker::PhantomData,
        }
    }

    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Configures all three sub-devices, accelerometer first, then gyroscope,
    /// then magnetometer. Must run once before any read; a failed write aborts
    /// the sequence and leaves the device unusable.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        self.apply_config(self.acc_address, CONFIG_WAKEUP_ACC)?;
        self.apply_config(self.gyro_address, CONFIG_WAKEUP_GYRO)?;
        self.apply_config(self.mag_address, CONFIG_WAKEUP_MAG)?;
        Ok(())
    }

    /// Acceleration in m/s². One bus transaction, no caching.
    pub fn read_acceleration(&mut self) -> Result<Vector3, Error<E>> {
        let [x, y, z] = self.read_axes(self.acc_address, AccReg::AccdXLsb.addr())?;
        Ok(Vector3 {
            x: x as f32 / ACC_LSB_PER_MS2,
            y: y as f32 / ACC_LSB_PER_MS2,
            z: z as f32 / ACC_LSB_PER_MS2,
        })
    }

    /// Angular rate in °/s. One bus transaction, no caching.
    pub fn read_gyroscope(&mut self) -> Result<Vector3, Error<E>> {
        let [x, y, z] = self.read_axes(self.gyro_address, GyroReg::RateXLsb.addr())?;
        Ok(Vector3 {
            x: x as f32 / GYRO_LSB_PER_DPS,
            y: y as f32 / GYRO_LSB_PER_DPS,
            z: z as f32 / GYRO_LSB_PER_DPS,
        })
    }

    /// Magnetic field in µT. One bus transaction, no caching.
    pub fn read_magnetometer(&mut self) -> Result<Vector3, Error<E>> {
        let [x, y, z] = self.read_axes(self.mag_address, MagReg::DataXLsb.addr())?;
        Ok(Vector3 {
            x: x as f32 * MAG_UT_PER_LSB,
            y: y as f32 * MAG_UT_PER_LSB,
            z: z as f32 * MAG_UT_PER_LSB,
        })
    }

    pub fn acc_chip_id(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(self.acc_address, AccReg::ChipId.addr())
    }

    pub fn gyro_chip_id(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(self.gyro_address, GyroReg::ChipId.addr())
    }

    /// The magnetometer id register only responds after `init` has set the
    /// power control bit.
    pub fn mag_chip_id(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(self.mag_address, MagReg::ChipId.addr())
    }

    fn read_axes(&mut self, address: u8, start_reg: u8) -> Result<[i16; 3], Error<E>> {
        let mut buf = [0u8; 6];
        self.read_bytes(address, start_reg, &mut buf)?;
        Ok(decode_axes(&buf))
    }

    pub fn read_reg(&mut self, address: u8, reg: u8) -> Result<u8, Error<E>> {
        let mut buf = [0u8];
        self.i2c
            .write_read(address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    pub fn write_reg(&mut self, address: u8, reg: u8, val: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(address, &[reg, val])
            .map_err(Error::I2c)?;
        Ok(())
    }

    pub fn read_bytes(&mut self, address: u8, start_reg: u8, buffer: &mut [u8]) -> Result<(), Error<E>> {
        self.i2c
            .write_read(address, &[start_reg], buffer)
            .map_err(Error::I2c)
    }

    /// Accepts any register type that implements the `Register` trait
    pub fn apply_config<R>(&mut self, address: u8, config: &[RegConfig<R>]) -> Result<(), Error<E>>
    where
        R: Register + NamedRegister + Copy,
    {
        for entry in config {
            let reg = entry.reg.addr();
            match entry.op {
                RegOp::Write => {
                    debug!("write_reg {:<10}({:#04X}) = {:#04x}", entry.reg.name(), reg, entry.value);
                    self.write_reg(address, reg, entry.value)?
                }
                RegOp::Read => {
                    let data = self.read_reg(address, reg)?;
                    debug!("read_reg {:<10}({:#04X}) = {:#04x}", entry.reg.name(), reg, data);
                }
            }
        }
        Ok(())
    }

    pub fn dump_config<R>(&mut self, address: u8, regs: &[R]) -> Result<(), Error<E>>
    where
        R: NamedRegister + Copy,
    {
        fn show(label: &str, reg: u8, val: Result<u8, impl Debug>) {
            match val {
                Ok(v) => debug!("{:<10}({:#04x}): 0x{:02X} ({:>3}) 0b{:08b}", label, reg, v, v, v),
                Err(e) => debug!("{:<10}: Error: {:?}", label, e),
            }
        }

        for reg in regs {
            let label = reg.name();
            let addr = reg.addr();
            show(label, addr, self.read_reg(address, addr));
        }

        Ok(())
    }
}
