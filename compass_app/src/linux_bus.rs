use std::fmt;

use embedded_hal::i2c::{self, ErrorType, I2c, Operation, SevenBitAddress};
use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};

/// Exclusive handle to a Linux I2C adapter. The slave address is re-selected
/// before every transaction so the three sub-devices can share the bus.
pub struct LinuxI2cBus {
    dev: LinuxI2CDevice,
}

impl LinuxI2cBus {
    /// Opens the adapter character device, e.g. `/dev/i2c-1`.
    pub fn open(path: &str) -> Result<Self, LinuxI2CError> {
        let dev = LinuxI2CDevice::new(path, 0)?;
        Ok(Self { dev })
    }

    fn select(&mut self, addr: u8) -> Result<(), BusError> {
        self.dev.set_slave_address(addr as u16).map_err(BusError::I2c)
    }
}

#[derive(Debug)]
pub enum BusError {
    I2c(LinuxI2CError),
    Unsupported,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::I2c(e) => write!(f, "I2C error: {}", e),
            BusError::Unsupported => write!(f, "unsupported bus operation"),
        }
    }
}

impl i2c::Error for BusError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::Other
    }
}

impl ErrorType for LinuxI2cBus {
    type Error = BusError;
}

impl I2c for LinuxI2cBus {
    fn read(&mut self, addr: SevenBitAddress, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.select(addr)?;
        self.dev.read(buffer).map_err(BusError::I2c)
    }

    fn write(&mut self, addr: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        self.select(addr)?;
        self.dev.write(bytes).map_err(BusError::I2c)
    }

    fn write_read(
        &mut self,
        addr: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.select(addr)?;
        self.dev.write(bytes).map_err(BusError::I2c)?;
        self.dev.read(buffer).map_err(BusError::I2c)
    }

    // Register traffic only needs write and write_read.
    fn transaction(
        &mut self,
        _addr: SevenBitAddress,
        _operations: &mut [Operation],
    ) -> Result<(), Self::Error> {
        Err(BusError::Unsupported)
    }
}
