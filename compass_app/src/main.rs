//! BMX055 compass display
//!
//! Polls the accelerometer, gyroscope and magnetometer over a Linux I2C
//! adapter, derives a compass heading from the horizontal magnetic field,
//! and redraws a terminal frame every 100 ms until Ctrl-C.

mod core_heading;
mod display;
mod error;
mod linux_bus;
mod poll_loop;

use std::env;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bmx055::registers::{ACC_REGS, GYRO_REGS, MAG_REGS};
use bmx055::{Bmx055, CompatibleI2c, ACC_ADDRESS, GYRO_ADDRESS, MAG_ADDRESS};
use log::{debug, info, warn};

use crate::display::ConsolePresenter;
use crate::error::{Error, Result};
use crate::linux_bus::LinuxI2cBus;

const DEFAULT_BUS_PATH: &str = "/dev/i2c-1";

/// Bus device path from the first positional argument, if any.
fn parse_bus_path() -> String {
    env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BUS_PATH.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = parse_bus_path();
    info!("Opening I2C bus {}", path);
    let bus = LinuxI2cBus::open(&path).map_err(|e| Error::BusOpen {
        path: path.clone(),
        source: e,
    })?;

    let mut sensor = Bmx055::new(bus);
    sensor
        .init()
        .map_err(|e| Error::Init(format!("{:?}", e)))?;
    info!("BMX055 initialized");

    probe_chip_ids(&mut sensor);
    if log::log_enabled!(log::Level::Debug) {
        dump_registers(&mut sensor);
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    info!(
        "Polling every {} ms, press Ctrl-C to stop",
        poll_loop::POLL_INTERVAL.as_millis()
    );
    let mut presenter = ConsolePresenter;
    poll_loop::run(
        &mut sensor,
        &mut presenter,
        &running,
        poll_loop::POLL_INTERVAL,
    )?;

    info!("Stopped");
    Ok(())
}

fn probe_chip_ids<I2C, E>(sensor: &mut Bmx055<I2C, E>)
where
    I2C: CompatibleI2c<E>,
    E: Debug,
{
    match sensor.acc_chip_id() {
        Ok(id) if id == bmx055::ACC_CHIP_ID => info!("accelerometer chip id 0x{:02X}", id),
        Ok(id) => warn!("unexpected accelerometer chip id 0x{:02X}", id),
        Err(e) => warn!("failed to read accelerometer chip id: {:?}", e),
    }

    match sensor.gyro_chip_id() {
        Ok(id) if id == bmx055::GYRO_CHIP_ID => info!("gyroscope chip id 0x{:02X}", id),
        Ok(id) => warn!("unexpected gyroscope chip id 0x{:02X}", id),
        Err(e) => warn!("failed to read gyroscope chip id: {:?}", e),
    }

    match sensor.mag_chip_id() {
        Ok(id) if id == bmx055::MAG_CHIP_ID => info!("magnetometer chip id 0x{:02X}", id),
        Ok(id) => warn!("unexpected magnetometer chip id 0x{:02X}", id),
        Err(e) => warn!("failed to read magnetometer chip id: {:?}", e),
    }
}

fn dump_registers<I2C, E>(sensor: &mut Bmx055<I2C, E>)
where
    I2C: CompatibleI2c<E>,
    E: Debug,
{
    debug!("Accelerometer registers:");
    let _ = sensor.dump_config(ACC_ADDRESS, ACC_REGS);
    debug!("Gyroscope registers:");
    let _ = sensor.dump_config(GYRO_ADDRESS, GYRO_REGS);
    debug!("Magnetometer registers:");
    let _ = sensor.dump_config(MAG_ADDRESS, MAG_REGS);
}
