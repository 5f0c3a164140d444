use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use bmx055::{Bmx055, CompatibleI2c};
use log::debug;

use crate::core_heading::compute_heading;
use crate::display::{Presenter, Readings};
use crate::error::{Error, Result};

/// Display refresh cadence.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the read → compute → present cycle until `running` is cleared or a
/// bus transaction fails. The sensor must already be initialized.
///
/// A failed read aborts the loop before the presenter is called, so a frame
/// is never built from stale or partial values.
pub fn run<I2C, E, P>(
    sensor: &mut Bmx055<I2C, E>,
    presenter: &mut P,
    running: &AtomicBool,
    interval: Duration,
) -> Result<()>
where
    I2C: CompatibleI2c<E>,
    E: Debug,
    P: Presenter,
{
    while running.load(Ordering::Relaxed) {
        let acceleration = sensor.read_acceleration().map_err(read_error)?;
        let gyroscope = sensor.read_gyroscope().map_err(read_error)?;
        let magnetometer = sensor.read_magnetometer().map_err(read_error)?;
        let heading = compute_heading(&magnetometer);

        presenter.present(&Readings {
            acceleration,
            gyroscope,
            magnetometer,
            heading,
        });

        thread::sleep(interval);
    }

    debug!("poll loop stopped");
    Ok(())
}

fn read_error<E: Debug>(err: bmx055::Error<E>) -> Error {
    Error::Read(format!("{:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Serves queued 6-byte sample buffers; an empty queue is a bus fault.
    #[derive(Default)]
    struct ScriptedBus {
        read_data: VecDeque<Vec<u8>>,
    }

    impl ScriptedBus {
        /// Queues one poll cycle worth of identical samples (acc, gyro, mag).
        fn queue_cycle(&mut self, data: &[u8; 6]) {
            for _ in 0..3 {
                self.read_data.push_back(data.to_vec());
            }
        }
    }

    impl ErrorType for ScriptedBus {
        type Error = ErrorKind;
    }

    impl I2c for ScriptedBus {
        fn read(
            &mut self,
            _addr: SevenBitAddress,
            _buffer: &mut [u8],
        ) -> std::result::Result<(), Self::Error> {
            unimplemented!()
        }

        fn write(
            &mut self,
            _addr: SevenBitAddress,
            _bytes: &[u8],
        ) -> std::result::Result<(), Self::Error> {
            Ok(())
        }

        fn write_read(
            &mut self,
            _addr: SevenBitAddress,
            _bytes: &[u8],
            buffer: &mut [u8],
        ) -> std::result::Result<(), Self::Error> {
            let data = self.read_data.pop_front().ok_or(ErrorKind::Other)?;
            buffer.copy_from_slice(&data);
            Ok(())
        }

        fn transaction(
            &mut self,
            _addr: SevenBitAddress,
            _operations: &mut [Operation],
        ) -> std::result::Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    /// Captures every frame and clears the run flag after a fixed number.
    struct CountingPresenter {
        seen: Vec<Readings>,
        stop_after: usize,
        running: Arc<AtomicBool>,
    }

    impl Presenter for CountingPresenter {
        fn present(&mut self, readings: &Readings) {
            self.seen.push(*readings);
            if self.seen.len() >= self.stop_after {
                self.running.store(false, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn loop_presents_each_cycle_and_stops_on_flag() {
        let mut bus = ScriptedBus::default();
        for _ in 0..3 {
            bus.queue_cycle(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
        }
        let mut sensor = Bmx055::new(bus);

        let running = Arc::new(AtomicBool::new(true));
        let mut presenter = CountingPresenter {
            seen: Vec::new(),
            stop_after: 3,
            running: Arc::clone(&running),
        };

        run(&mut sensor, &mut presenter, &running, Duration::ZERO).unwrap();

        assert_eq!(presenter.seen.len(), 3);
        let first = &presenter.seen[0];
        assert!((first.gyroscope.x - 256.0 / 131.0).abs() < 1e-6);
        // The heading shown is derived from the magnetometer sample shown.
        assert_eq!(first.heading, compute_heading(&first.magnetometer));
    }

    #[test]
    fn read_failure_aborts_without_presenting_a_partial_frame() {
        let mut bus = ScriptedBus::default();
        bus.queue_cycle(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        // Second cycle: the accelerometer read succeeds, the gyroscope read
        // hits an exhausted bus.
        bus.read_data.push_back(vec![0x00; 6]);
        let mut sensor = Bmx055::new(bus);

        let running = Arc::new(AtomicBool::new(true));
        let mut presenter = CountingPresenter {
            seen: Vec::new(),
            stop_after: usize::MAX,
            running: Arc::clone(&running),
        };

        let result = run(&mut sensor, &mut presenter, &running, Duration::ZERO);

        assert!(matches!(result, Err(Error::Read(_))));
        assert_eq!(presenter.seen.len(), 1);
    }

    #[test]
    fn cleared_flag_prevents_any_reads() {
        let mut sensor = Bmx055::new(ScriptedBus::default());
        let running = AtomicBool::new(false);
        let mut presenter = CountingPresenter {
            seen: Vec::new(),
            stop_after: usize::MAX,
            running: Arc::new(AtomicBool::new(false)),
        };

        run(&mut sensor, &mut presenter, &running, Duration::ZERO).unwrap();
        assert!(presenter.seen.is_empty());
    }
}
