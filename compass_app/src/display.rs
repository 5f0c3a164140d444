use std::fmt::Write;
use std::io::{self, Write as IoWrite};

use bmx055::Vector3;

/// One refresh worth of sensor output. Built fresh every poll cycle and
/// discarded after presentation.
#[derive(Debug, Clone, Copy)]
pub struct Readings {
    pub acceleration: Vector3,
    pub gyroscope: Vector3,
    pub magnetometer: Vector3,
    pub heading: f64,
}

/// Rendering surface for the poll loop. Implementations own all layout and
/// formatting.
pub trait Presenter {
    fn present(&mut self, readings: &Readings);
}

pub fn format_readings(r: &Readings) -> String {
    let mut out = String::new();
    let mut block = |label: &str, unit: &str, v: &Vector3| {
        writeln!(out, "{}", label).unwrap();
        writeln!(out, "  X: {:>8.2} {}", v.x, unit).unwrap();
        writeln!(out, "  Y: {:>8.2} {}", v.y, unit).unwrap();
        writeln!(out, "  Z: {:>8.2} {}", v.z, unit).unwrap();
        writeln!(out).unwrap();
    };
    block("Acceleration:", "m/s^2", &r.acceleration);
    block("Gyroscope:", "dps", &r.gyroscope);
    block("Magnetometer:", "uT", &r.magnetometer);
    writeln!(out, "Heading: {:.2} deg", r.heading).unwrap();
    out
}

/// Redraws the whole frame in place on an ANSI terminal.
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn present(&mut self, readings: &Readings) {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "\x1b[2J\x1b[H{}", format_readings(readings));
        let _ = stdout.flush();
    }
}
