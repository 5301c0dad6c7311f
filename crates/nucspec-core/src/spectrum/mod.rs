//! Acquisition-window collaborator used by decay integrals, and a minimal
//! calibrated spectrum value that provides one.
//!
//! File formats and plotting live elsewhere; this module only carries the
//! counts, the acquisition timestamps and the polynomial energy calibration.

use crate::common::time::{Timestamp, seconds_between};
use crate::domain::{NucError, NucResult};

/// Anything with a start and stop timestamp.
pub trait AcquisitionInterval {
    fn start_time(&self) -> Timestamp;
    fn stop_time(&self) -> Timestamp;

    fn duration_seconds(&self) -> f64 {
        seconds_between(self.start_time(), self.stop_time())
    }

    /// Seconds shared with `other`; zero when the windows are disjoint.
    fn overlap_seconds(&self, other: &dyn AcquisitionInterval) -> f64 {
        let start = self.start_time().max(other.start_time());
        let stop = self.stop_time().min(other.stop_time());
        if stop <= start {
            0.0
        } else {
            seconds_between(start, stop)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: Timestamp,
    stop: Timestamp,
}

impl TimeInterval {
    pub fn new(start: Timestamp, stop: Timestamp) -> NucResult<Self> {
        if stop < start {
            return Err(NucError::value(
                "VALUE.INTERVAL_ORDER",
                format!("interval stop {stop} precedes start {start}"),
            ));
        }
        Ok(Self { start, stop })
    }
}

impl AcquisitionInterval for TimeInterval {
    fn start_time(&self) -> Timestamp {
        self.start
    }

    fn stop_time(&self) -> Timestamp {
        self.stop
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    counts: Vec<f64>,
    start_time: Option<Timestamp>,
    stop_time: Option<Timestamp>,
    livetime: Option<f64>,
    realtime: Option<f64>,
    calibration: Vec<f64>,
}

impl Spectrum {
    pub fn new(counts: Vec<f64>) -> Self {
        Self {
            counts,
            ..Self::default()
        }
    }

    pub fn with_times(mut self, start: Timestamp, stop: Timestamp) -> NucResult<Self> {
        TimeInterval::new(start, stop)?;
        self.start_time = Some(start);
        self.stop_time = Some(stop);
        Ok(self)
    }

    pub fn with_livetime(mut self, livetime: f64, realtime: f64) -> NucResult<Self> {
        if !(livetime >= 0.0 && realtime >= livetime && realtime.is_finite()) {
            return Err(NucError::value(
                "VALUE.LIVETIME",
                format!("need 0 <= livetime <= realtime, got {livetime} / {realtime}"),
            ));
        }
        self.livetime = Some(livetime);
        self.realtime = Some(realtime);
        Ok(self)
    }

    /// Polynomial coefficients, lowest order first: `E = sum c_j * ch^j`.
    pub fn with_calibration(mut self, coefficients: Vec<f64>) -> Self {
        self.calibration = coefficients;
        self
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    pub fn num_channels(&self) -> usize {
        self.counts.len()
    }

    pub fn livetime(&self) -> Option<f64> {
        self.livetime
    }

    pub fn realtime(&self) -> Option<f64> {
        self.realtime
    }

    pub fn is_calibrated(&self) -> bool {
        !self.calibration.is_empty()
    }

    pub fn calibration(&self) -> &[f64] {
        &self.calibration
    }

    pub fn interval(&self) -> NucResult<TimeInterval> {
        match (self.start_time, self.stop_time) {
            (Some(start), Some(stop)) => TimeInterval::new(start, stop),
            _ => Err(NucError::input(
                "INPUT.SPECTRUM_TIMES",
                "spectrum has no start/stop timestamps",
            )),
        }
    }

    pub fn channel_to_energy(&self, channel: f64) -> NucResult<f64> {
        if !self.is_calibrated() {
            return Err(NucError::input(
                "INPUT.SPECTRUM_UNCALIBRATED",
                "spectrum has no energy calibration",
            ));
        }
        // Horner evaluation, highest order first.
        Ok(self
            .calibration
            .iter()
            .rev()
            .fold(0.0, |energy, coefficient| energy * channel + coefficient))
    }

    pub fn bin_width(&self, channel: f64) -> NucResult<f64> {
        Ok(self.channel_to_energy(channel + 0.5)? - self.channel_to_energy(channel - 0.5)?)
    }

    pub fn energies(&self) -> NucResult<Vec<f64>> {
        (0..self.counts.len())
            .map(|channel| self.channel_to_energy(channel as f64))
            .collect()
    }

    /// Fractional channel for `energy`, linearly interpolated between the
    /// calibrated channel energies.
    pub fn energy_to_channel(&self, energy: f64) -> NucResult<f64> {
        let energies = self.energies()?;
        if energies.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(NucError::value(
                "VALUE.CALIBRATION_ORDER",
                "energy calibration is not strictly increasing over the channels",
            ));
        }
        let out_of_range = || {
            NucError::value(
                "VALUE.ENERGY_RANGE",
                format!("energy {energy} is outside the calibrated range"),
            )
        };
        let (Some(&first), Some(&last)) = (energies.first(), energies.last()) else {
            return Err(out_of_range());
        };
        if !(first..=last).contains(&energy) {
            return Err(out_of_range());
        }

        let upper = energies.partition_point(|&e| e < energy);
        if upper == 0 {
            return Ok(0.0);
        }
        let (e0, e1) = (energies[upper - 1], energies[upper]);
        Ok((upper - 1) as f64 + (energy - e0) / (e1 - e0))
    }
}
