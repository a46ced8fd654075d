//! The random-variate capability.

use crate::{SimulationConfig, SimulationError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Exp;

/// Source of the random durations driving a run.
///
/// The engine never samples a distribution directly; it asks this trait,
/// so alternative distributions can be substituted without touching the
/// engine. Implementations must be deterministic given their construction
/// inputs for runs to be reproducible.
pub trait VariateSource {
    /// Sample the delay until the next process arrival.
    fn sample_inter_arrival(&mut self) -> f64;

    /// Sample the service duration for one process.
    fn sample_service(&mut self) -> f64;
}

/// Exponential variates over two independent seeded RNG streams.
///
/// One stream drives inter-arrival times, the other service times, so the
/// arrival pattern is unaffected by how many services are sampled (and
/// vice versa). Both streams derive from a single run seed.
#[derive(Debug)]
pub struct ExponentialVariates<R = ChaCha8Rng> {
    inter_arrival: Exp<f64>,
    service: Exp<f64>,
    arrival_rng: R,
    service_rng: R,
}

impl<R: Rng> ExponentialVariates<R> {
    /// Build from explicit rate parameters and RNG streams.
    pub fn new(
        arrival_rate: f64,
        service_rate: f64,
        arrival_rng: R,
        service_rng: R,
    ) -> Result<Self, SimulationError> {
        let inter_arrival = Exp::new(arrival_rate).map_err(|_| {
            SimulationError::Configuration(format!(
                "processArrivalRate must be positive, got {arrival_rate}"
            ))
        })?;
        let service = Exp::new(service_rate).map_err(|_| {
            SimulationError::Configuration(format!(
                "processorServiceRate must be positive, got {service_rate}"
            ))
        })?;
        Ok(Self {
            inter_arrival,
            service,
            arrival_rng,
            service_rng,
        })
    }
}

impl ExponentialVariates<ChaCha8Rng> {
    /// Build the source for a configured run from a single seed.
    ///
    /// The seed is split into two independent ChaCha8 streams. Two runs
    /// with the same config and seed draw identical variate sequences.
    pub fn from_config(config: &SimulationConfig, seed: u64) -> Result<Self, SimulationError> {
        let arrival_rng = ChaCha8Rng::seed_from_u64(seed);
        let service_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        Self::new(
            config.process_arrival_rate,
            config.processor_service_rate,
            arrival_rng,
            service_rng,
        )
    }
}

impl<R: Rng> VariateSource for ExponentialVariates<R> {
    fn sample_inter_arrival(&mut self) -> f64 {
        self.arrival_rng.sample(self.inter_arrival)
    }

    fn sample_service(&mut self) -> f64 {
        self.service_rng.sample(self.service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogMode;

    fn config() -> SimulationConfig {
        SimulationConfig {
            processor_count: 1,
            processor_service_rate: 2.0,
            process_arrival_rate: 4.0,
            target_process_count: 10,
            log: LogMode::default(),
        }
    }

    #[test]
    fn samples_are_positive() {
        let mut variates = ExponentialVariates::from_config(&config(), 42).unwrap();
        for _ in 0..100 {
            assert!(variates.sample_inter_arrival() > 0.0);
            assert!(variates.sample_service() > 0.0);
        }
    }

    #[test]
    fn same_seed_draws_identical_sequences() {
        let mut a = ExponentialVariates::from_config(&config(), 7).unwrap();
        let mut b = ExponentialVariates::from_config(&config(), 7).unwrap();
        for _ in 0..50 {
            assert_eq!(a.sample_inter_arrival(), b.sample_inter_arrival());
            assert_eq!(a.sample_service(), b.sample_service());
        }
    }

    #[test]
    fn arrival_stream_is_independent_of_service_draws() {
        let mut a = ExponentialVariates::from_config(&config(), 7).unwrap();
        let mut b = ExponentialVariates::from_config(&config(), 7).unwrap();

        // Drain many service samples from `a` only.
        for _ in 0..100 {
            a.sample_service();
        }

        // Arrival draws still line up.
        for _ in 0..20 {
            assert_eq!(a.sample_inter_arrival(), b.sample_inter_arrival());
        }
    }

    #[test]
    fn sample_mean_tracks_rate() {
        let mut variates = ExponentialVariates::from_config(&config(), 42).unwrap();
        let n = 20_000;
        let sum: f64 = (0..n).map(|_| variates.sample_inter_arrival()).sum();
        let mean = sum / n as f64;
        // Rate 4.0 → mean 0.25; generous tolerance for a finite sample.
        assert!((mean - 0.25).abs() < 0.02, "mean {mean} too far from 0.25");
    }

    #[test]
    fn invalid_rate_is_a_configuration_error() {
        let err = ExponentialVariates::new(
            0.0,
            1.0,
            ChaCha8Rng::seed_from_u64(0),
            ChaCha8Rng::seed_from_u64(1),
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::Configuration(_)));
    }
}
