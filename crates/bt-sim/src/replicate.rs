//! Independent replications of the same route.
//!
//! Each replication builds its own [`Sim`][crate::Sim] with a seed derived
//! from the config's seed, so replications share nothing and their results
//! do not depend on execution order.  With the `parallel` feature they run
//! on Rayon's thread pool; results always come back in replication order.

use bt_core::{RouteConfig, rng::replication_seed};

use crate::{NoopObserver, SimBuilder, SimOutcome, SimResult};

/// Build and run a single simulation with no observer.
pub fn simulate(config: RouteConfig) -> SimResult<SimOutcome> {
    let mut sim = SimBuilder::new(config).build()?;
    sim.run(&mut NoopObserver);
    Ok(sim.into_outcome())
}

/// Run `count` replications of `config`.
///
/// Replication `i` uses seed `replication_seed(config.seed, i)`; replication
/// 0 therefore reproduces a plain [`simulate`] call.
pub fn run_replications(config: &RouteConfig, count: usize) -> SimResult<Vec<SimOutcome>> {
    config.validate()?;
    let run = |i: usize| {
        let seeded = RouteConfig { seed: replication_seed(config.seed, i as u64), ..config.clone() };
        simulate(seeded)
    };

    #[cfg(feature = "parallel")]
    let outcomes: SimResult<Vec<SimOutcome>> = {
        use rayon::prelude::*;
        (0..count).into_par_iter().map(run).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: SimResult<Vec<SimOutcome>> = (0..count).map(run).collect();

    log::info!("{count} replications finished");
    outcomes
}

/// Cross-replication averages of the headline metrics.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct ReplicationSummary {
    pub runs:                      usize,
    pub mean_served:               f64,
    pub mean_average_waiting_time: f64,
    pub mean_average_queue_size:   f64,
    /// Largest queue seen in any replication.
    pub max_queue_size:            usize,
}

impl ReplicationSummary {
    pub fn from_outcomes(outcomes: &[SimOutcome]) -> Self {
        if outcomes.is_empty() {
            return Self::default();
        }
        let n = outcomes.len() as f64;
        let mean = |f: fn(&SimOutcome) -> f64| outcomes.iter().map(f).sum::<f64>() / n;
        Self {
            runs:                      outcomes.len(),
            mean_served:               mean(|o| o.summary.total_served as f64),
            mean_average_waiting_time: mean(|o| o.summary.average_waiting_time),
            mean_average_queue_size:   mean(|o| o.summary.average_queue_size),
            max_queue_size:            outcomes.iter().map(|o| o.summary.max_queue_size).max().unwrap_or(0),
        }
    }
}
