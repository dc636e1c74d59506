//! Microbial genetic algorithm
//!
//! Pair-tournament selection with winner-into-loser propagation: no
//! generational replacement, no elitist copy. Each generation walks the
//! population in contiguous pairs inside fixed-size batches; the loser of
//! a pair receives winner bits with the crossover probability and bit
//! flips with the mutation probability, then is written back at its own
//! index. The incumbent best is a sequential reduction over pair winners.

use std::sync::atomic::{AtomicBool, Ordering};

use cutkit_core::data::CuttingConstraints;
use cutkit_core::error::{OptimizeError, Result};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::fitness;
use crate::genome::{self, Genome, GenomeScale, DNA_BITS};

/// Algorithm configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Population size; must be even
    pub population_size: usize,
    /// Generation budget; 0 returns the best of the initial population
    pub generations: usize,
    /// Per-bit probability of pulling a winner bit into the loser
    pub crossover_rate: f64,
    /// Per-bit probability of flipping a loser bit
    pub mutation_rate: f64,
    /// Anneal the rates over the generation budget
    pub adaptive_rate: bool,
    /// Individuals evaluated per batched fitness call
    pub batch_size: usize,
    /// Stagnant generations after which the run stops early
    pub early_stop_generations: usize,
    /// Improvement below which a generation counts as stagnant
    pub convergence_epsilon: f64,
    /// Spindle speed search range in r/min
    pub speed_range: (f64, f64),
    /// Feed rate search range in mm/min
    pub feed_range: (f64, f64),
    /// Axial depth search range in mm
    pub cut_depth_range: (f64, f64),
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10_240,
            generations: 200,
            crossover_rate: 0.6,
            mutation_rate: 0.3,
            adaptive_rate: true,
            batch_size: 128,
            early_stop_generations: 50,
            convergence_epsilon: 1e-6,
            speed_range: (0.0, 8000.0),
            feed_range: (0.0, 8000.0),
            cut_depth_range: (0.0, 1.0),
        }
    }
}

impl GaConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 || self.population_size % 2 != 0 {
            return Err(OptimizeError::invalid(
                "config.population_size",
                "must be even and non-zero",
            ));
        }
        if self.batch_size == 0 {
            return Err(OptimizeError::invalid(
                "config.batch_size",
                "must be non-zero",
            ));
        }
        for (field, rate) in [
            ("config.crossover_rate", self.crossover_rate),
            ("config.mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(OptimizeError::invalid(field, "must lie in [0, 1]"));
            }
        }
        for (axis, (lower, upper)) in [
            ("speed", self.speed_range),
            ("feed", self.feed_range),
            ("cut_depth", self.cut_depth_range),
        ] {
            if upper < lower || !lower.is_finite() || !upper.is_finite() {
                return Err(OptimizeError::Infeasible { axis, lower, upper });
            }
        }
        Ok(())
    }

    /// Decode scale derived from the range upper bounds
    pub fn scale(&self) -> GenomeScale {
        GenomeScale {
            speed_max: self.speed_range.1,
            feed_max: self.feed_range.1,
            cut_depth_max: self.cut_depth_range.1,
        }
    }
}

/// Result of one evolution run
#[derive(Debug, Clone)]
pub struct GaOutcome {
    /// Incumbent genome at termination
    pub best_genome: Genome,
    /// Incumbent fitness at termination
    pub best_fitness: f64,
    /// Generations actually processed
    pub generations_run: usize,
    /// The stagnation counter reached its bound
    pub stopped_early: bool,
    /// The cancellation signal fired between generations
    pub aborted: bool,
}

/// Microbial GA engine
///
/// Owns the only mutable state of a run: the population buffer, the
/// incumbent pair, and the stagnation counter. The RNG is injected into
/// [`MicrobialGa::run`]; equal seeds and inputs reproduce every
/// population, incumbent, and termination point.
pub struct MicrobialGa {
    config: GaConfig,
    constraints: CuttingConstraints,
    population: Vec<Genome>,
    best_genome: Genome,
    best_fitness: f64,
    stagnation: usize,
}

impl MicrobialGa {
    /// Create an engine for one run
    pub fn new(config: GaConfig, constraints: CuttingConstraints) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            constraints,
            population: Vec::new(),
            best_genome: [0u8; DNA_BITS],
            best_fitness: f64::NEG_INFINITY,
            stagnation: 0,
        })
    }

    /// Population snapshot, valid after [`MicrobialGa::run`]
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Evolve until the generation budget, early stop, or cancellation.
    pub fn run(&mut self, rng: &mut StdRng, cancel: &AtomicBool) -> GaOutcome {
        let scale = self.config.scale();
        self.population = (0..self.config.population_size)
            .map(|_| genome::random_genome(rng))
            .collect();

        // Seed the incumbent from the initial population so a
        // zero-generation budget still reports its best member.
        let initial = fitness::evaluate_population(&self.population, &self.constraints, &scale);
        for (individual, &fit) in self.population.iter().zip(initial.iter()) {
            if fit > self.best_fitness {
                self.best_fitness = fit;
                self.best_genome = *individual;
            }
        }

        let mut generations_run = 0;
        let mut stopped_early = false;
        let mut aborted = false;

        for generation in 0..self.config.generations {
            if cancel.load(Ordering::Relaxed) {
                debug!(generation, "cancellation observed, returning incumbent");
                aborted = true;
                break;
            }

            let (crossover, mutation) = self.rates_for(generation);
            let previous_best = self.best_fitness;

            let mut start = 0;
            while start < self.population.len() {
                let end = (start + self.config.batch_size).min(self.population.len());
                let (fits, diagnostics) = fitness::evaluate_population_with_diagnostics(
                    &self.population[start..end],
                    &self.constraints,
                    &scale,
                );
                if diagnostics.non_finite > 0 {
                    debug!(batch_start = start, ?diagnostics, "batch diagnostics");
                }

                for pair in (0..fits.len()).step_by(2) {
                    if pair + 1 >= fits.len() {
                        break;
                    }
                    let (winner, loser, winner_fitness) = if fits[pair] < fits[pair + 1] {
                        (start + pair + 1, start + pair, fits[pair + 1])
                    } else {
                        (start + pair, start + pair + 1, fits[pair])
                    };

                    let winner_genome = self.population[winner];
                    let loser_genome = &mut self.population[loser];
                    for bit in 0..DNA_BITS {
                        if rng.gen::<f64>() < crossover {
                            loser_genome[bit] = winner_genome[bit];
                        }
                    }
                    for bit in 0..DNA_BITS {
                        if rng.gen::<f64>() < mutation {
                            loser_genome[bit] ^= 1;
                        }
                    }

                    if winner_fitness > self.best_fitness {
                        self.best_fitness = winner_fitness;
                        self.best_genome = winner_genome;
                    }
                }

                start = end;
            }

            generations_run = generation + 1;
            if (self.best_fitness - previous_best).abs() < self.config.convergence_epsilon {
                self.stagnation += 1;
            } else {
                self.stagnation = 0;
            }

            if generation % 10 == 0 {
                debug!(
                    generation,
                    best_fitness = self.best_fitness,
                    stagnation = self.stagnation,
                    "generation complete"
                );
            }

            if self.stagnation >= self.config.early_stop_generations {
                debug!(
                    generation,
                    stagnation = self.stagnation,
                    "early stop on stagnation"
                );
                stopped_early = true;
                break;
            }
        }

        GaOutcome {
            best_genome: self.best_genome,
            best_fitness: self.best_fitness,
            generations_run,
            stopped_early,
            aborted,
        }
    }

    /// Effective rates for a generation.
    ///
    /// Adaptive mode anneals both rates over the budget; otherwise the
    /// configured constants hold.
    fn rates_for(&self, generation: usize) -> (f64, f64) {
        if self.config.adaptive_rate && self.config.generations > 0 {
            let progress = generation as f64 / self.config.generations as f64;
            (0.6 * (1.0 - 0.3 * progress), 0.3 * (1.0 - 0.2 * progress))
        } else {
            (self.config.crossover_rate, self.config.mutation_rate)
        }
    }
}
