//! Batched fitness evaluation
//!
//! The hot path of the optimizer: decodes a population slice and runs the
//! elementwise physics pipeline, taking the method branch once per call
//! rather than per individual. Non-finite evaluations are quarantined at
//! the sentinel fitness so NaN never reaches the selection step.

use cutkit_core::data::{CuttingConstraints, MachiningMethod};
use cutkit_core::limits::penalty;
use tracing::debug;

use crate::genome::{self, Genome, GenomeScale};
use crate::physics;

/// Violation counts of one batch, for debug logging only
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchDiagnostics {
    pub tool_life: usize,
    pub power: usize,
    pub torque: usize,
    pub bottom_roughness: usize,
    pub side_roughness: usize,
    pub feed_force: usize,
    pub feed_per_tooth: usize,
    pub cutting_speed: usize,
    pub deflection: usize,
    pub plunge_pressure: usize,
    /// Individuals quarantined at the sentinel fitness
    pub non_finite: usize,
}

impl BatchDiagnostics {
    fn record(&mut self, hits: &physics::ConstraintHits) {
        self.tool_life += usize::from(hits.tool_life);
        self.power += usize::from(hits.power);
        self.torque += usize::from(hits.torque);
        self.bottom_roughness += usize::from(hits.bottom_roughness);
        self.side_roughness += usize::from(hits.side_roughness);
        self.feed_force += usize::from(hits.feed_force);
        self.feed_per_tooth += usize::from(hits.feed_per_tooth);
        self.cutting_speed += usize::from(hits.cutting_speed);
        self.deflection += usize::from(hits.deflection);
        self.plunge_pressure += usize::from(hits.plunge_pressure);
    }
}

/// Evaluate a population slice into a fitness vector
pub fn evaluate_population(
    population: &[Genome],
    constraints: &CuttingConstraints,
    scale: &GenomeScale,
) -> Vec<f64> {
    evaluate_population_with_diagnostics(population, constraints, scale).0
}

/// Evaluate a population slice, additionally reporting violation counts.
///
/// Diagnostics never change fitness values.
pub fn evaluate_population_with_diagnostics(
    population: &[Genome],
    constraints: &CuttingConstraints,
    scale: &GenomeScale,
) -> (Vec<f64>, BatchDiagnostics) {
    let mut diagnostics = BatchDiagnostics::default();
    let mut fitnesses = Vec::with_capacity(population.len());

    // One dispatch per population, then a fused elementwise pipeline.
    match constraints.method {
        MachiningMethod::Milling => {
            for individual in population {
                let p = genome::decode(individual, scale);
                let eval = physics::evaluate_milling(p.speed, p.feed, p.cut_depth, constraints);
                fitnesses.push(score(&eval, constraints, &mut diagnostics));
            }
        }
        MachiningMethod::Drilling => {
            for individual in population {
                let p = genome::decode(individual, scale);
                let eval = physics::evaluate_drilling(p.speed, p.feed, constraints);
                fitnesses.push(score(&eval, constraints, &mut diagnostics));
            }
        }
        MachiningMethod::Boring => {
            for individual in population {
                let p = genome::decode(individual, scale);
                let eval = physics::evaluate_boring(p.speed, p.feed, p.cut_depth, constraints);
                fitnesses.push(score(&eval, constraints, &mut diagnostics));
            }
        }
    }

    if diagnostics.non_finite > 0 {
        debug!(
            quarantined = diagnostics.non_finite,
            total = population.len(),
            "non-finite evaluations replaced by the sentinel fitness"
        );
    }

    (fitnesses, diagnostics)
}

#[inline]
fn score(
    eval: &cutkit_core::data::Evaluation,
    constraints: &CuttingConstraints,
    diagnostics: &mut BatchDiagnostics,
) -> f64 {
    let pen = physics::constraint_penalty(eval, constraints);
    diagnostics.record(&pen.hits);
    let fitness = eval.removal_rate - penalty::SCALE * pen.value;
    if !eval.is_finite() || !fitness.is_finite() {
        diagnostics.non_finite += 1;
        penalty::SENTINEL_FITNESS
    } else {
        fitness
    }
}
