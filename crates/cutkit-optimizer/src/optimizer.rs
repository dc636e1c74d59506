//! Optimization facade
//!
//! Orchestrates one run: resolves the input records from the parameter
//! store, plans the search box, configures and dispatches the microbial
//! GA to a blocking worker, re-evaluates the incumbent with the scalar
//! physics kernel, reviews the result, and assembles the response. An
//! optional language-model collaborator may enrich the advice strings;
//! its failure is absorbed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cutkit_core::data::{CuttingConstraints, Evaluation, Machine, Material, SearchBox, Tool};
use cutkit_core::error::{OptimizeError, Result};
use cutkit_toollib::ParameterStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::genome;
use crate::mga::{GaConfig, GaOutcome, MicrobialGa};
use crate::physics;
use crate::planner::{Planner, SearchPlan};
use crate::reviewer::{ReviewReport, Reviewer};

/// One optimization request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub material_id: String,
    pub tool_id: String,
    pub machine_id: String,
    pub strategy_id: String,
    /// Population size override, 100..=100000 and even
    #[serde(default)]
    pub population_size: Option<usize>,
    /// Generation budget override, 10..=1000
    #[serde(default)]
    pub generations: Option<usize>,
    /// Crossover rate override in [0, 1]; disables rate annealing
    #[serde(default)]
    pub crossover_rate: Option<f64>,
    /// Mutation rate override in [0, 1]; disables rate annealing
    #[serde(default)]
    pub mutation_rate: Option<f64>,
    /// RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Facade configuration
#[derive(Debug, Clone)]
pub struct OptimizerOptions {
    /// Run the planner before the assisted optimization
    pub enable_planner: bool,
    /// Run the reviewer on the assisted result
    pub enable_reviewer: bool,
    /// Wall-clock budget; expiry cancels the run cooperatively
    pub timeout: Duration,
    /// Seed used when the request carries none; `None` draws from entropy
    pub default_seed: Option<u64>,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            enable_planner: true,
            enable_reviewer: true,
            timeout: Duration::from_secs(120),
            default_seed: None,
        }
    }
}

/// Context handed to the advice collaborator
#[derive(Debug, Clone, Serialize)]
pub struct AdviceContext {
    pub tool: Tool,
    pub material: Material,
    pub machine: Machine,
    pub evaluation: Evaluation,
}

/// External language-model collaborator producing advice strings.
///
/// Invoked at most once per run; any failure is absorbed and the
/// planner's own advice stands.
#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    async fn generate_advice(&self, context: &AdviceContext)
        -> anyhow::Result<HashMap<String, String>>;
}

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The generation budget or the early-stop condition ended the run
    Completed,
    /// Cancellation or timeout ended the run; the incumbent is returned
    Aborted,
}

/// Rounded result fields of the incumbent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub speed: f64,
    pub feed: f64,
    pub cut_depth: f64,
    pub cut_width: f64,
    pub feed_per_tooth: f64,
    pub cutting_speed: f64,
    pub removal_rate: f64,
    pub tool_life: f64,
    pub bottom_roughness: f64,
    pub side_roughness: f64,
    pub power: f64,
    pub torque: f64,
    pub feed_force: f64,
    pub deflection: f64,
    pub fitness: f64,
}

impl OptimizationResult {
    fn from_evaluation(eval: &Evaluation, fitness: f64) -> Self {
        Self {
            speed: round_dp(eval.speed, 2),
            feed: round_dp(eval.feed, 2),
            cut_depth: round_dp(eval.cut_depth, 2),
            cut_width: round_dp(eval.cut_width, 2),
            feed_per_tooth: round_dp(eval.feed_per_tooth, 4),
            cutting_speed: round_dp(eval.cutting_speed, 2),
            removal_rate: round_dp(eval.removal_rate, 2),
            tool_life: round_dp(eval.tool_life, 2),
            bottom_roughness: round_dp(eval.bottom_roughness, 2),
            side_roughness: round_dp(eval.side_roughness, 2),
            power: round_dp(eval.power, 2),
            torque: round_dp(eval.torque, 2),
            feed_force: round_dp(eval.feed_force, 2),
            deflection: round_dp(eval.deflection, 2),
            fitness: round_dp(fitness, 6),
        }
    }
}

/// Full response of one run
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationOutcome {
    /// Generated run id
    pub id: Uuid,
    /// Completion timestamp
    pub created_at: DateTime<Utc>,
    /// The final parameters satisfy every reviewed or checked limit
    pub success: bool,
    /// Terminal state
    pub status: RunStatus,
    /// Human-readable summary
    pub message: String,
    /// Rounded incumbent result
    pub result: OptimizationResult,
    /// Generations actually processed
    pub generations_run: usize,
    /// Planned search box (assisted runs)
    pub search_box: Option<SearchBox>,
    /// Why the box was chosen (assisted runs)
    pub search_reason: Option<String>,
    /// Per-axis advice (assisted runs)
    pub advice: Option<HashMap<String, String>>,
    /// Safety review (assisted runs)
    pub review: Option<ReviewReport>,
}

/// Optimization facade over a parameter store
pub struct Optimizer<S: ParameterStore> {
    store: Arc<S>,
    options: OptimizerOptions,
    advice_generator: Option<Arc<dyn AdviceGenerator>>,
}

impl<S: ParameterStore> Optimizer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            options: OptimizerOptions::default(),
            advice_generator: None,
        }
    }

    pub fn with_options(mut self, options: OptimizerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_advice_generator(mut self, generator: Arc<dyn AdviceGenerator>) -> Self {
        self.advice_generator = Some(generator);
        self
    }

    /// Plain optimization: search over the machine/envelope bounds
    pub async fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizationOutcome> {
        self.run(request, false).await
    }

    /// Assisted optimization: planner, reviewer, and advice included
    pub async fn optimize_assisted(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationOutcome> {
        self.run(request, true).await
    }

    async fn run(&self, request: &OptimizationRequest, assisted: bool) -> Result<OptimizationOutcome> {
        validate_overrides(request)?;

        let material = self
            .store
            .material(&request.material_id)
            .ok_or_else(|| OptimizeError::not_found("material", &request.material_id))?;
        let tool = self
            .store
            .tool(&request.tool_id)
            .ok_or_else(|| OptimizeError::not_found("tool", &request.tool_id))?;
        let machine = self
            .store
            .machine(&request.machine_id)
            .ok_or_else(|| OptimizeError::not_found("machine", &request.machine_id))?;
        let strategy = self
            .store
            .strategy(&request.strategy_id)
            .ok_or_else(|| OptimizeError::not_found("strategy", &request.strategy_id))?;

        let constraints = CuttingConstraints::compile(&tool, &material, &machine, &strategy)?;
        info!(
            material = %material.id,
            tool = %tool.id,
            machine = %machine.id,
            strategy = %strategy.id,
            method = %constraints.method,
            "starting optimization"
        );

        let plan = if assisted && self.options.enable_planner {
            Some(Planner::new(&tool, &material, &machine).plan(constraints.method)?)
        } else {
            None
        };

        let config = self.build_config(request, plan.as_ref(), &machine, &constraints);
        let seed = request
            .seed
            .or(self.options.default_seed)
            .unwrap_or_else(rand::random);

        let cancel = Arc::new(AtomicBool::new(false));
        let ga_outcome = self
            .run_engine(config.clone(), constraints.clone(), seed, cancel)
            .await?;

        // Final scalar re-evaluation of the incumbent; the batched loop
        // quarantines non-finite individuals, so anything non-finite here
        // is evaluator drift and fatal for the run.
        let scale = config.scale();
        let params = genome::decode(&ga_outcome.best_genome, &scale);
        let evaluation = physics::evaluate(params.speed, params.feed, params.cut_depth, &constraints);
        if !evaluation.is_finite() || !ga_outcome.best_fitness.is_finite() {
            error!(
                speed = params.speed,
                feed = params.feed,
                cut_depth = params.cut_depth,
                "non-finite quantity in the final evaluation"
            );
            return Err(OptimizeError::Numeric {
                detail: format!(
                    "non-finite evaluation of the incumbent (speed {:.2} r/min, feed {:.2} \
                     mm/min, cut depth {:.3} mm)",
                    params.speed, params.feed, params.cut_depth
                ),
            });
        }

        let violation_count = physics::constraint_penalty(&evaluation, &constraints).hits.count();
        let review = if assisted && self.options.enable_reviewer {
            Some(Reviewer::new(&tool, &material, &machine, &strategy).review(&evaluation))
        } else {
            None
        };

        let mut advice = plan.as_ref().map(|p| p.advice.clone());
        if assisted {
            if let Some(generator) = &self.advice_generator {
                let context = AdviceContext {
                    tool: tool.clone(),
                    material: material.clone(),
                    machine: machine.clone(),
                    evaluation: evaluation.clone(),
                };
                match generator.generate_advice(&context).await {
                    Ok(extra) => {
                        advice.get_or_insert_with(HashMap::new).extend(extra);
                    }
                    Err(err) => {
                        warn!(error = %err, "advice generator failed, keeping planner advice");
                    }
                }
            }
        }

        let success = match &review {
            Some(report) => report.passed,
            None => violation_count == 0,
        };
        let status = if ga_outcome.aborted {
            RunStatus::Aborted
        } else {
            RunStatus::Completed
        };
        let message = build_message(plan.as_ref(), review.as_ref(), violation_count, &ga_outcome);

        info!(
            fitness = ga_outcome.best_fitness,
            generations = ga_outcome.generations_run,
            success,
            ?status,
            "optimization finished"
        );

        Ok(OptimizationOutcome {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            success,
            status,
            message,
            result: OptimizationResult::from_evaluation(&evaluation, ga_outcome.best_fitness),
            generations_run: ga_outcome.generations_run,
            search_box: plan.as_ref().map(|p| p.search_box.clone()),
            search_reason: plan.as_ref().map(|p| p.reason.clone()),
            advice,
            review,
        })
    }

    fn build_config(
        &self,
        request: &OptimizationRequest,
        plan: Option<&SearchPlan>,
        machine: &Machine,
        constraints: &CuttingConstraints,
    ) -> GaConfig {
        let (speed_range, feed_range, cut_depth_range) = match plan {
            Some(plan) => (
                plan.search_box.speed_range,
                plan.search_box.feed_range,
                plan.search_box.cut_depth_range,
            ),
            None => (
                (0.0, machine.rpm_max),
                (0.0, machine.feed_rate_max),
                (0.0, constraints.max_cut_depth),
            ),
        };

        let defaults = GaConfig::default();
        GaConfig {
            population_size: request.population_size.unwrap_or(defaults.population_size),
            generations: request.generations.unwrap_or(defaults.generations),
            crossover_rate: request.crossover_rate.unwrap_or(defaults.crossover_rate),
            mutation_rate: request.mutation_rate.unwrap_or(defaults.mutation_rate),
            // Explicit rate overrides take precedence over annealing.
            adaptive_rate: request.crossover_rate.is_none() && request.mutation_rate.is_none(),
            speed_range,
            feed_range,
            cut_depth_range,
            ..defaults
        }
    }

    /// Dispatch the engine to a blocking worker; the timeout sets the
    /// cooperative cancel flag and the run returns its incumbent.
    async fn run_engine(
        &self,
        config: GaConfig,
        constraints: CuttingConstraints,
        seed: u64,
        cancel: Arc<AtomicBool>,
    ) -> Result<GaOutcome> {
        let worker_cancel = cancel.clone();
        let mut handle = tokio::task::spawn_blocking(move || -> Result<GaOutcome> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut engine = MicrobialGa::new(config, constraints)?;
            Ok(engine.run(&mut rng, &worker_cancel))
        });

        let joined = tokio::select! {
            joined = &mut handle => joined,
            _ = tokio::time::sleep(self.options.timeout) => {
                warn!(timeout_s = self.options.timeout.as_secs(), "wall-clock budget expired, cancelling the run");
                cancel.store(true, Ordering::Relaxed);
                (&mut handle).await
            }
        };

        joined.map_err(|err| OptimizeError::Numeric {
            detail: format!("optimizer worker failed: {err}"),
        })?
    }
}

fn validate_overrides(request: &OptimizationRequest) -> Result<()> {
    if let Some(n) = request.population_size {
        if !(100..=100_000).contains(&n) {
            return Err(OptimizeError::invalid(
                "population_size",
                "must lie in [100, 100000]",
            ));
        }
        if n % 2 != 0 {
            return Err(OptimizeError::invalid("population_size", "must be even"));
        }
    }
    if let Some(g) = request.generations {
        if !(10..=1000).contains(&g) {
            return Err(OptimizeError::invalid(
                "generations",
                "must lie in [10, 1000]",
            ));
        }
    }
    for (field, rate) in [
        ("crossover_rate", request.crossover_rate),
        ("mutation_rate", request.mutation_rate),
    ] {
        if let Some(rate) = rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(OptimizeError::invalid(field, "must lie in [0, 1]"));
            }
        }
    }
    Ok(())
}

fn build_message(
    plan: Option<&SearchPlan>,
    review: Option<&ReviewReport>,
    violation_count: usize,
    ga_outcome: &GaOutcome,
) -> String {
    let mut parts = Vec::new();
    if ga_outcome.aborted {
        parts.push("run aborted before the generation budget; incumbent returned".to_string());
    } else if ga_outcome.stopped_early {
        parts.push(format!(
            "converged after {} generations",
            ga_outcome.generations_run
        ));
    }
    if let Some(plan) = plan {
        parts.push(format!("search box planned from {}", plan.reason));
    }
    if let Some(report) = review {
        parts.push(format!(
            "review score {:.1}/100: {}",
            report.safety_score, report.overall_assessment
        ));
    }
    if violation_count > 0 {
        parts.push(format!(
            "{violation_count} constraint(s) violated by the final parameters"
        ));
    }
    if parts.is_empty() {
        "optimization completed".to_string()
    } else {
        parts.join("; ")
    }
}

fn round_dp(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
