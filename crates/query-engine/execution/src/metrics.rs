//! Metrics setup and update for the agent.

use prometheus::core::{AtomicU64, GenericCounter};

#[derive(Debug, Clone)]
pub struct Metrics {
    pub generate_total: GenericCounter<AtomicU64>,
    pub execute_total: GenericCounter<AtomicU64>,
    pub rejected_total: GenericCounter<AtomicU64>,
    pub error_total: GenericCounter<AtomicU64>,
}

impl Metrics {
    /// Set up counters used to produce Prometheus metrics.
    pub fn initialize(metrics_registry: &mut prometheus::Registry) -> Result<Self, Error> {
        let generate_total = add_int_counter_metric(
            metrics_registry,
            "sql_agent_generate_total",
            "Total successful SQL generations.",
        )?;

        let execute_total = add_int_counter_metric(
            metrics_registry,
            "sql_agent_execute_total",
            "Total successful statement executions.",
        )?;

        let rejected_total = add_int_counter_metric(
            metrics_registry,
            "sql_agent_rejected_total",
            "Total questions and statements rejected by validation.",
        )?;

        let error_total = add_int_counter_metric(
            metrics_registry,
            "sql_agent_error_total",
            "Total actions answered with an error status.",
        )?;

        Ok(Self {
            generate_total,
            execute_total,
            rejected_total,
            error_total,
        })
    }

    pub fn record_successful_generation(&self) {
        self.generate_total.inc();
    }

    pub fn record_successful_execution(&self) {
        self.execute_total.inc();
    }

    pub fn record_rejection(&self) {
        self.rejected_total.inc();
    }

    pub fn record_error(&self) {
        self.error_total.inc();
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, Error> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// A wrapper around the Prometheus error type.
#[derive(Debug, thiserror::Error)]
#[error("error initializing metrics: {0}")]
pub struct Error(#[from] prometheus::Error);
