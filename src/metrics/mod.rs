// Prometheus metrics for assistant requests
//
// Each Metrics owns its registry so tests and multiple servers in one
// process don't collide on metric names.

use anyhow::{Context, Result};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::model::TaskKind;

pub struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
    failures: IntCounterVec,
    llm_latency: HistogramVec,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("mendy_requests_total", "Assistant requests received"),
            &["task"],
        )?;
        let failures = IntCounterVec::new(
            Opts::new("mendy_failures_total", "Assistant requests that failed"),
            &["task", "kind"],
        )?;
        let llm_latency = HistogramVec::new(
            HistogramOpts::new("mendy_llm_latency_seconds", "Claude API round-trip time")
                .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 40.0, 80.0, 160.0]),
            &["task"],
        )?;

        registry
            .register(Box::new(requests.clone()))
            .context("Failed to register request counter")?;
        registry
            .register(Box::new(failures.clone()))
            .context("Failed to register failure counter")?;
        registry
            .register(Box::new(llm_latency.clone()))
            .context("Failed to register latency histogram")?;

        Ok(Self {
            registry,
            requests,
            failures,
            llm_latency,
        })
    }

    pub fn record_request(&self, task: TaskKind) {
        self.requests.with_label_values(&[task.label()]).inc();
    }

    pub fn record_failure(&self, task: TaskKind, kind: &str) {
        self.failures.with_label_values(&[task.label(), kind]).inc();
    }

    pub fn observe_llm_latency(&self, task: TaskKind, seconds: f64) {
        self.llm_latency
            .with_label_values(&[task.label()])
            .observe(seconds);
    }

    pub fn request_count(&self, task: TaskKind) -> u64 {
        self.requests.with_label_values(&[task.label()]).get()
    }

    pub fn failure_count(&self, task: TaskKind, kind: &str) -> u64 {
        self.failures.with_label_values(&[task.label(), kind]).get()
    }

    /// Prometheus text exposition
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output is not UTF-8")
    }
}
