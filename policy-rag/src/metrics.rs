use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

/// Lookup counters exposed on `/metrics`.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    lookups: IntCounterVec,
    latency: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let lookups = IntCounterVec::new(
            Opts::new("policy_rag_lookups_total", "Policy lookups by outcome"),
            &["outcome"],
        )?;
        let latency = Histogram::with_opts(HistogramOpts::new(
            "policy_rag_lookup_seconds",
            "End-to-end policy lookup latency",
        ))?;

        registry.register(Box::new(lookups.clone()))?;
        registry.register(Box::new(latency.clone()))?;

        Ok(Self {
            registry,
            lookups,
            latency,
        })
    }

    pub fn record(&self, is_error: bool, seconds: f64) {
        let outcome = if is_error { "error" } else { "success" };
        self.lookups.with_label_values(&[outcome]).inc();
        self.latency.observe(seconds);
    }

    pub fn render(&self) -> Result<(Vec<u8>, String), prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = vec![];
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok((buffer, encoder.format_type().to_string()))
    }
}
