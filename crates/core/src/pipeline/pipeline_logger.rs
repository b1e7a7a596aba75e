use std::collections::BTreeMap;
use std::time::Instant;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Decouples use cases from specific output mechanisms so each caller can
/// observe a run without changing the orchestration code.
pub trait PipelineLogger: Send {
    /// Report scene-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage (`tts`, `transcribe`) took for one scene.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. caption segments per scene).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Report a scene that completed in degraded form.
    fn warn(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used by tests.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
}

/// CLI logger: logs each voiced scene as it lands and prints a per-stage
/// breakdown plus the degraded scenes once the run completes.
pub struct StdoutPipelineLogger {
    timings: BTreeMap<String, Vec<f64>>,
    metrics: BTreeMap<String, Vec<f64>>,
    start_time: Instant,
    total_scenes: usize,
    degraded: Vec<String>,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            start_time: Instant::now(),
            total_scenes: 0,
            degraded: Vec::new(),
        }
    }

    /// The end-of-run report, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() && self.degraded.is_empty() {
            return None;
        }

        let mut lines = vec![format!(
            "Narrated {} scenes in {:.1}s",
            self.total_scenes,
            self.start_time.elapsed().as_secs_f64()
        )];
        for (stage, ms) in &self.timings {
            let total: f64 = ms.iter().sum();
            lines.push(format!(
                "  {stage:<12} {:>7.0}ms/scene  {:>8.0}ms total",
                mean(ms),
                total
            ));
        }
        for (name, values) in &self.metrics {
            lines.push(format!("  {name:<12} {:.1} per scene", mean(values)));
        }
        if !self.degraded.is_empty() {
            lines.push(format!("  Degraded scenes ({}):", self.degraded.len()));
            lines.extend(self.degraded.iter().map(|w| format!("    {w}")));
        }
        Some(lines.join("\n"))
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_scenes = total;
        log::info!("Scene {current}/{total} voiced");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        log::warn!("{message}");
        self.degraded.push(message.to_string());
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
