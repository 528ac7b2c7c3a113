//! Section timer for generation steps.
//!
//! [`LifeWorld`](crate::api::LifeWorld) records every fixed update under
//! the `"generation"` section. With the `profile` feature it also times
//! the schedule run on its own:
//! ```bash
//! cargo test --release --features profile
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

/// Section name for one fixed update (a burst of ticks).
pub const SECTION_GENERATION: &str = "generation";
/// Section name for the ECS schedule run inside a fixed update.
pub const SECTION_SCHEDULE: &str = "generation::schedule";

/// Aggregated timings for one named section.
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionStats {
    pub total_time: Duration,
    pub call_count: u64,
    pub min_time: Option<Duration>,
    pub max_time: Option<Duration>,
}

impl SectionStats {
    pub fn avg_time(&self) -> Duration {
        if self.call_count == 0 {
            Duration::ZERO
        } else {
            self.total_time / self.call_count as u32
        }
    }

    fn record(&mut self, elapsed: Duration) {
        self.total_time += elapsed;
        self.call_count += 1;
        self.min_time = Some(self.min_time.map_or(elapsed, |m| m.min(elapsed)));
        self.max_time = Some(self.max_time.map_or(elapsed, |m| m.max(elapsed)));
    }
}

/// Collects timings for named sections.
#[derive(Debug, Default)]
pub struct Profiler {
    sections: BTreeMap<&'static str, SectionStats>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one measurement to `name`.
    pub fn record(&mut self, name: &'static str, elapsed: Duration) {
        self.sections.entry(name).or_default().record(elapsed);
    }

    /// Time `f` under `name` and return its result.
    pub fn time_section<F, R>(&mut self, name: &'static str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.record(name, start.elapsed());
        result
    }

    pub fn get_section(&self, name: &str) -> Option<&SectionStats> {
        self.sections.get(name)
    }

    /// Formatted table of every section, slowest total first.
    pub fn report(&self) -> String {
        let mut sections: Vec<_> = self.sections.iter().collect();
        sections.sort_by(|a, b| b.1.total_time.cmp(&a.1.total_time));

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<22} {:>8} {:>10} {:>10} {:>10} {:>10}",
            "Section", "Calls", "Total", "Avg", "Min", "Max"
        );
        let _ = writeln!(out, "{}", "-".repeat(75));
        for (name, stats) in sections {
            let _ = writeln!(
                out,
                "{:<22} {:>8} {:>10.2?} {:>10.2?} {:>10.2?} {:>10.2?}",
                name,
                stats.call_count,
                stats.total_time,
                stats.avg_time(),
                stats.min_time.unwrap_or(Duration::ZERO),
                stats.max_time.unwrap_or(Duration::ZERO),
            );
        }
        out
    }
}
