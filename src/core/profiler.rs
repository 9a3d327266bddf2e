use std::time::{Duration, Instant};

/// Counters accumulated during a render. Workers keep a local copy and the
/// scheduler merges them at join, so nothing here is shared while tracing.
#[derive(Debug, Copy, Clone)]
pub struct RenderStats {
    pub tiles: u64,
    pub tiles_culled: u64,
    pub packets: u64,
    pub rays: u64,
    pub shadow_rays: u64,
    /// False when a time-budgeted render returned before finishing.
    pub complete: bool,
}

impl Default for RenderStats {
    fn default() -> Self {
        RenderStats {
            tiles: 0,
            tiles_culled: 0,
            packets: 0,
            rays: 0,
            shadow_rays: 0,
            complete: true,
        }
    }
}

impl RenderStats {
    pub fn merge(&mut self, other: &RenderStats) {
        self.tiles += other.tiles;
        self.tiles_culled += other.tiles_culled;
        self.packets += other.packets;
        self.rays += other.rays;
        self.shadow_rays += other.shadow_rays;
        self.complete = self.complete && other.complete;
    }
}

/// Explicit timing context scoped to one render invocation; replaces any
/// notion of a global profiler.
#[derive(Default)]
pub struct Profiler {
    phases: Vec<(&'static str, Duration)>,
    pub stats: RenderStats,
}

impl Profiler {
    pub fn new() -> Self {
        Profiler::default()
    }

    pub fn measure<R, F: FnOnce() -> R>(&mut self, phase: &'static str, f: F) -> R {
        let start = Instant::now();
        let ret = f();
        self.phases.push((phase, start.elapsed()));
        ret
    }

    /// For phases that cannot run inside a closure, e.g. because they also
    /// need the profiler's stats.
    pub fn record(&mut self, phase: &'static str, duration: Duration) {
        self.phases.push((phase, duration));
    }

    pub fn phase(&self, name: &str) -> Option<Duration> {
        self.phases
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, d)| *d)
    }

    pub fn log_summary(&self) {
        for (name, duration) in &self.phases {
            log::info!("{} took {:.3}s", name, duration.as_secs_f64());
        }
        log::info!(
            "{} tiles ({} culled), {} packets, {} rays, {} shadow rays",
            self.stats.tiles,
            self.stats.tiles_culled,
            self.stats.packets,
            self.stats.rays,
            self.stats.shadow_rays
        );
    }
}
