use std::time::Instant;

/// 性能统计 Guard: drop 时记录 elapsed_ms
///
/// 使用方式:
/// ```ignore
/// let _perf = kitchen_timer::perf::PerfGuard::new("timer_tick");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        tracing::debug!(target: "perf", op = self.op, elapsed_ms, "done");
    }
}
