use alloc::vec::Vec;

use super::{Tempo, ValueLine};
use crate::{ConvertResult, num};

/// Cumulative time at one tempo change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MetricCheckpoint {
    pub(crate) time: i64,
    pub(crate) micros: f64,
    pub(crate) micros_per_tick: f64,
    pub(crate) ticks_per_micro: f64,
}

#[doc = r#"
Maps ticks to microseconds and back in `O(log n)`.

One checkpoint is stored per tempo change, plus one at tick zero. Both
directions search the same table, once keyed by tick and once keyed by
cumulative microseconds, and interpolate linearly from the last checkpoint
at or before the target.
"#]
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MetricValuesCache {
    checkpoints: Vec<MetricCheckpoint>,
}

impl MetricValuesCache {
    pub(crate) fn new(tempo_line: &ValueLine<Tempo>, ticks_per_quarter_note: u16) -> Self {
        let initial = tempo_line.value_at(0).micros_per_tick(ticks_per_quarter_note);
        let mut last = MetricCheckpoint {
            time: 0,
            micros: 0.,
            micros_per_tick: initial,
            ticks_per_micro: 1. / initial,
        };
        let mut checkpoints = Vec::with_capacity(tempo_line.changes().len() + 1);
        checkpoints.push(last);

        for change in tempo_line.changes().iter().filter(|c| c.time() > 0) {
            let micros = last.micros + (change.time() - last.time) as f64 * last.micros_per_tick;
            let micros_per_tick = change.value().micros_per_tick(ticks_per_quarter_note);
            last = MetricCheckpoint {
                time: change.time(),
                micros,
                micros_per_tick,
                ticks_per_micro: 1. / micros_per_tick,
            };
            checkpoints.push(last);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Built metric cache with {} checkpoints", checkpoints.len());

        Self { checkpoints }
    }

    fn at_time(&self, time: i64) -> &MetricCheckpoint {
        let index = self.checkpoints.partition_point(|c| c.time <= time);
        &self.checkpoints[index.saturating_sub(1)]
    }

    fn at_micros(&self, micros: f64) -> &MetricCheckpoint {
        let index = self.checkpoints.partition_point(|c| c.micros <= micros);
        &self.checkpoints[index.saturating_sub(1)]
    }

    /// Microseconds elapsed from tick zero to `time`.
    ///
    /// Negative ticks extrapolate with the tempo in force at zero.
    pub(crate) fn micros_at(&self, time: i64) -> ConvertResult<i64> {
        let checkpoint = self.at_time(time);
        num::round_to_i64(
            checkpoint.micros + (time - checkpoint.time) as f64 * checkpoint.micros_per_tick,
        )
    }

    /// The tick reached after `micros` microseconds from tick zero.
    pub(crate) fn ticks_at(&self, micros: i64) -> ConvertResult<i64> {
        let micros = micros as f64;
        let checkpoint = self.at_micros(micros);
        num::round_to_i64(
            checkpoint.time as f64 + (micros - checkpoint.micros) * checkpoint.ticks_per_micro,
        )
    }
}
