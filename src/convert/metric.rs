use super::TicksConverter;
use crate::{ConvertResult, num, span::MetricTimeSpan, tempo_map::TempoMapView};

impl TicksConverter for MetricTimeSpan {
    fn from_ticks(length: i64, anchor: i64, view: TempoMapView<'_>) -> ConvertResult<Self> {
        let end = num::add(anchor, length)?;
        Ok(Self::from_micros(view.micros_between(anchor, end)?))
    }

    fn to_ticks(&self, anchor: i64, view: TempoMapView<'_>) -> ConvertResult<i64> {
        view.ticks_covering(anchor, self.total_microseconds())
    }
}
