use super::TicksConverter;
use crate::{ConvertResult, span::MidiTimeSpan, tempo_map::TempoMapView};

impl TicksConverter for MidiTimeSpan {
    fn from_ticks(length: i64, _anchor: i64, _view: TempoMapView<'_>) -> ConvertResult<Self> {
        Ok(Self::new(length))
    }

    fn to_ticks(&self, _anchor: i64, _view: TempoMapView<'_>) -> ConvertResult<i64> {
        Ok(self.ticks())
    }
}
