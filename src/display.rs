// DisplayAdapter - seam between the refresh step and the widgets
//
// The refresh step talks to the display through this trait so the whole
// pipeline can run headless in tests. The egui view keeps a DisplayState
// behind the trait and paints from it every frame.

/// Render target of the refresh step
pub trait DisplayAdapter {
    /// Present `value` against `threshold` and redraw the chart over
    /// `series` (chronological, oldest first)
    fn update(&mut self, value: i32, threshold: i32, series: &[i32]);

    /// Clear the value readout and the chart
    fn reset(&mut self);
}

/// View-model the egui paint code reads each frame
#[derive(Debug, Default)]
pub struct DisplayState {
    latest: Option<i32>,
    out_of_range: bool,
    series: Vec<i32>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest presented value, if any sample has arrived yet
    pub fn latest(&self) -> Option<i32> {
        self.latest
    }

    /// Whether the latest value exceeded the threshold when presented
    pub fn is_out_of_range(&self) -> bool {
        self.out_of_range
    }

    /// Series backing the chart, chronological
    pub fn series(&self) -> &[i32] {
        &self.series
    }
}

impl DisplayAdapter for DisplayState {
    fn update(&mut self, value: i32, threshold: i32, series: &[i32]) {
        self.latest = Some(value);
        self.out_of_range = value > threshold;
        self.series.clear();
        self.series.extend_from_slice(series);
    }

    fn reset(&mut self) {
        self.latest = None;
        self.out_of_range = false;
        self.series.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_flags_values_above_threshold() {
        let mut state = DisplayState::new();
        state.update(600, 512, &[600]);
        assert_eq!(state.latest(), Some(600));
        assert!(state.is_out_of_range());

        state.update(400, 512, &[600, 400]);
        assert_eq!(state.latest(), Some(400));
        assert!(!state.is_out_of_range());
        assert_eq!(state.series(), &[600, 400]);
    }

    #[test]
    fn test_value_equal_to_threshold_is_normal() {
        let mut state = DisplayState::new();
        state.update(512, 512, &[512]);
        assert!(!state.is_out_of_range());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = DisplayState::new();
        state.update(700, 512, &[700]);
        state.reset();
        assert_eq!(state.latest(), None);
        assert!(!state.is_out_of_range());
        assert!(state.series().is_empty());
    }
}
