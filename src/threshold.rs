// ThresholdPolicy - user-settable comparison value for display coloring
//
// The threshold is edited through a free-form text field, so the setter
// takes raw text. Invalid input is rejected silently: the previous value
// stays in effect and the caller shows no error (observed policy of the
// monitor UI).

/// Default threshold, the midpoint of the 10-bit ADC range
pub const DEFAULT_THRESHOLD: i32 = 512;

#[derive(Debug, Clone, Copy)]
pub struct ThresholdPolicy {
    value: i32,
}

impl ThresholdPolicy {
    pub fn new(value: i32) -> Self {
        Self { value }
    }

    /// Parse `text` as a decimal integer and replace the threshold
    ///
    /// Returns true when the threshold was updated. Non-numeric input
    /// leaves the prior value unchanged and returns false; no bounds are
    /// enforced beyond a successful parse.
    pub fn set_from_text(&mut self, text: &str) -> bool {
        match text.trim().parse::<i32>() {
            Ok(value) => {
                self.value = value;
                true
            }
            Err(_) => false,
        }
    }

    pub fn get(&self) -> i32 {
        self.value
    }

    /// Whether `value` should be flagged as out of range on the display
    pub fn is_out_of_range(&self, value: i32) -> bool {
        value > self.value
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
