use serde::{Deserialize, Serialize};

use lstitch_types::{keys, FieldKey};

use crate::error::{StitchError, StitchResult};

/// Which end of the frame range a field bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameBound {
    /// Reduced with `min` across both layers.
    Start,
    /// Reduced with `max` across both layers.
    End,
}

/// Configuration for a stitch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    /// Field holding the first frame of the layer's range.
    pub start_time_field: FieldKey,
    /// Field holding the last frame of the layer's range.
    pub end_time_field: FieldKey,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            start_time_field: keys::START_TIME_CODE,
            end_time_field: keys::END_TIME_CODE,
        }
    }
}

impl StitchConfig {
    /// The frame bound `field` represents, if any.
    pub fn frame_bound(&self, field: &FieldKey) -> Option<FrameBound> {
        if *field == self.start_time_field {
            Some(FrameBound::Start)
        } else if *field == self.end_time_field {
            Some(FrameBound::End)
        } else {
            None
        }
    }

    /// Reject configurations where one field would be both bounds.
    pub fn validate(&self) -> StitchResult<()> {
        if self.start_time_field == self.end_time_field {
            return Err(StitchError::Config(format!(
                "start and end time fields must differ (both are '{}')",
                self.start_time_field
            )));
        }
        Ok(())
    }
}
