use serde::{Deserialize, Serialize};

/// Classification of a gaze event, as exported in the `Eye movement type`
/// column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EyeMovement {
    Fixation,
    Saccade,
    Unclassified,
    EyesNotFound,
    /// Any value the classifier emits that we do not model explicitly.
    Other(String),
}

impl EyeMovement {
    /// Exact, case-sensitive mapping from the raw cell value. `"fixation"`
    /// is `Other`, not `Fixation`.
    pub fn from_cell(cell: &str) -> Self {
        match cell {
            "Fixation" => EyeMovement::Fixation,
            "Saccade" => EyeMovement::Saccade,
            "Unclassified" => EyeMovement::Unclassified,
            "EyesNotFound" => EyeMovement::EyesNotFound,
            other => EyeMovement::Other(other.to_string()),
        }
    }

    pub fn is_fixation(&self) -> bool {
        matches!(self, EyeMovement::Fixation)
    }
}

/// One row of a gaze export.
///
/// Saccade and gap rows carry no fixation point, so the normalized
/// coordinates are optional; a stimulus is not presented on every row either,
/// in which case `stimulus` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazeRecord {
    pub participant: String,
    pub stimulus: String,
    pub movement: EyeMovement,
    pub norm_x: Option<f64>,
    pub norm_y: Option<f64>,
    pub duration_ms: f64,
}

/// Pixel dimensions of the stimulus image, the reference frame for scaling
/// normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusDims {
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_mapping_is_case_sensitive() {
        assert_eq!(EyeMovement::from_cell("Fixation"), EyeMovement::Fixation);
        assert_eq!(EyeMovement::from_cell("Saccade"), EyeMovement::Saccade);
        assert_eq!(
            EyeMovement::from_cell("fixation"),
            EyeMovement::Other("fixation".to_string())
        );
        assert_eq!(
            EyeMovement::from_cell("FIXATION"),
            EyeMovement::Other("FIXATION".to_string())
        );
        assert!(!EyeMovement::from_cell("fixation").is_fixation());
    }

    #[test]
    fn unknown_values_are_preserved() {
        let movement = EyeMovement::from_cell("Blink");
        assert_eq!(movement, EyeMovement::Other("Blink".to_string()));
        assert!(!movement.is_fixation());
    }
}
