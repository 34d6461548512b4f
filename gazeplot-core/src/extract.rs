use crate::record::{GazeRecord, StimulusDims};
use serde::{Deserialize, Serialize};

/// One fixation that survived filtering, with its position scaled into the
/// stimulus image's pixel space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixation {
    pub participant: String,
    pub norm_x: f64,
    pub norm_y: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub duration_ms: f64,
}

/// What to extract: a stimulus name and, optionally, a single participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixationQuery {
    pub stimulus: String,
    pub participant: Option<String>,
}

impl FixationQuery {
    /// The filter predicate: fixation rows of the queried stimulus, narrowed
    /// to one participant when the query names one. All matches are exact.
    pub fn matches(&self, record: &GazeRecord) -> bool {
        record.movement.is_fixation()
            && record.stimulus == self.stimulus
            && self
                .participant
                .as_deref()
                .map_or(true, |participant| record.participant == participant)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error(
        "no fixations found for stimulus \"{stimulus}\"{}",
        .participant.as_deref().map(|p| format!(" and participant \"{p}\"")).unwrap_or_default()
    )]
    NoFixationsFound {
        stimulus: String,
        participant: Option<String>,
    },
}

/// The non-empty result of an extraction. Immutable once constructed;
/// construction fails rather than producing an empty set.
#[derive(Debug, Clone)]
pub struct FixationSet {
    stimulus: String,
    participant: Option<String>,
    dims: StimulusDims,
    points: Vec<Fixation>,
}

impl FixationSet {
    /// Filters `records` with `query` and scales every surviving point by
    /// the stimulus dimensions: `pixel_x = norm_x * width`,
    /// `pixel_y = norm_y * height`.
    ///
    /// Matching rows without both normalized coordinates are dropped; a
    /// well-formed fixation row always carries them. Zero surviving rows is
    /// `NoFixationsFound`.
    pub fn extract(
        records: &[GazeRecord],
        query: &FixationQuery,
        dims: StimulusDims,
    ) -> Result<Self, ExtractError> {
        let width = dims.width as f64;
        let height = dims.height as f64;

        let points: Vec<Fixation> = records
            .iter()
            .filter(|record| query.matches(record))
            .filter_map(|record| {
                let norm_x = record.norm_x?;
                let norm_y = record.norm_y?;
                Some(Fixation {
                    participant: record.participant.clone(),
                    norm_x,
                    norm_y,
                    pixel_x: norm_x * width,
                    pixel_y: norm_y * height,
                    duration_ms: record.duration_ms,
                })
            })
            .collect();

        if points.is_empty() {
            return Err(ExtractError::NoFixationsFound {
                stimulus: query.stimulus.clone(),
                participant: query.participant.clone(),
            });
        }

        Ok(Self {
            stimulus: query.stimulus.clone(),
            participant: query.participant.clone(),
            dims,
            points,
        })
    }

    pub fn stimulus(&self) -> &str {
        &self.stimulus
    }

    /// The participant the query was narrowed to, if any.
    pub fn participant_filter(&self) -> Option<&str> {
        self.participant.as_deref()
    }

    pub fn dims(&self) -> StimulusDims {
        self.dims
    }

    pub fn points(&self) -> &[Fixation] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct participants present in the set, in first-appearance order.
    pub fn participants(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for point in &self.points {
            if !seen.contains(&point.participant.as_str()) {
                seen.push(&point.participant);
            }
        }
        seen
    }
}
