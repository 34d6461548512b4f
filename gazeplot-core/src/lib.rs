pub mod extract;
pub mod record;

pub use extract::{ExtractError, Fixation, FixationQuery, FixationSet};
pub use record::{EyeMovement, GazeRecord, StimulusDims};
