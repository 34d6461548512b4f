pub mod dataset;

pub use dataset::{
    DatasetError, GazeDataset, COL_DURATION, COL_MOVEMENT, COL_NORM_X, COL_NORM_Y,
    COL_PARTICIPANT, COL_STIMULUS, REQUIRED_COLUMNS,
};
