use anyhow::Result;
use gazeplot_core::{FixationQuery, FixationSet};
use gazeplot_data::GazeDataset;
use gazeplot_render::{
    compose_overlay, load_background, load_ui_font, probe_dimensions, OverlayStyle,
};

mod app;
mod config;

use app::Viewer;
use config::RunConfig;

fn main() -> Result<()> {
    let config = RunConfig::from_args()?;

    println!("=== GAZEPLOT FIXATION VIEWER ===");
    let dataset = GazeDataset::load(&config.dataset)?;
    println!("Columns in dataset: {}", dataset.column_count());
    println!("Rows: {}", dataset.row_count());
    println!("Participants found: {:?}", dataset.participants());

    let dims = probe_dimensions(&config.image)?;
    println!("Image size: {} x {} px", dims.width, dims.height);

    let query = FixationQuery {
        stimulus: config.stimulus.clone(),
        participant: config.participant.clone(),
    };
    let set = match FixationSet::extract(dataset.records(), &query, dims) {
        Ok(set) => set,
        Err(err) => {
            // Stimulus matching is exact; show what the export actually
            // calls its stimuli before aborting.
            eprintln!("Stimuli present in dataset: {:?}", dataset.stimuli());
            return Err(err.into());
        }
    };
    match set.participant_filter() {
        Some(participant) => println!("Fixations for {}: {}", participant, set.len()),
        None => println!("Total fixations: {}", set.len()),
    }

    let background = load_background(&config.image)?;
    let font = load_ui_font()?;
    let style = OverlayStyle::with_marker_scale(config.marker_scale());
    let overlay = compose_overlay(&set, &background, &font, &style)?;

    let title = match set.participant_filter() {
        Some(participant) => format!("Gazeplot - {} on {}", participant, set.stimulus()),
        None => format!("Gazeplot - {}", set.stimulus()),
    };
    Viewer::new(overlay, title).run()
}
