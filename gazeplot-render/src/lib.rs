pub mod overlay;
pub mod stimulus;
pub mod text;

pub use overlay::{
    compose_overlay, display_y, marker_radius, participant_color, OverlayStyle,
    PARTICIPANT_PALETTE,
};
pub use stimulus::{load_background, probe_dimensions, ImageLoadError};
pub use text::{load_ui_font, render_text};
