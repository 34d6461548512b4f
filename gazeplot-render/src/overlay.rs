use crate::text::render_text;
use ab_glyph::FontVec;
use anyhow::{ensure, Result};
use gazeplot_core::FixationSet;
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Height of the title strip above the stimulus image.
const TITLE_STRIP: u32 = 48;
/// Width of the legend panel to the right of the image (summary mode only).
const LEGEND_PANEL: u32 = 200;
const LEGEND_ROW: f32 = 26.0;
const LEGEND_SWATCH_RADIUS: f32 = 6.0;

/// Marker colors cycled per participant in first-appearance order.
pub const PARTICIPANT_PALETTE: [[u8; 3]; 6] = [
    [255, 0, 0],   // red
    [0, 0, 255],   // blue
    [0, 128, 0],   // green
    [255, 165, 0], // orange
    [128, 0, 128], // purple
    [0, 255, 255], // cyan
];

pub fn participant_color(index: usize) -> [u8; 3] {
    PARTICIPANT_PALETTE[index % PARTICIPANT_PALETTE.len()]
}

/// Cosmetic knobs for the overlay. `marker_scale` is the divisor applied to
/// a fixation's duration before it becomes marker area.
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    pub marker_scale: f32,
    pub marker_alpha: f32,
    pub edge_width: f32,
    pub title_px: f32,
    pub label_px: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            marker_scale: 10.0,
            marker_alpha: 0.6,
            edge_width: 1.0,
            title_px: 22.0,
            label_px: 15.0,
        }
    }
}

impl OverlayStyle {
    pub fn with_marker_scale(marker_scale: f32) -> Self {
        Self {
            marker_scale,
            ..Self::default()
        }
    }
}

/// Converts an image-space vertical coordinate (origin top-left) into
/// chart-space (origin bottom-left): `display_y = height - pixel_y`.
pub fn display_y(height: u32, pixel_y: f64) -> f64 {
    height as f64 - pixel_y
}

/// Marker radius for a fixation: duration over `marker_scale` is treated as
/// marker area, so the radius grows with its square root.
pub fn marker_radius(duration_ms: f64, marker_scale: f32) -> f32 {
    let area = (duration_ms / marker_scale as f64).max(0.0);
    (area.sqrt() as f32).max(1.5)
}

/// Composes the scatter overlay: stimulus image at native size, one marker
/// per fixation, a title strip, and (when no participant filter is set) a
/// legend panel on the right.
pub fn compose_overlay(
    set: &FixationSet,
    background: &Pixmap,
    font: &FontVec,
    style: &OverlayStyle,
) -> Result<Pixmap> {
    let dims = set.dims();
    ensure!(
        background.width() == dims.width && background.height() == dims.height,
        "stimulus image is {}x{} but fixations were scaled against {}x{}",
        background.width(),
        background.height(),
        dims.width,
        dims.height,
    );

    let with_legend = set.participant_filter().is_none();
    let canvas_width = dims.width + if with_legend { LEGEND_PANEL } else { 0 };
    let canvas_height = dims.height + TITLE_STRIP;

    let mut canvas = Pixmap::new(canvas_width, canvas_height).expect("pixmap");
    canvas.fill(Color::from_rgba8(245, 245, 245, 255));

    canvas.draw_pixmap(
        0,
        TITLE_STRIP as i32,
        background.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    let participants = set.participants();
    for fixation in set.points() {
        let color_index = participants
            .iter()
            .position(|p| *p == fixation.participant)
            .unwrap_or(0);
        let rgb = participant_color(color_index);

        // Geometry is carried in chart-space (y up) and mapped back to
        // raster rows only here.
        let chart_y = display_y(dims.height, fixation.pixel_y);
        let cx = fixation.pixel_x as f32;
        let cy = TITLE_STRIP as f32 + (dims.height as f64 - chart_y) as f32;
        let radius = marker_radius(fixation.duration_ms, style.marker_scale);

        stamp_marker(&mut canvas, cx, cy, radius, rgb, style);
    }

    let title = match set.participant_filter() {
        Some(participant) => format!("Fixations: {} on {}", participant, set.stimulus()),
        None => format!("Fixations on {}", set.stimulus()),
    };
    let title_pixmap = render_text(font, &title, style.title_px, Color::from_rgba8(20, 20, 20, 255));
    let title_x = (canvas_width.saturating_sub(title_pixmap.width())) / 2;
    let title_y = (TITLE_STRIP.saturating_sub(title_pixmap.height())) / 2;
    canvas.draw_pixmap(
        title_x as i32,
        title_y as i32,
        title_pixmap.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    if with_legend {
        draw_legend(&mut canvas, &participants, font, style, dims.width);
    }

    Ok(canvas)
}

fn stamp_marker(
    canvas: &mut Pixmap,
    cx: f32,
    cy: f32,
    radius: f32,
    rgb: [u8; 3],
    style: &OverlayStyle,
) {
    let mut builder = PathBuilder::new();
    builder.push_circle(cx, cy, radius);
    let path = match builder.finish() {
        Some(path) => path,
        None => return,
    };

    let mut fill = Paint::default();
    fill.anti_alias = true;
    fill.set_color(Color::from_rgba8(
        rgb[0],
        rgb[1],
        rgb[2],
        (style.marker_alpha.clamp(0.0, 1.0) * 255.0) as u8,
    ));
    canvas.fill_path(&path, &fill, FillRule::Winding, Transform::identity(), None);

    let mut edge = Paint::default();
    edge.anti_alias = true;
    edge.set_color(Color::from_rgba8(255, 255, 255, 230));
    let stroke = Stroke {
        width: style.edge_width,
        ..Stroke::default()
    };
    canvas.stroke_path(&path, &edge, &stroke, Transform::identity(), None);
}

fn draw_legend(
    canvas: &mut Pixmap,
    participants: &[&str],
    font: &FontVec,
    style: &OverlayStyle,
    image_width: u32,
) {
    let panel_x = image_width as f32;

    let header = render_text(
        font,
        "Participants",
        style.label_px,
        Color::from_rgba8(60, 60, 60, 255),
    );
    canvas.draw_pixmap(
        (panel_x + 20.0) as i32,
        (TITLE_STRIP as f32 + 12.0) as i32,
        header.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    for (index, participant) in participants.iter().enumerate() {
        let row_y = TITLE_STRIP as f32 + 12.0 + LEGEND_ROW * (index as f32 + 1.5);
        let rgb = participant_color(index);

        let mut builder = PathBuilder::new();
        builder.push_circle(panel_x + 28.0, row_y, LEGEND_SWATCH_RADIUS);
        if let Some(path) = builder.finish() {
            let mut paint = Paint::default();
            paint.anti_alias = true;
            paint.set_color(Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
            canvas.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        let label = render_text(
            font,
            participant,
            style.label_px,
            Color::from_rgba8(20, 20, 20, 255),
        );
        canvas.draw_pixmap(
            (panel_x + 44.0) as i32,
            (row_y - label.height() as f32 / 2.0) as i32,
            label.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}
