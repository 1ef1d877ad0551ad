//! Colour palette and style helpers for ErrorLookup's dark and light themes.
//!
//! Severity colours follow the two severity bits of a code: success is
//! green, informational blue, warning amber and error red.

use egui::Color32;

// ── Background colours ──────────────────────────────────────────────────

/// Main window background (dark).
pub const BG_DARK: Color32 = Color32::from_rgb(30, 30, 46);

/// Main window background (light).
pub const BG_LIGHT: Color32 = Color32::from_rgb(245, 245, 248);

/// Panel / sidebar background.
const BG_PANEL: Color32 = Color32::from_rgb(36, 36, 54);

/// Even rows in the match list.
const BG_ROW_EVEN: Color32 = Color32::from_rgb(32, 32, 48);

/// Currently selected row.
const BG_SELECTED: Color32 = Color32::from_rgb(55, 55, 95);

// ── Text colours ────────────────────────────────────────────────────────

const TEXT_PRIMARY: Color32 = Color32::from_rgb(205, 205, 215);
const TEXT_SECONDARY: Color32 = Color32::from_rgb(140, 140, 160);
const TEXT_DIM: Color32 = Color32::from_rgb(100, 100, 120);

const TEXT_PRIMARY_LIGHT: Color32 = Color32::from_rgb(40, 40, 50);
const TEXT_SECONDARY_LIGHT: Color32 = Color32::from_rgb(90, 90, 110);
const TEXT_DIM_LIGHT: Color32 = Color32::from_rgb(140, 140, 155);

// ── Accent colours ──────────────────────────────────────────────────────

const ACCENT: Color32 = Color32::from_rgb(80, 200, 220);
const ACCENT_LIGHT: Color32 = Color32::from_rgb(20, 130, 150);

// ── Theme-aware accessors ───────────────────────────────────────────────

pub fn text_secondary(dark: bool) -> Color32 {
    if dark {
        TEXT_SECONDARY
    } else {
        TEXT_SECONDARY_LIGHT
    }
}

/// Hints and placeholders.
pub fn text_dim(dark: bool) -> Color32 {
    if dark {
        TEXT_DIM
    } else {
        TEXT_DIM_LIGHT
    }
}

pub fn accent(dark: bool) -> Color32 {
    if dark {
        ACCENT
    } else {
        ACCENT_LIGHT
    }
}

pub fn warning(dark: bool) -> Color32 {
    if dark {
        Color32::from_rgb(224, 168, 64)
    } else {
        Color32::from_rgb(180, 110, 0)
    }
}

/// Colour for a two-bit severity value.
pub fn severity_color(severity: u32, dark: bool) -> Color32 {
    match (severity, dark) {
        (0, true) => Color32::from_rgb(120, 200, 120),
        (0, false) => Color32::from_rgb(30, 130, 50),
        (1, true) => Color32::from_rgb(122, 162, 212),
        (1, false) => Color32::from_rgb(40, 90, 170),
        (2, _) => warning(dark),
        (3, true) => Color32::from_rgb(224, 108, 96),
        (3, false) => Color32::from_rgb(190, 40, 30),
        _ => text_secondary(dark),
    }
}

/// Apply the ErrorLookup dark theme.
pub fn apply_dark_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();

    // Background tones
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_DARK;
    visuals.faint_bg_color = BG_ROW_EVEN;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    // Widget resting state
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(45, 45, 65);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(40, 40, 60);

    // Widget hover state
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(55, 55, 80);
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);

    visuals.widgets.active.bg_fill = Color32::from_rgb(65, 65, 95);

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);

    // Selection
    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.window_stroke = egui::Stroke::new(1.0, Color32::from_rgb(50, 50, 70));

    ctx.set_visuals(visuals);
}

/// Apply the ErrorLookup light theme.
pub fn apply_light_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();

    // Background tones
    visuals.panel_fill = BG_LIGHT;
    visuals.window_fill = Color32::from_rgb(250, 250, 252);
    visuals.extreme_bg_color = Color32::WHITE;
    visuals.faint_bg_color = Color32::from_rgb(238, 238, 242);

    visuals.override_text_color = Some(TEXT_PRIMARY_LIGHT);

    // Widget resting state
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(225, 225, 232);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Color32::from_rgb(80, 80, 100));
    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(230, 230, 236);

    // Widget hover state
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(210, 210, 220);
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY_LIGHT);

    visuals.widgets.active.bg_fill = Color32::from_rgb(195, 195, 210);

    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(240, 240, 244);
    visuals.widgets.noninteractive.fg_stroke =
        egui::Stroke::new(1.0, Color32::from_rgb(100, 100, 120));

    // Selection
    visuals.selection.bg_fill = Color32::from_rgb(180, 215, 235);
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT_LIGHT);

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.window_stroke = egui::Stroke::new(1.0, Color32::from_rgb(200, 200, 210));

    ctx.set_visuals(visuals);
}
