use eframe::egui::{
    self,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    RichText,
    Stroke,
    Visuals,
};

use crate::core::{
    Grade,
    KanjiGrade,
};

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self { dark: Palette::night(), light: Palette::paper() }
    }
}

impl Theme {
    fn palette(&self, ctx: &egui::Context) -> &Palette {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    /// Colour of the grade pills and headings while `grade` is selected.
    pub fn accent(&self, ctx: &egui::Context, grade: Grade) -> Color32 {
        self.palette(ctx).grades[grade.index()]
    }

    /// Badge colour for the grade a kanji is introduced in.
    pub fn badge(&self, ctx: &egui::Context, grade: KanjiGrade) -> Color32 {
        let palette = self.palette(ctx);
        match grade {
            KanjiGrade::Elementary(g) => palette.grades[g.index()],
            KanjiGrade::Advanced => palette.advanced,
        }
    }

    pub fn highlight(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).highlight
    }

    pub fn foreground(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).foreground
    }

    pub fn muted(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).muted
    }

    pub fn heading(&self, ctx: &egui::Context, grade: Grade, content: &str) -> RichText {
        RichText::new(content).color(self.accent(ctx, grade)).strong()
    }

    /// Registers both variants with the accent of `grade`.
    pub fn apply(&self, ctx: &egui::Context, grade: Grade) {
        set_variant(ctx, &self.dark, grade, true);
        set_variant(ctx, &self.light, grade, false);
    }
}

#[derive(Clone)]
struct Palette {
    background: Color32,
    background_dark: Color32,
    background_light: Color32,
    foreground: Color32,
    selection: Color32,
    muted: Color32,
    highlight: Color32,
    advanced: Color32,
    grades: [Color32; 6],
}

impl Palette {
    fn night() -> Self {
        Self {
            background: Color32::from_rgb(0x28, 0x2a, 0x36),
            background_dark: Color32::from_rgb(33, 35, 53),
            background_light: Color32::from_rgb(52, 54, 66),
            foreground: Color32::from_rgb(0xf8, 0xf8, 0xf2),
            selection: Color32::from_rgb(0x44, 0x47, 0x5a),
            muted: Color32::from_rgb(0x62, 0x72, 0xa4),
            highlight: Color32::from_rgb(0xff, 0x55, 0x55),
            advanced: Color32::from_rgb(255, 121, 198),
            grades: [
                Color32::from_rgb(255, 184, 108),
                Color32::from_rgb(241, 250, 140),
                Color32::from_rgb(80, 250, 123),
                Color32::from_rgb(139, 233, 253),
                Color32::from_rgb(98, 160, 255),
                Color32::from_rgb(189, 147, 249),
            ],
        }
    }

    fn paper() -> Self {
        Self {
            background: Color32::from_rgb(248, 248, 242),
            background_dark: Color32::from_rgb(235, 235, 230),
            background_light: Color32::from_rgb(255, 255, 250),
            foreground: Color32::from_rgb(40, 42, 54),
            selection: Color32::from_rgb(200, 200, 220),
            muted: Color32::from_rgb(120, 130, 160),
            highlight: Color32::from_rgb(200, 60, 60),
            advanced: Color32::from_rgb(200, 80, 170),
            grades: [
                Color32::from_rgb(220, 130, 50),
                Color32::from_rgb(170, 150, 20),
                Color32::from_rgb(50, 160, 90),
                Color32::from_rgb(40, 150, 190),
                Color32::from_rgb(60, 100, 210),
                Color32::from_rgb(140, 100, 210),
            ],
        }
    }
}

fn set_variant(ctx: &egui::Context, palette: &Palette, grade: Grade, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };
    let accent = palette.grades[grade.index()];

    let widget = |base: WidgetVisuals, fill: Color32, stroke: Color32| WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke { color: stroke, ..base.bg_stroke },
        fg_stroke: Stroke { color: palette.foreground, ..base.fg_stroke },
        ..base
    };

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: widget(
                    default.widgets.noninteractive,
                    palette.background,
                    palette.background_dark,
                ),
                inactive: widget(
                    default.widgets.inactive,
                    palette.background_light,
                    palette.background_dark,
                ),
                hovered: widget(default.widgets.hovered, palette.selection, accent),
                active: widget(default.widgets.active, palette.selection, accent),
                open: widget(default.widgets.open, palette.background_dark, accent),
            },
            selection: Selection {
                bg_fill: accent.linear_multiply(0.35),
                stroke: Stroke { color: accent, ..default.selection.stroke },
            },
            hyperlink_color: accent,
            faint_bg_color: palette.background_light,
            extreme_bg_color: palette.background_dark,
            error_fg_color: palette.highlight,
            window_fill: palette.background,
            panel_fill: palette.background_dark,
            ..default
        },
    );
}
