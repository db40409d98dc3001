use eframe::egui::{
    self,
    text::LayoutJob,
    Context,
    RichText,
    Stroke,
    TextFormat,
    TextStyle,
};
use egui_extras::{
    Column,
    TableBuilder,
    TableRow,
};
use tracing::warn;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::core::{
    AggregateResult,
    Grade,
    Highlighter,
    RowResult,
    Segment,
};

const NUMBER_WIDTH: f32 = 48.0;
const BADGE_COLUMN_WIDTH: f32 = 220.0;
const BADGE_WIDTH: f32 = 58.0;
const BADGE_LINE_HEIGHT: f32 = 26.0;
const ROW_PADDING: f32 = 10.0;

/// Row heights depend on the wrapped problem text, so they are cached per layout width.
#[derive(Default)]
pub struct TableState {
    heights: Vec<f32>,
    width: f32,
    dirty: bool,
}

impl TableState {
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn ensure_heights(&mut self, ctx: &Context, theme: &Theme, rows: &[RowResult], width: f32) {
        if !self.dirty && self.heights.len() == rows.len() && (self.width - width).abs() < 0.5 {
            return;
        }

        let badges_per_line = ((BADGE_COLUMN_WIDTH / BADGE_WIDTH).floor() as usize).max(1);
        self.heights = rows
            .iter()
            .map(|row| {
                let job = problem_job(ctx, theme, row, width);
                let text = ctx.fonts(|f| f.layout_job(job)).size().y;
                let badge_lines = row.unlearned.len().div_ceil(badges_per_line);
                let badges = badge_lines as f32 * BADGE_LINE_HEIGHT;
                text.max(badges) + ROW_PADDING
            })
            .collect();
        self.width = width;
        self.dirty = false;
    }
}

pub fn results_panel(
    ctx: &Context,
    theme: &Theme,
    grade: Grade,
    report: Option<&AggregateResult>,
    state: &mut TableState,
    actions: &mut ActionQueue,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(report) = report else {
            empty_state(ctx, ui, theme, grade, actions);
            return;
        };

        summary(ctx, ui, theme, grade, report);
        ui.add_space(10.0);

        if report.rows.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(
                    RichText::new("未習漢字は見つかりませんでした")
                        .size(20.0)
                        .color(theme.accent(ctx, grade)),
                );
                ui.label(
                    RichText::new(format!("Every kanji is taught by grade {}.", grade))
                        .color(theme.muted(ctx)),
                );
            });
            return;
        }

        let problem_width =
            (ui.available_width() - NUMBER_WIDTH - BADGE_COLUMN_WIDTH - 24.0).max(200.0);
        state.ensure_heights(ctx, theme, &report.rows, problem_width);

        TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(NUMBER_WIDTH))
            .column(Column::exact(problem_width))
            .column(Column::exact(BADGE_COLUMN_WIDTH))
            .header(25.0, |mut header| {
                for title in ["No.", "問題", "未習漢字"] {
                    header.col(|ui| {
                        ui.label(theme.heading(ctx, grade, title));
                    });
                }
            })
            .body(|body| {
                body.heterogeneous_rows(state.heights.iter().copied(), |mut row| {
                    let result = &report.rows[row.index()];
                    col_number(&mut row, result);
                    col_problem(ctx, &mut row, theme, result, problem_width);
                    col_badges(ctx, &mut row, theme, result);
                });
            });
    });
}

fn empty_state(
    ctx: &Context,
    ui: &mut egui::Ui,
    theme: &Theme,
    grade: Grade,
    actions: &mut ActionQueue,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(100.0);
        ui.label(RichText::new("No File Loaded").size(32.0).color(theme.accent(ctx, grade)));
        ui.add_space(1.0);
        ui.label(
            RichText::new("CSVファイルがまだ読み込まれていません")
                .size(18.0)
                .color(theme.foreground(ctx)),
        );
        ui.add_space(1.0);
        ui.label(
            RichText::new("ℹ You can drag and drop a .csv file at any time to load it.")
                .size(10.0)
                .color(theme.muted(ctx)),
        );
        ui.add_space(16.0);

        let label = egui::Label::new(
            RichText::new("Open CSV").size(14.0).color(ctx.style().visuals.weak_text_color()),
        )
        .sense(egui::Sense::click());

        let response = ui.add(label).on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            actions.push(UiAction::BrowseForFile);
        }
    });
}

fn summary(ctx: &Context, ui: &mut egui::Ui, theme: &Theme, grade: Grade, report: &AggregateResult) {
    ui.horizontal_wrapped(|ui| {
        ui.heading(theme.heading(ctx, grade, &report.filename));
    });
    ui.horizontal(|ui| {
        ui.label(RichText::new("問題数").color(theme.muted(ctx)));
        ui.strong(report.total_rows.to_string());
        ui.add_space(16.0);
        ui.label(RichText::new("未習漢字を含む問題").color(theme.muted(ctx)));
        ui.strong(RichText::new(report.flagged_rows.to_string()).color(theme.highlight(ctx)));
        ui.add_space(16.0);
        ui.label(RichText::new(format!("対象: {}", grade.label())).color(theme.muted(ctx)));
    });
}

fn col_number(row: &mut TableRow, result: &RowResult) {
    row.col(|ui| {
        ui.label(result.sequence_number.to_string());
    });
}

fn col_problem(
    ctx: &Context,
    row: &mut TableRow,
    theme: &Theme,
    result: &RowResult,
    width: f32,
) {
    row.col(|ui| {
        ui.label(problem_job(ctx, theme, result, width));
    });
}

fn col_badges(ctx: &Context, row: &mut TableRow, theme: &Theme, result: &RowResult) {
    row.col(|ui| {
        ui.horizontal_wrapped(|ui| {
            for kanji in &result.unlearned {
                let label = kanji.label();
                let color = theme.badge(ctx, kanji.grade);
                let badge = RichText::new(format!("{} {}", kanji.character, label))
                    .color(color)
                    .background_color(color.linear_multiply(0.12));
                ui.label(badge).on_hover_text(label.as_str());
            }
        });
    });
}

/// The problem text with every unlearned kanji drawn in the highlight colour.
fn problem_job(ctx: &Context, theme: &Theme, result: &RowResult, wrap_width: f32) -> LayoutJob {
    let font_id = TextStyle::Body.resolve(&ctx.style());
    let normal = TextFormat {
        font_id: font_id.clone(),
        color: theme.foreground(ctx),
        ..Default::default()
    };
    let highlighted = TextFormat {
        font_id,
        color: theme.highlight(ctx),
        underline: Stroke::new(1.0, theme.highlight(ctx)),
        ..Default::default()
    };

    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    match Highlighter::new(&result.unlearned) {
        Ok(highlighter) => {
            for segment in highlighter.segments(&result.display_text) {
                match segment {
                    Segment::Plain(text) => job.append(text, 0.0, normal.clone()),
                    Segment::Unlearned { text, .. } => job.append(text, 0.0, highlighted.clone()),
                }
            }
        }
        Err(e) => {
            warn!("Failed to highlight row {}: {}", result.sequence_number, e);
            job.append(&result.display_text, 0.0, normal);
        }
    }

    job
}
