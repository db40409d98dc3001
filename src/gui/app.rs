use std::{
    mem,
    path::{
        Path,
        PathBuf,
    },
    sync::Arc,
};

use eframe::egui::{
    self,
    Id,
};
use rfd::FileDialog;
use tracing::{
    error,
    info,
    warn,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    error_modal::ErrorModal,
    fonts::setup_fonts,
    table::{
        results_panel,
        TableState,
    },
    theme::Theme,
    top_bar::TopBar,
};
use crate::{
    core::{
        Grade,
        MishuError,
        ReferenceTable,
    },
    export::{
        default_export_name,
        write_report,
    },
    parser::{
        filename_of,
        is_csv_path,
        read_csv,
    },
    session::Session,
    settings::Settings,
};

pub struct MishuApp {
    session: Session,
    settings: Settings,
    theme: Theme,
    table_state: TableState,
    error_modal: ErrorModal,
}

impl MishuApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        table: Arc<ReferenceTable>,
        initial_file: Option<PathBuf>,
    ) -> Self {
        let grade = settings.grade();
        let mut app = Self {
            session: Session::new(table, grade),
            settings,
            theme: Theme::default(),
            table_state: TableState::default(),
            error_modal: ErrorModal::default(),
        };

        setup_fonts(&cc.egui_ctx, app.settings.font_path.as_deref());
        app.theme.apply(&cc.egui_ctx, grade);

        cc.egui_ctx.set_theme(if app.settings.dark_mode {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });

        if let Some(path) = initial_file {
            app.open_file(&path);
        }

        app
    }

    fn open_file(&mut self, path: &Path) {
        match read_csv(path) {
            Ok(parsed) => {
                self.session.load(parsed);
                self.table_state.mark_dirty();
            }
            Err(e @ MishuError::UnsupportedFileType(_)) => {
                warn!("Ignoring {}: {}", path.display(), e);
                self.error_modal.show_error("Unsupported file", e.to_string(), None);
            }
            Err(e) => {
                error!("Failed to open {}: {}", path.display(), e);
                self.error_modal.show_error(
                    "Could not open file",
                    format!("{} could not be read as CSV.", filename_of(path)),
                    Some(e.to_string()),
                );
            }
        }
    }

    fn browse_for_file(&mut self) {
        if let Some(path) = FileDialog::new().add_filter("CSV files", &["csv"]).pick_file() {
            self.open_file(&path);
        }
    }

    fn select_grade(&mut self, ctx: &egui::Context, grade: Grade) {
        if !self.session.set_grade(grade) {
            return;
        }
        info!("Target grade set to {}", grade);

        self.theme.apply(ctx, grade);
        self.table_state.mark_dirty();
        self.settings.set_grade(grade);
        self.settings.save_or_log();
    }

    fn export_report(&mut self) {
        let Some(report) = self.session.report() else {
            return;
        };

        let Some(path) = FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(default_export_name(&report.filename))
            .save_file()
        else {
            return;
        };

        if let Err(e) = write_report(&path, self.session.grade(), report) {
            error!("Failed to export report to {}: {}", path.display(), e);
            self.error_modal.show_error(
                "Export failed",
                format!("Could not write {}.", path.display()),
                Some(e.to_string()),
            );
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input_mut(|i| mem::take(&mut i.raw.dropped_files));
        if dropped.is_empty() {
            return;
        }

        match dropped.iter().filter_map(|f| f.path.as_deref()).find(|p| is_csv_path(p)) {
            Some(path) => {
                let path = path.to_path_buf();
                self.open_file(&path);
            }
            None => warn!("Ignored {} dropped file(s): only .csv files are accepted", dropped.len()),
        }
    }

    fn draw_file_drop_overlay(&self, ctx: &egui::Context) {
        let any_csv_hovered = ctx.input(|i| {
            i.raw.hovered_files.iter().filter_map(|f| f.path.as_deref()).any(is_csv_path)
        });
        if !any_csv_hovered {
            return;
        }

        let size = egui::vec2(300.0, 120.0);
        egui::Modal::new(Id::new("file_drop_overlay")).show(ctx, |ui| {
            ui.set_max_size(size);
            ui.set_min_size(size);
            ui.centered_and_justified(|ui| {
                ui.heading("📥  Drop to check");
            });
        });
    }

    fn sync_theme_preference(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings.dark_mode {
            self.settings.dark_mode = dark_mode;
            self.settings.save_or_log();
        }
    }

    fn execute_actions(&mut self, ctx: &egui::Context, actions: &mut ActionQueue) {
        for action in actions.drain() {
            match action {
                UiAction::SelectGrade(grade) => self.select_grade(ctx, grade),
                UiAction::BrowseForFile => self.browse_for_file(),
                UiAction::ExportReport => self.export_report(),
                UiAction::CloseFile => {
                    self.session.clear();
                    self.table_state.mark_dirty();
                }
                UiAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }
}

impl eframe::App for MishuApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_file_drops(ctx);

        let mut actions = ActionQueue::new();
        let grade = self.session.grade();

        TopBar::show(ctx, &self.theme, grade, self.session.report().is_some(), &mut actions);
        results_panel(
            ctx,
            &self.theme,
            grade,
            self.session.report(),
            &mut self.table_state,
            &mut actions,
        );

        self.error_modal.show(ctx);
        self.draw_file_drop_overlay(ctx);

        let had_actions = !actions.is_empty();
        self.execute_actions(ctx, &mut actions);
        self.sync_theme_preference(ctx);

        if had_actions {
            ctx.request_repaint();
        }
    }
}
