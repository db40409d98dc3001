use eframe::egui::{
    self,
    containers,
    RichText,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::core::Grade;

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        theme: &Theme,
        grade: Grade,
        has_report: bool,
        actions: &mut ActionQueue,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    if ui.button("Open CSV…").clicked() {
                        actions.push(UiAction::BrowseForFile);
                    }
                    if ui.add_enabled(has_report, egui::Button::new("Export Report…")).clicked() {
                        actions.push(UiAction::ExportReport);
                    }
                    if ui.add_enabled(has_report, egui::Button::new("Close File")).clicked() {
                        actions.push(UiAction::CloseFile);
                    }
                    if ui.button("Quit").clicked() {
                        actions.push(UiAction::Quit);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // right_to_left lays out in reverse, so walk the grades backwards
                    for g in Grade::all().collect::<Vec<_>>().into_iter().rev() {
                        Self::grade_pill(ui, theme, g, grade, actions);
                    }
                    ui.label(RichText::new("対象学年").color(theme.muted(ctx)));
                });
            });
        });
    }

    fn grade_pill(
        ui: &mut egui::Ui,
        theme: &Theme,
        grade: Grade,
        selected: Grade,
        actions: &mut ActionQueue,
    ) {
        let is_selected = grade == selected;
        let text = if is_selected {
            theme.heading(ui.ctx(), grade, &grade.label())
        } else {
            RichText::new(grade.label())
        };

        let response = ui
            .selectable_label(is_selected, text)
            .on_hover_text(format!("Check against kanji taught up to grade {}", grade));

        if response.clicked() && !is_selected {
            actions.push(UiAction::SelectGrade(grade));
        }
    }
}
