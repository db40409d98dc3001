mod actions;
mod app;
mod error_modal;
mod fonts;
mod table;
mod theme;
mod top_bar;

pub use app::MishuApp;
