use crate::core::Grade;

// Ui functions push actions here instead of holding `&mut MishuApp`
#[derive(Debug, Clone)]
pub enum UiAction {
    SelectGrade(Grade),
    BrowseForFile,
    ExportReport,
    CloseFile,
    Quit,
}

#[derive(Default)]
pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
