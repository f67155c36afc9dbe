use super::*;
use rfd::FileDialog;

impl PolychipApp {
    /// Event handler for "Load Program" button
    pub(crate) fn on_click_load_program(&mut self) {
        if let Some(file) = FileDialog::new()
            .set_title(TITLE_LOAD_PROGRAM_WINDOW)
            .add_filter(FILTER_CHIP8, &["ch8"])
            .add_filter(FILTER_ALL, &["*"])
            .set_directory(&self.roms_path)
            .pick_file()
        {
            if let Ok(bytes) = std::fs::read(&file) {
                self.program_file_path = file.display().to_string();
                self.program_bytes = bytes;
                self.options.quirks = Quirks::for_dialect(self.dialect);
                self.instantiate_polychip(self.get_program(), self.options);
            }
        }
    }

    /// Event handler for "Stop" button
    pub(crate) fn on_click_stop(&mut self) {
        self.stop_polychip();
        self.program_file_path = String::default();
        self.program_bytes = Vec::new();
    }

    /// Event handler for "Pause" button
    pub(crate) fn on_click_pause(&mut self) {
        self.execution_state = ExecutionState::Paused;
        if let Some(tx) = &self.message_to_polychip_tx {
            let _ = tx.send(MessageToPolychip::Pause);
        }
    }

    /// Event handler for "Play" button
    pub(crate) fn on_click_play(&mut self) {
        self.execution_state = ExecutionState::Running;
        if let Some(tx) = &self.message_to_polychip_tx {
            let _ = tx.send(MessageToPolychip::Resume);
        }
    }

    /// Event handler for "Restart" button
    pub(crate) fn on_click_restart(&mut self) {
        self.instantiate_polychip(self.get_program(), self.options);
    }

    /// Event handler for the dialect selector - resets quirks to that dialect's convention
    pub(crate) fn on_select_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
        self.options.quirks = Quirks::for_dialect(dialect);
        if !self.program_bytes.is_empty() {
            self.instantiate_polychip(self.get_program(), self.options);
        }
    }
}
