use super::*;

const COLOUR_OFF: Color32 = Color32::from_rgb(0x10, 0x10, 0x10);
const COLOUR_PLANE_1: Color32 = Color32::from_rgb(0xF0, 0xF0, 0xF0);
const COLOUR_PLANE_2: Color32 = Color32::from_rgb(0xA0, 0xA0, 0xA0);
const COLOUR_BOTH: Color32 = Color32::from_rgb(0x60, 0x60, 0x60);

impl PolychipApp {
    /// Renders the top panel: load/restart/stop controls and the dialect selector.
    pub(crate) fn render_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top(ID_TOP_PANEL).show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui
                    .button(CAPTION_BUTTON_LOAD_PROGRAM)
                    .on_hover_text(TOOLTIP_BUTTON_LOAD_PROGRAM)
                    .clicked()
                {
                    self.on_click_load_program();
                }
                if ui
                    .add_enabled(
                        !self.program_bytes.is_empty(),
                        egui::Button::new(CAPTION_BUTTON_RESTART),
                    )
                    .on_hover_text(TOOLTIP_BUTTON_RESTART)
                    .clicked()
                {
                    self.on_click_restart();
                }
                if ui
                    .add_enabled(
                        self.execution_state != ExecutionState::Stopped,
                        egui::Button::new(CAPTION_BUTTON_STOP),
                    )
                    .on_hover_text(TOOLTIP_BUTTON_STOP)
                    .clicked()
                {
                    self.on_click_stop();
                }
                ui.separator();
                ui.label(CAPTION_LABEL_DIALECT);
                for (label, dialect) in [
                    (CAPTION_RADIO_CHIP8, Dialect::Chip8),
                    (CAPTION_RADIO_SUPERCHIP, Dialect::SuperChip),
                    (CAPTION_RADIO_XOCHIP, Dialect::XoChip),
                    (CAPTION_RADIO_HIRES, Dialect::HiRes),
                ] {
                    if ui
                        .selectable_label(self.dialect == dialect, label)
                        .clicked()
                    {
                        self.on_select_dialect(dialect);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .button(CAPTION_BUTTON_SPEED_UP)
                        .on_hover_text(TOOLTIP_BUTTON_SPEED_UP)
                        .clicked()
                    {
                        if let Some(tx) = &self.message_to_polychip_tx {
                            let _ = tx.send(MessageToPolychip::SpeedStepUp);
                        }
                    }
                    ui.label(format!("{} {}", self.speed_hertz, CAPTION_LABEL_SPEED_SUFFIX));
                    if ui
                        .button(CAPTION_BUTTON_SPEED_DOWN)
                        .on_hover_text(TOOLTIP_BUTTON_SPEED_DOWN)
                        .clicked()
                    {
                        if let Some(tx) = &self.message_to_polychip_tx {
                            let _ = tx.send(MessageToPolychip::SpeedStepDown);
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    /// Renders the bottom panel: play/pause, quirk toggles, execution status and any error.
    pub(crate) fn render_footer(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom(ID_BOTTOM_PANEL).show(ctx, |ui| {
            ui.add_space(4.0);
            if !self.last_error_string.is_empty() {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(CAPTION_LABEL_ERROR).color(Color32::RED));
                    ui.label(
                        RichText::new(&self.last_error_string)
                            .color(Color32::RED)
                            .monospace(),
                    );
                });
                ui.separator();
            }
            ui.horizontal(|ui| {
                match self.execution_state {
                    ExecutionState::Paused => {
                        if ui
                            .button(CAPTION_BUTTON_RUN)
                            .on_hover_text(TOOLTIP_BUTTON_RUN)
                            .clicked()
                        {
                            self.on_click_play();
                        }
                    }
                    ExecutionState::Running => {
                        if ui
                            .button(CAPTION_BUTTON_PAUSE)
                            .on_hover_text(TOOLTIP_BUTTON_PAUSE)
                            .clicked()
                        {
                            self.on_click_pause();
                        }
                    }
                    ExecutionState::Stopped | ExecutionState::Crashed => {
                        ui.add_enabled(false, egui::Button::new(CAPTION_BUTTON_RUN));
                    }
                }
                ui.separator();
                ui.label(CAPTION_LABEL_QUIRKS);
                for (label, enabled) in [
                    (CAPTION_CHECKBOX_LOAD_STORE, self.options.quirks.load_store),
                    (CAPTION_CHECKBOX_SHIFT, self.options.quirks.shift),
                    (CAPTION_CHECKBOX_JUMP, self.options.quirks.jump),
                    (CAPTION_CHECKBOX_VF_ORDER, self.options.quirks.vf_order),
                    (CAPTION_CHECKBOX_DRAW, self.options.quirks.draw),
                    (
                        CAPTION_CHECKBOX_PARTIAL_WRAP_H,
                        self.options.quirks.partial_wrap_h,
                    ),
                    (
                        CAPTION_CHECKBOX_PARTIAL_WRAP_V,
                        self.options.quirks.partial_wrap_v,
                    ),
                ] {
                    ui.label(if enabled { format!("{label} ✓") } else { label.to_string() });
                }
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    let status = match self.execution_state {
                        ExecutionState::Stopped => "stopped",
                        ExecutionState::Running => "running",
                        ExecutionState::Paused => "paused",
                        ExecutionState::Crashed => "crashed",
                    };
                    ui.label(format!("{}{}", CAPTION_LABEL_EXECUTION_STATUS, status));
                });
            });
            ui.add_space(4.0);
        });
    }

    /// Renders the CHIP-8 display: both bit-planes painted using the four-colour mapping
    /// (off / plane one / plane two / both), at whatever resolution the current [VideoMode]
    /// selects.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.program_bytes.is_empty() {
                self.render_welcome_screen(ui);
                return;
            }
            let painter = ui.painter();
            let width = self.video.render_width();
            let height = self.video.render_height();
            let pixel_width = ui.available_width() / width as f32;
            let pixel_height = ui.available_height() / height as f32;
            let min_x = ui.min_rect().min[0];
            let min_y = ui.min_rect().min[1];
            for y in 0..height {
                for x in 0..width {
                    let index = y * width + x;
                    let plane_1 = self.video.get_index(polychip::Plane::First, index);
                    let plane_2 = self.video.get_index(polychip::Plane::Second, index);
                    let colour = match (plane_1, plane_2) {
                        (false, false) => COLOUR_OFF,
                        (true, false) => COLOUR_PLANE_1,
                        (false, true) => COLOUR_PLANE_2,
                        (true, true) => COLOUR_BOTH,
                    };
                    painter.rect(
                        egui::Rect::from_two_pos(
                            Pos2::from((min_x + x as f32 * pixel_width, min_y + y as f32 * pixel_height)),
                            Pos2::from((
                                min_x + (x + 1) as f32 * pixel_width,
                                min_y + (y + 1) as f32 * pixel_height,
                            )),
                        ),
                        egui::Rounding::none(),
                        colour,
                        Stroke::new(1., colour),
                    );
                }
            }
        });
    }

    fn render_welcome_screen(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(CAPTION_HEADING_GETTING_STARTED);
            ui.label(CAPTION_LABEL_GETTING_STARTED_1);
            ui.add_space(8.0);
            ui.label(CAPTION_LABEL_GETTING_STARTED_2);
            ui.add_space(8.0);
            ui.label(CAPTION_LABEL_GETTING_STARTED_3);
        });
    }

    /// Renders the F1 help overlay: the physical-key to hex-keypad mapping table.
    pub(crate) fn render_help_window(&mut self, ctx: &egui::Context) {
        egui::Window::new(ID_HELP_WINDOW)
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.heading(CAPTION_HEADING_KEYBOARD_CONTROLS);
                ui.label(CAPTION_LABEL_KEYBOARD_CONTROLS_1);
                egui::Grid::new(ID_KEYBOARD_CONTROLS_GRID_1).show(ui, |ui| {
                    for row in [["1", "2", "3", "C"], ["4", "5", "6", "D"], ["7", "8", "9", "E"], ["A", "0", "B", "F"]] {
                        for key in row {
                            ui.label(key);
                        }
                        ui.end_row();
                    }
                });
                ui.add_space(8.0);
                ui.label(CAPTION_LABEL_KEYBOARD_CONTROLS_2);
                egui::Grid::new(ID_KEYBOARD_CONTROLS_GRID_2).show(ui, |ui| {
                    for row in [["1", "2", "3", "4"], ["Q", "W", "E", "R"], ["A", "S", "D", "F"], ["Z", "X", "C", "V"]] {
                        for key in row {
                            ui.label(key);
                        }
                        ui.end_row();
                    }
                });
                ui.add_space(8.0);
                ui.label("Press F1 to close this overlay.");
            });
    }
}
