#![windows_subsystem = "windows"]

use eframe::egui;
use egui::*;
use polychip::{
    AudioEvent, Dialect, Options, PolychipError, Program, Quirks, Scheduler,
    StateSnapshotVerbosity, VideoMemory,
};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

mod audio;
mod event_handlers;
mod render;
mod resource_strings;

use audio::Audio;
use resource_strings::*;

/// The initial window dimensions, in logical points.
const INITIAL_WIDTH: f32 = 960.0;
const INITIAL_HEIGHT: f32 = 620.0;
/// How often the worker thread polls for incoming UI messages and calls [Scheduler::advance].
/// Deliberately short so input latency stays low - the scheduler itself paces CPU/timer
/// cadence independently of how often this loop spins.
const WORKER_POLL_INTERVAL: Duration = Duration::from_micros(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecutionState {
    Stopped,
    Running,
    Paused,
    Crashed,
}

/// Messages sent from the UI thread to the worker thread hosting the [Scheduler].
pub(crate) enum MessageToPolychip {
    KeyEvent { key: u8, pressed: bool },
    SpeedStepUp,
    SpeedStepDown,
    SetQuirks(Quirks),
    Pause,
    Resume,
    Terminate,
}

/// Messages sent from the worker thread back to the UI thread.
pub(crate) enum MessageFromPolychip {
    Tick { video: VideoMemory, speed_hertz: u64 },
    ErrorReport { error: PolychipError },
}

pub(crate) struct PolychipApp {
    message_to_polychip_tx: Option<mpsc::Sender<MessageToPolychip>>,
    message_from_polychip_rx: Option<mpsc::Receiver<MessageFromPolychip>>,
    program_file_path: String,
    program_bytes: Vec<u8>,
    dialect: Dialect,
    options: Options,
    speed_hertz: u64,
    execution_state: ExecutionState,
    video: VideoMemory,
    last_error_string: String,
    roms_path: std::path::PathBuf,
    show_help: bool,
}

impl Default for PolychipApp {
    fn default() -> Self {
        let options = Options::default();
        PolychipApp {
            message_to_polychip_tx: None,
            message_from_polychip_rx: None,
            program_file_path: String::default(),
            program_bytes: Vec::new(),
            dialect: Dialect::SuperChip,
            speed_hertz: options.processor_speed_hertz,
            options,
            execution_state: ExecutionState::Stopped,
            video: VideoMemory::default(),
            last_error_string: String::default(),
            roms_path: std::env::current_dir()
                .unwrap()
                .join(PATH_RESOURCE_DIRECTORY_NAME)
                .join(PATH_ROMS_DIRECTORY_NAME),
            show_help: true,
        }
    }
}

impl PolychipApp {
    fn instantiate_polychip(&mut self, program: Program, options: Options) {
        if self.execution_state != ExecutionState::Stopped {
            self.stop_polychip();
        }
        let mut scheduler = match Scheduler::initialise_and_load(&program, options) {
            Ok(scheduler) => scheduler,
            Err(error) => {
                self.last_error_string = error.to_string();
                self.execution_state = ExecutionState::Crashed;
                return;
            }
        };
        let (message_to_polychip_tx, message_to_polychip_rx) = mpsc::channel();
        let (message_from_polychip_tx, message_from_polychip_rx) = mpsc::channel();
        self.message_to_polychip_tx = Some(message_to_polychip_tx);
        self.message_from_polychip_rx = Some(message_from_polychip_rx);
        self.speed_hertz = scheduler.speed_hertz();
        self.last_error_string = String::default();
        thread::spawn(move || 'outer: {
            // The rodio output stream is not Send, so it is constructed here rather than in
            // the UI thread and handed across the channel.
            let mut audio = Audio::new();
            let mut keys = [false; 16];
            let mut crashed = false;
            loop {
                for message in message_to_polychip_rx.try_iter() {
                    match message {
                        MessageToPolychip::KeyEvent { key, pressed } => {
                            keys[key as usize] = pressed
                        }
                        MessageToPolychip::SpeedStepUp => scheduler.speed_step_up(),
                        MessageToPolychip::SpeedStepDown => scheduler.speed_step_down(),
                        MessageToPolychip::SetQuirks(quirks) => scheduler.set_quirks(quirks),
                        MessageToPolychip::Pause => scheduler.pause(),
                        MessageToPolychip::Resume => scheduler.resume(),
                        MessageToPolychip::Terminate => break 'outer,
                    }
                }
                if !crashed {
                    match scheduler.advance(keys) {
                        Ok(tick) => {
                            if tick.audio_events.is_empty() {
                                audio.silence();
                            }
                            for event in tick.audio_events {
                                match event {
                                    AudioEvent::Beep => audio.play_beep(),
                                    AudioEvent::Pattern(buffer) => audio.play_pattern(buffer),
                                }
                            }
                            if message_from_polychip_tx
                                .send(MessageFromPolychip::Tick {
                                    video: scheduler.video().clone(),
                                    speed_hertz: scheduler.speed_hertz(),
                                })
                                .is_err()
                            {
                                break 'outer;
                            }
                        }
                        Err(inner_error) => {
                            crashed = true;
                            audio.silence();
                            let snapshot = scheduler
                                .cpu()
                                .export_state_snapshot(StateSnapshotVerbosity::Extended);
                            let _ =
                                message_from_polychip_tx.send(MessageFromPolychip::ErrorReport {
                                    error: PolychipError {
                                        state_snapshot_dump: snapshot,
                                        inner_error,
                                    },
                                });
                        }
                    }
                }
                thread::sleep(WORKER_POLL_INTERVAL);
            }
        });
        self.execution_state = ExecutionState::Running;
    }

    fn stop_polychip(&mut self) {
        self.execution_state = ExecutionState::Stopped;
        if let Some(tx) = &self.message_to_polychip_tx {
            let _ = tx.send(MessageToPolychip::Terminate);
        }
        self.message_from_polychip_rx = None;
        self.message_to_polychip_tx = None;
        self.video = VideoMemory::default();
    }

    fn send_key_event(&self, key: u8, pressed: bool) {
        if let Some(tx) = &self.message_to_polychip_tx {
            let _ = tx.send(MessageToPolychip::KeyEvent { key, pressed });
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::F1)) {
            self.show_help = !self.show_help;
        }
        if self.execution_state == ExecutionState::Running
            || self.execution_state == ExecutionState::Paused
        {
            if ctx.input(|i| i.key_pressed(egui::Key::PageUp)) {
                if let Some(tx) = &self.message_to_polychip_tx {
                    let _ = tx.send(MessageToPolychip::SpeedStepUp);
                }
            }
            if ctx.input(|i| i.key_pressed(egui::Key::PageDown)) {
                if let Some(tx) = &self.message_to_polychip_tx {
                    let _ = tx.send(MessageToPolychip::SpeedStepDown);
                }
            }
        }
        for (modifier_key, toggle) in [
            (egui::Key::Num1, &mut self.options.quirks.load_store),
            (egui::Key::Num2, &mut self.options.quirks.shift),
            (egui::Key::Num3, &mut self.options.quirks.jump),
            (egui::Key::Num4, &mut self.options.quirks.vf_order),
            (egui::Key::Num5, &mut self.options.quirks.draw),
            (egui::Key::Num6, &mut self.options.quirks.partial_wrap_h),
            (egui::Key::Num7, &mut self.options.quirks.partial_wrap_v),
        ] {
            if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(modifier_key)) {
                *toggle = !*toggle;
                if let Some(tx) = &self.message_to_polychip_tx {
                    let _ = tx.send(MessageToPolychip::SetQuirks(self.options.quirks));
                }
            }
        }
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Key { key, pressed, .. } = event {
                    let hex_key = match key {
                        egui::Key::Num1 => Some(0x1),
                        egui::Key::Num2 => Some(0x2),
                        egui::Key::Num3 => Some(0x3),
                        egui::Key::Num4 => Some(0xC),
                        egui::Key::Q => Some(0x4),
                        egui::Key::W => Some(0x5),
                        egui::Key::E => Some(0x6),
                        egui::Key::R => Some(0xD),
                        egui::Key::A => Some(0x7),
                        egui::Key::S => Some(0x8),
                        egui::Key::D => Some(0x9),
                        egui::Key::F => Some(0xE),
                        egui::Key::Z => Some(0xA),
                        egui::Key::X => Some(0x0),
                        egui::Key::C => Some(0xB),
                        egui::Key::V => Some(0xF),
                        _ => None,
                    };
                    if let Some(hex_key) = hex_key {
                        self.send_key_event(hex_key, *pressed);
                    }
                }
            }
        });
    }

    fn get_program(&self) -> Program {
        Program::new(self.program_bytes.clone())
    }

    fn drain_worker_messages(&mut self) {
        let mut latest_video = None;
        let mut latest_speed = None;
        let mut error_report = None;
        if let Some(rx) = &self.message_from_polychip_rx {
            for message in rx.try_iter() {
                match message {
                    MessageFromPolychip::Tick { video, speed_hertz } => {
                        latest_video = Some(video);
                        latest_speed = Some(speed_hertz);
                    }
                    MessageFromPolychip::ErrorReport { error } => error_report = Some(error),
                }
            }
        }
        if let Some(video) = latest_video {
            self.video = video;
        }
        if let Some(speed) = latest_speed {
            self.speed_hertz = speed;
        }
        if let Some(error) = error_report {
            self.execution_state = ExecutionState::Crashed;
            self.last_error_string = error.to_string();
        }
    }
}

impl eframe::App for PolychipApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_worker_messages();
        self.handle_input(ctx);
        self.render_header(ctx);
        self.render_central_panel(ctx);
        self.render_footer(ctx);
        if self.show_help {
            self.render_help_window(ctx);
        }
        ctx.request_repaint();
    }
}

fn main() {
    env_logger::init();
    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(INITIAL_WIDTH, INITIAL_HEIGHT)),
        ..Default::default()
    };
    eframe::run_native(
        TITLE_APP_WINDOW,
        native_options,
        Box::new(|_cc| Box::new(PolychipApp::default())),
    )
    .unwrap();
}
