use std::time::{Duration, Instant};

use crate::error::ErrorDetail;
use crate::options::{Options, Quirks};
use crate::processor::Cpu;
use crate::program::Program;
use crate::video::VideoMemory;

/// The number of CHIP-8 keypad keys a [Scheduler] expects in each key snapshot.
const KEY_COUNT: usize = 16;
/// How often (in wall-clock time) the CPU catch-up and timer catch-up loops apply drift
/// correction, topping up the cycle/tick count so that the configured rate is met even if the
/// host's frame loop itself runs slower than expected.
const DRIFT_CORRECTION_INTERVAL: Duration = Duration::from_millis(250);
/// The number of timer ticks (at 60 Hz) that should have elapsed every [DRIFT_CORRECTION_INTERVAL].
const TIMER_TICKS_PER_DRIFT_WINDOW: u64 = 60 / 4;
/// The standard CHIP-8/SUPER-CHIP 60 Hz delay/sound timer rate.
const TIMER_HERTZ: u64 = 60;
/// CPU catch-up only runs once this many cycle-periods' worth of wall time has accumulated,
/// avoiding a tight spin when the configured speed is very high relative to the frame rate.
const CATCH_UP_THRESHOLD_CYCLES: u32 = 10;

/// The small ordered set of "named" CPU speeds a hosting application may page through with
/// PgUp/PgDn, per the historic interpreters this crate emulates.
const BASE_SPEEDS_HERTZ: [u64; 5] = [420, 600, 720, 900, 1200];
/// The multiplier applied to [BASE_SPEEDS_HERTZ] once the stepper has been paged past the top
/// (or bottom, in reverse) of the base set - XO-CHIP ROMs commonly assume tens of thousands of
/// cycles per second.
const SPEED_MULTIPLIER: u64 = 50;

/// A one-way hand-off of an audio event from the scheduler to the hosting application's audio
/// collaborator. The scheduler never reads audio state back; it only produces these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Pulse the fixed 440 Hz square-wave beeper for one frame.
    Beep,
    /// Play one frame's worth of the given XO-CHIP 16-byte audio pattern buffer.
    Pattern([u8; 16]),
}

/// The outcome of one [Scheduler::advance] call: whether the display collaborator should
/// redraw, and any audio events produced during this iteration (in execution order).
#[derive(Debug, Default)]
pub struct SchedulerTick {
    pub draw_requested: bool,
    pub audio_events: Vec<AudioEvent>,
}

/// A steppable CPU speed control modelling the historic named speeds `{420, 600, 720, 900,
/// 1200}` Hz, pageable past either end into a `x50` multiplied range for XO-CHIP ROMs that
/// assume a much higher clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedStepper {
    index: usize,
    multiplied: bool,
}

impl SpeedStepper {
    /// Returns a [SpeedStepper] positioned at the given starting frequency, snapping to the
    /// nearest named speed (and multiplier range) if `hertz` does not exactly match one.
    pub fn new(hertz: u64) -> Self {
        let mut best = SpeedStepper { index: 0, multiplied: false };
        let mut best_diff = u64::MAX;
        for multiplied in [false, true] {
            for (index, &base) in BASE_SPEEDS_HERTZ.iter().enumerate() {
                let candidate = if multiplied { base * SPEED_MULTIPLIER } else { base };
                let diff = candidate.abs_diff(hertz);
                if diff < best_diff {
                    best_diff = diff;
                    best = SpeedStepper { index, multiplied };
                }
            }
        }
        best
    }

    /// Returns the currently selected frequency in hertz.
    pub fn hertz(&self) -> u64 {
        let base = BASE_SPEEDS_HERTZ[self.index];
        if self.multiplied { base * SPEED_MULTIPLIER } else { base }
    }

    /// Pages to the next higher named speed; once past the top of the base set, switches into
    /// the `x50` multiplied range starting from its bottom.
    pub fn step_up(&mut self) {
        if self.index + 1 < BASE_SPEEDS_HERTZ.len() {
            self.index += 1;
        } else if !self.multiplied {
            self.multiplied = true;
            self.index = 0;
        }
    }

    /// Pages to the next lower named speed; once past the bottom of the multiplied range,
    /// switches back into the base range at its top.
    pub fn step_down(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        } else if self.multiplied {
            self.multiplied = false;
            self.index = BASE_SPEEDS_HERTZ.len() - 1;
        }
    }
}

/// The Polychip frame-loop scheduler: translates wall-clock time into CPU cycles at a
/// configurable frequency, drives the 60 Hz delay/sound timer independently of CPU speed, and
/// hands off audio events for the hosting application's audio collaborator to play.
///
/// The scheduler never sleeps; it is driven by repeated calls to [Scheduler::advance] from the
/// host's own frame loop (a `winit`/`eframe` redraw, for example), relying on that loop's own
/// frame pacing (vsync on or off). Each call measures elapsed wall-clock time since the last
/// call and catches the CPU and timers up accordingly, applying a drift correction every
/// quarter second so that transient scheduling hiccups in the host don't result in a
/// permanently slow emulation.
pub struct Scheduler {
    cpu: Cpu,
    speed: SpeedStepper,
    muted: bool,
    paused: bool,
    pause_started_at: Option<Instant>,
    last_cycle_mark: Instant,
    last_timer_mark: Instant,
    cycle_drift_window_start: Instant,
    cycles_this_drift_window: u64,
    timer_drift_window_start: Instant,
    timer_ticks_this_drift_window: u64,
}

impl Scheduler {
    /// Constructor that returns a [Scheduler] wrapping a freshly-constructed [Cpu], with no
    /// program loaded and the clock marks set to "now".
    pub fn new(options: Options) -> Self {
        let now = Instant::now();
        Scheduler {
            speed: SpeedStepper::new(options.processor_speed_hertz),
            cpu: Cpu::new(options),
            muted: false,
            paused: false,
            pause_started_at: None,
            last_cycle_mark: now,
            last_timer_mark: now,
            cycle_drift_window_start: now,
            cycles_this_drift_window: 0,
            timer_drift_window_start: now,
            timer_ticks_this_drift_window: 0,
        }
    }

    /// Constructor that returns a [Scheduler] with `program` already loaded.
    pub fn initialise_and_load(program: &Program, options: Options) -> Result<Self, ErrorDetail> {
        let mut scheduler = Scheduler::new(options);
        scheduler.load_rom(program)?;
        Ok(scheduler)
    }

    /// Loads `program`, as [Cpu::load_rom].
    pub fn load_rom(&mut self, program: &Program) -> Result<(), ErrorDetail> {
        self.cpu.load_rom(program)
    }

    /// Fully resets the underlying [Cpu] and this scheduler's clock marks, as though the
    /// emulator had just been started. Matches the convention that a reset is a full
    /// re-construction, not a partial clear.
    pub fn reset(&mut self) {
        self.cpu.reset();
        let now = Instant::now();
        self.last_cycle_mark = now;
        self.last_timer_mark = now;
        self.cycle_drift_window_start = now;
        self.cycles_this_drift_window = 0;
        self.timer_drift_window_start = now;
        self.timer_ticks_this_drift_window = 0;
    }

    /// Returns a reference to the underlying [VideoMemory] for the display collaborator to
    /// read between iterations.
    pub fn video(&self) -> &VideoMemory {
        self.cpu.video()
    }

    /// Returns a reference to the underlying [Cpu], for callers that need extended state
    /// (snapshots, RPL flags, etc.) beyond what the scheduler exposes directly.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn quirks(&self) -> Quirks {
        self.cpu.quirks()
    }

    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.cpu.set_quirks(quirks);
    }

    /// Returns the currently configured CPU speed in hertz.
    pub fn speed_hertz(&self) -> u64 {
        self.speed.hertz()
    }

    /// Pages the CPU speed up one step (see [SpeedStepper::step_up]).
    pub fn speed_step_up(&mut self) {
        self.speed.step_up();
        self.cpu.set_processor_speed(self.speed.hertz());
    }

    /// Pages the CPU speed down one step (see [SpeedStepper::step_down]).
    pub fn speed_step_down(&mut self) {
        self.speed.step_down();
        self.cpu.set_processor_speed(self.speed.hertz());
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pauses CPU/timer advancement. Wall-clock accounting is frozen: no cycles or timer
    /// ticks are considered "owed" for the duration of the pause.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.pause_started_at = Some(Instant::now());
        }
    }

    /// Resumes CPU/timer advancement, shifting every clock mark forward by the elapsed pause
    /// duration so that no cycles are considered owed from the time spent paused.
    pub fn resume(&mut self) {
        if let Some(paused_at) = self.pause_started_at.take() {
            let pause_duration = paused_at.elapsed();
            self.last_cycle_mark += pause_duration;
            self.last_timer_mark += pause_duration;
            self.cycle_drift_window_start += pause_duration;
            self.timer_drift_window_start += pause_duration;
        }
        self.paused = false;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Runs one iteration of the scheduler's frame loop: catches the CPU up on cycles owed
    /// since the last call (at the configured speed), catches the 60 Hz timer up and produces
    /// any audio events due, and returns whether the display collaborator should redraw.
    ///
    /// If pausing, this is a no-op that returns an empty [SchedulerTick]. Execution halts
    /// (this call returns the error) on the first [ErrorDetail::StackOverflow] (or any other
    /// opcode error) encountered mid catch-up; such errors are non-retryable for the loaded
    /// ROM, but are not fatal to the host process.
    ///
    /// # Arguments
    ///
    /// * `keys` - the latest snapshot of which of the 16 keypad keys are pressed
    pub fn advance(&mut self, keys: [bool; KEY_COUNT]) -> Result<SchedulerTick, ErrorDetail> {
        let mut tick = SchedulerTick::default();
        if self.paused {
            return Ok(tick);
        }
        self.advance_cpu(keys, &mut tick)?;
        self.advance_timers(&mut tick);
        Ok(tick)
    }

    fn advance_cpu(
        &mut self,
        keys: [bool; KEY_COUNT],
        tick: &mut SchedulerTick,
    ) -> Result<(), ErrorDetail> {
        let nanos_per_cycle = 1_000_000_000u64 / self.speed.hertz().max(1);
        let now = Instant::now();
        let elapsed_nanos = now.duration_since(self.last_cycle_mark).as_nanos() as u64;
        if elapsed_nanos < nanos_per_cycle * CATCH_UP_THRESHOLD_CYCLES as u64 {
            return Ok(());
        }
        let mut cycles = elapsed_nanos / nanos_per_cycle;
        self.last_cycle_mark = now;

        if now.duration_since(self.cycle_drift_window_start) >= DRIFT_CORRECTION_INTERVAL {
            let target_cycles_per_window = self.speed.hertz() / 4;
            let owed = self.cycles_this_drift_window + cycles;
            if owed < target_cycles_per_window {
                cycles = target_cycles_per_window - self.cycles_this_drift_window;
            }
            self.cycles_this_drift_window = 0;
            self.cycle_drift_window_start = now;
        } else {
            self.cycles_this_drift_window += cycles;
        }

        for _ in 0..cycles {
            match self.cpu.tick(keys) {
                Ok(drew) => tick.draw_requested |= drew,
                Err(e) => {
                    log::error!("halting ROM after opcode error: {e}");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn advance_timers(&mut self, tick: &mut SchedulerTick) {
        let timer_period_nanos = 1_000_000_000u64 / TIMER_HERTZ;
        let now = Instant::now();
        let elapsed_nanos = now.duration_since(self.last_timer_mark).as_nanos() as u64;
        if elapsed_nanos < timer_period_nanos {
            return;
        }
        let mut reps = elapsed_nanos / timer_period_nanos;
        self.last_timer_mark = now;

        if now.duration_since(self.timer_drift_window_start) >= DRIFT_CORRECTION_INTERVAL {
            let owed = self.timer_ticks_this_drift_window + reps;
            if owed < TIMER_TICKS_PER_DRIFT_WINDOW {
                reps = TIMER_TICKS_PER_DRIFT_WINDOW - self.timer_ticks_this_drift_window;
            }
            self.timer_ticks_this_drift_window = 0;
            self.timer_drift_window_start = now;
        } else {
            self.timer_ticks_this_drift_window += reps;
        }

        for _ in 0..reps {
            if self.cpu.sound_timer_active() && !self.muted {
                match self.cpu.audio_buffer() {
                    Some(buffer) => tick.audio_events.push(AudioEvent::Pattern(*buffer)),
                    None => tick.audio_events.push(AudioEvent::Beep),
                }
            }
            self.cpu.decrement_timers();
        }
    }
}
