#![allow(non_snake_case)]

use crate::error::ErrorDetail;
use crate::instruction::Instruction;
use crate::keystate::KeyState;
use crate::memory::Memory;
use crate::options::{Options, Quirks};
use crate::program::Program;
use crate::stack::Stack;
use crate::video::{Plane, VideoMemory, VideoMode};

mod execute;
mod sprite;

/// The number of general-purpose variable registers (V0..VF).
const VARIABLE_REGISTER_COUNT: usize = 16;
/// The number of CHIP-8 keypad keys.
const KEY_COUNT: usize = 16;
/// The number of SUPER-CHIP RPL user flags.
const RPL_COUNT: usize = 8;
/// The highest RPL flag index FX75/FX85 may address.
const MAX_RPL_INDEX: usize = RPL_COUNT - 1;
/// The size in bytes of an XO-CHIP audio pattern buffer.
const AUDIO_BUFFER_SIZE: usize = 16;
/// The opcode `F000` decodes to prior to reading its trailing 16-bit immediate.
const EXTENDED_LOAD_OPCODE: u16 = 0xF000;

/// An enum used internally to keep track of processor execution status.
#[derive(Debug, PartialEq)]
enum ProcessorStatus {
    /// The processor has been instantiated and font data installed, but no program loaded
    Initialised,
    /// A program has been loaded into memory, ready to execute
    ProgramLoaded,
    /// The decode->fetch->execute cycle has begun
    Running,
    /// The processor is stalled waiting for a keypress (FX0A)
    WaitingForKeypress,
    /// The processor is in an error state, having generated an [ErrorDetail]
    Crashed,
}

/// An enum used to indicate which variant of [StateSnapshot] should be returned when a call is
/// made to [Cpu::export_state_snapshot()].
pub enum StateSnapshotVerbosity {
    /// Only the video memory state will be reported
    Minimal,
    /// The video memory, registers, stack and memory state will all be reported
    Extended,
}

/// An enum with variants representing the different Polychip state snapshots that can be
/// returned to hosting applications for processing.
#[derive(Debug, PartialEq)]
pub enum StateSnapshot {
    /// Minimal snapshot containing only the video memory state
    MinimalSnapshot { video: VideoMemory },
    /// Extended snapshot containing the video memory state along with all registers, stack,
    /// memory and timers
    ExtendedSnapshot {
        video: VideoMemory,
        stack: Stack,
        memory: Memory,
        program_counter: u16,
        index_register: u16,
        variable_registers: [u8; VARIABLE_REGISTER_COUNT],
        delay_timer: u8,
        sound_timer: u8,
        cycles: usize,
    },
}

/// An abstraction of the CHIP-8/SUPER-CHIP/XO-CHIP/HiRes processor, and the core public
/// interface to the Polychip crate.
///
/// This struct holds representations of all sub-components (memory, registers, stack, video
/// planes, keypad state, RPL flags and the optional XO-CHIP audio buffer), and exposes methods
/// through which a program can be loaded and executed one cycle at a time.
pub struct Cpu {
    // CHIP-8 COMPONENT STATE FIELDS
    video: VideoMemory,
    stack: Stack,
    memory: Memory,
    program_counter: u16,
    index_register: u16,
    variable_registers: [u8; VARIABLE_REGISTER_COUNT],
    delay_timer: u8,
    sound_timer: u8,
    cycles: usize,
    rpl_flags: [u8; RPL_COUNT],
    audio_buffer: Option<[u8; AUDIO_BUFFER_SIZE]>,
    // ADDITIONAL STATE FIELDS
    keystate: KeyState,
    previous_keys_pressed: [bool; KEY_COUNT],
    key_wait_register: Option<usize>,
    draw_requested: bool,
    status: ProcessorStatus,
    // CONFIG AND SETUP FIELDS
    program_start_address: u16,
    processor_speed_hertz: u64,
    quirks: Quirks,
    options: Options,
}

impl Cpu {
    /// Constructor/builder function that returns a freshly-initialised [Cpu] instance, with
    /// both fontsets installed and no program loaded.
    ///
    /// # Arguments
    ///
    /// * `options` - an [Options] instance holding Polychip start-up configuration
    pub fn new(options: Options) -> Self {
        Cpu {
            video: VideoMemory::new(),
            stack: Stack::new(),
            memory: Memory::new(),
            program_counter: options.program_start_address,
            index_register: 0x0,
            variable_registers: [0x0; VARIABLE_REGISTER_COUNT],
            delay_timer: 0x0,
            sound_timer: 0x0,
            cycles: 0,
            rpl_flags: [0x0; RPL_COUNT],
            audio_buffer: None,
            keystate: KeyState::new(),
            previous_keys_pressed: [false; KEY_COUNT],
            key_wait_register: None,
            draw_requested: true,
            status: ProcessorStatus::Initialised,
            program_start_address: options.program_start_address,
            processor_speed_hertz: options.processor_speed_hertz,
            quirks: options.quirks,
            options,
        }
    }

    /// Constructor/builder function that returns a freshly-initialised [Cpu] with the supplied
    /// [Program] loaded into memory ready for execution.
    ///
    /// # Arguments
    ///
    /// * `program` - a [Program] instance holding the bytes of the ROM to be executed
    /// * `options` - an [Options] instance holding Polychip start-up configuration
    pub fn initialise_and_load(program: &Program, options: Options) -> Result<Self, ErrorDetail> {
        let mut cpu = Cpu::new(options);
        cpu.load_rom(program)?;
        Ok(cpu)
    }

    /// Performs a full reset of the processor back to its freshly-constructed state, using the
    /// same [Options] this instance was originally constructed with.  Matches the specified
    /// behaviour that a reset is a full re-construction, not a partial clear.
    pub fn reset(&mut self) {
        *self = Cpu::new(self.options);
    }

    /// Loads `program` into memory starting at the configured program start address, resetting
    /// the program counter and stack pointer but leaving registers and timers untouched.
    /// Returns [ErrorDetail::InvalidRom] if the program is too large to fit in memory.
    ///
    /// # Arguments
    ///
    /// * `program` - a [Program] instance holding the bytes of the ROM to be loaded
    pub fn load_rom(&mut self, program: &Program) -> Result<(), ErrorDetail> {
        let size = program.program_data_size();
        let max_size = self.memory.max_addressable_size() - self.program_start_address as usize;
        if size > max_size {
            return Err(ErrorDetail::InvalidRom { size, max_size });
        }
        self.memory
            .write_bytes(self.program_start_address as usize, program.program_data())?;
        self.program_counter = self.program_start_address;
        self.stack = Stack::new();
        self.status = ProcessorStatus::ProgramLoaded;
        Ok(())
    }

    /// Returns the [Options] this instance was constructed with.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Sets the current processor speed in hertz.
    pub fn set_processor_speed(&mut self, speed_hertz: u64) {
        self.processor_speed_hertz = speed_hertz;
        self.options.processor_speed_hertz = speed_hertz;
    }

    /// Returns the current processor speed in hertz.
    pub fn processor_speed(&self) -> u64 {
        self.processor_speed_hertz
    }

    /// Returns the active [Quirks] configuration.
    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Sets the active [Quirks] configuration (used by the demo frontend's quirk toggle keys).
    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.quirks = quirks;
        self.options.quirks = quirks;
    }

    /// Returns true if the sound timer is active, i.e. the hosting application should play audio.
    pub fn sound_timer_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// Returns a reference to the current XO-CHIP audio pattern buffer, if one has been loaded
    /// via `F002`.
    pub fn audio_buffer(&self) -> Option<&[u8; AUDIO_BUFFER_SIZE]> {
        self.audio_buffer.as_ref()
    }

    /// Returns true if the processor has latched waiting for a keypress (`FX0A`).
    pub fn is_waiting_for_keypress(&self) -> bool {
        self.status == ProcessorStatus::WaitingForKeypress
    }

    /// Returns a copy of the current state of Polychip.
    ///
    /// The minimal level of state reporting returns just a copy of the [VideoMemory], from
    /// which pixels can be interrogated for rendering purposes. The extended level additionally
    /// returns copies of all registers, timers, the [Stack] and [Memory].
    ///
    /// # Arguments
    ///
    /// * `verbosity` - the amount of state that should be returned
    pub fn export_state_snapshot(&self, verbosity: StateSnapshotVerbosity) -> StateSnapshot {
        match verbosity {
            StateSnapshotVerbosity::Minimal => StateSnapshot::MinimalSnapshot {
                video: self.video.clone(),
            },
            StateSnapshotVerbosity::Extended => StateSnapshot::ExtendedSnapshot {
                video: self.video.clone(),
                stack: self.stack.clone(),
                memory: self.memory.clone(),
                program_counter: self.program_counter,
                index_register: self.index_register,
                variable_registers: self.variable_registers,
                delay_timer: self.delay_timer,
                sound_timer: self.sound_timer,
                cycles: self.cycles,
            },
        }
    }

    /// Returns a shared reference to the video memory, for read-only rendering by the display
    /// collaborator.
    pub fn video(&self) -> &VideoMemory {
        &self.video
    }

    /// Returns true if a draw has been requested since the last call to
    /// [Cpu::take_draw_requested], and clears the flag.
    pub fn take_draw_requested(&mut self) -> bool {
        std::mem::replace(&mut self.draw_requested, false)
    }

    /// Decrements the delay and sound timers by one if they are non-zero.  Intended to be
    /// called by the scheduler at a fixed 60 Hz rate.
    pub fn decrement_timers(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
    }

    /// Executes one iteration of the fetch -> decode -> execute cycle, given the latest keypad
    /// snapshot. Returns a boolean indicating whether the video memory was updated this cycle.
    ///
    /// If the processor is latched waiting for a keypress, this scans `keys` for the first
    /// transition from released to pressed; if found, stores the key's ordinal in the waiting
    /// register and proceeds to execute an opcode this cycle; otherwise returns immediately
    /// without consuming a cycle.
    ///
    /// # Arguments
    ///
    /// * `keys` - a snapshot of which of the 16 keypad keys are currently pressed
    pub fn tick(&mut self, keys: [bool; KEY_COUNT]) -> Result<bool, ErrorDetail> {
        let previous_keys_pressed = self.previous_keys_pressed;
        for (key, &pressed) in keys.iter().enumerate() {
            self.keystate.set_key_status(key as u8, pressed)?;
        }
        self.previous_keys_pressed = keys;
        if let Some(x) = self.key_wait_register {
            let newly_pressed = (0..KEY_COUNT).find(|&k| keys[k] && !previous_keys_pressed[k]);
            match newly_pressed {
                Some(key) => {
                    self.variable_registers[x] = key as u8;
                    self.key_wait_register = None;
                    self.status = ProcessorStatus::Running;
                }
                None => {
                    self.status = ProcessorStatus::WaitingForKeypress;
                    return Ok(false);
                }
            }
        }
        self.status = ProcessorStatus::Running;
        self.cycles += 1;
        let fetch_address = self.program_counter;
        let opcode: u16 = match self.memory.read_two_bytes(fetch_address as usize) {
            Ok(opcode) => opcode,
            Err(e) => {
                self.status = ProcessorStatus::Crashed;
                return Err(e);
            }
        };
        self.program_counter += 2;
        let instruction = Instruction::decode_from(opcode, self.video.video_mode, fetch_address);
        match self.execute(instruction) {
            Ok(()) => Ok(self.take_draw_requested()),
            Err(e) => {
                self.status = ProcessorStatus::Crashed;
                Err(e)
            }
        }
    }

    /// Advances the program counter past the next instruction, additionally skipping a
    /// trailing `F000 NNNN` extended-load literal should one immediately follow, so that skip
    /// instructions never land mid-literal.
    fn skip_next_instruction(&mut self) -> Result<(), ErrorDetail> {
        self.program_counter += 2;
        if self.memory.read_two_bytes(self.program_counter as usize)? == EXTENDED_LOAD_OPCODE {
            self.program_counter += 2;
        }
        Ok(())
    }

    /// Writes `result` to `V[x]` and `vf` to `VF`, honoring [Quirks::vf_order] for the write
    /// ordering (only observable when `x == 0xF`, since then one write clobbers the other).
    fn write_result_and_vf(&mut self, x: usize, result: u8, vf: u8) {
        if self.quirks.vf_order {
            self.variable_registers[x] = result;
            self.variable_registers[0xF] = vf;
        } else {
            self.variable_registers[0xF] = vf;
            self.variable_registers[x] = result;
        }
    }

    fn plane_mask_for(n: u8) -> Plane {
        match n & 0x3 {
            0 => Plane::None,
            1 => Plane::First,
            2 => Plane::Second,
            _ => Plane::Both,
        }
    }
}
