use serde_derive::{Deserialize, Serialize};

/// The default CHIP-8 processor speed in hertz.
pub const DEFAULT_PROCESSOR_SPEED_HERTZ: u64 = 720;
/// The default CHIP-8 program start address within memory.
const DEFAULT_PROGRAM_ADDRESS: u16 = 0x200;

/// The historic CHIP-8 dialect a ROM targets.  This is purely a convenience constructor for
/// [Quirks] - it is never itself threaded through execution, only the resulting [Quirks] record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    Chip8,
    SuperChip,
    XoChip,
    HiRes,
}

/// The seven behavioural toggles whose correct setting depends on which historic interpreter
/// a ROM was written against.  The first five default to the modern ("SUPER-CHIP") convention;
/// the two partial-wrap flags default to off (full clip at the video boundary).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quirks {
    /// `FX55`/`FX65`: when true, `I` is left unchanged; when false, `I` advances by `x + 1`.
    pub load_store: bool,
    /// `8XY6`/`8XYE`: when true, shift `Vx` in place; when false, shift `Vy` into `Vx`.
    pub shift: bool,
    /// `BNNN`: when true, jump to `nnn + V[(nnn>>8)&0xF]`; when false, jump to `nnn + V[0]`.
    pub jump: bool,
    /// Arithmetic instructions that write both `Vx` and `VF`: when true, write `Vx` then `VF`;
    /// when false, write `VF` then `Vx`. Only observable when `x == 0xF`.
    pub vf_order: bool,
    /// `DXY0`: when true, a sprite height of zero always selects the 16x16 big sprite, even in
    /// `Default` video mode.
    pub draw: bool,
    /// Sprite columns that fall past the right/left edge wrap around instead of being clipped.
    pub partial_wrap_h: bool,
    /// Sprite rows that fall past the bottom/top edge wrap around instead of being clipped.
    pub partial_wrap_v: bool,
}

impl Quirks {
    /// Returns the [Quirks] record conventionally associated with the given [Dialect].
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Chip8 => Quirks {
                load_store: false,
                shift: false,
                jump: false,
                vf_order: true,
                draw: false,
                partial_wrap_h: false,
                partial_wrap_v: false,
            },
            Dialect::SuperChip | Dialect::HiRes => Quirks {
                load_store: true,
                shift: true,
                jump: true,
                vf_order: true,
                draw: true,
                partial_wrap_h: false,
                partial_wrap_v: false,
            },
            Dialect::XoChip => Quirks {
                load_store: true,
                shift: false,
                jump: false,
                vf_order: true,
                draw: false,
                partial_wrap_h: true,
                partial_wrap_v: true,
            },
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            load_store: true,
            shift: true,
            jump: true,
            vf_order: true,
            draw: true,
            partial_wrap_h: false,
            partial_wrap_v: false,
        }
    }
}

/// A struct to allow specification of Polychip start-up parameters.
///
/// Polychip provides a number of configurable options, for example the (initial) processor
/// speed and the [Quirks] governing how ambiguous instructions are handled (so as to allow
/// fine-grained mimicking of specific historic CHIP-8 interpreters).  Configuration of these
/// options is done through the [Options] struct, an instance of which is passed when
/// instantiating a processor.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Options {
    pub processor_speed_hertz: u64,
    pub program_start_address: u16,
    pub quirks: Quirks,
}

impl Default for Options {
    /// Constructor that returns an [Options] instance using typical default settings.
    fn default() -> Self {
        Options {
            processor_speed_hertz: DEFAULT_PROCESSOR_SPEED_HERTZ,
            program_start_address: DEFAULT_PROGRAM_ADDRESS,
            quirks: Quirks::default(),
        }
    }
}

impl Options {
    /// Deserializes an [Options] instance from the JSON contents of the file at `path`.
    pub fn load_from_file(path: &std::path::Path) -> Result<Options, crate::ErrorDetail> {
        let contents = std::fs::read_to_string(path).map_err(|_| crate::ErrorDetail::FileError {
            file_path: path.display().to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|_| crate::ErrorDetail::FileError {
            file_path: path.display().to_string(),
        })
    }

    /// Serializes this [Options] instance as JSON to the file at `path`.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), crate::ErrorDetail> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|_| crate::ErrorDetail::FileError {
                file_path: path.display().to_string(),
            })?;
        std::fs::write(path, contents).map_err(|_| crate::ErrorDetail::FileError {
            file_path: path.display().to_string(),
        })
    }
}
