// Paths
pub(super) const PATH_RESOURCE_DIRECTORY_NAME: &str = "resources";
pub(super) const PATH_ROMS_DIRECTORY_NAME: &str = "roms";

// Window titles
pub(super) const TITLE_APP_WINDOW: &str = "Polychip: CHIP-8/SUPER-CHIP/XO-CHIP interpreter";
pub(super) const TITLE_LOAD_PROGRAM_WINDOW: &str = "Locate program ROM to load";

// Widget captions
pub(super) const CAPTION_BUTTON_LOAD_PROGRAM: &str = "Load Program";
pub(super) const CAPTION_BUTTON_RUN: &str = "▶";
pub(super) const CAPTION_BUTTON_PAUSE: &str = "⏸";
pub(super) const CAPTION_BUTTON_RESTART: &str = "⏮";
pub(super) const CAPTION_BUTTON_STOP: &str = "⏹";
pub(super) const CAPTION_BUTTON_SPEED_UP: &str = "Speed +";
pub(super) const CAPTION_BUTTON_SPEED_DOWN: &str = "Speed -";
pub(super) const CAPTION_LABEL_SPEED_SUFFIX: &str = "hz (target)";
pub(super) const CAPTION_LABEL_DIALECT: &str = "Dialect: ";
pub(super) const CAPTION_LABEL_EXECUTION_STATUS: &str = "Execution status: ";
pub(super) const CAPTION_LABEL_ERROR: &str = "ERROR: ";
pub(super) const CAPTION_LABEL_QUIRKS: &str = "Quirks (Ctrl+1..7 to toggle): ";
pub(super) const CAPTION_CHECKBOX_LOAD_STORE: &str = "1: load/store leaves I unchanged";
pub(super) const CAPTION_CHECKBOX_SHIFT: &str = "2: shift in place";
pub(super) const CAPTION_CHECKBOX_JUMP: &str = "3: jump offsets by Vx";
pub(super) const CAPTION_CHECKBOX_VF_ORDER: &str = "4: write Vx before VF";
pub(super) const CAPTION_CHECKBOX_DRAW: &str = "5: DXY0 always draws big sprite";
pub(super) const CAPTION_CHECKBOX_PARTIAL_WRAP_H: &str = "6: sprites wrap horizontally";
pub(super) const CAPTION_CHECKBOX_PARTIAL_WRAP_V: &str = "7: sprites wrap vertically";
pub(super) const CAPTION_RADIO_CHIP8: &str = "CHIP-8";
pub(super) const CAPTION_RADIO_SUPERCHIP: &str = "SUPER-CHIP";
pub(super) const CAPTION_RADIO_XOCHIP: &str = "XO-CHIP";
pub(super) const CAPTION_RADIO_HIRES: &str = "HiRes";
pub(super) const CAPTION_HEADING_GETTING_STARTED: &str = "Getting Started";
pub(super) const CAPTION_HEADING_KEYBOARD_CONTROLS: &str = "Keyboard Controls";

pub(super) const CAPTION_LABEL_GETTING_STARTED_1: &str =
    "Welcome to Polychip, an interpreter for CHIP-8 and its SUPER-CHIP, XO-CHIP and HiRes
dialects. Click 'Load Program' above to pick a ROM, choose the dialect it was written
for, and adjust individual quirks afterwards if the ROM still misbehaves.";
pub(super) const CAPTION_LABEL_GETTING_STARTED_2: &str =
    "Execution can be paused and resumed with the ▶/⏸ button, restarted from the
beginning with ⏮, and stopped entirely with ⏹. Use 'Speed +'/'Speed -' (or
PageUp/PageDown) to change the target cycle rate while the ROM is running.";
pub(super) const CAPTION_LABEL_GETTING_STARTED_3: &str =
    "Press F1 at any time to show or hide this overlay.";

pub(super) const CAPTION_LABEL_KEYBOARD_CONTROLS_1: &str =
    "The hexadecimal keypad CHIP-8 programs expect, in its 4x4 layout:";
pub(super) const CAPTION_LABEL_KEYBOARD_CONTROLS_2: &str =
    "Mapped onto a modern QWERTY keyboard as follows:";

// File dialog filters
pub(super) const FILTER_CHIP8: &str = "CHIP-8";
pub(super) const FILTER_ALL: &str = "All";

// Ui element IDs
pub(super) const ID_TOP_PANEL: &str = "top_panel";
pub(super) const ID_BOTTOM_PANEL: &str = "bottom_panel";
pub(super) const ID_HELP_WINDOW: &str = "help_window";
pub(super) const ID_KEYBOARD_CONTROLS_GRID_1: &str = "keyboard_controls_grid_1";
pub(super) const ID_KEYBOARD_CONTROLS_GRID_2: &str = "keyboard_controls_grid_2";

// Tooltips
pub(super) const TOOLTIP_BUTTON_LOAD_PROGRAM: &str = "Load and run a ROM file from disk";
pub(super) const TOOLTIP_BUTTON_RUN: &str = "Resume execution of the current program";
pub(super) const TOOLTIP_BUTTON_PAUSE: &str = "Pause execution of the current program";
pub(super) const TOOLTIP_BUTTON_RESTART: &str = "Reset and restart the currently loaded program";
pub(super) const TOOLTIP_BUTTON_STOP: &str = "Stop and unload the current program";
pub(super) const TOOLTIP_BUTTON_SPEED_UP: &str = "Step the target cycle rate up";
pub(super) const TOOLTIP_BUTTON_SPEED_DOWN: &str = "Step the target cycle rate down";
