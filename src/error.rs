use crate::StateSnapshot;
use std::error;
use std::fmt;

/// An Error enum used throughout the Polychip crate to communicate details of runtime errors
/// that have occurred.
///
/// Instances of [ErrorDetail] are bubbled-up to the hosting application through the public
/// API methods.
#[derive(Debug, PartialEq, Clone)]
pub enum ErrorDetail {
    /// A ROM was too large to fit in the addressable program region of memory
    InvalidRom { size: usize, max_size: usize },
    /// An attempt was made to push a return address on to the call stack while it is full
    StackOverflow,
    /// An attempt was made to pop a return address off the call stack while it is empty
    StackUnderflow,
    /// An attempt was made to read/write from a memory address outside the addressable range
    MemoryAddressOutOfBounds { address: u16 },
    /// A key ordinal was referenced that is outside the valid CHIP-8 keypad range (0x0 to 0xF)
    InvalidKey { key: u8 },
    /// An `FX75`/`FX85` RPL-flag instruction referenced a register index above the supported
    /// range (0x0 to 0x7 inclusive)
    RplIndexOutOfRange { x: usize },
    /// Error used for any file I/O issues encountered loading a ROM or options file
    FileError { file_path: String },
}

impl error::Error for ErrorDetail {}

impl fmt::Display for ErrorDetail {
    /// Returns a textual description of each enum variant for display purposes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDetail::InvalidRom { size, max_size } => {
                write!(
                    f,
                    "ROM of size {} bytes exceeds the maximum loadable size of {} bytes",
                    size, max_size
                )
            }
            ErrorDetail::StackOverflow => {
                write!(f, "an attempt was made to call a subroutine with a full stack")
            }
            ErrorDetail::StackUnderflow => {
                write!(
                    f,
                    "an attempt was made to return from a subroutine with an empty stack"
                )
            }
            ErrorDetail::MemoryAddressOutOfBounds { address } => {
                write!(f, "invalid memory address {:#X} was accessed", address)
            }
            ErrorDetail::InvalidKey { key } => {
                write!(f, "invalid key {} was specified", key)
            }
            ErrorDetail::RplIndexOutOfRange { x } => {
                write!(
                    f,
                    "RPL flag register index {:#X} exceeds the supported range (0x0-0x7)",
                    x
                )
            }
            ErrorDetail::FileError { file_path } => {
                write!(f, "invalid file path {} was specified", file_path)
            }
        }
    }
}

/// An Error struct used to bubble up Polychip errors to the hosting application.  This wraps
/// the more specific [ErrorDetail] error enum, and provides overall processor state context
/// at the point of the failure.
#[derive(Debug, PartialEq)]
pub struct PolychipError {
    pub state_snapshot_dump: StateSnapshot,
    pub inner_error: ErrorDetail,
}

impl error::Error for PolychipError {}

impl fmt::Display for PolychipError {
    /// Returns a textual description of the error, including the cycle count and program
    /// counter value at the point of failure where that detail is available.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let StateSnapshot::ExtendedSnapshot {
            program_counter,
            cycles,
            ..
        } = &self.state_snapshot_dump
        {
            write!(
                f,
                "an error occurred on cycle {}, with program_counter {:#X}: ",
                cycles, program_counter
            )?;
        }
        self.inner_error.fmt(f)
    }
}
