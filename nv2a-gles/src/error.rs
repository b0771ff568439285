//! GL error codes and the sticky error slot

use thiserror::Error;

/// Errors a GL entry point can report.
///
/// Every variant corresponds to one GL error code. A failing call leaves all
/// state untouched apart from the recorded error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GlError {
    #[error("invalid enum")]
    InvalidEnum,
    #[error("invalid value")]
    InvalidValue,
    #[error("invalid operation")]
    InvalidOperation,
    #[error("stack overflow")]
    StackOverflow,
    #[error("stack underflow")]
    StackUnderflow,
    #[error("out of memory")]
    OutOfMemory,
}

impl GlError {
    /// The numeric GL error code.
    pub const fn code(self) -> u32 {
        match self {
            Self::InvalidEnum => 0x0500,
            Self::InvalidValue => 0x0501,
            Self::InvalidOperation => 0x0502,
            Self::StackOverflow => 0x0503,
            Self::StackUnderflow => 0x0504,
            Self::OutOfMemory => 0x0505,
        }
    }

    /// Inverse of [`GlError::code`].
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0x0500 => Some(Self::InvalidEnum),
            0x0501 => Some(Self::InvalidValue),
            0x0502 => Some(Self::InvalidOperation),
            0x0503 => Some(Self::StackOverflow),
            0x0504 => Some(Self::StackUnderflow),
            0x0505 => Some(Self::OutOfMemory),
            _ => None,
        }
    }
}

pub type GlResult<T> = Result<T, GlError>;

/// `GL_NO_ERROR`
pub const NO_ERROR: u32 = 0;

/// Holds the first error recorded since the last read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    pending: Option<GlError>,
}

impl ErrorSlot {
    /// Records `err` unless an earlier error is still pending.
    ///
    /// Returns true if this error was stored.
    pub fn record(&mut self, err: GlError) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(err);
        true
    }

    /// Returns and clears the pending error.
    pub fn take(&mut self) -> Option<GlError> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<GlError> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_wins() {
        let mut slot = ErrorSlot::default();
        assert!(slot.record(GlError::InvalidValue));
        assert!(!slot.record(GlError::InvalidEnum));
        assert_eq!(slot.take(), Some(GlError::InvalidValue));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_slot_accepts_new_error_after_take() {
        let mut slot = ErrorSlot::default();
        slot.record(GlError::StackOverflow);
        slot.take();
        slot.record(GlError::OutOfMemory);
        assert_eq!(slot.peek(), Some(GlError::OutOfMemory));
    }

    #[test]
    fn test_codes_round_trip() {
        for err in [
            GlError::InvalidEnum,
            GlError::InvalidValue,
            GlError::InvalidOperation,
            GlError::StackOverflow,
            GlError::StackUnderflow,
            GlError::OutOfMemory,
        ] {
            assert_eq!(GlError::from_code(err.code()), Some(err));
        }
        assert_eq!(GlError::from_code(NO_ERROR), None);
    }
}
