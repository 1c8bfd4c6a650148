use crate::error::{ReduceError, Result};

/// Identifier of a participant among the local (same-host) workers.
pub type Rank = u32;

/// Element kinds the CPU reducer can sum.
///
/// The discriminants are the numeric codes used by the surrounding
/// communication layer, so a raw code can be mapped back with
/// [`ElementType::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementType {
    F32 = 0,
    F64 = 1,
    F16 = 2,
    U8 = 3,
    I32 = 4,
    I8 = 5,
    I64 = 6,
}

impl ElementType {
    /// Every supported kind, in code order.
    pub const ALL: [ElementType; 7] = [
        ElementType::F32,
        ElementType::F64,
        ElementType::F16,
        ElementType::U8,
        ElementType::I32,
        ElementType::I8,
        ElementType::I64,
    ];

    /// Map a raw type code to an element kind.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ElementType::F32),
            1 => Ok(ElementType::F64),
            2 => Ok(ElementType::F16),
            3 => Ok(ElementType::U8),
            4 => Ok(ElementType::I32),
            5 => Ok(ElementType::I8),
            6 => Ok(ElementType::I64),
            _ => Err(ReduceError::UnsupportedDType { code }),
        }
    }

    /// Raw type code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Storage size of one element in bytes.
    pub const fn size_in_bytes(self) -> usize {
        match self {
            ElementType::F32 | ElementType::I32 => 4,
            ElementType::F64 | ElementType::I64 => 8,
            ElementType::F16 => 2,
            ElementType::U8 | ElementType::I8 => 1,
        }
    }

    /// Width in bytes the sum kernel steps by.
    ///
    /// Equal to [`size_in_bytes`](Self::size_in_bytes) except for `F16`, which
    /// is summed with the f32 kernel and therefore steps by 4.
    pub const fn kernel_width(self) -> usize {
        match self {
            ElementType::F16 => 4,
            other => other.size_in_bytes(),
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
            ElementType::F16 => "f16",
            ElementType::U8 => "u8",
            ElementType::I32 => "i32",
            ElementType::I8 => "i8",
            ElementType::I64 => "i64",
        }
    }
}

impl TryFrom<u8> for ElementType {
    type Error = ReduceError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
