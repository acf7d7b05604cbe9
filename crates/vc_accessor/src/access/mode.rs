use core::fmt;

/// The operation an accessor performs on its property.
///
/// | mode          | arguments      | result                 |
/// |---------------|----------------|------------------------|
/// | `Get`         | none           | the value              |
/// | `Set`         | value          | previous value, if any |
/// | `Add`         | element        | none                   |
/// | `Remove`      | element or key | removed value, if any  |
/// | `GetIndexed`  | index          | the element            |
/// | `SetIndexed`  | index, element | previous element       |
/// | `GetMapped`   | key            | the value              |
/// | `SetMapped`   | key, value     | previous value         |
/// | `GetSize`     | none           | element count          |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessorMode {
    Get,
    Set,
    Add,
    Remove,
    GetIndexed,
    SetIndexed,
    GetMapped,
    SetMapped,
    GetSize,
}

/// Whether an accessor needs exclusive access to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Read,
    Write,
}

impl AccessorMode {
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Get,
        Self::Set,
        Self::Add,
        Self::Remove,
        Self::GetIndexed,
        Self::SetIndexed,
        Self::GetMapped,
        Self::SetMapped,
        Self::GetSize,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Number of arguments an invocation takes.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            Self::Get | Self::GetSize => 0,
            Self::Set | Self::Add | Self::Remove | Self::GetIndexed | Self::GetMapped => 1,
            Self::SetIndexed | Self::SetMapped => 2,
        }
    }

    #[inline]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Get | Self::GetIndexed | Self::GetMapped | Self::GetSize => Direction::Read,
            Self::Set | Self::Add | Self::Remove | Self::SetIndexed | Self::SetMapped => {
                Direction::Write
            }
        }
    }

    #[inline]
    pub const fn is_read(self) -> bool {
        matches!(self.direction(), Direction::Read)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Set => "SET",
            Self::Add => "ADD",
            Self::Remove => "REMOVE",
            Self::GetIndexed => "GET_INDEXED",
            Self::SetIndexed => "SET_INDEXED",
            Self::GetMapped => "GET_MAPPED",
            Self::SetMapped => "SET_MAPPED",
            Self::GetSize => "GET_SIZE",
        }
    }
}

impl fmt::Display for AccessorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_index_their_slot() {
        for (index, mode) in AccessorMode::ALL.into_iter().enumerate() {
            assert_eq!(mode.index(), index);
        }
        assert_eq!(AccessorMode::SetMapped.arity(), 2);
        assert!(!AccessorMode::Remove.is_read());
    }
}
