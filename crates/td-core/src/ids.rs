use core::fmt;

/// Index of a child component within one assembly.
///
/// `u32` keeps handles small; ids are dense and assigned in insertion order,
/// so they double as vector indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompId(u32);

/// Index of a field within one component's schema.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldId(u32);

impl CompId {
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FieldId {
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Resolved form of a dotted-path scalar reference: which child, which field.
///
/// Paths are resolved once at assembly-build time; solvers and design-closure
/// declarations hold handles, never strings.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarHandle {
    pub comp: CompId,
    pub field: FieldId,
}

impl fmt::Debug for CompId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompId({})", self.0)
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldId({})", self.0)
    }
}

impl fmt::Debug for VarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarHandle({}, {})", self.comp.0, self.field.0)
    }
}

impl fmt::Display for CompId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            assert_eq!(CompId::from_index(i).index(), i as usize);
            assert_eq!(FieldId::from_index(i).index(), i as usize);
        }
    }

    #[test]
    fn handles_compare_by_value() {
        let a = VarHandle {
            comp: CompId::from_index(1),
            field: FieldId::from_index(3),
        };
        let b = VarHandle {
            comp: CompId::from_index(1),
            field: FieldId::from_index(3),
        };
        assert_eq!(a, b);
    }
}
