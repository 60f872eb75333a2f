use super::wire::{Decode, Encode};

/// Whether a value is written as a single pair or decomposed into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Atomic value with a direct textual representation: booleans,
    /// characters, integers, floats, strings and the unit type.
    Terminal,
    /// Value made of named fields, each encoded under its own sub-path.
    Structured,
}

impl Kind {
    pub fn is_terminal(self) -> bool {
        matches!(self, Kind::Terminal)
    }
}

/// Classifies a runtime value.
pub fn kind_of<T: Encode + ?Sized>(value: &T) -> Kind {
    value.kind()
}

/// Classifies a declared type. Used when decoding, where no value exists yet.
pub fn kind_of_type<T: Decode>() -> Kind {
    T::KIND
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_types_from_declared_type() {
        assert_eq!(kind_of_type::<bool>(), Kind::Terminal);
        assert_eq!(kind_of_type::<char>(), Kind::Terminal);
        assert_eq!(kind_of_type::<i8>(), Kind::Terminal);
        assert_eq!(kind_of_type::<u64>(), Kind::Terminal);
        assert_eq!(kind_of_type::<i128>(), Kind::Terminal);
        assert_eq!(kind_of_type::<f32>(), Kind::Terminal);
        assert_eq!(kind_of_type::<f64>(), Kind::Terminal);
        assert_eq!(kind_of_type::<String>(), Kind::Terminal);
        assert_eq!(kind_of_type::<()>(), Kind::Terminal);
    }

    #[test]
    fn test_terminal_types_from_runtime_value() {
        assert!(kind_of(&42i32).is_terminal());
        assert!(kind_of("text").is_terminal());
        assert!(kind_of(&'c').is_terminal());
        assert!(kind_of(&()).is_terminal());
    }

    #[test]
    fn test_runtime_and_declared_kinds_agree() {
        assert_eq!(kind_of(&1.5f64), kind_of_type::<f64>());
        assert_eq!(kind_of(&String::from("s")), kind_of_type::<String>());
    }
}
