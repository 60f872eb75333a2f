use std::fmt;

/// Describes one remote operation: its dispatch name, the names of its formal
/// parameters in declaration order, and the name of its return type.
///
/// Parameter names double as the first segment of every dotted path that
/// carries that argument on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub returns: &'static str,
}

impl Signature {
    pub const fn new(name: &'static str, params: &'static [&'static str], returns: &'static str) -> Self {
        Self { name, params, returns }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn returns_unit(&self) -> bool {
        self.returns == "()"
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) -> {}", self.name, self.params.join(", "), self.returns)
    }
}
