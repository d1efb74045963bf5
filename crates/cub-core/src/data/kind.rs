//! Column kind information

use std::fmt;

/// The element kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Int,
    Float,
    Bool,
    /// Text with an explicit null
    Object,
}

impl ColumnKind {
    /// Check if kind is numeric (booleans count)
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Int | ColumnKind::Float | ColumnKind::Bool)
    }

    /// Check if kind is the generic text kind
    pub fn is_object(&self) -> bool {
        matches!(self, ColumnKind::Object)
    }

    /// Short name used by `DataFrame::dtypes`
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Int => "int",
            ColumnKind::Float => "float",
            ColumnKind::Bool => "bool",
            ColumnKind::Object => "string",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
