use std::fmt;

/// The data-type lattice: `UNKNOWN` and `VOID` sit outside the
/// widening order, `INTEGER < REAL < COMPLEX` widen under arithmetic,
/// `STRING` only combines with `STRING`, and anything else that doesn't fit
/// those rules produces `ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Unknown,
    Void,
    Integer,
    Real,
    Complex,
    String,
    Error,
}

impl DataType {
    /// Arithmetic widening join used for binary term/factor/magnitude
    /// nodes: the wider of the two numeric kinds, or `Error` if either side
    /// is non-numeric.
    pub fn widen(self, other: DataType) -> DataType {
        use DataType::*;
        match (self, other) {
            (Integer, Integer) => Integer,
            (a, b) if a.numeric_rank().is_some() && b.numeric_rank().is_some() => {
                if a.numeric_rank() >= b.numeric_rank() {
                    a
                } else {
                    b
                }
            }
            _ => Error,
        }
    }

    fn numeric_rank(self) -> Option<u8> {
        match self {
            DataType::Integer => Some(0),
            DataType::Real => Some(1),
            DataType::Complex => Some(2),
            _ => None,
        }
    }

    /// Concatenation rule: `STRING` if both sides are `STRING`, else
    /// `ERROR`.
    pub fn concat(self, other: DataType) -> DataType {
        if self == DataType::String && other == DataType::String {
            DataType::String
        } else {
            DataType::Error
        }
    }

    /// Unary negation: the operand's kind, or `Error` if it's `STRING`.
    pub fn negate(self) -> DataType {
        if self == DataType::String {
            DataType::Error
        } else {
            self
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::Unknown => "UNKNOWN",
            DataType::Void => "VOID",
            DataType::Integer => "INTEGER",
            DataType::Real => "REAL",
            DataType::Complex => "COMPLEX",
            DataType::String => "STRING",
            DataType::Error => "ERROR",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_order_is_integer_real_complex() {
        assert_eq!(DataType::Integer.widen(DataType::Real), DataType::Real);
        assert_eq!(DataType::Real.widen(DataType::Complex), DataType::Complex);
        assert_eq!(
            DataType::Integer.widen(DataType::Complex),
            DataType::Complex
        );
    }

    #[test]
    fn string_only_combines_with_string_under_concat() {
        assert_eq!(DataType::String.concat(DataType::String), DataType::String);
        assert_eq!(DataType::String.concat(DataType::Integer), DataType::Error);
    }

    #[test]
    fn mixing_string_and_numeric_under_arithmetic_is_error() {
        assert_eq!(DataType::Integer.widen(DataType::String), DataType::Error);
    }

    #[test]
    fn negating_string_is_error() {
        assert_eq!(DataType::String.negate(), DataType::Error);
        assert_eq!(DataType::Integer.negate(), DataType::Integer);
    }
}
