use arrow::datatypes::DataType;
use std::fmt;

/// PostgreSQL column type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Real,
    DoublePrecision,
    Numeric { precision: u8, scale: i8 },
    Text,
    Bytea,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Interval,
    Array(Box<SqlType>),
}

/// Widest unsigned 64-bit value has 20 decimal digits
const UINT64_DIGITS: u8 = 20;

impl SqlType {
    /// Map an Arrow type onto the closest PostgreSQL type
    ///
    /// Unsigned integers widen to the next signed type since Postgres has none.
    /// Nested types other than lists have no column equivalent and fall back
    /// to `TEXT`.
    pub fn from_arrow(data_type: &DataType) -> SqlType {
        match data_type {
            DataType::Boolean => SqlType::Boolean,
            DataType::Int8 | DataType::Int16 | DataType::UInt8 => SqlType::SmallInt,
            DataType::Int32 | DataType::UInt16 => SqlType::Integer,
            DataType::Int64 | DataType::UInt32 => SqlType::BigInt,
            DataType::UInt64 => SqlType::Numeric {
                precision: UINT64_DIGITS,
                scale: 0,
            },
            DataType::Float16 | DataType::Float32 => SqlType::Real,
            DataType::Float64 => SqlType::DoublePrecision,
            DataType::Decimal128(precision, scale) | DataType::Decimal256(precision, scale) => {
                SqlType::Numeric {
                    precision: *precision,
                    scale: *scale,
                }
            }
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => SqlType::Text,
            DataType::Binary
            | DataType::LargeBinary
            | DataType::BinaryView
            | DataType::FixedSizeBinary(_) => SqlType::Bytea,
            DataType::Date32 | DataType::Date64 => SqlType::Date,
            DataType::Time32(_) | DataType::Time64(_) => SqlType::Time,
            DataType::Timestamp(_, None) => SqlType::Timestamp,
            DataType::Timestamp(_, Some(_)) => SqlType::TimestampTz,
            DataType::Duration(_) | DataType::Interval(_) => SqlType::Interval,
            DataType::List(field)
            | DataType::LargeList(field)
            | DataType::ListView(field)
            | DataType::LargeListView(field)
            | DataType::FixedSizeList(field, _) => {
                SqlType::Array(Box::new(SqlType::from_arrow(field.data_type())))
            }
            DataType::Dictionary(_, value_type) => SqlType::from_arrow(value_type),
            DataType::RunEndEncoded(_, values) => SqlType::from_arrow(values.data_type()),
            _ => SqlType::Text,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Boolean => f.write_str("BOOLEAN"),
            SqlType::SmallInt => f.write_str("SMALLINT"),
            SqlType::Integer => f.write_str("INTEGER"),
            SqlType::BigInt => f.write_str("BIGINT"),
            SqlType::Real => f.write_str("REAL"),
            SqlType::DoublePrecision => f.write_str("DOUBLE PRECISION"),
            // Postgres rejects a negative scale, clamp it like most loaders do
            SqlType::Numeric { precision, scale } => {
                write!(f, "NUMERIC({}, {})", precision, (*scale).max(0))
            }
            SqlType::Text => f.write_str("TEXT"),
            SqlType::Bytea => f.write_str("BYTEA"),
            SqlType::Date => f.write_str("DATE"),
            SqlType::Time => f.write_str("TIME"),
            SqlType::Timestamp => f.write_str("TIMESTAMP"),
            SqlType::TimestampTz => f.write_str("TIMESTAMP WITH TIME ZONE"),
            SqlType::Interval => f.write_str("INTERVAL"),
            SqlType::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, IntervalUnit, TimeUnit};
    use std::sync::Arc;

    #[test]
    fn test_arrow_to_postgres() {
        // Table-driven: (arrow type, expected postgres name)
        let test_cases = [
            (DataType::Boolean, "BOOLEAN"),
            (DataType::Int8, "SMALLINT"),
            (DataType::UInt8, "SMALLINT"),
            (DataType::Int32, "INTEGER"),
            (DataType::UInt16, "INTEGER"),
            (DataType::Int64, "BIGINT"),
            (DataType::UInt32, "BIGINT"),
            (DataType::UInt64, "NUMERIC(20, 0)"),
            (DataType::Float32, "REAL"),
            (DataType::Float64, "DOUBLE PRECISION"),
            (DataType::Decimal128(10, 2), "NUMERIC(10, 2)"),
            (DataType::Decimal128(5, -2), "NUMERIC(5, 0)"),
            (DataType::Utf8, "TEXT"),
            (DataType::LargeUtf8, "TEXT"),
            (DataType::Binary, "BYTEA"),
            (DataType::FixedSizeBinary(16), "BYTEA"),
            (DataType::Date32, "DATE"),
            (DataType::Time64(TimeUnit::Microsecond), "TIME"),
            (DataType::Timestamp(TimeUnit::Nanosecond, None), "TIMESTAMP"),
            (
                DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
                "TIMESTAMP WITH TIME ZONE",
            ),
            (DataType::Duration(TimeUnit::Second), "INTERVAL"),
            (DataType::Interval(IntervalUnit::MonthDayNano), "INTERVAL"),
            (DataType::Null, "TEXT"),
        ];

        for (arrow_type, expected) in test_cases {
            assert_eq!(
                SqlType::from_arrow(&arrow_type).to_string(),
                expected,
                "Failed for {:?}",
                arrow_type
            );
        }
    }

    #[test]
    fn test_lists_become_arrays() {
        let list = DataType::List(Arc::new(Field::new("item", DataType::Int64, true)));
        assert_eq!(SqlType::from_arrow(&list).to_string(), "BIGINT[]");

        let nested = DataType::List(Arc::new(Field::new("item", list, true)));
        assert_eq!(SqlType::from_arrow(&nested).to_string(), "BIGINT[][]");
    }

    #[test]
    fn test_dictionary_uses_value_type() {
        let dict = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        assert_eq!(SqlType::from_arrow(&dict), SqlType::Text);
    }

    #[test]
    fn test_struct_falls_back_to_text() {
        let strukt = DataType::Struct(vec![Field::new("x", DataType::Int32, true)].into());
        assert_eq!(SqlType::from_arrow(&strukt), SqlType::Text);
    }
}
