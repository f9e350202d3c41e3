use crate::data::Value;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use mysql_async::consts::ColumnType as mysql_column_type;

///How values of a column are turned into [`Value`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Decimal,
    Date,
    DateTime,
    Time,
    Opaque,
}

impl ValueKind {
    pub fn from_mysql_type(column_type: mysql_column_type) -> ValueKind {
        match column_type {
            mysql_column_type::MYSQL_TYPE_VARCHAR
            | mysql_column_type::MYSQL_TYPE_VAR_STRING
            | mysql_column_type::MYSQL_TYPE_STRING
            | mysql_column_type::MYSQL_TYPE_ENUM
            | mysql_column_type::MYSQL_TYPE_SET
            | mysql_column_type::MYSQL_TYPE_TINY_BLOB
            | mysql_column_type::MYSQL_TYPE_MEDIUM_BLOB
            | mysql_column_type::MYSQL_TYPE_LONG_BLOB
            | mysql_column_type::MYSQL_TYPE_BLOB
            | mysql_column_type::MYSQL_TYPE_JSON => ValueKind::Text,
            mysql_column_type::MYSQL_TYPE_TINY
            | mysql_column_type::MYSQL_TYPE_SHORT
            | mysql_column_type::MYSQL_TYPE_INT24
            | mysql_column_type::MYSQL_TYPE_LONG
            | mysql_column_type::MYSQL_TYPE_LONGLONG
            | mysql_column_type::MYSQL_TYPE_YEAR => ValueKind::Integer,
            mysql_column_type::MYSQL_TYPE_FLOAT | mysql_column_type::MYSQL_TYPE_DOUBLE => {
                ValueKind::Float
            }
            mysql_column_type::MYSQL_TYPE_DECIMAL | mysql_column_type::MYSQL_TYPE_NEWDECIMAL => {
                ValueKind::Decimal
            }
            mysql_column_type::MYSQL_TYPE_DATE | mysql_column_type::MYSQL_TYPE_NEWDATE => {
                ValueKind::Date
            }
            mysql_column_type::MYSQL_TYPE_DATETIME
            | mysql_column_type::MYSQL_TYPE_DATETIME2
            | mysql_column_type::MYSQL_TYPE_TIMESTAMP
            | mysql_column_type::MYSQL_TYPE_TIMESTAMP2 => ValueKind::DateTime,
            mysql_column_type::MYSQL_TYPE_TIME | mysql_column_type::MYSQL_TYPE_TIME2 => {
                ValueKind::Time
            }
            _ => ValueKind::Opaque,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnData {
    name: String,
    column_type: mysql_column_type,
    kind: ValueKind,
}

impl ColumnData {
    pub fn new(name: String, column_type: mysql_column_type) -> ColumnData {
        ColumnData {
            name,
            column_type,
            kind: ValueKind::from_mysql_type(column_type),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> mysql_column_type {
        self.column_type
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn convert(&self, value: mysql_async::Value) -> Result<Value> {
        match value {
            mysql_async::Value::NULL => Ok(Value::Null),
            mysql_async::Value::Bytes(bytes) => self.convert_bytes(bytes),
            mysql_async::Value::Int(i) => Ok(Value::Number(i.to_string())),
            mysql_async::Value::UInt(u) => Ok(Value::Number(u.to_string())),
            mysql_async::Value::Float(f) => Ok(Value::Number(f.to_string())),
            mysql_async::Value::Double(d) => Ok(Value::Number(d.to_string())),
            mysql_async::Value::Date(year, month, day, hours, minutes, seconds, micro_seconds) => {
                if self.kind == ValueKind::Date {
                    Ok(Value::Other(format_date(year, month, day)))
                } else {
                    Ok(Value::Other(format_date_time(
                        year,
                        month,
                        day,
                        hours,
                        minutes,
                        seconds,
                        micro_seconds,
                    )))
                }
            }
            mysql_async::Value::Time(negative, days, hours, minutes, seconds, micro_seconds) => Ok(
                Value::Other(format_time(negative, days, hours, minutes, seconds, micro_seconds)),
            ),
        }
    }

    fn convert_bytes(&self, bytes: Vec<u8>) -> Result<Value> {
        match self.kind {
            //DECIMAL goes beyond what any fixed-width numeric type holds, so the text is kept as is.
            ValueKind::Integer | ValueKind::Float | ValueKind::Decimal => {
                let s = String::from_utf8(bytes)?;
                if s.parse::<f64>().is_err() {
                    bail!("Column {} holds a non-numeric value {s:?}", self.name);
                }
                Ok(Value::Number(s))
            }
            ValueKind::Text => match String::from_utf8(bytes) {
                Ok(s) => Ok(Value::Text(s)),
                Err(e) => Ok(Value::Other(hex_literal(e.as_bytes()))),
            },
            ValueKind::Date | ValueKind::DateTime | ValueKind::Time | ValueKind::Opaque => {
                match String::from_utf8(bytes) {
                    Ok(s) => Ok(Value::Other(s)),
                    Err(e) => Ok(Value::Other(hex_literal(e.as_bytes()))),
                }
            }
        }
    }
}

fn hex_literal(bytes: &[u8]) -> String {
    let digits: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
    format!("0x{digits}")
}

fn format_date(year: u16, month: u8, day: u8) -> String {
    match NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        //Zero dates are legal in MySQL but not in chrono.
        None => format!("{year:04}-{month:02}-{day:02}"),
    }
}

fn format_date_time(
    year: u16,
    month: u8,
    day: u8,
    hours: u8,
    minutes: u8,
    seconds: u8,
    micro_seconds: u32,
) -> String {
    let dt = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32).and_then(|date| {
        date.and_hms_micro_opt(hours as u32, minutes as u32, seconds as u32, micro_seconds)
    });
    match dt {
        Some(dt) if micro_seconds > 0 => dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!(
            "{} {hours:02}:{minutes:02}:{seconds:02}",
            format_date(year, month, day)
        ),
    }
}

fn format_time(
    negative: bool,
    days: u32,
    hours: u8,
    minutes: u8,
    seconds: u8,
    micro_seconds: u32,
) -> String {
    let sign = if negative { "-" } else { "" };
    let hours = days * 24 + hours as u32;
    if micro_seconds > 0 {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}.{micro_seconds:06}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod value_kind {
        use super::*;
        use test_case::test_case;

        #[test_case(mysql_column_type::MYSQL_TYPE_VAR_STRING, ValueKind::Text; "var string")]
        #[test_case(mysql_column_type::MYSQL_TYPE_BLOB, ValueKind::Text; "blob")]
        #[test_case(mysql_column_type::MYSQL_TYPE_JSON, ValueKind::Text; "json")]
        #[test_case(mysql_column_type::MYSQL_TYPE_LONG, ValueKind::Integer; "long")]
        #[test_case(mysql_column_type::MYSQL_TYPE_LONGLONG, ValueKind::Integer; "long long")]
        #[test_case(mysql_column_type::MYSQL_TYPE_FLOAT, ValueKind::Float; "float")]
        #[test_case(mysql_column_type::MYSQL_TYPE_DOUBLE, ValueKind::Float; "double")]
        #[test_case(mysql_column_type::MYSQL_TYPE_NEWDECIMAL, ValueKind::Decimal; "new decimal")]
        #[test_case(mysql_column_type::MYSQL_TYPE_DATE, ValueKind::Date; "date")]
        #[test_case(mysql_column_type::MYSQL_TYPE_DATETIME, ValueKind::DateTime; "datetime")]
        #[test_case(mysql_column_type::MYSQL_TYPE_TIMESTAMP, ValueKind::DateTime; "timestamp")]
        #[test_case(mysql_column_type::MYSQL_TYPE_TIME, ValueKind::Time; "time")]
        #[test_case(mysql_column_type::MYSQL_TYPE_BIT, ValueKind::Opaque; "bit")]
        #[test_case(mysql_column_type::MYSQL_TYPE_GEOMETRY, ValueKind::Opaque; "geometry")]
        fn from_mysql_type(column_type: mysql_column_type, expected: ValueKind) {
            assert_eq!(ValueKind::from_mysql_type(column_type), expected);
        }
    }

    mod convert {
        use super::*;
        use mysql_async::Value as MysqlValue;
        use test_case::test_case;

        fn column(column_type: mysql_column_type) -> ColumnData {
            ColumnData::new(String::from("testing"), column_type)
        }

        #[test_case(mysql_column_type::MYSQL_TYPE_VAR_STRING, MysqlValue::NULL, Value::Null; "null text")]
        #[test_case(mysql_column_type::MYSQL_TYPE_LONG, MysqlValue::NULL, Value::Null; "null integer")]
        #[test_case(mysql_column_type::MYSQL_TYPE_VAR_STRING, MysqlValue::Bytes(b"O'Brien".to_vec()), Value::Text("O'Brien".into()); "text")]
        #[test_case(mysql_column_type::MYSQL_TYPE_BLOB, MysqlValue::Bytes(vec![0xff, 0x00]), Value::Other("0xFF00".into()); "binary blob")]
        #[test_case(mysql_column_type::MYSQL_TYPE_LONG, MysqlValue::Int(-5), Value::Number("-5".into()); "int")]
        #[test_case(mysql_column_type::MYSQL_TYPE_LONGLONG, MysqlValue::UInt(18446744073709551615), Value::Number("18446744073709551615".into()); "unsigned long long")]
        #[test_case(mysql_column_type::MYSQL_TYPE_DOUBLE, MysqlValue::Double(2.5), Value::Number("2.5".into()); "double")]
        #[test_case(mysql_column_type::MYSQL_TYPE_LONG, MysqlValue::Bytes(b"12".to_vec()), Value::Number("12".into()); "integer as text")]
        #[test_case(mysql_column_type::MYSQL_TYPE_NEWDECIMAL, MysqlValue::Bytes(b"1050.20".to_vec()), Value::Number("1050.20".into()); "decimal keeps scale")]
        #[test_case(mysql_column_type::MYSQL_TYPE_DATE, MysqlValue::Date(2024, 2, 29, 0, 0, 0, 0), Value::Other("2024-02-29".into()); "date")]
        #[test_case(mysql_column_type::MYSQL_TYPE_DATETIME, MysqlValue::Date(2024, 2, 29, 13, 5, 9, 0), Value::Other("2024-02-29 13:05:09".into()); "datetime")]
        #[test_case(mysql_column_type::MYSQL_TYPE_DATETIME, MysqlValue::Date(2024, 2, 29, 13, 5, 9, 120), Value::Other("2024-02-29 13:05:09.000120".into()); "datetime micros")]
        #[test_case(mysql_column_type::MYSQL_TYPE_DATETIME, MysqlValue::Date(0, 0, 0, 0, 0, 0, 0), Value::Other("0000-00-00 00:00:00".into()); "zero datetime")]
        #[test_case(mysql_column_type::MYSQL_TYPE_TIME, MysqlValue::Time(true, 1, 2, 3, 4, 0), Value::Other("-26:03:04".into()); "negative time")]
        fn known(column_type: mysql_column_type, value: MysqlValue, expected: Value) {
            assert_eq!(column(column_type).convert(value).unwrap(), expected);
        }

        #[test_case(b"1.123456789012345678901234567890", "1.123456789012345678901234567890"; "scale thirty")]
        #[test_case(b"12345678901234567890123456789012.50", "12345678901234567890123456789012.50"; "thirty two digit integer part")]
        #[test_case(b"-0.000000000000000000000000000001", "-0.000000000000000000000000000001"; "tiny negative")]
        fn wide_decimal_is_kept_verbatim(bytes: &[u8], expected: &str) {
            let value = column(mysql_column_type::MYSQL_TYPE_NEWDECIMAL)
                .convert(MysqlValue::Bytes(bytes.to_vec()))
                .unwrap();
            assert_eq!(value, Value::Number(expected.to_string()));
        }

        #[test]
        fn invalid_decimal() {
            let result = column(mysql_column_type::MYSQL_TYPE_NEWDECIMAL)
                .convert(MysqlValue::Bytes(b"twelve".to_vec()));
            assert!(result.is_err());
        }

        #[test]
        fn non_numeric_integer() {
            let result = column(mysql_column_type::MYSQL_TYPE_LONG)
                .convert(MysqlValue::Bytes(b"1; DROP".to_vec()));
            assert!(result.is_err());
        }
    }
}
