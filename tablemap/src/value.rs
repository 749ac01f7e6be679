use std::error::Error;
use tokio_postgres::types::{
    private::BytesMut, to_sql_checked, IsNull, ToSql as ToSqlItem, Type,
};

#[cfg(feature = "with-chrono-0_4")]
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// An owned snapshot of a single field value, ready to be bound to a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Text(String),
    Bytes(Vec<u8>),
    #[cfg(feature = "with-chrono-0_4")]
    Date(NaiveDate),
    #[cfg(feature = "with-chrono-0_4")]
    Time(NaiveTime),
    #[cfg(feature = "with-chrono-0_4")]
    Timestamp(NaiveDateTime),
    #[cfg(feature = "with-chrono-0_4")]
    TimestampTz(DateTime<Utc>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Converts a field into a [`Value`].
///
/// Implemented for every type that can appear as a field of a `#[derive(Record)]` struct.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

macro_rules! impl_to_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

// Postgres has no unsigned integers, so they widen to the next signed type.
impl_to_value! {
    bool => Bool,
    i8 => I16,
    u8 => I16,
    i16 => I16,
    u16 => I32,
    i32 => I32,
    u32 => I64,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

#[cfg(feature = "with-chrono-0_4")]
impl_to_value! {
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for [u8] {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl ToSqlItem for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(value) => value.to_sql_checked(ty, out),
            Value::I16(value) => match *ty {
                Type::INT4 => i32::from(*value).to_sql_checked(ty, out),
                Type::INT8 => i64::from(*value).to_sql_checked(ty, out),
                _ => value.to_sql_checked(ty, out),
            },
            Value::I32(value) => match *ty {
                Type::INT8 => i64::from(*value).to_sql_checked(ty, out),
                _ => value.to_sql_checked(ty, out),
            },
            Value::I64(value) => value.to_sql_checked(ty, out),
            Value::F32(value) => match *ty {
                Type::FLOAT8 => f64::from(*value).to_sql_checked(ty, out),
                _ => value.to_sql_checked(ty, out),
            },
            Value::F64(value) => value.to_sql_checked(ty, out),
            Value::Text(value) => value.to_sql_checked(ty, out),
            Value::Bytes(value) => value.to_sql_checked(ty, out),
            #[cfg(feature = "with-chrono-0_4")]
            Value::Date(value) => value.to_sql_checked(ty, out),
            #[cfg(feature = "with-chrono-0_4")]
            Value::Time(value) => value.to_sql_checked(ty, out),
            #[cfg(feature = "with-chrono-0_4")]
            Value::Timestamp(value) => value.to_sql_checked(ty, out),
            #[cfg(feature = "with-chrono-0_4")]
            Value::TimestampTz(value) => value.to_sql_checked(ty, out),
        }
    }

    // Type checking is delegated to the wrapped value in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn options_map_to_null() {
        let missing: Option<i32> = None;
        assert_eq!(missing.to_value(), Value::Null);
        assert_eq!(Some(3i32).to_value(), Value::I32(3));
        assert!(Value::from(None::<String>).is_null());
    }

    #[test]
    fn unsigned_integers_widen() {
        assert_eq!(7u8.to_value(), Value::I16(7));
        assert_eq!(7u16.to_value(), Value::I32(7));
        assert_eq!(u32::MAX.to_value(), Value::I64(u32::MAX as i64));
    }

    #[test]
    fn text_and_bytes_are_copied() {
        let name = String::from("apple");
        let value = name.to_value();
        drop(name);
        assert_eq!(value, Value::Text("apple".into()));
        assert_eq!("pear".to_value(), Value::Text("pear".into()));
        assert_eq!(vec![1u8, 2].to_value(), Value::Bytes(vec![1, 2]));
    }

    #[test]
    fn integers_widen_to_column_type() {
        let mut out = BytesMut::new();
        let is_null = Value::I32(7).to_sql_checked(&Type::INT8, &mut out).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&out[..], &7i64.to_be_bytes()[..]);
    }

    #[test]
    fn mismatched_types_are_rejected() {
        let mut out = BytesMut::new();
        assert!(Value::Text("a".into())
            .to_sql_checked(&Type::INT4, &mut out)
            .is_err());
    }

    #[test]
    fn null_binds_as_sql_null() {
        let mut out = BytesMut::new();
        let is_null = Value::Null.to_sql_checked(&Type::TEXT, &mut out).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(out.is_empty());
    }
}
