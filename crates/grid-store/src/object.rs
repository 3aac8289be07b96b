use serde::{Deserialize, Serialize};

use grid_types::Pointer;

/// The payload callers save into a store and the argument/return currency
/// of remote invocation.
///
/// Values are self-describing so the store never needs to interpret them;
/// it moves them between messages and the table untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ObjectValue {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<ObjectValue>),
}

impl ObjectValue {
    /// Short name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
        }
    }
}

impl From<bool> for ObjectValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ObjectValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ObjectValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ObjectValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for ObjectValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for ObjectValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

/// One entry in a node's object store.
///
/// An entry either owns a value locally (with an optional cached framework
/// type path used for method resolution), or merely points at an object
/// owned elsewhere. The remote form is what a worker encounters when a
/// caller saved a pointer under a fresh uid; dispatch refuses to chase such
/// entries beyond a single local hop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StoredObject {
    /// A locally owned value.
    Value {
        value: ObjectValue,
        type_path: Option<String>,
    },
    /// An entry that points at an object owned by some node's store.
    Remote(Pointer),
}

impl StoredObject {
    /// An owned value with no type information.
    pub fn value(value: impl Into<ObjectValue>) -> Self {
        Self::Value {
            value: value.into(),
            type_path: None,
        }
    }

    /// An owned value carrying its framework type path.
    pub fn typed(value: impl Into<ObjectValue>, type_path: impl Into<String>) -> Self {
        Self::Value {
            value: value.into(),
            type_path: Some(type_path.into()),
        }
    }

    /// An indirection entry.
    pub fn remote(pointer: Pointer) -> Self {
        Self::Remote(pointer)
    }

    /// Returns `true` for indirection entries.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// The owned value, if this entry holds one.
    pub fn as_value(&self) -> Option<&ObjectValue> {
        match self {
            Self::Value { value, .. } => Some(value),
            Self::Remote(_) => None,
        }
    }

    /// The cached framework type path, if any.
    pub fn type_path(&self) -> Option<&str> {
        match self {
            Self::Value { type_path, .. } => type_path.as_deref(),
            Self::Remote(pointer) => pointer.type_path.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use grid_types::{NodeId, Uid};

    use super::*;

    #[test]
    fn value_entry_accessors() {
        let obj = StoredObject::value(42i64);
        assert!(!obj.is_remote());
        assert_eq!(obj.as_value(), Some(&ObjectValue::Int(42)));
        assert_eq!(obj.type_path(), None);
    }

    #[test]
    fn typed_entry_carries_path() {
        let obj = StoredObject::typed(ObjectValue::List(vec![]), "tensorlib.Tensor");
        assert_eq!(obj.type_path(), Some("tensorlib.Tensor"));
    }

    #[test]
    fn remote_entry_has_no_value() {
        let ptr = Pointer::new(Uid::generate(), NodeId::new("elsewhere")).with_type("lib.T");
        let obj = StoredObject::remote(ptr);
        assert!(obj.is_remote());
        assert!(obj.as_value().is_none());
        assert_eq!(obj.type_path(), Some("lib.T"));
    }

    #[test]
    fn value_conversions() {
        assert_eq!(ObjectValue::from(true), ObjectValue::Bool(true));
        assert_eq!(ObjectValue::from(7i64), ObjectValue::Int(7));
        assert_eq!(ObjectValue::from("hi"), ObjectValue::Text("hi".into()));
        assert_eq!(ObjectValue::from(vec![1u8, 2]), ObjectValue::Bytes(vec![1, 2]));
    }

    #[test]
    fn type_names() {
        assert_eq!(ObjectValue::Unit.type_name(), "unit");
        assert_eq!(ObjectValue::Float(1.0).type_name(), "float");
        assert_eq!(ObjectValue::List(vec![]).type_name(), "list");
    }

    #[test]
    fn serde_roundtrip() {
        let obj = StoredObject::typed(
            ObjectValue::List(vec![ObjectValue::Int(1), ObjectValue::Text("x".into())]),
            "lib.Seq",
        );
        let json = serde_json::to_string(&obj).unwrap();
        let parsed: StoredObject = serde_json::from_str(&json).unwrap();
        assert_eq!(obj, parsed);
    }
}
