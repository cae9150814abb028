// Object-to-container adapter

use crate::errors::ValidationError;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Exposes an opaque type's fields as container data for path resolution.
///
/// The accessor priority chain is: an explicit `ValidationData` impl (the
/// validation-data accessor) wins; otherwise the serialization route via
/// [`from_serialize`] applies. A derived `Serialize` impl enumerates public
/// fields in declaration order, and a hand-written one plays the role of the
/// iteration/raw-field fallbacks.
pub trait ValidationData {
    fn validation_data(&self) -> Result<Value, ValidationError>;
}

/// Turn any serializable value into container data.
pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Result<Value, ValidationError> {
    serde_json::to_value(data).map_err(|e| ValidationError::Serialization(e.to_string()))
}

impl ValidationData for Value {
    fn validation_data(&self) -> Result<Value, ValidationError> {
        Ok(self.clone())
    }
}

impl ValidationData for serde_json::Map<String, Value> {
    fn validation_data(&self) -> Result<Value, ValidationError> {
        Ok(Value::Object(self.clone()))
    }
}

impl ValidationData for Vec<Value> {
    fn validation_data(&self) -> Result<Value, ValidationError> {
        Ok(Value::Array(self.clone()))
    }
}

impl<V: Serialize> ValidationData for HashMap<String, V> {
    fn validation_data(&self) -> Result<Value, ValidationError> {
        from_serialize(self)
    }
}

impl<V: Serialize> ValidationData for BTreeMap<String, V> {
    fn validation_data(&self) -> Result<Value, ValidationError> {
        from_serialize(self)
    }
}
