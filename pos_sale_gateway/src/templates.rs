//! The generic response shapes returned to POS clients.
//!
//! Each response starts from a fixed template, compiled into the binary, and the handler fills in the live fields.
use serde::Serialize;
use serde_json::Value;

use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Inventory,
    CreateSale,
    SaleStatus,
    CancelSale,
}

impl Template {
    fn source(&self) -> &'static str {
        match self {
            Self::Inventory => include_str!("../templates/generic/get-inventory-success.json"),
            Self::CreateSale => include_str!("../templates/generic/create-sale-success.json"),
            Self::SaleStatus => include_str!("../templates/generic/get-by-id-success.json"),
            Self::CancelSale => include_str!("../templates/generic/cancel-sale-success.json"),
        }
    }

    /// A fresh copy of the template
    pub fn load(&self) -> Result<GenericResponse, ServerError> {
        let value = serde_json::from_str::<Value>(self.source())
            .map_err(|e| ServerError::TemplateError(format!("{self:?}: {e}")))?;
        if value.is_object() {
            Ok(GenericResponse(value))
        } else {
            Err(ServerError::TemplateError(format!("{self:?} is not a JSON object")))
        }
    }
}

/// A response built from a [`Template`]. Always a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericResponse(Value);

impl GenericResponse {
    /// Replace the whole `data` member.
    pub fn set_data<T: Serialize>(&mut self, data: T) -> Result<(), ServerError> {
        let data = to_value(data)?;
        match self.0.as_object_mut() {
            Some(obj) => {
                obj.insert("data".to_string(), data);
                Ok(())
            },
            None => Err(ServerError::TemplateError("the response is not a JSON object".into())),
        }
    }

    /// Set one field of the `data` object.
    pub fn set_data_field<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), ServerError> {
        let value = to_value(value)?;
        let data = self
            .0
            .get_mut("data")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| ServerError::TemplateError("`data` is not an object".into()))?;
        data.insert(key.to_string(), value);
        Ok(())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ServerError> {
    serde_json::to_value(value).map_err(|e| ServerError::TemplateError(e.to_string()))
}
