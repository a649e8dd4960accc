//! Schema-driven argument coercion.
//!
//! An untyped JSON argument map is checked against a [`ToolSchema`] and
//! turned into typed values, then into per-tool argument structs. Every
//! failure is an [`AppError::Validation`].

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{
    error::{AppError, Result},
    tools::registry::{ParamType, ToolSchema},
    types::{float_to_wire, LimitOrder, Side, TimeInForce},
};

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

/// Arguments coerced against a tool schema.
///
/// Holds only declared parameters that were present; undeclared arguments
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoercedArgs {
    values: HashMap<&'static str, ArgValue>,
}

impl CoercedArgs {
    /// Coerce `arguments` against `schema`.
    ///
    /// `null` counts as absent. Missing required parameters and values of the
    /// wrong type are rejected.
    pub fn coerce(schema: &ToolSchema, arguments: &Map<String, Value>) -> Result<Self> {
        let mut values = HashMap::new();

        for param in schema.parameters {
            match arguments.get(param.name) {
                None | Some(Value::Null) => {
                    if param.required {
                        return Err(AppError::Validation(format!(
                            "Missing required parameter '{}'.",
                            param.name
                        )));
                    }
                }
                Some(value) => {
                    values.insert(param.name, coerce_value(param.name, param.param_type, value)?);
                }
            }
        }

        Ok(Self { values })
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ArgValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ArgValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    fn required_string(&self, name: &str) -> Result<&str> {
        self.string(name).ok_or_else(|| missing(name))
    }

    fn required_number(&self, name: &str) -> Result<f64> {
        self.number(name).ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> AppError {
    AppError::Validation(format!("Missing required parameter '{}'.", name))
}

fn coerce_value(name: &str, param_type: ParamType, value: &Value) -> Result<ArgValue> {
    let coerced = match (param_type, value) {
        (ParamType::String, Value::String(s)) => Some(ArgValue::String(s.clone())),
        (ParamType::Number, Value::Number(n)) => n.as_f64().map(ArgValue::Number),
        (ParamType::Number, Value::String(s)) => s.trim().parse::<f64>().ok().map(ArgValue::Number),
        (ParamType::Boolean, Value::Bool(b)) => Some(ArgValue::Boolean(*b)),
        (ParamType::Boolean, Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Some(ArgValue::Boolean(true)),
            "false" => Some(ArgValue::Boolean(false)),
            _ => None,
        },
        _ => None,
    };

    coerced.ok_or_else(|| {
        let expected = match param_type {
            ParamType::String => "a string",
            ParamType::Number => "a number",
            ParamType::Boolean => "a boolean",
        };
        AppError::Validation(format!("Parameter '{}' must be {}, got {}.", name, expected, value))
    })
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::Validation(format!("Parameter '{}' must be a positive number.", name)))
    }
}

/// A positive number the exchange can carry as a decimal string.
fn wire_number(name: &str, value: f64) -> Result<f64> {
    let value = positive(name, value)?;
    float_to_wire(value).map_err(|e| {
        AppError::Validation(format!("Parameter '{}' cannot be sent as a price or size: {}.", name, e))
    })?;
    Ok(value)
}

/// Typed arguments of `place_limit_order`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceLimitOrderArgs {
    pub coin: String,
    pub side: Side,
    pub size: f64,
    pub limit_price: f64,
    pub time_in_force: TimeInForce,
    pub reduce_only: bool,
}

impl TryFrom<&CoercedArgs> for PlaceLimitOrderArgs {
    type Error = AppError;

    fn try_from(args: &CoercedArgs) -> Result<Self> {
        let coin = args.required_string("coin")?;
        if coin.is_empty() {
            return Err(AppError::Validation("Parameter 'coin' must not be empty.".to_string()));
        }

        let side = args.required_string("side")?.parse::<Side>().map_err(AppError::Validation)?;

        let time_in_force = args
            .string("time_in_force")
            .map(|s| s.parse::<TimeInForce>().map_err(AppError::Validation))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            coin: coin.to_string(),
            side,
            size: wire_number("size", args.required_number("size")?)?,
            limit_price: wire_number("limit_price", args.required_number("limit_price")?)?,
            time_in_force,
            reduce_only: args.boolean("reduce_only").unwrap_or(false),
        })
    }
}

impl From<PlaceLimitOrderArgs> for LimitOrder {
    fn from(args: PlaceLimitOrderArgs) -> Self {
        LimitOrder {
            coin: args.coin,
            side: args.side,
            size: args.size,
            limit_price: args.limit_price,
            time_in_force: args.time_in_force,
            reduce_only: args.reduce_only,
        }
    }
}
