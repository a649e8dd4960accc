//! Tool catalog.
//!
//! Every tool the dispatcher can execute is a [`ToolKind`] variant, and every
//! schema is derived from one, so the listed tools and the executable tools
//! cannot drift apart.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Declared type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
}

/// One declared tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolParameter {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub required: bool,
    pub description: &'static str,
}

impl ToolParameter {
    const fn required(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self { name, param_type, required: true, description }
    }

    const fn optional(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self { name, param_type, required: false, description }
    }
}

/// Name, description and ordered parameters of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ToolParameter],
}

impl ToolSchema {
    /// JSON Schema object describing the tool's arguments.
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|param| {
                let schema = match param.name {
                    "side" => json!({
                        "type": param.param_type,
                        "enum": ["buy", "sell"],
                        "description": param.description,
                    }),
                    "time_in_force" => json!({
                        "type": param.param_type,
                        "enum": ["Gtc", "Ioc", "Alo"],
                        "default": "Gtc",
                        "description": param.description,
                    }),
                    _ => json!({"type": param.param_type, "description": param.description}),
                };
                (param.name.to_string(), schema)
            })
            .collect();

        let required: Vec<&str> =
            self.parameters.iter().filter(|param| param.required).map(|param| param.name).collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(required));
        schema
    }
}

const GET_ALL_MIDS_PARAMS: &[ToolParameter] = &[];

const PLACE_LIMIT_ORDER_PARAMS: &[ToolParameter] = &[
    ToolParameter::required("coin", ParamType::String, "Coin symbol, e.g. BTC"),
    ToolParameter::required("side", ParamType::String, "'buy' or 'sell' (case-insensitive)"),
    ToolParameter::required("size", ParamType::Number, "Order size in base units"),
    ToolParameter::required("limit_price", ParamType::Number, "Limit price"),
    ToolParameter::optional("time_in_force", ParamType::String, "'Gtc' (default), 'Ioc' or 'Alo'"),
    ToolParameter::optional("reduce_only", ParamType::Boolean, "Only reduce an existing position (default false)"),
];

/// Tools known to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    GetAllMids,
    PlaceLimitOrder,
}

impl ToolKind {
    /// All tools, in listing order.
    pub const ALL: [ToolKind; 2] = [ToolKind::GetAllMids, ToolKind::PlaceLimitOrder];

    pub fn name(self) -> &'static str {
        self.schema().name
    }

    pub fn schema(self) -> ToolSchema {
        match self {
            ToolKind::GetAllMids => ToolSchema {
                name: "get_all_mids",
                description: "Asynchronously fetch all available coins' mid prices from Hyperliquid. Returns coin symbols and their prices.",
                parameters: GET_ALL_MIDS_PARAMS,
            },
            ToolKind::PlaceLimitOrder => ToolSchema {
                name: "place_limit_order",
                description: "Asynchronously place a limit order on Hyperliquid. Requires the coin symbol, side ('buy'/'sell'), size, and a limit price.",
                parameters: PLACE_LIMIT_ORDER_PARAMS,
            },
        }
    }

    /// Resolve a tool by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

/// Schemas of all registered tools, in a fixed order.
pub fn list_tools() -> Vec<ToolSchema> {
    ToolKind::ALL.into_iter().map(ToolKind::schema).collect()
}
