//! Market data types.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Mid prices keyed by coin symbol.
pub type MidPrices = BTreeMap<String, f64>;

/// One record of the mid-price feed. Either field may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MidRecord {
    #[serde(default)]
    pub coin: Option<String>,
    /// Mid price, string-encoded.
    #[serde(default)]
    pub mid: Option<String>,
}

impl MidRecord {
    pub fn new(coin: impl Into<String>, mid: impl Into<String>) -> Self {
        Self { coin: Some(coin.into()), mid: Some(mid.into()) }
    }
}

/// Response of the `allMids` info request.
///
/// The public API answers with a `{coin: mid}` object; a record sequence is
/// accepted as well.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AllMidsResponse {
    Records(Vec<MidRecord>),
    Map(HashMap<String, String>),
}

impl AllMidsResponse {
    pub fn into_records(self) -> Vec<MidRecord> {
        match self {
            AllMidsResponse::Records(records) => records,
            AllMidsResponse::Map(map) => {
                map.into_iter().map(|(coin, mid)| MidRecord::new(coin, mid)).collect()
            }
        }
    }
}

/// One entry of the perpetuals universe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMeta {
    pub name: String,
    #[serde(default)]
    pub sz_decimals: u32,
}

/// Response of the `meta` info request.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaResponse {
    pub universe: Vec<AssetMeta>,
}

impl MetaResponse {
    /// Map coin symbol to asset index (its position in the universe).
    pub fn asset_index(&self) -> HashMap<String, u32> {
        self.universe.iter().zip(0u32..).map(|(asset, index)| (asset.name.clone(), index)).collect()
    }
}

/// Build the mid-price map from feed records.
///
/// Records without a coin or without a price are skipped. A price that does
/// not parse as a number is an error.
pub fn collect_mids(records: Vec<MidRecord>) -> Result<MidPrices, String> {
    let mut mids = MidPrices::new();
    for record in records {
        let (Some(coin), Some(mid)) = (record.coin, record.mid) else {
            continue;
        };
        let price = mid
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid mid price '{}' for {}: {}", mid, coin, e))?;
        if !price.is_finite() {
            return Err(format!("Invalid mid price '{}' for {}: not a finite number", mid, coin));
        }
        mids.insert(coin, price);
    }
    Ok(mids)
}
