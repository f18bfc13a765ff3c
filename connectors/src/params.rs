//! Parameter parsing shared by the connectors.

use chain_types::{Amount, AssetRef, ReferenceData, ReferenceRow};

use crate::error::ConnectorError;

pub(crate) fn parse_amount(parameter: &'static str, value: &str) -> Result<Amount, ConnectorError> {
    value
        .parse::<Amount>()
        .map_err(|e| ConnectorError::InvalidInput {
            parameter,
            reason: e.to_string(),
        })
}

/// Alias wins when non-empty, else the id; one of the two is required.
pub(crate) fn require_asset(
    parameter: &'static str,
    alias: Option<&str>,
    id: Option<&str>,
) -> Result<AssetRef, ConnectorError> {
    AssetRef::select(alias, id).ok_or_else(|| ConnectorError::InvalidInput {
        parameter,
        reason: "an asset alias or an asset id is required".to_string(),
    })
}

/// Reference data from host rows. Rows that are not `[name, value]` pairs
/// are dropped.
pub(crate) fn reference_data(rows: &[ReferenceRow]) -> ReferenceData {
    let data = ReferenceData::from_rows(rows);
    let skipped = rows.iter().filter(|row| row.len() != 2).count();
    if skipped > 0 {
        tracing::warn!(skipped, "ignoring reference data rows that are not name/value pairs");
    }
    data
}
