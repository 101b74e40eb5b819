//! Remote operation kinds and the operation handles stored in the dispatch table.

use std::fmt;
use std::str::FromStr;

use strum_macros::EnumIter as EnumIterMacro;

/// The four kinds of detail records the registry serves for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro)]
pub enum OperationKind {
    /// Base unit data (`Einheit`)
    Unit,
    /// EEG feed-in-tariff data (`AnlageEEG`)
    FeedInTariff,
    /// Site/location data (`Lokation`)
    Location,
    /// Combined-heat-and-power data (`AnlageKwk`)
    CombinedHeatPower,
}

impl OperationKind {
    /// Registry name of the record kind, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Unit => "Einheit",
            OperationKind::FeedInTariff => "AnlageEEG",
            OperationKind::Location => "Lokation",
            OperationKind::CombinedHeatPower => "AnlageKwk",
        }
    }

    /// Name of the SOAP request parameter carrying the target identifier.
    pub fn target_parameter(&self) -> &'static str {
        match self {
            OperationKind::Unit => "einheitMastrNummer",
            OperationKind::FeedInTariff => "eegMastrNummer",
            OperationKind::Location => "lokationMastrNummer",
            OperationKind::CombinedHeatPower => "kwkMastrNummer",
        }
    }

    /// Field of a unit record holding the identifier for this kind.
    ///
    /// `None` for [`OperationKind::Unit`], which is keyed by the worklist itself.
    pub fn cross_reference_field(&self) -> Option<&'static str> {
        match self {
            OperationKind::Unit => None,
            OperationKind::FeedInTariff => Some("EegMastrNummer"),
            OperationKind::Location => Some("LokationMastrNummer"),
            OperationKind::CombinedHeatPower => Some("KwkMastrNummer"),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "einheit" | "unit" => Ok(OperationKind::Unit),
            "anlageeeg" | "eeg" | "feedintariff" => Ok(OperationKind::FeedInTariff),
            "lokation" | "location" => Ok(OperationKind::Location),
            "anlagekwk" | "kwk" | "chp" => Ok(OperationKind::CombinedHeatPower),
            other => Err(format!(
                "unknown record kind '{other}' (expected Einheit, AnlageEEG, Lokation or AnlageKwk)"
            )),
        }
    }
}

/// A remote operation: the record kind plus the SOAP operation serving it.
///
/// Entries are plain data so the dispatch table can be built without a live
/// client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    /// Record kind served by the operation
    pub kind: OperationKind,
    /// SOAP operation name, e.g. `GetEinheitWind`
    pub name: &'static str,
}

impl Operation {
    /// Pairs a record kind with its SOAP operation name.
    pub const fn new(kind: OperationKind, name: &'static str) -> Self {
        Self { kind, name }
    }
}

/// Operations supported by one unit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSet {
    /// Unit detail operation, present for every category
    pub unit: Operation,
    /// EEG operation, renewable categories only
    pub feed_in_tariff: Option<Operation>,
    /// Location operation
    pub location: Option<Operation>,
    /// CHP operation
    pub combined_heat_power: Option<Operation>,
}

impl OperationSet {
    /// Looks up the operation for `kind`, or `None` if the category lacks it.
    pub fn get(&self, kind: OperationKind) -> Option<Operation> {
        match kind {
            OperationKind::Unit => Some(self.unit),
            OperationKind::FeedInTariff => self.feed_in_tariff,
            OperationKind::Location => self.location,
            OperationKind::CombinedHeatPower => self.combined_heat_power,
        }
    }

    /// Dependent operations in fetch order, skipping unsupported kinds.
    pub fn dependents(&self) -> impl Iterator<Item = Operation> {
        [self.feed_in_tariff, self.location, self.combined_heat_power]
            .into_iter()
            .flatten()
    }
}
