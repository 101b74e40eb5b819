//! Unit categories and their per-category operation table.

use std::fmt;
use std::str::FromStr;

use strum_macros::EnumIter as EnumIterMacro;

use super::operation::{Operation, OperationKind, OperationSet};

/// Unit type categories known to the registry.
///
/// Each category maps to the canonical German name the registry uses in the
/// `Einheittyp` column of the master listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum UnitCategory {
    /// `Windeinheit`
    Wind,
    /// `Solareinheit`
    Solar,
    /// `Biomasse`
    Biomass,
    /// `Wasser`
    Hydro,
    /// `Geothermie`
    Geothermal,
    /// `Gaserzeugungseinheit`
    GasProducer,
    /// `Gasverbrauchseinheit`
    GasConsumer,
    /// `Gasspeichereinheit`
    GasStorage,
    /// `Kernenergie`
    Nuclear,
    /// `Stromspeichereinheit`
    ElectricityStorage,
    /// `Stromverbrauchseinheit`
    ElectricityConsumer,
    /// `Verbrennung`
    Combustion,
}

impl UnitCategory {
    /// Canonical registry name (`Einheittyp` value).
    pub fn canonical_name(&self) -> &'static str {
        match self {
            UnitCategory::Wind => "Windeinheit",
            UnitCategory::Solar => "Solareinheit",
            UnitCategory::Biomass => "Biomasse",
            UnitCategory::Hydro => "Wasser",
            UnitCategory::Geothermal => "Geothermie",
            UnitCategory::GasProducer => "Gaserzeugungseinheit",
            UnitCategory::GasConsumer => "Gasverbrauchseinheit",
            UnitCategory::GasStorage => "Gasspeichereinheit",
            UnitCategory::Nuclear => "Kernenergie",
            UnitCategory::ElectricityStorage => "Stromspeichereinheit",
            UnitCategory::ElectricityConsumer => "Stromverbrauchseinheit",
            UnitCategory::Combustion => "Verbrennung",
        }
    }

    /// Returns the remote operations this category supports.
    ///
    /// The unit operation is always present. EEG data exists only for the
    /// renewable categories, location data for everything except nuclear and
    /// gas storage units, and CHP data only for biomass.
    pub fn operations(&self) -> OperationSet {
        use UnitCategory::*;

        let unit = match self {
            Wind => Operation::new(OperationKind::Unit, "GetEinheitWind"),
            Solar => Operation::new(OperationKind::Unit, "GetEinheitSolar"),
            Biomass => Operation::new(OperationKind::Unit, "GetEinheitBiomasse"),
            Hydro => Operation::new(OperationKind::Unit, "GetEinheitWasser"),
            Geothermal => Operation::new(
                OperationKind::Unit,
                "GetEinheitGeoSolarthermieGrubenKlaerschlamm",
            ),
            GasProducer => Operation::new(OperationKind::Unit, "GetEinheitGasErzeuger"),
            GasConsumer => Operation::new(OperationKind::Unit, "GetEinheitGasVerbraucher"),
            GasStorage => Operation::new(OperationKind::Unit, "GetEinheitGasSpeicher"),
            Nuclear => Operation::new(OperationKind::Unit, "GetEinheitKernkraft"),
            ElectricityStorage => Operation::new(OperationKind::Unit, "GetEinheitStromSpeicher"),
            ElectricityConsumer => {
                Operation::new(OperationKind::Unit, "GetEinheitStromVerbraucher")
            }
            Combustion => Operation::new(OperationKind::Unit, "GetEinheitVerbrennung"),
        };

        let feed_in_tariff = match self {
            Wind => Some("GetAnlageEegWind"),
            Solar => Some("GetAnlageEegSolar"),
            Biomass => Some("GetAnlageEegBiomasse"),
            Hydro => Some("GetAnlageEegWasser"),
            Geothermal => Some("GetAnlageEegGeoSolarthermieGrubenKlaerschlamm"),
            _ => None,
        }
        .map(|name| Operation::new(OperationKind::FeedInTariff, name));

        let location = match self {
            Wind | Solar | Biomass | Hydro | Geothermal | ElectricityStorage | Combustion => {
                Some("GetLokationStromErzeuger")
            }
            GasProducer => Some("GetLokationGasErzeuger"),
            GasConsumer => Some("GetLokationGasVerbraucher"),
            ElectricityConsumer => Some("GetLokationStromVerbraucher"),
            GasStorage | Nuclear => None,
        }
        .map(|name| Operation::new(OperationKind::Location, name));

        let combined_heat_power = match self {
            Biomass => Some(Operation::new(
                OperationKind::CombinedHeatPower,
                "GetAnlageKwk",
            )),
            _ => None,
        };

        OperationSet {
            unit,
            feed_in_tariff,
            location,
            combined_heat_power,
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Error returned when a string names no known unit category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown unit category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for UnitCategory {
    type Err = UnknownCategory;

    /// Accepts the canonical registry name or the English variant name,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use strum::IntoEnumIterator;

        let needle = s.trim();
        UnitCategory::iter()
            .find(|category| {
                category.canonical_name().eq_ignore_ascii_case(needle)
                    || format!("{:?}", category).eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
