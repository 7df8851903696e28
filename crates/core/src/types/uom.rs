//! Unit-of-measure mapping table.
//!
//! The inventory service uses short, locale-specific unit codes (`BUC`, `SAC`,
//! `MP`, ...). They are normalized to a fixed set of canonical unit ids before
//! anything leaves the synchronizer. No conversion between units is ever
//! performed.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned for a unit code missing from the mapping table.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown unit of measure: {0}")]
pub struct UnknownUnitError(pub String);

/// Canonical unit of measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitOfMeasure {
    /// Countable pieces, packs, sets, pallets, sacks...
    Each,
    Kilogram,
    MetricTon,
    Kilometer,
    Meter,
    SquareMeter,
    CubicMeter,
    Liter,
    Hour,
}

impl UnitOfMeasure {
    /// Map an inventory unit code through the table.
    ///
    /// # Errors
    ///
    /// Returns `UnknownUnitError` if the code is not in the table.
    pub fn parse(code: &str) -> Result<Self, UnknownUnitError> {
        let unit = match code.trim().to_uppercase().as_str() {
            "BAX" | "CUT" | "PAC" | "SET" | "SUL" | "BUC" | "LEI" | "PAL" | "PLACA" | "PER"
            | "PRET" | "RAND" | "SAC" => Self::Each,
            "KG" => Self::Kilogram,
            "KM" => Self::Kilometer,
            "L" => Self::Liter,
            "M" | "ML" => Self::Meter,
            "MC" => Self::CubicMeter,
            "MP" | "M2" => Self::SquareMeter,
            "ORE" => Self::Hour,
            "T" | "TO" => Self::MetricTon,
            _ => return Err(UnknownUnitError(code.to_string())),
        };
        Ok(unit)
    }

    /// Canonical unit id shared with downstream systems.
    #[must_use]
    pub const fn canonical_id(&self) -> &'static str {
        match self {
            Self::Each => "OTH_ea",
            Self::Kilogram => "WT_kg",
            Self::MetricTon => "WT_mt",
            Self::Kilometer => "LEN_km",
            Self::Meter => "LEN_m",
            Self::SquareMeter => "AREA_m2",
            Self::CubicMeter => "VDRY_m3",
            Self::Liter => "VLIQ_L",
            Self::Hour => "TF_hr",
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_id())
    }
}

impl FromStr for UnitOfMeasure {
    type Err = UnknownUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_codes_map_to_each() {
        for code in ["BUC", "buc", "SAC", "PAL", "SET"] {
            assert_eq!(UnitOfMeasure::parse(code).unwrap(), UnitOfMeasure::Each);
        }
    }

    #[test]
    fn test_area_codes() {
        assert_eq!(UnitOfMeasure::parse("mp").unwrap(), UnitOfMeasure::SquareMeter);
        assert_eq!(UnitOfMeasure::parse("M2").unwrap(), UnitOfMeasure::SquareMeter);
        assert_eq!(UnitOfMeasure::SquareMeter.canonical_id(), "AREA_m2");
    }

    #[test]
    fn test_weight_and_volume_codes() {
        assert_eq!("KG".parse::<UnitOfMeasure>().unwrap().to_string(), "WT_kg");
        assert_eq!("TO".parse::<UnitOfMeasure>().unwrap().to_string(), "WT_mt");
        assert_eq!("L".parse::<UnitOfMeasure>().unwrap().to_string(), "VLIQ_L");
        assert_eq!("MC".parse::<UnitOfMeasure>().unwrap().to_string(), "VDRY_m3");
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = UnitOfMeasure::parse("GALLON").unwrap_err();
        assert_eq!(err.to_string(), "unknown unit of measure: GALLON");
    }
}
