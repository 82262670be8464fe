//! Length conversion used to place the bottom of the borehole.

/// Converts a length expressed in some unit to meters.
///
/// Returns `None` when the unit is unknown to the converter.
pub trait UnitConverter: Send + Sync {
    /// Converts `value` in `unit` to meters.
    fn to_meters(&self, value: f64, unit: &str) -> Option<f64>;
}

/// Metric and imperial length units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthUnits;

impl LengthUnits {
    /// Meters per unit, if the unit is known.
    pub fn factor(unit: &str) -> Option<f64> {
        let factor = match unit.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => 1.0,
            "km" => 1000.0,
            "cm" => 0.01,
            "mm" => 0.001,
            "ft" | "feet" | "foot" => 0.3048,
            "in" | "inch" | "inches" | "\"" => 0.0254,
            "yd" | "yard" | "yards" => 0.9144,
            _ => return None,
        };
        Some(factor)
    }
}

impl UnitConverter for LengthUnits {
    fn to_meters(&self, value: f64, unit: &str) -> Option<f64> {
        Self::factor(unit).map(|f| value * f)
    }
}
