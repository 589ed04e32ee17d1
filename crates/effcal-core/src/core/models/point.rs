use std::fmt;

/// One measured (or synthesised) calibration point.
#[derive(Debug, Clone, PartialEq)]
pub struct EffPoint {
    pub energy: f64,     // Photon energy, keV
    pub efficiency: f64, // Full-energy peak efficiency
    pub deff: f64,       // Relative efficiency uncertainty, percent
    pub nuclide: String, // Source nuclide label (e.g., "Eu-152")
    pub area: f64,       // Peak area (or count rate)
    pub darea: f64,      // Peak area uncertainty
    pub intensity: f64,  // Gamma line intensity
}

impl EffPoint {
    pub fn new(
        energy: f64,
        efficiency: f64,
        deff: f64,
        nuclide: impl Into<String>,
        area: f64,
        darea: f64,
        intensity: f64,
    ) -> Self {
        Self {
            energy,
            efficiency,
            deff,
            nuclide: nuclide.into(),
            area,
            darea,
            intensity,
        }
    }

    /// `log10` of the energy and efficiency, or `None` when either is not strictly positive.
    pub fn log_coordinates(&self) -> Option<(f64, f64)> {
        if self.energy > 0.0 && self.efficiency > 0.0 {
            Some((self.energy.log10(), self.efficiency.log10()))
        } else {
            None
        }
    }
}

/// Formats a float the way the calibration files expect: shortest round-trip
/// digits, always with a fractional part or an exponent.
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

impl fmt::Display for EffPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={},{},{},{},{},{}",
            format_float(self.energy),
            format_float(self.efficiency),
            format_float(self.deff),
            self.nuclide,
            format_float(self.area),
            format_float(self.darea),
            format_float(self.intensity)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_point_line_layout() {
        let p = EffPoint::new(39.523, 5.399922e-4, 1.649, "Eu-152", 195877.0, 1220.0, 20.8);
        assert_eq!(
            p.to_string(),
            "39.523=0.0005399922,1.649,Eu-152,195877.0,1220.0,20.8"
        );
    }

    #[test]
    fn format_float_keeps_tiny_values_parseable() {
        let s = format_float(3.42396e-7);
        assert_eq!(s.parse::<f64>().unwrap(), 3.42396e-7);
        assert_eq!(format_float(100.0), "100.0");
    }

    #[test]
    fn log_coordinates_reject_non_positive_values() {
        let good = EffPoint::new(100.0, 0.01, 1.0, "Co-57", 1.0, 1.0, 1.0);
        let (x, y) = good.log_coordinates().unwrap();
        assert!((x - 2.0).abs() < 1e-12);
        assert!((y + 2.0).abs() < 1e-12);

        let bad = EffPoint::new(100.0, 0.0, 1.0, "Co-57", 1.0, 1.0, 1.0);
        assert!(bad.log_coordinates().is_none());
    }
}
