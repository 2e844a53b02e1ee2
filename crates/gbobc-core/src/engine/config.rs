use phf::{Map, phf_map};
use thiserror::Error;

/// Coulomb constant 1/(4 pi eps0) in kJ·nm/(mol·e²).
pub const ONE_4PI_EPS0: f64 = 138.935456;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Unknown OBC model '{0}' (expected one of: obc1, obc2)")]
    UnknownObcModel(String),

    #[error("Invalid value {value} for '{name}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Per-atom array '{what}' has {found} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(
        "Atom {atom}: atomic radius {radius} does not exceed the dielectric offset {offset}"
    )]
    NonPositiveOffsetRadius { atom: usize, radius: f64, offset: f64 },

    #[error("Atom {atom}: scaled radius factor {factor} must be positive")]
    NonPositiveScaleFactor { atom: usize, factor: f64 },
}

/// Coefficients of the OBC tanh remapping `tanh(alpha*psi - beta*psi^2 + gamma*psi^3)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObcCoefficients {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl ObcCoefficients {
    pub const OBC1: Self = Self {
        alpha: 0.8,
        beta: 0.0,
        gamma: 2.909125,
    };
    pub const OBC2: Self = Self {
        alpha: 1.0,
        beta: 0.8,
        gamma: 4.85,
    };

    pub fn from_model_name(name: &str) -> Result<Self, ConfigError> {
        OBC_MODELS
            .get(name.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ConfigError::UnknownObcModel(name.to_string()))
    }
}

static OBC_MODELS: Map<&'static str, ObcCoefficients> = phf_map! {
    "obc1" => ObcCoefficients::OBC1,
    "obc2" => ObcCoefficients::OBC2,
};

/// Scalar model constants shared by every atom. Lengths are in nm, energies in kJ/mol.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvationConfig {
    pub dielectric_offset: f64,
    pub obc: ObcCoefficients,
    pub solute_dielectric: f64,
    pub solvent_dielectric: f64,
    pub electric_constant: f64,
    /// Pairs farther apart than this distance are ignored, and the remaining
    /// pair energies are shifted by their value at the cutoff.
    pub cutoff: Option<f64>,
    pub periodic_box: Option<[f64; 3]>,
    /// Scales the whole solvation energy, polar and nonpolar alike.
    pub strength: f64,
    pub probe_radius: f64,
    pub surface_area_factor: f64,
}

impl Default for SolvationConfig {
    fn default() -> Self {
        Self {
            dielectric_offset: 0.009,
            obc: ObcCoefficients::OBC2,
            solute_dielectric: 1.0,
            solvent_dielectric: 78.3,
            electric_constant: -0.5 * ONE_4PI_EPS0,
            cutoff: None,
            periodic_box: None,
            strength: 1.0,
            probe_radius: 0.14,
            surface_area_factor: 28.3919551,
        }
    }
}

impl SolvationConfig {
    /// Prefactor of the Still pair sum, zero when either dielectric is zero.
    pub fn electrostatic_prefactor(&self) -> f64 {
        if self.solute_dielectric != 0.0 && self.solvent_dielectric != 0.0 {
            2.0 * self.electric_constant
                * ((1.0 / self.solute_dielectric) - (1.0 / self.solvent_dielectric))
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(cutoff) = self.cutoff {
            require_positive("cutoff", cutoff)?;
        }
        if let Some(edges) = self.periodic_box {
            for edge in edges {
                require_positive("periodic_box", edge)?;
            }
        }
        for (name, value) in [
            ("solute_dielectric", self.solute_dielectric),
            ("solvent_dielectric", self.solvent_dielectric),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    value,
                    reason: "dielectric constants must be non-negative",
                });
            }
        }
        Ok(())
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}

#[derive(Default)]
pub struct SolvationConfigBuilder {
    dielectric_offset: Option<f64>,
    obc: Option<ObcCoefficients>,
    solute_dielectric: Option<f64>,
    solvent_dielectric: Option<f64>,
    electric_constant: Option<f64>,
    cutoff: Option<f64>,
    periodic_box: Option<[f64; 3]>,
    strength: Option<f64>,
    probe_radius: Option<f64>,
    surface_area_factor: Option<f64>,
}

impl SolvationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dielectric_offset(mut self, offset: f64) -> Self {
        self.dielectric_offset = Some(offset);
        self
    }
    pub fn obc_coefficients(mut self, coefficients: ObcCoefficients) -> Self {
        self.obc = Some(coefficients);
        self
    }
    pub fn obc_model(mut self, name: &str) -> Result<Self, ConfigError> {
        self.obc = Some(ObcCoefficients::from_model_name(name)?);
        Ok(self)
    }
    pub fn solute_dielectric(mut self, dielectric: f64) -> Self {
        self.solute_dielectric = Some(dielectric);
        self
    }
    pub fn solvent_dielectric(mut self, dielectric: f64) -> Self {
        self.solvent_dielectric = Some(dielectric);
        self
    }
    pub fn electric_constant(mut self, constant: f64) -> Self {
        self.electric_constant = Some(constant);
        self
    }
    pub fn cutoff(mut self, distance: f64) -> Self {
        self.cutoff = Some(distance);
        self
    }
    pub fn periodic_box(mut self, edges: [f64; 3]) -> Self {
        self.periodic_box = Some(edges);
        self
    }
    pub fn strength(mut self, strength: f64) -> Self {
        self.strength = Some(strength);
        self
    }
    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }
    pub fn surface_area_factor(mut self, factor: f64) -> Self {
        self.surface_area_factor = Some(factor);
        self
    }

    pub fn build(self) -> Result<SolvationConfig, ConfigError> {
        let defaults = SolvationConfig::default();
        let config = SolvationConfig {
            dielectric_offset: self.dielectric_offset.unwrap_or(defaults.dielectric_offset),
            obc: self.obc.unwrap_or(defaults.obc),
            solute_dielectric: self
                .solute_dielectric
                .ok_or(ConfigError::MissingParameter("solute_dielectric"))?,
            solvent_dielectric: self
                .solvent_dielectric
                .ok_or(ConfigError::MissingParameter("solvent_dielectric"))?,
            electric_constant: self.electric_constant.unwrap_or(defaults.electric_constant),
            cutoff: self.cutoff,
            periodic_box: self.periodic_box,
            strength: self.strength.unwrap_or(defaults.strength),
            probe_radius: self.probe_radius.unwrap_or(defaults.probe_radius),
            surface_area_factor: self
                .surface_area_factor
                .unwrap_or(defaults.surface_area_factor),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fails_without_dielectrics() {
        let result = SolvationConfigBuilder::new().solute_dielectric(1.0).build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("solvent_dielectric"))
        );
    }

    #[test]
    fn builder_fills_unset_fields_with_defaults() {
        let config = SolvationConfigBuilder::new()
            .solute_dielectric(1.0)
            .solvent_dielectric(78.3)
            .build()
            .unwrap();
        assert_eq!(config, SolvationConfig::default());
    }

    #[test]
    fn builder_rejects_non_positive_cutoff() {
        let result = SolvationConfigBuilder::new()
            .solute_dielectric(1.0)
            .solvent_dielectric(78.3)
            .cutoff(0.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "cutoff", .. })
        ));
    }

    #[test]
    fn builder_rejects_infinite_box_edge() {
        let result = SolvationConfigBuilder::new()
            .solute_dielectric(1.0)
            .solvent_dielectric(78.3)
            .periodic_box([3.0, f64::INFINITY, 3.0])
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "periodic_box",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_negative_dielectric() {
        let result = SolvationConfigBuilder::new()
            .solute_dielectric(-1.0)
            .solvent_dielectric(78.3)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "solute_dielectric",
                ..
            })
        ));
    }

    #[test]
    fn obc_model_lookup_is_case_insensitive() {
        assert_eq!(
            ObcCoefficients::from_model_name("OBC1"),
            Ok(ObcCoefficients::OBC1)
        );
        assert_eq!(
            ObcCoefficients::from_model_name("obc2"),
            Ok(ObcCoefficients::OBC2)
        );
    }

    #[test]
    fn obc_model_lookup_rejects_unknown_name() {
        let result = SolvationConfigBuilder::new().obc_model("hct");
        assert!(matches!(result, Err(ConfigError::UnknownObcModel(name)) if name == "hct"));
    }

    #[test]
    fn electrostatic_prefactor_is_zero_for_zero_dielectric() {
        let config = SolvationConfig {
            solvent_dielectric: 0.0,
            ..SolvationConfig::default()
        };
        assert_eq!(config.electrostatic_prefactor(), 0.0);
    }

    #[test]
    fn electrostatic_prefactor_is_negative_for_default_constants() {
        let prefactor = SolvationConfig::default().electrostatic_prefactor();
        let expected = -ONE_4PI_EPS0 * (1.0 - 1.0 / 78.3);
        assert!((prefactor - expected).abs() < 1e-9);
    }
}
