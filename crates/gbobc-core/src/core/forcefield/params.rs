use crate::core::utils::geometry::{DeltaR, delta_r, delta_r_periodic};
use crate::engine::config::{ConfigError, ObcCoefficients, SolvationConfig, SolvationConfigBuilder};
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Model constants as written in a TOML parameter file.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ModelFile {
    pub model: Option<String>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
    pub dielectric_offset: Option<f64>,
    pub solute_dielectric: Option<f64>,
    pub solvent_dielectric: Option<f64>,
    pub electric_constant: Option<f64>,
    pub cutoff: Option<f64>,
    pub periodic_box: Option<[f64; 3]>,
    pub strength: Option<f64>,
    pub probe_radius: Option<f64>,
    pub surface_area_factor: Option<f64>,
}

impl TryFrom<ModelFile> for SolvationConfig {
    type Error = ConfigError;

    fn try_from(file: ModelFile) -> Result<Self, Self::Error> {
        let mut obc = match &file.model {
            Some(name) => ObcCoefficients::from_model_name(name)?,
            None => SolvationConfig::default().obc,
        };
        if let Some(alpha) = file.alpha {
            obc.alpha = alpha;
        }
        if let Some(beta) = file.beta {
            obc.beta = beta;
        }
        if let Some(gamma) = file.gamma {
            obc.gamma = gamma;
        }

        let mut builder = SolvationConfigBuilder::new().obc_coefficients(obc);
        if let Some(v) = file.dielectric_offset {
            builder = builder.dielectric_offset(v);
        }
        if let Some(v) = file.solute_dielectric {
            builder = builder.solute_dielectric(v);
        }
        if let Some(v) = file.solvent_dielectric {
            builder = builder.solvent_dielectric(v);
        }
        if let Some(v) = file.electric_constant {
            builder = builder.electric_constant(v);
        }
        if let Some(v) = file.cutoff {
            builder = builder.cutoff(v);
        }
        if let Some(v) = file.periodic_box {
            builder = builder.periodic_box(v);
        }
        if let Some(v) = file.strength {
            builder = builder.strength(v);
        }
        if let Some(v) = file.probe_radius {
            builder = builder.probe_radius(v);
        }
        if let Some(v) = file.surface_area_factor {
            builder = builder.surface_area_factor(v);
        }
        builder.build()
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct RadiusRecord {
    pub atomic_radius: f64,
    pub scale_factor: f64,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid solvation parameters: {0}")]
    Config(#[from] ConfigError),
}

/// Per-atom radii and model constants for one solute.
///
/// Invariants checked once at construction: the per-atom arrays have the same
/// length, every atomic radius exceeds the dielectric offset and every scaled
/// radius factor is positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ObcParameters {
    atomic_radii: Vec<f64>,
    scaled_radius_factors: Vec<f64>,
    config: SolvationConfig,
}

impl ObcParameters {
    pub fn new(
        atomic_radii: Vec<f64>,
        scaled_radius_factors: Vec<f64>,
        config: SolvationConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if scaled_radius_factors.len() != atomic_radii.len() {
            return Err(ConfigError::LengthMismatch {
                what: "scaled_radius_factors",
                expected: atomic_radii.len(),
                found: scaled_radius_factors.len(),
            });
        }
        for (atom, &radius) in atomic_radii.iter().enumerate() {
            if radius.is_nan() || radius <= config.dielectric_offset {
                return Err(ConfigError::NonPositiveOffsetRadius {
                    atom,
                    radius,
                    offset: config.dielectric_offset,
                });
            }
        }
        for (atom, &factor) in scaled_radius_factors.iter().enumerate() {
            if factor.is_nan() || factor <= 0.0 {
                return Err(ConfigError::NonPositiveScaleFactor { atom, factor });
            }
        }

        Ok(Self {
            atomic_radii,
            scaled_radius_factors,
            config,
        })
    }

    pub fn load(model_path: &Path, radii_path: &Path) -> Result<Self, ParamLoadError> {
        let config = Self::load_model(model_path)?;
        let records = Self::load_radii_csv(radii_path)?;
        let (atomic_radii, scaled_radius_factors) = records
            .into_iter()
            .map(|r| (r.atomic_radius, r.scale_factor))
            .unzip();
        Ok(Self::new(atomic_radii, scaled_radius_factors, config)?)
    }

    fn load_model(path: &Path) -> Result<SolvationConfig, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: ModelFile = toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Ok(SolvationConfig::try_from(file)?)
    }

    fn load_radii_csv(path: &Path) -> Result<Vec<RadiusRecord>, ParamLoadError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| ParamLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut records = Vec::new();
        for result in reader.deserialize::<RadiusRecord>() {
            let record = result.map_err(|e| ParamLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    #[inline]
    pub fn num_atoms(&self) -> usize {
        self.atomic_radii.len()
    }

    pub fn atomic_radii(&self) -> &[f64] {
        &self.atomic_radii
    }

    pub fn scaled_radius_factors(&self) -> &[f64] {
        &self.scaled_radius_factors
    }

    pub fn config(&self) -> &SolvationConfig {
        &self.config
    }

    #[inline]
    pub(crate) fn delta_r(&self, a: &Point3<f64>, b: &Point3<f64>) -> DeltaR {
        match self.config.periodic_box {
            Some(edges) => delta_r_periodic(a, b, &Vector3::from(edges)),
            None => delta_r(a, b),
        }
    }

    /// `true` if a pair at distance `r` is skipped by the cutoff.
    #[inline]
    pub(crate) fn beyond_cutoff(&self, r: f64) -> bool {
        matches!(self.config.cutoff, Some(cutoff) if r > cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_model(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("model.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn write_radii(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("radii.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn new_rejects_radius_not_above_offset() {
        let result =
            ObcParameters::new(vec![0.15, 0.009], vec![0.8, 0.8], SolvationConfig::default());
        assert!(matches!(
            result,
            Err(ConfigError::NonPositiveOffsetRadius { atom: 1, .. })
        ));
    }

    #[test]
    fn new_rejects_mismatched_lengths() {
        let result = ObcParameters::new(vec![0.15, 0.12], vec![0.8], SolvationConfig::default());
        assert_eq!(
            result,
            Err(ConfigError::LengthMismatch {
                what: "scaled_radius_factors",
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn new_rejects_non_positive_scale_factor() {
        let result = ObcParameters::new(vec![0.15], vec![0.0], SolvationConfig::default());
        assert!(matches!(
            result,
            Err(ConfigError::NonPositiveScaleFactor { atom: 0, .. })
        ));
    }

    #[test]
    fn beyond_cutoff_is_false_without_cutoff() {
        let params = ObcParameters::new(vec![0.15], vec![0.8], SolvationConfig::default()).unwrap();
        assert!(!params.beyond_cutoff(1.0e6));
    }

    #[test]
    fn beyond_cutoff_is_strict() {
        let config = SolvationConfig {
            cutoff: Some(1.0),
            ..SolvationConfig::default()
        };
        let params = ObcParameters::new(vec![0.15], vec![0.8], config).unwrap();
        assert!(!params.beyond_cutoff(1.0));
        assert!(params.beyond_cutoff(1.0 + 1e-12));
    }

    #[test]
    fn delta_r_wraps_when_box_is_set() {
        let config = SolvationConfig {
            periodic_box: Some([2.0, 2.0, 2.0]),
            ..SolvationConfig::default()
        };
        let params = ObcParameters::new(vec![0.15], vec![0.8], config).unwrap();
        let d = params.delta_r(&Point3::new(0.0, 0.0, 0.0), &Point3::new(0.0, 1.8, 0.0));
        assert!((d.r - 0.2).abs() < 1e-12);
    }

    #[test]
    fn load_succeeds_with_valid_files() {
        let dir = tempdir().unwrap();
        let model = write_model(
            dir.path(),
            r#"
            model = "obc1"
            solute-dielectric = 1.0
            solvent-dielectric = 78.5
            cutoff = 2.0
            "#,
        );
        let radii = write_radii(
            dir.path(),
            "atomic_radius,scale_factor\n0.15,0.8\n0.12,0.85\n",
        );

        let params = ObcParameters::load(&model, &radii).unwrap();
        assert_eq!(params.num_atoms(), 2);
        assert_eq!(params.atomic_radii(), &[0.15, 0.12]);
        assert_eq!(params.scaled_radius_factors(), &[0.8, 0.85]);
        assert_eq!(params.config().obc, ObcCoefficients::OBC1);
        assert_eq!(params.config().cutoff, Some(2.0));
        assert_eq!(params.config().solvent_dielectric, 78.5);
    }

    #[test]
    fn load_model_applies_explicit_coefficients_over_preset() {
        let dir = tempdir().unwrap();
        let model = write_model(
            dir.path(),
            r#"
            model = "obc2"
            gamma = 5.0
            solute-dielectric = 1.0
            solvent-dielectric = 78.5
            "#,
        );
        let config = ObcParameters::load_model(&model).unwrap();
        assert_eq!(config.obc.alpha, 1.0);
        assert_eq!(config.obc.beta, 0.8);
        assert_eq!(config.obc.gamma, 5.0);
    }

    #[test]
    fn load_model_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ObcParameters::load_model(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
    }

    #[test]
    fn load_model_fails_for_unknown_key() {
        let dir = tempdir().unwrap();
        let model = write_model(dir.path(), "solute-dielectric = 1.0\nkappa = 0.1\n");
        let result = ObcParameters::load_model(&model);
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn load_model_fails_without_dielectrics() {
        let dir = tempdir().unwrap();
        let model = write_model(dir.path(), "strength = 0.5\n");
        let result = ObcParameters::load_model(&model);
        assert!(matches!(
            result,
            Err(ParamLoadError::Config(ConfigError::MissingParameter(
                "solute_dielectric"
            )))
        ));
    }

    #[test]
    fn load_model_fails_for_unknown_preset() {
        let dir = tempdir().unwrap();
        let model = write_model(
            dir.path(),
            "model = \"gbn\"\nsolute-dielectric = 1.0\nsolvent-dielectric = 78.5\n",
        );
        let result = ObcParameters::load_model(&model);
        assert!(matches!(
            result,
            Err(ParamLoadError::Config(ConfigError::UnknownObcModel(_)))
        ));
    }

    #[test]
    fn load_radii_csv_fails_for_malformed_csv() {
        let dir = tempdir().unwrap();
        let radii = write_radii(dir.path(), "atomic_radius,scale_factor\n0.15\n");
        let result = ObcParameters::load_radii_csv(&radii);
        assert!(matches!(result, Err(ParamLoadError::Csv { .. })));
    }

    #[test]
    fn load_fails_if_radius_is_below_offset() {
        let dir = tempdir().unwrap();
        let model = write_model(
            dir.path(),
            "solute-dielectric = 1.0\nsolvent-dielectric = 78.5\ndielectric-offset = 0.2\n",
        );
        let radii = write_radii(dir.path(), "atomic_radius,scale_factor\n0.15,0.8\n");
        let result = ObcParameters::load(&model, &radii);
        assert!(matches!(
            result,
            Err(ParamLoadError::Config(
                ConfigError::NonPositiveOffsetRadius { atom: 0, .. }
            ))
        ));
    }
}
