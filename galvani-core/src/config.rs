//! Injected default configurations for downstream stages.
//!
//! The model container never builds these on its own: a caller constructs a
//! [`ModelDefaults`] bundle (or loads one from TOML) and attaches it with
//! [`Model::with_defaults`](crate::Model::with_defaults). The container
//! stores the bundle opaquely for the discretizer and solver to pick up.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named, keyed store of physical constants.
///
/// Opaque to the assembly engine; parameter expressions in equations refer
/// to entries by name and are resolved downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Name of the chemistry or data source the values describe.
    pub name: String,
    values: HashMap<String, f64>,
}

impl ParameterSet {
    pub fn new(name: impl Into<String>) -> Self {
        ParameterSet {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Add one value, builder style.
    pub fn with_value(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a parameter set from a TOML document. Reading the file is the
    /// caller's job.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

/// One named spatial region with its bounds on the normalized cell axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryRegion {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

/// An ordered set of adjacent spatial regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub name: String,
    pub regions: Vec<GeometryRegion>,
}

impl Geometry {
    /// The standard one-dimensional macroscale cell: negative electrode,
    /// separator, positive electrode on the normalized axis [0, 1].
    pub fn macroscale_1d() -> Self {
        let third = 1.0 / 3.0;
        Geometry {
            name: "1D macroscale".to_string(),
            regions: vec![
                GeometryRegion {
                    name: "negative electrode".to_string(),
                    min: 0.0,
                    max: third,
                },
                GeometryRegion {
                    name: "separator".to_string(),
                    min: third,
                    max: 2.0 * third,
                },
                GeometryRegion {
                    name: "positive electrode".to_string(),
                    min: 2.0 * third,
                    max: 1.0,
                },
            ],
        }
    }

    pub fn region(&self, name: &str) -> Option<&GeometryRegion> {
        self.regions.iter().find(|region| region.name == name)
    }
}

/// Recognized submesh families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmeshType {
    Uniform,
}

/// Discretization configuration handed to the mesh generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscretisationConfig {
    pub submesh: SubmeshType,
    /// Number of mesh points per region name.
    pub mesh_points: HashMap<String, usize>,
}

impl DiscretisationConfig {
    /// Uniform submeshes with the standard point counts for the macroscale
    /// cell regions.
    pub fn macroscale_1d() -> Self {
        let mut mesh_points = HashMap::new();
        mesh_points.insert("negative electrode".to_string(), 40);
        mesh_points.insert("separator".to_string(), 25);
        mesh_points.insert("positive electrode".to_string(), 35);
        DiscretisationConfig {
            submesh: SubmeshType::Uniform,
            mesh_points,
        }
    }
}

/// Recognized time-integration methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverMethod {
    Rk45,
    Bdf,
}

/// Numerical solver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub method: SolverMethod,
    pub rtol: f64,
    pub atol: f64,
}

impl SolverConfig {
    /// Explicit Runge-Kutta 4(5) with standard tolerances.
    pub fn rk45() -> Self {
        SolverConfig {
            method: SolverMethod::Rk45,
            rtol: 1e-3,
            atol: 1e-6,
        }
    }

    /// Backward differentiation formulae, for stiff or algebraic systems.
    pub fn bdf() -> Self {
        SolverConfig {
            method: SolverMethod::Bdf,
            rtol: 1e-6,
            atol: 1e-8,
        }
    }

    /// Override both tolerances, builder style.
    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.rtol = rtol;
        self.atol = atol;
        self
    }
}

/// The full bundle of ready-to-use defaults a model can carry for its
/// downstream stages: parameters, geometry, discretization, and solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDefaults {
    pub parameters: ParameterSet,
    pub geometry: Geometry,
    pub discretisation: DiscretisationConfig,
    pub solver: SolverConfig,
}

impl ModelDefaults {
    /// Defaults for a standard lithium-ion cell: graphite/LCO parameter
    /// values, the 1D macroscale geometry, uniform submeshes, RK45.
    pub fn lithium_ion() -> Self {
        let parameters = ParameterSet::new("lithium-ion (graphite/LCO)")
            .with_value("Faraday constant", 96485.332)
            .with_value("Reference temperature", 298.15)
            .with_value("Negative particle radius", 1e-5)
            .with_value("Positive particle radius", 1e-5)
            .with_value("Negative particle diffusivity", 3.9e-14)
            .with_value("Positive particle diffusivity", 1e-13)
            .with_value("Negative particle diffusion timescale", 2564.1)
            .with_value("Positive particle diffusion timescale", 1000.0)
            .with_value("Negative particle initial concentration", 19986.6)
            .with_value("Positive particle initial concentration", 30730.8)
            .with_value("Typical current density", 24.0);
        ModelDefaults {
            parameters,
            geometry: Geometry::macroscale_1d(),
            discretisation: DiscretisationConfig::macroscale_1d(),
            solver: SolverConfig::rk45(),
        }
    }

    /// Parse a defaults bundle from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn lithium_ion_defaults_match_the_standard_setup() {
        let defaults = ModelDefaults::lithium_ion();

        assert_eq!(defaults.discretisation.submesh, SubmeshType::Uniform);
        assert_eq!(defaults.discretisation.mesh_points["negative electrode"], 40);
        assert_eq!(defaults.discretisation.mesh_points["separator"], 25);
        assert_eq!(defaults.discretisation.mesh_points["positive electrode"], 35);

        assert_eq!(defaults.solver.method, SolverMethod::Rk45);

        let names: Vec<&str> = defaults
            .geometry
            .regions
            .iter()
            .map(|region| region.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["negative electrode", "separator", "positive electrode"],
            "regions must stay in cell order"
        );

        let faraday = defaults.parameters.get("Faraday constant").unwrap();
        assert!(is_close!(faraday, 96485.332), "got {}", faraday);
        assert!(defaults.parameters.get("unknown quantity").is_none());
    }

    #[test]
    fn geometry_regions_are_adjacent() {
        let geometry = Geometry::macroscale_1d();
        for pair in geometry.regions.windows(2) {
            assert!(
                is_close!(pair[0].max, pair[1].min),
                "{} should end where {} begins",
                pair[0].name,
                pair[1].name
            );
        }
        assert!(is_close!(geometry.regions[0].min, 0.0));
        assert!(is_close!(geometry.regions[2].max, 1.0));
        assert!(geometry.region("separator").is_some());
        assert!(geometry.region("fourth electrode").is_none());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let defaults = ModelDefaults::lithium_ion();
        let serialized = toml::to_string(&defaults).unwrap();
        let restored = ModelDefaults::from_toml_str(&serialized).unwrap();

        assert_eq!(restored.parameters.name, defaults.parameters.name);
        assert_eq!(restored.parameters.len(), defaults.parameters.len());
        let d_neg = restored.parameters.get("Negative particle diffusivity").unwrap();
        assert!(is_close!(d_neg, 3.9e-14), "got {}", d_neg);
        assert_eq!(restored.solver.method, SolverMethod::Rk45);
        assert_eq!(
            restored.discretisation.mesh_points,
            defaults.discretisation.mesh_points
        );
    }

    #[test]
    fn defaults_parse_from_a_toml_document() {
        let source = r#"
            [parameters]
            name = "test chemistry"

            [parameters.values]
            "Negative particle diffusivity" = 1.0e-14

            [geometry]
            name = "half cell"

            [[geometry.regions]]
            name = "negative electrode"
            min = 0.0
            max = 1.0

            [discretisation]
            submesh = "Uniform"

            [discretisation.mesh_points]
            "negative electrode" = 10

            [solver]
            method = "Bdf"
            rtol = 1.0e-8
            atol = 1.0e-10
        "#;

        let defaults = ModelDefaults::from_toml_str(source).unwrap();
        assert_eq!(defaults.parameters.name, "test chemistry");
        assert_eq!(defaults.solver.method, SolverMethod::Bdf);
        assert_eq!(defaults.discretisation.mesh_points["negative electrode"], 10);
        let rtol = defaults.solver.rtol;
        assert!(is_close!(rtol, 1e-8), "got {}", rtol);
    }

    #[test]
    fn defaults_round_trip_through_json() {
        let defaults = ModelDefaults::lithium_ion();
        let serialized = serde_json::to_string(&defaults).unwrap();
        let restored: ModelDefaults = serde_json::from_str(&serialized).unwrap();

        assert_eq!(restored.geometry.regions.len(), 3);
        let radius = restored.parameters.get("Negative particle radius").unwrap();
        assert!(is_close!(radius, 1e-5), "got {}", radius);
    }

    #[test]
    fn parameter_sets_build_incrementally() {
        let mut set = ParameterSet::new("scratch");
        assert!(set.is_empty());
        set.insert("Typical current density", 24.0);
        assert_eq!(set.len(), 1);
        let value = set.get("Typical current density").unwrap();
        assert!(is_close!(value, 24.0), "got {}", value);
    }
}
