//! Fickian diffusion in electrode particles.
//!
//! One instance per electrode; the two electrodes together with an applied
//! current make up the classic single particle model.

use std::fmt;

use log::debug;

use galvani_core::{ModelResult, Submodel, SubmodelEquations};
use galvani_expr::{boundary_value, broadcast, div, grad, BoundarySide, Expr, Variable};

/// The electrode a particle submodel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Electrode {
    Negative,
    Positive,
}

impl Electrode {
    /// Capitalized prefix used in variable and parameter names, following
    /// the `"Negative particle concentration"` naming convention.
    pub fn prefix(&self) -> &'static str {
        match self {
            Electrode::Negative => "Negative",
            Electrode::Positive => "Positive",
        }
    }

    /// The spatial region this electrode's particles are defined over.
    pub fn particle_region(&self) -> &'static str {
        match self {
            Electrode::Negative => "negative particle",
            Electrode::Positive => "positive particle",
        }
    }
}

impl fmt::Display for Electrode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Electrode::Negative => write!(f, "negative"),
            Electrode::Positive => write!(f, "positive"),
        }
    }
}

/// Molar conservation in a spherical electrode particle with Fickian
/// diffusion.
///
/// Solves for the lithium concentration $c$ in the particle of one
/// electrode:
///
/// $$ \frac{\partial c}{\partial t} = -\nabla \cdot N, \qquad
///    N = -D \nabla c $$
///
/// with no flux at the particle centre and a flux set by the interfacial
/// current density $j$ at the particle surface:
///
/// $$ -D \left.\nabla c\right|_{r=0} = 0, \qquad
///    -D \left.\nabla c\right|_{r=R} = \frac{j}{F} $$
///
/// Where:
/// - $D$ is the particle diffusivity
/// - $F$ is the Faraday constant
/// - $j$ is the interfacial current density at the particle surface
///
/// Diffusivity, initial concentration, and current are symbolic parameters
/// named after the electrode (e.g. `"Negative particle diffusivity"`),
/// resolved downstream against a parameter set such as
/// [`ModelDefaults::lithium_ion`](galvani_core::config::ModelDefaults::lithium_ion).
#[derive(Debug, Clone)]
pub struct FickianParticle {
    electrode: Electrode,
    name: String,
}

impl FickianParticle {
    pub fn new(electrode: Electrode) -> Self {
        FickianParticle {
            name: format!("{} particle Fickian diffusion", electrode),
            electrode,
        }
    }

    pub fn electrode(&self) -> Electrode {
        self.electrode
    }
}

impl Submodel for FickianParticle {
    fn name(&self) -> &str {
        &self.name
    }

    fn equations(&self) -> ModelResult<SubmodelEquations> {
        let prefix = self.electrode.prefix();
        let region = self.electrode.particle_region();

        let c = Variable::new(format!("{} particle concentration", prefix), region);
        let diffusivity = Expr::parameter(format!("{} particle diffusivity", prefix));
        let flux = -(diffusivity.clone() * grad(c.clone()));

        let mut bundle = SubmodelEquations::new();
        bundle.set_rhs([(c.clone(), -div(flux.clone()))])?;
        bundle.set_initial_conditions([(
            c.clone(),
            broadcast(
                Expr::parameter(format!("{} particle initial concentration", prefix)),
                region,
            ),
        )])?;

        // No flux through the particle centre; the surface flux balances the
        // interfacial current.
        let current = Expr::parameter("Typical current density");
        let faraday = Expr::parameter("Faraday constant");
        bundle.set_boundary_conditions([(
            c.to_expr(),
            [
                (BoundarySide::Left, Expr::scalar(0.0)),
                (BoundarySide::Right, -(current / (faraday * diffusivity))),
            ],
        )]);

        bundle.set_variables([
            (format!("{} particle concentration", prefix), c.to_expr()),
            (
                format!("{} particle surface concentration", prefix),
                boundary_value(c.clone(), BoundarySide::Right),
            ),
            (format!("{} particle flux", prefix), flux),
        ]);

        debug!(
            "built Fickian diffusion equations for the {} particle",
            self.electrode
        );
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galvani_core::config::ModelDefaults;
    use galvani_core::Model;
    use galvani_expr::{Domain, ExprKind};

    fn negative_bundle() -> SubmodelEquations {
        FickianParticle::new(Electrode::Negative).equations().unwrap()
    }

    #[test]
    fn rhs_is_one_spatial_diffusion_equation() {
        let bundle = negative_bundle();

        assert_eq!(bundle.rhs().len(), 1);
        let (c, equation) = bundle.rhs().iter().next().unwrap();
        assert_eq!(c.name(), "Negative particle concentration");
        assert_eq!(c.domain(), &Domain::from("negative particle"));
        assert_eq!(equation.domain(), c.domain());
        assert!(
            equation.has_spatial_derivative(),
            "diffusion must contain a spatial derivative"
        );
    }

    #[test]
    fn initial_condition_is_broadcast_onto_the_particle() {
        let bundle = negative_bundle();

        let (c, _) = bundle.rhs().iter().next().unwrap();
        let start = &bundle.initial_conditions()[c];
        assert_eq!(start.domain(), &Domain::from("negative particle"));
        assert!(matches!(start.kind(), ExprKind::Broadcast(_)));
    }

    #[test]
    fn boundary_conditions_cover_both_particle_surfaces() {
        let bundle = negative_bundle();

        let (c, _) = bundle.rhs().iter().next().unwrap();
        assert_eq!(bundle.boundary_conditions().len(), 1);
        let (key, sides) = bundle.boundary_conditions().iter().next().unwrap();
        assert!(
            key.pre_order().any(|node| node.id() == c.id()),
            "the boundary-condition key must reference the concentration"
        );
        assert_eq!(sides[&BoundarySide::Left].as_scalar(), Some(0.0));
        assert!(sides[&BoundarySide::Right].as_scalar().is_none());
    }

    #[test]
    fn variables_catalog_names_the_standard_quantities() {
        let bundle = negative_bundle();
        let variables = bundle.variables();

        for label in [
            "Negative particle concentration",
            "Negative particle surface concentration",
            "Negative particle flux",
        ] {
            assert!(variables.contains_key(label), "missing '{}'", label);
        }
        let surface = &variables["Negative particle surface concentration"];
        assert!(surface.domain().is_empty(), "a surface value is a scalar");
    }

    #[test]
    fn referenced_parameters_exist_in_the_lithium_ion_defaults() {
        let defaults = ModelDefaults::lithium_ion();

        for electrode in [Electrode::Negative, Electrode::Positive] {
            let bundle = FickianParticle::new(electrode).equations().unwrap();
            let expressions = bundle
                .rhs()
                .values()
                .chain(bundle.initial_conditions().values())
                .chain(bundle.boundary_conditions().values().flat_map(|s| s.values()))
                .chain(bundle.variables().values());

            for expression in expressions {
                for node in expression.pre_order() {
                    if let ExprKind::Parameter(name) = node.kind() {
                        assert!(
                            defaults.parameters.get(name).is_some(),
                            "parameter '{}' is not in the lithium-ion defaults",
                            name
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn both_electrodes_assemble_into_a_well_posed_model() {
        let negative = FickianParticle::new(Electrode::Negative);
        let positive = FickianParticle::new(Electrode::Positive);

        let mut model =
            Model::new("single particle model").with_defaults(ModelDefaults::lithium_ion());
        model.update(&[&negative, &positive]).unwrap();
        model.check_well_posedness().unwrap();

        assert_eq!(model.rhs().len(), 2);
        assert_eq!(model.variables().len(), 6);
    }

    #[test]
    fn each_instance_creates_its_own_unknowns() {
        // Every `equations()` call builds fresh variables, so two instances
        // for the same electrode merge without an identity collision; their
        // output labels collide and the later instance wins those.
        let mut model = Model::new("two negatives");
        model
            .update(&[
                &FickianParticle::new(Electrode::Negative),
                &FickianParticle::new(Electrode::Negative),
            ])
            .unwrap();
        assert_eq!(model.rhs().len(), 2);
        assert_eq!(model.variables().len(), 3);
    }
}
