//! # Mass imputation
//!
//! Every record must carry a mass. When the physical-data block gives none, the mass is
//! derived from the density and the radius of a homogeneous sphere, or replaced by the
//! mass of an arbitrary 10¹⁶ kg body. Both paths emit a [`Diagnostic`].
use std::f64::consts::PI;

use tracing::warn;

use crate::{
    constants::{
        kg_to_solar_mass, AstronomicalUnit, GramPerCm3, SolarMass, AU, CM_PER_KM,
        FALLBACK_MASS_KG, KG_PER_G,
    },
    diagnostics::{Derivation, Diagnostic, Property, Severity},
    geophysical::GeophysicalProperties,
};

/// Mass of a homogeneous sphere, `(4/3)·π·ρ·r³`, in the unit system of its arguments.
pub fn sphere_mass(density: f64, radius: f64) -> f64 {
    (4.0 / 3.0) * PI * density * radius.powi(3)
}

/// Mass of a homogeneous sphere from a density in g/cm³ and a radius in AU.
pub fn mass_from_density(density: GramPerCm3, radius: AstronomicalUnit) -> SolarMass {
    let radius_cm = radius * AU * CM_PER_KM;
    kg_to_solar_mass(sphere_mass(density, radius_cm) * KG_PER_G)
}

/// Mass used when nothing allows to derive it.
pub fn fallback_mass() -> SolarMass {
    kg_to_solar_mass(FALLBACK_MASS_KG)
}

/// Return the mass of the body, imputing it when missing.
///
/// Arguments
/// ---------
/// * `properties`: what was extracted from the physical-data block
/// * `body`: body name, used in the diagnostic
///
/// Return
/// ------
/// * the mass in solar masses and, when it was not read from the text, the diagnostic
///   describing how it was obtained
pub fn impute_mass(properties: &GeophysicalProperties, body: &str) -> (SolarMass, Option<Diagnostic>) {
    if let Some(mass) = properties.mass {
        return (mass, None);
    }

    let (mass, derivation) = match (properties.density, properties.radius) {
        (Some(density), Some(radius)) => {
            (mass_from_density(density, radius), Derivation::DerivedFromDensity)
        }
        _ => (fallback_mass(), Derivation::ArbitraryFallback),
    };

    let diagnostic = Diagnostic {
        severity: Severity::Warning,
        body: body.to_string(),
        property: Property::Mass,
        derivation,
        value: Some(mass),
    };
    warn!(body, ?derivation, mass, "{diagnostic}");

    (mass, Some(diagnostic))
}
