//! # Body records
//!
//! A [`BodyRecord`] is what the dataset is made of. It splits what describes the body
//! physically and dynamically ([`BodyData`]) from what identifies and displays it
//! ([`BodyMetadata`]), and holds the records of its satellites.
//!
//! Serialized shape:
//!
//! ```json
//! {
//!   "data": {
//!     "mass": 3.0e-6, "radius": 4.26e-5, "temperature": 287.6, "obliquity": 23.44,
//!     "density": 5.51, "rotation": 7.29e-5,
//!     "position": {"x": 0.1, "y": -0.9, "z": -0.4},
//!     "velocity": {"x": 0.01, "y": 0.002, "z": 0.001},
//!     "elements": {"eccentricity": 0.0167, "...": 0.0}
//!   },
//!   "metadata": {"id": 399, "name": "Earth", "color": [0.0, 0.5, 1.0, 1.0]},
//!   "satellites": []
//! }
//! ```
//!
//! Properties that could not be read are left out of `data`; `mass` is always there.
use serde::Serialize;

use crate::{
    constants::{AstronomicalUnit, Degree, GramPerCm3, Kelvin, RadianPerSecond, SolarMass},
    diagnostics::Diagnostic,
    geophysical::GeophysicalProperties,
    identifier::Identity,
    imputer::impute_mass,
    orbital_elements::OrbitalElements,
    state_vector::{Cartesian, StateVector},
};

/// Display color, RGBA in `[0, 1]`.
pub type Rgba = [f32; 4];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyData {
    pub mass: SolarMass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<AstronomicalUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Kelvin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obliquity: Option<Degree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<GramPerCm3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RadianPerSecond>,
    pub position: Cartesian,
    pub velocity: Cartesian,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<OrbitalElements>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyMetadata {
    pub id: u64,
    pub name: String,
    pub color: Option<Rgba>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyRecord {
    pub data: BodyData,
    pub metadata: BodyMetadata,
    pub satellites: Vec<BodyRecord>,
}

impl BodyRecord {
    pub fn id(&self) -> u64 {
        self.metadata.id
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Merge everything known about one body into a record without satellites.
///
/// The mass goes through [`impute_mass`]; its diagnostic, if any, is returned next to
/// the record.
pub fn merge_record(
    identity: Identity,
    color: Option<Rgba>,
    properties: &GeophysicalProperties,
    state: StateVector,
    elements: Option<OrbitalElements>,
) -> (BodyRecord, Vec<Diagnostic>) {
    let (mass, diagnostic) = impute_mass(properties, &identity.name);

    let data = BodyData {
        mass,
        radius: properties.radius,
        temperature: properties.temperature,
        obliquity: properties.obliquity,
        density: properties.density,
        rotation: properties.rotation,
        position: state.position,
        velocity: state.velocity,
        elements,
    };

    let record = BodyRecord {
        data,
        metadata: BodyMetadata {
            id: identity.id,
            name: identity.name,
            color,
        },
        satellites: Vec::new(),
    };

    (record, diagnostic.into_iter().collect())
}
