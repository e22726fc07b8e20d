//! Structured diagnostic events.
//!
//! Extraction never prints. Whenever a value is not measured but derived or
//! substituted, a [`Diagnostic`] is returned next to the record and mirrored as a
//! `tracing` event.
use std::fmt;

use serde::Serialize;

/// Properties a diagnostic can be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Mass,
    Radius,
    Temperature,
    Density,
    Rotation,
    Obliquity,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Mass => "mass",
            Property::Radius => "radius",
            Property::Temperature => "temperature",
            Property::Density => "density",
            Property::Rotation => "rotation",
            Property::Obliquity => "obliquity",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// How a value ended up in the record when it was not read from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    /// Mass computed from the density and the radius of a homogeneous sphere.
    DerivedFromDensity,
    /// Mass replaced by [`FALLBACK_MASS_KG`](crate::constants::FALLBACK_MASS_KG).
    ArbitraryFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the body, or the requested command when the name is unknown.
    pub body: String,
    pub property: Property,
    pub derivation: Derivation,
    pub value: Option<f64>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.derivation, self.value) {
            (Derivation::DerivedFromDensity, Some(v)) => write!(
                f,
                "Missing {} for {}, using the value derived from density and radius: {v:e}",
                self.property, self.body
            ),
            (Derivation::ArbitraryFallback, Some(v)) => write!(
                f,
                "Missing {} for {}, using the arbitrary fallback value: {v:e}",
                self.property, self.body
            ),
            (derivation, _) => write!(f, "{:?} for {} of {}", derivation, self.property, self.body),
        }
    }
}

#[cfg(test)]
mod diagnostics_tests {
    use super::*;

    #[test]
    fn test_serialized_diagnostic() {
        let diagnostic = Diagnostic {
            severity: Severity::Warning,
            body: "Moon".into(),
            property: Property::Mass,
            derivation: Derivation::DerivedFromDensity,
            value: Some(3.7e-8),
        };
        assert_eq!(
            serde_json::to_value(&diagnostic).unwrap(),
            serde_json::json!({
                "severity": "warning",
                "body": "Moon",
                "property": "mass",
                "derivation": "derived_from_density",
                "value": 3.7e-8
            })
        );
        assert_eq!(
            diagnostic.to_string(),
            "Missing mass for Moon, using the value derived from density and radius: 3.7e-8"
        );
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Info < Severity::Warning);
    }
}
