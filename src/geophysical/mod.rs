//! # Physical-data block of an ephemerides response
//!
//! An `OBSERVER` response with `OBJ_DATA='YES'` starts with a free-text block of
//! physical properties, opened by a line of `*` and closed by two blank lines:
//!
//! ```text
//! *******************************************************************************
//!  Revised: April 12, 2021                 Mars                            499 / 4
//!
//!  GEOPHYSICAL PARAMETERS (update 2021-Apr-12):
//!   Vol. Mean Radius (km) = 3389.92+-0.04   Density (g/cm^3)      =  3.933(5+-4)
//!   Mass x10^23 (kg)      =    6.4171       Flattening, f         =  1/169.779
//!   ...
//!
//!
//! ```
//!
//! The second line of the block identifies the body (see [`crate::identifier`]); every
//! other non-empty line is offered to all the [`field_rules`]. Labels vary between
//! bodies and the same property may appear several times, so for each property the
//! **first** line that matches wins and later matches are ignored.
//!
//! Missing properties are a normal outcome: small bodies usually list neither mass nor
//! temperature.
pub mod field_rules;

use serde::Serialize;
use tracing::debug;

use crate::{
    constants::{AstronomicalUnit, Degree, GramPerCm3, Kelvin, RadianPerSecond, SolarMass},
    diagnostics::Property,
    identifier::{resolve_identity, IdCorrections, Identity},
};

const SECTION_START: &str = "***";
const SECTION_END: &str = "\n\n\n";

/// Physical properties in canonical units, each one optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeophysicalProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<SolarMass>,
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
}

/// What was read from the physical-data block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeophysicalBlock {
    /// `None` when the header line matched no identifier layout.
    pub identity: Option<Identity>,
    pub properties: GeophysicalProperties,
}

/// Keep the first value seen for a property.
fn keep_first(slot: &mut Option<f64>, value: Option<f64>, property: Property, line_no: usize) {
    if slot.is_none() {
        if let Some(v) = value {
            debug!(%property, value = v, line = line_no, "property matched");
            *slot = Some(v);
        }
    }
}

/// Slice of `text` from the first `***` up to the first blank-line pair after it.
///
/// A missing start marker keeps the text from its beginning, a missing end marker
/// keeps it up to its end.
pub fn properties_section(text: &str) -> &str {
    let start = text.find(SECTION_START).unwrap_or(0);
    let end = text[start..]
        .find(SECTION_END)
        .map_or(text.len(), |offset| start + offset);
    text[start..end].trim()
}

impl GeophysicalProperties {
    /// Offer one line to every field rule.
    pub fn scan_line(&mut self, line: &str, line_no: usize) {
        keep_first(&mut self.mass, field_rules::mass(line), Property::Mass, line_no);
        keep_first(&mut self.radius, field_rules::radius(line), Property::Radius, line_no);
        keep_first(
            &mut self.temperature,
            field_rules::temperature(line),
            Property::Temperature,
            line_no,
        );
        keep_first(
            &mut self.obliquity,
            field_rules::obliquity(line),
            Property::Obliquity,
            line_no,
        );
        keep_first(&mut self.density, field_rules::density(line), Property::Density, line_no);
        keep_first(
            &mut self.rotation,
            field_rules::rotation(line),
            Property::Rotation,
            line_no,
        );
    }
}

/// Read the identity and the physical properties of an ephemerides response.
///
/// Arguments
/// ---------
/// * `text`: the raw ephemerides response
/// * `corrections`: name → canonical id overrides applied to the header line
///
/// Return
/// ------
/// * the identity (if the header line matched) and the properties found
pub fn extract_geophysical(text: &str, corrections: &IdCorrections) -> GeophysicalBlock {
    let text = text.replace("\r\n", "\n");
    let section = properties_section(&text);

    let mut block = GeophysicalBlock::default();

    for (line_no, raw_line) in section.lines().enumerate() {
        if line_no == 1 {
            // a header that matches no layout is skipped, the block is still scanned
            block.identity = resolve_identity(raw_line, corrections);
            continue;
        }

        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        block.properties.scan_line(line, line_no);
    }

    block
}

#[cfg(test)]
mod geophysical_tests {
    use super::*;
    use crate::constants::{AU, SOLAR_MASS_KG};
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    const MARS: &str = "API VERSION: 1.2
API SOURCE: NASA/JPL Horizons API

*******************************************************************************
 Revised: April 12, 2021                 Mars                            499 / 4

 GEOPHYSICAL PARAMETERS (update 2021-Apr-12):
  Vol. Mean Radius (km) = 3389.92+-0.04   Density (g/cm^3)      =  3.933(5+-4)
  Mass x10^23 (kg)      =    6.4171       Flattening, f         =  1/169.779
  Volume (x10^10 km^3)  =   16.318        Equatorial radius (km)=  3396.19
  Sidereal rot. period  =   24.622962 hr  Sid. rot. rate, rad/s =  0.0000708822
  Mean solar day (sol)  =   88775.24415 s Polar gravity m/s^2   =  3.758
  Core radius (km)      =  ~1700          Equ. gravity  m/s^2   =  3.71
  Geometric Albedo      =    0.150
  Obliquity to orbit    =   25.19 deg     Mean Temperature (K)  =  210
  Atmos. temp. (1 bar)  =   215 K


*******************************************************************************
Ephemeris / API_USER Mon Jan 13 08:00:00 2025 Pasadena, USA      / Horizons
*******************************************************************************
Target body name: Mars (499)                      {source: mar097}
";

    #[test]
    fn test_properties_section_bounds() {
        let section = properties_section(MARS);
        assert!(section.starts_with("***"));
        assert!(section.ends_with("Atmos. temp. (1 bar)  =   215 K"));

        assert_eq!(properties_section("no markers"), "no markers");
        assert_eq!(properties_section("a\n*** b"), "*** b");
    }

    #[test]
    fn test_extract_mars() {
        let block = extract_geophysical(MARS, &HashMap::new());

        assert_eq!(
            block.identity,
            Some(Identity {
                id: 499,
                name: "Mars".into()
            })
        );

        let props = block.properties;
        assert_relative_eq!(props.mass.unwrap(), 6.4171e23 / SOLAR_MASS_KG, max_relative = 1e-12);
        assert_relative_eq!(props.radius.unwrap(), 3389.92 / AU);
        assert_eq!(props.density, Some(3.933));
        assert_eq!(props.rotation, Some(0.0000708822));
        assert_eq!(props.temperature, Some(210.0));
        // "Obliquity to orbit = 25.19 deg" has no "deg =" label, nothing else qualifies
        assert_eq!(props.obliquity, Some(25.19));
    }

    #[test]
    fn test_first_match_wins() {
        let text = "*****
 Revised: 2024      Testbody       42

 Mass x10^23 (kg) = 1.0
 Mass x10^23 (kg) = 2.0
 Mean Temperature (K) = 100   Atmos. temp. (1 bar) = 200
";
        let props = extract_geophysical(text, &HashMap::new()).properties;
        assert_relative_eq!(props.mass.unwrap(), 1.0e23 / SOLAR_MASS_KG, max_relative = 1e-12);
        assert_eq!(props.temperature, Some(100.0));
    }

    #[test]
    fn test_unmatched_header_keeps_scanning() {
        let text = "*****
 ???
 Density (g/cm^3) = 2.1
";
        let block = extract_geophysical(text, &HashMap::new());
        assert_eq!(block.identity, None);
        assert_eq!(block.properties.density, Some(2.1));
    }

    #[test]
    fn test_header_line_is_not_scanned() {
        let text = "*****\n Density (g/cm^3) = 2.1\n";
        let block = extract_geophysical(text, &HashMap::new());
        assert_eq!(block.properties.density, None);
    }

    #[test]
    fn test_crlf_and_idempotence() {
        let crlf = MARS.replace('\n', "\r\n");
        let first = extract_geophysical(&crlf, &HashMap::new());
        let second = extract_geophysical(&crlf, &HashMap::new());
        assert_eq!(first, second);
        assert_eq!(first, extract_geophysical(MARS, &HashMap::new()));
    }

    #[test]
    fn test_empty_properties() {
        let props = GeophysicalProperties::default();
        assert_eq!(serde_json::to_string(&props).unwrap(), "{}");
    }
}
