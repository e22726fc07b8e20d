//! # Per-property extraction rules
//!
//! Each rule looks at a single line of the physical-data block and returns the
//! converted value when the line carries the property, `None` otherwise.
//! Matching is case-insensitive and searches anywhere in the line, since Horizons
//! lays out two properties per line:
//!
//! ```text
//!  Vol. Mean Radius (km) = 6371.01+-0.02   Mass x10^24 (kg)= 5.97219+-0.0006
//!  Mean density, g/cm^3  = 5.51            Obliquity to orbit, deg  = 23.4392911
//! ```
//!
//! A captured number that cannot be read as `f64` (e.g. a lone `.`) is a non-match.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::constants::{
    km_to_au, kg_to_solar_mass, AstronomicalUnit, Degree, GramPerCm3, Kelvin, RadianPerSecond,
    SolarMass,
};

static MASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Mass\s*x\s*10\^(\d+)\s*\(\s*(g|kg)\s*\)\s*=\s*([\d.]+)")
        .expect("invalid mass regex")
});

static RADIUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Radius\s*\(\s*km\s*\)\s*=\s*([\d.]+)").expect("invalid radius regex")
});

// the Sun labels its radius differently
static VOL_MEAN_RADIUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Vol\.\s*mean\s*radius\s*,\s*km\s*=\s*([\d.]+)")
        .expect("invalid mean radius regex")
});

static TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:Mean Temperature|Mean surface temp \(Ts\)|Atmos\. temp\. \(1 bar\))[^=]*=\s*([\d.]+)",
    )
    .expect("invalid temperature regex")
});

static OBLIQUITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)obliquity[^\d]*(?:\[[^\]]*\])?\s*=\s*([\d.]+)|\w+,\s*deg\s*=\s*([\d.]+)")
        .expect("invalid obliquity regex")
});

// Horizons sometimes prints `(g cm^-3)` instead of `(g/cm^3)`
static DENSITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Density\s*.\s*(g\s*/?\s*cm\^-?3)\s*.\s*=\s*([\d.]+)")
        .expect("invalid density regex")
});

static ROTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rot\.?\s*rat[e]?,?\s*[(,]?\s*rad/s\s*\)?\s*=\s*(-?[\d.]+)")
        .expect("invalid rotation regex")
});

fn number(caps: &Captures, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse().ok()
}

/// `Mass x 10^<exp> (<g|kg>) = <value>`, in solar masses.
pub fn mass(line: &str) -> Option<SolarMass> {
    let caps = MASS.captures(line)?;

    let mut exponent: i32 = caps[1].parse().ok()?;
    if caps[2].eq_ignore_ascii_case("g") {
        exponent -= 3;
    }
    let value = number(&caps, 3)?;

    Some(kg_to_solar_mass(value * 10f64.powi(exponent)))
}

/// `Radius (km) = <value>`, falling back to `Vol. mean radius, km = <value>`, in AU.
pub fn radius(line: &str) -> Option<AstronomicalUnit> {
    let value_km = match RADIUS.captures(line) {
        Some(caps) => number(&caps, 1),
        None => VOL_MEAN_RADIUS
            .captures(line)
            .and_then(|caps| number(&caps, 1)),
    }?;
    Some(km_to_au(value_km))
}

/// Mean (surface or 1 bar) temperature, in Kelvin.
pub fn temperature(line: &str) -> Option<Kelvin> {
    TEMPERATURE
        .captures(line)
        .and_then(|caps| number(&caps, 1))
}

/// Obliquity to orbit, in degrees.
pub fn obliquity(line: &str) -> Option<Degree> {
    let caps = OBLIQUITY.captures(line)?;
    number(&caps, 1).or_else(|| number(&caps, 2))
}

/// Mean density, in g/cm³.
pub fn density(line: &str) -> Option<GramPerCm3> {
    DENSITY.captures(line).and_then(|caps| number(&caps, 2))
}

/// Rotation rate in rad/s, negative for retrograde rotators.
pub fn rotation(line: &str) -> Option<RadianPerSecond> {
    ROTATION.captures(line).and_then(|caps| number(&caps, 1))
}

#[cfg(test)]
mod field_rules_tests {
    use super::*;
    use crate::constants::{AU, SOLAR_MASS_KG};
    use approx::assert_relative_eq;

    #[test]
    fn test_mass_kg() {
        let mass = mass("Vol. Mean Radius (km) = 6371.01+-0.02   Mass x10^24 (kg)= 5.97219+-0.0006")
            .unwrap();
        assert_relative_eq!(mass, 5.97219e24 / SOLAR_MASS_KG, max_relative = 1e-12);
    }

    #[test]
    fn test_mass_grams() {
        let mass = mass("Mass x 10^26 (g) = 7.349").unwrap();
        assert_relative_eq!(mass, 7.349e23 / SOLAR_MASS_KG, max_relative = 1e-12);
    }

    #[test]
    fn test_mass_no_match() {
        assert_eq!(mass("Mass, 10^24 kg = ~1.9885e6"), None);
        assert_eq!(mass("Mass x10^23 (kg)= ."), None);
        assert_eq!(mass("Density (g/cm^3) = 5.427"), None);
    }

    #[test]
    fn test_radius() {
        let radius = radius("Vol. Mean Radius (km) = 2440+-1   Density (g cm^-3)     = 5.427").unwrap();
        assert_relative_eq!(radius, 2440.0 / AU);

        let radius = super::radius("Vol. mean radius, km = 695700   Volume, 10^12 km^3 = 1412000").unwrap();
        assert_relative_eq!(radius, 695700.0 / AU);

        assert_eq!(super::radius("Equ. radius, km = 6378.137"), None);
    }

    #[test]
    fn test_temperature() {
        assert_eq!(
            temperature("Mean Temperature (K)  = 440    Mean surface temp (Ts), K= 440"),
            Some(440.0)
        );
        assert_eq!(temperature("Mean surface temp (Ts), K= 287.6"), Some(287.6));
        assert_eq!(temperature("Atmos. temp. (1 bar) = 165+-5 K"), Some(165.0));
        assert_eq!(temperature("Mean sidereal day, hr = 23.9344695944"), None);
    }

    #[test]
    fn test_obliquity() {
        assert_eq!(
            obliquity("Mean surface temp (Ts), K= 287.6  Obliquity to orbit, deg = 23.4392911"),
            Some(23.4392911)
        );
        assert_eq!(
            obliquity("Obliquity to orbit[1]  = 2.11' +/- 0.1"),
            Some(2.11)
        );
        assert_eq!(obliquity("Orbit inclination, deg = 1.304"), Some(1.304));
        assert_eq!(obliquity("Escape speed, km/s = 11.19"), None);
    }

    #[test]
    fn test_density() {
        assert_eq!(density("Density (g/cm^3)      = 1.408"), Some(1.408));
        assert_eq!(density("Density (g cm^-3)     = 5.427"), Some(5.427));
        assert_eq!(density("Mean density, g/cm^3  = 5.51"), Some(5.51));
        assert_eq!(density("Density, kg/m^3 = 5510"), None);
    }

    #[test]
    fn test_rotation() {
        assert_eq!(
            rotation("Rot. Rate (rad/s)      = 0.00007292115"),
            Some(0.00007292115)
        );
        assert_eq!(
            rotation("Sidereal rot. period  = 243.018484 d  Rot. Rate (rad/s)= -0.00000029924"),
            Some(-0.00000029924)
        );
        assert_eq!(
            rotation("Mean rot. rate, rad/s  = 0.0000708822"),
            Some(0.0000708822)
        );
        assert_eq!(rotation("Sidereal rot. period  = 58.6463 d"), None);
    }
}
