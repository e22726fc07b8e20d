//! # Constants and unit aliases
//!
//! Physical constants and conversion factors used to normalize the values read from
//! JPL Horizons responses into the canonical units of a [`BodyRecord`](crate::record::BodyRecord):
//!
//! - masses in **solar masses**,
//! - lengths in **astronomical units**,
//! - temperatures in **Kelvin**,
//! - densities in **g/cm³**,
//! - rotation rates in **rad/s**,
//! - angles in **degrees**.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Nominal solar mass in kilograms (IAU 2015 resolution B3, GM☉ / G)
pub const SOLAR_MASS_KG: f64 = 1.988_409_870_698_051e30;

/// Mass assumed for a body whose mass cannot be read nor derived, in kilograms
pub const FALLBACK_MASS_KG: f64 = 1.0e16;

/// Kilometers → centimeters
pub const CM_PER_KM: f64 = 1.0e5;

/// Grams → kilograms
pub const KG_PER_G: f64 = 1.0e-3;

/// Version of the text layout contract implemented by the field rules.
///
/// Bump it whenever a rule is added or changed for a new Horizons format variant,
/// together with a golden file under `tests/data/`.
pub const EXTRACTION_CONTRACT_VERSION: u32 = 1;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Mass in solar masses
pub type SolarMass = f64;
/// Mass in kilograms
pub type Kilogram = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Temperature in Kelvin
pub type Kelvin = f64;
/// Density in g/cm³
pub type GramPerCm3 = f64;
/// Angular rate in rad/s
pub type RadianPerSecond = f64;
/// Angle in degrees
pub type Degree = f64;
/// Julian Date (days, TDB)
pub type JD = f64;

/// Kilograms → solar masses
pub fn kg_to_solar_mass(mass: Kilogram) -> SolarMass {
    mass / SOLAR_MASS_KG
}

/// Kilometers → astronomical units
pub fn km_to_au(distance: Kilometer) -> AstronomicalUnit {
    distance / AU
}
