//! # Osculating orbital elements
//!
//! Reads the first row of an `ELEMENTS` CSV response. Horizons prints the twelve
//! osculating elements after the JD and calendar-date columns, always in the order
//! below:
//!
//! | column | field                          | unit (`OUT_UNITS=AU-D`) |
//! |--------|--------------------------------|-------------------------|
//! | EC     | eccentricity                   |                         |
//! | QR     | periapsis distance             | AU                      |
//! | IN     | inclination                    | deg                     |
//! | OM     | longitude of the ascending node| deg                     |
//! | W      | argument of perifocus          | deg                     |
//! | Tp     | time of periapsis              | JD (TDB)                |
//! | N      | mean motion                    | deg/day                 |
//! | MA     | mean anomaly                   | deg                     |
//! | TA     | true anomaly                   | deg                     |
//! | A      | semi-major axis                | AU                      |
//! | AD     | apoapsis distance              | AU                      |
//! | PR     | sidereal orbit period          | day                     |
//!
//! Values are kept in the units of the response.
//!
//! The central body of the reference frame has no orbit around itself: when the
//! caller flags the body as the primary, no element is read.
use serde::{Deserialize, Serialize};

use crate::{
    horizons_errors::HorizonsError,
    horizons_table::{read_first_row, TableRow},
    source::TableKind,
};

/// The twelve osculating elements, in Horizons column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub eccentricity: f64,
    pub periapsis_distance: f64,
    pub inclination: f64,
    pub ascending_node_longitude: f64,
    pub periapsis_argument: f64,
    pub time_of_periapsis: f64,
    pub mean_motion: f64,
    pub mean_anomaly: f64,
    pub true_anomaly: f64,
    pub semi_major_axis: f64,
    pub apoapsis_distance: f64,
    pub sidereal_period: f64,
}

#[derive(Debug, Deserialize)]
struct ElementsRow {
    _jd: String,
    _date: String,
    ec: f64,
    qr: f64,
    inc: f64,
    om: f64,
    w: f64,
    tp: f64,
    n: f64,
    ma: f64,
    ta: f64,
    a: f64,
    ad: f64,
    pr: f64,
}

impl From<ElementsRow> for OrbitalElements {
    fn from(row: ElementsRow) -> Self {
        OrbitalElements {
            eccentricity: row.ec,
            periapsis_distance: row.qr,
            inclination: row.inc,
            ascending_node_longitude: row.om,
            periapsis_argument: row.w,
            time_of_periapsis: row.tp,
            mean_motion: row.n,
            mean_anomaly: row.ma,
            true_anomaly: row.ta,
            semi_major_axis: row.a,
            apoapsis_distance: row.ad,
            sidereal_period: row.pr,
        }
    }
}

impl TableRow for ElementsRow {
    const COLUMNS: usize = 14;
}

/// Read the orbital elements of a body.
///
/// Arguments
/// ---------
/// * `text`: the raw `ELEMENTS` response
/// * `is_primary`: true when the body is the center of the reference frame
///
/// Return
/// ------
/// * `Ok(None)` for the primary, the elements of the first row otherwise
pub fn extract_orbital_elements(
    text: &str,
    is_primary: bool,
) -> Result<Option<OrbitalElements>, HorizonsError> {
    if is_primary {
        return Ok(None);
    }
    let row: ElementsRow = read_first_row(text, TableKind::Elements)?;
    Ok(Some(row.into()))
}

#[cfg(test)]
mod orbital_elements_tests {
    use super::*;

    const EARTH_ELEMENTS: &str = "
*******************************************************************************
            JDTDB,            Calendar Date (TDB),                     EC,                     QR,                     IN,                     OM,                      W,                     Tp,                      N,                     MA,                     TA,                      A,                     AD,                     PR,
**************************************************************************************************************************
$$SOE
2440400.500000000, A.D. 1969-Jun-28 00:00:00.0000,  1.711596536628932E-02,  9.828351633274511E-01,  2.434578622316004E-03,  1.761278104290506E+02,  2.857163823223706E+02,  2.440225006372946E+06,  9.859441067435091E-01,  1.730253637099697E+02,  1.734835282998808E+02,  9.999498339103147E-01,  1.017064504493178E+00,  3.651305575692137E+02,
$$EOE
*******************************************************************************
";

    #[test]
    fn test_extract_elements() {
        let elements = extract_orbital_elements(EARTH_ELEMENTS, false)
            .unwrap()
            .unwrap();
        assert_eq!(elements.eccentricity, 1.711596536628932E-02);
        assert_eq!(elements.periapsis_distance, 9.828351633274511E-01);
        assert_eq!(elements.inclination, 2.434578622316004E-03);
        assert_eq!(elements.ascending_node_longitude, 1.761278104290506E+02);
        assert_eq!(elements.periapsis_argument, 2.857163823223706E+02);
        assert_eq!(elements.time_of_periapsis, 2.440225006372946E+06);
        assert_eq!(elements.mean_motion, 9.859441067435091E-01);
        assert_eq!(elements.mean_anomaly, 1.730253637099697E+02);
        assert_eq!(elements.true_anomaly, 1.734835282998808E+02);
        assert_eq!(elements.semi_major_axis, 9.999498339103147E-01);
        assert_eq!(elements.apoapsis_distance, 1.017064504493178E+00);
        assert_eq!(elements.sidereal_period, 3.651305575692137E+02);
    }

    #[test]
    fn test_primary_has_no_elements() {
        assert_eq!(extract_orbital_elements("", true), Ok(None));
    }

    #[test]
    fn test_missing_sentinel_is_an_error() {
        assert!(extract_orbital_elements("no table here", false).is_err());
    }

    #[test]
    fn test_short_row() {
        let text = "$$SOE\n2440400.5, A.D. 1969, 0.1, 2.0, 3.0,\n$$EOE";
        assert!(matches!(
            extract_orbital_elements(text, false),
            Err(HorizonsError::InvalidRow { .. })
        ));
    }
}
