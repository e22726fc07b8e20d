use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    horizons_errors::HorizonsError,
    horizons_table::{read_first_row, TableRow},
    source::TableKind,
};

/// Cartesian triple, serialized as `{x, y, z}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Cartesian> for Vector3<f64> {
    fn from(c: Cartesian) -> Self {
        Vector3::new(c.x, c.y, c.z)
    }
}

impl From<Vector3<f64>> for Cartesian {
    fn from(v: Vector3<f64>) -> Self {
        Cartesian {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Position and velocity of a body at the lookup epoch, in the units of the
/// response: AU and AU/day, as requested with `OUT_UNITS=AU-D`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateVector {
    pub position: Cartesian,
    pub velocity: Cartesian,
}

impl StateVector {
    pub fn pos_vector(&self) -> Vector3<f64> {
        self.position.into()
    }

    pub fn vel_vector(&self) -> Vector3<f64> {
        self.velocity.into()
    }
}

/// One row of a `VECTORS` CSV table (`VEC_TABLE` 2 or higher)
#[derive(Debug, Deserialize, PartialEq)]
struct VectorRow {
    _jd: String,
    _date: String,
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    vz: f64,
}

impl TableRow for VectorRow {
    const COLUMNS: usize = 8;
}

/// Read the state vector from the first row of a `VECTORS` response.
///
/// Return
/// ------
/// * an error if the `$$SOE` / `$$EOE` sentinels are missing or the row is malformed,
///   a body cannot be represented without its state vector
pub fn extract_state_vector(text: &str) -> Result<StateVector, HorizonsError> {
    let row: VectorRow = read_first_row(text, TableKind::Vectors)?;
    Ok(StateVector {
        position: Cartesian {
            x: row.x,
            y: row.y,
            z: row.z,
        },
        velocity: Cartesian {
            x: row.vx,
            y: row.vy,
            z: row.vz,
        },
    })
}
