use approx::assert_relative_eq;
use camino::Utf8Path;
use horizons_bodies::{record::BodyRecord, Catalog, DirectorySource};

pub const DATA_DIR: &str = "tests/data";

/// Route the crate's `tracing` events to the test output, `RUST_LOG` filters them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn data_source() -> DirectorySource {
    DirectorySource::new(DATA_DIR)
}

pub fn data_catalog() -> Catalog {
    let path = format!("{DATA_DIR}/catalog.json");
    Catalog::from_path(Utf8Path::new(&path)).unwrap()
}

pub fn assert_mass_close(body: &BodyRecord, expected: f64, epsilon: f64) {
    assert_relative_eq!(body.data.mass, expected, max_relative = epsilon);
}
