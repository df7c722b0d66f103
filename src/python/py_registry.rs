//! Registry bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::sync::Arc;

use super::{generate_with, validate_with};
use crate::registry::{well_known, InMemoryRegistry, RegistrySnapshot};

/// Python wrapper for an issuer registry.
///
/// Immutable once built; shared between clones.
#[pyclass(name = "Registry", frozen)]
#[derive(Clone)]
pub struct PyRegistry(pub Arc<InMemoryRegistry>);

#[pymethods]
impl PyRegistry {
    /// Registry with the built-in issuer table.
    #[new]
    fn new() -> Self {
        Self(Arc::new(well_known()))
    }

    /// Build a registry from a JSON snapshot.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let registry = RegistrySnapshot::from_json(json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?
            .into_registry()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self(Arc::new(registry)))
    }

    /// Network names, sorted.
    fn issuers(&self) -> Vec<String> {
        self.0.issuers().map(|i| i.network_name.clone()).collect()
    }

    /// Validate a card number (`str` or `int`).
    fn validate_card(&self, py: Python<'_>, card_number: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        validate_with(py, self.0.as_ref(), card_number)
    }

    /// Generate a card number for an issuer.
    #[pyo3(signature = (issuer, seed = None))]
    fn generate_card(&self, py: Python<'_>, issuer: &str, seed: Option<u64>) -> PyResult<PyObject> {
        generate_with(py, self.0.as_ref(), issuer, seed)
    }

    fn __len__(&self) -> usize {
        self.0.issuer_count()
    }

    fn __repr__(&self) -> String {
        format!(
            "Registry(issuers={}, iins={})",
            self.0.issuer_count(),
            self.0.iin_count()
        )
    }
}
