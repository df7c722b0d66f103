//! Python bindings for rust-pan.
//!
//! # Quick Start
//!
//! ```python
//! import rust_pan
//!
//! rust_pan.validate_card("5555 5555 5555 4444")
//! # {'is_valid': True, 'mii_digit': 5, 'issuer_category': 'Banking and financial', ...}
//!
//! rust_pan.generate_card("Visa", seed=42)
//! # {'generation_success': True, 'card_number': 4...}
//!
//! registry = rust_pan.Registry.from_json(open("issuers.json").read())
//! registry.validate_card(4111111111111111)
//! ```
//!
//! Malformed input raises instead of returning a dict: `TypeError` for a
//! card number that is neither `str` nor `int` (or is `0` or `""`),
//! `ValueError` for text that is not digits (after removing spaces) and for
//! an empty issuer name. Integers wider than 64 bits are accepted.

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyInt, PyList, PyString};
use std::sync::OnceLock;

mod py_registry;

pub use py_registry::PyRegistry;

use crate::classify::CardClassifier;
use crate::core::{CardNumberInput, GeneratorConfig};
use crate::generate::CardGenerator;
use crate::registry::{well_known, InMemoryRegistry, IssuerRegistry};
use crate::response::{GenerationResponse, ValidationResponse};

fn builtin_registry() -> &'static InMemoryRegistry {
    static REGISTRY: OnceLock<InMemoryRegistry> = OnceLock::new();
    REGISTRY.get_or_init(well_known)
}

const WRONG_TYPE: &str = "`card_number` must be passed in as either an integer or a string";

/// Accept `str` or `int` (but not `bool`) card numbers.
///
/// Integers of any width are read through their decimal text. `0` and `""`
/// count as missing and raise `TypeError`, like any other unusable value.
fn card_input(card_number: &Bound<'_, PyAny>) -> PyResult<CardNumberInput> {
    let input = if let Ok(text) = card_number.downcast::<PyString>() {
        CardNumberInput::Text(text.to_cow()?.into_owned())
    } else if card_number.is_instance_of::<PyInt>() && !card_number.is_instance_of::<PyBool>() {
        match card_number.extract::<u64>() {
            Ok(value) => CardNumberInput::Integer(value),
            Err(_) => {
                let text = card_number.str()?;
                CardNumberInput::from_wide_integer(&text.to_cow()?).ok_or_else(|| {
                    PyValueError::new_err("`card_number` must be a non-negative integer")
                })?
            }
        }
    } else {
        return Err(PyTypeError::new_err(WRONG_TYPE));
    };

    if input.is_absent() {
        return Err(PyTypeError::new_err(WRONG_TYPE));
    }
    Ok(input)
}

/// Convert a JSON value into the equivalent Python object.
fn json_to_py(py: Python<'_>, value: &serde_json::Value) -> PyResult<PyObject> {
    use serde_json::Value;

    Ok(match value {
        Value::Null => py.None(),
        Value::Bool(b) => (*b).into_py(py),
        Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(u), _) => u.into_py(py),
            (None, Some(i)) => i.into_py(py),
            _ => n.as_f64().unwrap_or_default().into_py(py),
        },
        Value::String(s) => s.as_str().into_py(py),
        Value::Array(items) => {
            let list = PyList::empty_bound(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            list.into_py(py)
        }
        Value::Object(fields) => {
            let dict = PyDict::new_bound(py);
            for (key, item) in fields {
                dict.set_item(key, json_to_py(py, item)?)?;
            }
            dict.into_py(py)
        }
    })
}

fn to_dict<T: serde::Serialize>(py: Python<'_>, response: &T) -> PyResult<PyObject> {
    let value = serde_json::to_value(response).map_err(|e| PyValueError::new_err(e.to_string()))?;
    json_to_py(py, &value)
}

pub(crate) fn validate_with<R: IssuerRegistry>(
    py: Python<'_>,
    registry: R,
    card_number: &Bound<'_, PyAny>,
) -> PyResult<PyObject> {
    let input = card_input(card_number)?;
    let outcome = CardClassifier::new(registry)
        .classify_input(input)
        .map_err(|e| PyValueError::new_err(format!("`card_number` string does not represent an integer: {}", e)))?;
    to_dict(py, &ValidationResponse::from(outcome))
}

pub(crate) fn generate_with<R: IssuerRegistry>(
    py: Python<'_>,
    registry: R,
    issuer: &str,
    seed: Option<u64>,
) -> PyResult<PyObject> {
    if issuer.trim().is_empty() {
        return Err(PyValueError::new_err("A non-empty `issuer` string is required"));
    }
    let mut rng = GeneratorConfig { seed }.rng();
    let outcome = CardGenerator::new(registry).generate(issuer, &mut rng);
    to_dict(py, &GenerationResponse::from(outcome))
}

/// Validate a card number against the built-in issuer table.
#[pyfunction]
fn validate_card(py: Python<'_>, card_number: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    validate_with(py, builtin_registry(), card_number)
}

/// Generate a card number for an issuer in the built-in table.
#[pyfunction]
#[pyo3(signature = (issuer, seed = None))]
fn generate_card(py: Python<'_>, issuer: &str, seed: Option<u64>) -> PyResult<PyObject> {
    generate_with(py, builtin_registry(), issuer, seed)
}

/// rust_pan: ISO/IEC 7812 card number validation and generation.
#[pymodule]
fn rust_pan(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(validate_card, m)?)?;
    m.add_function(wrap_pyfunction!(generate_card, m)?)?;
    m.add_class::<PyRegistry>()?;

    Ok(())
}
