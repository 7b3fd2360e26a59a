use crate::apriori::{apriori, MiningParams, TransactionSet};
use crate::error::AprioriError;
use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

type PyLevel<'py> = (Bound<'py, PyArray2<usize>>, Vec<usize>);
type PyRule = (Vec<usize>, Vec<usize>, f64, f64);

fn to_py_err(e: AprioriError) -> PyErr {
    match e {
        AprioriError::LookupInconsistency { .. } => PyRuntimeError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

/// Mines a one-hot `int32` matrix. Returns `(levels, rules, total)` where
/// each level is `(itemsets[n, L], supports)` and each rule is
/// `(antecedent, consequent, confidence, lift)`; items are column indices.
#[pyfunction]
#[pyo3(name = "apriori")]
fn apriori_py<'py>(
    py: Python<'py>,
    transactions: PyReadonlyArray2<'py, i32>,
    min_support: f64,
    min_confidence: f64,
) -> PyResult<(Vec<PyLevel<'py>>, Vec<PyRule>, usize)> {
    let params = MiningParams::new(min_support, min_confidence).map_err(to_py_err)?;
    let transactions = TransactionSet::from_matrix(transactions.as_array()).map_err(to_py_err)?;
    let result = apriori(&transactions, params).map_err(to_py_err)?;

    let mut levels = Vec::new();
    for table in result.itemsets.levels() {
        let (data, supports) = table.flatten();
        let array = Array2::from_shape_vec((table.len(), table.level()), data)
            .map_err(|_| PyValueError::new_err("Failed to create array"))?;

        levels.push((array.into_pyarray(py), supports));
    }

    let rules = result
        .iter_rules()
        .map(|rule| {
            (
                rule.antecedent.clone(),
                rule.consequent.clone(),
                rule.confidence,
                rule.lift,
            )
        })
        .collect();

    Ok((levels, rules, result.total_transactions()))
}

#[pymodule]
fn arules(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(apriori_py, m)?)?;
    Ok(())
}
