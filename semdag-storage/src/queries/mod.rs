//! SQL query modules, one per concern.

pub mod markov;
pub mod predication;
pub mod sentences;

use std::rc::Rc;

use rusqlite::types::Value;
use rusqlite::vtab::array;
use semdag_core::EXCLUDED_SEMTYPES;

/// Bind a string set as an `rarray` parameter value.
pub(crate) fn string_array(values: &[String]) -> array::Array {
    Rc::new(values.iter().cloned().map(Value::from).collect::<Vec<Value>>())
}

/// `('acty','bhvr',…)`: the compiled-in semantic-type exclusion list.
pub(crate) fn excluded_semtypes_sql() -> String {
    let quoted: Vec<String> = EXCLUDED_SEMTYPES.iter().map(|s| format!("'{s}'")).collect();
    format!("({})", quoted.join(","))
}
