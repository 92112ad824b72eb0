//! Jinja template functions: input_date() and var().

use crate::context::DateValue;
use crate::decode::VariableMap;
use chrono::NaiveDate;
use minijinja::value::Value;
use minijinja::Error;
use std::sync::Arc;

/// Create the `input_date(year, month, day)` function that builds a date value
///
/// Usage in templates:
/// ```jinja
/// WHERE day >= '{{ input_date(2024, 1, 1) }}'
/// {{ input_date(today.year, 1, 1).strftime('%Y%m%d') }}
/// ```
pub(crate) fn make_input_date_fn(
) -> impl Fn(i32, u32, u32) -> Result<Value, Error> + Send + Sync + Clone + 'static {
    |year: i32, month: u32, day: u32| {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| DateValue::new(date).into_value())
            .ok_or_else(|| {
                Error::new(
                    minijinja::ErrorKind::InvalidOperation,
                    format!("input_date({}, {}, {}) is not a valid date", year, month, day),
                )
            })
    }
}

/// Create the `var(name, default)` function over the caller-supplied variables
///
/// ```jinja
/// {{ var('country') }}
/// {{ var('limit', 1000) }}
/// ```
///
/// Without a default, an unknown name is an error like any other undefined
/// variable.
pub(crate) fn make_var_fn(
    vars: &VariableMap,
) -> impl Fn(&str, Option<Value>) -> Result<Value, Error> + Send + Sync + Clone + 'static {
    let vars = Arc::new(vars.clone());
    move |name: &str, default: Option<Value>| match (vars.get(name), default) {
        (Some(value), _) => Ok(json_to_minijinja_value(value)),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(Error::new(
            minijinja::ErrorKind::UndefinedError,
            format!("var('{}') is not set and has no default", name),
        )),
    }
}

/// Convert a JSON value from the variables payload into a template value
pub(crate) fn json_to_minijinja_value(json: &serde_json::Value) -> Value {
    Value::from_serialize(json)
}

#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;
