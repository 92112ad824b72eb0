//! Jinja environment setup for bqx

use crate::context::DateGlobals;
use crate::decode::VariableMap;
use crate::error::{JinjaError, JinjaResult};
use crate::functions::{json_to_minijinja_value, make_input_date_fn, make_var_fn};
use chrono::NaiveDate;
use minijinja::{Environment, UndefinedBehavior, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Variables visible to the SQL and destination templates of one job.
///
/// Globals come from the execution date; caller-supplied variables are
/// passed as the render context and therefore shadow globals of the same
/// name. Referencing an unknown name is a render error.
pub struct VariableEnvironment {
    env: Environment<'static>,
    globals: DateGlobals,
    overrides: VariableMap,
}

impl VariableEnvironment {
    /// Create an environment holding only the date-derived globals
    pub fn new(execution_date: NaiveDate) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let globals = DateGlobals::new(execution_date);
        for (name, value) in globals.to_values() {
            env.add_global(name, value);
        }

        // Register input_date() function
        env.add_function("input_date", make_input_date_fn());

        // Register var() function
        let overrides = VariableMap::new();
        env.add_function("var", make_var_fn(&overrides));

        Self {
            env,
            globals,
            overrides,
        }
    }

    /// Layer caller-supplied variables over the globals
    pub fn with_overrides(mut self, overrides: VariableMap) -> Self {
        self.env.add_function("var", make_var_fn(&overrides));
        self.overrides = overrides;
        self
    }

    /// The date the globals were derived from
    pub fn execution_date(&self) -> NaiveDate {
        self.globals.today
    }

    /// Every name defined by the environment, with caller variables applied
    pub fn merged(&self) -> BTreeMap<String, Value> {
        let mut merged: BTreeMap<String, Value> = self
            .globals
            .to_values()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        for (name, value) in &self.overrides {
            merged.insert(name.clone(), json_to_minijinja_value(value));
        }
        merged
    }

    /// Render a template string
    pub fn resolve(&self, template: &str) -> JinjaResult<String> {
        self.env
            .render_str(template, &self.overrides)
            .map_err(JinjaError::from)
    }
}

impl fmt::Debug for VariableEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableEnvironment")
            .field("globals", &self.globals)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

/// Render `template` against `environment`
pub fn resolve(template: &str, environment: &VariableEnvironment) -> JinjaResult<String> {
    environment.resolve(template)
}

#[cfg(test)]
#[path = "environment_test.rs"]
mod tests;
