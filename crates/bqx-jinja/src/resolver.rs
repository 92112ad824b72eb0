//! Turn a raw job invocation into the final SQL and destination strings.

use crate::decode::{decode_sql, decode_variables};
use crate::environment::VariableEnvironment;
use crate::error::{JinjaError, JinjaResult};
use bqx_core::JobInvocation;

/// Fully rendered inputs of the export pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedJob {
    /// Query to stage
    pub sql: String,
    /// Blob location to extract to
    pub destination_uri: String,
}

/// Decode and render both templates of `invocation`.
///
/// Both templates share one environment, so they see the same globals and
/// the same caller variables. Any render error is returned before anything
/// touches the warehouse.
pub fn resolve_job(invocation: &JobInvocation) -> JinjaResult<ResolvedJob> {
    let sql_template = decode_sql(invocation.sql());
    let overrides = decode_variables(invocation.json_vars());
    let env = VariableEnvironment::new(invocation.execution_date()).with_overrides(overrides);
    log::debug!(
        "rendering templates for {} with variables {:?}",
        env.execution_date(),
        env.merged().keys().collect::<Vec<_>>()
    );

    let sql = env
        .resolve(&sql_template)
        .map_err(|e| in_template("sql", e))?;
    let destination_uri = env
        .resolve(invocation.destination_uri())
        .map_err(|e| in_template("destination-uri", e))?;

    log::debug!("resolved destination URI: {}", destination_uri);
    Ok(ResolvedJob {
        sql,
        destination_uri,
    })
}

fn in_template(name: &str, err: JinjaError) -> JinjaError {
    match err {
        JinjaError::RenderError(msg) => {
            JinjaError::RenderError(format!("{} template: {}", name, msg))
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
