//! bqx-jinja - Jinja templating layer for bqx
//!
//! Resolves the SQL and destination URI templates of a job. Every template
//! sees the date globals derived from the execution date (`today`,
//! `today_dash`, `today_slash`, `yesterday`, `yesterday_dash`,
//! `yesterday_slash`), the `input_date()` and `var()` functions, and the
//! caller-supplied variables, which win over globals of the same name.
//!
//! Raw inputs are decoded leniently: SQL may be base64-wrapped and the
//! variables payload may be malformed. See [`decode_sql`] and
//! [`decode_variables`].

pub mod context;
pub mod decode;
pub mod environment;
pub mod error;
pub(crate) mod functions;
pub mod resolver;

pub use context::{DateGlobals, DateValue};
pub use decode::{decode_sql, decode_variables, try_decode_sql, try_decode_variables, VariableMap};
pub use environment::{resolve, VariableEnvironment};
pub use error::{DecodeError, JinjaError, JinjaResult};
pub use resolver::{resolve_job, ResolvedJob};
