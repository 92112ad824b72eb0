//! Date-derived template globals.
//!
//! Provides the fixed layer of the variable environment: the execution date
//! and the day before it, each exposed as a date value and as dashed and
//! slashed strings.

use chrono::{Datelike, Days, NaiveDate};
use minijinja::value::{from_args, Object, ObjectRepr, Value};
use minijinja::{Error, ErrorKind, State};
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::sync::Arc;

/// `2024-03-02`
pub const DASH_FORMAT: &str = "%Y-%m-%d";

/// `2024/03/02`
pub const SLASH_FORMAT: &str = "%Y/%m/%d";

/// A calendar date usable from templates.
///
/// Renders as `YYYY-MM-DD`. Exposes `year`, `month`, `day` and `weekday`
/// (Monday = 0) attributes and the `strftime(fmt)`, `isoformat()` and
/// `add_days(n)` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateValue(NaiveDate);

impl DateValue {
    /// Wrap a date
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The wrapped date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Convert into a template value
    pub fn into_value(self) -> Value {
        Value::from_object(self)
    }

    fn strftime(&self, format: &str) -> Result<String, Error> {
        let mut out = String::new();
        write!(out, "{}", self.0.format(format)).map_err(|_| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("invalid date format '{}'", format),
            )
        })?;
        Ok(out)
    }

    fn add_days(&self, days: i64) -> Result<Self, Error> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted.map(Self).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("date {} shifted by {} days is out of range", self.0, days),
            )
        })
    }
}

impl Object for DateValue {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "year" => Some(Value::from(self.0.year())),
            "month" => Some(Value::from(self.0.month())),
            "day" => Some(Value::from(self.0.day())),
            "weekday" => Some(Value::from(self.0.weekday().num_days_from_monday())),
            _ => None,
        }
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "strftime" => {
                let (format,): (&str,) = from_args(args)?;
                Ok(Value::from(self.strftime(format)?))
            }
            "isoformat" => {
                if !args.is_empty() {
                    return Err(Error::new(
                        ErrorKind::TooManyArguments,
                        "isoformat() takes no arguments",
                    ));
                }
                Ok(Value::from(self.strftime(DASH_FORMAT)?))
            }
            "add_days" => {
                let (days,): (i64,) = from_args(args)?;
                Ok(self.add_days(days)?.into_value())
            }
            _ => Err(Error::from(ErrorKind::UnknownMethod)),
        }
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        Self: Sized + 'static,
    {
        write!(f, "{}", self.0.format(DASH_FORMAT))
    }
}

/// The fixed, date-derived layer of the variable environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateGlobals {
    /// Execution date
    pub today: NaiveDate,
    /// Execution date minus one day
    pub yesterday: NaiveDate,
}

impl DateGlobals {
    /// Derive the globals for an execution date
    pub fn new(today: NaiveDate) -> Self {
        // NaiveDate::MIN has no predecessor
        let yesterday = today.pred_opt().unwrap_or(today);
        Self { today, yesterday }
    }

    /// Template values keyed by global name
    pub fn to_values(&self) -> BTreeMap<&'static str, Value> {
        let mut values = BTreeMap::new();
        values.insert("today", DateValue::new(self.today).into_value());
        values.insert(
            "today_dash",
            Value::from(self.today.format(DASH_FORMAT).to_string()),
        );
        values.insert(
            "today_slash",
            Value::from(self.today.format(SLASH_FORMAT).to_string()),
        );
        values.insert("yesterday", DateValue::new(self.yesterday).into_value());
        values.insert(
            "yesterday_dash",
            Value::from(self.yesterday.format(DASH_FORMAT).to_string()),
        );
        values.insert(
            "yesterday_slash",
            Value::from(self.yesterday.format(SLASH_FORMAT).to_string()),
        );
        values
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
