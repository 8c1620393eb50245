//! Curve style overrides: one style broadcast to every curve, or one per curve.

use super::DisplayError;
use crate::plot::LineStyle;
use serde_json::Value;

/// Overrides for the curves a display draws.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveStyles {
    /// Applied to every curve.
    Broadcast(LineStyle),
    /// Applied positionally, estimator-major then label-minor.
    PerCurve(Vec<LineStyle>),
}

impl CurveStyles {
    /// One style per curve, for `n_curves` curves.
    pub fn resolve(styles: Option<&CurveStyles>, n_curves: usize) -> Result<Vec<LineStyle>, DisplayError> {
        match styles {
            None => Ok(vec![LineStyle::default(); n_curves]),
            Some(CurveStyles::Broadcast(style)) => Ok(vec![style.clone(); n_curves]),
            Some(CurveStyles::PerCurve(list)) if list.len() == n_curves => Ok(list.clone()),
            Some(CurveStyles::PerCurve(list)) if n_curves > 1 => Err(DisplayError::MultipleCurvesKwargs {
                expected: n_curves,
                got: format!("a list of {} style(s)", list.len()),
            }),
            Some(CurveStyles::PerCurve(list)) => Err(DisplayError::InvalidCurveKwargs(format!(
                "expected a single style for a single curve, got a list of {}",
                list.len()
            ))),
        }
    }

    /// Interpret an untyped override: an object broadcasts, an array applies
    /// per curve, `null` means no override.
    ///
    /// Any other JSON value is rejected; with more than one curve the error
    /// is [`DisplayError::MultipleCurvesKwargs`].
    pub fn from_value(value: &Value, n_curves: usize) -> Result<Option<CurveStyles>, DisplayError> {
        let parse = |v: &Value| {
            serde_json::from_value::<LineStyle>(v.clone())
                .map_err(|e| DisplayError::InvalidCurveKwargs(e.to_string()))
        };
        let kind = match value {
            Value::Null => return Ok(None),
            Value::Object(_) => return parse(value).map(|s| Some(CurveStyles::Broadcast(s))),
            Value::Array(items) => {
                let styles = items.iter().map(parse).collect::<Result<Vec<_>, _>>()?;
                return Ok(Some(CurveStyles::PerCurve(styles)));
            }
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
        };
        if n_curves > 1 {
            Err(DisplayError::MultipleCurvesKwargs {
                expected: n_curves,
                got: format!("{kind} ({value})"),
            })
        } else {
            Err(DisplayError::InvalidCurveKwargs(format!(
                "expected a style object, got {kind}"
            )))
        }
    }
}
