//! Model selection records and checked parameter access.

use crate::error::{BuildError, ModelFamily};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Selects a model by name and supplies its numeric parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Registered model name.
    pub name: String,
    /// Parameters by key. Keys the model does not consume are rejected.
    #[serde(default)]
    pub params: IndexMap<String, f64>,
}

impl ModelConfig {
    /// A model with no parameters (all defaults).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: IndexMap::new(),
        }
    }

    /// Builder-style parameter setter.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.params.insert(key.into(), value);
        self
    }
}

/// Checked reader over one model's parameters.
///
/// Constructors pull each parameter through a typed accessor that
/// validates its domain. Every key read is marked consumed;
/// [`finish`](Self::finish) rejects any key that never was, so typos
/// surface as configuration errors instead of silent defaults.
#[derive(Debug)]
pub struct Params<'a> {
    family: ModelFamily,
    model: &'a str,
    values: &'a IndexMap<String, f64>,
    consumed: Vec<&'a str>,
}

impl<'a> Params<'a> {
    /// Reader over `config`'s parameters.
    pub fn new(family: ModelFamily, config: &'a ModelConfig) -> Self {
        Self {
            family,
            model: &config.name,
            values: &config.params,
            consumed: Vec::new(),
        }
    }

    /// Model family being built.
    pub fn family(&self) -> ModelFamily {
        self.family
    }

    /// Model name being built.
    pub fn model(&self) -> &str {
        self.model
    }

    fn invalid(&self, param: &str, value: f64, expected: &'static str) -> BuildError {
        BuildError::InvalidParam {
            family: self.family,
            model: self.model.to_string(),
            param: param.to_string(),
            value,
            expected,
        }
    }

    /// Raw value if present; marks the key consumed. Must be finite.
    pub fn optional(&mut self, key: &str) -> Result<Option<f64>, BuildError> {
        let Some((k, &v)) = self.values.get_key_value(key) else {
            return Ok(None);
        };
        self.consumed.push(k.as_str());
        if !v.is_finite() {
            return Err(self.invalid(key, v, "a finite number"));
        }
        Ok(Some(v))
    }

    /// Any finite value, or `default` when absent.
    pub fn get(&mut self, key: &str, default: f64) -> Result<f64, BuildError> {
        Ok(self.optional(key)?.unwrap_or(default))
    }

    /// A value in `[lo, hi]`, or `default` when absent.
    pub fn range(
        &mut self,
        key: &str,
        default: f64,
        lo: f64,
        hi: f64,
        expected: &'static str,
    ) -> Result<f64, BuildError> {
        let v = self.get(key, default)?;
        if (lo..=hi).contains(&v) {
            Ok(v)
        } else {
            Err(self.invalid(key, v, expected))
        }
    }

    /// A probability in `[0, 1]`.
    pub fn probability(&mut self, key: &str, default: f64) -> Result<f64, BuildError> {
        self.range(key, default, 0.0, 1.0, "a probability in [0, 1]")
    }

    /// A strictly positive value.
    pub fn positive(&mut self, key: &str, default: f64) -> Result<f64, BuildError> {
        let v = self.get(key, default)?;
        if v > 0.0 {
            Ok(v)
        } else {
            Err(self.invalid(key, v, "a positive number"))
        }
    }

    /// A value `>= 0`.
    pub fn non_negative(&mut self, key: &str, default: f64) -> Result<f64, BuildError> {
        let v = self.get(key, default)?;
        if v >= 0.0 {
            Ok(v)
        } else {
            Err(self.invalid(key, v, "a non-negative number"))
        }
    }

    /// A non-negative integer, if present.
    pub fn optional_count(&mut self, key: &str) -> Result<Option<u64>, BuildError> {
        match self.optional(key)? {
            None => Ok(None),
            Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(Some(v as u64)),
            Some(v) => Err(self.invalid(key, v, "a non-negative integer")),
        }
    }

    /// A non-negative integer, or `default` when absent.
    pub fn count(&mut self, key: &str, default: u64) -> Result<u64, BuildError> {
        Ok(self.optional_count(key)?.unwrap_or(default))
    }

    /// Reject any parameter that was never read.
    pub fn finish(self) -> Result<(), BuildError> {
        match self
            .values
            .keys()
            .find(|k| !self.consumed.contains(&k.as_str()))
        {
            Some(param) => Err(BuildError::UnknownParam {
                family: self.family,
                model: self.model.to_string(),
                param: param.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ModelConfig {
        ModelConfig::new("crash")
            .with("probability", 0.25)
            .with("max_crashes", 3.0)
    }

    #[test]
    fn defaults_apply_when_absent() {
        let c = ModelConfig::new("x");
        let mut p = Params::new(ModelFamily::Failure, &c);
        assert_eq!(p.probability("probability", 0.1).unwrap(), 0.1);
        assert_eq!(p.count("n", 4).unwrap(), 4);
        p.finish().unwrap();
    }

    #[test]
    fn reads_and_consumes() {
        let c = cfg();
        let mut p = Params::new(ModelFamily::Failure, &c);
        assert_eq!(p.probability("probability", 0.0).unwrap(), 0.25);
        assert_eq!(p.optional_count("max_crashes").unwrap(), Some(3));
        p.finish().unwrap();
    }

    #[test]
    fn unread_key_is_unknown() {
        let c = cfg();
        let mut p = Params::new(ModelFamily::Failure, &c);
        p.probability("probability", 0.0).unwrap();
        assert_eq!(
            p.finish().unwrap_err(),
            BuildError::UnknownParam {
                family: ModelFamily::Failure,
                model: "crash".into(),
                param: "max_crashes".into(),
            }
        );
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let c = ModelConfig::new("crash").with("probability", 1.5);
        let mut p = Params::new(ModelFamily::Failure, &c);
        assert!(matches!(
            p.probability("probability", 0.0),
            Err(BuildError::InvalidParam { value, .. }) if value == 1.5
        ));
    }

    #[test]
    fn non_finite_and_fractional_values_are_rejected() {
        let c = ModelConfig::new("m")
            .with("a", f64::NAN)
            .with("b", 2.5)
            .with("c", -1.0);
        let mut p = Params::new(ModelFamily::Mobility, &c);
        assert!(p.get("a", 0.0).is_err());
        assert!(p.count("b", 0).is_err());
        assert!(p.non_negative("c", 0.0).is_err());
        assert!(p.positive("c", 1.0).is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let c = cfg();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(
            json,
            r#"{"name":"crash","params":{"probability":0.25,"max_crashes":3.0}}"#
        );
        let back: ModelConfig = serde_json::from_str(r#"{"name":"none"}"#).unwrap();
        assert!(back.params.is_empty());
    }
}
