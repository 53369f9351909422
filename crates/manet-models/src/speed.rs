//! Speed samplers: constant, uniform and normal.
//!
//! Negative draws are clamped to zero, so a node may occasionally
//! sample a standstill; mobility models treat a zero speed as "decide
//! again next step".

use manet_model::{BuildContext, BuildError, Params, RandomStream, SpeedModel};

/// Always returns the same speed. Consumes no randomness.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantSpeed {
    speed: f64,
}

impl ConstantSpeed {
    /// `speed` must be non-negative.
    pub fn new(speed: f64) -> Self {
        Self {
            speed: speed.max(0.0),
        }
    }
}

impl SpeedModel for ConstantSpeed {
    fn name(&self) -> &str {
        "constant"
    }

    fn next_speed(&self, _random: &mut RandomStream) -> f64 {
        self.speed
    }

    fn mean(&self) -> f64 {
        self.speed
    }
}

/// Uniform speed in `[min, max)`.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformSpeed {
    min: f64,
    max: f64,
}

impl UniformSpeed {
    /// Requires `0 <= min <= max`.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl SpeedModel for UniformSpeed {
    fn name(&self) -> &str {
        "uniform"
    }

    fn next_speed(&self, random: &mut RandomStream) -> f64 {
        random.uniform(self.min, self.max).max(0.0)
    }

    fn mean(&self) -> f64 {
        0.5 * (self.min + self.max)
    }
}

/// Normally distributed speed, clamped at zero.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalSpeed {
    mean: f64,
    sigma: f64,
}

impl NormalSpeed {
    /// Requires `sigma >= 0`.
    pub fn new(mean: f64, sigma: f64) -> Self {
        Self { mean, sigma }
    }
}

impl SpeedModel for NormalSpeed {
    fn name(&self) -> &str {
        "normal"
    }

    fn next_speed(&self, random: &mut RandomStream) -> f64 {
        random.normal(self.mean, self.sigma).max(0.0)
    }

    fn mean(&self) -> f64 {
        self.mean
    }
}

/// Constructor for `constant`: `speed` (default 1).
pub fn build_constant(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn SpeedModel>, BuildError> {
    Ok(Box::new(ConstantSpeed::new(params.non_negative("speed", 1.0)?)))
}

/// Constructor for `uniform`: `min` (default 0), `max` (default 1).
pub fn build_uniform(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn SpeedModel>, BuildError> {
    let min = params.non_negative("min", 0.0)?;
    let max = params.non_negative("max", 1.0)?;
    if max < min {
        return Err(BuildError::InvalidParam {
            family: params.family(),
            model: params.model().to_string(),
            param: "max".into(),
            value: max,
            expected: "a value >= min",
        });
    }
    Ok(Box::new(UniformSpeed::new(min, max)))
}

/// Constructor for `normal`: `mean` (default 1), `sigma` (default 0.1).
pub fn build_normal(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn SpeedModel>, BuildError> {
    let mean = params.get("mean", 1.0)?;
    let sigma = params.non_negative("sigma", 0.1)?;
    Ok(Box::new(NormalSpeed::new(mean, sigma)))
}
