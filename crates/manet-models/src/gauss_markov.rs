//! Gauss-Markov mobility.
//!
//! Speed and heading evolve as first-order Gauss-Markov processes
//! recalculated every `recalculation_interval` steps:
//!
//! ```text
//! s' = a*s + (1 - a)*s_mean + sqrt(1 - a^2)*(x_s - s_mean)
//! d' = a*d + (1 - a)*d_mean + sqrt(1 - a^2)*x_d
//! ```
//!
//! where `x_s` is a fresh speed sample and `x_d ~ N(0, direction_deviation)`.
//! `a = 0` is a memoryless random walk; `a = 1` is constant velocity.
//!
//! `d_mean` is `direction_mean` in the interior of the area. Inside the
//! margin band along an edge it points away from that edge (diagonally
//! out of a corner), so nodes do not linger at the border. Reflection
//! mirrors the heading; the model therefore requires a reflect or wrap
//! boundary and rejects clamp areas at construction.

use manet_core::{Point, Vector};
use manet_model::{
    BuildContext, BuildError, MobilityModel, MotionContext, MotionPhase, NodeMotion, Params,
    RandomStream, SpeedModel,
};
use manet_space::{Area, BoundaryPolicy};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// The Gauss-Markov model.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussMarkov {
    alpha: f64,
    direction_mean: f64,
    direction_deviation: f64,
    margin: f64,
    interval: u64,
}

impl GaussMarkov {
    /// Defaults: `alpha` 0.75, `direction_mean` pi/6,
    /// `direction_deviation` pi/2, `margin` 0.15, one recalculation per
    /// step.
    pub fn new() -> Self {
        Self {
            alpha: 0.75,
            direction_mean: PI / 6.0,
            direction_deviation: FRAC_PI_2,
            margin: 0.15,
            interval: 1,
        }
    }

    /// Memory parameter in `[0, 1]`.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Interior mean heading (radians).
    pub fn direction_mean(mut self, mean: f64) -> Self {
        self.direction_mean = mean;
        self
    }

    /// Standard deviation of the heading noise (radians).
    pub fn direction_deviation(mut self, deviation: f64) -> Self {
        self.direction_deviation = deviation.max(0.0);
        self
    }

    /// Width of the edge band, as a fraction of the area side in `[0, 1]`.
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin.clamp(0.0, 1.0);
        self
    }

    /// Steps between recalculations (at least 1).
    pub fn recalculation_interval(mut self, steps: u64) -> Self {
        self.interval = steps.max(1);
        self
    }

    /// Mean heading for a node at `p`.
    pub fn mean_heading(&self, area: &dyn Area, p: Point) -> f64 {
        let left = p.x <= area.width() * self.margin;
        let right = p.x >= area.width() * (1.0 - self.margin);
        let bottom = p.y <= area.height() * self.margin;
        let top = p.y >= area.height() * (1.0 - self.margin);
        match (left, right, bottom, top) {
            (true, _, _, true) => 7.0 * FRAC_PI_4,
            (_, true, _, true) => 5.0 * FRAC_PI_4,
            (_, _, _, true) => 3.0 * FRAC_PI_2,
            (true, _, true, _) => FRAC_PI_4,
            (_, true, true, _) => 3.0 * FRAC_PI_4,
            (_, _, true, _) => FRAC_PI_2,
            (true, _, _, _) => 0.0,
            (_, true, _, _) => PI,
            _ => self.direction_mean,
        }
    }

    fn recalculate(
        &self,
        area: &dyn Area,
        motion: &mut NodeMotion,
        speed: &dyn SpeedModel,
        random: &mut RandomStream,
    ) {
        let a = self.alpha;
        let b = 1.0 - a;
        let c = (1.0 - a * a).max(0.0).sqrt();
        let state = &mut motion.state;

        let sample = speed.next_speed(random);
        let mean_speed = speed.mean();
        state.speed = (a * state.speed + b * mean_speed + c * (sample - mean_speed)).max(0.0);

        let mean = self.mean_heading(area, motion.position);
        // Blend against the representative of the heading nearest the mean.
        let heading = mean + wrap_angle(state.heading - mean);
        let noise = random.normal(0.0, self.direction_deviation);
        state.heading = wrap_angle(a * heading + b * mean + c * noise);
    }
}

impl Default for GaussMarkov {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an angle into `(-pi, pi]`.
fn wrap_angle(theta: f64) -> f64 {
    let t = (theta + PI).rem_euclid(TAU) - PI;
    if t <= -PI {
        t + TAU
    } else {
        t
    }
}

impl MobilityModel for GaussMarkov {
    fn name(&self) -> &str {
        "gauss_markov"
    }

    fn supports(&self, boundary: BoundaryPolicy) -> bool {
        matches!(boundary, BoundaryPolicy::Reflect | BoundaryPolicy::Wrap)
    }

    fn step(
        &self,
        ctx: &MotionContext<'_>,
        motion: &mut NodeMotion,
        speed: &dyn SpeedModel,
        random: &mut RandomStream,
    ) {
        if motion.state.phase == MotionPhase::Moving {
            motion.state.since_decision += 1;
            if motion.state.since_decision >= self.interval {
                self.recalculate(ctx.area, motion, speed, random);
                motion.state.since_decision = 0;
            }
        } else {
            motion.state.speed = speed.next_speed(random);
            motion.state.heading =
                wrap_angle(random.normal(self.direction_mean, self.direction_deviation));
            motion.state.since_decision = 0;
            motion.state.phase = MotionPhase::Moving;
        }

        let before = motion.position;
        let delta = Vector::from_polar(motion.state.speed * ctx.dt, motion.state.heading);
        let bounded = ctx.area.bound(before, delta);
        if bounded.flip_x {
            motion.state.heading = wrap_angle(PI - motion.state.heading);
        }
        if bounded.flip_y {
            motion.state.heading = wrap_angle(-motion.state.heading);
        }
        motion.position = bounded.position;
        motion.velocity = before.vector_to(bounded.position).scale(1.0 / ctx.dt);
    }
}

/// Constructor for `gauss_markov`: `alpha` (0.75), `direction_mean`
/// (pi/6), `direction_deviation` (pi/2), `direction_margin` (0.15),
/// `recalculation_interval` (steps per time unit, at least 1).
pub fn build(
    params: &mut Params<'_>,
    ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn MobilityModel>, BuildError> {
    let default_interval = (1.0 / ctx.period).round().max(1.0) as u64;
    let model = GaussMarkov::new()
        .alpha(params.probability("alpha", 0.75)?)
        .direction_mean(params.get("direction_mean", PI / 6.0)?)
        .direction_deviation(params.non_negative("direction_deviation", FRAC_PI_2)?)
        .margin(params.range(
            "direction_margin",
            0.15,
            0.0,
            1.0,
            "a fraction in [0, 1]",
        )?)
        .recalculation_interval(params.count("recalculation_interval", default_interval)?);
    Ok(Box::new(model))
}
