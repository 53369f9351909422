//! Nomadic Community mobility.
//!
//! All nodes share a reference point. Each node runs a waypoint cycle
//! whose destinations are drawn from a free-roam box centered on the
//! reference point (`area_factor` of each area side, cut at the area
//! edges). Periodically the whole community relocates: the reference
//! point jumps to a new location whose roam box does not overlap the
//! old one (when the area allows it), and nodes head there as they
//! finish their current legs.
//!
//! Relocation is purely timer-driven: the next relocation is scheduled
//! `U(100, 200) + U(1, 10) * pause_time` time units after the previous
//! one.

use crate::waypoint::waypoint_step;
use manet_core::Point;
use manet_model::{
    BuildContext, BuildError, MobilityModel, MotionContext, NodeMotion, Params, RandomStream,
    SpeedModel,
};
use manet_space::Area;

const RELOCATION_TIME: (f64, f64) = (100.0, 200.0);
const RELOCATION_PAUSE_FACTOR: (f64, f64) = (1.0, 10.0);
const RELOCATION_ATTEMPTS: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Community {
    reference: Point,
    relocate_at: f64,
}

/// Axis-aligned roam box `(left, bottom, right, top)`.
type RoamBox = (f64, f64, f64, f64);

/// The Nomadic Community model.
#[derive(Clone, Debug, PartialEq)]
pub struct NomadicCommunity {
    pause_time: f64,
    area_factor: f64,
    community: Option<Community>,
}

impl NomadicCommunity {
    /// `area_factor` in `[0, 1]` sizes the free-roam box relative to the
    /// area.
    pub fn new(pause_time: f64, area_factor: f64) -> Self {
        Self {
            pause_time: pause_time.max(0.0),
            area_factor: area_factor.clamp(0.0, 1.0),
            community: None,
        }
    }

    /// Current reference point, once the first step has begun.
    pub fn reference_point(&self) -> Option<Point> {
        self.community.map(|c| c.reference)
    }

    fn roam_box(&self, area: &dyn Area, reference: Point) -> RoamBox {
        let half_w = 0.5 * area.width() * self.area_factor;
        let half_h = 0.5 * area.height() * self.area_factor;
        (
            (reference.x - half_w).max(0.0),
            (reference.y - half_h).max(0.0),
            (reference.x + half_w).min(area.width()),
            (reference.y + half_h).min(area.height()),
        )
    }

    fn relocation_delay(&self, random: &mut RandomStream) -> f64 {
        random.uniform(RELOCATION_TIME.0, RELOCATION_TIME.1)
            + random.uniform(RELOCATION_PAUSE_FACTOR.0, RELOCATION_PAUSE_FACTOR.1) * self.pause_time
    }

    fn random_point(area: &dyn Area, random: &mut RandomStream) -> Point {
        Point::new(random.uniform(0.0, area.width()), random.uniform(0.0, area.height()))
    }

    fn next_reference(&self, area: &dyn Area, old: Point, random: &mut RandomStream) -> Point {
        let (l0, b0, r0, t0) = self.roam_box(area, old);
        let mut candidate = old;
        for _ in 0..RELOCATION_ATTEMPTS {
            candidate = Self::random_point(area, random);
            let (l, b, r, t) = self.roam_box(area, candidate);
            if l > r0 || b > t0 || r < l0 || t < b0 {
                break;
            }
        }
        candidate
    }
}

impl MobilityModel for NomadicCommunity {
    fn name(&self) -> &str {
        "nomadic_community"
    }

    fn begin_step(&mut self, ctx: &MotionContext<'_>, group: &mut RandomStream) {
        self.community = match self.community {
            None => Some(Community {
                reference: Self::random_point(ctx.area, group),
                relocate_at: ctx.time + self.relocation_delay(group),
            }),
            Some(c) if ctx.time >= c.relocate_at => Some(Community {
                reference: self.next_reference(ctx.area, c.reference, group),
                relocate_at: ctx.time + self.relocation_delay(group),
            }),
            keep => keep,
        };
    }

    fn step(
        &self,
        ctx: &MotionContext<'_>,
        motion: &mut NodeMotion,
        speed: &dyn SpeedModel,
        random: &mut RandomStream,
    ) {
        let reference = self
            .community
            .map_or_else(|| ctx.area.center(), |c| c.reference);
        let (l, b, r, t) = self.roam_box(ctx.area, reference);
        waypoint_step(ctx, motion, speed, random, self.pause_time, |rng| {
            Point::new(rng.uniform(l, r), rng.uniform(b, t))
        });
    }
}

/// Constructor for `nomadic_community`: `pause_time` (default 0),
/// `area_factor` (default 0.25).
pub fn build(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn MobilityModel>, BuildError> {
    let pause_time = params.non_negative("pause_time", 0.0)?;
    let area_factor = params.range("area_factor", 0.25, 0.0, 1.0, "a fraction in [0, 1]")?;
    Ok(Box::new(NomadicCommunity::new(pause_time, area_factor)))
}
