//! Decide/move/pause cycle shared by the destination-driven models.

use manet_core::{Point, Vector};
use manet_model::{MotionContext, MotionPhase, NodeMotion, RandomStream, SpeedModel};

/// Advance one node through one step of the waypoint cycle.
///
/// - `Paused`: hold position; once the pause has elapsed, decide next
///   step.
/// - `Deciding`: draw a destination with `pick` and a speed, then move
///   within the same step.
/// - `Moving`: travel `speed * dt` toward the destination. When the
///   destination is within that distance, snap onto it and draw a pause
///   in `[0, pause_time)`.
///
/// A zero speed sample leaves the node in place and forces a fresh
/// decision next step.
pub(crate) fn waypoint_step(
    ctx: &MotionContext<'_>,
    motion: &mut NodeMotion,
    speed: &dyn SpeedModel,
    random: &mut RandomStream,
    pause_time: f64,
    pick: impl FnOnce(&mut RandomStream) -> Point,
) {
    let state = &mut motion.state;
    state.since_decision += 1;

    if let MotionPhase::Paused { remaining } = state.phase {
        let left = remaining - ctx.dt;
        state.phase = if left > 0.0 {
            MotionPhase::Paused { remaining: left }
        } else {
            MotionPhase::Deciding
        };
        motion.velocity = Vector::ZERO;
        return;
    }

    if state.phase == MotionPhase::Deciding || state.destination.is_none() {
        state.destination = Some(pick(random));
        state.speed = speed.next_speed(random);
        state.since_decision = 0;
        state.phase = MotionPhase::Moving;
    }

    let before = motion.position;
    let travel = state.speed * ctx.dt;
    let Some(destination) = state.destination else {
        return;
    };
    if travel <= 0.0 {
        state.phase = MotionPhase::Deciding;
        motion.velocity = Vector::ZERO;
        return;
    }

    let to_go = before.vector_to(destination);
    let distance = to_go.length();
    if distance <= travel {
        motion.position = ctx.area.clamp(destination);
        state.destination = None;
        let pause = if pause_time > 0.0 {
            random.uniform(0.0, pause_time)
        } else {
            0.0
        };
        state.phase = if pause > 0.0 {
            MotionPhase::Paused { remaining: pause }
        } else {
            MotionPhase::Deciding
        };
    } else {
        motion.position = ctx
            .area
            .apply_boundary(before, to_go.scale(travel / distance));
    }
    motion.velocity = before.vector_to(motion.position).scale(1.0 / ctx.dt);
}
