//! Bounded-retry sampling shared by the random placements.

use manet_core::{ModelError, Point};
use manet_model::RandomStream;
use manet_space::Area;

/// Draw a position for the next node.
///
/// A draw is accepted when it lies inside `area` and does not coincide
/// with an already placed node. After `1 + max_retries` rejected draws
/// the last one is clamped into the area and accepted with a warning.
pub(crate) fn place_with_retries(
    model: &str,
    area: &dyn Area,
    placed: &[Point],
    max_retries: u64,
    random: &mut RandomStream,
    mut sample: impl FnMut(&mut RandomStream) -> Point,
) -> (Point, Option<ModelError>) {
    let mut last = area.center();
    for _ in 0..=max_retries {
        last = sample(random);
        if area.contains(last) && !placed.contains(&last) {
            return (last, None);
        }
    }
    let clamped = area.clamp(last);
    let warning = ModelError::new(
        model,
        format!(
            "no acceptable sample after {} retries; clamped {last} to {clamped}",
            max_retries
        ),
    );
    (clamped, Some(warning))
}
