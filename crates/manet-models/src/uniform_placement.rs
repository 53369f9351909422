//! Uniform random placement.

use crate::sampling::place_with_retries;
use manet_core::Point;
use manet_model::{BuildContext, BuildError, Params, Placement, PlacementModel, RandomStream};
use manet_space::Area;

/// Places every node uniformly at random over the area.
///
/// A draw that coincides exactly with an earlier node is redrawn, up to
/// `max_retries` times.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformPlacement {
    max_retries: u64,
}

impl UniformPlacement {
    /// Create the placement.
    pub fn new(max_retries: u64) -> Self {
        Self { max_retries }
    }
}

impl PlacementModel for UniformPlacement {
    fn name(&self) -> &str {
        "uniform"
    }

    fn place(&self, node_count: usize, area: &dyn Area, random: &mut RandomStream) -> Placement {
        let mut out = Placement::default();
        for _ in 0..node_count {
            let (p, warning) =
                place_with_retries("uniform", area, &out.positions, self.max_retries, random, |r| {
                    Point::new(r.uniform(0.0, area.width()), r.uniform(0.0, area.height()))
                });
            out.positions.push(p);
            out.warnings.extend(warning);
        }
        out
    }
}

/// Constructor for `uniform`: `max_retries` (default 16).
pub fn build(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn PlacementModel>, BuildError> {
    Ok(Box::new(UniformPlacement::new(params.count("max_retries", 16)?)))
}
