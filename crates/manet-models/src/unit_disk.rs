//! Unit-disk propagation: a link exists exactly within a fixed range.

use manet_core::Point;
use manet_model::{BuildContext, BuildError, Params, PropagationModel};

/// Quality is `1 - d / range`; the threshold is 0, so a link exists iff
/// `d <= range`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitDisk {
    range: f64,
}

impl UnitDisk {
    /// `range` must be positive.
    pub fn new(range: f64) -> Self {
        Self { range }
    }
}

impl PropagationModel for UnitDisk {
    fn name(&self) -> &str {
        "unit_disk"
    }

    fn quality(&self, from: Point, to: Point) -> f64 {
        1.0 - from.distance(to) / self.range
    }

    fn threshold(&self) -> f64 {
        0.0
    }
}

/// Constructor for `unit_disk`: `range` (default 100).
pub fn build(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn PropagationModel>, BuildError> {
    Ok(Box::new(UnitDisk::new(params.positive("range", 100.0)?)))
}
