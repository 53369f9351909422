//! Gaussian cluster placement.

use crate::sampling::place_with_retries;
use manet_core::Point;
use manet_model::{BuildContext, BuildError, Params, Placement, PlacementModel, RandomStream};
use manet_space::Area;

/// Places nodes around a center with independent Gaussian offsets per
/// axis.
///
/// Draws outside the area are redrawn up to `max_retries` times, then
/// clamped to the nearest in-area point and reported as a warning.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalPlacement {
    center: Option<Point>,
    sigma: Option<f64>,
    max_retries: u64,
}

impl NormalPlacement {
    /// `center` defaults to the area center; `sigma` to a quarter of the
    /// shorter side.
    pub fn new(center: Option<Point>, sigma: Option<f64>, max_retries: u64) -> Self {
        Self {
            center,
            sigma,
            max_retries,
        }
    }
}

impl PlacementModel for NormalPlacement {
    fn name(&self) -> &str {
        "normal"
    }

    fn place(&self, node_count: usize, area: &dyn Area, random: &mut RandomStream) -> Placement {
        let center = self.center.unwrap_or_else(|| area.center());
        let sigma = self
            .sigma
            .unwrap_or_else(|| area.width().min(area.height()) / 4.0);
        let mut out = Placement::default();
        for _ in 0..node_count {
            let (p, warning) =
                place_with_retries("normal", area, &out.positions, self.max_retries, random, |r| {
                    Point::new(r.normal(center.x, sigma), r.normal(center.y, sigma))
                });
            out.positions.push(p);
            out.warnings.extend(warning);
        }
        out
    }
}

/// Constructor for `normal`: `sigma`, `center_x`, `center_y` (optional),
/// `max_retries` (default 16).
pub fn build(
    params: &mut Params<'_>,
    ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn PlacementModel>, BuildError> {
    let sigma = match params.optional("sigma")? {
        Some(_) => Some(params.positive("sigma", 1.0)?),
        None => None,
    };
    let x = params.optional("center_x")?;
    let y = params.optional("center_y")?;
    let max_retries = params.count("max_retries", 16)?;
    let center = match (x, y) {
        (None, None) => None,
        (x, y) => {
            let c = ctx.area.center();
            Some(Point::new(x.unwrap_or(c.x), y.unwrap_or(c.y)))
        }
    };
    Ok(Box::new(NormalPlacement::new(
        center,
        sigma,
        max_retries,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use manet_model::RandomSource;
    use manet_space::{BoundaryPolicy, Rectangle};

    #[test]
    fn tight_cluster_needs_no_clamping() {
        let area = Rectangle::new(100.0, 100.0, BoundaryPolicy::Clamp).unwrap();
        let mut s = RandomSource::new(5).stream("placement").unwrap();
        let out = NormalPlacement::new(None, Some(1.0), 16).place(50, &area, &mut s);
        assert_eq!(out.positions.len(), 50);
        assert!(out.warnings.is_empty());
        assert!(out
            .positions
            .iter()
            .all(|p| p.distance(Point::new(50.0, 50.0)) < 10.0));
    }

    #[test]
    fn hopeless_cluster_is_clamped_with_warnings() {
        let area = Rectangle::new(10.0, 10.0, BoundaryPolicy::Clamp).unwrap();
        let mut s = RandomSource::new(5).stream("placement").unwrap();
        // Center far outside the area: every draw misses.
        let out = NormalPlacement::new(Some(Point::new(1e6, 1e6)), Some(1.0), 3)
            .place(4, &area, &mut s);
        assert_eq!(out.positions.len(), 4);
        assert!(out.positions.iter().all(|p| area.contains(*p)));
        assert_eq!(out.warnings.len(), 4);
        assert_eq!(out.warnings[0].model, "normal");
    }
}
