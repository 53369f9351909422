//! Deterministic lattice placement.

use manet_core::Point;
use manet_model::{BuildContext, BuildError, Params, Placement, PlacementModel, RandomStream};
use manet_space::Area;

/// Places nodes on a centered `columns x rows` lattice.
///
/// The lattice shape is the most square factorization of the node
/// count, with the longer side of the lattice along the longer side of
/// the area (a prime count yields a single row or column). Spacing is
/// the optional configured spacing, shrunk until the lattice plus one
/// spacing of margin fits the area. Consumes no randomness.
#[derive(Clone, Debug, PartialEq)]
pub struct GridPlacement {
    spacing: Option<f64>,
}

impl GridPlacement {
    /// `spacing` caps the distance between neighbouring nodes; `None`
    /// spreads the lattice over the whole area.
    pub fn new(spacing: Option<f64>) -> Self {
        Self { spacing }
    }

    /// `(columns, rows)` for `n` nodes in `area`.
    pub fn dimensions(n: usize, area: &dyn Area) -> (usize, usize) {
        if n == 0 {
            return (0, 0);
        }
        let root = (n as f64).sqrt() as usize;
        let small = (1..=root).rev().find(|d| n % d == 0).unwrap_or(1);
        let large = n / small;
        if area.width() >= area.height() {
            (large, small)
        } else {
            (small, large)
        }
    }
}

impl PlacementModel for GridPlacement {
    fn name(&self) -> &str {
        "grid"
    }

    fn place(&self, node_count: usize, area: &dyn Area, _random: &mut RandomStream) -> Placement {
        let (columns, rows) = Self::dimensions(node_count, area);
        if node_count == 0 {
            return Placement::default();
        }
        let mut spacing = self.spacing.unwrap_or(f64::INFINITY);
        spacing = spacing.min(area.width() / (columns as f64 + 1.0));
        spacing = spacing.min(area.height() / (rows as f64 + 1.0));

        let offset_x = 0.5 * (area.width() - (columns as f64 + 1.0) * spacing);
        let offset_y = 0.5 * (area.height() - (rows as f64 + 1.0) * spacing);
        let positions = (0..rows)
            .flat_map(|r| (0..columns).map(move |c| (c, r)))
            .map(|(c, r)| {
                area.clamp(Point::new(
                    offset_x + (c as f64 + 1.0) * spacing,
                    offset_y + (r as f64 + 1.0) * spacing,
                ))
            })
            .collect();
        Placement {
            positions,
            warnings: Vec::new(),
        }
    }
}

/// Constructor for `grid`: `spacing` (optional).
pub fn build(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn PlacementModel>, BuildError> {
    let spacing = match params.optional("spacing")? {
        Some(_) => Some(params.positive("spacing", 1.0)?),
        None => None,
    };
    Ok(Box::new(GridPlacement::new(spacing)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use manet_model::RandomSource;
    use manet_space::{BoundaryPolicy, Rectangle, Square};

    fn stream() -> RandomStream {
        RandomSource::new(0).stream("placement").unwrap()
    }

    #[test]
    fn factorization_prefers_square_and_follows_area() {
        let wide = Rectangle::new(200.0, 100.0, BoundaryPolicy::Clamp).unwrap();
        let tall = Rectangle::new(100.0, 200.0, BoundaryPolicy::Clamp).unwrap();
        assert_eq!(GridPlacement::dimensions(16, &wide), (4, 4));
        assert_eq!(GridPlacement::dimensions(12, &wide), (4, 3));
        assert_eq!(GridPlacement::dimensions(12, &tall), (3, 4));
        assert_eq!(GridPlacement::dimensions(7, &wide), (7, 1));
    }

    #[test]
    fn lattice_is_centered_and_evenly_spaced() {
        let area = Square::new(100.0, BoundaryPolicy::Clamp).unwrap();
        let out = GridPlacement::new(Some(10.0)).place(4, &area, &mut stream());
        assert_eq!(
            out.positions,
            vec![
                Point::new(45.0, 45.0),
                Point::new(55.0, 45.0),
                Point::new(45.0, 55.0),
                Point::new(55.0, 55.0),
            ]
        );
    }

    #[test]
    fn spacing_shrinks_to_fit() {
        let area = Square::new(30.0, BoundaryPolicy::Clamp).unwrap();
        let out = GridPlacement::new(Some(100.0)).place(4, &area, &mut stream());
        assert_eq!(out.positions[0], Point::new(10.0, 10.0));
        assert_eq!(out.positions[3], Point::new(20.0, 20.0));
    }

    #[test]
    fn consumes_no_randomness() {
        let area = Square::new(30.0, BoundaryPolicy::Clamp).unwrap();
        let mut used = stream();
        GridPlacement::new(None).place(9, &area, &mut used);
        assert_eq!(used.unit(), stream().unit());
    }

    #[test]
    fn every_count_fits() {
        let area = Rectangle::new(70.0, 30.0, BoundaryPolicy::Clamp).unwrap();
        for n in 0..60 {
            let out = GridPlacement::new(None).place(n, &area, &mut stream());
            assert_eq!(out.positions.len(), n);
            assert!(out.positions.iter().all(|p| area.contains(*p)));
        }
    }
}
