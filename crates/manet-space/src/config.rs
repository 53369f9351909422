//! Serializable area description.

use crate::area::Area;
use crate::boundary::BoundaryPolicy;
use crate::error::AreaError;
use crate::rectangle::Rectangle;
use crate::square::Square;
use serde::{Deserialize, Serialize};

/// Shape and dimensions of an area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaShape {
    /// A `width x height` rectangle.
    Rectangle {
        /// Horizontal extent.
        width: f64,
        /// Vertical extent.
        height: f64,
    },
    /// A `side x side` square.
    Square {
        /// Side length.
        side: f64,
    },
}

/// Configuration record for an [`Area`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaConfig {
    /// Shape and dimensions.
    pub shape: AreaShape,
    /// Boundary policy. Default: reflect.
    #[serde(default)]
    pub boundary: BoundaryPolicy,
}

impl AreaConfig {
    /// A rectangle configuration.
    pub fn rectangle(width: f64, height: f64, boundary: BoundaryPolicy) -> Self {
        Self {
            shape: AreaShape::Rectangle { width, height },
            boundary,
        }
    }

    /// A square configuration.
    pub fn square(side: f64, boundary: BoundaryPolicy) -> Self {
        Self {
            shape: AreaShape::Square { side },
            boundary,
        }
    }

    /// Construct the configured area.
    pub fn build(&self) -> Result<Box<dyn Area>, AreaError> {
        Ok(match self.shape {
            AreaShape::Rectangle { width, height } => {
                Box::new(Rectangle::new(width, height, self.boundary)?)
            }
            AreaShape::Square { side } => Box::new(Square::new(side, self.boundary)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_concrete_shapes() {
        let area = AreaConfig::square(10.0, BoundaryPolicy::Wrap).build().unwrap();
        assert!(area.downcast_ref::<Square>().is_some());
        assert_eq!(area.boundary(), BoundaryPolicy::Wrap);

        let area = AreaConfig::rectangle(10.0, 3.0, BoundaryPolicy::Clamp)
            .build()
            .unwrap();
        assert!(area.downcast_ref::<Rectangle>().is_some());
        assert_eq!(area.height(), 3.0);
    }

    #[test]
    fn invalid_dimensions_fail_to_build() {
        let err = AreaConfig::rectangle(10.0, 0.0, BoundaryPolicy::Clamp)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            AreaError::InvalidDimension {
                name: "height",
                value: 0.0
            }
        );
    }

    #[test]
    fn deserializes_with_default_boundary() {
        let cfg: AreaConfig =
            serde_json::from_str(r#"{"shape":{"rectangle":{"width":5.0,"height":2.0}}}"#).unwrap();
        assert_eq!(cfg, AreaConfig::rectangle(5.0, 2.0, BoundaryPolicy::Reflect));
    }
}
