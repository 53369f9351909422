//! Capability checks across independently configured components.

use crate::error::CompositionError;
use crate::mobility::MobilityModel;
use manet_space::Area;

/// Check that the configured models can run together.
///
/// Called after every model is built and before the first step. A
/// mismatch is fatal.
pub fn validate_composition(
    area: &dyn Area,
    mobility: &dyn MobilityModel,
) -> Result<(), CompositionError> {
    if !mobility.supports(area.boundary()) {
        return Err(CompositionError::UnsupportedBoundary {
            mobility: mobility.name().to_string(),
            boundary: area.boundary(),
        });
    }
    Ok(())
}
