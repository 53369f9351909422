//! Registration of every reference model under its configuration name.

use crate::{
    crash, gauss_markov, gilbert_elliott, grid_placement, lossless, no_failure, nomadic_community,
    normal_placement, path_loss, random_direction, random_waypoint, scheduled_crash, speed,
    stationary, uniform_placement, unit_disk,
};
use manet_model::ModelRegistry;

/// Register all reference models into `registry`.
///
/// Existing entries with the same names are replaced.
pub fn register_builtins(registry: &mut ModelRegistry) {
    registry.register_placement("grid", grid_placement::build);
    registry.register_placement("uniform", uniform_placement::build);
    registry.register_placement("normal", normal_placement::build);

    registry.register_speed("constant", speed::build_constant);
    registry.register_speed("uniform", speed::build_uniform);
    registry.register_speed("normal", speed::build_normal);

    registry.register_mobility("random_waypoint", random_waypoint::build);
    registry.register_mobility("random_direction", random_direction::build);
    registry.register_mobility("gauss_markov", gauss_markov::build);
    registry.register_mobility("nomadic_community", nomadic_community::build);
    registry.register_mobility("stationary", stationary::build);

    registry.register_propagation("path_loss", path_loss::build);
    registry.register_propagation("unit_disk", unit_disk::build);

    registry.register_packet_loss("gilbert_elliott", gilbert_elliott::build);
    registry.register_packet_loss("none", lossless::build);

    registry.register_failure("crash", crash::build);
    registry.register_failure("scheduled_crash", scheduled_crash::build);
    registry.register_failure("none", no_failure::build);
}

/// A registry holding every reference model.
pub fn builtin_registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    register_builtins(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use manet_model::ModelFamily;

    #[test]
    fn every_family_is_populated() {
        let reg = builtin_registry();
        assert_eq!(reg.names(ModelFamily::Placement), ["grid", "uniform", "normal"]);
        assert_eq!(reg.names(ModelFamily::PacketLoss), ["gilbert_elliott", "none"]);
        assert_eq!(reg.names(ModelFamily::Failure), ["crash", "scheduled_crash", "none"]);
        assert_eq!(reg.names(ModelFamily::Mobility).len(), 5);
        assert_eq!(reg.names(ModelFamily::Speed).len(), 3);
        assert_eq!(reg.names(ModelFamily::Propagation).len(), 2);
    }
}
