//! Name-to-constructor tables for every model family.
//!
//! Models are selected by name at configuration time. Each family has
//! its own table of [`Constructor`]s; building looks the name up, runs
//! the constructor over a checked [`Params`] reader, and rejects any
//! parameter the constructor left unread.

use crate::error::{BuildError, ModelFamily};
use crate::failure::FailureModel;
use crate::mobility::MobilityModel;
use crate::packet_loss::PacketLossModel;
use crate::params::{ModelConfig, Params};
use crate::placement::PlacementModel;
use crate::propagation::PropagationModel;
use crate::random::RandomSource;
use crate::speed::SpeedModel;
use indexmap::IndexMap;
use manet_space::Area;

/// Construction-time inputs shared by all constructors.
pub struct BuildContext<'a> {
    /// The simulation area.
    pub area: &'a dyn Area,
    /// Number of nodes.
    pub node_count: usize,
    /// Total step budget.
    pub steps: u64,
    /// Step duration in simulation time units.
    pub period: f64,
    /// Source for streams a model needs at construction (schedules,
    /// group state). Per-node and per-link streams are issued by the
    /// kernel, not by constructors.
    pub random: &'a mut RandomSource,
}

/// Builds one model from its parameters.
pub type Constructor<T> = fn(&mut Params<'_>, &mut BuildContext<'_>) -> Result<Box<T>, BuildError>;

/// Registry of model constructors, one table per family.
#[derive(Default)]
pub struct ModelRegistry {
    placement: IndexMap<String, Constructor<dyn PlacementModel>>,
    speed: IndexMap<String, Constructor<dyn SpeedModel>>,
    mobility: IndexMap<String, Constructor<dyn MobilityModel>>,
    propagation: IndexMap<String, Constructor<dyn PropagationModel>>,
    packet_loss: IndexMap<String, Constructor<dyn PacketLossModel>>,
    failure: IndexMap<String, Constructor<dyn FailureModel>>,
}

fn build<T: ?Sized>(
    table: &IndexMap<String, Constructor<T>>,
    family: ModelFamily,
    config: &ModelConfig,
    ctx: &mut BuildContext<'_>,
) -> Result<Box<T>, BuildError> {
    let ctor = table
        .get(config.name.as_str())
        .ok_or_else(|| BuildError::UnknownModel {
            family,
            name: config.name.clone(),
        })?;
    let mut params = Params::new(family, config);
    let model = ctor(&mut params, ctx)?;
    params.finish()?;
    Ok(model)
}

impl ModelRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a placement model. Replaces any previous entry.
    pub fn register_placement(&mut self, name: &str, ctor: Constructor<dyn PlacementModel>) {
        self.placement.insert(name.to_string(), ctor);
    }

    /// Register a speed model. Replaces any previous entry.
    pub fn register_speed(&mut self, name: &str, ctor: Constructor<dyn SpeedModel>) {
        self.speed.insert(name.to_string(), ctor);
    }

    /// Register a mobility model. Replaces any previous entry.
    pub fn register_mobility(&mut self, name: &str, ctor: Constructor<dyn MobilityModel>) {
        self.mobility.insert(name.to_string(), ctor);
    }

    /// Register a propagation model. Replaces any previous entry.
    pub fn register_propagation(&mut self, name: &str, ctor: Constructor<dyn PropagationModel>) {
        self.propagation.insert(name.to_string(), ctor);
    }

    /// Register a packet-loss model. Replaces any previous entry.
    pub fn register_packet_loss(&mut self, name: &str, ctor: Constructor<dyn PacketLossModel>) {
        self.packet_loss.insert(name.to_string(), ctor);
    }

    /// Register a failure model. Replaces any previous entry.
    pub fn register_failure(&mut self, name: &str, ctor: Constructor<dyn FailureModel>) {
        self.failure.insert(name.to_string(), ctor);
    }

    /// Build the placement model named by `config`.
    pub fn placement(
        &self,
        config: &ModelConfig,
        ctx: &mut BuildContext<'_>,
    ) -> Result<Box<dyn PlacementModel>, BuildError> {
        build(&self.placement, ModelFamily::Placement, config, ctx)
    }

    /// Build the speed model named by `config`.
    pub fn speed(
        &self,
        config: &ModelConfig,
        ctx: &mut BuildContext<'_>,
    ) -> Result<Box<dyn SpeedModel>, BuildError> {
        build(&self.speed, ModelFamily::Speed, config, ctx)
    }

    /// Build the mobility model named by `config`.
    pub fn mobility(
        &self,
        config: &ModelConfig,
        ctx: &mut BuildContext<'_>,
    ) -> Result<Box<dyn MobilityModel>, BuildError> {
        build(&self.mobility, ModelFamily::Mobility, config, ctx)
    }

    /// Build the propagation model named by `config`.
    pub fn propagation(
        &self,
        config: &ModelConfig,
        ctx: &mut BuildContext<'_>,
    ) -> Result<Box<dyn PropagationModel>, BuildError> {
        build(&self.propagation, ModelFamily::Propagation, config, ctx)
    }

    /// Build the packet-loss model named by `config`.
    pub fn packet_loss(
        &self,
        config: &ModelConfig,
        ctx: &mut BuildContext<'_>,
    ) -> Result<Box<dyn PacketLossModel>, BuildError> {
        build(&self.packet_loss, ModelFamily::PacketLoss, config, ctx)
    }

    /// Build the failure model named by `config`.
    pub fn failure(
        &self,
        config: &ModelConfig,
        ctx: &mut BuildContext<'_>,
    ) -> Result<Box<dyn FailureModel>, BuildError> {
        build(&self.failure, ModelFamily::Failure, config, ctx)
    }

    /// Registered names for `family`, in registration order.
    pub fn names(&self, family: ModelFamily) -> Vec<&str> {
        fn keys<V>(m: &IndexMap<String, V>) -> Vec<&str> {
            m.keys().map(String::as_str).collect()
        }
        match family {
            ModelFamily::Placement => keys(&self.placement),
            ModelFamily::Speed => keys(&self.speed),
            ModelFamily::Mobility => keys(&self.mobility),
            ModelFamily::Propagation => keys(&self.propagation),
            ModelFamily::PacketLoss => keys(&self.packet_loss),
            ModelFamily::Failure => keys(&self.failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomStream;
    use manet_core::{NodeId, StepId};
    use manet_space::{BoundaryPolicy, Rectangle};

    struct Fixed(f64);

    impl SpeedModel for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn next_speed(&self, _random: &mut RandomStream) -> f64 {
            self.0
        }

        fn mean(&self) -> f64 {
            self.0
        }
    }

    fn fixed(
        params: &mut Params<'_>,
        _ctx: &mut BuildContext<'_>,
    ) -> Result<Box<dyn SpeedModel>, BuildError> {
        Ok(Box::new(Fixed(params.non_negative("speed", 1.0)?)))
    }

    struct Never;

    impl FailureModel for Never {
        fn name(&self) -> &str {
            "never"
        }

        fn decide(&mut self, _node: NodeId, _step: StepId, _random: &mut RandomStream) -> bool {
            false
        }
    }

    fn never(
        _params: &mut Params<'_>,
        ctx: &mut BuildContext<'_>,
    ) -> Result<Box<dyn FailureModel>, BuildError> {
        ctx.random.stream("failure:schedule")?;
        Ok(Box::new(Never))
    }

    fn with_ctx<R>(f: impl FnOnce(&mut BuildContext<'_>) -> R) -> R {
        let area = Rectangle::new(10.0, 10.0, BoundaryPolicy::Reflect).unwrap();
        let mut random = RandomSource::new(1);
        let mut ctx = BuildContext {
            area: &area,
            node_count: 4,
            steps: 10,
            period: 1.0,
            random: &mut random,
        };
        f(&mut ctx)
    }

    #[test]
    fn builds_registered_model() {
        let mut reg = ModelRegistry::new();
        reg.register_speed("fixed", fixed);
        let speed = with_ctx(|ctx| reg.speed(&ModelConfig::new("fixed").with("speed", 2.5), ctx))
            .unwrap();
        assert_eq!(speed.mean(), 2.5);
        assert_eq!(reg.names(ModelFamily::Speed), ["fixed"]);
        assert!(reg.names(ModelFamily::Mobility).is_empty());
    }

    #[test]
    fn unknown_name_is_rejected() {
        let reg = ModelRegistry::new();
        let err =
            with_ctx(|ctx| reg.speed(&ModelConfig::new("warp"), ctx).map(|_| ())).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnknownModel {
                family: ModelFamily::Speed,
                name: "warp".into()
            }
        );
    }

    #[test]
    fn unread_parameter_is_rejected() {
        let mut reg = ModelRegistry::new();
        reg.register_speed("fixed", fixed);
        let err = with_ctx(|ctx| {
            reg.speed(&ModelConfig::new("fixed").with("sped", 2.0), ctx)
                .map(|_| ())
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::UnknownParam { ref param, .. } if param == "sped"));
    }

    #[test]
    fn constructor_stream_errors_propagate() {
        let mut reg = ModelRegistry::new();
        reg.register_failure("never", never);
        let err = with_ctx(|ctx| {
            reg.failure(&ModelConfig::new("never"), ctx)?;
            reg.failure(&ModelConfig::new("never"), ctx).map(|_| ())
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::Random(_)));
    }
}
