use crate::flow_network::error::FlowNetworkError;
use crate::flow_network::graph::FlowNetwork;
use log::debug;
use num_traits::NumAssign;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use std::fmt::Debug;
use std::ops::Neg;

const ATTEMPTS_PER_EDGE: usize = 64;
const MIN_ATTEMPTS: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct RandomNetworkConfig<Flow> {
    pub num_vertices: usize,
    pub num_edges: usize,
    // capacities are drawn from [1, capacity_bound]
    pub capacity_bound: Flow,
    pub max_attempts: usize,
}

impl<Flow> RandomNetworkConfig<Flow> {
    pub fn new(num_vertices: usize, num_edges: usize, capacity_bound: Flow) -> Self {
        let max_attempts = num_edges.saturating_mul(ATTEMPTS_PER_EDGE).max(MIN_ATTEMPTS);
        RandomNetworkConfig { num_vertices, num_edges, capacity_bound, max_attempts }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

pub fn random_network<Flow, R>(config: &RandomNetworkConfig<Flow>, rng: &mut R) -> Result<FlowNetwork<usize, Flow>, FlowNetworkError>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + Debug + SampleUniform,
    R: Rng + ?Sized,
{
    let n = config.num_vertices;
    if n == 0 {
        return Err(FlowNetworkError::GenerationInfeasible("at least one vertex is required".to_string()));
    }
    if config.capacity_bound < Flow::one() {
        return Err(FlowNetworkError::GenerationInfeasible(format!("capacity bound {:?} is not positive", config.capacity_bound)));
    }
    let max_edges = n.saturating_mul(n - 1) / 2;
    if config.num_edges > max_edges {
        return Err(FlowNetworkError::GenerationInfeasible(format!(
            "{} edges requested but {n} vertices admit at most {max_edges}",
            config.num_edges
        )));
    }

    let mut network = FlowNetwork::new();
    (1..=n).for_each(|v| network.add_vertex(v));

    let mut attempts = 0;
    while network.num_edges() < config.num_edges {
        if attempts == config.max_attempts {
            return Err(FlowNetworkError::GenerationInfeasible(format!(
                "placed {} of {} edges in {attempts} attempts",
                network.num_edges(),
                config.num_edges
            )));
        }
        attempts += 1;

        let from = rng.gen_range(1..=n);
        let to = rng.gen_range(1..=n);
        if network.get_edge(&from, &to).is_some() || !network.is_valid_edge(&from, &to, Flow::one()) {
            continue;
        }
        let capacity = rng.gen_range(Flow::one()..=config.capacity_bound);
        network.add_edge(from, to, capacity);
    }

    debug!("generated {} edges over {n} vertices in {attempts} attempts", network.num_edges());
    Ok(network)
}
