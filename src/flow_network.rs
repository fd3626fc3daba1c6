mod edge_list;
pub mod error;
pub mod graph;
pub mod random;

pub use error::FlowNetworkError;
pub use graph::{Edge, FlowNetwork, Vertex};
pub use random::{random_network, RandomNetworkConfig};
