use crate::flow_network::error::FlowNetworkError;
use indexmap::IndexMap;
use log::{debug, trace};
use num_traits::NumAssign;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Neg, Sub};

pub trait Vertex: Eq + Hash + Clone + Debug {}
impl<T> Vertex for T where T: Eq + Hash + Clone + Debug {}

// flow runs from -> to; the reverse direction carries -flow
#[derive(PartialEq, Debug, Clone)]
pub struct Edge<V, Flow> {
    pub from: V,
    pub to: V,
    pub flow: Flow,
    pub capacity: Flow,
}

impl<V, Flow> Edge<V, Flow>
where
    Flow: Sub<Output = Flow> + Copy,
{
    pub fn residual_capacity(&self) -> Flow {
        self.capacity - self.flow
    }
}

// one flow value per capacitated edge, so flow(u, v) == -flow(v, u) by construction.
// 0 <= flow <= capacity is left to the caller.
pub struct FlowNetwork<V, Flow> {
    adjacent: IndexMap<V, Vec<V>>,
    edges: Vec<Edge<V, Flow>>,
    edge_index: HashMap<V, HashMap<V, usize>>,
}

impl<V, Flow> Default for FlowNetwork<V, Flow> {
    fn default() -> Self {
        FlowNetwork { adjacent: IndexMap::new(), edges: Vec::new(), edge_index: HashMap::new() }
    }
}

impl<V, Flow> FlowNetwork<V, Flow>
where
    V: Vertex,
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.adjacent.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, v: &V) -> bool {
        self.adjacent.contains_key(v)
    }

    pub fn add_vertex(&mut self, v: V) {
        self.adjacent.entry(v).or_default();
    }

    pub fn is_valid_edge(&self, from: &V, to: &V, capacity: Flow) -> bool {
        from != to && capacity > Flow::zero() && self.index_of(to, from).is_none()
    }

    // return edge index, or None if the edge was declined.
    // re-adding an existing edge overwrites its capacity and resets its flow
    pub fn add_edge(&mut self, from: V, to: V, capacity: Flow) -> Option<usize> {
        if !self.is_valid_edge(&from, &to, capacity) {
            debug!("declined edge {from:?} -> {to:?} with capacity {capacity:?}");
            return None;
        }

        if let Some(index) = self.index_of(&from, &to) {
            let edge = &mut self.edges[index];
            edge.capacity = capacity;
            edge.flow = Flow::zero();
            return Some(index);
        }

        let index = self.edges.len();
        self.adjacent.entry(from.clone()).or_default().push(to.clone());
        self.adjacent.entry(to.clone()).or_default().push(from.clone());
        self.edge_index.entry(from.clone()).or_default().insert(to.clone(), index);
        self.edges.push(Edge { from, to, flow: Flow::zero(), capacity });
        Some(index)
    }

    pub fn get_edge(&self, from: &V, to: &V) -> Option<&Edge<V, Flow>> {
        self.index_of(from, to).map(|i| &self.edges[i])
    }

    pub fn capacity(&self, from: &V, to: &V) -> Flow {
        self.index_of(from, to).map_or(Flow::zero(), |i| self.edges[i].capacity)
    }

    pub fn flow(&self, from: &V, to: &V) -> Flow {
        match self.locate(from, to) {
            Some((i, true)) => self.edges[i].flow,
            Some((i, false)) => -self.edges[i].flow,
            None => Flow::zero(),
        }
    }

    pub fn residual_capacity(&self, from: &V, to: &V) -> Flow {
        self.capacity(from, to) - self.flow(from, to)
    }

    pub fn set_flow(&mut self, from: &V, to: &V, value: Flow) -> Result<(), FlowNetworkError> {
        trace!("set flow {from:?} -> {to:?} to {value:?}");
        match self.locate(from, to) {
            Some((i, true)) => self.edges[i].flow = value,
            Some((i, false)) => self.edges[i].flow = -value,
            None => return Err(unknown_edge(from, to)),
        }
        Ok(())
    }

    pub fn increase_flow(&mut self, from: &V, to: &V, delta: Flow) -> Result<(), FlowNetworkError> {
        trace!("increase flow {from:?} -> {to:?} by {delta:?}");
        match self.locate(from, to) {
            Some((i, true)) => self.edges[i].flow += delta,
            Some((i, false)) => self.edges[i].flow -= delta,
            None => return Err(unknown_edge(from, to)),
        }
        Ok(())
    }

    pub fn reset_flows(&mut self) {
        self.edges.iter_mut().for_each(|e| e.flow = Flow::zero());
    }

    // net outflow of v
    pub fn flow_across_vertex(&self, v: &V) -> Flow {
        self.adjacent(v).iter().fold(Flow::zero(), |mut sum, w| {
            sum += self.flow(v, w);
            sum
        })
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacent.keys()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<V, Flow>> {
        self.edges.iter()
    }

    // neighbors in either direction, insertion order
    pub fn adjacent(&self, u: &V) -> &[V] {
        self.adjacent.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn neighbors<'a>(&'a self, u: &'a V) -> impl Iterator<Item = &'a V> + 'a {
        self.adjacent(u).iter().filter(move |w| self.capacity(u, w) > Flow::zero())
    }

    pub fn residual_neighbors<'a>(&'a self, u: &'a V) -> impl Iterator<Item = &'a V> + 'a {
        self.adjacent(u).iter().filter(move |w| self.residual_capacity(u, w) > Flow::zero())
    }

    fn index_of(&self, from: &V, to: &V) -> Option<usize> {
        self.edge_index.get(from).and_then(|out| out.get(to)).copied()
    }

    // (edge index, true if from -> to is the capacitated direction)
    fn locate(&self, from: &V, to: &V) -> Option<(usize, bool)> {
        match self.index_of(from, to) {
            Some(i) => Some((i, true)),
            None => self.index_of(to, from).map(|i| (i, false)),
        }
    }
}

fn unknown_edge<V: Debug>(from: &V, to: &V) -> FlowNetworkError {
    FlowNetworkError::UnknownEdge { from: format!("{from:?}"), to: format!("{to:?}") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn chain() -> FlowNetwork<u32, i64> {
        let mut network = FlowNetwork::new();
        network.add_edge(1, 2, 5).unwrap();
        network.add_edge(2, 3, 5).unwrap();
        network
    }

    #[test]
    fn add_edge_links_both_endpoints() {
        let network = chain();
        assert_eq!(network.num_vertices(), 3);
        assert_eq!(network.num_edges(), 2);
        assert_eq!(network.adjacent(&1), &[2]);
        assert_eq!(network.adjacent(&2), &[1, 3]);
        assert_eq!(network.adjacent(&3), &[2]);
        assert_eq!(network.capacity(&1, &2), 5);
        assert_eq!(network.capacity(&2, &1), 0);
        assert_eq!(network.flow(&1, &2), 0);
        assert_eq!(network.flow(&2, &1), 0);
    }

    #[test]
    fn add_edge_returns_edge_index() {
        let mut network = FlowNetwork::<&str, i64>::new();
        assert_eq!(network.add_edge("s", "a", 3), Some(0));
        assert_eq!(network.add_edge("a", "t", 2), Some(1));
        assert_eq!(network.get_edge(&"a", &"t"), Some(&Edge { from: "a", to: "t", flow: 0, capacity: 2 }));
        assert_eq!(network.get_edge(&"t", &"a"), None);
    }

    #[rstest]
    #[case(1, 1, 5)]
    #[case(1, 2, 0)]
    #[case(1, 2, -4)]
    #[case(2, 1, 7)]
    fn invalid_edges_are_declined(#[case] from: u32, #[case] to: u32, #[case] capacity: i64) {
        let mut network = FlowNetwork::new();
        network.add_edge(1, 2, 5).unwrap();

        assert!(!network.is_valid_edge(&from, &to, capacity));
        assert_eq!(network.add_edge(from, to, capacity), None);
        assert_eq!(network.num_edges(), 1);
        assert_eq!(network.capacity(&1, &2), 5);
        assert_eq!(network.capacity(&2, &1), 0);
        assert_eq!(network.adjacent(&1), &[2]);
    }

    #[test]
    fn re_adding_an_edge_overwrites_capacity_and_resets_flow() {
        let mut network = chain();
        network.set_flow(&1, &2, 3).unwrap();

        assert!(network.is_valid_edge(&1, &2, 7));
        assert_eq!(network.add_edge(1, 2, 7), Some(0));
        assert_eq!(network.num_edges(), 2);
        assert_eq!(network.capacity(&1, &2), 7);
        assert_eq!(network.flow(&1, &2), 0);
        assert_eq!(network.flow(&2, &1), 0);
        assert_eq!(network.adjacent(&1), &[2]);
        assert_eq!(network.adjacent(&2), &[1, 3]);

        network.set_flow(&1, &2, 4).unwrap();
        network.set_flow(&2, &3, 4).unwrap();
        assert_eq!(network.flow_across_vertex(&2), 0);
    }

    #[test]
    fn add_vertex_is_idempotent() {
        let mut network = chain();
        network.add_vertex(2);
        network.add_vertex(4);
        network.add_vertex(4);
        assert_eq!(network.vertices().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(network.adjacent(&2), &[1, 3]);
        assert!(network.adjacent(&4).is_empty());
    }

    #[rstest]
    #[case(1, 2, 3)]
    #[case(2, 1, -3)]
    #[case(2, 3, 5)]
    #[case(3, 2, 0)]
    fn set_flow_is_antisymmetric(#[case] from: u32, #[case] to: u32, #[case] value: i64) {
        let mut network = chain();
        network.set_flow(&from, &to, value).unwrap();
        assert_eq!(network.flow(&from, &to), value);
        assert_eq!(network.flow(&to, &from), -value);
        assert_eq!(network.residual_capacity(&from, &to), network.capacity(&from, &to) - value);
        assert_eq!(network.residual_capacity(&to, &from), network.capacity(&to, &from) + value);
    }

    #[test]
    fn set_flow_overwrites() {
        let mut network = chain();
        network.set_flow(&1, &2, 4).unwrap();
        network.set_flow(&1, &2, 1).unwrap();
        assert_eq!(network.flow(&1, &2), 1);
        assert_eq!(network.flow(&2, &1), -1);
    }

    #[test]
    fn increase_flow_accumulates_in_both_directions() {
        let mut network = chain();
        network.increase_flow(&1, &2, 4).unwrap();
        network.increase_flow(&2, &1, 1).unwrap();
        assert_eq!(network.flow(&1, &2), 3);
        assert_eq!(network.flow(&2, &1), -3);
        assert_eq!(network.get_edge(&1, &2).unwrap().residual_capacity(), 2);
    }

    #[test]
    fn residual_may_go_negative() {
        let mut network = chain();
        network.set_flow(&1, &2, 9).unwrap();
        assert_eq!(network.residual_capacity(&1, &2), -4);
    }

    #[rstest]
    #[case(1, 3)]
    #[case(3, 1)]
    #[case(1, 9)]
    fn flow_updates_on_unknown_edges_fail(#[case] from: u32, #[case] to: u32) {
        let mut network = chain();
        assert!(matches!(network.set_flow(&from, &to, 1), Err(FlowNetworkError::UnknownEdge { .. })));
        assert!(matches!(network.increase_flow(&from, &to, 1), Err(FlowNetworkError::UnknownEdge { .. })));
        assert!(network.edges().all(|e| e.flow == 0));
    }

    #[test]
    fn unknown_queries_are_zero() {
        let network = chain();
        assert_eq!(network.capacity(&1, &3), 0);
        assert_eq!(network.flow(&1, &3), 0);
        assert_eq!(network.residual_capacity(&7, &8), 0);
        assert_eq!(network.flow_across_vertex(&7), 0);
        assert_eq!(network.neighbors(&7).count(), 0);
    }

    #[test]
    fn flow_across_interior_vertex_is_zero() {
        let mut network = chain();
        network.set_flow(&1, &2, 4).unwrap();
        network.set_flow(&2, &3, 4).unwrap();
        assert_eq!(network.flow_across_vertex(&1), 4);
        assert_eq!(network.flow_across_vertex(&2), 0);
        assert_eq!(network.flow_across_vertex(&3), -4);
    }

    #[test]
    fn neighbors_follow_capacity() {
        let network = chain();
        assert_eq!(network.neighbors(&1).copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(network.neighbors(&2).copied().collect::<Vec<_>>(), vec![3]);
        assert!(network.neighbors(&3).next().is_none());
    }

    #[test]
    fn residual_neighbors_with_zero_flow() {
        let network = chain();
        assert_eq!(network.residual_neighbors(&1).copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(network.residual_neighbors(&2).copied().collect::<Vec<_>>(), vec![3]);
        assert!(network.residual_neighbors(&3).next().is_none());
    }

    #[test]
    fn residual_neighbors_with_positive_flow() {
        let mut network = chain();
        network.increase_flow(&1, &2, 3).unwrap();
        assert_eq!(network.residual_neighbors(&1).copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(network.residual_neighbors(&2).copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(network.residual_capacity(&2, &1), 3);

        network.increase_flow(&1, &2, 2).unwrap();
        assert!(network.residual_neighbors(&1).next().is_none());
    }

    #[test]
    fn reset_flows_clears_every_edge() {
        let mut network = chain();
        network.set_flow(&1, &2, 2).unwrap();
        network.set_flow(&3, &2, 1).unwrap();
        network.reset_flows();
        assert!(network.edges().all(|e| e.flow == 0));
        assert_eq!(network.flow(&3, &2), 0);
    }
}
