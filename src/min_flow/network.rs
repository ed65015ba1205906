//! Flow network definitions
//! - FlowNetwork
//! - ResidueGraph
//!
//! `FlowNetwork` is a DiGraph whose edges are `FlowArc` records.
//! Each call of `add_edge` pushes an Up/Down pair of records, so the edge arena
//! doubles as the residual network and no separate residual graph is built.
//!
use super::arc::{FlowArc, ResidueDirection};
use super::{Capacity, Cost, FlowError, Loadings, Solution, ToolId};
use petgraph::graph::{DiGraph, EdgeIndex, EdgeReference, NodeIndex};
use petgraph::visit::{depth_first_search, Control, DfsEvent, EdgeFiltered, EdgeRef};

/// ResidueGraph definition
pub type ResidueGraph = DiGraph<(), FlowArc>;

/// Flow network with a single source and a single sink
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    graph: ResidueGraph,
    source: Option<NodeIndex>,
    sink: Option<NodeIndex>,
}

impl FlowNetwork {
    pub fn new() -> FlowNetwork {
        FlowNetwork::default()
    }

    ///
    /// Allocate a fresh vertex
    ///
    pub fn add_vertex(&mut self) -> NodeIndex {
        self.graph.add_node(())
    }

    ///
    /// Add an arc `from -> to` with cost `weight` per unit flow and `capacity`.
    ///
    /// Returns the index of the Up record. The Down record is always the next index.
    ///
    pub fn add_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        weight: Cost,
        capacity: Capacity,
        in_objective: bool,
        tool: Option<ToolId>,
    ) -> Result<EdgeIndex, FlowError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        let e_up = EdgeIndex::new(self.graph.edge_count());
        let e_down = EdgeIndex::new(self.graph.edge_count() + 1);
        let up = FlowArc::up(capacity, weight, in_objective, tool, e_down);
        let down = FlowArc::down(&up, e_up);
        let e = self.graph.add_edge(from, to, up);
        let e_rev = self.graph.add_edge(to, from, down);
        debug_assert_eq!((e, e_rev), (e_up, e_down));
        Ok(e)
    }

    pub fn set_source(&mut self, v: NodeIndex) -> Result<(), FlowError> {
        self.check_vertex(v)?;
        self.source = Some(v);
        Ok(())
    }

    pub fn set_sink(&mut self, v: NodeIndex) -> Result<(), FlowError> {
        self.check_vertex(v)?;
        self.sink = Some(v);
        Ok(())
    }

    pub fn source(&self) -> Option<NodeIndex> {
        self.source
    }

    pub fn sink(&self) -> Option<NodeIndex> {
        self.sink
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of arcs added by `add_edge` (each one is a pair of records)
    pub fn arc_count(&self) -> usize {
        self.graph.edge_count() / 2
    }

    pub fn graph(&self) -> &ResidueGraph {
        &self.graph
    }

    pub fn arc(&self, e: EdgeIndex) -> &FlowArc {
        &self.graph[e]
    }

    fn check_vertex(&self, v: NodeIndex) -> Result<(), FlowError> {
        if v.index() < self.graph.node_count() {
            Ok(())
        } else {
            Err(FlowError::VertexOutOfRange {
                vertex: v.index(),
                count: self.graph.node_count(),
            })
        }
    }

    ///
    /// Up records as `(edge, from, to, arc)`
    ///
    pub fn forward_arcs(&self) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex, &FlowArc)> {
        self.graph
            .edge_references()
            .filter(|e| e.weight().is_forward())
            .map(|e| (e.id(), e.source(), e.target(), e.weight()))
    }

    ///
    /// Check that the subgraph of Up records has no directed cycle,
    /// by depth first search stopping at the first back edge.
    ///
    pub fn is_acyclic(&self) -> bool {
        let forward = EdgeFiltered::from_fn(&self.graph, |e: EdgeReference<'_, FlowArc>| {
            e.weight().is_forward()
        });
        let back_edge = depth_first_search(&forward, self.graph.node_indices(), |event| {
            match event {
                DfsEvent::BackEdge(_, _) => Control::Break(()),
                _ => Control::Continue,
            }
        });
        back_edge.break_value().is_none()
    }

    ///
    /// The movable amount of the flow along the record `e`
    ///
    /// * Up:   `u - f`
    /// * Down: `f` of the mate
    ///
    pub fn residual_capacity(&self, e: EdgeIndex) -> Capacity {
        let arc = &self.graph[e];
        match arc.direction {
            ResidueDirection::Up => arc.capacity - arc.flow,
            ResidueDirection::Down => self.graph[arc.mate].flow,
        }
    }

    ///
    /// Push `amount` along the record `e`.
    /// A Down record cancels the flow of its mate, so both views stay consistent.
    ///
    pub fn augment(&mut self, e: EdgeIndex, amount: Capacity) {
        debug_assert!(amount <= self.residual_capacity(e));
        let arc = self.graph[e];
        match arc.direction {
            ResidueDirection::Up => self.graph[e].flow += amount,
            ResidueDirection::Down => self.graph[arc.mate].flow -= amount,
        }
    }

    ///
    /// Net amount of flow leaving the source
    ///
    pub fn total_flow(&self) -> u64 {
        let source = match self.source {
            Some(s) => s,
            None => return 0,
        };
        let out: u64 = self
            .forward_arcs()
            .filter(|(_, v, _, _)| *v == source)
            .map(|(_, _, _, arc)| arc.flow as u64)
            .sum();
        let inc: u64 = self
            .forward_arcs()
            .filter(|(_, _, w, _)| *w == source)
            .map(|(_, _, _, arc)| arc.flow as u64)
            .sum();
        out - inc
    }

    ///
    /// `sum of weight * flow` over the arcs counted in the objective,
    /// computed from the current flow values.
    ///
    pub fn objective_cost(&self) -> i128 {
        self.forward_arcs()
            .filter(|(_, _, _, arc)| arc.in_objective)
            .map(|(_, _, _, arc)| arc.weight as i128 * arc.flow as i128)
            .sum()
    }

    ///
    /// For each tool-tagged arc `v -> w` carrying flow, the tool is resident in
    /// every unit `v.index() .. w.index()`.
    ///
    pub fn loadings(&self) -> Loadings {
        let mut loadings: Loadings = vec![Vec::new(); self.vertex_count()];
        for (_, v, w, arc) in self.forward_arcs() {
            if let Some(tool) = arc.tool {
                if arc.flow > 0 {
                    for unit in v.index()..w.index() {
                        loadings[unit].push(tool);
                    }
                }
            }
        }
        for tools in loadings.iter_mut() {
            tools.sort_unstable();
        }
        loadings
    }

    ///
    /// Find the minimum cost maximum flow from source to sink.
    ///
    pub fn solve(&mut self) -> Result<Solution, FlowError> {
        super::min_cost_max_flow(self)
    }
}

//
// tests
//
#[cfg(test)]
mod tests {
    use super::super::mocks::{mock_cyclic_network, mock_diamond_network};
    use super::*;

    #[test]
    fn add_edge_creates_mated_pair() {
        let mut n = FlowNetwork::new();
        let a = n.add_vertex();
        let b = n.add_vertex();
        let e = n.add_edge(a, b, -4, 3, true, None).unwrap();
        assert_eq!(n.arc_count(), 1);
        assert_eq!(n.graph().edge_count(), 2);

        let up = *n.arc(e);
        let down = *n.arc(up.mate);
        assert_eq!(down.mate, e);
        assert_eq!(down.weight, 4);
        assert_eq!(n.residual_capacity(e), 3);
        assert_eq!(n.residual_capacity(up.mate), 0);

        n.augment(e, 2);
        assert_eq!(n.residual_capacity(e), 1);
        assert_eq!(n.residual_capacity(up.mate), 2);

        n.augment(up.mate, 1);
        assert_eq!(n.arc(e).flow, 1);
        assert_eq!(n.residual_capacity(up.mate), 1);
    }

    #[test]
    fn out_of_range_vertices_are_rejected() {
        let mut n = FlowNetwork::new();
        let a = n.add_vertex();
        let bad = NodeIndex::new(5);
        assert_eq!(
            n.add_edge(a, bad, 0, 1, true, None),
            Err(FlowError::VertexOutOfRange { vertex: 5, count: 1 })
        );
        assert_eq!(
            n.add_edge(bad, a, 0, 1, true, None),
            Err(FlowError::VertexOutOfRange { vertex: 5, count: 1 })
        );
        assert!(n.set_source(bad).is_err());
        assert!(n.set_sink(bad).is_err());
        assert!(n.set_source(a).is_ok());
        assert_eq!(n.source(), Some(a));
        assert_eq!(n.arc_count(), 0);
    }

    #[test]
    fn acyclic_check_ignores_down_records() {
        let (n, _) = mock_diamond_network();
        assert!(n.is_acyclic());

        let n = mock_cyclic_network();
        assert!(!n.is_acyclic());

        let mut n = FlowNetwork::new();
        let a = n.add_vertex();
        n.add_edge(a, a, 0, 1, true, None).unwrap();
        assert!(!n.is_acyclic());
    }

    #[test]
    fn acyclic_check_visits_every_component() {
        // 0 -> 1 is fine, the cycle 2 -> 3 -> 2 is not reachable from 0
        let mut n = FlowNetwork::new();
        let v: Vec<_> = (0..4).map(|_| n.add_vertex()).collect();
        n.add_edge(v[0], v[1], 0, 1, true, None).unwrap();
        n.add_edge(v[2], v[3], 0, 1, true, None).unwrap();
        assert!(n.is_acyclic());
        n.add_edge(v[3], v[2], 0, 1, true, None).unwrap();
        assert!(!n.is_acyclic());
        assert_eq!(super::super::potential::topological_order(&n), None);
    }

    #[test]
    fn loadings_follow_tagged_flow() {
        let mut n = FlowNetwork::new();
        let v: Vec<_> = (0..4).map(|_| n.add_vertex()).collect();
        let e1 = n.add_edge(v[0], v[3], -1, 1, true, Some(7)).unwrap();
        let e2 = n.add_edge(v[1], v[2], -1, 1, true, Some(2)).unwrap();
        n.add_edge(v[0], v[1], 0, 1, true, Some(9)).unwrap();
        n.augment(e1, 1);
        n.augment(e2, 1);
        let l = n.loadings();
        assert_eq!(l.len(), 4);
        assert_eq!(l[0], vec![7]);
        assert_eq!(l[1], vec![2, 7]);
        assert_eq!(l[2], vec![7]);
        assert!(l[3].is_empty());
    }
}
