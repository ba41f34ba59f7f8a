use std::collections::HashSet;

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use tracing::trace;

use crate::board::{Level, MoveError};
use crate::cell::CellType;
use crate::location::Coordinate;
use crate::shape::Direction;

/// Why a walk along the road stopped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WalkOutcome {
    /// The road reached the finish cell.
    Solved,
    /// The road leads off the edge of the board from `from`.
    OffBoard {
        /// Last cell on the board.
        from: Coordinate,
        /// Way the road leaves it.
        direction: Direction,
    },
    /// The road leads from `from` into a cell that does not connect back.
    Disconnected {
        /// Last connected cell.
        from: Coordinate,
        /// Way towards the neighbour that does not connect back.
        direction: Direction,
    },
    /// The road stops inside the cell at `at`.
    DeadEnd {
        /// The cell with no way onwards.
        at: Coordinate,
    },
    /// The walk took more steps than the board has cells.
    StepLimit,
}

/// The result of following the road from the start cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoadTrace {
    /// Every cell the road passed through, start cell first.
    pub path: Vec<Coordinate>,
    /// Why the walk stopped.
    pub outcome: WalkOutcome,
}

impl RoadTrace {
    /// Whether the road reached the finish cell.
    pub fn is_solved(&self) -> bool {
        self.outcome == WalkOutcome::Solved
    }
}

impl Level {
    /// Follow the road from the start cell until it reaches the finish cell or breaks off.
    ///
    /// # Walk
    /// From the current cell take its open connections, drop the one we arrived through and step along the first remaining one in [`Direction`] order.
    /// The first step has arrived through nothing, so every connection of the start cell is a candidate.
    ///
    /// The step is good if the neighbour exists and connects back in the opposite direction.
    /// Entering the finish cell solves the board. Road pieces have exactly two connections, so the walk never branches,
    /// but it is still cut off after as many steps as the board has cells.
    pub fn trace_road(&self) -> RoadTrace {
        let mut current = self.start();
        let mut path = vec![current];
        let mut arrived_through: Option<Direction> = None;

        for _ in 0..self.cells.len() {
            let cell_type = self.cells[current.as_index()].cell_type();
            let Some(direction) = cell_type.connections().iter()
                .find(|dir| Some(**dir) != arrived_through)
                .copied()
            else {
                return RoadTrace { path, outcome: WalkOutcome::DeadEnd { at: current } };
            };

            let Ok(neighbor) = self.cell_at(direction.attempt_from(current)) else {
                return RoadTrace { path, outcome: WalkOutcome::OffBoard { from: current, direction } };
            };

            let back = direction.opposite();
            if !neighbor.cell_type().connects(back) {
                return RoadTrace { path, outcome: WalkOutcome::Disconnected { from: current, direction } };
            }

            trace!(from = %current, ?direction, to = %neighbor.coordinate(), "road step");
            current = neighbor.coordinate();
            arrived_through = Some(back);
            path.push(current);

            if neighbor.cell_type() == CellType::Finish {
                return RoadTrace { path, outcome: WalkOutcome::Solved };
            }
        }

        RoadTrace { path, outcome: WalkOutcome::StepLimit }
    }

    /// Whether a continuous road joins the start cell to the finish cell.
    pub fn is_solved(&self) -> bool {
        self.trace_road().is_solved()
    }

    /// Express the board as an undirected graph G. Every coordinate is a vertex;
    /// an edge joins two orthogonal neighbours whose cells connect towards each other.
    ///
    /// Edge weights are the direction from the lower indexed endpoint, i.e. always [`Right`](Direction::Right) or [`Down`](Direction::Down).
    pub fn road_graph(&self) -> UnGraphMap<Coordinate, Direction> {
        let size = self.size();
        let mut graph = UnGraphMap::with_capacity(self.cells.len(), 2 * size * (size - 1));

        for (row, column) in (0..size).cartesian_product(0..size) {
            let location = Coordinate(row, column);
            graph.add_node(location);

            let cell_type = self.cells[location.as_index()].cell_type();
            // only look right and down so each pair is considered once
            for direction in Direction::FORWARD_VARIANTS {
                let Ok(neighbor) = self.cell_at(direction.attempt_from(location)) else {
                    continue;
                };
                if cell_type.connects(*direction) && neighbor.cell_type().connects(direction.opposite()) {
                    graph.add_edge(location, neighbor.coordinate(), *direction);
                }
            }
        }

        graph
    }

    /// Coordinates joined to `location` by road, `location` included.
    ///
    /// This ignores which way the road runs, so `linked_to(level.finish())` shows the stretch of road already built back from the finish.
    pub fn linked_to(&self, location: Coordinate) -> Result<HashSet<Coordinate>, MoveError> {
        self.cell_at(location)?;

        let graph = self.road_graph();
        let mut bfs = Bfs::new(&graph, location);
        let mut reached = HashSet::new();
        while let Some(next) = bfs.next(&graph) {
            reached.insert(next);
        }
        Ok(reached)
    }

    /// Coordinates joined to the start cell by road, start cell included.
    pub fn connected_to_start(&self) -> HashSet<Coordinate> {
        self.linked_to(self.start()).unwrap_or_default()
    }
}
