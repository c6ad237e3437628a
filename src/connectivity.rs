use petgraph::algo::connected_components;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::ledger::BridgeLedger;
use crate::location::Location;

/// Express the bridges in `ledger` as an undirected graph over every island on `board`.
///
/// A double bridge is a single edge; only reachability matters here.
pub fn island_graph(board: &Board, ledger: &BridgeLedger) -> UnGraphMap<Location, ()> {
    let mut graph = UnGraphMap::with_capacity(board.island_count(), ledger.len());
    for island in board.islands() {
        graph.add_node(island);
    }

    for bridge in ledger.iter() {
        let UnorderedPair(a, b) = bridge.ends;
        // bridges to open water can only come from a caller bypassing the legality gate
        if board.is_island(a) && board.is_island(b) {
            graph.add_edge(a, b, ());
        }
    }

    graph
}

/// Whether every island can reach every other island over the bridges in `ledger`.
///
/// The search starts from the first island in row-major order. A board without islands is vacuously connected,
/// as is a lone island; two or more islands with no bridges never are.
pub fn is_fully_connected(board: &Board, ledger: &BridgeLedger) -> bool {
    let Some(start) = board.islands().next() else {
        return true;
    };

    let graph = island_graph(board, ledger);
    let mut bfs = Bfs::new(&graph, start);
    let mut visited = 0;
    while bfs.next(&graph).is_some() {
        visited += 1;
    }

    visited == graph.node_count()
}

/// The number of separate groups of islands, counting unbridged islands as groups of one.
pub fn component_count(board: &Board, ledger: &BridgeLedger) -> usize {
    connected_components(&island_graph(board, ledger))
}
