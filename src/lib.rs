//! Valve network optimizer: find how much pressure can be released from a network of valves
//! connected by tunnels, working alone or alongside a second agent.

pub mod paths;
pub mod search;
pub mod volcano;

pub use search::{part1, part2, BestReleases, OpenedSet, Search, State};
pub use volcano::{ParseError, RoomHandle, Valve, Volcano};

pub const START_VALVE: &str = "AA";
pub const PART1_MINUTES: usize = 30;
pub const PART2_MINUTES: usize = 26;

#[cfg(test)]
pub(crate) const EXAMPLE: &str = "\
Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
Valve BB has flow rate=13; tunnels lead to valves CC, AA
Valve CC has flow rate=2; tunnels lead to valves DD, BB
Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
Valve EE has flow rate=3; tunnels lead to valves FF, DD
Valve FF has flow rate=0; tunnels lead to valves EE, GG
Valve GG has flow rate=0; tunnels lead to valves FF, HH
Valve HH has flow rate=22; tunnel leads to valve GG
Valve II has flow rate=0; tunnels lead to valves AA, JJ
Valve JJ has flow rate=21; tunnel leads to valve II";
