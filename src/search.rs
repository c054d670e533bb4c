use std::cmp;
use std::collections::HashMap;
use std::fmt;

use log::{debug, info};

use crate::paths::{shortest_paths, SquareArray, INFINITE};
use crate::volcano::{ParseError, RoomHandle, Valve, Volcano};
use crate::{PART1_MINUTES, PART2_MINUTES, START_VALVE};

/// Set of opened valves, one bit per valve with positive flow (see `Valve::bit`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OpenedSet(pub u64);

impl OpenedSet {
    pub const EMPTY: OpenedSet = OpenedSet(0);

    pub fn contains(self, bit: u32) -> bool {
        self.0 & (1 << bit) != 0
    }

    pub fn with(self, bit: u32) -> Self {
        OpenedSet(self.0 | (1 << bit))
    }

    pub fn is_disjoint(self, other: OpenedSet) -> bool {
        self.0 & other.0 == 0
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for OpenedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct State {
    pub room: RoomHandle,
    pub opened: OpenedSet,
    pub minutes_left: usize,
    pub released: usize,
}

pub struct Search<'a> {
    volcano: &'a Volcano,
    shortest_paths: SquareArray,
    start: RoomHandle,
    useful: Vec<&'a Valve>,
}

impl<'a> Search<'a> {
    pub fn new(volcano: &'a Volcano, start: &str) -> Result<Self, ParseError> {
        let Some(start) = volcano.handle(start) else {
            return Err(ParseError::UnknownValve(start.to_string()));
        };
        let shortest_paths = shortest_paths(volcano.tunnels());
        let useful: Vec<&Valve> = volcano.useful_valves().collect();
        info!("{} valves, {} worth opening", volcano.len(), useful.len());
        Ok(Search { volcano, shortest_paths, start, useful })
    }

    pub fn volcano(&self) -> &Volcano {
        self.volcano
    }

    pub fn shortest_paths(&self) -> &SquareArray {
        &self.shortest_paths
    }

    pub fn start_state(&self, minutes: usize) -> State {
        State {
            room: self.start,
            opened: OpenedSet::EMPTY,
            minutes_left: minutes,
            released: 0,
        }
    }

    /// Every state reachable by walking to one closed valve and opening it. A move that leaves
    /// no time for the valve to release anything isn't worth making, so it isn't yielded.
    ///
    /// The parser only bounds releases for budgets up to `PART1_MINUTES`; past that they
    /// saturate at `usize::MAX`.
    pub fn transitions(&self, state: State) -> impl Iterator<Item=State> + '_ {
        self.useful.iter().filter_map(move |valve| {
            let bit = valve.bit?;
            if state.opened.contains(bit) {
                return None;
            }
            let dist = self.shortest_paths.get(state.room.0, valve.index.0);
            if dist == INFINITE {
                return None;
            }
            // +1 to open it.
            let cost = dist + 1;
            if cost >= state.minutes_left {
                return None;
            }
            let minutes_left = state.minutes_left - cost;
            Some(State {
                room: valve.index,
                opened: state.opened.with(bit),
                minutes_left,
                released: state.released.saturating_add(valve.flow.saturating_mul(minutes_left)),
            })
        })
    }

    /// Explore every order of opening valves, remembering the most released for each set of
    /// opened valves.
    pub fn best_releases(&self, minutes: usize) -> BestReleases {
        let mut best = BestReleases::default();
        let mut stack: Vec<State> = vec![self.start_state(minutes)];
        let mut nstates: usize = 0;
        while let Some(state) = stack.pop() {
            nstates += 1;
            best.record(state.opened, state.released);
            stack.extend(self.transitions(state));
        }
        debug!("minutes={minutes} nstates={nstates} nsets={}", best.len());
        best
    }

    /// Most pressure one agent can release, found without any memo. Slower than
    /// `best_releases`, but independent of it.
    pub fn max_release(&self, minutes: usize) -> usize {
        self.max_release_from(self.start_state(minutes))
    }

    fn max_release_from(&self, state: State) -> usize {
        self.transitions(state)
            .map(|next| self.max_release_from(next))
            .fold(state.released, cmp::max)
    }
}

/// Most pressure released for each exact set of opened valves.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct BestReleases {
    by_opened: HashMap<OpenedSet, usize>,
}

impl BestReleases {
    pub fn record(&mut self, opened: OpenedSet, released: usize) {
        let best = self.by_opened.entry(opened).or_insert(released);
        *best = cmp::max(*best, released);
    }

    pub fn get(&self, opened: OpenedSet) -> Option<usize> {
        self.by_opened.get(&opened).copied()
    }

    pub fn len(&self) -> usize {
        self.by_opened.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_opened.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=(OpenedSet, usize)> + '_ {
        self.by_opened.iter().map(|(&opened, &released)| (opened, released))
    }

    /// Keep the larger release for every set in either table.
    pub fn merge(&mut self, other: &BestReleases) {
        for (opened, released) in other.iter() {
            self.record(opened, released);
        }
    }

    pub fn best(&self) -> usize {
        self.by_opened.values().copied().max().unwrap_or(0)
    }

    /// Most released by two agents that never open the same valve.
    pub fn best_disjoint_pair(&self) -> usize {
        let mut entries: Vec<(OpenedSet, usize)> = self.iter().collect();
        // Descending by release, so both loops can stop once they can't beat `best`.
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        let mut best: usize = 0;
        for (i, &(a, released_a)) in entries.iter().enumerate() {
            if released_a <= best.saturating_sub(released_a) {
                break;
            }
            for &(b, released_b) in &entries[i..] {
                let released = released_a.saturating_add(released_b);
                if released <= best {
                    break;
                }
                if a.is_disjoint(b) {
                    best = released;
                }
            }
        }
        best
    }
}

pub fn part1(input: &str) -> Result<usize, ParseError> {
    let volcano: Volcano = input.parse()?;
    let search = Search::new(&volcano, START_VALVE)?;
    let best = search.best_releases(PART1_MINUTES);
    info!("{} sets of opened valves recorded", best.len());
    Ok(best.best())
}

pub fn part2(input: &str) -> Result<usize, ParseError> {
    let volcano: Volcano = input.parse()?;
    let search = Search::new(&volcano, START_VALVE)?;
    let best = search.best_releases(PART2_MINUTES);
    info!("{} sets of opened valves recorded", best.len());
    Ok(best.best_disjoint_pair())
}
