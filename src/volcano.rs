use std::collections::HashMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;

use crate::paths::{SquareArray, INFINITE};
use crate::PART1_MINUTES;

// eg: Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Valve ([A-Z]{2}) has flow rate=(\d+); tunnels? leads? to valves? ([A-Z, ]+)$").unwrap()
});

/// Widest opened-set bitmask we support.
pub const MAX_USEFUL_VALVES: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no valves in input")]
    EmptyInput,
    #[error("unexpected line format: {0}")]
    UnexpectedLine(String),
    #[error("bad flow rate: {line}")]
    BadFlowRate {
        line: String,
        source: ParseIntError,
    },
    #[error("flow rate of valve {0} would overflow the pressure released")]
    FlowTooLarge(String),
    #[error("valve {0} is defined more than once")]
    DuplicateValve(String),
    #[error("unknown valve: {0}")]
    UnknownValve(String),
    #[error("{0} valves have a positive flow rate, at most {max} are supported", max = MAX_USEFUL_VALVES)]
    TooManyValves(usize),
}

/// Index of a valve in the `Volcano` that handed it out.
///
/// ```compile_fail
/// let _ = valve_network::RoomHandle(0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomHandle(pub(crate) usize);

impl fmt::Debug for RoomHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Valve {
    pub name: String,
    pub flow: usize,
    /// Position of the valve's line in the input. Also its row in the distance table.
    pub index: RoomHandle,
    /// Bit in an opened-set mask. Only valves with positive flow get one.
    pub bit: Option<u32>,
}

pub struct Volcano {
    valves: Vec<Valve>,
    handle_for: HashMap<String, RoomHandle>,
    tunnels: SquareArray,
}

impl Volcano {
    pub fn len(&self) -> usize {
        self.valves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valves.is_empty()
    }

    pub fn valves(&self) -> impl Iterator<Item=&Valve> + '_ {
        self.valves.iter()
    }

    /// Valves worth opening, in input order.
    pub fn useful_valves(&self) -> impl Iterator<Item=&Valve> + '_ {
        self.valves.iter().filter(|v| v.flow > 0)
    }

    pub fn get(&self, rh: RoomHandle) -> &Valve {
        &self.valves[rh.0]
    }

    pub fn handle(&self, name: &str) -> Option<RoomHandle> {
        self.handle_for.get(name).copied()
    }

    pub fn valve(&self, name: &str) -> Option<&Valve> {
        self.handle(name).map(|rh| self.get(rh))
    }

    pub fn flow(&self, name: &str) -> Option<usize> {
        self.valve(name).map(|v| v.flow)
    }

    /// Direct tunnel costs: 0 on the diagonal, 1 for a tunnel, INFINITE otherwise.
    pub fn tunnels(&self) -> &SquareArray {
        &self.tunnels
    }

    pub fn neighbors(&self, rh: RoomHandle) -> impl Iterator<Item=RoomHandle> + '_ {
        self.tunnels.row(rh.0).iter().enumerate()
            .filter(move |&(i, &w)| i != rh.0 && w != INFINITE)
            .map(|(i, _)| RoomHandle(i))
    }

    pub fn neighbor_names(&self, name: &str) -> Vec<&str> {
        let Some(src) = self.handle(name) else {
            return Vec::new();
        };
        self.neighbors(src)
            .map(|rh| self.get(rh).name.as_str())
            .collect()
    }
}

impl fmt::Display for Volcano {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for valve in &self.valves {
            writeln!(f, "Valve {} ({})", valve.name, valve.flow)?;
            for rh in self.neighbors(valve.index) {
                writeln!(f, "  {}->{}", valve.name, self.get(rh).name)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Volcano {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut valves: Vec<Valve> = Vec::new();
        let mut handle_for: HashMap<String, RoomHandle> = HashMap::new();
        let mut adjacent_for: Vec<&str> = Vec::new();
        let mut nuseful: usize = 0;
        let mut total_flow: usize = 0;

        // Handles follow line order, so resolve tunnels only once every valve is known.
        for line in s.trim().lines() {
            let Some(caps) = LINE_RE.captures(line) else {
                return Err(ParseError::UnexpectedLine(line.to_string()));
            };
            let name = caps[1].to_string();
            let flow: usize = caps[2].parse().map_err(|source| ParseError::BadFlowRate {
                line: line.to_string(),
                source,
            })?;
            if handle_for.contains_key(&name) {
                return Err(ParseError::DuplicateValve(name));
            }
            // Every valve open for the whole longest budget must still fit.
            total_flow = match total_flow.checked_add(flow) {
                Some(total) if total.checked_mul(PART1_MINUTES).is_some() => total,
                _ => return Err(ParseError::FlowTooLarge(name)),
            };

            let bit = if flow > 0 {
                nuseful += 1;
                Some((nuseful - 1) as u32)
            } else {
                None
            };
            let index = RoomHandle(valves.len());
            handle_for.insert(name.clone(), index);
            valves.push(Valve { name, flow, index, bit });
            adjacent_for.push(caps.get(3).map_or("", |m| m.as_str()));
        }

        if valves.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if nuseful > MAX_USEFUL_VALVES {
            return Err(ParseError::TooManyValves(nuseful));
        }

        let mut tunnels = SquareArray::new(valves.len(), INFINITE);
        for (src, adjacent) in adjacent_for.into_iter().enumerate() {
            tunnels.set(src, src, 0);
            for name in adjacent.split(',').map(str::trim) {
                let Some(&dst) = handle_for.get(name) else {
                    return Err(ParseError::UnknownValve(name.to_string()));
                };
                if dst.0 == src {
                    continue;
                }
                // Tunnels go both ways.
                tunnels.set(src, dst.0, 1);
                tunnels.set(dst.0, src, 1);
            }
        }

        let volcano = Volcano { valves, handle_for, tunnels };
        debug!("parsed {} valves, {} worth opening\n{}", volcano.len(), nuseful, volcano);
        Ok(volcano)
    }
}
