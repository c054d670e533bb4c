use std::error::Error;

use log::info;
use valve_network::{part1, part2, ParseError};

const HELP: &str = "\
day16 <opts> [part1|part2]

Reads valve descriptions from stdin and prints the most pressure that can be released.
With no part given, prints both answers, part 1 first.

part1
    Open valves alone for 30 minutes
part2
    Open valves alongside an elephant for 26 minutes

-h|--help
    Show help
";

type Solver = fn(&str) -> Result<usize, ParseError>;

fn solvers(args: &[&str]) -> Option<Vec<Solver>> {
    match args {
        [] => Some(vec![part1 as Solver, part2]),
        ["part1"] => Some(vec![part1 as Solver]),
        ["part2"] => Some(vec![part2 as Solver]),
        _ => None,
    }
}

fn run(solvers: &[Solver], input: &str) -> Result<Vec<usize>, ParseError> {
    solvers.iter().map(|solve| solve(input)).collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    if args.iter().any(|&a| a == "-h" || a == "--help") {
        print!("{}", HELP);
        return Ok(());
    }
    let Some(solvers) = solvers(&args) else {
        eprint!("{}", HELP);
        return Err("must specify part1|part2, or nothing for both".into());
    };

    let input = std::io::read_to_string(std::io::stdin().lock())?;
    for answer in run(&solvers, &input)? {
        info!("answer={answer}");
        println!("{answer}");
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const EXAMPLE: &str = "\
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

    fn answers(args: &[&str]) -> Vec<usize> {
        run(&solvers(args).unwrap(), EXAMPLE).unwrap()
    }

    #[test]
    fn test_no_args_runs_both() {
        assert_eq!(answers(&[]), vec![1651, 1707]);
    }

    #[test]
    fn test_single_part() {
        assert_eq!(answers(&["part1"]), vec![1651]);
        assert_eq!(answers(&["part2"]), vec![1707]);
    }

    #[test]
    fn test_bad_args() {
        assert!(solvers(&["part3"]).is_none());
        assert!(solvers(&["part1", "part2"]).is_none());
    }

    #[test]
    fn test_bad_input() {
        let solvers = solvers(&[]).unwrap();
        assert!(run(&solvers, "Valve AA is stuck").is_err());
    }
}
