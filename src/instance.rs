//! # `ProblemInstance`
//!
//! A tool switching instance on a fixed job sequence:
//! * `tool_count` M tools with insertion costs `tool_costs[t - 1]`
//! * `job_count` N jobs, job `j` requires the tool set `jobs[j]`
//! * magazine `capacity` C
//!
//! Text format (lines starting with `#` are ignored):
//!
//! ```text
//! M N C
//! COST c1 .. cM
//! JOBS N
//! k t1 .. tk
//! ```
//!
use crate::min_flow::{Capacity, Cost, ToolId};
use itertools::Itertools; // for join
use rand::seq::index::sample;
use rand::Rng;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("job {job} requires tool {tool} outside 1..={tool_count}")]
    ToolOutOfRange {
        job: usize,
        tool: ToolId,
        tool_count: usize,
    },
    #[error("tool {tool} has negative cost {cost}")]
    NegativeCost { tool: ToolId, cost: Cost },
    #[error("job {job} requires {required} tools but the magazine holds {capacity}")]
    Infeasible {
        job: usize,
        required: usize,
        capacity: Capacity,
    },
}

/// A single tool request `(job, tool)`. `job` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Request {
    pub job: usize,
    pub tool: ToolId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInstance {
    pub tool_count: usize,
    pub job_count: usize,
    pub capacity: Capacity,
    /// cost of inserting tool `t` is `tool_costs[t - 1]`
    pub tool_costs: Vec<Cost>,
    /// required tools of each job, duplicates removed
    pub jobs: Vec<BTreeSet<ToolId>>,
}

impl ProblemInstance {
    ///
    /// Create an instance, checking tool ids and costs.
    /// Capacity is not checked here, see `check_feasible`.
    ///
    pub fn new(
        capacity: Capacity,
        tool_costs: Vec<Cost>,
        jobs: Vec<Vec<ToolId>>,
    ) -> Result<ProblemInstance, InstanceError> {
        let tool_count = tool_costs.len();
        if let Some((i, &cost)) = tool_costs.iter().find_position(|&&c| c < 0) {
            return Err(InstanceError::NegativeCost { tool: i + 1, cost });
        }
        let mut sets = Vec::with_capacity(jobs.len());
        for (job, tools) in jobs.into_iter().enumerate() {
            if let Some(&tool) = tools.iter().find(|&&t| t < 1 || t > tool_count) {
                return Err(InstanceError::ToolOutOfRange {
                    job,
                    tool,
                    tool_count,
                });
            }
            sets.push(tools.into_iter().collect());
        }
        Ok(ProblemInstance {
            tool_count,
            job_count: sets.len(),
            capacity,
            tool_costs,
            jobs: sets,
        })
    }

    pub fn cost(&self, tool: ToolId) -> Cost {
        self.tool_costs[tool - 1]
    }

    pub fn max_tool_cost(&self) -> Cost {
        self.tool_costs.iter().copied().max().unwrap_or(0)
    }

    ///
    /// All requests, ordered by job and then by tool id.
    ///
    pub fn requests(&self) -> Vec<Request> {
        self.jobs
            .iter()
            .enumerate()
            .flat_map(|(job, tools)| tools.iter().map(move |&tool| Request { job, tool }))
            .collect()
    }

    ///
    /// Jobs (0-based) in which each tool is used. Index 0 is unused.
    ///
    pub fn occurrences(&self) -> Vec<Vec<usize>> {
        let mut occ = vec![Vec::new(); self.tool_count + 1];
        for (job, tools) in self.jobs.iter().enumerate() {
            for &tool in tools {
                occ[tool].push(job);
            }
        }
        occ
    }

    ///
    /// Every job has to fit into the magazine.
    ///
    pub fn check_feasible(&self) -> Result<(), InstanceError> {
        match self
            .jobs
            .iter()
            .find_position(|tools| tools.len() > self.capacity as usize)
        {
            Some((job, tools)) => Err(InstanceError::Infeasible {
                job,
                required: tools.len(),
                capacity: self.capacity,
            }),
            None => Ok(()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ProblemInstance, InstanceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| InstanceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        text.parse()
    }

    ///
    /// Random feasible instance.
    ///
    /// Each job requires between 1 and `min(capacity, tools)` distinct tools.
    ///
    pub fn random<R: Rng>(
        rng: &mut R,
        tools: usize,
        jobs: usize,
        capacity: Capacity,
        costs: RangeInclusive<Cost>,
    ) -> ProblemInstance {
        let tool_costs: Vec<Cost> = (0..tools).map(|_| rng.gen_range(costs.clone())).collect();
        let max_size = tools.min(capacity as usize);
        let jobs = (0..jobs)
            .map(|_| {
                if max_size == 0 {
                    return BTreeSet::new();
                }
                let size = rng.gen_range(1..=max_size);
                sample(&mut *rng, tools, size).into_iter().map(|t| t + 1).collect()
            })
            .collect::<Vec<BTreeSet<ToolId>>>();
        ProblemInstance {
            tool_count: tools,
            job_count: jobs.len(),
            capacity,
            tool_costs,
            jobs,
        }
    }
}

fn parse_num<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, InstanceError> {
    token.parse().map_err(|_| InstanceError::Parse {
        line,
        message: format!("'{}' is not a valid number", token),
    })
}

impl std::str::FromStr for ProblemInstance {
    type Err = InstanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.split_whitespace().collect::<Vec<_>>()))
            .filter(|(_, tokens)| tokens.first().map_or(false, |t| !t.starts_with('#')));
        let eof = |what: &str| InstanceError::Parse {
            line: s.lines().count(),
            message: format!("unexpected end of file before {}", what),
        };
        let err = |line: usize, message: &str| InstanceError::Parse {
            line,
            message: message.to_string(),
        };

        // M N C
        let (line, tokens) = lines.next().ok_or_else(|| eof("M N C"))?;
        if tokens.len() != 3 {
            return Err(err(line, "expected: M N C"));
        }
        let m: usize = parse_num(tokens[0], line)?;
        let n: usize = parse_num(tokens[1], line)?;
        let capacity: Capacity = parse_num(tokens[2], line)?;

        // COST c1 .. cM
        let (line, tokens) = lines.next().ok_or_else(|| eof("COST"))?;
        if tokens[0] != "COST" {
            return Err(err(line, "expected 'COST'"));
        }
        if tokens.len() != m + 1 {
            return Err(err(line, "COST line must have M values"));
        }
        let tool_costs = tokens[1..]
            .iter()
            .map(|t| parse_num(t, line))
            .collect::<Result<Vec<Cost>, _>>()?;

        // JOBS N
        let (line, tokens) = lines.next().ok_or_else(|| eof("JOBS"))?;
        if tokens.len() != 2 || tokens[0] != "JOBS" {
            return Err(err(line, "expected 'JOBS N'"));
        }
        if parse_num::<usize>(tokens[1], line)? != n {
            return Err(err(line, "JOBS count does not match N"));
        }

        // k t1 .. tk
        let mut jobs = Vec::with_capacity(n);
        for _ in 0..n {
            let (line, tokens) = lines.next().ok_or_else(|| eof("job line"))?;
            let k: usize = parse_num(tokens[0], line)?;
            if tokens.len() != k + 1 {
                return Err(err(line, "job line has wrong token count"));
            }
            let tools = tokens[1..]
                .iter()
                .map(|t| parse_num(t, line))
                .collect::<Result<Vec<ToolId>, _>>()?;
            jobs.push(tools);
        }

        ProblemInstance::new(capacity, tool_costs, jobs)
    }
}

impl std::fmt::Display for ProblemInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {} {}", self.tool_count, self.job_count, self.capacity)?;
        writeln!(f, "COST {}", self.tool_costs.iter().join(" "))?;
        writeln!(f, "JOBS {}", self.job_count)?;
        for tools in &self.jobs {
            if tools.is_empty() {
                writeln!(f, "0")?;
            } else {
                writeln!(f, "{} {}", tools.len(), tools.iter().join(" "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EXAMPLE: &str = "\
# 3 tools, 4 jobs, magazine of 2
3 4 2
COST 1 2 3

JOBS 4
1 1
2 2 3
   # comment inside
2 1 1
1 2
";

    #[test]
    fn parse_example() {
        let inst: ProblemInstance = EXAMPLE.parse().unwrap();
        assert_eq!(inst.tool_count, 3);
        assert_eq!(inst.job_count, 4);
        assert_eq!(inst.capacity, 2);
        assert_eq!(inst.tool_costs, vec![1, 2, 3]);
        assert_eq!(inst.jobs[1], BTreeSet::from([2, 3]));
        // duplicates are removed
        assert_eq!(inst.jobs[2], BTreeSet::from([1]));
        assert_eq!(inst.cost(3), 3);
        assert_eq!(inst.max_tool_cost(), 3);
        assert!(inst.check_feasible().is_ok());
    }

    #[test]
    fn display_parses_back() {
        let inst: ProblemInstance = EXAMPLE.parse().unwrap();
        let text = inst.to_string();
        assert!(text.starts_with("3 4 2\nCOST 1 2 3\nJOBS 4\n1 1\n2 2 3\n"));
        assert_eq!(text.parse::<ProblemInstance>().unwrap(), inst);
    }

    #[test]
    fn requests_and_occurrences() {
        let inst = ProblemInstance::new(2, vec![1, 1, 1], vec![vec![3, 1], vec![2], vec![1]]).unwrap();
        let reqs = inst.requests();
        assert_eq!(
            reqs,
            vec![
                Request { job: 0, tool: 1 },
                Request { job: 0, tool: 3 },
                Request { job: 1, tool: 2 },
                Request { job: 2, tool: 1 },
            ]
        );
        let occ = inst.occurrences();
        assert_eq!(occ[1], vec![0, 2]);
        assert_eq!(occ[2], vec![1]);
        assert_eq!(occ[3], vec![0]);
    }

    #[test]
    fn malformed_input_is_rejected() {
        let cases = [
            ("", 0),
            ("3 4\n", 1),
            ("1 1 1\nCOST 1 2\n", 2),
            ("1 1 1\nCOSTS 1\n", 2),
            ("1 1 1\nCOST x\n", 2),
            ("1 1 1\nCOST 1\nJOBS 2\n", 3),
            ("1 1 1\nCOST 1\nJOBS 1\n2 1\n", 4),
            ("1 2 1\nCOST 1\nJOBS 2\n1 1\n", 4),
        ];
        for (text, line) in cases {
            match text.parse::<ProblemInstance>() {
                Err(InstanceError::Parse { line: l, .. }) => assert_eq!(l, line, "{:?}", text),
                other => panic!("{:?} parsed into {:?}", text, other),
            }
        }
    }

    #[test]
    fn tool_out_of_range_is_rejected() {
        let r = "2 1 2\nCOST 1 1\nJOBS 1\n2 1 3\n".parse::<ProblemInstance>();
        assert!(matches!(
            r,
            Err(InstanceError::ToolOutOfRange { job: 0, tool: 3, tool_count: 2 })
        ));
        let r = ProblemInstance::new(1, vec![1], vec![vec![0]]);
        assert!(matches!(r, Err(InstanceError::ToolOutOfRange { tool: 0, .. })));
    }

    #[test]
    fn negative_cost_is_rejected() {
        let r = ProblemInstance::new(1, vec![1, -2], vec![]);
        assert!(matches!(r, Err(InstanceError::NegativeCost { tool: 2, cost: -2 })));
    }

    #[test]
    fn oversized_job_is_infeasible() {
        let inst = ProblemInstance::new(2, vec![1, 1, 1], vec![vec![1], vec![1, 2, 3]]).unwrap();
        assert!(matches!(
            inst.check_feasible(),
            Err(InstanceError::Infeasible { job: 1, required: 3, capacity: 2 })
        ));
    }

    #[test]
    fn missing_file() {
        let r = ProblemInstance::load_from_file("/nonexistent/instance.txt");
        assert!(matches!(r, Err(InstanceError::Io { .. })));
    }

    #[test]
    fn random_instances_are_feasible() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let inst = ProblemInstance::random(&mut rng, 6, 8, 3, 1..=5);
            assert_eq!(inst.job_count, 8);
            assert!(inst.check_feasible().is_ok());
            assert!(inst.jobs.iter().all(|j| !j.is_empty() && j.len() <= 3));
            assert!(inst.tool_costs.iter().all(|&c| (1..=5).contains(&c)));
            assert!(inst.jobs.iter().flatten().all(|&t| (1..=6).contains(&t)));
        }
    }
}
