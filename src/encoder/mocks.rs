//! mock instances and an exhaustive reference solver for the encoder tests
use crate::instance::ProblemInstance;
use crate::min_flow::{Cost, ToolId};
use std::collections::{BTreeSet, HashMap};

/// 3 tools of unit cost, capacity 2, jobs `{1},{2},{1},{2}`
pub fn mock_alternating_instance() -> ProblemInstance {
    ProblemInstance::new(2, vec![1, 1, 1], vec![vec![1], vec![2], vec![1], vec![2]]).unwrap()
}

/// every job requires all tools and the magazine holds exactly all of them
pub fn mock_full_magazine_instance() -> ProblemInstance {
    let all = vec![1, 2, 3];
    ProblemInstance::new(3, vec![2, 3, 5], vec![all.clone(), all.clone(), all]).unwrap()
}

/// the expensive tool 1 should survive the eviction in job 2
pub fn mock_eviction_instance() -> ProblemInstance {
    ProblemInstance::new(
        2,
        vec![10, 1, 1],
        vec![vec![1, 2], vec![3], vec![1], vec![2]],
    )
    .unwrap()
}

///
/// Minimum insertion cost by dynamic programming over all magazine contents.
/// Only usable for a handful of tools.
///
pub fn brute_force_cost(instance: &ProblemInstance) -> Cost {
    let m = instance.tool_count;
    let mask_of = |tools: &BTreeSet<ToolId>| tools.iter().fold(0usize, |acc, &t| acc | 1 << (t - 1));
    let insertion = |from: usize, to: usize| -> Cost {
        (0..m)
            .filter(|&i| (to & !from & (1 << i)) != 0)
            .map(|i| instance.tool_costs[i])
            .sum()
    };
    let states: Vec<usize> = (0..1usize << m)
        .filter(|s| s.count_ones() <= instance.capacity)
        .collect();

    let mut best: HashMap<usize, Cost> = HashMap::from([(0, 0)]);
    for job in &instance.jobs {
        let need = mask_of(job);
        let mut next = HashMap::new();
        for &s in states.iter().filter(|&&s| s & need == need) {
            let c = best
                .iter()
                .map(|(&prev, &prev_cost)| prev_cost + insertion(prev, s))
                .min()
                .unwrap();
            next.insert(s, c);
        }
        best = next;
    }
    best.values().copied().min().unwrap_or(0)
}

#[test]
fn brute_force_on_mocks() {
    assert_eq!(brute_force_cost(&mock_alternating_instance()), 2);
    assert_eq!(brute_force_cost(&mock_full_magazine_instance()), 10);
    assert_eq!(brute_force_cost(&mock_eviction_instance()), 13);
}
