use std::collections::HashSet;

use super::finder::GroupTable;
use super::model::{DetectionMethod, DuplicateCluster, FileDescriptor};

/// Intersect the per-method groupings to find files that match on EVERY
/// requested method simultaneously.
///
/// The first method's groups seed the candidate sets; each method then
/// filters a candidate set down to files that still share a group with at
/// least one other surviving candidate under that method. Any method with
/// no common files short-circuits the set to empty. Set intersection is
/// commutative, so method order never changes the result.
///
/// With exactly one non-combined method this degenerates to that method's
/// own clusters. Output is always a subset (by path) of every individual
/// method's output.
pub fn intersect(tables: &[(DetectionMethod, GroupTable)]) -> Vec<DuplicateCluster> {
    let Some((_, seed_table)) = tables.first() else {
        return Vec::new();
    };
    let criteria: Vec<DetectionMethod> = tables.iter().map(|(m, _)| *m).collect();

    let mut clusters = Vec::new();
    let mut emitted: HashSet<Vec<String>> = HashSet::new();

    for (_key, seed_group) in seed_table.iter() {
        if seed_group.len() < 2 {
            continue;
        }

        let survivors = refine(seed_group, tables);
        if survivors.len() < 2 {
            continue;
        }

        // Two seed groups can refine to the same file set; report it once
        let mut signature: Vec<String> = survivors.iter().map(|f| f.path.clone()).collect();
        signature.sort();
        if !emitted.insert(signature) {
            continue;
        }

        clusters.push(DuplicateCluster {
            files: survivors,
            match_type: DetectionMethod::Combined,
            matched_criteria: Some(criteria.clone()),
        });
    }

    clusters
}

/// Filter one candidate set through every method's grouping
fn refine(seed: &[FileDescriptor], tables: &[(DetectionMethod, GroupTable)]) -> Vec<FileDescriptor> {
    let mut matched: Vec<FileDescriptor> = seed.to_vec();

    for (_method, table) in tables {
        let matched_paths: HashSet<&str> = matched.iter().map(|f| f.path.as_str()).collect();

        // A file survives this method only if some group of the method
        // contains it together with another current candidate.
        let mut common: HashSet<String> = HashSet::new();
        for (_key, group) in table.iter() {
            let present: Vec<&FileDescriptor> = group
                .iter()
                .filter(|f| matched_paths.contains(f.path.as_str()))
                .collect();
            if present.len() > 1 {
                common.extend(present.iter().map(|f| f.path.clone()));
            }
        }

        if common.is_empty() {
            return Vec::new();
        }
        matched.retain(|f| common.contains(&f.path));
    }

    matched
}
