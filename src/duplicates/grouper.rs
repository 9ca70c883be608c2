use super::model::FileDescriptor;

/// Quantized size-range key: files whose sizes land in the same bucket of
/// width `size * tolerance / 100` share a key. Tolerance 0 degenerates to
/// exact-size equality. The bucket width floors at 1 byte so tiny files
/// never divide by zero.
///
/// Bucketing is coarser than true pairwise tolerance — two sizes one
/// tolerance unit apart can straddle a bucket boundary, and everything in
/// a bucket matches regardless of pairwise distance. Coarse groups are
/// refined through [`group_by_size`] before they become clusters.
pub fn size_range_key(size: u64, tolerance: f64) -> u64 {
    if tolerance <= 0.0 {
        return size;
    }
    let range = ((size as f64 * tolerance) / 100.0).floor() as u64;
    let range = range.max(1);
    (size / range) * range
}

/// True when `b` is within `tolerance` percent of `a` (asymmetric:
/// the allowance is computed from `a`, the group's seed file).
pub fn within_tolerance(a: u64, b: u64, tolerance: f64) -> bool {
    if tolerance <= 0.0 {
        return a == b;
    }
    a.abs_diff(b) as f64 <= (a as f64 * tolerance) / 100.0
}

/// Greedy pairwise size clustering: each not-yet-assigned file seeds a
/// group and absorbs every later unassigned file within tolerance of the
/// seed. Only groups with ≥2 members are emitted; insertion order inside
/// a group is the input order.
///
/// Not transitive — a chain of near-equal sizes merges only as far as the
/// seed's own tolerance reaches, so an outlier chained through middlemen
/// stays out of the seed's group and seeds its own.
pub fn group_by_size(files: &[FileDescriptor], tolerance: f64) -> Vec<Vec<FileDescriptor>> {
    let mut assigned = vec![false; files.len()];
    let mut groups = Vec::new();

    for i in 0..files.len() {
        if assigned[i] {
            continue;
        }

        let mut members = vec![files[i].clone()];
        for j in (i + 1)..files.len() {
            if assigned[j] {
                continue;
            }
            if within_tolerance(files[i].size, files[j].size, tolerance) {
                members.push(files[j].clone());
                assigned[j] = true;
            }
        }

        if members.len() > 1 {
            assigned[i] = true;
            groups.push(members);
        }
    }

    groups
}
