//! Plain lexicographic k-combination enumeration, used to expand a
//! failure set into every admissible simultaneous-failure group.

/// All k-element combinations of `items`, in lexicographic index order.
/// Empty for `k == 0` or `k > items.len()`.
pub fn k_combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k == 0 || k > n {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    loop {
        out.push(indices.iter().map(|&i| items[i].clone()).collect());
        let advanced = loop {
            let Some(i) = (0..k).rev().find(|&i| indices[i] < i + n - k) else {
                break false;
            };
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            break true;
        };
        if !advanced {
            return out;
        }
    }
}
