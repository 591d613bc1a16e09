//! Group-by helpers used by the reporters.

use std::collections::HashMap;
use std::hash::Hash;

/// 各值出現次數，依次數遞減排序，次數相同時依值遞增
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut counts: Vec<(T, usize)> = counts.into_iter().collect();
    counts.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));
    counts
}

/// 眾數與其出現次數；平手時取最小值
pub fn mode<T, I>(values: I) -> Option<(T, usize)>
where
    T: Ord + Hash,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next()
}

/// 依標籤查詢次數，不存在時為 0
pub fn count_of<T: PartialEq<str>>(counts: &[(T, usize)], label: &str) -> usize {
    counts
        .iter()
        .find(|(value, _)| value == label)
        .map(|(_, count)| *count)
        .unwrap_or(0)
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(sum(values) / values.len() as f64)
    }
}
