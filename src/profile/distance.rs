//! Distances between frequency profiles
//!
//! Lower is more similar for both metrics.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::FrequencyProfile;

/// Probability substituted for symbols absent from the reference profile
pub const KL_FLOOR: f64 = 1e-10;

/// Dissimilarity measure between a query profile and a reference profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// L1 distance over the union of symbols (symmetric)
    Manhattan,
    /// Kullback-Leibler divergence of the query from the reference (asymmetric)
    KullbackLeibler,
}

impl DistanceMetric {
    pub fn distance(&self, query: &FrequencyProfile, reference: &FrequencyProfile) -> f64 {
        match self {
            DistanceMetric::Manhattan => manhattan(query, reference),
            DistanceMetric::KullbackLeibler => kullback_leibler(query, reference),
        }
    }
}

/// Sum of `|a[k] - b[k]|` over the union of keys, missing keys counting as 0.
///
/// Keys are visited in sorted order so that `manhattan(a, b)` and
/// `manhattan(b, a)` accumulate identical terms in identical order.
pub fn manhattan(a: &FrequencyProfile, b: &FrequencyProfile) -> f64 {
    let keys: BTreeSet<&str> = a.symbols().chain(b.symbols()).collect();
    keys.into_iter()
        .map(|k| (a.frequency(k) - b.frequency(k)).abs())
        .sum()
}

/// `sum q[k] * ln(q[k] / r[k])` over the query's keys.
///
/// Reference frequencies that are missing or not positive are replaced by
/// [`KL_FLOOR`]. An empty query yields 0.
pub fn kullback_leibler(query: &FrequencyProfile, reference: &FrequencyProfile) -> f64 {
    query
        .iter()
        .filter(|(_, q)| *q > 0.0)
        .map(|(k, q)| {
            let r = match reference.get(k) {
                Some(r) if r > 0.0 => r,
                _ => KL_FLOOR,
            };
            q * (q / r).ln()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(entries: &[(&str, f64)]) -> FrequencyProfile {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_manhattan_identical_is_zero() {
        let a = profile(&[("a", 0.5), ("b", 0.5)]);
        let b = profile(&[("a", 0.5), ("b", 0.5)]);
        assert_eq!(manhattan(&a, &b), 0.0);
    }

    #[test]
    fn test_manhattan_disjoint_is_two() {
        let a = profile(&[("a", 1.0)]);
        let b = profile(&[("b", 1.0)]);
        assert!((manhattan(&a, &b) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_manhattan_symmetric() {
        let a = profile(&[("a", 0.3), ("b", 0.6), ("c", 0.1)]);
        let b = profile(&[("b", 0.2), ("d", 0.7), ("a", 0.1)]);
        assert_eq!(manhattan(&a, &b), manhattan(&b, &a));
        assert!((manhattan(&a, &b) - (0.2 + 0.4 + 0.1 + 0.7)).abs() < 1e-12);
    }

    #[test]
    fn test_kl_identical_is_zero() {
        let a = profile(&[("ab", 0.25), ("bc", 0.75)]);
        assert!(kullback_leibler(&a, &a).abs() < 1e-12);
    }

    #[test]
    fn test_kl_is_asymmetric() {
        let a = profile(&[("a", 0.9), ("b", 0.1)]);
        let b = profile(&[("a", 0.5), ("b", 0.5)]);

        let ab = kullback_leibler(&a, &b);
        let ba = kullback_leibler(&b, &a);

        assert!((ab - (0.9 * 1.8f64.ln() + 0.1 * 0.2f64.ln())).abs() < 1e-12);
        assert!((ab - ba).abs() > 0.1);
    }

    #[test]
    fn test_kl_only_query_keys_contribute() {
        let query = profile(&[("a", 1.0)]);
        let reference = profile(&[("a", 0.5), ("b", 0.5)]);
        assert!((kullback_leibler(&query, &reference) - 2.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_kl_missing_reference_key_uses_floor() {
        let query = profile(&[("zz", 1.0)]);
        let reference = profile(&[("aa", 1.0)]);
        let d = kullback_leibler(&query, &reference);
        assert!(d.is_finite());
        assert!((d - (1.0 / KL_FLOOR).ln()).abs() < 1e-9);

        let zero_reference = profile(&[("zz", 0.0)]);
        assert_eq!(kullback_leibler(&query, &zero_reference), d);
    }

    #[test]
    fn test_empty_profiles_do_not_fail() {
        let empty = FrequencyProfile::default();
        let b = profile(&[("a", 1.0)]);

        assert_eq!(kullback_leibler(&empty, &b), 0.0);
        assert!((manhattan(&empty, &b) - 1.0).abs() < 1e-12);
        assert_eq!(DistanceMetric::Manhattan.distance(&empty, &empty), 0.0);
    }
}
