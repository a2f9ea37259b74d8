//! Reduce a neighbor set to one value per field
//!
//! Numeric fields take the plain arithmetic mean; categorical fields take the
//! most frequent value. Either every requested field is produced or the call
//! fails, so callers never see a partial prediction.

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::field::{FieldKind, FieldSchema, FieldValue, FieldValues, SoilField};
use crate::sample::SoilSample;

/// Aggregate `fields` across `neighbors` using the kinds declared in `schema`
///
/// Neighbor order matters only for categorical ties: the value whose first
/// occurrence comes earliest wins.
pub fn aggregate(
    neighbors: &[&SoilSample],
    fields: &[SoilField],
    schema: &FieldSchema,
) -> Result<FieldValues> {
    if neighbors.is_empty() {
        return Err(Error::EmptyNeighborSet);
    }

    let mut values = FieldValues::new();
    for &field in fields {
        let value = match schema.kind_of(field) {
            FieldKind::Numeric => FieldValue::Number(mean(neighbors, field)?),
            FieldKind::Categorical => mode(neighbors, field),
        };
        values.insert(field, value);
    }
    Ok(values)
}

/// Arithmetic mean, clamped to the neighbors' own range
///
/// Rounding in the running sum can otherwise push the result one ulp past
/// the largest (or smallest) contributing value.
fn mean(neighbors: &[&SoilSample], field: SoilField) -> Result<f64> {
    let mut sum = 0.0;
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for sample in neighbors {
        let value = sample.numeric(field).ok_or(Error::FieldTypeMismatch {
            field,
            expected: FieldKind::Numeric,
        })?;
        sum += value;
        lo = lo.min(value);
        hi = hi.max(value);
    }
    Ok((sum / neighbors.len() as f64).clamp(lo, hi))
}

#[derive(PartialEq, Eq, Hash)]
enum VoteKey<'a> {
    Text(&'a str),
    Bits(u64),
}

fn vote_key(sample: &SoilSample, field: SoilField) -> VoteKey<'_> {
    match sample.numeric(field) {
        // +0.0 and -0.0 vote together
        Some(n) => VoteKey::Bits((n + 0.0).to_bits()),
        None => VoteKey::Text(&sample.region),
    }
}

fn mode(neighbors: &[&SoilSample], field: SoilField) -> FieldValue {
    // index into `tallies`, which keeps first-seen order
    let mut slots: AHashMap<VoteKey<'_>, usize> = AHashMap::with_capacity(neighbors.len());
    let mut tallies: Vec<(&SoilSample, usize)> = Vec::with_capacity(neighbors.len());

    for &sample in neighbors {
        let slot = *slots.entry(vote_key(sample, field)).or_insert_with(|| {
            tallies.push((sample, 0));
            tallies.len() - 1
        });
        tallies[slot].1 += 1;
    }

    let mut best = 0;
    for (i, (_, count)) in tallies.iter().enumerate() {
        if *count > tallies[best].1 {
            best = i;
        }
    }
    tallies[best].0.value(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::GeoPoint;

    fn sample(ph: f64, n: f64, region: &str) -> SoilSample {
        SoilSample::new(GeoPoint::new(0.0, 0.0), ph, n, 1.0, 2.0, region)
    }

    #[test]
    fn test_numeric_mean() {
        let a = sample(6.0, 5.0, "Siaya");
        let b = sample(6.0, 29.0, "Kakamega");
        let values = aggregate(&[&a, &b], &SoilField::ALL, &FieldSchema::default()).unwrap();

        assert_eq!(values.number(SoilField::Ph).unwrap(), 6.0);
        assert_eq!(values.number(SoilField::Nitrogen).unwrap(), 17.0);
        assert_eq!(values.len(), 5);
    }

    #[test]
    fn test_mean_of_identical_values_is_exact() {
        let a = sample(0.1, 0.1, "x");
        let b = sample(0.1, 0.1, "x");
        let c = sample(0.1, 0.1, "x");
        let values = aggregate(&[&a, &b, &c], &[SoilField::Ph, SoilField::Nitrogen], &FieldSchema::default()).unwrap();

        // 0.1 + 0.1 + 0.1 = 0.30000000000000004 before dividing
        assert_eq!(values.number(SoilField::Ph).unwrap(), 0.1);
        assert_eq!(values.number(SoilField::Nitrogen).unwrap(), 0.1);
    }

    #[test]
    fn test_categorical_majority() {
        let a = sample(6.0, 1.0, "Kakamega");
        let b = sample(6.0, 1.0, "Siaya");
        let c = sample(6.0, 1.0, "Siaya");
        let values = aggregate(&[&a, &b, &c], &[SoilField::Region], &FieldSchema::default()).unwrap();
        assert_eq!(values.category(SoilField::Region).unwrap(), "Siaya");
    }

    #[test]
    fn test_categorical_tie_first_seen_wins() {
        let a = sample(6.0, 1.0, "Kakamega");
        let b = sample(6.0, 1.0, "Siaya");
        let c = sample(6.0, 1.0, "Siaya");
        let d = sample(6.0, 1.0, "Kakamega");
        let values =
            aggregate(&[&a, &b, &c, &d], &[SoilField::Region], &FieldSchema::default()).unwrap();
        assert_eq!(values.category(SoilField::Region).unwrap(), "Kakamega");
    }

    #[test]
    fn test_numeric_declared_categorical() {
        let schema = FieldSchema::default().with_kind(SoilField::Ph, FieldKind::Categorical);
        let a = sample(5.5, 1.0, "x");
        let b = sample(6.0, 1.0, "x");
        let c = sample(6.0, 1.0, "x");
        let values = aggregate(&[&a, &b, &c], &[SoilField::Ph], &schema).unwrap();
        assert_eq!(values.number(SoilField::Ph).unwrap(), 6.0);
    }

    #[test]
    fn test_region_declared_numeric_fails() {
        let schema = FieldSchema::default().with_kind(SoilField::Region, FieldKind::Numeric);
        let a = sample(6.0, 1.0, "x");
        let result = aggregate(&[&a], &SoilField::ALL, &schema);
        assert!(matches!(
            result,
            Err(Error::FieldTypeMismatch { field: SoilField::Region, expected: FieldKind::Numeric })
        ));
    }

    #[test]
    fn test_empty_neighbors() {
        let result = aggregate(&[], &SoilField::ALL, &FieldSchema::default());
        assert!(matches!(result, Err(Error::EmptyNeighborSet)));
    }

    #[test]
    fn test_only_requested_fields() {
        let a = sample(6.0, 1.0, "x");
        let values = aggregate(&[&a], &[SoilField::Ph], &FieldSchema::default()).unwrap();
        assert_eq!(values.len(), 1);
        assert!(values.get(SoilField::Region).is_none());
    }
}
