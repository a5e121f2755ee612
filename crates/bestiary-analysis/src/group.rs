//! Grouped metric aggregation for the bar chart.

use std::collections::BTreeMap;

use bestiary_data::{field::Dimension, monster::Monster};

use crate::metric::Metric;

/// Maximum number of bars shown, except for the size dimension.
pub const MAX_GROUPS: usize = 18;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GroupAggregate {
    pub key: String,
    pub value: f64,
}

/// Buckets monsters by their key for `dimension`, ordered by key.
///
/// Monsters without a key (environment only) are left out entirely.
pub(crate) fn group_by<'a>(
    subset: &[&'a Monster],
    dimension: Dimension,
) -> BTreeMap<&'a str, Vec<&'a Monster>> {
    let mut groups = BTreeMap::<_, Vec<_>>::new();
    for &monster in subset {
        if let Some(key) = dimension.key_of(monster) {
            groups.entry(key).or_default().push(monster);
        }
    }
    groups
}

/// Aggregates `metric` per group, sorted by value descending.
///
/// Groups whose metric is undefined are dropped. Equal values keep key order.
/// At most [`MAX_GROUPS`] groups are returned unless grouping by size.
#[must_use]
pub fn aggregate(
    subset: &[&Monster],
    dimension: Dimension,
    metric: Metric,
) -> Vec<GroupAggregate> {
    let mut aggregates = group_by(subset, dimension)
        .into_iter()
        .filter_map(|(key, members)| {
            let value = metric.compute(&members)?;
            Some(GroupAggregate {
                key: key.to_owned(),
                value,
            })
        })
        .collect::<Vec<_>>();
    aggregates.sort_by(|a, b| b.value.total_cmp(&a.value));
    if !dimension.is_size() {
        aggregates.truncate(MAX_GROUPS);
    }
    aggregates
}
