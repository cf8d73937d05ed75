use crate::classifier::StateClassifier;
use crate::models::{Dataset, EnrichedRecord};
use std::collections::HashMap;
use thiserror::Error;

/// The dataset is missing a required column. Detected once for the whole
/// batch, before any record is classified.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("dataset has no '{0}' column")]
pub struct SchemaError(pub String);

/// Enriches every record with its derived state and college name.
/// Output order matches input order; classification of one record never
/// looks at another.
pub fn process(
    dataset: &Dataset,
    classifier: &StateClassifier,
    college_column: &str,
) -> Result<Vec<EnrichedRecord>, SchemaError> {
    let college_index = dataset
        .column_index(college_column)
        .ok_or_else(|| SchemaError(college_column.to_string()))?;

    let enriched = dataset
        .records
        .iter()
        .map(|record| {
            let raw_value = record.value(college_index);
            let state = classifier.classify(raw_value);
            let college_name = classifier.extract_college_name(raw_value, &state);
            EnrichedRecord {
                raw: record.clone(),
                state,
                college_name,
            }
        })
        .collect();

    Ok(enriched)
}

/// Presentation-facing ordering for count tables. Neither is a storage
/// invariant; the caller picks per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOrder {
    /// Label ascending — the canonical listing.
    ByLabel,
    /// Count descending, label ascending on ties — ranking displays.
    ByCountDesc,
}

/// Student count per state across the whole enriched set.
pub fn state_counts(records: &[EnrichedRecord], order: CountOrder) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.state.as_str()).or_insert(0) += 1;
    }

    let mut table: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(state, count)| (state.to_string(), count))
        .collect();

    match order {
        CountOrder::ByLabel => table.sort_by(|a, b| a.0.cmp(&b.0)),
        CountOrder::ByCountDesc => {
            table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        }
    }

    table
}

/// Student count per college, scoped to one state. Records without an
/// extracted name, or whose name trims to nothing, are left out.
pub fn college_counts(records: &[EnrichedRecord], target_state: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        if record.state != target_state {
            continue;
        }
        match record.college_name.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                *counts.entry(name).or_insert(0) += 1;
            }
            _ => {}
        }
    }

    let mut table: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    table.sort_by(|a, b| a.0.cmp(&b.0));
    table
}

/// Top `n` entries by count descending, name ascending on ties.
pub fn top_n(counts: &[(String, usize)], n: usize) -> Vec<(String, usize)> {
    let mut ranked = counts.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Every state that appears at least once, sorted. Drives the filter
/// options offered downstream.
pub fn distinct_states(records: &[EnrichedRecord]) -> Vec<String> {
    let mut states: Vec<String> = records.iter().map(|r| r.state.clone()).collect();
    states.sort();
    states.dedup();
    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Config, RawRecord, StateRegistry};

    fn dataset(college_values: &[Option<&str>]) -> Dataset {
        Dataset {
            headers: vec!["email".to_string(), "college".to_string()],
            records: college_values
                .iter()
                .enumerate()
                .map(|(i, value)| RawRecord {
                    values: vec![
                        Some(format!("student{}@example.com", i)),
                        value.map(str::to_string),
                    ],
                })
                .collect(),
        }
    }

    fn enrich(college_values: &[Option<&str>]) -> Vec<EnrichedRecord> {
        let config = Config::default();
        let registry = StateRegistry::from_config(&config);
        let classifier = StateClassifier::new(&registry, &config.code_format_state);
        process(&dataset(college_values), &classifier, "college").unwrap()
    }

    #[test]
    fn missing_college_column_is_a_schema_error() {
        let config = Config::default();
        let registry = StateRegistry::from_config(&config);
        let classifier = StateClassifier::new(&registry, &config.code_format_state);
        let dataset = Dataset {
            headers: vec!["email".to_string()],
            records: vec![RawRecord {
                values: vec![Some("a@example.com".to_string())],
            }],
        };
        let err = process(&dataset, &classifier, "college").unwrap_err();
        assert_eq!(err, SchemaError("college".to_string()));
    }

    #[test]
    fn output_preserves_length_and_order() {
        let values = [Some("Karnataka"), None, Some("VJIT - A"), Some("Kerala")];
        let enriched = enrich(&values);
        assert_eq!(enriched.len(), values.len());
        assert_eq!(enriched[0].state, "Karnataka");
        assert_eq!(enriched[1].state, "Unknown");
        assert_eq!(enriched[2].state, "Telangana");
        assert_eq!(enriched[3].state, "Kerala");

        assert!(enrich(&[]).is_empty());
    }

    #[test]
    fn state_counts_sum_to_total_and_order_per_view() {
        let enriched = enrich(&[
            Some("Karnataka"),
            Some("Karnataka"),
            Some("Kerala"),
            Some("garbage"),
        ]);

        let by_label = state_counts(&enriched, CountOrder::ByLabel);
        let total: usize = by_label.iter().map(|(_, c)| c).sum();
        assert_eq!(total, enriched.len());
        assert_eq!(
            by_label,
            vec![
                ("Karnataka".to_string(), 2),
                ("Kerala".to_string(), 1),
                ("Unknown".to_string(), 1),
            ]
        );

        let by_count = state_counts(&enriched, CountOrder::ByCountDesc);
        assert_eq!(by_count[0], ("Karnataka".to_string(), 2));
        // Ties fall back to label order.
        assert_eq!(by_count[1].0, "Kerala");
        assert_eq!(by_count[2].0, "Unknown");
    }

    #[test]
    fn college_counts_are_scoped_and_skip_blank_names() {
        let enriched = enrich(&[
            Some("VJIT - ABC College"),
            Some("VJIT - ABC College"),
            Some("XYZ - Another College"),
            Some("CODE -"),
            Some("Karnataka"),
        ]);
        let counts = college_counts(&enriched, "Telangana");
        assert_eq!(
            counts,
            vec![
                ("ABC College".to_string(), 2),
                ("Another College".to_string(), 1),
            ]
        );
        assert!(college_counts(&enriched, "Karnataka").is_empty());
    }

    #[test]
    fn top_n_ranks_by_count_then_name() {
        let counts = vec![
            ("B College".to_string(), 2),
            ("A College".to_string(), 2),
            ("C College".to_string(), 5),
            ("D College".to_string(), 1),
        ];
        let ranked = top_n(&counts, 3);
        assert_eq!(
            ranked,
            vec![
                ("C College".to_string(), 5),
                ("A College".to_string(), 2),
                ("B College".to_string(), 2),
            ]
        );
        assert_eq!(top_n(&counts, 10).len(), 4);
    }

    #[test]
    fn distinct_states_lists_each_once_sorted() {
        let enriched = enrich(&[
            Some("Kerala"),
            Some("Karnataka"),
            Some("Kerala"),
            Some("VJIT - ABC"),
        ]);
        assert_eq!(
            distinct_states(&enriched),
            vec![
                "Karnataka".to_string(),
                "Kerala".to_string(),
                "Telangana".to_string(),
            ]
        );
    }

    #[test]
    fn end_to_end_classification_and_aggregation() {
        let enriched = enrich(&[
            Some("Karnataka"),
            Some("VJIT - ABC College"),
            Some("Overseas"),
            Some(""),
            Some("XYZ"),
        ]);

        let states: Vec<&str> = enriched.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(
            states,
            vec!["Karnataka", "Telangana", "Foreign", "Unknown", "Unknown"]
        );

        assert_eq!(
            state_counts(&enriched, CountOrder::ByLabel),
            vec![
                ("Foreign".to_string(), 1),
                ("Karnataka".to_string(), 1),
                ("Telangana".to_string(), 1),
                ("Unknown".to_string(), 2),
            ]
        );

        assert_eq!(
            college_counts(&enriched, "Telangana"),
            vec![("ABC College".to_string(), 1)]
        );
    }
}
