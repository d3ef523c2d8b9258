use crate::models::{CatchRecord, ChartResponse};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Species,
    Timeline,
    AvgWeight,
    AvgLength,
    Bait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartStyle {
    Bar,
    Line,
    Pie,
    HorizontalBar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Species,
        ChartKind::Timeline,
        ChartKind::AvgWeight,
        ChartKind::AvgLength,
        ChartKind::Bait,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Species => "species",
            ChartKind::Timeline => "timeline",
            ChartKind::AvgWeight => "avg-weight",
            ChartKind::AvgLength => "avg-length",
            ChartKind::Bait => "bait",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Species => "Number of Fish Caught",
            ChartKind::Timeline => "Catches Over Time",
            ChartKind::AvgWeight => "Average Weight (lbs)",
            ChartKind::AvgLength => "Average Length (in)",
            ChartKind::Bait => "Bait Usage",
        }
    }

    pub fn style(self) -> ChartStyle {
        match self {
            ChartKind::Species | ChartKind::AvgWeight => ChartStyle::Bar,
            ChartKind::Timeline => ChartStyle::Line,
            ChartKind::AvgLength => ChartStyle::HorizontalBar,
            ChartKind::Bait => ChartStyle::Pie,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartStyle::Bar => "bar",
            ChartStyle::Line => "line",
            ChartStyle::Pie => "pie",
            ChartStyle::HorizontalBar => "horizontal-bar",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown chart '{0}'")]
pub struct UnknownChart(pub String);

impl FromStr for ChartKind {
    type Err = UnknownChart;

    /// Accepts the slugs as well as the old chart selector ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "species" | "fishChart" => Ok(ChartKind::Species),
            "timeline" | "timeChart" => Ok(ChartKind::Timeline),
            "avg-weight" | "avgWeightChart" => Ok(ChartKind::AvgWeight),
            "avg-length" | "avgLengthChart" => Ok(ChartKind::AvgLength),
            "bait" | "baitChart" => Ok(ChartKind::Bait),
            other => Err(UnknownChart(other.to_string())),
        }
    }
}

/// Parallel label/value columns ready for a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|idx| self.values[idx])
    }

    pub fn into_response(self, kind: ChartKind) -> ChartResponse {
        ChartResponse {
            kind: kind.slug().to_string(),
            title: kind.title().to_string(),
            style: kind.style().to_string(),
            labels: self.labels,
            values: self.values,
        }
    }
}

pub fn build_series(kind: ChartKind, records: &[CatchRecord]) -> ChartSeries {
    match kind {
        ChartKind::Species => species_counts(records),
        ChartKind::Timeline => catches_over_time(records),
        ChartKind::AvgWeight => average_by_species(records, |r| r.weight_lbs),
        ChartKind::AvgLength => average_by_species(records, |r| r.length_in),
        ChartKind::Bait => bait_usage(records),
    }
}

pub fn species_counts(records: &[CatchRecord]) -> ChartSeries {
    let mut groups = Grouped::default();
    for record in records {
        groups.add(label_or_unknown(&record.species), 1.0);
    }
    groups.totals()
}

pub fn catches_over_time(records: &[CatchRecord]) -> ChartSeries {
    let mut by_date: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *by_date.entry(label_or_unknown(&record.date)).or_default() += 1;
    }

    ChartSeries {
        labels: by_date.keys().map(|date| date.to_string()).collect(),
        values: by_date.values().map(|&count| count as f64).collect(),
    }
}

pub fn bait_usage(records: &[CatchRecord]) -> ChartSeries {
    let mut groups = Grouped::default();
    for record in records {
        groups.add(label_or_unknown(record.bait.as_deref().unwrap_or_default()), 1.0);
    }
    groups.totals()
}

/// Mean of `measure` per species, over records that have both a species and a
/// non-zero measurement.
pub fn average_by_species(
    records: &[CatchRecord],
    measure: impl Fn(&CatchRecord) -> Option<f64>,
) -> ChartSeries {
    let mut groups = Grouped::default();
    for record in records {
        let species = record.species.trim();
        if species.is_empty() {
            continue;
        }
        let Some(value) = measure(record).filter(|v| v.is_finite() && *v != 0.0) else {
            continue;
        };
        groups.add(species, value);
    }
    groups.means()
}

fn label_or_unknown(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { UNKNOWN } else { value }
}

/// Sum and count per key, remembering the order keys were first seen.
#[derive(Default)]
struct Grouped<'a> {
    index: HashMap<&'a str, usize>,
    keys: Vec<&'a str>,
    sums: Vec<f64>,
    counts: Vec<u64>,
}

impl<'a> Grouped<'a> {
    fn add(&mut self, key: &'a str, value: f64) {
        let idx = *self.index.entry(key).or_insert_with(|| {
            self.keys.push(key);
            self.sums.push(0.0);
            self.counts.push(0);
            self.keys.len() - 1
        });
        self.sums[idx] += value;
        self.counts[idx] += 1;
    }

    fn totals(self) -> ChartSeries {
        ChartSeries {
            labels: self.keys.iter().map(|k| k.to_string()).collect(),
            values: self.sums,
        }
    }

    fn means(self) -> ChartSeries {
        ChartSeries {
            labels: self.keys.iter().map(|k| k.to_string()).collect(),
            values: self
                .sums
                .iter()
                .zip(&self.counts)
                .map(|(sum, &count)| sum / count as f64)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    fn scenario() -> Vec<CatchRecord> {
        serde_json::from_str(
            r#"[
                {"id":1,"species":"Bass","weight_lbs":"2.5"},
                {"id":2,"species":"Bass","weight_lbs":"3.5"},
                {"id":3,"species":"Trout","weight_lbs":null}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn species_count_keeps_first_seen_order() {
        let series = build_series(ChartKind::Species, &scenario());
        assert_eq!(series.labels, vec!["Bass", "Trout"]);
        assert_eq!(series.values, vec![2.0, 1.0]);
    }

    #[test]
    fn average_weight_skips_species_without_weights() {
        let series = build_series(ChartKind::AvgWeight, &scenario());
        assert_eq!(series.labels, vec!["Bass"]);
        assert_eq!(series.get("Bass"), Some(3.0));
        assert_eq!(series.get("Trout"), None);
    }

    #[test]
    fn single_record_average_is_exact() {
        let mut pike = record(1, "2024-05-01", "09:00", "Pike");
        pike.weight_lbs = Some(10.0);
        pike.length_in = Some(30.0);
        let rows = vec![pike];
        assert_eq!(build_series(ChartKind::AvgWeight, &rows).get("Pike"), Some(10.0));
        assert_eq!(build_series(ChartKind::AvgLength, &rows).get("Pike"), Some(30.0));
    }

    #[test]
    fn zero_and_blank_species_do_not_contribute_to_averages() {
        let mut zero = record(1, "2024-05-01", "09:00", "Carp");
        zero.length_in = Some(0.0);
        let mut blank = record(2, "2024-05-01", "09:00", " ");
        blank.length_in = Some(12.0);
        let mut real = record(3, "2024-05-01", "09:00", "Carp");
        real.length_in = Some(20.0);

        let series = average_by_species(&[zero, blank, real], |r| r.length_in);
        assert_eq!(series.labels, vec!["Carp"]);
        assert_eq!(series.values, vec![20.0]);
    }

    #[test]
    fn timeline_is_sorted_by_date_with_unknown_bucket() {
        let rows = vec![
            record(1, "2024-05-03", "09:00", "Bass"),
            record(2, "2024-05-01", "09:00", "Bass"),
            record(3, "", "09:00", "Bass"),
            record(4, "2024-05-03", "17:00", "Bass"),
        ];
        let series = catches_over_time(&rows);
        assert_eq!(series.labels, vec!["2024-05-01", "2024-05-03", "Unknown"]);
        assert_eq!(series.values, vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn bait_defaults_to_unknown() {
        let mut worm = record(1, "2024-05-01", "09:00", "Bass");
        worm.bait = Some("Worm".into());
        let plain = record(2, "2024-05-01", "09:00", "Bass");
        let mut worm_again = record(3, "2024-05-01", "09:00", "Bass");
        worm_again.bait = Some("Worm".into());

        let series = bait_usage(&[worm, plain, worm_again]);
        assert_eq!(series.labels, vec!["Worm", "Unknown"]);
        assert_eq!(series.values, vec![2.0, 1.0]);
    }

    #[test]
    fn kinds_parse_from_slugs_and_legacy_ids() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.slug().parse::<ChartKind>().unwrap(), kind);
        }
        assert_eq!("avgWeightChart".parse::<ChartKind>().unwrap(), ChartKind::AvgWeight);
        assert!("histogram".parse::<ChartKind>().is_err());
    }

    #[test]
    fn empty_collection_yields_empty_series() {
        for kind in ChartKind::ALL {
            assert!(build_series(kind, &[]).is_empty());
        }
    }
}
