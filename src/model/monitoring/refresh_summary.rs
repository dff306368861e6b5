use crate::common::*;

#[doc = "Per cluster report: which patterns were refreshed and how long it took"]
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
#[getset(get = "pub")]
pub struct RefreshSummary {
    cluster: String,
    timeseries_patterns: Vec<String>,
    non_timeseries: Vec<String>,
    total_timeseries: usize,
    total_non_timeseries: usize,
    total_series: usize,
    duration: f64,
}

impl RefreshSummary {
    #[doc = "Function that classifies the enumerated patterns into time-series and plain ones"]
    /// # Arguments
    /// * `cluster` - Cluster label
    /// * `patterns` - Pattern id mapped to its optional time field
    /// * `duration` - Elapsed seconds for the whole cluster pass
    pub fn from_patterns(
        cluster: &str,
        patterns: &HashMap<String, Option<String>>,
        duration: f64,
    ) -> Self {
        let mut timeseries_patterns: Vec<String> = patterns
            .iter()
            .filter(|(_, field)| field.is_some())
            .map(|(name, _)| name.clone())
            .collect();

        let mut non_timeseries: Vec<String> = patterns
            .iter()
            .filter(|(_, field)| field.is_none())
            .map(|(name, _)| name.clone())
            .collect();

        /* HashMap order is arbitrary; sorted lists keep the report stable. */
        timeseries_patterns.sort();
        non_timeseries.sort();

        let total_timeseries: usize = timeseries_patterns.len();
        let total_non_timeseries: usize = non_timeseries.len();

        RefreshSummary {
            cluster: cluster.to_string(),
            timeseries_patterns,
            non_timeseries,
            total_timeseries,
            total_non_timeseries,
            total_series: total_timeseries + total_non_timeseries,
            duration,
        }
    }
}
