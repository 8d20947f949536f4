use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Application, ApplicationStatus};

/// Aggregate view over every stored application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: u64,
    /// Always carries all five statuses, zero when unused.
    pub status_breakdown: BTreeMap<ApplicationStatus, u64>,
    pub generation_breakdown: Vec<GenerationCount>,
    pub monthly_trend: Vec<MonthlyCount>,
    /// Whole percent of approved applications.
    pub approval_rate: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationCount {
    pub generation: u16,
    pub count: u64,
}

/// Submissions bucketed by UTC calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: u64,
}

impl ApplicationStats {
    pub fn from_applications(applications: &[Application]) -> Self {
        let mut status_breakdown: BTreeMap<ApplicationStatus, u64> = ApplicationStatus::ALL
            .into_iter()
            .map(|status| (status, 0))
            .collect();
        let mut generations: BTreeMap<u16, u64> = BTreeMap::new();
        let mut months: BTreeMap<String, u64> = BTreeMap::new();

        for application in applications {
            *status_breakdown.entry(application.status).or_default() += 1;
            *generations.entry(application.generation).or_default() += 1;
            *months
                .entry(application.submitted_at.format("%Y-%m").to_string())
                .or_default() += 1;
        }

        let total = applications.len() as u64;
        let approved = status_breakdown
            .get(&ApplicationStatus::Approved)
            .copied()
            .unwrap_or_default();

        Self {
            total,
            status_breakdown,
            generation_breakdown: generations
                .into_iter()
                .map(|(generation, count)| GenerationCount { generation, count })
                .collect(),
            monthly_trend: months
                .into_iter()
                .map(|(month, count)| MonthlyCount { month, count })
                .collect(),
            approval_rate: approval_rate(approved, total),
        }
    }
}

/// `approved / total * 100`, rounded half up; zero for an empty store.
pub fn approval_rate(approved: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (approved * 100 + total / 2) / total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_rate_rounds_to_whole_percent() {
        assert_eq!(approval_rate(0, 0), 0);
        assert_eq!(approval_rate(67, 156), 43);
        assert_eq!(approval_rate(1, 3), 33);
        assert_eq!(approval_rate(2, 3), 67);
        assert_eq!(approval_rate(1, 2), 50);
        assert_eq!(approval_rate(5, 5), 100);
    }

    #[test]
    fn empty_store_still_lists_every_status() {
        let stats = ApplicationStats::from_applications(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.status_breakdown.len(), 5);
        assert!(stats.status_breakdown.values().all(|count| *count == 0));
        assert!(stats.generation_breakdown.is_empty());
        assert!(stats.monthly_trend.is_empty());
    }

    #[test]
    fn status_breakdown_serializes_with_wire_labels_in_lifecycle_order() {
        let stats = ApplicationStats::from_applications(&[]);
        let json = serde_json::to_string(&stats.status_breakdown).expect("serializes");
        assert_eq!(
            json,
            r#"{"PENDING":0,"REVIEWING":0,"APPROVED":0,"REJECTED":0,"WAITLIST":0}"#
        );
    }
}
