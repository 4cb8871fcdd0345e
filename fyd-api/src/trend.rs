use serde::{Deserialize, Serialize};

/// The `/yield/trend` dashboard payload.
///
/// `dates` and `avg_yield` are parallel arrays: one average per date that
/// has matching yield records. All four arrays are empty when nothing
/// matched the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub dates: Vec<String>,
    pub avg_yield: Vec<f64>,
    pub defect_pareto: Vec<ParetoEntry>,
    pub defect_details: Vec<DefectDetail>,
}

impl DashboardData {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.defect_pareto.is_empty() && self.defect_details.is_empty()
    }
}

/// One bar of the defect pareto: total count per defect type, descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParetoEntry {
    pub defect_type: String,
    pub count: u64,
}

/// One sampled defect position on the map.
///
/// `severity` is "L"/"M"/"H" when recorded and `wafer` a slot number;
/// both are optional in the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectDetail {
    pub lot_id: String,
    pub defect_type: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub wafer: Option<u32>,
}

#[cfg(test)]
mod test {
    use super::DashboardData;

    const STR_RESULT: &str = r#"{
        "dates": ["2024-01-01", "2024-01-02"],
        "avg_yield": [97.52, 96.1],
        "defect_pareto": [
            {"defect_type": "scratch", "count": 41},
            {"defect_type": "particle", "count": 17}
        ],
        "defect_details": [
            {"lot_id": "L1", "defect_type": "scratch", "x": 12.5, "y": 88.25, "severity": "H", "wafer": 7},
            {"lot_id": "L2", "defect_type": "particle", "x": 3.0, "y": 41.75}
        ]
    }"#;

    #[test]
    fn test_trend_payload_roundtrip() {
        let data: DashboardData = serde_json::from_str(STR_RESULT).unwrap();
        assert_eq!(data.dates.len(), 2);
        assert_eq!(data.avg_yield[0], 97.52);
        assert_eq!(data.defect_pareto[0].defect_type, "scratch");
        assert_eq!(data.defect_pareto[0].count, 41);
        assert_eq!(data.defect_details[0].severity.as_deref(), Some("H"));
        assert_eq!(data.defect_details[0].wafer, Some(7));
        assert_eq!(data.defect_details[1].severity, None);
        assert_eq!(data.defect_details[1].wafer, None);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_empty_payload() {
        let data: DashboardData =
            serde_json::from_str(r#"{"dates": [], "avg_yield": [], "defect_pareto": [], "defect_details": []}"#)
                .unwrap();
        assert!(data.is_empty());
    }
}
