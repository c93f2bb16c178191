//! Test utilities for report writer testing

use crate::app::models::{NodePair, RationalMethodRecord, UnitHydrographRecord};

mod table_tests;

/// Two rational method records, the second a confluence
pub fn sample_rational_records() -> Vec<RationalMethodRecord> {
    vec![
        RationalMethodRecord {
            node_pair: NodePair::from_stations("101", "102").unwrap(),
            flow_rate_cfs: 4.26,
            time_of_concentration_min: 17.0,
            confluence: false,
        },
        RationalMethodRecord {
            node_pair: NodePair::from_stations("103", "103").unwrap(),
            flow_rate_cfs: 8.254,
            time_of_concentration_min: 18.5,
            confluence: true,
        },
    ]
}

/// Unit hydrograph records for two files
pub fn sample_unit_hydrograph_records() -> Vec<UnitHydrographRecord> {
    vec![
        UnitHydrographRecord {
            source_file_name: "UH1.out".to_string(),
            peak_flow_cfs: 26.18,
            peak_volume_acre_ft: 5.15,
        },
        UnitHydrographRecord {
            source_file_name: "UH2.out".to_string(),
            peak_flow_cfs: 3.95,
            peak_volume_acre_ft: 0.66,
        },
    ]
}
