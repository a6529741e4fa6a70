//! Property tests for the pregnancy map builder.

use polars::prelude::*;
use proptest::prelude::*;

use nsfg_ingest::make_preg_map;
use nsfg_model::CaseId;

proptest! {
    #[test]
    fn every_row_lands_under_its_case(ids in prop::collection::vec(1u16..40, 0..200)) {
        let caseids: Vec<String> = ids.iter().map(u16::to_string).collect();
        let df = DataFrame::new(vec![Column::new("caseid".into(), caseids.clone())]).unwrap();
        let map = make_preg_map(&df).unwrap();

        prop_assert_eq!(map.record_count(), caseids.len());
        for (row, id) in caseids.iter().enumerate() {
            let indices = map.get(&CaseId::new(id)).unwrap();
            prop_assert!(indices.contains(&row));
        }
        for (_, indices) in &map {
            prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
