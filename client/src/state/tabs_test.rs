use super::*;

#[test]
fn tabs_round_trip_through_storage_format() {
    for tab in AdminTab::ALL {
        let raw = serde_json::to_string(&tab).unwrap();
        assert_eq!(serde_json::from_str::<AdminTab>(&raw).unwrap(), tab);
    }
    assert_eq!(serde_json::to_string(&TeacherTab::Progress).unwrap(), "\"progress\"");
}

#[test]
fn defaults_are_first_tabs() {
    assert_eq!(AdminTab::default(), AdminTab::ALL[0]);
    assert_eq!(TeacherTab::default(), TeacherTab::ALL[0]);
}

#[test]
fn labels_are_unique() {
    let mut labels: Vec<_> = AdminTab::ALL.iter().map(|t| t.label()).collect();
    labels.dedup();
    assert_eq!(labels.len(), AdminTab::ALL.len());
}
