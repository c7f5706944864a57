use chrono::{Duration, NaiveDate};
use framewatch_core::aggregate::{by_camera, by_camera_and_date, by_hour_and_camera};
use framewatch_core::{filter_events, normalize, FilterCriteria};
use framewatch_parser::RawEvent;

fn events() -> Vec<RawEvent> {
    let base = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(0, 30, 0)
        .unwrap();
    let rows: [(Option<i64>, Option<&str>); 12] = [
        (Some(3001), Some("Video frame missing")),
        (Some(3001), Some("VIDEO FRAME MISSING on encoder")),
        (Some(3002), Some("prefix: video frame missing: suffix")),
        (Some(3002), None),
        (None, Some("video frame missing")),
        (Some(3003), Some("video frame")),
        (Some(3003), Some("video  frame missing")),
        (Some(3004), Some("Video Frame Missing")),
        (Some(4001), Some("video frame missing")),
        (Some(3004), Some("frame missing video")),
        (Some(3001), Some("video frame missing")),
        (Some(3004), Some("video frame missing")),
    ];

    rows.iter()
        .enumerate()
        .map(|(idx, (view_id, description))| RawEvent {
            datetime: Some(base + Duration::hours(idx as i64 * 7)),
            view_id: *view_id,
            error_type: Some("Error".to_string()),
            error_code: None,
            error_description: description.map(str::to_string),
        })
        .collect()
}

#[test]
fn filter_keeps_exactly_the_matching_rows_in_order() {
    let events = events();
    let criteria = FilterCriteria::default();
    let table = normalize(&events).unwrap();

    let filtered = filter_events(&table, &criteria).unwrap();
    let rows = filtered.to_rows().unwrap();

    let expected: Vec<(i64, String)> = events
        .iter()
        .filter(|event| criteria.matches(event.view_id, event.error_description.as_deref()))
        .map(|event| {
            (
                event.view_id.unwrap(),
                event.error_description.clone().unwrap(),
            )
        })
        .collect();
    let actual: Vec<(i64, String)> = rows
        .iter()
        .map(|row| (row.view_id, row.error_description.clone()))
        .collect();

    assert_eq!(actual, expected);
    assert_eq!(filtered.height(), 6);
}

#[test]
fn predicate_edge_cases() {
    let criteria = FilterCriteria::default();

    assert!(criteria.matches(Some(3001), Some("VIDEO FRAME MISSING")));
    assert!(!criteria.matches(Some(3001), None));
    assert!(!criteria.matches(None, Some("video frame missing")));
    assert!(!criteria.matches(Some(3005), Some("video frame missing")));
    assert!(!criteria.matches(Some(3001), Some("video frame")));

    let any_description = FilterCriteria::new([3001], "");
    assert!(any_description.matches(Some(3001), Some("anything")));
    assert!(!any_description.matches(Some(3001), None));
}

#[test]
fn empty_allow_list_matches_nothing() {
    let table = normalize(&events()).unwrap();
    let filtered = filter_events(&table, &FilterCriteria::new([], "video")).unwrap();

    assert!(filtered.is_empty());
    assert!(by_camera(&filtered).unwrap().is_empty());
}

#[test]
fn aggregates_conserve_and_cover_filtered_rows() {
    let table = normalize(&events()).unwrap();
    let filtered = filter_events(&table, &FilterCriteria::default()).unwrap();
    let rows = filtered.to_rows().unwrap();

    let per_camera = by_camera(&filtered).unwrap();
    let per_camera_day = by_camera_and_date(&filtered).unwrap();
    let per_hour = by_hour_and_camera(&filtered).unwrap();

    let total: u64 = per_camera.iter().map(|row| row.count).sum();
    assert_eq!(total as usize, filtered.height());
    assert_eq!(per_camera_day.iter().map(|r| r.count).sum::<u64>(), total);
    assert_eq!(per_hour.iter().map(|r| r.count).sum::<u64>(), total);

    for row in &rows {
        let matching: Vec<_> = per_camera_day
            .iter()
            .filter(|agg| agg.view_id == row.view_id && Some(agg.date) == row.date)
            .collect();
        assert_eq!(matching.len(), 1, "pair ({}, {:?}) must appear once", row.view_id, row.date);

        assert_eq!(
            per_hour
                .iter()
                .filter(|agg| Some(agg.hour) == row.hour && agg.view_id == row.view_id)
                .count(),
            1
        );
    }

    assert!(per_camera_day.iter().all(|agg| agg.count >= 1));
    assert!(per_camera_day
        .windows(2)
        .all(|w| (w[0].view_id, w[0].date) < (w[1].view_id, w[1].date)));
    assert!(per_hour
        .windows(2)
        .all(|w| (w[0].hour, w[0].view_id) < (w[1].hour, w[1].view_id)));
    assert!(per_camera.windows(2).all(|w| w[0].view_id < w[1].view_id));
}
