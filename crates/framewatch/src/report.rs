use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use framewatch_core::DashboardData;

/// Plain-text rendering of the dashboard for the `report` command.
pub fn render_report(data: &DashboardData) -> String {
    let mut totals = Table::new();
    totals
        .load_preset(UTF8_FULL)
        .set_header(vec!["Total Errors", "Total Warnings", "Matched Events"])
        .add_row(vec![
            data.total_error_count.to_string(),
            data.total_warning.to_string(),
            data.matched_events().to_string(),
        ]);

    let mut per_camera = Table::new();
    per_camera
        .load_preset(UTF8_FULL)
        .set_header(vec!["Camera ID", "Total Number of Errors"]);
    for row in &data.total_error {
        per_camera.add_row(vec![row.view_id.to_string(), row.count.to_string()]);
    }

    let mut per_day = Table::new();
    per_day
        .load_preset(UTF8_FULL)
        .set_header(vec!["Camera ID", "Date", "Downtime Events"]);
    for row in &data.camera_day_downtime {
        per_day.add_row(vec![
            row.view_id.to_string(),
            row.date.format("%Y-%m-%d").to_string(),
            row.count.to_string(),
        ]);
    }

    let mut per_hour = Table::new();
    per_hour
        .load_preset(UTF8_FULL)
        .set_header(vec!["Hour of the Day", "Camera ID", "Number of Errors"]);
    for row in &data.hourly_errors {
        per_hour.add_row(vec![
            row.hour.to_string(),
            row.view_id.to_string(),
            row.count.to_string(),
        ]);
    }

    format!(
        "Filter: cameras {:?}, description contains \"{}\"\n{totals}\n\n\
Errors per camera\n{per_camera}\n\n\
Downtime per camera and day\n{per_day}\n\n\
Errors per hour and camera\n{per_hour}\n",
        data.criteria.cameras, data.criteria.pattern,
    )
}

#[cfg(test)]
mod tests {
    use framewatch_core::aggregate::CameraCount;
    use framewatch_core::FilterCriteria;

    use super::*;

    #[test]
    fn report_lists_totals_and_cameras() {
        let data = DashboardData {
            total_error: vec![CameraCount { view_id: 3001, count: 2 }],
            camera_day_downtime: Vec::new(),
            hourly_errors: Vec::new(),
            total_error_count: 3,
            total_warning: 1,
            criteria: FilterCriteria::default(),
        };

        let report = render_report(&data);

        assert!(report.contains("Total Errors"));
        assert!(report.contains("3001"));
        assert!(report.contains("video frame missing"));
        assert!(report.contains("Downtime per camera and day"));
    }
}
