use std::io::{BufRead, Write};

use checkin_tracker_lib::check_in::CheckIn;

use crate::{DailySummary, ReportError, TripAccumulator};

/// Runs the whole report: one output line per check-in (the original line with
/// the leg distance and cumulative distance appended), interleaved with a
/// summary line whenever a calendar day closes and once more at end of input.
pub fn write_report<R: BufRead, W: Write>(reader: R, mut out: W) -> Result<(), ReportError> {
    let mut accumulator = TripAccumulator::new();
    let mut processed = 0usize;

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| ReportError::Io(format!("Failed to read input: {err}")))?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let check_in = CheckIn::try_from(line)
            .map_err(|err| ReportError::Parse(format!("Line {}: {}", line_number + 1, err)))?;

        let step = accumulator.record(check_in);

        if let Some(summary) = &step.closed_day {
            write_daily_summary(&mut out, summary)?;
        }

        writeln!(out, "{},{},{}", line, step.leg_distance, step.trip_distance)
            .map_err(|err| ReportError::Io(format!("Failed to write output: {err}")))?;

        processed += 1;
    }

    if let Some(summary) = accumulator.finish() {
        write_daily_summary(&mut out, &summary)?;
    }

    tracing::info!("Processed {processed} check-ins");

    Ok(())
}

fn write_daily_summary<W: Write>(out: &mut W, summary: &DailySummary) -> Result<(), ReportError> {
    tracing::debug!("Closing day {}", summary.date);

    writeln!(
        out,
        "{}; distance: {}; moving time: {}; speed: {} mph",
        summary.date.format("%a %m/%d/%Y"),
        format_decimal(summary.distance),
        format_moving_time(summary.moving_time_seconds),
        format_decimal(summary.average_speed()),
    )
    .map_err(|err| ReportError::Io(format!("Failed to write output: {err}")))
}

fn format_moving_time(seconds: f64) -> String {
    let whole_seconds = seconds as i64;
    let hours = whole_seconds / 3600;
    let minutes = whole_seconds % 3600 / 60;

    format!("{hours} hrs {minutes} min")
}

/// Half-up rounding to one decimal place.
fn format_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_lines(input: &str) -> Vec<String> {
        let mut out = Vec::new();
        write_report(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn single_day_log_ends_with_its_summary() {
        let input = "\
# Timestamp,ESN,Check-in type,Lat,Long
05/31/2019 08:15:01,0-3020839,UNLIMITED-TRACK,36.56844,-87.89409,\"\",\"\"

05/31/2019 08:24:56,0-3020839,UNLIMITED-TRACK,36.57510,-87.89905,\"\",\"\"
";
        let lines = report_lines(input);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(",0,0"));
        assert!(lines[1].starts_with("05/31/2019 08:24:56,"));
        assert!(lines[1].contains(",0.53"));
        assert_eq!(
            lines[2],
            "Fri 05/31/2019; distance: 0.5; moving time: 0 hrs 9 min; speed: 3.2 mph"
        );
    }

    #[test]
    fn day_boundary_summary_precedes_the_new_days_first_record() {
        let input = "\
06/01/2019 10:00:00,0-3020839,UNLIMITED-TRACK,36.0,-87.0
06/01/2019 10:30:00,0-3020839,UNLIMITED-TRACK,36.02,-87.0
06/02/2019 09:00:00,0-3020839,UNLIMITED-TRACK,36.05,-87.0
06/02/2019 09:30:00,0-3020839,UNLIMITED-TRACK,36.07,-87.0
";
        let lines = report_lines(input);

        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[2],
            "Sat 06/01/2019; distance: 1.4; moving time: 0 hrs 30 min; speed: 2.8 mph"
        );
        assert!(lines[3].starts_with("06/02/2019 09:00:00,"));
        assert_eq!(
            lines[5],
            "Sun 06/02/2019; distance: 3.5; moving time: 23 hrs 0 min; speed: 0.2 mph"
        );
    }

    #[test]
    fn empty_input_produces_no_output() {
        let input = "# just a header\n\n";

        assert!(report_lines(input).is_empty());
    }

    #[test]
    fn malformed_line_aborts_with_its_line_number() {
        let input = "\
05/31/2019 08:15:01,0-3020839,UNLIMITED-TRACK,36.56844,-87.89409
05/31/2019 08:24:56,0-3020839,UNLIMITED-TRACK,not-a-latitude,-87.89905
";
        let mut out = Vec::new();
        let err = write_report(input.as_bytes(), &mut out).unwrap_err();

        match err {
            ReportError::Parse(reason) => {
                assert!(reason.contains("Line 2"));
                assert!(reason.contains("Invalid latitude"));
            }
            other => panic!("Expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn stationary_day_reports_zero_speed() {
        let input = "\
05/31/2019 08:15:01,0-3020839,UNLIMITED-TRACK,36.56844,-87.89409
05/31/2019 08:24:56,0-3020839,UNLIMITED-TRACK,36.56844,-87.89409
";
        let lines = report_lines(input);

        assert_eq!(
            lines[2],
            "Fri 05/31/2019; distance: 0.0; moving time: 0 hrs 0 min; speed: 0.0 mph"
        );
    }
}
