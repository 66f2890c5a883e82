//! Plain-text run report.
//!
//! Four sections: one line per passenger, each bus with its stop-by-stop
//! history, a queue-length profile per hour, and the summary.  All times
//! are printed as `HH:MM`.

use std::fmt::Write;

use bt_core::format_hhmm;
use bt_fleet::Passenger;
use bt_sim::{Metrics, SimOutcome};

use crate::histogram::{Histogram, bar};

const BAR_WIDTH: usize = 40;

/// The whole report.
pub fn render(outcome: &SimOutcome) -> String {
    let mut out = String::new();
    passengers(&mut out, outcome);
    out.push('\n');
    buses(&mut out, outcome);
    out.push('\n');
    out.push_str(&queue_profile(&outcome.metrics, 60));
    out.push('\n');
    out.push_str(&render_summary(outcome));
    out
}

/// Just the closing summary section.
pub fn render_summary(outcome: &SimOutcome) -> String {
    let mut out = String::new();
    summary(&mut out, outcome);
    out
}

/// Waiting-time and deviation histograms.
pub fn render_histograms(metrics: &Metrics, bin_width: u64) -> String {
    let mut out = String::new();
    let waiting = Histogram::from_samples(
        bin_width,
        metrics.waiting_samples.iter().map(|&w| i64::try_from(w).unwrap_or(i64::MAX)),
    );
    out.push_str(&waiting.render("Waiting time at boarding (min)", BAR_WIDTH));
    out.push('\n');
    let deviation = Histogram::from_samples(bin_width, metrics.deviation_samples.iter().copied());
    out.push_str(&deviation.render("Departure deviation (min)", BAR_WIDTH));
    out
}

/// Average queue length over samples taken in each `bucket`-minute slot.
pub fn queue_profile(metrics: &Metrics, bucket: u64) -> String {
    let bucket = bucket.max(1);
    let mut out = String::new();
    let _ = writeln!(out, "Average queue length by time of arrival");
    if metrics.queue_samples.is_empty() {
        let _ = writeln!(out, "  (no samples)");
        return out;
    }

    let mut slots: std::collections::BTreeMap<u64, (usize, usize)> = Default::default();
    for s in &metrics.queue_samples {
        let slot = slots.entry(s.time.0 / bucket).or_default();
        slot.0 += s.len;
        slot.1 += 1;
    }
    let averages: Vec<(u64, f64)> = slots
        .into_iter()
        .map(|(k, (sum, n))| (k * bucket, sum as f64 / n as f64))
        .collect();
    let max = averages.iter().map(|&(_, a)| a).fold(0.0, f64::max);
    for (start, avg) in averages {
        let _ = writeln!(out, "  {:>5} | {} {avg:.1}", format_hhmm(start), bar(avg, max, BAR_WIDTH));
    }
    out
}

fn passengers(out: &mut String, outcome: &SimOutcome) {
    let _ = writeln!(out, "Passengers:");
    for p in outcome.passengers() {
        match p {
            Passenger::Alighted(t) => {
                let b = t.passenger;
                let _ = writeln!(
                    out,
                    "  Passenger {} boarded bus {} at stop {}: arrived {}, waited {}, boarded {}; \
                     left at stop {}: travel {}, total {}",
                    b.id.0,
                    b.bus.0,
                    b.board_stop.0,
                    b.arrival_time.clock(),
                    format_hhmm(b.waiting_time),
                    b.board_time.clock(),
                    b.alight_stop.0,
                    format_hhmm(t.travel_time),
                    format_hhmm(t.total_time),
                );
            }
            Passenger::Boarded(b) => {
                let _ = writeln!(
                    out,
                    "  Passenger {} boarded bus {} at stop {}: arrived {}, waited {}, boarded {}; still on board",
                    b.id.0,
                    b.bus.0,
                    b.board_stop.0,
                    b.arrival_time.clock(),
                    format_hhmm(b.waiting_time),
                    b.board_time.clock(),
                );
            }
            Passenger::Waiting(w) => {
                let _ = writeln!(
                    out,
                    "  Passenger {} waiting at stop {} since {}",
                    w.id.0,
                    w.origin.0,
                    w.arrival_time.clock(),
                );
            }
        }
    }
}

fn buses(out: &mut String, outcome: &SimOutcome) {
    let _ = writeln!(out, "Buses:");
    for bus in &outcome.buses {
        let actual = bus.departure_time().unwrap_or(bus.scheduled_departure);
        let _ = writeln!(
            out,
            "  Bus {} scheduled {}, arrived {} ({:+} min)",
            bus.id.0,
            bus.scheduled_departure.clock(),
            actual.clock(),
            bus.deviation,
        );
        for visit in bus.visits() {
            let _ = writeln!(
                out,
                "    Stop {} at {}: {} off, {} on, {} aboard, {} left waiting",
                visit.stop.0,
                visit.arrival_time.clock(),
                visit.alighted.len(),
                visit.boarded.len(),
                visit.load,
                visit.left_waiting,
            );
        }
    }
}

fn summary(out: &mut String, outcome: &SimOutcome) {
    let s = &outcome.summary;
    let _ = writeln!(out, "Simulation run time: {}", outcome.stats.final_time.clock());
    let _ = writeln!(out, "Passengers arrived: {}", s.passengers_arrived);
    let _ = writeln!(out, "Total passengers served: {}", s.total_served);
    let _ = writeln!(out, "Still on board: {}", s.total_boarded - s.total_served);
    let _ = writeln!(out, "Still waiting: {}", outcome.still_waiting.len());
    let _ = writeln!(
        out,
        "Average waiting time in the queue: {}",
        format_hhmm(s.average_waiting_time as u64),
    );
    let _ = writeln!(out, "Average travel time: {}", format_hhmm(s.average_travel_time as u64));
    let _ = writeln!(out, "Average queue size: {:.2}", s.average_queue_size);
    let _ = writeln!(out, "Maximum queue size: {}", s.max_queue_size);
}
