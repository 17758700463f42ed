//! Plain-text rendering of engine output.

use divert_core::{AlternateSelection, DiversionAdvice, DiversionResult, FlightProgress, RoutePlan};
use std::fmt::Write;

pub fn route_line(route: &RoutePlan) -> String {
    let names: Vec<&str> = route.waypoints().iter().map(|w| w.name.as_str()).collect();
    format!(
        "{}-{} {:>7.1} nm  {}",
        route.origin(),
        route.destination(),
        route.total_nm(),
        names.join(" ")
    )
}

pub fn progress(p: &FlightProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Flight {}", p.flight_id);
    let _ = writeln!(out, "  position   {:.4}, {:.4}", p.lat, p.lon);
    let _ = writeln!(
        out,
        "  flown      {:.1} nm ({:.1}%)",
        p.distance_flown_nm, p.progress_pct
    );
    let _ = writeln!(out, "  remaining  {:.1} nm", p.remaining_nm);
    match (&p.next_waypoint, p.arrived) {
        (_, true) => {
            let _ = writeln!(out, "  arrived");
        }
        (Some(next), false) => {
            let _ = writeln!(out, "  next       {}", next);
        }
        (None, false) => {}
    }
    match p.eta {
        Some(eta) => {
            let _ = write!(out, "  eta        {}", eta.to_rfc3339());
        }
        None => {
            let _ = write!(out, "  eta        unknown");
        }
    }
    out
}

pub fn result_line(r: &DiversionResult) -> String {
    format!(
        "{:<4} {:>7.1} nm {:>6.1} kt {:>5.2} h {:>9.1} kg {:>9.1} kg  {}  {}",
        r.alternate.name,
        r.distance_nm,
        r.ground_speed_kt,
        r.time_hr,
        r.fuel_required_kg,
        r.remaining_fuel_kg,
        if r.reachable { "OK " } else { "NO " },
        r.notes
    )
}

pub fn selection(s: &AlternateSelection) -> String {
    let mut out = String::new();
    // Ties go to the earliest candidate, so the first equal entry is the pick
    let best = s.all.iter().position(|r| *r == s.best);
    for (i, r) in s.all.iter().enumerate() {
        let marker = if Some(i) == best { '*' } else { ' ' };
        let _ = writeln!(out, "{} {}", marker, result_line(r));
    }
    let _ = write!(
        out,
        "Best: {} ({} of {} reachable)",
        s.best.alternate.name,
        s.reachable_count(),
        s.all.len()
    );
    out
}

pub fn advice(a: &DiversionAdvice) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Flight {} ({}) at {:.4}, {:.4}, region {}",
        a.flight_id, a.aircraft, a.position.0, a.position.1, a.region
    );
    let _ = writeln!(out, "Evaluated at {}", a.evaluated_at.to_rfc3339());
    out.push_str(&selection(&a.selection));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use divert_core::{RouteLibrary, Waypoint};

    fn result(name: &str, fuel: f64, reachable: bool) -> DiversionResult {
        DiversionResult {
            alternate: Waypoint::new(name, 0.0, 0.0),
            distance_nm: 250.0,
            ground_speed_kt: 520.3,
            time_hr: 0.48,
            fuel_required_kg: fuel,
            remaining_fuel_kg: 9_000.0 - fuel,
            reachable,
            notes: String::new(),
        }
    }

    #[test]
    fn test_route_line_lists_waypoints() {
        let library = RouteLibrary::standard().unwrap();
        let line = route_line(library.get_route("LHR", "JFK").unwrap());
        assert!(line.starts_with("LHR-JFK"));
        assert!(line.contains("MALOT"));
        assert!(line.ends_with("JFK"));
    }

    #[test]
    fn test_selection_marks_best() {
        let all = vec![result("KEF", 7_000.0, true), result("SNN", 6_500.0, true)];
        let s = AlternateSelection {
            best: all[1].clone(),
            all,
        };
        let text = selection(&s);
        assert!(text.contains("* SNN"));
        assert!(text.contains("  KEF"));
        assert!(text.ends_with("Best: SNN (2 of 2 reachable)"));
    }

    #[test]
    fn test_selection_marks_single_copy_of_repeated_code() {
        let all = vec![
            result("KEF", 7_000.0, true),
            result("KEF", 7_000.0, true),
            result("SNN", 8_000.0, true),
        ];
        let s = AlternateSelection {
            best: all[0].clone(),
            all,
        };
        let text = selection(&s);
        assert_eq!(text.matches("* KEF").count(), 1);
        assert!(text.starts_with("* KEF"));
    }
}
