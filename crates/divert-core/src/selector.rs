//! Choosing the best alternate from a candidate set.

use crate::diversion::{DiversionEstimate, DiversionEvaluator};
use crate::error::{DivertError, Result};
use crate::models::{AlternateSelection, Waypoint};
use crate::weather::WeatherSource;

/// Evaluate every candidate and pick the best one.
///
/// Among reachable candidates the lowest fuel requirement wins. When nothing
/// is reachable the candidate with the most fuel left (smallest shortfall)
/// wins. Ties go to the earlier candidate.
pub fn select<W: WeatherSource + ?Sized>(
    evaluator: &DiversionEvaluator<'_, W>,
    current_lat: f64,
    current_lon: f64,
    fuel_remaining_kg: f64,
    candidates: &[Waypoint],
) -> Result<AlternateSelection> {
    if candidates.is_empty() {
        return Err(DivertError::EmptyCandidateSet);
    }

    let estimates: Vec<DiversionEstimate> = candidates
        .iter()
        .map(|alternate| evaluator.estimate(current_lat, current_lon, fuel_remaining_kg, alternate))
        .collect();

    let best = best_index(&estimates).ok_or(DivertError::EmptyCandidateSet)?;
    if !estimates[best].reachable {
        tracing::warn!(
            "No reachable alternate among {} candidates, least shortfall is {}",
            estimates.len(),
            estimates[best].alternate.name
        );
    }

    Ok(AlternateSelection {
        best: estimates[best].to_result(),
        all: estimates.iter().map(DiversionEstimate::to_result).collect(),
    })
}

/// Index of the preferred estimate under the selection policy.
pub fn best_index(estimates: &[DiversionEstimate]) -> Option<usize> {
    let mut cheapest_reachable: Option<usize> = None;
    let mut least_short: Option<usize> = None;

    for (i, est) in estimates.iter().enumerate() {
        if est.reachable
            && cheapest_reachable
                .map_or(true, |j| est.fuel_required_kg < estimates[j].fuel_required_kg)
        {
            cheapest_reachable = Some(i);
        }
        if least_short.map_or(true, |j| est.remaining_fuel_kg > estimates[j].remaining_fuel_kg) {
            least_short = Some(i);
        }
    }

    cheapest_reachable.or(least_short)
}
