use itertools::Itertools;
use nalgebra::point;
use thiserror::Error;

use crate::math::geometry::{Segment2, segment_intersection};
use crate::tarmac::sim::aggregate::AggregatedDistanceOutput;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("at least two distance samples are required, got {count}")]
    NotEnoughSamples { count: usize },

    #[error("duplicate failure speed {failure_speed} m/s in distance samples")]
    DuplicateFailureSpeed { failure_speed: f64 },
}

/// Failure speed and distance at which aborting and continuing the takeoff
/// need the same runway length. Both fields are NaN when the sampled curves
/// never cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancedFieldLength {
    pub velocity_m_s: f64,
    pub distance_m: f64,
}

/// Finds the lowest-speed crossing of the aborted and the continued distance
/// curves by intersecting them piecewise linearly between consecutive
/// samples.
pub fn balanced_field_length(
    samples: &[AggregatedDistanceOutput],
) -> Result<BalancedFieldLength, SolverError> {
    if samples.len() < 2 {
        return Err(SolverError::NotEnoughSamples {
            count: samples.len(),
        });
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.failure_speed_m_s.total_cmp(&b.failure_speed_m_s));

    for (first, second) in sorted.iter().tuple_windows() {
        if first.failure_speed_m_s == second.failure_speed_m_s {
            return Err(SolverError::DuplicateFailureSpeed {
                failure_speed: first.failure_speed_m_s,
            });
        }
    }

    for (first, second) in sorted.iter().tuple_windows() {
        // The segment test is strict and cannot see a crossing that falls
        // exactly on a sample, so curves touching at a sampled speed are
        // caught here instead.
        if first.aborted_distance_m == first.continued_distance_m {
            return Ok(BalancedFieldLength {
                velocity_m_s: first.failure_speed_m_s,
                distance_m: first.aborted_distance_m,
            });
        }

        let aborted = Segment2::new(
            point![first.failure_speed_m_s, first.aborted_distance_m],
            point![second.failure_speed_m_s, second.aborted_distance_m],
        );
        let continued = Segment2::new(
            point![first.failure_speed_m_s, first.continued_distance_m],
            point![second.failure_speed_m_s, second.continued_distance_m],
        );

        if let Some(crossing) = segment_intersection(&aborted, &continued) {
            return Ok(BalancedFieldLength {
                velocity_m_s: crossing.x,
                distance_m: crossing.y,
            });
        }
    }

    let last = &sorted[sorted.len() - 1];
    if last.aborted_distance_m == last.continued_distance_m {
        return Ok(BalancedFieldLength {
            velocity_m_s: last.failure_speed_m_s,
            distance_m: last.aborted_distance_m,
        });
    }

    Ok(BalancedFieldLength {
        velocity_m_s: f64::NAN,
        distance_m: f64::NAN,
    })
}
