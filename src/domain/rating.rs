//! Rating results and the sentinel values that encode failures.
//!
//! The wire format carries a single `f64` per player. Computed scores are
//! never negative (every normalized term is clamped at zero), which leaves
//! the negative integers free to signal why a player could not be rated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reasons a player could not be rated, each with a reserved sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingFailure {
    /// Upstream unreachable, unknown realm, undecodable body, or deadline hit.
    TransportFailure,
    /// No usable statistics for the account.
    NoData,
    /// The account's statistics are private.
    HiddenProfile,
    /// Upstream answered with a structured application error.
    ApiError,
}

impl RatingFailure {
    pub const ALL: [Self; 4] = [
        Self::TransportFailure,
        Self::NoData,
        Self::HiddenProfile,
        Self::ApiError,
    ];

    /// Sentinel value written in place of a score.
    #[must_use]
    pub const fn sentinel(self) -> f64 {
        match self {
            Self::TransportFailure => -1.0,
            Self::NoData => -2.0,
            Self::HiddenProfile => -3.0,
            Self::ApiError => -4.0,
        }
    }

    /// Map a sentinel back to its failure class.
    #[must_use]
    pub fn from_sentinel(value: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.sentinel() == value)
    }
}

impl fmt::Display for RatingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransportFailure => write!(f, "transport failure"),
            Self::NoData => write!(f, "no data"),
            Self::HiddenProfile => write!(f, "hidden profile"),
            Self::ApiError => write!(f, "api error"),
        }
    }
}

/// Result for one requested player, correlated by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: u64,
    pub rating: f64,
}

impl Rating {
    #[must_use]
    pub const fn scored(id: u64, rating: f64) -> Self {
        Self { id, rating }
    }

    #[must_use]
    pub const fn failed(id: u64, failure: RatingFailure) -> Self {
        Self {
            id,
            rating: failure.sentinel(),
        }
    }

    /// The failure class, if this rating carries a sentinel.
    #[must_use]
    pub fn failure(&self) -> Option<RatingFailure> {
        if self.rating < 0.0 {
            RatingFailure::from_sentinel(self.rating)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.failure().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_distinct_and_negative() {
        let values: Vec<f64> = RatingFailure::ALL.iter().map(|f| f.sentinel()).collect();
        assert_eq!(values, vec![-1.0, -2.0, -3.0, -4.0]);
    }

    #[test]
    fn failure_roundtrips_through_sentinel() {
        for failure in RatingFailure::ALL {
            let rating = Rating::failed(9, failure);
            assert_eq!(rating.failure(), Some(failure));
            assert!(!rating.is_scored());
        }
    }

    #[test]
    fn zero_score_is_not_a_failure() {
        let rating = Rating::scored(3, 0.0);
        assert_eq!(rating.failure(), None);
        assert!(rating.is_scored());
    }

    #[test]
    fn serializes_to_wire_shape() {
        let json = serde_json::to_string(&Rating::failed(42, RatingFailure::HiddenProfile)).unwrap();
        assert_eq!(json, r#"{"id":42,"rating":-3.0}"#);
    }

    #[test]
    fn result_collection_survives_encoding_in_any_order() {
        let ratings = vec![
            Rating::scored(3, 1495.5),
            Rating::failed(1, RatingFailure::TransportFailure),
            Rating::scored(7, 0.0),
            Rating::failed(2, RatingFailure::ApiError),
        ];

        let encoded = serde_json::to_vec(&ratings).unwrap();
        let mut decoded: Vec<Rating> = serde_json::from_slice(&encoded).unwrap();

        let mut expected = ratings.clone();
        expected.reverse();
        decoded.sort_by_key(|r| r.id);
        expected.sort_by_key(|r| r.id);
        assert_eq!(decoded, expected);
        assert_eq!(decoded[0].failure(), Some(RatingFailure::TransportFailure));
        assert_eq!(decoded[1].failure(), Some(RatingFailure::ApiError));
    }
}
