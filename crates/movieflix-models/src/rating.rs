use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's star rating for a movie, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarRating(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingOutOfRange(pub i64);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Result<Self, RatingOutOfRange> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(RatingOutOfRange(stars as i64))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StarRating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for StarRating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| RatingOutOfRange(value))
            .and_then(Self::new)
    }
}

impl From<StarRating> for u8 {
    fn from(rating: StarRating) -> Self {
        rating.0
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ratings() {
        for stars in 1..=5u8 {
            assert_eq!(StarRating::new(stars).unwrap().get(), stars);
        }
    }

    #[test]
    fn test_out_of_range_ratings() {
        assert_eq!(StarRating::new(0), Err(RatingOutOfRange(0)));
        assert_eq!(StarRating::new(6), Err(RatingOutOfRange(6)));
        assert_eq!(StarRating::try_from(-3i64), Err(RatingOutOfRange(-3)));
        assert_eq!(StarRating::try_from(300i64), Err(RatingOutOfRange(300)));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<StarRating>("4").is_ok());
        assert!(serde_json::from_str::<StarRating>("9").is_err());
    }
}
