//! Defines the Birkebeiner race variants and the per-run race parameters that
//! anchor time alignment and key the profile cache.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The three Birkebeiner races, each with its own route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceType {
    /// Cross-country ski race, Rena to Lillehammer.
    #[serde(rename = "rennet")]
    Rennet,
    /// Mountain bike race.
    #[serde(rename = "rittet")]
    Rittet,
    /// Running race.
    #[serde(rename = "løpet")]
    Lopet,
}

impl RaceType {
    /// Project name used by the Birkebeiner tracker.
    pub fn project_name(&self) -> &'static str {
        match self {
            RaceType::Rennet => "rennet",
            RaceType::Rittet => "rittet",
            RaceType::Lopet => "løpet",
        }
    }
}

impl fmt::Display for RaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.project_name())
    }
}

impl FromStr for RaceType {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rennet" => Ok(RaceType::Rennet),
            "rittet" => Ok(RaceType::Rittet),
            // "lopet" for terminals that make typing 'ø' painful
            "løpet" | "lopet" => Ok(RaceType::Lopet),
            _ => Err(RaceError::UnknownRace(s.to_string())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RaceError {
    #[error("Invalid race '{0}'. Use either 'rennet', 'rittet', or 'løpet'")]
    UnknownRace(String),

    #[error("Total race duration must be positive, got {0} seconds")]
    NonPositiveDuration(i64),
}

/// The caller's description of the race being profiled.
///
/// Immutable for the run. Used as the alignment anchor and, through
/// [`RaceParameters::cache_key`], as the profile cache key.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceParameters {
    race_type: RaceType,
    start_time: DateTime<Utc>,
    total_duration: Duration,
}

impl RaceParameters {
    pub fn new(
        race_type: RaceType,
        start_time: DateTime<Utc>,
        total_duration: Duration,
    ) -> Result<Self, RaceError> {
        if total_duration <= Duration::zero() {
            return Err(RaceError::NonPositiveDuration(total_duration.num_seconds()));
        }
        Ok(Self {
            race_type,
            start_time,
            total_duration,
        })
    }

    pub fn race_type(&self) -> RaceType {
        self.race_type
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    pub fn cache_key(&self) -> RaceKey {
        RaceKey {
            race_type: self.race_type,
            start_time: self.start_time,
            total_duration_s: self.total_duration.num_seconds(),
        }
    }
}

/// Serializable form of [`RaceParameters`] stored next to cached records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceKey {
    pub race_type: RaceType,
    pub start_time: DateTime<Utc>,
    pub total_duration_s: i64,
}
