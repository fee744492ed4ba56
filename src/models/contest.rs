//! Contest model and the contest state engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contest domain model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub registration_start_time: DateTime<Utc>,
    pub registration_end_time: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Cohorts (academic years) allowed to register
    pub eligible_to: Vec<i32>,
}

impl Contest {
    /// Build a contest from caller input and a freshly generated id
    pub fn from_input(id: Uuid, input: ContestInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            registration_start_time: input.registration_start_time,
            registration_end_time: input.registration_end_time,
            start_time: input.start_time,
            end_time: input.end_time,
            eligible_to: input.eligible_to,
        }
    }

    /// Registration status at `now`.
    ///
    /// The registration window is closed on both ends.
    pub fn registration_status_at(&self, now: DateTime<Utc>) -> RegistrationStatus {
        if now < self.registration_start_time {
            RegistrationStatus::NotStarted
        } else if now <= self.registration_end_time {
            RegistrationStatus::Open
        } else {
            RegistrationStatus::Closed
        }
    }

    /// Running status at `now`.
    ///
    /// The contest runs from `start_time` inclusive to `end_time` exclusive.
    pub fn running_status_at(&self, now: DateTime<Utc>) -> RunningStatus {
        if now < self.start_time {
            RunningStatus::Upcoming
        } else if now < self.end_time {
            RunningStatus::Running
        } else {
            RunningStatus::Ended
        }
    }

    /// Check whether a cohort may register
    pub fn is_eligible(&self, year: i32) -> bool {
        self.eligible_to.contains(&year)
    }
}

/// Registration window status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    NotStarted,
    Open,
    Closed,
}

/// Running window status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningStatus {
    Upcoming,
    Running,
    Ended,
}

/// Fields supplied by an administrator to create or replace a contest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestInput {
    pub name: String,
    pub description: String,
    pub registration_start_time: DateTime<Utc>,
    pub registration_end_time: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub eligible_to: Vec<i32>,
}

/// Contest as seen by a particular viewer
#[derive(Debug, Clone, Serialize)]
pub struct ContestDetail {
    #[serde(flatten)]
    pub contest: Contest,
    pub registration_status: RegistrationStatus,
    pub running_status: RunningStatus,
    /// Present only when the viewer is identified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_registered: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn contest() -> Contest {
        Contest {
            id: Uuid::new_v4(),
            name: "Spring Quiz".to_string(),
            description: "warm-up round".to_string(),
            registration_start_time: t0(),
            registration_end_time: t0() + Duration::seconds(3600),
            start_time: t0() + Duration::seconds(3600),
            end_time: t0() + Duration::seconds(7200),
            eligible_to: vec![1, 2],
        }
    }

    #[test]
    fn test_registration_status_transitions() {
        let c = contest();
        assert_eq!(
            c.registration_status_at(t0() - Duration::seconds(1)),
            RegistrationStatus::NotStarted
        );
        assert_eq!(c.registration_status_at(t0()), RegistrationStatus::Open);
        assert_eq!(
            c.registration_status_at(t0() + Duration::seconds(10)),
            RegistrationStatus::Open
        );
        assert_eq!(
            c.registration_status_at(t0() + Duration::seconds(3600)),
            RegistrationStatus::Open
        );
        assert_eq!(
            c.registration_status_at(t0() + Duration::seconds(4000)),
            RegistrationStatus::Closed
        );
    }

    #[test]
    fn test_running_status_transitions() {
        let c = contest();
        assert_eq!(
            c.running_status_at(t0() + Duration::seconds(10)),
            RunningStatus::Upcoming
        );
        assert_eq!(
            c.running_status_at(t0() + Duration::seconds(3600)),
            RunningStatus::Running
        );
        assert_eq!(
            c.running_status_at(t0() + Duration::seconds(7199)),
            RunningStatus::Running
        );
        assert_eq!(
            c.running_status_at(t0() + Duration::seconds(7200)),
            RunningStatus::Ended
        );
    }

    #[test]
    fn test_status_follows_updated_timestamps() {
        let mut c = contest();
        let now = t0() + Duration::seconds(10);
        assert_eq!(c.registration_status_at(now), RegistrationStatus::Open);

        c.registration_end_time = t0() + Duration::seconds(5);
        assert_eq!(c.registration_status_at(now), RegistrationStatus::Closed);
    }

    #[test]
    fn test_eligibility() {
        let c = contest();
        assert!(c.is_eligible(1));
        assert!(c.is_eligible(2));
        assert!(!c.is_eligible(3));
    }

    #[test]
    fn test_detail_serialization_flattens_contest() {
        let detail = ContestDetail {
            contest: contest(),
            registration_status: RegistrationStatus::Open,
            running_status: RunningStatus::Upcoming,
            is_registered: None,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "Spring Quiz");
        assert_eq!(json["registration_status"], "open");
        assert!(json.get("is_registered").is_none());
    }
}
