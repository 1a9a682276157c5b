use anyhow::{bail, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::AthleteId;

pub type CampId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampStatus {
    #[serde(rename = "geplant")]
    Planned,
    #[serde(rename = "nominierung")]
    Nomination,
    #[serde(rename = "bestätigt")]
    Confirmed,
    #[serde(rename = "abgeschlossen")]
    Completed,
}

impl CampStatus {
    pub fn next_statuses(self) -> &'static [CampStatus] {
        match self {
            CampStatus::Planned => &[CampStatus::Nomination],
            CampStatus::Nomination => &[CampStatus::Confirmed, CampStatus::Planned],
            CampStatus::Confirmed => &[CampStatus::Completed, CampStatus::Nomination],
            CampStatus::Completed => &[CampStatus::Confirmed],
        }
    }

    pub fn transition(self, to: CampStatus) -> Result<CampStatus> {
        if !self.next_statuses().contains(&to) {
            bail!("Camp cannot move from {:?} to {:?}", self, to);
        }
        Ok(to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantStatus {
    #[serde(rename = "vorgeschlagen")]
    Proposed,
    #[serde(rename = "eingeladen")]
    Invited,
    #[serde(rename = "zugesagt")]
    Accepted,
    #[serde(rename = "abgesagt")]
    Declined,
    #[serde(rename = "nachgerückt")]
    Promoted,
}

impl ParticipantStatus {
    pub fn next_statuses(self) -> &'static [ParticipantStatus] {
        match self {
            ParticipantStatus::Proposed => &[ParticipantStatus::Invited],
            ParticipantStatus::Invited => &[ParticipantStatus::Accepted, ParticipantStatus::Declined],
            ParticipantStatus::Accepted => &[ParticipantStatus::Declined],
            ParticipantStatus::Declined => &[ParticipantStatus::Promoted],
            ParticipantStatus::Promoted => &[ParticipantStatus::Accepted],
        }
    }

    pub fn transition(self, to: ParticipantStatus) -> Result<ParticipantStatus> {
        if !self.next_statuses().contains(&to) {
            bail!("Participant cannot move from {:?} to {:?}", self, to);
        }
        Ok(to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampParticipant {
    pub athlete_id: AthleteId,
    pub status: ParticipantStatus,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Nominations for one training camp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampRoster {
    pub camp_id: CampId,
    pub status: CampStatus,
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub participants: Vec<CampParticipant>,
}

impl CampRoster {
    pub fn new(camp_id: impl Into<CampId>, capacity: Option<usize>) -> Self {
        Self {
            camp_id: camp_id.into(),
            status: CampStatus::Planned,
            capacity,
            participants: Vec::new(),
        }
    }

    /// Proposes an athlete; each athlete can be on a camp only once.
    pub fn nominate(&mut self, athlete_id: &str, comment: Option<String>) -> Result<()> {
        if self.participant(athlete_id).is_some() {
            bail!("Athlete {} is already nominated for camp {}", athlete_id, self.camp_id);
        }
        self.participants.push(CampParticipant {
            athlete_id: athlete_id.to_string(),
            status: ParticipantStatus::Proposed,
            comment,
        });
        Ok(())
    }

    /// A full camp refuses new acceptances, except for athletes moving up
    /// from the waiting list.
    pub fn update_participant(&mut self, athlete_id: &str, to: ParticipantStatus) -> Result<()> {
        let camp_id = self.camp_id.clone();
        let has_capacity = self.has_capacity();
        let Some(participant) = self.participants.iter_mut().find(|p| p.athlete_id == athlete_id) else {
            bail!("Athlete {} is not nominated for camp {}", athlete_id, camp_id);
        };
        let next = participant.status.transition(to)?;
        if next == ParticipantStatus::Accepted && participant.status != ParticipantStatus::Promoted && !has_capacity {
            bail!("Camp {} is full, athlete {} cannot be accepted", camp_id, athlete_id);
        }
        participant.status = next;
        info!("Camp {}: athlete {} is now {:?}", camp_id, athlete_id, to);
        Ok(())
    }

    pub fn set_status(&mut self, to: CampStatus) -> Result<()> {
        self.status = self.status.transition(to)?;
        Ok(())
    }

    pub fn participant(&self, athlete_id: &str) -> Option<&CampParticipant> {
        self.participants.iter().find(|p| p.athlete_id == athlete_id)
    }

    pub fn confirmed_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status == ParticipantStatus::Accepted)
            .count()
    }

    pub fn has_capacity(&self) -> bool {
        self.capacity.is_none_or(|capacity| self.confirmed_count() < capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camp_status_flow() {
        assert!(CampStatus::Planned.transition(CampStatus::Nomination).is_ok());
        assert!(CampStatus::Planned.transition(CampStatus::Confirmed).is_err());
        assert!(CampStatus::Completed.transition(CampStatus::Confirmed).is_ok());
        assert!(CampStatus::Completed.transition(CampStatus::Planned).is_err());
    }

    #[test]
    fn test_participant_status_flow() {
        use ParticipantStatus::*;
        assert!(Proposed.transition(Invited).is_ok());
        assert!(Proposed.transition(Accepted).is_err());
        assert!(Declined.transition(Promoted).is_ok());
        assert!(Promoted.transition(Accepted).is_ok());
        assert!(Accepted.transition(Invited).is_err());
    }

    #[test]
    fn test_nominate_rejects_duplicates() {
        let mut roster = CampRoster::new("camp-1", Some(1));
        roster.nominate("a1", None).unwrap();
        assert!(roster.nominate("a1", Some("again".to_string())).is_err());
        assert_eq!(roster.participants.len(), 1);
    }

    #[test]
    fn test_capacity_counts_accepted_only() {
        let mut roster = CampRoster::new("camp-1", Some(1));
        roster.nominate("a1", None).unwrap();
        roster.nominate("a2", None).unwrap();
        assert!(roster.has_capacity());

        roster.update_participant("a1", ParticipantStatus::Invited).unwrap();
        roster.update_participant("a1", ParticipantStatus::Accepted).unwrap();

        assert_eq!(roster.confirmed_count(), 1);
        assert!(!roster.has_capacity());
        assert!(roster.update_participant("a2", ParticipantStatus::Accepted).is_err());
        assert!(roster.update_participant("a3", ParticipantStatus::Invited).is_err());
    }

    #[test]
    fn test_full_camp_refuses_invited_but_takes_promoted() {
        let mut roster = CampRoster::new("camp-3", Some(1));
        for id in ["a1", "a2", "a3"] {
            roster.nominate(id, None).unwrap();
            roster.update_participant(id, ParticipantStatus::Invited).unwrap();
        }
        roster.update_participant("a1", ParticipantStatus::Accepted).unwrap();

        assert!(roster.update_participant("a2", ParticipantStatus::Accepted).is_err());
        assert_eq!(roster.participant("a2").unwrap().status, ParticipantStatus::Invited);
        assert_eq!(roster.confirmed_count(), 1);

        roster.update_participant("a3", ParticipantStatus::Declined).unwrap();
        roster.update_participant("a3", ParticipantStatus::Promoted).unwrap();
        roster.update_participant("a3", ParticipantStatus::Accepted).unwrap();
        assert_eq!(roster.confirmed_count(), 2);
    }

    #[test]
    fn test_unlimited_camp_always_has_capacity() {
        let mut roster = CampRoster::new("camp-2", None);
        roster.set_status(CampStatus::Nomination).unwrap();
        assert!(roster.has_capacity());
        assert!(roster.set_status(CampStatus::Completed).is_err());
    }
}
