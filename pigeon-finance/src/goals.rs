//! Savings goals: progress, pacing and the goal list.

use chrono::{DateTime, NaiveDate, Utc};
use pigeon_core::{Error, Goal, KeyValueStore, Result, StoreExt, keys, time::utc_midnight};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::budgets::round_half_up;

/// One-tap contribution amounts offered on each goal
pub const QUICK_AMOUNTS: [f64; 3] = [50.0, 100.0, 500.0];

const MONTH_MS: f64 = 30.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Suggested monthly contribution to reach a goal on time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalPacing {
    /// Whole 30-day months left, never below 1
    pub months_remaining: i64,
    /// Negative once the goal is already met
    pub suggested_monthly: f64,
}

pub fn pacing(goal: &Goal, now: DateTime<Utc>) -> GoalPacing {
    let left_ms = (utc_midnight(goal.target_date) - now).num_milliseconds() as f64;
    let months_remaining = ((left_ms / MONTH_MS).ceil() as i64).max(1);
    GoalPacing {
        months_remaining,
        suggested_monthly: (goal.target_amount - goal.saved_amount) / months_remaining as f64,
    }
}

/// Saved share of the target, 0..=100; 0 for a non-positive target.
pub fn progress_pct(goal: &Goal) -> u32 {
    if goal.target_amount > 0.0 {
        round_half_up(goal.saved_amount / goal.target_amount * 100.0).clamp(0.0, 100.0) as u32
    } else {
        0
    }
}

/// Create/update form input
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    /// Blank or absent creates a new goal
    pub id: Option<String>,
    pub name: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    pub saved_amount: f64,
}

impl GoalDraft {
    pub fn into_goal(self) -> Goal {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Goal {
            id,
            name: self.name,
            target_amount: self.target_amount,
            target_date: self.target_date,
            saved_amount: self.saved_amount,
        }
    }
}

pub struct GoalBook<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
    goals: Vec<Goal>,
}

impl<'a, S: KeyValueStore + ?Sized> GoalBook<'a, S> {
    pub fn open(store: &'a mut S) -> Self {
        let goals = store.load(keys::GOALS, Vec::new());
        Self { store, goals }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Replace by id in place, or put a new goal first.
    pub fn upsert(&mut self, goal: Goal) -> Result<()> {
        match self.goals.iter().position(|g| g.id == goal.id) {
            Some(i) => self.goals[i] = goal,
            None => self.goals.insert(0, goal),
        }
        self.persist()
    }

    pub fn save_draft(&mut self, draft: GoalDraft) -> Result<Goal> {
        let goal = draft.into_goal();
        self.upsert(goal.clone())?;
        info!(id = %goal.id, name = %goal.name, "saved goal");
        Ok(goal)
    }

    /// Delete a goal. Callers confirm with the user first.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        if self.goals.len() == before {
            return Ok(false);
        }
        self.persist()?;
        info!(id, "removed goal");
        Ok(true)
    }

    /// Add to the saved amount. A zero or non-finite contribution changes nothing.
    pub fn add_saved(&mut self, id: &str, extra: f64) -> Result<Option<&Goal>> {
        if extra == 0.0 || !extra.is_finite() {
            return Ok(None);
        }
        let i = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| Error::not_found(format!("goal {id}")))?;
        self.goals[i].saved_amount += extra;
        self.persist()?;
        info!(id, extra, "added to goal");
        Ok(Some(&self.goals[i]))
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(keys::GOALS, &self.goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pigeon_core::MemoryStore;

    fn goal(target: f64, saved: f64, date: NaiveDate) -> Goal {
        Goal {
            id: "g1".into(),
            name: "Japan trip".into(),
            target_amount: target,
            target_date: date,
            saved_amount: saved,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_pacing_sixty_days_out() {
        let target = (now() + Duration::days(60)).date_naive();
        let p = pacing(&goal(1000.0, 400.0, target), now());
        assert_eq!(p.months_remaining, 2);
        assert!((p.suggested_monthly - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_pacing_past_date_uses_one_month() {
        let target = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let p = pacing(&goal(1000.0, 400.0, target), now());
        assert_eq!(p.months_remaining, 1);
        assert_eq!(p.suggested_monthly, 600.0);
    }

    #[test]
    fn test_pacing_overfunded_goal_is_negative() {
        let target = (now() + Duration::days(100)).date_naive();
        let p = pacing(&goal(500.0, 800.0, target), now());
        assert_eq!(p.months_remaining, 4);
        assert!(p.suggested_monthly < 0.0);
    }

    #[test]
    fn test_progress_pct() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(progress_pct(&goal(1000.0, 400.0, date)), 40);
        assert_eq!(progress_pct(&goal(1000.0, 1500.0, date)), 100);
        assert_eq!(progress_pct(&goal(0.0, 10.0, date)), 0);
    }

    #[test]
    fn test_save_draft_creates_then_updates() {
        let mut store = MemoryStore::new();
        let mut book = GoalBook::open(&mut store);
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

        let created = book
            .save_draft(GoalDraft {
                id: Some("  ".into()),
                name: "Laptop".into(),
                target_amount: 2000.0,
                target_date: date,
                saved_amount: 0.0,
            })
            .unwrap();
        assert!(!created.id.trim().is_empty());

        book.save_draft(GoalDraft {
            id: Some(created.id.clone()),
            name: "Laptop Pro".into(),
            target_amount: 2500.0,
            target_date: date,
            saved_amount: 100.0,
        })
        .unwrap();

        assert_eq!(book.goals().len(), 1);
        assert_eq!(book.goals()[0].name, "Laptop Pro");
    }

    #[test]
    fn test_add_saved_and_remove() {
        let mut store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        store.save(keys::GOALS, &vec![goal(1000.0, 0.0, date)]).unwrap();
        let mut book = GoalBook::open(&mut store);

        for extra in QUICK_AMOUNTS {
            book.add_saved("g1", extra).unwrap();
        }
        assert_eq!(book.get("g1").unwrap().saved_amount, 650.0);

        assert!(book.add_saved("g1", 0.0).unwrap().is_none());
        assert!(book.add_saved("g1", f64::NAN).unwrap().is_none());
        assert!(book.add_saved("missing", 5.0).is_err());

        assert!(book.remove("g1").unwrap());
        assert!(!book.remove("g1").unwrap());
        drop(book);
        let stored: Vec<Goal> = store.load(keys::GOALS, Vec::new());
        assert!(stored.is_empty());
    }
}
