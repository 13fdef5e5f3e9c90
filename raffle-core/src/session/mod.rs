//! Sequential prize-draw state machine.
//!
//! A session takes an immutable snapshot of participants and prizes, then a
//! background task resolves one prize at a time: a cosmetic progress
//! animation, a uniform random selection among the still-eligible
//! participants, and a short pause before the next prize. The presentation
//! layer polls [`DrawSession::view`] and renders whatever it sees.

mod picker;

use crate::types::{Participant, Prize, Winner};
use crate::{RaffleError, Result};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Lifecycle phase of a draw session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Drawing,
    Complete,
}

/// Read-only view of a session, cloned out to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: Phase,
    pub current_prize_index: Option<usize>,
    pub current_prize: Option<Prize>,
    /// Cosmetic draw progress for the current prize, 0..=100.
    pub progress: u8,
    pub winners: Vec<Winner>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SessionView {
    fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            current_prize_index: None,
            current_prize: None,
            progress: 0,
            winners: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }
}

/// Pacing for the progress animation and the pause between prizes.
///
/// Timing is cosmetic only: it never affects which participants win.
#[derive(Debug, Clone, Copy)]
pub struct DrawTiming {
    /// Percent added per animation tick.
    pub progress_step: u8,
    /// Delay between animation ticks.
    pub tick: Duration,
    /// Pause between finishing one prize and starting the next.
    pub prize_pause: Duration,
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            progress_step: 5,
            tick: Duration::from_millis(50),
            prize_pause: Duration::from_millis(1500),
        }
    }
}

impl DrawTiming {
    /// No delays at all; used by tests and the CLI `--fast` flag.
    pub fn immediate() -> Self {
        Self {
            progress_step: 100,
            tick: Duration::ZERO,
            prize_pause: Duration::ZERO,
        }
    }
}

struct Shared {
    /// Bumped under the state write lock on every start/reset. The draw task
    /// re-checks it while holding the lock before each mutation, so a stale
    /// task can never write after a reset.
    epoch: AtomicU64,
    state: RwLock<SessionView>,
}

/// A single raffle run: `Idle` -> `Drawing` -> `Complete`, resettable to
/// `Idle` from anywhere.
pub struct DrawSession {
    id: Uuid,
    shared: Arc<Shared>,
    timing: DrawTiming,
    rng: Arc<Mutex<Box<dyn RngCore + Send>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl DrawSession {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Session with a deterministic random source. Two sessions seeded
    /// identically and given identical inputs produce identical winners.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            id: Uuid::new_v4(),
            shared: Arc::new(Shared {
                epoch: AtomicU64::new(0),
                state: RwLock::new(SessionView::idle()),
            }),
            timing: DrawTiming::default(),
            rng: Arc::new(Mutex::new(Box::new(rng))),
            task: Mutex::new(None),
        }
    }

    pub fn with_timing(mut self, timing: DrawTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.read().phase
    }

    pub fn view(&self) -> SessionView {
        self.shared.state.read().clone()
    }

    pub fn winners(&self) -> Vec<Winner> {
        self.shared.state.read().winners.clone()
    }

    /// Begin drawing. The participant and prize lists are frozen for the
    /// lifetime of the run; later roster edits do not reach it.
    pub fn start(&self, participants: Vec<Participant>, prizes: Vec<Prize>) -> Result<()> {
        if participants.is_empty() {
            return Err(RaffleError::EmptyRoster);
        }
        if prizes.is_empty() {
            return Err(RaffleError::NoPrizes);
        }

        let epoch = {
            let mut state = self.shared.state.write();
            if state.phase == Phase::Drawing {
                return Err(RaffleError::invalid_state("draw already in progress"));
            }
            *state = SessionView {
                phase: Phase::Drawing,
                current_prize_index: Some(0),
                current_prize: Some(prizes[0].clone()),
                progress: 0,
                winners: Vec::new(),
                started_at: Some(Utc::now()),
                finished_at: None,
            };
            self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1
        };

        tracing::info!(
            "session {} started: {} participants, {} prizes",
            self.id,
            participants.len(),
            prizes.len()
        );

        let shared = self.shared.clone();
        let rng = self.rng.clone();
        let timing = self.timing;
        let handle = tokio::spawn(run_draw(shared, participants, prizes, timing, rng, epoch));

        let mut slot = self.task.lock();
        if let Some(old) = slot.take() {
            old.abort();
        }
        *slot = Some(handle);
        Ok(())
    }

    /// Return to `Idle`, discarding winners and any in-flight animation.
    /// Safe from any phase, including mid-animation; no stale tick can
    /// mutate state afterwards.
    pub fn reset(&self) {
        {
            let mut state = self.shared.state.write();
            self.shared.epoch.fetch_add(1, Ordering::SeqCst);
            *state = SessionView::idle();
        }
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
        tracing::info!("session {} reset", self.id);
    }

    /// Wait until the session leaves the `Drawing` phase.
    pub async fn wait(&self) {
        loop {
            if self.phase() != Phase::Drawing {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Default for DrawSession {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_draw(
    shared: Arc<Shared>,
    participants: Vec<Participant>,
    prizes: Vec<Prize>,
    timing: DrawTiming,
    rng: Arc<Mutex<Box<dyn RngCore + Send>>>,
    epoch: u64,
) {
    let step = timing.progress_step.max(1);

    for (index, prize) in prizes.iter().enumerate() {
        {
            let mut state = shared.state.write();
            if shared.epoch.load(Ordering::SeqCst) != epoch {
                return;
            }
            state.current_prize_index = Some(index);
            state.current_prize = Some(prize.clone());
            state.progress = 0;
        }
        tracing::debug!("drawing prize '{}' ({} slots)", prize.name, prize.count);

        // Cosmetic animation; must finish before the selection is revealed.
        let mut progress = 0u8;
        while progress < 100 {
            tokio::time::sleep(timing.tick).await;
            progress = progress.saturating_add(step).min(100);
            let mut state = shared.state.write();
            if shared.epoch.load(Ordering::SeqCst) != epoch {
                return;
            }
            state.progress = progress;
        }

        let winner_count = {
            let mut state = shared.state.write();
            if shared.epoch.load(Ordering::SeqCst) != epoch {
                return;
            }
            // Eligibility comes from the winners recorded so far, not from a
            // snapshot taken before the animation ran.
            let eligible: Vec<Participant> = participants
                .iter()
                .filter(|p| !state.winners.iter().any(|w| w.participant.id == p.id))
                .cloned()
                .collect();
            let mut rng = rng.lock();
            let selected = picker::pick(&mut **rng, eligible, prize.count as usize);
            for participant in &selected {
                state.winners.push(Winner {
                    participant: participant.clone(),
                    prize: prize.clone(),
                });
            }
            selected.len()
        };
        tracing::info!("prize '{}': {} winner(s) drawn", prize.name, winner_count);

        if index + 1 < prizes.len() {
            tokio::time::sleep(timing.prize_pause).await;
        }
    }

    let mut state = shared.state.write();
    if shared.epoch.load(Ordering::SeqCst) != epoch {
        return;
    }
    state.phase = Phase::Complete;
    state.current_prize_index = None;
    state.current_prize = None;
    state.progress = 100;
    state.finished_at = Some(Utc::now());
    tracing::info!("draw complete: {} winners total", state.winners.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn participants(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|name| Participant::new(*name)).collect()
    }

    fn prizes(tiers: &[(&str, u32)]) -> Vec<Prize> {
        tiers.iter().map(|(name, count)| Prize::new(*name, *count)).collect()
    }

    async fn run_to_completion(session: &DrawSession) {
        tokio::time::timeout(Duration::from_secs(5), session.wait())
            .await
            .expect("draw did not complete in time");
    }

    #[tokio::test]
    async fn five_participants_three_tiers_caps_the_last_prize() {
        let roster = participants(&["A", "B", "C", "D", "E"]);
        let tiers = prizes(&[("Gold", 2), ("Silver", 2), ("Bronze", 2)]);

        let session = DrawSession::seeded(42).with_timing(DrawTiming::immediate());
        session.start(roster, tiers.clone()).unwrap();
        run_to_completion(&session).await;

        let view = session.view();
        assert_eq!(view.phase, Phase::Complete);
        assert_eq!(view.winners.len(), 5);

        // No repeat winners across prizes.
        let ids: HashSet<_> = view.winners.iter().map(|w| w.participant.id).collect();
        assert_eq!(ids.len(), 5);

        // Winners are grouped in prize-list order; Bronze is capped to the
        // single remaining participant.
        let per_prize: Vec<usize> = tiers
            .iter()
            .map(|prize| view.winners.iter().filter(|w| w.prize.id == prize.id).count())
            .collect();
        assert_eq!(per_prize, vec![2, 2, 1]);
        assert!(view.winners[..2].iter().all(|w| w.prize.id == tiers[0].id));
        assert!(view.winners[2..4].iter().all(|w| w.prize.id == tiers[1].id));
        assert_eq!(view.winners[4].prize.id, tiers[2].id);
    }

    #[tokio::test]
    async fn empty_roster_is_rejected_and_stays_idle() {
        let session = DrawSession::seeded(1).with_timing(DrawTiming::immediate());
        let result = session.start(vec![], prizes(&[("X", 1)]));
        assert!(matches!(result, Err(RaffleError::EmptyRoster)));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.winners().is_empty());
    }

    #[tokio::test]
    async fn empty_prize_list_is_rejected() {
        let session = DrawSession::seeded(1).with_timing(DrawTiming::immediate());
        let result = session.start(participants(&["A"]), vec![]);
        assert!(matches!(result, Err(RaffleError::NoPrizes)));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn zero_count_prize_yields_no_winners_and_advances() {
        let session = DrawSession::seeded(3).with_timing(DrawTiming::immediate());
        session
            .start(participants(&["A", "B", "C"]), prizes(&[("Nothing", 0), ("Pair", 2)]))
            .unwrap();
        run_to_completion(&session).await;

        let view = session.view();
        assert_eq!(view.phase, Phase::Complete);
        assert_eq!(view.winners.len(), 2);
        assert!(view.winners.iter().all(|w| w.prize.name == "Pair"));
    }

    #[tokio::test]
    async fn more_slots_than_participants_selects_everyone() {
        let session = DrawSession::seeded(3).with_timing(DrawTiming::immediate());
        session
            .start(participants(&["A", "B"]), prizes(&[("Big", 10)]))
            .unwrap();
        run_to_completion(&session).await;
        assert_eq!(session.winners().len(), 2);
    }

    #[tokio::test]
    async fn identical_seeds_produce_identical_winners() {
        let roster = participants(&["A", "B", "C", "D", "E", "F", "G"]);
        let tiers = prizes(&[("First", 2), ("Second", 3)]);

        let first = DrawSession::seeded(1234).with_timing(DrawTiming::immediate());
        first.start(roster.clone(), tiers.clone()).unwrap();
        run_to_completion(&first).await;

        let second = DrawSession::seeded(1234).with_timing(DrawTiming::immediate());
        second.start(roster, tiers).unwrap();
        run_to_completion(&second).await;

        assert_eq!(first.winners(), second.winners());
    }

    #[tokio::test]
    async fn reset_is_idempotent_from_every_phase() {
        let session = DrawSession::seeded(8).with_timing(DrawTiming::immediate());

        // From Idle.
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);

        // From Complete.
        session
            .start(participants(&["A", "B"]), prizes(&[("P", 1)]))
            .unwrap();
        run_to_completion(&session).await;
        assert_eq!(session.phase(), Phase::Complete);
        session.reset();
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.winners().is_empty());
    }

    #[tokio::test]
    async fn reset_mid_animation_halts_all_further_ticks() {
        let timing = DrawTiming {
            progress_step: 5,
            tick: Duration::from_millis(5),
            prize_pause: Duration::from_millis(50),
        };
        let session = DrawSession::seeded(8).with_timing(timing);
        session
            .start(participants(&["A", "B", "C"]), prizes(&[("P1", 1), ("P2", 1)]))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);

        // Any stale tick would surface here as a progress or winner mutation.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let view = session.view();
        assert_eq!(view.phase, Phase::Idle);
        assert_eq!(view.progress, 0);
        assert!(view.winners.is_empty());
        assert!(view.current_prize.is_none());
    }

    #[tokio::test]
    async fn starting_while_drawing_is_rejected() {
        let timing = DrawTiming {
            progress_step: 5,
            tick: Duration::from_millis(10),
            prize_pause: Duration::from_millis(10),
        };
        let session = DrawSession::seeded(8).with_timing(timing);
        let roster = participants(&["A", "B"]);
        let tiers = prizes(&[("P", 1)]);
        session.start(roster.clone(), tiers.clone()).unwrap();

        let result = session.start(roster, tiers);
        assert!(matches!(result, Err(RaffleError::InvalidState(_))));
        session.reset();
    }

    #[tokio::test]
    async fn restart_after_complete_discards_previous_winners() {
        let session = DrawSession::seeded(8).with_timing(DrawTiming::immediate());
        let roster = participants(&["A", "B", "C"]);
        session.start(roster.clone(), prizes(&[("P", 2)])).unwrap();
        run_to_completion(&session).await;
        assert_eq!(session.winners().len(), 2);

        session.start(roster, prizes(&[("Q", 1)])).unwrap();
        run_to_completion(&session).await;

        let view = session.view();
        assert_eq!(view.winners.len(), 1);
        assert_eq!(view.winners[0].prize.name, "Q");
        assert!(view.started_at.is_some());
        assert!(view.finished_at.is_some());
    }
}
