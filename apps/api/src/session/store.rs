//! Per-user analysis sessions and the in-memory store that owns them.
//!
//! A session bundles the resume store, the requirement and skill reference data, the
//! suggestion lifecycle, the recency tracker and the notification outbox. Derived
//! views are recomputed in `view()` from the current bullets on every call.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::insights::{summarize, InsightsSummary};
use crate::analysis::requirement_matcher::{match_requirements, CoverageSummary, RequirementStatus};
use crate::analysis::skill_evidence::{map_skills, SkillEvidence, SkillMapping};
use crate::models::resume::{RequirementDefinition, ResumeBullet, ResumeStore};
use crate::models::suggestion::{CompletedSuggestion, Suggestion};
use crate::session::fixtures;
use crate::suggestions::collaborators::NotificationOutbox;
use crate::suggestions::lifecycle::{Effects, FilterCounts, LifecycleOutcome, SuggestionLifecycle};
use crate::suggestions::recency::{RecencyMark, RecencyTracker};

// ────────────────────────────────────────────────────────────────────────────
// Snapshot returned to the rendering client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    #[serde(flatten)]
    pub bullet: ResumeBullet,
    pub recency: f64, // 0.0 = not recently changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_text: Option<String>,
    pub used_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub bullets: Vec<BulletView>,
    pub recent_changes: Vec<RecencyMark>,
    pub requirement_status: Vec<RequirementStatus>,
    pub coverage: CoverageSummary,
    pub insights: InsightsSummary,
    pub skills: Vec<SkillEvidence>,
    pub active_suggestions: Vec<Suggestion>,
    pub completed_suggestions: Vec<CompletedSuggestion>,
    pub filter_counts: FilterCounts,
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ResumeSession {
    store: ResumeStore,
    requirements: Vec<RequirementDefinition>,
    skill_mappings: Vec<SkillMapping>,
    lifecycle: SuggestionLifecycle,
    recency: RecencyTracker,
    outbox: NotificationOutbox,
}

impl ResumeSession {
    pub fn new(
        bullets: Vec<ResumeBullet>,
        requirements: Vec<RequirementDefinition>,
        suggestions: Vec<Suggestion>,
        skill_mappings: Vec<SkillMapping>,
        recency_ttl: Duration,
    ) -> Self {
        Self {
            store: ResumeStore::new(bullets),
            requirements,
            skill_mappings,
            lifecycle: SuggestionLifecycle::new(suggestions),
            recency: RecencyTracker::new(recency_ttl),
            outbox: NotificationOutbox::default(),
        }
    }

    /// Session over the built-in resume, job posting and suggestions.
    pub fn seeded(recency_ttl: Duration) -> Self {
        Self::new(
            fixtures::seed_bullets(),
            fixtures::seed_requirements(),
            fixtures::seed_suggestions(),
            fixtures::seed_skill_mappings(),
            recency_ttl,
        )
    }

    pub fn lifecycle(&self) -> &SuggestionLifecycle {
        &self.lifecycle
    }

    pub fn outbox(&self) -> &NotificationOutbox {
        &self.outbox
    }

    #[cfg(test)]
    pub fn is_recently_changed(&self, bullet_id: &str) -> bool {
        self.recency.is_marked(bullet_id)
    }

    pub fn requirement_status(&self) -> Vec<RequirementStatus> {
        match_requirements(self.store.bullets(), &self.requirements)
    }

    // ── Lifecycle operations ────────────────────────────────────────────────

    pub fn dismiss(&mut self, suggestion_id: &str) -> LifecycleOutcome {
        self.lifecycle.dismiss(suggestion_id)
    }

    pub fn apply_rewrite(&mut self, text: &str, suggestion_id: &str, now: Instant) -> LifecycleOutcome {
        let mut fx = Effects {
            store: &mut self.store,
            recency: &mut self.recency,
            notifier: &self.outbox,
            now,
        };
        self.lifecycle.apply_rewrite(text, suggestion_id, &mut fx)
    }

    pub fn quick_edit(&mut self, bullet_id: &str, action_id: &str, now: Instant) -> LifecycleOutcome {
        let mut fx = Effects {
            store: &mut self.store,
            recency: &mut self.recency,
            notifier: &self.outbox,
            now,
        };
        self.lifecycle.quick_edit(bullet_id, action_id, &mut fx)
    }

    pub fn begin_edit(&mut self, bullet_id: &str) -> LifecycleOutcome {
        self.lifecycle.begin_edit(bullet_id, &self.store)
    }

    pub fn set_edit_text(&mut self, bullet_id: &str, text: &str) -> LifecycleOutcome {
        self.lifecycle.set_edit_text(bullet_id, text)
    }

    pub fn save_edit(&mut self, bullet_id: &str, now: Instant) -> LifecycleOutcome {
        let mut fx = Effects {
            store: &mut self.store,
            recency: &mut self.recency,
            notifier: &self.outbox,
            now,
        };
        self.lifecycle.save_edit(bullet_id, &mut fx)
    }

    pub fn cancel_edit(&mut self, bullet_id: &str) -> LifecycleOutcome {
        self.lifecycle.cancel_edit(bullet_id)
    }

    pub fn sweep_recency(&mut self, now: Instant) -> usize {
        self.recency.sweep(now)
    }

    /// Recomputes every derived view from the current bullets.
    pub fn view(&self, now: Instant) -> SessionView {
        let bullets = self.store.bullets();
        let requirement_status = self.requirement_status();

        SessionView {
            bullets: bullets
                .iter()
                .map(|b| BulletView {
                    bullet: b.clone(),
                    recency: self.recency.intensity(&b.id, now),
                    edit_text: self.lifecycle.edit_text(&b.id).map(str::to_string),
                    used_actions: self.lifecycle.used_actions(&b.id),
                })
                .collect(),
            recent_changes: self.recency.marks(now),
            coverage: CoverageSummary::from_statuses(&requirement_status),
            insights: summarize(bullets, &requirement_status),
            skills: map_skills(bullets, &requirement_status, &self.skill_mappings),
            active_suggestions: self.lifecycle.active().to_vec(),
            completed_suggestions: self.lifecycle.completed().to_vec(),
            filter_counts: self.lifecycle.filter_counts(),
            requirement_status,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

pub type SharedSession = Arc<Mutex<ResumeSession>>;

/// Sessions untouched for this long are evicted by the sweeper.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

struct SessionEntry {
    session: SharedSession,
    last_seen: Instant,
}

/// Session id → session. Each session sits behind its own lock.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    recency_ttl: Duration,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(recency_ttl: Duration, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            recency_ttl,
            idle_ttl,
        }
    }

    /// Creates a seeded session and returns its id.
    pub async fn create(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(ResumeSession::seeded(self.recency_ttl)));
        let entry = SessionEntry {
            session: session.clone(),
            last_seen: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        info!("Created session {id}");
        (id, session)
    }

    /// Looks up a session and refreshes its idle clock.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    /// Drops a session. Returns false when the id is unknown.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Removed session {id}");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Evicts sessions idle for at least the idle TTL. Returns how many were evicted.
    pub async fn evict_idle(&self, now: Instant) -> usize {
        let idle_ttl = self.idle_ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = now.saturating_duration_since(entry.last_seen) < idle_ttl;
            if !keep {
                debug!("Session {id} expired after {}s idle", idle_ttl.as_secs());
            }
            keep
        });
        before - sessions.len()
    }

    /// Sweeps every session's recency marks. Returns the total evicted.
    pub async fn sweep_recency(&self, now: Instant) -> usize {
        // Release the map lock before touching individual sessions
        let sessions: Vec<SharedSession> = self
            .sessions
            .read()
            .await
            .values()
            .map(|entry| entry.session.clone())
            .collect();

        let mut evicted = 0;
        for session in sessions {
            evicted += session.lock().await.sweep_recency(now);
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::CoverageStatus;
    use crate::suggestions::recency::DEFAULT_TTL;

    fn status_of<'a>(view: &'a SessionView, id: &str) -> &'a RequirementStatus {
        view.requirement_status.iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn test_seeded_view_coverage() {
        let session = ResumeSession::seeded(DEFAULT_TTL);
        let view = session.view(Instant::now());

        assert_eq!(view.coverage.total, 7);
        assert_eq!(view.coverage.covered, 1);
        assert_eq!(view.coverage.partial, 3);
        assert_eq!(view.coverage.missing, 3);
        assert_eq!(view.insights.overall_score, 14);
        assert_eq!(status_of(&view, "7").status, CoverageStatus::Covered);
        assert_eq!(status_of(&view, "6").status, CoverageStatus::Missing);
        assert_eq!(view.skills.len(), 7);
        assert_eq!(view.active_suggestions.len(), 4);
        assert!(view.bullets.iter().all(|b| b.recency == 0.0));
    }

    #[test]
    fn test_view_reflects_apply_immediately() {
        let mut session = ResumeSession::seeded(DEFAULT_TTL);
        let now = Instant::now();
        let rewrite = session.lifecycle().final_rewrite("2", None).unwrap();
        session.apply_rewrite(&rewrite, "2", now);

        let view = session.view(now);
        assert_eq!(status_of(&view, "6").status, CoverageStatus::Partial);
        assert_eq!(status_of(&view, "4").status, CoverageStatus::Partial);
        assert_eq!(view.completed_suggestions.len(), 1);
        let rb2 = view.bullets.iter().find(|b| b.bullet.id == "rb2").unwrap();
        assert!((rb2.recency - 1.0).abs() < f64::EPSILON);
        assert_eq!(view.recent_changes.len(), 1);
        assert!(!view.insights.weaknesses.contains(&"No mention of Python experience".to_string()));
    }

    #[test]
    fn test_view_exposes_edit_buffer_and_used_actions() {
        let mut session = ResumeSession::seeded(DEFAULT_TTL);
        let now = Instant::now();
        session.begin_edit("rb3");
        session.set_edit_text("rb3", "Draft");
        session.quick_edit("rb1", "qa1", now);

        let view = session.view(now);
        let rb3 = view.bullets.iter().find(|b| b.bullet.id == "rb3").unwrap();
        let rb1 = view.bullets.iter().find(|b| b.bullet.id == "rb1").unwrap();
        assert_eq!(rb3.edit_text.as_deref(), Some("Draft"));
        assert_eq!(rb1.used_actions, vec!["qa1".to_string()]);
    }

    #[tokio::test]
    async fn test_store_create_and_get() {
        let store = SessionStore::new(DEFAULT_TTL, DEFAULT_IDLE_TTL);
        let (id, _) = store.create().await;
        assert!(store.get(id).await.is_some());
        assert!(store.get(Uuid::new_v4()).await.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(DEFAULT_TTL, DEFAULT_IDLE_TTL);
        let (_, first) = store.create().await;
        let (_, second) = store.create().await;

        first.lock().await.dismiss("1");
        assert_eq!(first.lock().await.lifecycle().active().len(), 3);
        assert_eq!(second.lock().await.lifecycle().active().len(), 4);
    }

    #[tokio::test]
    async fn test_store_sweep_spans_sessions() {
        let store = SessionStore::new(Duration::from_millis(100), DEFAULT_IDLE_TTL);
        let (_, first) = store.create().await;
        let (_, second) = store.create().await;
        let start = Instant::now();
        first.lock().await.apply_rewrite("A.", "1", start);
        second.lock().await.apply_rewrite("B.", "3", start);

        assert_eq!(store.sweep_recency(start + Duration::from_millis(50)).await, 0);
        assert_eq!(store.sweep_recency(start + Duration::from_millis(100)).await, 2);
        assert!(!first.lock().await.is_recently_changed("rb1"));
    }

    #[tokio::test]
    async fn test_remove_session() {
        let store = SessionStore::new(DEFAULT_TTL, DEFAULT_IDLE_TTL);
        let (id, _) = store.create().await;

        assert!(store.remove(id).await);
        assert!(store.get(id).await.is_none());
        assert!(!store.remove(id).await);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_are_evicted_and_access_refreshes() {
        let store = SessionStore::new(DEFAULT_TTL, Duration::from_secs(60));
        let (busy, _) = store.create().await;
        let (idle, _) = store.create().await;

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.get(busy).await.is_some());

        tokio::time::advance(Duration::from_secs(15)).await;
        assert_eq!(store.evict_idle(Instant::now()).await, 1);
        assert!(store.get(idle).await.is_none());
        assert!(store.get(busy).await.is_some());
        assert_eq!(store.len().await, 1);
    }
}
