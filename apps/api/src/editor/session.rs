//! Transient editing sessions held in memory.
//!
//! A session owns one CV value and the order counter for new sections.
//! Nothing is persisted; sessions vanish on restart, explicit removal, or
//! after sitting idle longer than the store's TTL.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::editor::ops::EditError;
use crate::errors::AppError;
use crate::models::cv::CvData;
use crate::models::sample::{empty_cv, sample_cv};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSession {
    pub id: Uuid,
    pub cv: CvData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Next `order` handed to a new section. Only ever increases.
    #[serde(skip)]
    next_order: i64,
}

impl EditorSession {
    fn new(cv: CvData) -> Self {
        let now = Utc::now();
        let next_order = cv.max_order().map_or(1, |max| max.saturating_add(1));
        Self {
            id: Uuid::new_v4(),
            cv,
            created_at: now,
            updated_at: now,
            next_order,
        }
    }

    /// Hands out the next order value.
    pub fn take_order(&mut self) -> i64 {
        let order = self.next_order;
        self.next_order = self.next_order.saturating_add(1);
        order
    }
}

/// Shared, capped map of live sessions.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, EditorSession>>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
            idle_ttl,
        }
    }

    /// Drops sessions not edited within the TTL. Returns how many went.
    fn evict_idle(&self, sessions: &mut HashMap<Uuid, EditorSession>) -> usize {
        let cutoff = Utc::now() - self.idle_ttl;
        let before = sessions.len();
        sessions.retain(|_, session| session.updated_at > cutoff);
        before - sessions.len()
    }

    /// Starts a session from the sample template or the empty default.
    pub async fn create(&self, template: bool) -> Result<EditorSession, AppError> {
        let today = Utc::now().date_naive();
        let cv = if template {
            sample_cv(today)
        } else {
            empty_cv(today)
        };

        let mut sessions = self.sessions.write().await;
        let evicted = self.evict_idle(&mut sessions);
        if evicted > 0 {
            info!("Evicted {evicted} idle editor sessions");
        }
        if sessions.len() >= self.max_sessions {
            return Err(AppError::CapacityExceeded(format!(
                "Session limit of {} reached",
                self.max_sessions
            )));
        }
        let session = EditorSession::new(cv);
        sessions.insert(session.id, session.clone());
        info!(
            "Created editor session {} (template={template}, live={})",
            session.id,
            sessions.len()
        );
        Ok(session)
    }

    pub async fn get(&self, id: Uuid) -> Result<EditorSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Runs `edit` against a copy of the session's CV and stores the result
    /// only if it succeeds. Order values taken by a failed edit are returned
    /// to the counter.
    pub async fn apply<T, F>(&self, id: Uuid, edit: F) -> Result<(EditorSession, T), AppError>
    where
        F: FnOnce(&mut EditorSession, CvData) -> Result<(CvData, T), EditError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

        let current = session.cv.clone();
        let next_order = session.next_order;
        let (next, output) = match edit(&mut *session, current) {
            Ok(result) => result,
            Err(err) => {
                session.next_order = next_order;
                return Err(err.into());
            }
        };
        session.cv = next;
        session.updated_at = Utc::now();
        debug!("Applied edit to session {id}");
        Ok((session.clone(), output))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!("Removed editor session {id}"))
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn live_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
