use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::{
    curriculum::{
        normalizer::CurriculumNormalizer,
        renderer::{CurriculumRenderer, ScreenView},
        schema,
        types::Curriculum,
    },
    service::{
        error::{ServiceError, ServiceErrorKind, malformed_payload, validation_error},
        ports::GenerationBackend,
        types::{GenerateRequest, PlanLength},
    },
};

/// Form state mirrored by the orchestrator. `Submitting` disables a second
/// submission until the in-flight one reaches a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Success(GeneratedPlan),
    /// Quota exhausted. Hosts with a login/upgrade affordance present it;
    /// this is never an error banner.
    Limited,
    Failed(ServiceError),
    /// The submission never left the client.
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptySkill,
    AlreadySubmitting,
}

#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub request_id: String,
    /// Skill after trimming and per-word spell correction; redisplay this
    /// value, not the raw input.
    pub skill: String,
    pub duration: String,
    pub level: String,
    pub model: Curriculum,
    pub screen: ScreenView,
}

/// Spell-correction dictionary collaborator; a pure word-for-word function.
pub trait SpellCorrector: Send + Sync {
    fn correct(&self, word: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSpellCorrector;

impl SpellCorrector for NoopSpellCorrector {
    fn correct(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Optional capability: notified when the quota signal arrives so the host
/// can raise a login/upgrade prompt. Hosts without one simply get the
/// `Limited` outcome.
#[async_trait]
pub trait QuotaSignal: Send + Sync {
    async fn quota_exhausted(&self);
}

/// Coordinates the generate-curriculum cycle as a linear pipeline:
/// validate -> request -> classify -> normalize -> validate -> render.
/// Single-flight per orchestrator; every exit path restores `Idle`.
pub struct RequestOrchestrator {
    backend: Arc<dyn GenerationBackend>,
    corrector: Arc<dyn SpellCorrector>,
    quota_signal: Option<Arc<dyn QuotaSignal>>,
    normalizer: CurriculumNormalizer,
    renderer: CurriculumRenderer,
    in_flight: AtomicBool,
}

impl RequestOrchestrator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            corrector: Arc::new(NoopSpellCorrector),
            quota_signal: None,
            normalizer: CurriculumNormalizer,
            renderer: CurriculumRenderer,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_spell_corrector(mut self, corrector: Arc<dyn SpellCorrector>) -> Self {
        self.corrector = corrector;
        self
    }

    pub fn with_quota_signal(mut self, signal: Arc<dyn QuotaSignal>) -> Self {
        self.quota_signal = Some(signal);
        self
    }

    pub fn state(&self) -> SubmitState {
        if self.in_flight.load(Ordering::SeqCst) {
            SubmitState::Submitting
        } else {
            SubmitState::Idle
        }
    }

    /// Trimmed, spell-corrected form of the skill input. Applied before
    /// submission and returned to the caller for redisplay.
    pub fn corrected_skill(&self, skill: &str) -> String {
        skill
            .split_whitespace()
            .map(|word| self.corrector.correct(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub async fn submit(&self, skill: &str, duration: &str, level: &str) -> SubmitOutcome {
        let corrected = self.corrected_skill(skill);
        if corrected.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::EmptySkill);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return SubmitOutcome::Rejected(RejectReason::AlreadySubmitting);
        }
        // Restores Idle on every exit path below, early returns included.
        let _guard = InFlightGuard {
            flag: &self.in_flight,
        };

        let request_id = Uuid::now_v7().to_string();
        let plan_length = PlanLength::from_duration(duration);
        let request = GenerateRequest {
            skill: corrected.clone(),
            duration: plan_length.canonical_label().to_string(),
            level: level.trim().to_string(),
        };
        if let Err(err) = request.validate() {
            return SubmitOutcome::Failed(validation_error(format!(
                "invalid generation request: {err}"
            )));
        }

        tracing::info!(
            target: "orchestrator",
            request_id = %request_id,
            skill = %corrected,
            duration = %request.duration,
            "submit_started"
        );

        let raw = match self.backend.generate(&request).await {
            Ok(raw) => raw,
            Err(err) if err.kind == ServiceErrorKind::QuotaExceeded => {
                if let Some(signal) = &self.quota_signal {
                    signal.quota_exhausted().await;
                }
                tracing::info!(target: "orchestrator", request_id = %request_id, "submit_limited");
                return SubmitOutcome::Limited;
            }
            Err(err) => {
                tracing::warn!(
                    target: "orchestrator",
                    request_id = %request_id,
                    error = %err,
                    "submit_failed"
                );
                return SubmitOutcome::Failed(err);
            }
        };

        // A malformed success response is a failure from this flow's point
        // of view, never a crash of the view.
        let model = match self.normalize_and_check(&raw) {
            Ok(model) => model,
            Err(err) => {
                tracing::warn!(
                    target: "orchestrator",
                    request_id = %request_id,
                    error = %err,
                    "submit_payload_malformed"
                );
                return SubmitOutcome::Failed(err);
            }
        };

        let screen = self.renderer.render_screen(&model, &corrected);
        tracing::info!(
            target: "orchestrator",
            request_id = %request_id,
            phases = model.phases.len(),
            "submit_succeeded"
        );

        SubmitOutcome::Success(GeneratedPlan {
            request_id,
            skill: corrected,
            duration: request.duration,
            level: request.level,
            model,
            screen,
        })
    }

    fn normalize_and_check(&self, raw: &serde_json::Value) -> Result<Curriculum, ServiceError> {
        let model = self
            .normalizer
            .normalize(raw)
            .map_err(|err| malformed_payload(err.message))?;
        schema::validate_document(&model).map_err(|err| malformed_payload(err.message))?;
        Ok(model)
    }
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
