//! GovernanceLoop: drives perceive → decide → gate → execute cycles.
//!
//! `tick` runs a full cycle over the whole corpus. Event hooks run a narrower
//! cycle scoped to the assets the event names. All entry points share the
//! guard in [`GovernanceState`], so at most one cycle runs at a time.
//!
//! A cycle checks its deadline and cancellation before each stage. Stage
//! outputs are only consumed once complete, so an aborted cycle executes
//! nothing and records nothing.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use steward_agent::{
    ActionExecutor, ApprovalGate, DecisionEngine, ExecutionMode, SignalAggregator, SignalSelection,
};
use steward_core::config::DaemonConfig;
use steward_core::errors::CycleError;
use steward_core::traits::{IAlertSink, ICorpus};
use steward_core::{
    ActionPlan, Asset, DuplicateReport, ExecutionResult, ExecutionStatus, Severity, StewardConfig,
};
use steward_dedup::DeduplicationPipeline;
use steward_observability::tracing_setup::events;
use steward_signals::{FreshnessPolicySet, MetadataQualityProvider, RuleRegistry};

use crate::cancellation::CancellationToken;
use crate::deadline::StageDeadline;
use crate::state::{CycleRecord, GovernanceState, HealthTrend};
use crate::triggers::{evaluate_triggers, RunTrigger, TriggerSignals};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Result of one completed cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub trigger: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub full_corpus: bool,
    /// Assets the signals were pulled for.
    pub assets_considered: usize,
    pub duplicates: DuplicateReport,
    pub health_score: f64,
    pub degraded_signals: Vec<String>,
    pub plan: ActionPlan,
    /// Decisions left for human approval, in plan order.
    pub held_decision_ids: Vec<String>,
    pub results: Vec<ExecutionResult>,
}

impl CycleReport {
    pub fn executed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, ExecutionStatus::Success | ExecutionStatus::Partial))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == ExecutionStatus::Failed)
            .count()
    }

    pub fn summary(&self) -> String {
        format!(
            "Cycle {} ({} assets, health {:.2}): {} decisions, {} executed, {} failed, {} held, {} suppressed",
            self.trigger,
            self.assets_considered,
            self.health_score,
            self.plan.decisions().len(),
            self.executed_count(),
            self.failed_count(),
            self.held_decision_ids.len(),
            self.plan.suppressed_decision_ids().len()
        )
    }

    pub fn to_structured_output(&self) -> serde_json::Value {
        json!({
            "trigger": self.trigger,
            "started_at": self.started_at.to_rfc3339(),
            "elapsed_ms": self.elapsed_ms,
            "full_corpus": self.full_corpus,
            "assets_considered": self.assets_considered,
            "health_score": self.health_score,
            "degraded_signals": self.degraded_signals,
            "duplicates": {
                "clusters": self.duplicates.clusters.len(),
                "total_duplicate_count": self.duplicates.total_duplicate_count,
                "excluded": self.duplicates.excluded.len(),
            },
            "plan": self.plan.to_structured_output(),
            "held": self.held_decision_ids,
            "results": self.results,
        })
    }

    fn record(&self) -> CycleRecord {
        CycleRecord {
            trigger: self.trigger.clone(),
            started_at: self.started_at,
            elapsed_ms: self.elapsed_ms,
            full_corpus: self.full_corpus,
            health_score: self.health_score,
            decisions: self.plan.decisions().len(),
            executed: self.executed_count(),
            failed: self.failed_count(),
            held: self.held_decision_ids.len(),
            suppressed: self.plan.suppressed_decision_ids().len(),
            degraded_signals: self.degraded_signals.clone(),
        }
    }
}

/// Why a search hit was withheld.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FilterReason {
    Missing,
    Quarantined,
    LowQuality { score: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredHit {
    pub asset_id: String,
    #[serde(flatten)]
    pub reason: FilterReason,
}

/// Search hits after the quality gate, plus the validation cycle over them.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    /// Surviving hits in their original order.
    pub passed: Vec<String>,
    pub filtered: Vec<FilteredHit>,
    pub cycle: CycleReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct GovernanceStatus {
    pub running: bool,
    pub last_cycle: Option<CycleRecord>,
    pub trend: HealthTrend,
    pub cycles_recorded: usize,
    pub suppression_entries: usize,
    pub pending_triggers: Vec<RunTrigger>,
}

/// What one cycle covers.
struct CycleScope<'a> {
    trigger: &'a str,
    /// `None` means the whole corpus.
    focus: Option<BTreeSet<String>>,
    dedup: bool,
    selection: SignalSelection,
    budget: Duration,
}

pub struct GovernanceLoop {
    corpus: Arc<dyn ICorpus>,
    signals: SignalAggregator,
    alerts: Arc<dyn IAlertSink>,
    pipeline: DeduplicationPipeline,
    engine: DecisionEngine,
    gate: ApprovalGate,
    executor: ActionExecutor,
    config: DaemonConfig,
    clock: Clock,
}

impl GovernanceLoop {
    pub fn new(
        corpus: Arc<dyn ICorpus>,
        signals: SignalAggregator,
        alerts: Arc<dyn IAlertSink>,
        config: &StewardConfig,
    ) -> Self {
        Self {
            executor: ActionExecutor::new(corpus.clone(), alerts.clone()),
            corpus,
            signals,
            alerts,
            pipeline: DeduplicationPipeline::new(&config.dedup),
            engine: DecisionEngine::new(config.decision.clone()),
            gate: ApprovalGate,
            config: config.daemon.clone(),
            clock: Arc::new(Utc::now),
        }
    }

    /// Wire the reference providers: metadata quality, per-source freshness
    /// policies and the built-in validation rules.
    pub fn with_reference_signals(
        corpus: Arc<dyn ICorpus>,
        alerts: Arc<dyn IAlertSink>,
        config: &StewardConfig,
    ) -> Self {
        let signals = SignalAggregator::new(
            Arc::new(MetadataQualityProvider),
            Arc::new(FreshnessPolicySet::from_config(&config.freshness)),
            Arc::new(RuleRegistry::with_builtin(&config.validation)),
        );
        Self::new(corpus, signals, alerts, config)
    }

    /// Replace the wall clock, e.g. to evaluate freshness at a fixed instant.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn config(&self) -> &DaemonConfig {
        &self.config
    }

    /// Full cycle over the whole corpus, executing auto-approved decisions only.
    pub fn tick(&self, state: &GovernanceState) -> Result<CycleReport, CycleError> {
        let never = CancellationToken::new();
        self.run_cycle(
            state,
            CycleScope {
                trigger: "tick",
                focus: None,
                dedup: true,
                selection: SignalSelection::ALL,
                budget: Duration::from_millis(self.config.tick_timeout_ms),
            },
            &never,
        )
    }

    /// Newly ingested assets: dedup against the whole corpus, then quality
    /// and validation for the new assets only.
    pub fn on_ingest(
        &self,
        state: &GovernanceState,
        asset_ids: &[String],
        cancel: &CancellationToken,
    ) -> Result<CycleReport, CycleError> {
        self.run_cycle(state, self.event_scope("ingest", asset_ids, true, SignalSelection::INGEST), cancel)
    }

    /// Refreshed web-cache entries: freshness and validation, no dedup.
    pub fn on_web_cache(
        &self,
        state: &GovernanceState,
        asset_ids: &[String],
        cancel: &CancellationToken,
    ) -> Result<CycleReport, CycleError> {
        self.run_cycle(
            state,
            self.event_scope("web_cache", asset_ids, false, SignalSelection::WEB_CACHE),
            cancel,
        )
    }

    /// Validate the hits, then withhold any that are missing, quarantined or
    /// below `search_min_quality`.
    pub fn on_search(
        &self,
        state: &GovernanceState,
        query: &str,
        hits: &[String],
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, CycleError> {
        let cycle = self.run_cycle(
            state,
            self.event_scope("search", hits, false, SignalSelection::VALIDATION_ONLY),
            cancel,
        )?;
        let (passed, filtered) = self.quality_gate(hits);
        tracing::debug!(
            query,
            hits = hits.len(),
            passed = passed.len(),
            "search hits gated"
        );
        Ok(SearchOutcome {
            query: query.to_string(),
            passed,
            filtered,
            cycle,
        })
    }

    /// Trigger reasons for the background loop at the current clock.
    pub fn should_run(&self, state: &GovernanceState) -> Vec<RunTrigger> {
        let last = state.last_full_cycle();
        let signals = TriggerSignals {
            last_run: last.as_ref().map(|r| r.started_at),
            last_health: last.as_ref().map(|r| r.health_score),
            now: (self.clock)(),
        };
        evaluate_triggers(&signals, &self.config)
    }

    pub fn status(&self, state: &GovernanceState) -> GovernanceStatus {
        GovernanceStatus {
            running: state.is_running(),
            last_cycle: state.last_cycle(),
            trend: state.trend(),
            cycles_recorded: state.history().len(),
            suppression_entries: state.suppression_entries(),
            pending_triggers: self.should_run(state),
        }
    }

    fn event_scope<'a>(
        &self,
        trigger: &'a str,
        asset_ids: &[String],
        dedup: bool,
        selection: SignalSelection,
    ) -> CycleScope<'a> {
        CycleScope {
            trigger,
            focus: Some(asset_ids.iter().cloned().collect()),
            dedup,
            selection,
            budget: Duration::from_millis(self.config.event_timeout_ms),
        }
    }

    fn run_cycle(
        &self,
        state: &GovernanceState,
        scope: CycleScope<'_>,
        cancel: &CancellationToken,
    ) -> Result<CycleReport, CycleError> {
        let _guard = state.try_begin().ok_or(CycleError::InProgress)?;
        let span = steward_observability::cycle_span!(scope.trigger);
        let _entered = span.enter();

        events::cycle_started(scope.trigger, scope.focus.as_ref().map(BTreeSet::len));
        let deadline = StageDeadline::new(scope.budget, cancel);
        let result = self.run_stages(state, &scope, &deadline);
        if let Err(e @ (CycleError::Timeout { stage, .. } | CycleError::Cancelled { stage })) = &result {
            events::cycle_aborted(scope.trigger, stage, &e.to_string());
        }
        result
    }

    fn run_stages(
        &self,
        state: &GovernanceState,
        scope: &CycleScope<'_>,
        deadline: &StageDeadline<'_>,
    ) -> Result<CycleReport, CycleError> {
        let started_at = (self.clock)();
        let mut degraded = Vec::new();

        deadline.check("load")?;
        let (population, scoped) = self.load(scope, &mut degraded);
        let scoped_assets: &[Asset] = scoped.as_deref().unwrap_or(&population);

        deadline.check("dedup")?;
        let duplicates = match (&scope.focus, scope.dedup) {
            (_, false) => DuplicateReport::empty(),
            (None, true) => self.pipeline.run(&population),
            (Some(focus), true) => self.pipeline.run_for(&population, focus),
        };
        if scope.dedup {
            events::duplicates_detected(&duplicates);
        }

        deadline.check("perceive")?;
        let snapshot = self
            .signals
            .perceive(duplicates, scoped_assets, scope.selection, started_at);
        degraded.extend(snapshot.degraded_signals().iter().cloned());

        deadline.check("decide")?;
        let plan = state.with_memory(|memory| self.engine.decide(&snapshot, memory, scope.trigger, started_at));

        deadline.check("execute")?;
        let admission = self.gate.admit(&plan, &ExecutionMode::AutoOnly);
        for decision in plan.decisions().iter().filter(|d| d.severity() == Severity::High) {
            self.alerts.notify(decision, decision.severity());
            events::alert_dispatched(decision);
        }
        for decision in &admission.held {
            events::decision_held(decision);
        }
        let results = self.executor.execute(&admission.admitted);
        for result in &results {
            events::decision_executed(result);
        }

        state.with_memory(|memory| memory.remember(&plan, &results, started_at));

        let report = CycleReport {
            trigger: scope.trigger.to_string(),
            started_at,
            elapsed_ms: deadline.elapsed_ms(),
            full_corpus: scope.focus.is_none(),
            assets_considered: scoped_assets.len(),
            duplicates: snapshot.duplicates().clone(),
            health_score: snapshot.health_score(),
            degraded_signals: degraded,
            held_decision_ids: admission.held.iter().map(|d| d.id().to_string()).collect(),
            plan,
            results,
        };
        state.record(report.record());
        events::cycle_completed(
            scope.trigger,
            report.plan.decisions().len(),
            report.executed_count(),
            report.held_decision_ids.len(),
            report.health_score,
            report.elapsed_ms,
        );
        Ok(report)
    }

    /// `(population, scoped)`: dedup runs over the population, signals over
    /// `scoped` (`None` means the population itself). A corpus failure leaves
    /// both empty and marks the corpus degraded.
    fn load(&self, scope: &CycleScope<'_>, degraded: &mut Vec<String>) -> (Vec<Asset>, Option<Vec<Asset>>) {
        let fetched = match (&scope.focus, scope.dedup) {
            (None, _) => self.corpus.list_assets().map(|all| (all, None)),
            (Some(focus), true) => self.corpus.list_assets().map(|all| {
                let scoped = all.iter().filter(|a| focus.contains(&a.id)).cloned().collect();
                (all, Some(scoped))
            }),
            (Some(focus), false) => {
                let ids: Vec<String> = focus.iter().cloned().collect();
                self.corpus.get_assets(&ids).map(|found| (Vec::new(), Some(found)))
            }
        };
        fetched.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "corpus unavailable, cycle runs on an empty snapshot");
            degraded.push("corpus".to_string());
            (Vec::new(), Some(Vec::new()))
        })
    }

    fn quality_gate(&self, hits: &[String]) -> (Vec<String>, Vec<FilteredHit>) {
        let assets = match self.corpus.get_assets(hits) {
            Ok(assets) => assets,
            Err(e) => {
                tracing::warn!(error = %e, "corpus unavailable, search hits pass ungated");
                return (hits.to_vec(), Vec::new());
            }
        };
        let scores = self.signals.quality_provider().score(&assets).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "quality provider failed, using metadata scores");
            Default::default()
        });

        let mut passed = Vec::new();
        let mut filtered = Vec::new();
        for id in hits {
            let reason = match assets.iter().find(|a| &a.id == id) {
                None => Some(FilterReason::Missing),
                Some(asset) if asset.is_quarantined() => Some(FilterReason::Quarantined),
                Some(asset) => {
                    let score = scores
                        .score_of(id)
                        .or_else(|| asset.metadata_quality_score())
                        .unwrap_or(1.0);
                    (score < self.config.search_min_quality).then_some(FilterReason::LowQuality { score })
                }
            };
            match reason {
                Some(reason) => filtered.push(FilteredHit {
                    asset_id: id.clone(),
                    reason,
                }),
                None => passed.push(id.clone()),
            }
        }
        (passed, filtered)
    }
}
