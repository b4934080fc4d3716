// gitgov-engine/src/context.rs
// ============================================================================
// Module: Task Transition Context
// Description: Resolves events and custom rules against the store bundle,
//              for a specific task transition request.
// Purpose: Give `gitgov-workflow`'s `authorize_transition` the store-backed
//          facts it has no way to look up itself (§4.8, §4.9).
// Dependencies: gitgov-core, gitgov-workflow, crate::stores
// ============================================================================

//! ## Overview
//! `gitgov-workflow` is deliberately store-free: it authorizes a transition
//! against plain data. This module supplies that data for one task at a
//! time, by querying the store bundle for the events
//! (`EVENT_FIRST_EXECUTION_CREATED`, ...) and custom rules
//! (`assignment_required`, `creator_only`) the default methodology
//! references.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::ActorId;
use gitgov_core::EntityType;
use gitgov_core::FeedbackStatus;
use gitgov_core::FeedbackType;
use gitgov_core::TaskId;
use gitgov_workflow::CustomRuleDef;
use gitgov_workflow::CustomRuleKind;
use gitgov_workflow::EVENT_BLOCKING_FEEDBACK_CREATED;
use gitgov_workflow::EVENT_CHANGELOG_CREATED;
use gitgov_workflow::EVENT_FIRST_EXECUTION_CREATED;
use gitgov_workflow::RULE_CREATOR_ONLY;
use gitgov_workflow::TransitionContext;

use crate::stores::Stores;

// ============================================================================
// SECTION: Context
// ============================================================================

/// A [`TransitionContext`] scoped to one task and the actor requesting its
/// transition.
pub struct TaskTransitionContext<'a> {
    /// The store bundle consulted for events and custom rules.
    stores: &'a Stores,
    /// The task being transitioned.
    task_id: &'a TaskId,
    /// The actor requesting the transition.
    requester: &'a ActorId,
}

impl<'a> TaskTransitionContext<'a> {
    /// Scopes a transition context to `task_id`, as requested by
    /// `requester`.
    #[must_use]
    pub const fn new(stores: &'a Stores, task_id: &'a TaskId, requester: &'a ActorId) -> Self {
        Self {
            stores,
            task_id,
            requester,
        }
    }

    /// Returns the `keyId` of the task's original signature, i.e. the actor
    /// who created it, or `None` when the task cannot be loaded.
    fn creator(&self) -> Option<String> {
        let envelope = self.stores.tasks.get(self.task_id.as_str()).ok().flatten()?;
        envelope.header.signatures.first().map(|signature| signature.key_id.clone())
    }

    /// Whether any execution record exists for this task.
    fn has_any_execution(&self) -> bool {
        let Ok(ids) = self.stores.executions.list() else {
            return false;
        };
        ids.iter().any(|id| {
            self.stores
                .executions
                .get(id)
                .ok()
                .flatten()
                .is_some_and(|envelope| envelope.payload.task_id == *self.task_id)
        })
    }

    /// Whether a changelog entry exists describing this task.
    fn has_changelog_entry(&self) -> bool {
        let Ok(ids) = self.stores.changelogs.list() else {
            return false;
        };
        ids.iter().any(|id| {
            self.stores.changelogs.get(id).ok().flatten().is_some_and(|envelope| {
                envelope.payload.entity_type == EntityType::Task && envelope.payload.entity_id == *self.task_id.as_str()
            })
        })
    }

    /// Whether an open blocking feedback record exists against this task.
    fn has_open_blocking_feedback(&self) -> bool {
        let Ok(ids) = self.stores.feedback.list() else {
            return false;
        };
        ids.iter().any(|id| {
            self.stores.feedback.get(id).ok().flatten().is_some_and(|envelope| {
                envelope.payload.entity_type == EntityType::Task
                    && envelope.payload.entity_id == *self.task_id.as_str()
                    && envelope.payload.kind == FeedbackType::Blocking
                    && envelope.payload.status == FeedbackStatus::Open
            })
        })
    }

    /// Whether an assignment feedback record exists for this task.
    fn has_assignment(&self) -> bool {
        let Ok(ids) = self.stores.feedback.list() else {
            return false;
        };
        ids.iter().any(|id| {
            self.stores.feedback.get(id).ok().flatten().is_some_and(|envelope| {
                envelope.payload.entity_type == EntityType::Task
                    && envelope.payload.entity_id == *self.task_id.as_str()
                    && envelope.payload.kind == FeedbackType::Assignment
            })
        })
    }
}

impl TransitionContext for TaskTransitionContext<'_> {
    fn event_occurred(&self, event: &str) -> bool {
        match event {
            EVENT_FIRST_EXECUTION_CREATED => self.has_any_execution(),
            EVENT_CHANGELOG_CREATED => self.has_changelog_entry(),
            EVENT_BLOCKING_FEEDBACK_CREATED => self.has_open_blocking_feedback(),
            _ => false,
        }
    }

    fn custom_rule_satisfied(&self, rule: &CustomRuleDef) -> bool {
        match rule.kind {
            CustomRuleKind::AssignmentRequired => self.has_assignment(),
            CustomRuleKind::Custom if rule.name == RULE_CREATOR_ONLY => {
                self.creator().as_deref() == Some(self.requester.as_str())
            }
            CustomRuleKind::SprintCapacity | CustomRuleKind::EpicComplexity | CustomRuleKind::Custom => false,
        }
    }
}
