use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::clients::{InventoryService, PermissionGate, ServiceError};
use crate::framework::StateMachine;
use crate::model::{PendingEdit, PermissionState, User, UserId};
use crate::resolver::{Resolution, ScanResolutionError, ScanResolver};

use super::error::WorkflowError;
use super::events::{Effect, WorkflowEvent};
use super::state::{Notice, Screen, WorkflowView};

/// Services the workflow's effects run against.
#[derive(Clone)]
pub struct Services {
    pub inventory: Arc<dyn InventoryService>,
    pub gate: PermissionGate,
    pub resolver: Arc<dyn ScanResolver>,
}

/// The scanner session: one operator, one screen, at most one pending edit.
#[derive(Debug, Default)]
pub struct Workflow {
    screen: Screen,
    permission: PermissionState,
    permission_settled: bool,
    users: Option<Vec<User>>,
    generation: u64,
    notices: VecDeque<Notice>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Every screen change starts a new generation.
    fn enter(&mut self, screen: Screen) {
        self.generation += 1;
        debug!(
            from = self.screen.name(),
            to = screen.name(),
            generation = self.generation,
            "Screen change"
        );
        self.screen = screen;
    }

    fn raise(&mut self, notice: Notice) {
        match &notice {
            Notice::Failure(error) => warn!(?error, "Notice raised"),
            other => info!(notice = %other, "Notice raised"),
        }
        self.notices.push_back(notice);
    }

    fn ignore(&self, input: &str) -> Vec<Effect> {
        debug!(screen = self.screen.name(), input, "Ignored");
        Vec::new()
    }

    // --- Startup ---

    fn users_loaded(&mut self, result: Result<Vec<User>, ServiceError>) -> Vec<Effect> {
        if !matches!(self.screen, Screen::Loading) {
            return self.ignore("UsersLoaded");
        }
        match result {
            Ok(users) => {
                info!(count = users.len(), "User list loaded");
                self.users = Some(users);
                self.finish_startup();
            }
            Err(e) => {
                error!(error = %e, "User list could not be loaded");
                self.enter(Screen::Error {
                    message: "Error connecting to the server".to_string(),
                });
            }
        }
        Vec::new()
    }

    fn permission_settled(&mut self, state: PermissionState) -> Vec<Effect> {
        self.permission = state;
        self.permission_settled = true;
        self.finish_startup();
        Vec::new()
    }

    fn finish_startup(&mut self) {
        if !matches!(self.screen, Screen::Loading) || !self.permission_settled {
            return;
        }
        if let Some(users) = &self.users {
            let users = users.clone();
            self.enter(Screen::UserSelect {
                users,
                highlighted: None,
            });
        }
    }

    // --- Operator selection ---

    fn highlight_user(&mut self, id: Option<UserId>) -> Vec<Effect> {
        match &mut self.screen {
            Screen::UserSelect { highlighted, .. } => {
                *highlighted = id;
                Vec::new()
            }
            _ => self.ignore("HighlightUser"),
        }
    }

    fn confirm_user(&mut self) -> Vec<Effect> {
        let Screen::UserSelect { users, highlighted } = &self.screen else {
            return self.ignore("ConfirmUser");
        };
        let chosen = highlighted
            .and_then(|id| users.iter().find(|u| u.id == id))
            .cloned();

        match chosen {
            Some(operator) => {
                info!(id = %operator.id, username = %operator.username, "Operator selected");
                self.enter(Screen::ScanReady { operator });
            }
            None => self.raise(Notice::Failure(WorkflowError::Validation(
                "No user selected".to_string(),
            ))),
        }
        Vec::new()
    }

    // --- Scanning ---

    fn open_scanner(&mut self) -> Vec<Effect> {
        let Screen::ScanReady { operator } = &self.screen else {
            return self.ignore("OpenScanner");
        };
        match self.permission {
            PermissionState::Granted => {
                let operator = operator.clone();
                self.enter(Screen::Scanning {
                    operator,
                    scanned: false,
                });
            }
            PermissionState::Unknown => self.raise(Notice::Failure(WorkflowError::PermissionPending)),
            PermissionState::Denied => self.raise(Notice::Failure(WorkflowError::PermissionDenied)),
        }
        Vec::new()
    }

    fn close_scanner(&mut self) -> Vec<Effect> {
        let Screen::Scanning { operator, .. } = &self.screen else {
            return self.ignore("CloseScanner");
        };
        let operator = operator.clone();
        self.enter(Screen::ScanReady { operator });
        Vec::new()
    }

    fn scanned(&mut self, payload: String) -> Vec<Effect> {
        let generation = self.generation;
        let Screen::Scanning { scanned, .. } = &mut self.screen else {
            return self.ignore("Scanned");
        };
        if *scanned {
            debug!("Scan ignored, a resolution is already in flight");
            return Vec::new();
        }
        *scanned = true;

        info!(%payload, generation, "Resolving scan");
        vec![Effect::Resolve {
            generation,
            payload,
            users: self.users.clone().unwrap_or_default(),
        }]
    }

    fn scan_resolved(
        &mut self,
        generation: u64,
        outcome: Result<Resolution, ScanResolutionError>,
    ) -> Vec<Effect> {
        let operator = match &self.screen {
            Screen::Scanning {
                operator,
                scanned: true,
            } if generation == self.generation => operator.clone(),
            _ => {
                warn!(generation, current = self.generation, "Discarding stale scan resolution");
                return Vec::new();
            }
        };

        match outcome {
            Ok(Resolution::Product(scanned)) => {
                info!(
                    id = %scanned.record.id,
                    stock = scanned.record.stock_quantity,
                    endpoint = %scanned.source_endpoint,
                    "Product ready for review"
                );
                self.enter(Screen::Reviewing {
                    operator,
                    edit: PendingEdit::new(scanned),
                });
            }
            Ok(Resolution::User(user)) => {
                let greeting = format!("Now scanning as {}", user.username);
                self.enter(Screen::ScanReady { operator: user });
                self.raise(Notice::Info(greeting));
            }
            Err(e) => {
                self.enter(Screen::ScanReady { operator });
                self.raise(Notice::Failure(e.into()));
            }
        }
        Vec::new()
    }

    // --- Editing ---

    fn edit_quantity(&mut self, input: &str, apply: impl FnOnce(&mut PendingEdit) -> bool) -> Vec<Effect> {
        let Screen::Reviewing { edit, .. } = &mut self.screen else {
            return self.ignore(input);
        };
        if apply(edit) {
            debug!(draft = edit.draft_quantity, "Draft quantity changed");
        } else {
            self.raise(Notice::Failure(WorkflowError::Validation(
                "Quantity must be a whole number, 0 or greater".to_string(),
            )));
        }
        Vec::new()
    }

    fn request_confirm(&mut self) -> Vec<Effect> {
        let Screen::Reviewing { operator, edit } = &self.screen else {
            return self.ignore("RequestConfirm");
        };
        let (operator, edit) = (operator.clone(), edit.clone());
        self.enter(Screen::Confirming {
            operator,
            edit,
            committing: false,
        });
        Vec::new()
    }

    fn cancel_review(&mut self) -> Vec<Effect> {
        let Screen::Reviewing { operator, .. } = &self.screen else {
            return self.ignore("CancelReview");
        };
        let operator = operator.clone();
        info!("Edit discarded");
        self.enter(Screen::ScanReady { operator });
        Vec::new()
    }

    fn decline_commit(&mut self) -> Vec<Effect> {
        let Screen::Confirming {
            operator,
            edit,
            committing: false,
        } = &self.screen
        else {
            return self.ignore("DeclineCommit");
        };
        let (operator, edit) = (operator.clone(), edit.clone());
        self.enter(Screen::Reviewing { operator, edit });
        Vec::new()
    }

    // --- Commit ---

    fn commit(&mut self) -> Vec<Effect> {
        let generation = self.generation;
        let Screen::Confirming {
            operator,
            edit,
            committing,
        } = &mut self.screen
        else {
            return self.ignore("Commit");
        };
        if *committing {
            return Vec::new();
        }
        *committing = true;

        let update = edit.to_update(Some(operator.id));
        info!(
            endpoint = %update.endpoint,
            quantity = update.product.stock_quantity,
            acting_user = %operator.id,
            "Committing stock update"
        );
        vec![Effect::Commit { generation, update }]
    }

    fn commit_finished(&mut self, generation: u64, outcome: Result<(), ServiceError>) -> Vec<Effect> {
        let operator = match &self.screen {
            Screen::Confirming {
                operator,
                committing: true,
                ..
            } if generation == self.generation => operator.clone(),
            _ => {
                warn!(generation, current = self.generation, "Discarding stale commit result");
                return Vec::new();
            }
        };

        self.enter(Screen::ScanReady { operator });
        match outcome {
            Ok(()) => self.raise(Notice::Success("Quantity updated".to_string())),
            Err(e) => self.raise(Notice::Failure(e.into())),
        }
        Vec::new()
    }

    fn acknowledge(&mut self) -> Vec<Effect> {
        match self.notices.pop_front() {
            Some(notice) => debug!(%notice, remaining = self.notices.len(), "Notice acknowledged"),
            None => debug!("Nothing to acknowledge"),
        }
        Vec::new()
    }
}

#[async_trait]
impl StateMachine for Workflow {
    type Event = WorkflowEvent;
    type Effect = Effect;
    type Snapshot = WorkflowView;
    type Context = Services;

    fn on_start(&mut self) -> Vec<Effect> {
        vec![Effect::LoadUsers, Effect::RequestPermission]
    }

    fn handle(&mut self, event: WorkflowEvent) -> Vec<Effect> {
        if event.is_operator_input()
            && !matches!(event, WorkflowEvent::Acknowledge)
            && !self.notices.is_empty()
        {
            debug!(?event, "Input ignored until the notice is acknowledged");
            return Vec::new();
        }

        match event {
            WorkflowEvent::HighlightUser(id) => self.highlight_user(id),
            WorkflowEvent::ConfirmUser => self.confirm_user(),
            WorkflowEvent::OpenScanner => self.open_scanner(),
            WorkflowEvent::CloseScanner => self.close_scanner(),
            WorkflowEvent::Scanned(payload) => self.scanned(payload),
            WorkflowEvent::DecrementQuantity => self.edit_quantity("DecrementQuantity", |edit| {
                edit.decrement();
                true
            }),
            WorkflowEvent::IncrementQuantity => self.edit_quantity("IncrementQuantity", |edit| {
                edit.increment();
                true
            }),
            WorkflowEvent::EnterQuantity(text) => {
                self.edit_quantity("EnterQuantity", |edit| edit.enter(&text))
            }
            WorkflowEvent::RequestConfirm => self.request_confirm(),
            WorkflowEvent::CancelReview => self.cancel_review(),
            WorkflowEvent::Commit => self.commit(),
            WorkflowEvent::DeclineCommit => self.decline_commit(),
            WorkflowEvent::Acknowledge => self.acknowledge(),
            WorkflowEvent::UsersLoaded(result) => self.users_loaded(result),
            WorkflowEvent::PermissionSettled(state) => self.permission_settled(state),
            WorkflowEvent::ScanResolved {
                generation,
                outcome,
            } => self.scan_resolved(generation, outcome),
            WorkflowEvent::CommitFinished {
                generation,
                outcome,
            } => self.commit_finished(generation, outcome),
        }
    }

    fn snapshot(&self) -> WorkflowView {
        WorkflowView {
            screen: self.screen.clone(),
            permission: self.permission,
            notice: self.notices.front().cloned(),
            queued_notices: self.notices.len().saturating_sub(1),
            generation: self.generation,
        }
    }

    async fn perform(effect: Effect, ctx: Arc<Services>) -> Option<WorkflowEvent> {
        let event = match effect {
            Effect::LoadUsers => WorkflowEvent::UsersLoaded(ctx.inventory.list_users().await),
            Effect::RequestPermission => WorkflowEvent::PermissionSettled(ctx.gate.acquire().await),
            Effect::Resolve {
                generation,
                payload,
                users,
            } => WorkflowEvent::ScanResolved {
                generation,
                outcome: ctx.resolver.resolve(&payload, &users).await,
            },
            Effect::Commit { generation, update } => WorkflowEvent::CommitFinished {
                generation,
                outcome: ctx
                    .inventory
                    .update_product_at(&update.endpoint, &update.product, update.acting_user)
                    .await,
            },
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ScannedProduct};
    use url::Url;

    fn ana() -> User {
        User::new(1, "ana")
    }

    fn bolt() -> ScannedProduct {
        ScannedProduct::new(
            Product::new(7, "Bolt", 42),
            Url::parse("http://10.0.0.5/api/products/7").unwrap(),
        )
    }

    fn started(permission: PermissionState) -> Workflow {
        let mut workflow = Workflow::new();
        assert_eq!(
            workflow.on_start(),
            vec![Effect::LoadUsers, Effect::RequestPermission]
        );
        workflow.handle(WorkflowEvent::UsersLoaded(Ok(vec![ana(), User::new(2, "marko")])));
        workflow.handle(WorkflowEvent::PermissionSettled(permission));
        workflow
    }

    fn scan_ready(permission: PermissionState) -> Workflow {
        let mut workflow = started(permission);
        workflow.handle(WorkflowEvent::HighlightUser(Some(UserId(1))));
        workflow.handle(WorkflowEvent::ConfirmUser);
        workflow
    }

    fn reviewing() -> Workflow {
        let mut workflow = scan_ready(PermissionState::Granted);
        workflow.handle(WorkflowEvent::OpenScanner);
        let effects = workflow.handle(WorkflowEvent::Scanned("https://10.0.0.5/api/products/7".into()));
        let generation = resolve_generation(&effects);
        workflow.handle(WorkflowEvent::ScanResolved {
            generation,
            outcome: Ok(Resolution::Product(bolt())),
        });
        workflow
    }

    fn resolve_generation(effects: &[Effect]) -> u64 {
        match effects {
            [Effect::Resolve { generation, .. }] => *generation,
            other => panic!("Expected one Resolve effect, got {other:?}"),
        }
    }

    #[test]
    fn test_loading_waits_for_both_startup_results() {
        let mut workflow = Workflow::new();
        workflow.handle(WorkflowEvent::PermissionSettled(PermissionState::Granted));
        assert_eq!(workflow.screen(), &Screen::Loading);

        workflow.handle(WorkflowEvent::UsersLoaded(Ok(vec![ana()])));
        assert_eq!(
            workflow.screen(),
            &Screen::UserSelect {
                users: vec![ana()],
                highlighted: None
            }
        );
    }

    #[test]
    fn test_user_list_failure_is_terminal() {
        let mut workflow = Workflow::new();
        workflow.handle(WorkflowEvent::UsersLoaded(Err(ServiceError::Network(
            "connection refused".into(),
        ))));
        assert!(matches!(workflow.screen(), Screen::Error { .. }));

        workflow.handle(WorkflowEvent::PermissionSettled(PermissionState::Granted));
        workflow.handle(WorkflowEvent::ConfirmUser);
        assert!(matches!(workflow.screen(), Screen::Error { .. }));
    }

    #[test]
    fn test_selecting_ana_greets_her_on_scan_ready() {
        let workflow = scan_ready(PermissionState::Granted);
        assert_eq!(workflow.screen(), &Screen::ScanReady { operator: ana() });
    }

    #[test]
    fn test_confirm_without_user_stays_and_raises_validation() {
        let mut workflow = started(PermissionState::Granted);
        workflow.handle(WorkflowEvent::ConfirmUser);

        let view = workflow.snapshot();
        assert!(matches!(view.screen, Screen::UserSelect { .. }));
        assert!(matches!(
            view.notice,
            Some(Notice::Failure(WorkflowError::Validation(_)))
        ));
    }

    #[test]
    fn test_notice_blocks_input_until_acknowledged() {
        let mut workflow = started(PermissionState::Granted);
        workflow.handle(WorkflowEvent::ConfirmUser);

        workflow.handle(WorkflowEvent::HighlightUser(Some(UserId(1))));
        workflow.handle(WorkflowEvent::ConfirmUser);
        assert!(matches!(workflow.screen(), Screen::UserSelect { highlighted: None, .. }));

        workflow.handle(WorkflowEvent::Acknowledge);
        assert_eq!(workflow.snapshot().notice, None);
        workflow.handle(WorkflowEvent::HighlightUser(Some(UserId(1))));
        workflow.handle(WorkflowEvent::ConfirmUser);
        assert_eq!(workflow.screen(), &Screen::ScanReady { operator: ana() });
    }

    #[test]
    fn test_open_scanner_denied_never_scans() {
        let mut workflow = scan_ready(PermissionState::Denied);
        let effects = workflow.handle(WorkflowEvent::OpenScanner);

        assert!(effects.is_empty());
        assert_eq!(workflow.screen(), &Screen::ScanReady { operator: ana() });
        assert_eq!(
            workflow.snapshot().notice,
            Some(Notice::Failure(WorkflowError::PermissionDenied))
        );
    }

    #[test]
    fn test_open_scanner_with_unknown_permission_has_its_own_message() {
        let mut workflow = scan_ready(PermissionState::Unknown);
        workflow.handle(WorkflowEvent::OpenScanner);

        assert_eq!(workflow.screen(), &Screen::ScanReady { operator: ana() });
        assert_eq!(
            workflow.snapshot().notice,
            Some(Notice::Failure(WorkflowError::PermissionPending))
        );
    }

    #[test]
    fn test_one_resolution_per_scan_session() {
        let mut workflow = scan_ready(PermissionState::Granted);
        workflow.handle(WorkflowEvent::OpenScanner);

        let first = workflow.handle(WorkflowEvent::Scanned("10.0.0.5/api/products/7".into()));
        let second = workflow.handle(WorkflowEvent::Scanned("10.0.0.5/api/products/8".into()));

        assert_eq!(
            first,
            vec![Effect::Resolve {
                generation: workflow.generation(),
                payload: "10.0.0.5/api/products/7".into(),
                users: vec![ana(), User::new(2, "marko")],
            }]
        );
        assert!(second.is_empty());
    }

    #[test]
    fn test_resolution_after_cancel_is_discarded() {
        let mut workflow = scan_ready(PermissionState::Granted);
        workflow.handle(WorkflowEvent::OpenScanner);
        let effects = workflow.handle(WorkflowEvent::Scanned("10.0.0.5/api/products/7".into()));
        let generation = resolve_generation(&effects);

        workflow.handle(WorkflowEvent::CloseScanner);
        workflow.handle(WorkflowEvent::OpenScanner);
        workflow.handle(WorkflowEvent::ScanResolved {
            generation,
            outcome: Ok(Resolution::Product(bolt())),
        });

        assert_eq!(
            workflow.screen(),
            &Screen::Scanning {
                operator: ana(),
                scanned: false
            }
        );
    }

    #[test]
    fn test_failed_resolution_returns_to_scan_ready() {
        let mut workflow = scan_ready(PermissionState::Granted);
        workflow.handle(WorkflowEvent::OpenScanner);
        let effects = workflow.handle(WorkflowEvent::Scanned("garbage".into()));
        workflow.handle(WorkflowEvent::ScanResolved {
            generation: resolve_generation(&effects),
            outcome: Err(ScanResolutionError::Lookup(ServiceError::NotFound { status: 404 })),
        });

        let view = workflow.snapshot();
        assert_eq!(view.screen, Screen::ScanReady { operator: ana() });
        assert!(matches!(
            view.notice,
            Some(Notice::Failure(WorkflowError::ScanResolution(_)))
        ));
    }

    #[test]
    fn test_identity_resolution_switches_operator() {
        let mut workflow = scan_ready(PermissionState::Granted);
        workflow.handle(WorkflowEvent::OpenScanner);
        let effects = workflow.handle(WorkflowEvent::Scanned("marko".into()));
        workflow.handle(WorkflowEvent::ScanResolved {
            generation: resolve_generation(&effects),
            outcome: Ok(Resolution::User(User::new(2, "marko"))),
        });

        let view = workflow.snapshot();
        assert_eq!(
            view.screen,
            Screen::ScanReady {
                operator: User::new(2, "marko")
            }
        );
        assert!(matches!(view.notice, Some(Notice::Info(_))));
    }

    #[test]
    fn test_quantity_edits() {
        let mut workflow = reviewing();
        assert_eq!(workflow.snapshot().draft_quantity(), Some(42));

        for _ in 0..5 {
            workflow.handle(WorkflowEvent::DecrementQuantity);
        }
        assert_eq!(workflow.snapshot().draft_quantity(), Some(37));

        workflow.handle(WorkflowEvent::EnterQuantity("abc".into()));
        assert_eq!(workflow.snapshot().draft_quantity(), Some(37));
        assert!(workflow.snapshot().notice.is_some());
        workflow.handle(WorkflowEvent::Acknowledge);

        workflow.handle(WorkflowEvent::EnterQuantity(String::new()));
        assert_eq!(workflow.snapshot().draft_quantity(), Some(0));

        workflow.handle(WorkflowEvent::DecrementQuantity);
        assert_eq!(workflow.snapshot().draft_quantity(), Some(0));

        workflow.handle(WorkflowEvent::IncrementQuantity);
        assert_eq!(workflow.snapshot().draft_quantity(), Some(1));
    }

    #[test]
    fn test_cancel_review_discards_edit() {
        let mut workflow = reviewing();
        workflow.handle(WorkflowEvent::CancelReview);

        assert_eq!(workflow.screen(), &Screen::ScanReady { operator: ana() });
        assert_eq!(workflow.snapshot().draft_quantity(), None);
    }

    #[test]
    fn test_new_scan_replaces_previous_edit() {
        let mut workflow = reviewing();
        workflow.handle(WorkflowEvent::EnterQuantity("5".into()));
        workflow.handle(WorkflowEvent::CancelReview);

        workflow.handle(WorkflowEvent::OpenScanner);
        let effects = workflow.handle(WorkflowEvent::Scanned("10.0.0.5/api/products/7".into()));
        workflow.handle(WorkflowEvent::ScanResolved {
            generation: resolve_generation(&effects),
            outcome: Ok(Resolution::Product(bolt())),
        });

        assert_eq!(workflow.snapshot().draft_quantity(), Some(42));
    }

    #[test]
    fn test_decline_keeps_the_edit() {
        let mut workflow = reviewing();
        workflow.handle(WorkflowEvent::EnterQuantity("10".into()));
        workflow.handle(WorkflowEvent::RequestConfirm);
        assert!(matches!(
            workflow.screen(),
            Screen::Confirming {
                committing: false,
                ..
            }
        ));

        workflow.handle(WorkflowEvent::DeclineCommit);
        assert!(matches!(workflow.screen(), Screen::Reviewing { .. }));
        assert_eq!(workflow.snapshot().draft_quantity(), Some(10));
    }

    #[test]
    fn test_commit_sends_full_record_as_operator() {
        let mut workflow = reviewing();
        workflow.handle(WorkflowEvent::EnterQuantity("10".into()));
        workflow.handle(WorkflowEvent::RequestConfirm);
        let effects = workflow.handle(WorkflowEvent::Commit);

        let expected = Effect::Commit {
            generation: workflow.generation(),
            update: crate::model::StockUpdate {
                endpoint: Url::parse("http://10.0.0.5/api/products/7").unwrap(),
                product: Product::new(7, "Bolt", 10),
                acting_user: Some(UserId(1)),
            },
        };
        assert_eq!(effects, vec![expected]);
    }

    #[test]
    fn test_input_ignored_while_committing() {
        let mut workflow = reviewing();
        workflow.handle(WorkflowEvent::RequestConfirm);
        workflow.handle(WorkflowEvent::Commit);

        assert!(workflow.handle(WorkflowEvent::Commit).is_empty());
        workflow.handle(WorkflowEvent::DeclineCommit);
        workflow.handle(WorkflowEvent::DecrementQuantity);
        assert!(matches!(
            workflow.screen(),
            Screen::Confirming {
                committing: true,
                ..
            }
        ));
        assert_eq!(workflow.snapshot().draft_quantity(), Some(42));
    }

    #[test]
    fn test_commit_outcome_always_returns_to_scan_ready() {
        for (outcome, success) in [
            (Ok(()), true),
            (Err(ServiceError::Rejected { status: 500 }), false),
        ] {
            let mut workflow = reviewing();
            workflow.handle(WorkflowEvent::RequestConfirm);
            workflow.handle(WorkflowEvent::Commit);
            workflow.handle(WorkflowEvent::CommitFinished {
                generation: workflow.generation(),
                outcome,
            });

            let view = workflow.snapshot();
            assert_eq!(view.screen, Screen::ScanReady { operator: ana() });
            assert_eq!(view.draft_quantity(), None);
            assert_eq!(view.notice.map(|n| n.is_failure()), Some(!success));
        }
    }

    #[test]
    fn test_stale_commit_result_is_discarded() {
        let mut workflow = reviewing();
        workflow.handle(WorkflowEvent::RequestConfirm);
        workflow.handle(WorkflowEvent::Commit);
        let generation = workflow.generation();

        workflow.handle(WorkflowEvent::CommitFinished {
            generation: generation - 1,
            outcome: Ok(()),
        });
        assert!(matches!(workflow.screen(), Screen::Confirming { .. }));
        assert_eq!(workflow.snapshot().notice, None);
    }
}
