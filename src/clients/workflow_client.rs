use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::framework::{FrameworkError, MachineClient};
use crate::model::UserId;
use crate::workflow::{Workflow, WorkflowEvent, WorkflowView};

/// Client for driving the scanner workflow actor.
///
/// Each method sends one operator input and returns the view right after it was applied.
#[derive(Clone)]
pub struct WorkflowClient {
    inner: MachineClient<Workflow>,
}

impl WorkflowClient {
    pub fn new(inner: MachineClient<Workflow>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn dispatch(&self, event: WorkflowEvent) -> Result<WorkflowView, FrameworkError> {
        debug!("Sending request");
        self.inner.dispatch(event).await
    }

    pub async fn view(&self) -> Result<WorkflowView, FrameworkError> {
        self.inner.snapshot().await
    }

    /// Waits until the published view satisfies `predicate`.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&WorkflowView) -> bool,
    ) -> Result<WorkflowView, FrameworkError> {
        self.inner.wait_for(predicate).await
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowView> {
        self.inner.subscribe()
    }

    pub async fn select_user(&self, id: UserId) -> Result<WorkflowView, FrameworkError> {
        self.dispatch(WorkflowEvent::HighlightUser(Some(id))).await?;
        self.dispatch(WorkflowEvent::ConfirmUser).await
    }

    pub async fn open_scanner(&self) -> Result<WorkflowView, FrameworkError> {
        self.dispatch(WorkflowEvent::OpenScanner).await
    }

    pub async fn close_scanner(&self) -> Result<WorkflowView, FrameworkError> {
        self.dispatch(WorkflowEvent::CloseScanner).await
    }

    /// Feeds decoded scan text, as the camera surface would.
    pub async fn scan(&self, payload: impl Into<String>) -> Result<WorkflowView, FrameworkError> {
        self.dispatch(WorkflowEvent::Scanned(payload.into())).await
    }

    pub async fn enter_quantity(
        &self,
        text: impl Into<String>,
    ) -> Result<WorkflowView, FrameworkError> {
        self.dispatch(WorkflowEvent::EnterQuantity(text.into())).await
    }

    /// Confirms and commits the current edit in one go.
    pub async fn confirm_and_commit(&self) -> Result<WorkflowView, FrameworkError> {
        self.dispatch(WorkflowEvent::RequestConfirm).await?;
        self.dispatch(WorkflowEvent::Commit).await
    }

    pub async fn acknowledge(&self) -> Result<WorkflowView, FrameworkError> {
        self.dispatch(WorkflowEvent::Acknowledge).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_dispatch, expect_snapshot};
    use crate::model::{PermissionState, User};
    use crate::workflow::Screen;

    fn view(screen: Screen) -> WorkflowView {
        WorkflowView {
            screen,
            permission: PermissionState::Granted,
            notice: None,
            queued_notices: 0,
            generation: 0,
        }
    }

    #[tokio::test]
    async fn test_select_user_highlights_then_confirms() {
        let (mock, mut receiver) = create_mock_client::<Workflow>(10, view(Screen::Loading));
        let client = WorkflowClient::new(mock);

        let handle = tokio::spawn(async move { client.select_user(UserId(1)).await });

        let (event, respond_to) = expect_dispatch(&mut receiver).await.unwrap();
        assert!(matches!(event, WorkflowEvent::HighlightUser(Some(UserId(1)))));
        respond_to
            .send(Ok(view(Screen::UserSelect {
                users: vec![User::new(1, "ana")],
                highlighted: Some(UserId(1)),
            })))
            .unwrap();

        let (event, respond_to) = expect_dispatch(&mut receiver).await.unwrap();
        assert!(matches!(event, WorkflowEvent::ConfirmUser));
        let ready = view(Screen::ScanReady {
            operator: User::new(1, "ana"),
        });
        respond_to.send(Ok(ready.clone())).unwrap();

        assert_eq!(handle.await.unwrap().unwrap(), ready);
    }

    #[tokio::test]
    async fn test_scan_sends_payload() {
        let (mock, mut receiver) = create_mock_client::<Workflow>(10, view(Screen::Loading));
        let client = WorkflowClient::new(mock);

        let handle = tokio::spawn(async move { client.scan("https://10.0.0.5/api/products/7").await });

        let (event, respond_to) = expect_dispatch(&mut receiver).await.unwrap();
        assert!(
            matches!(event, WorkflowEvent::Scanned(ref p) if p == "https://10.0.0.5/api/products/7")
        );
        respond_to.send(Err(FrameworkError::ActorDropped)).unwrap();

        assert_eq!(handle.await.unwrap(), Err(FrameworkError::ActorDropped));
    }

    #[tokio::test]
    async fn test_view_reads_snapshot() {
        let (mock, mut receiver) = create_mock_client::<Workflow>(10, view(Screen::Loading));
        let client = WorkflowClient::new(mock);

        let handle = tokio::spawn(async move { client.view().await });
        let respond_to = expect_snapshot(&mut receiver).await.unwrap();
        respond_to.send(Ok(view(Screen::Loading))).unwrap();

        assert_eq!(handle.await.unwrap().unwrap().screen, Screen::Loading);
    }

    #[tokio::test]
    async fn test_closed_actor() {
        let (mock, receiver) = create_mock_client::<Workflow>(10, view(Screen::Loading));
        drop(receiver);

        let result = WorkflowClient::new(mock).acknowledge().await;
        assert_eq!(result, Err(FrameworkError::ActorClosed));
    }
}
