use crate::responses::TodoView;
use domain::{OwnerId, TaskId, TodoEvent};
use infrastructure::{AccountRepository, EventRepository};
use shared::AppError;
use tracing::{debug, instrument};

/// 読み取り専用のクエリハンドラー
#[derive(Clone)]
pub struct TodoQueryHandler {
    accounts: AccountRepository,
    events: EventRepository,
}

impl TodoQueryHandler {
    pub fn new(accounts: AccountRepository, events: EventRepository) -> Self {
        Self { accounts, events }
    }

    /// (owner, task_id) のアカウントを取得
    #[instrument(skip_all, fields(owner = %owner, task_id = %task_id))]
    pub async fn fetch(&self, owner: &OwnerId, task_id: TaskId) -> Result<TodoView, AppError> {
        let address = self.accounts.address(owner, task_id);
        let record = self.accounts.get_by_address(&address).await?;

        debug!(%address, completed = record.completed, "アカウント取得");
        Ok(TodoView::from_record(address, record))
    }

    /// アカウントのイベント履歴（削除済みでも取得できる）
    pub async fn history(&self, owner: &OwnerId, task_id: TaskId) -> Vec<TodoEvent> {
        let address = self.accounts.address(owner, task_id);
        self.events.events_for(&address).await
    }
}
