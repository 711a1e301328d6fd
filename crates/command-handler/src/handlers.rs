use crate::commands::{Command, CommandOutcome};
use domain::{OwnerId, RecordAddress, TaskId, TodoError, TodoEvent, TodoRecord};
use infrastructure::{AccountRepository, EventRepository};
use shared::AppError;
use tracing::{info, instrument, warn};

/// 所有者チェック付きのコマンドハンドラー
#[derive(Clone)]
pub struct TodoCommandHandler {
    accounts: AccountRepository,
    events: EventRepository,
}

impl TodoCommandHandler {
    pub fn new(accounts: AccountRepository, events: EventRepository) -> Self {
        Self { accounts, events }
    }

    pub fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    pub fn events(&self) -> &EventRepository {
        &self.events
    }

    /// コマンドを種類に応じて実行
    pub async fn execute(&self, command: Command) -> Result<CommandOutcome, AppError> {
        match command {
            Command::CreateTodo {
                signer,
                task_id,
                description,
                due_date,
            } => {
                self.create_todo(&signer, task_id, description, due_date)
                    .await
            }
            Command::UpdateDescription {
                signer,
                owner,
                task_id,
                new_description,
            } => {
                self.update_description(&signer, &owner, task_id, new_description)
                    .await
            }
            Command::ToggleCompleted {
                signer,
                owner,
                task_id,
            } => self.toggle_completed(&signer, &owner, task_id).await,
            Command::DeleteTodo {
                signer,
                owner,
                task_id,
            } => self.delete_todo(&signer, &owner, task_id).await,
        }
    }

    /// ToDo を作成する。署名者が所有者になる
    #[instrument(skip_all, fields(signer = %signer, task_id = %task_id))]
    pub async fn create_todo(
        &self,
        signer: &OwnerId,
        task_id: TaskId,
        description: String,
        due_date: i64,
    ) -> Result<CommandOutcome, AppError> {
        let record = TodoRecord::new(signer.clone(), task_id, description.clone(), due_date);
        let address = self.accounts.address(signer, task_id);

        let result = self
            .accounts
            .create_recorded(record, &self.events, |address| {
                TodoEvent::new_todo_created(address, signer.clone(), task_id, description, due_date)
            })
            .await;

        self.finish("create_todo", address, result)
    }

    /// 説明文を置き換える
    #[instrument(skip_all, fields(signer = %signer, owner = %owner, task_id = %task_id))]
    pub async fn update_description(
        &self,
        signer: &OwnerId,
        owner: &OwnerId,
        task_id: TaskId,
        new_description: String,
    ) -> Result<CommandOutcome, AppError> {
        let address = self.accounts.address(owner, task_id);

        let result = self
            .accounts
            .modify_recorded(&address, &self.events, |record| {
                record.ensure_owner(signer, &address)?;
                let event = TodoEvent::new_description_updated(
                    address,
                    signer.clone(),
                    record.description.clone(),
                    new_description,
                );
                record.apply(&event);
                Ok(event)
            })
            .await;

        self.finish("update_description", address, result)
    }

    /// 完了フラグを反転する
    #[instrument(skip_all, fields(signer = %signer, owner = %owner, task_id = %task_id))]
    pub async fn toggle_completed(
        &self,
        signer: &OwnerId,
        owner: &OwnerId,
        task_id: TaskId,
    ) -> Result<CommandOutcome, AppError> {
        let address = self.accounts.address(owner, task_id);

        let result = self
            .accounts
            .modify_recorded(&address, &self.events, |record| {
                record.ensure_owner(signer, &address)?;
                let event =
                    TodoEvent::new_completion_toggled(address, signer.clone(), !record.completed);
                record.apply(&event);
                Ok(event)
            })
            .await;

        self.finish("toggle_completed", address, result)
    }

    /// アカウントを削除する
    #[instrument(skip_all, fields(signer = %signer, owner = %owner, task_id = %task_id))]
    pub async fn delete_todo(
        &self,
        signer: &OwnerId,
        owner: &OwnerId,
        task_id: TaskId,
    ) -> Result<CommandOutcome, AppError> {
        let address = self.accounts.address(owner, task_id);

        let result = self
            .accounts
            .remove_recorded(&address, &self.events, |record| {
                record.ensure_owner(signer, &address)?;
                Ok(TodoEvent::new_todo_deleted(address, signer.clone()))
            })
            .await;

        self.finish("delete_todo", address, result)
    }

    /// 実行結果をログに出す。イベントはリポジトリがロック内で記録済み
    fn finish(
        &self,
        command: &'static str,
        address: RecordAddress,
        result: Result<TodoEvent, TodoError>,
    ) -> Result<CommandOutcome, AppError> {
        match result {
            Ok(event) => {
                info!(
                    command,
                    %address,
                    event_id = event.event_id(),
                    "コマンド実行完了"
                );
                Ok(CommandOutcome { address, event })
            }
            Err(e) => {
                warn!(command, %address, error = %e, "コマンド実行失敗");
                Err(e.into())
            }
        }
    }
}
