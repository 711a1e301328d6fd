use crate::signer::Signer;
use command_handler::{Command, TodoCommandHandler};
use domain::{OwnerId, ProgramId, RecordAddress, TaskId, TodoEvent};
use infrastructure::{AccountRepository, EventRepository};
use query_handler::{TodoQueryHandler, TodoView};
use serde::{Deserialize, Serialize};
use shared::{AppError, Config};
use tracing::info;

/// コマンド送信の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// トランザクション識別子（イベントIDと同じ ULID）
    pub signature: String,
    pub address: RecordAddress,
    pub event: TodoEvent,
}

/// コマンド送信と状態取得をまとめたクライアント
#[derive(Clone)]
pub struct TodoClient {
    commands: TodoCommandHandler,
    queries: TodoQueryHandler,
    program_id: ProgramId,
}

impl TodoClient {
    pub fn new(config: &Config) -> Self {
        Self::with_repositories(
            AccountRepository::new(config.program_id),
            EventRepository::new(),
        )
    }

    /// 既存のストアを共有するクライアントを作る
    pub fn with_repositories(accounts: AccountRepository, events: EventRepository) -> Self {
        let program_id = *accounts.program_id();
        Self {
            commands: TodoCommandHandler::new(accounts.clone(), events.clone()),
            queries: TodoQueryHandler::new(accounts, events),
            program_id,
        }
    }

    pub fn program_id(&self) -> &ProgramId {
        &self.program_id
    }

    /// (owner, task_id) のアカウントアドレスを導出
    pub fn todo_address(&self, owner: &OwnerId, task_id: TaskId) -> RecordAddress {
        RecordAddress::derive(&self.program_id, owner, task_id)
    }

    /// コマンドを送信し、完了まで待つ
    pub async fn send(&self, command: Command) -> Result<TransactionReceipt, AppError> {
        let name = command.name();
        let outcome = self.commands.execute(command).await?;
        let receipt = TransactionReceipt {
            signature: outcome.event.event_id().to_string(),
            address: outcome.address,
            event: outcome.event,
        };

        info!(command = name, signature = %receipt.signature, "トランザクション確定");
        Ok(receipt)
    }

    pub async fn create_todo(
        &self,
        signer: &Signer,
        task_id: TaskId,
        description: impl Into<String>,
        due_date: i64,
    ) -> Result<TransactionReceipt, AppError> {
        self.send(Command::CreateTodo {
            signer: signer.pubkey().clone(),
            task_id,
            description: description.into(),
            due_date,
        })
        .await
    }

    pub async fn update_description(
        &self,
        signer: &Signer,
        owner: &OwnerId,
        task_id: TaskId,
        new_description: impl Into<String>,
    ) -> Result<TransactionReceipt, AppError> {
        self.send(Command::UpdateDescription {
            signer: signer.pubkey().clone(),
            owner: owner.clone(),
            task_id,
            new_description: new_description.into(),
        })
        .await
    }

    pub async fn toggle_completed(
        &self,
        signer: &Signer,
        owner: &OwnerId,
        task_id: TaskId,
    ) -> Result<TransactionReceipt, AppError> {
        self.send(Command::ToggleCompleted {
            signer: signer.pubkey().clone(),
            owner: owner.clone(),
            task_id,
        })
        .await
    }

    pub async fn delete_todo(
        &self,
        signer: &Signer,
        owner: &OwnerId,
        task_id: TaskId,
    ) -> Result<TransactionReceipt, AppError> {
        self.send(Command::DeleteTodo {
            signer: signer.pubkey().clone(),
            owner: owner.clone(),
            task_id,
        })
        .await
    }

    pub async fn fetch(&self, owner: &OwnerId, task_id: TaskId) -> Result<TodoView, AppError> {
        self.queries.fetch(owner, task_id).await
    }

    pub async fn history(&self, owner: &OwnerId, task_id: TaskId) -> Vec<TodoEvent> {
        self.queries.history(owner, task_id).await
    }
}
