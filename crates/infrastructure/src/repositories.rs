use domain::{OwnerId, ProgramId, RecordAddress, TaskId, TodoError, TodoEvent, TodoRecord};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// ToDo アカウントのストア
/// レコードは (owner, task_id) から導出したアドレスで保持する
#[derive(Clone, Default)]
pub struct AccountRepository {
    program_id: ProgramId,
    accounts: Arc<RwLock<HashMap<RecordAddress, TodoRecord>>>,
}

impl AccountRepository {
    pub fn new(program_id: ProgramId) -> Self {
        Self {
            program_id,
            accounts: Arc::default(),
        }
    }

    pub fn program_id(&self) -> &ProgramId {
        &self.program_id
    }

    pub fn address(&self, owner: &OwnerId, task_id: TaskId) -> RecordAddress {
        RecordAddress::derive(&self.program_id, owner, task_id)
    }

    /// 新しいアカウントを作成
    /// 同じアドレスに生存中のレコードがあれば AlreadyExists
    pub async fn create(&self, record: TodoRecord) -> Result<RecordAddress, TodoError> {
        let address = record.address(&self.program_id);
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&address) {
            return Err(TodoError::AlreadyExists(address.to_string()));
        }

        debug!(%address, owner = %record.owner, task_id = %record.task_id, "アカウント作成");
        accounts.insert(address, record);
        Ok(address)
    }

    pub async fn get(&self, owner: &OwnerId, task_id: TaskId) -> Result<TodoRecord, TodoError> {
        self.get_by_address(&self.address(owner, task_id)).await
    }

    pub async fn get_by_address(&self, address: &RecordAddress) -> Result<TodoRecord, TodoError> {
        self.accounts
            .read()
            .await
            .get(address)
            .cloned()
            .ok_or_else(|| TodoError::NotFound(address.to_string()))
    }

    /// 書き込みロックを保持したままレコードを変更する
    /// クロージャがエラーを返した場合レコードは変更されない
    pub async fn modify<F, T>(&self, address: &RecordAddress, f: F) -> Result<T, TodoError>
    where
        F: FnOnce(&mut TodoRecord) -> Result<T, TodoError>,
    {
        let mut accounts = self.accounts.write().await;
        let current = accounts
            .get_mut(address)
            .ok_or_else(|| TodoError::NotFound(address.to_string()))?;

        let mut draft = current.clone();
        let output = f(&mut draft)?;
        *current = draft;

        debug!(%address, "アカウント更新");
        Ok(output)
    }

    /// check が成功した場合のみレコードを削除し、削除したレコードを返す
    pub async fn remove_if<F>(&self, address: &RecordAddress, check: F) -> Result<TodoRecord, TodoError>
    where
        F: FnOnce(&TodoRecord) -> Result<(), TodoError>,
    {
        let mut accounts = self.accounts.write().await;
        let current = accounts
            .get(address)
            .ok_or_else(|| TodoError::NotFound(address.to_string()))?;

        check(current)?;

        debug!(%address, "アカウント削除");
        accounts
            .remove(address)
            .ok_or_else(|| TodoError::NotFound(address.to_string()))
    }

    /// アカウントを作成し、同じ書き込みロック内でイベントを記録する
    pub async fn create_recorded<F>(
        &self,
        record: TodoRecord,
        journal: &EventRepository,
        event: F,
    ) -> Result<TodoEvent, TodoError>
    where
        F: FnOnce(RecordAddress) -> TodoEvent,
    {
        let address = record.address(&self.program_id);
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&address) {
            return Err(TodoError::AlreadyExists(address.to_string()));
        }

        let event = event(address);
        accounts.insert(address, record);
        journal.append(event.clone()).await;
        Ok(event)
    }

    /// レコードを変更し、ロックを保持したまま生成イベントを記録する
    /// 履歴の順序はアカウントの状態遷移の順序と一致する
    pub async fn modify_recorded<F>(
        &self,
        address: &RecordAddress,
        journal: &EventRepository,
        f: F,
    ) -> Result<TodoEvent, TodoError>
    where
        F: FnOnce(&mut TodoRecord) -> Result<TodoEvent, TodoError>,
    {
        let mut accounts = self.accounts.write().await;
        let current = accounts
            .get_mut(address)
            .ok_or_else(|| TodoError::NotFound(address.to_string()))?;

        let mut draft = current.clone();
        let event = f(&mut draft)?;
        *current = draft;

        journal.append(event.clone()).await;
        Ok(event)
    }

    /// check が返したイベントを記録してからレコードを削除する
    pub async fn remove_recorded<F>(
        &self,
        address: &RecordAddress,
        journal: &EventRepository,
        check: F,
    ) -> Result<TodoEvent, TodoError>
    where
        F: FnOnce(&TodoRecord) -> Result<TodoEvent, TodoError>,
    {
        let mut accounts = self.accounts.write().await;
        let current = accounts
            .get(address)
            .ok_or_else(|| TodoError::NotFound(address.to_string()))?;

        let event = check(current)?;
        accounts.remove(address);

        journal.append(event.clone()).await;
        Ok(event)
    }

    pub async fn delete(&self, owner: &OwnerId, task_id: TaskId) -> Result<TodoRecord, TodoError> {
        self.remove_if(&self.address(owner, task_id), |_| Ok(()))
            .await
    }

    pub async fn contains(&self, address: &RecordAddress) -> bool {
        self.accounts.read().await.contains_key(address)
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

/// アドレスごとのイベント履歴
#[derive(Clone, Default)]
pub struct EventRepository {
    events: Arc<RwLock<HashMap<RecordAddress, Vec<TodoEvent>>>>,
}

impl EventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, event: TodoEvent) {
        debug!(
            address = %event.address(),
            event_type = event.event_type(),
            event_id = event.event_id(),
            "イベント記録"
        );
        self.events
            .write()
            .await
            .entry(*event.address())
            .or_default()
            .push(event);
    }

    /// 記録順のイベント一覧（削除後も保持される）
    pub async fn events_for(&self, address: &RecordAddress) -> Vec<TodoEvent> {
        self.events
            .read()
            .await
            .get(address)
            .cloned()
            .unwrap_or_default()
    }
}
