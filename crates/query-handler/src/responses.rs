use chrono::{DateTime, Utc};
use domain::{OwnerId, RecordAddress, TaskId, TodoRecord};
use serde::{Deserialize, Serialize};

/// 取得結果（クライアントが受け取るアカウントデータ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoView {
    pub address: RecordAddress,
    pub owner: OwnerId,
    pub task_id: TaskId,
    pub description: String,
    pub due_date: i64,
    pub completed: bool,
}

impl TodoView {
    pub fn from_record(address: RecordAddress, record: TodoRecord) -> Self {
        Self {
            address,
            owner: record.owner,
            task_id: record.task_id,
            description: record.description,
            due_date: record.due_date,
            completed: record.completed,
        }
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.due_date, 0)
    }
}
