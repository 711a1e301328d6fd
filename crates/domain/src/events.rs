use crate::identifiers::{OwnerId, RecordAddress, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ToDo アカウントに対して発生したイベント
/// プログラムログに相当し、コマンド成功ごとに 1 件記録される
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum TodoEvent {
    TodoCreated {
        event_id: String,
        address: RecordAddress,
        owner: OwnerId,
        task_id: TaskId,
        description: String,
        due_date: i64,
        timestamp: DateTime<Utc>,
    },
    DescriptionUpdated {
        event_id: String,
        address: RecordAddress,
        signer: OwnerId,
        old_description: String,
        new_description: String,
        timestamp: DateTime<Utc>,
    },
    CompletionToggled {
        event_id: String,
        address: RecordAddress,
        signer: OwnerId,
        completed: bool,
        timestamp: DateTime<Utc>,
    },
    TodoDeleted {
        event_id: String,
        address: RecordAddress,
        signer: OwnerId,
        timestamp: DateTime<Utc>,
    },
}

impl TodoEvent {
    pub fn new_todo_created(
        address: RecordAddress,
        owner: OwnerId,
        task_id: TaskId,
        description: String,
        due_date: i64,
    ) -> Self {
        Self::TodoCreated {
            event_id: new_event_id(),
            address,
            owner,
            task_id,
            description,
            due_date,
            timestamp: Utc::now(),
        }
    }

    pub fn new_description_updated(
        address: RecordAddress,
        signer: OwnerId,
        old_description: String,
        new_description: String,
    ) -> Self {
        Self::DescriptionUpdated {
            event_id: new_event_id(),
            address,
            signer,
            old_description,
            new_description,
            timestamp: Utc::now(),
        }
    }

    pub fn new_completion_toggled(address: RecordAddress, signer: OwnerId, completed: bool) -> Self {
        Self::CompletionToggled {
            event_id: new_event_id(),
            address,
            signer,
            completed,
            timestamp: Utc::now(),
        }
    }

    pub fn new_todo_deleted(address: RecordAddress, signer: OwnerId) -> Self {
        Self::TodoDeleted {
            event_id: new_event_id(),
            address,
            signer,
            timestamp: Utc::now(),
        }
    }

    pub fn event_id(&self) -> &str {
        match self {
            Self::TodoCreated { event_id, .. }
            | Self::DescriptionUpdated { event_id, .. }
            | Self::CompletionToggled { event_id, .. }
            | Self::TodoDeleted { event_id, .. } => event_id,
        }
    }

    pub fn address(&self) -> &RecordAddress {
        match self {
            Self::TodoCreated { address, .. }
            | Self::DescriptionUpdated { address, .. }
            | Self::CompletionToggled { address, .. }
            | Self::TodoDeleted { address, .. } => address,
        }
    }

    /// イベントを発行した署名者
    pub fn signer(&self) -> &OwnerId {
        match self {
            Self::TodoCreated { owner, .. } => owner,
            Self::DescriptionUpdated { signer, .. }
            | Self::CompletionToggled { signer, .. }
            | Self::TodoDeleted { signer, .. } => signer,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::TodoCreated { timestamp, .. }
            | Self::DescriptionUpdated { timestamp, .. }
            | Self::CompletionToggled { timestamp, .. }
            | Self::TodoDeleted { timestamp, .. } => *timestamp,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TodoCreated { .. } => "todo_created",
            Self::DescriptionUpdated { .. } => "description_updated",
            Self::CompletionToggled { .. } => "completion_toggled",
            Self::TodoDeleted { .. } => "todo_deleted",
        }
    }
}

fn new_event_id() -> String {
    ulid::Ulid::new().to_string()
}
