use crate::errors::TodoError;
use crate::events::TodoEvent;
use crate::identifiers::{OwnerId, ProgramId, RecordAddress, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ToDo アカウント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub owner: OwnerId,
    pub task_id: TaskId,
    pub description: String,
    /// 期限（UNIX 秒）
    pub due_date: i64,
    pub completed: bool,
}

impl TodoRecord {
    pub fn new(owner: OwnerId, task_id: TaskId, description: String, due_date: i64) -> Self {
        Self {
            owner,
            task_id,
            description,
            due_date,
            completed: false,
        }
    }

    /// 作成イベントから状態を復元
    pub fn from_created_event(event: &TodoEvent) -> Option<Self> {
        match event {
            TodoEvent::TodoCreated {
                owner,
                task_id,
                description,
                due_date,
                ..
            } => Some(Self::new(owner.clone(), *task_id, description.clone(), *due_date)),
            _ => None,
        }
    }

    pub fn address(&self, program_id: &ProgramId) -> RecordAddress {
        RecordAddress::derive(program_id, &self.owner, self.task_id)
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.due_date, 0)
    }

    /// 署名者が所有者でなければ Unauthorized
    pub fn ensure_owner(&self, signer: &OwnerId, address: &RecordAddress) -> Result<(), TodoError> {
        if &self.owner != signer {
            return Err(TodoError::Unauthorized {
                signer: signer.to_string(),
                address: address.to_string(),
            });
        }
        Ok(())
    }

    /// 変更イベントを適用して状態を遷移させる
    pub fn apply(&mut self, event: &TodoEvent) {
        match event {
            TodoEvent::DescriptionUpdated {
                new_description, ..
            } => {
                self.description = new_description.clone();
            }
            TodoEvent::CompletionToggled { completed, .. } => {
                self.completed = *completed;
            }
            // 作成と削除はストア側でアカウント自体を出し入れする
            TodoEvent::TodoCreated { .. } | TodoEvent::TodoDeleted { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> TodoRecord {
        TodoRecord::new(
            OwnerId::from_string("owner-1".to_string()).unwrap(),
            TaskId(1),
            "Complete Solana smart contract".to_string(),
            1_700_086_400,
        )
    }

    #[test]
    fn test_new_record_starts_incomplete() {
        let record = sample_record();

        assert!(!record.completed);
        assert_eq!(record.task_id, TaskId(1));
        assert_eq!(record.due_at().unwrap().timestamp(), 1_700_086_400);
    }

    #[test]
    fn test_from_created_event_copies_fields() {
        // Arrange
        let owner = OwnerId::new();
        let address = RecordAddress::derive(&ProgramId::default(), &owner, TaskId(9));
        let event =
            TodoEvent::new_todo_created(address, owner.clone(), TaskId(9), "desc".to_string(), 42);

        // Act
        let record = TodoRecord::from_created_event(&event).unwrap();

        // Assert
        assert_eq!(record.owner, owner);
        assert_eq!(record.task_id, TaskId(9));
        assert_eq!(record.description, "desc");
        assert_eq!(record.due_date, 42);
        assert!(!record.completed);
        assert_eq!(record.address(&ProgramId::default()), address);
    }

    #[test]
    fn test_from_created_event_rejects_other_events() {
        let owner = OwnerId::new();
        let address = RecordAddress::derive(&ProgramId::default(), &owner, TaskId(1));
        let event = TodoEvent::new_todo_deleted(address, owner);

        assert!(TodoRecord::from_created_event(&event).is_none());
    }

    #[test]
    fn test_ensure_owner() {
        let record = sample_record();
        let address = record.address(&ProgramId::default());

        assert!(record.ensure_owner(&record.owner.clone(), &address).is_ok());

        let intruder = OwnerId::from_string("intruder".to_string()).unwrap();
        let err = record.ensure_owner(&intruder, &address).unwrap_err();
        assert_eq!(
            err,
            TodoError::Unauthorized {
                signer: "intruder".to_string(),
                address: address.to_string(),
            }
        );
    }

    #[test]
    fn test_apply_updates_only_targeted_field() {
        let mut record = sample_record();
        let address = record.address(&ProgramId::default());
        let before = record.clone();

        record.apply(&TodoEvent::new_description_updated(
            address,
            record.owner.clone(),
            before.description.clone(),
            "Update Solana smart contract documentation".to_string(),
        ));

        assert_eq!(record.description, "Update Solana smart contract documentation");
        assert_eq!(record.owner, before.owner);
        assert_eq!(record.task_id, before.task_id);
        assert_eq!(record.due_date, before.due_date);
        assert_eq!(record.completed, before.completed);

        record.apply(&TodoEvent::new_completion_toggled(address, record.owner.clone(), true));
        assert!(record.completed);
    }
}
