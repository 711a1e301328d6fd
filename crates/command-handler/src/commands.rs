use domain::{OwnerId, RecordAddress, TaskId, TodoEvent};
use serde::{Deserialize, Serialize};
use shared::AppError;

/// ToDo アカウントに対するコマンド
/// 変更系コマンドは対象レコードの所有者 `owner` と実際の署名者 `signer` を別々に持つ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    CreateTodo {
        signer: OwnerId,
        task_id: TaskId,
        description: String,
        due_date: i64,
    },
    UpdateDescription {
        signer: OwnerId,
        owner: OwnerId,
        task_id: TaskId,
        new_description: String,
    },
    ToggleCompleted {
        signer: OwnerId,
        owner: OwnerId,
        task_id: TaskId,
    },
    DeleteTodo {
        signer: OwnerId,
        owner: OwnerId,
        task_id: TaskId,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateTodo { .. } => "create_todo",
            Command::UpdateDescription { .. } => "update_description",
            Command::ToggleCompleted { .. } => "toggle_completed",
            Command::DeleteTodo { .. } => "delete_todo",
        }
    }

    pub fn signer(&self) -> &OwnerId {
        match self {
            Command::CreateTodo { signer, .. }
            | Command::UpdateDescription { signer, .. }
            | Command::ToggleCompleted { signer, .. }
            | Command::DeleteTodo { signer, .. } => signer,
        }
    }

    /// JSON ペイロードからコマンドを復元
    pub fn from_json(payload: &str) -> Result<Self, AppError> {
        serde_json::from_str(payload)
            .map_err(|e| AppError::Validation(format!("コマンドのパースエラー: {e}")))
    }
}

/// コマンド成功時の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub address: RecordAddress,
    pub event: TodoEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_create_command() {
        let payload = json!({
            "command": "create_todo",
            "signer": "alice",
            "task_id": 1,
            "description": "Complete Solana smart contract",
            "due_date": 1_700_086_400
        })
        .to_string();

        let command = Command::from_json(&payload).unwrap();

        assert_eq!(command.name(), "create_todo");
        assert_eq!(command.signer().as_str(), "alice");
        match command {
            Command::CreateTodo {
                task_id, due_date, ..
            } => {
                assert_eq!(task_id, TaskId(1));
                assert_eq!(due_date, 1_700_086_400);
            }
            other => panic!("Expected CreateTodo, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_toggle_command_with_separate_owner() {
        let payload = json!({
            "command": "toggle_completed",
            "signer": "mallory",
            "owner": "alice",
            "task_id": 3
        })
        .to_string();

        let command = Command::from_json(&payload).unwrap();

        assert_eq!(command.name(), "toggle_completed");
        assert_eq!(command.signer().as_str(), "mallory");
    }

    #[test]
    fn test_unknown_command_is_validation_error() {
        let err = Command::from_json(r#"{"command":"rename_todo"}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_blank_signer_or_owner_is_validation_error() {
        let blank_signer = json!({
            "command": "create_todo",
            "signer": "",
            "task_id": 1,
            "description": "d",
            "due_date": 0
        })
        .to_string();
        let blank_owner = json!({
            "command": "delete_todo",
            "signer": "alice",
            "owner": "   ",
            "task_id": 1
        })
        .to_string();

        for payload in [blank_signer, blank_owner] {
            let err = Command::from_json(&payload).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "unexpected error: {err}");
        }
    }
}
