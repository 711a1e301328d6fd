use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// アドレス導出で使うシード接頭辞
pub const TODO_SEED: &[u8] = b"todo";

/// プログラム派生アドレスの区切りマーカー
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// 既定のプログラムID
pub const DEFAULT_PROGRAM_ID: &str = "ETwb2Fvp1FXCdky5homxbpBAh6kfsTFkW9dYNchy6ASY";

/// DEFAULT_PROGRAM_ID をデコードした 32 バイト
const DEFAULT_PROGRAM_ID_BYTES: [u8; 32] = [
    200, 14, 192, 152, 45, 207, 210, 209, 246, 138, 31, 188, 58, 188, 139, 129, 21, 204, 234, 110,
    116, 203, 75, 186, 56, 143, 142, 186, 134, 152, 17, 149,
];

/// 署名者（所有者）の識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// 新しい識別子を生成（ULID）
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    pub fn from_string(id: String) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::InvalidOwnerId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<String> for OwnerId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(value)
    }
}

impl From<OwnerId> for String {
    fn from(owner: OwnerId) -> Self {
        owner.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 所有者ごとに一意なタスク番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// アドレス導出の名前空間となる 32 バイトのプログラムID
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId([u8; 32]);

impl ProgramId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Default for ProgramId {
    fn default() -> Self {
        Self(DEFAULT_PROGRAM_ID_BYTES)
    }
}

impl FromStr for ProgramId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_32(s)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidProgramId(s.to_string()))
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProgramId({self})")
    }
}

/// (owner, task_id) から決定的に導出されるレコードの所在
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordAddress([u8; 32]);

impl RecordAddress {
    /// シード `["todo", owner, task_id(LE)]` とプログラムIDからアドレスを導出
    /// owner は可変長なので長さを前置する
    pub fn derive(program_id: &ProgramId, owner: &OwnerId, task_id: TaskId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(TODO_SEED);
        hasher.update((owner.as_str().len() as u32).to_le_bytes());
        hasher.update(owner.as_str().as_bytes());
        hasher.update(task_id.value().to_le_bytes());
        hasher.update(program_id.as_bytes());
        hasher.update(PDA_MARKER);
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for RecordAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_32(s)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidRecordAddress(s.to_string()))
    }
}

impl TryFrom<String> for RecordAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordAddress> for String {
    fn from(address: RecordAddress) -> Self {
        address.to_string()
    }
}

impl fmt::Display for RecordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for RecordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordAddress({self})")
    }
}

fn decode_32(s: &str) -> Option<[u8; 32]> {
    let bytes = bs58::decode(s).into_vec().ok()?;
    bytes.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_program_id_round_trips_through_base58() {
        let program_id = ProgramId::default();
        assert_eq!(program_id.to_string(), DEFAULT_PROGRAM_ID);
        assert_eq!(DEFAULT_PROGRAM_ID.parse::<ProgramId>().unwrap(), program_id);
    }

    #[test]
    fn test_program_id_rejects_wrong_length_and_alphabet() {
        assert!(matches!(
            "abc".parse::<ProgramId>(),
            Err(DomainError::InvalidProgramId(_))
        ));
        // 0 と l は base58 に含まれない
        assert!("0l0l0l".parse::<ProgramId>().is_err());
    }

    #[test]
    fn test_owner_id_rejects_blank() {
        assert!(OwnerId::from_string("  ".to_string()).is_err());
        let owner = OwnerId::from_string("alice".to_string()).unwrap();
        assert_eq!(owner.as_str(), "alice");
    }

    #[test]
    fn test_owner_id_deserialization_rejects_blank() {
        assert!(serde_json::from_str::<OwnerId>(r#""""#).is_err());
        assert!(serde_json::from_str::<OwnerId>(r#""   ""#).is_err());

        let owner: OwnerId = serde_json::from_str(r#""alice""#).unwrap();
        assert_eq!(owner.as_str(), "alice");
        assert_eq!(serde_json::to_string(&owner).unwrap(), r#""alice""#);
    }

    #[test]
    fn test_owner_id_new_generates_ulid() {
        let owner = OwnerId::new();
        assert_eq!(owner.as_str().len(), 26);
        assert_ne!(owner, OwnerId::new());
    }

    #[test]
    fn test_address_depends_on_owner_task_and_program() {
        let program_id = ProgramId::default();
        let alice = OwnerId::from_string("alice".to_string()).unwrap();
        let bob = OwnerId::from_string("bob".to_string()).unwrap();

        let base = RecordAddress::derive(&program_id, &alice, TaskId(1));
        assert_eq!(base, RecordAddress::derive(&program_id, &alice, TaskId(1)));
        assert_ne!(base, RecordAddress::derive(&program_id, &bob, TaskId(1)));
        assert_ne!(base, RecordAddress::derive(&program_id, &alice, TaskId(2)));
        assert_ne!(
            base,
            RecordAddress::derive(&ProgramId::new([7u8; 32]), &alice, TaskId(1))
        );
    }

    #[test]
    fn test_address_hashes_length_prefixed_owner() {
        let program_id = ProgramId::new([7u8; 32]);
        let owner = OwnerId::from_string("alice".to_string()).unwrap();

        let mut seeds = Vec::new();
        seeds.extend_from_slice(b"todo");
        seeds.extend_from_slice(&5u32.to_le_bytes());
        seeds.extend_from_slice(b"alice");
        seeds.extend_from_slice(&3u64.to_le_bytes());
        seeds.extend_from_slice(&[7u8; 32]);
        seeds.extend_from_slice(b"ProgramDerivedAddress");
        let expected: [u8; 32] = Sha256::digest(&seeds).into();

        let address = RecordAddress::derive(&program_id, &owner, TaskId(3));
        assert_eq!(address.as_bytes(), &expected);
    }

    #[test]
    fn test_record_address_serializes_as_base58_string() {
        let address = RecordAddress::derive(
            &ProgramId::default(),
            &OwnerId::from_string("alice".to_string()).unwrap(),
            TaskId(42),
        );

        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{address}\""));

        let parsed: RecordAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, address);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn address_is_deterministic(owner in "[a-zA-Z0-9]{1,32}", task in any::<u64>()) {
                let owner = OwnerId::from_string(owner).unwrap();
                let program_id = ProgramId::default();
                let first = RecordAddress::derive(&program_id, &owner, TaskId(task));
                let second = RecordAddress::derive(&program_id, &owner, TaskId(task));
                prop_assert_eq!(first, second);
                prop_assert_eq!(first.to_string().parse::<RecordAddress>().unwrap(), first);
            }
        }
    }
}
