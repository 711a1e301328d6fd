use domain::OwnerId;

/// コマンドを発行する呼び出し元
/// 暗号学的な署名は行わず、識別子のみを提示する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    owner: OwnerId,
}

impl Signer {
    pub fn generate() -> Self {
        Self {
            owner: OwnerId::new(),
        }
    }

    pub fn from_owner(owner: OwnerId) -> Self {
        Self { owner }
    }

    pub fn pubkey(&self) -> &OwnerId {
        &self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_signers_are_distinct() {
        assert_ne!(Signer::generate().pubkey(), Signer::generate().pubkey());
    }
}
