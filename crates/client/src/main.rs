use anyhow::{anyhow, bail};
use client::{Signer, TodoClient};
use domain::TaskId;
use shared::{init_tracing, Config};
use tracing::info;

/// 作成・更新・トグル・削除を順に実行するデモシナリオ
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config).map_err(|e| anyhow!("トレーシング初期化エラー: {e}"))?;

    info!(
        environment = %config.environment,
        program_id = %config.program_id,
        "todo-harness 開始"
    );

    let client = TodoClient::new(&config);
    let owner = Signer::generate();
    let task_id = TaskId(1);
    let due_date = chrono::Utc::now().timestamp() + 86_400;

    let receipt = client
        .create_todo(&owner, task_id, "Complete Solana smart contract", due_date)
        .await?;
    info!(signature = %receipt.signature, address = %receipt.address, "Your transaction signature");

    let todo = client.fetch(owner.pubkey(), task_id).await?;
    info!(description = %todo.description, completed = todo.completed, "作成後の状態");

    client
        .update_description(
            &owner,
            owner.pubkey(),
            task_id,
            "Update Solana smart contract documentation",
        )
        .await?;

    for _ in 0..2 {
        client.toggle_completed(&owner, owner.pubkey(), task_id).await?;
    }
    let todo = client.fetch(owner.pubkey(), task_id).await?;
    info!(description = %todo.description, completed = todo.completed, "更新後の状態");

    client.delete_todo(&owner, owner.pubkey(), task_id).await?;
    match client.fetch(owner.pubkey(), task_id).await {
        Err(e) if e.is_not_found() => info!("削除後の取得は NotFound"),
        Err(e) => return Err(e.into()),
        Ok(todo) => bail!("削除したはずの ToDo が残っています: {}", todo.address),
    }

    info!(
        events = client.history(owner.pubkey(), task_id).await.len(),
        "todo-harness 完了"
    );
    Ok(())
}
