//! 协作者记录的端到端演示：插入 → 更新 → 以过期版本重复更新 → 联表读取
use anyhow::{Context, Result, bail};
use clap::Parser;
use colaborador_domain::collaborator::{CollaboratorRecord, SubtypeDetails, TarmDetails};
use colaborador_domain::entity::Entity;
use colaborador_domain::error::DomainError;
use colaborador_domain::persist::{
    CollaboratorRepository, SqliteCollaboratorRepository, SqliteStoreConfig,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Collaborator record persistence demo")]
struct Cli {
    #[arg(
        long,
        env = "COLABORADOR_DATABASE_URL",
        default_value = "sqlite::memory:",
        value_name = "URL",
        help = "SQLite connection string"
    )]
    database_url: String,

    #[arg(
        long,
        env = "COLABORADOR_MAX_CONNECTIONS",
        default_value_t = 1,
        value_name = "N",
        help = "Connection pool size (forced to 1 for in-memory databases)"
    )]
    max_connections: u32,

    #[arg(long, default_value_t = false, help = "Skip CREATE TABLE statements")]
    no_schema: bool,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = SqliteStoreConfig::builder()
        .url(cli.database_url)
        .max_connections(cli.max_connections)
        .create_schema(!cli.no_schema)
        .build();
    let repo = SqliteCollaboratorRepository::connect(&config)
        .await
        .context("open collaborator store")?;

    let draft = CollaboratorRecord::new("Ana Silva", "123.456.789-00", "route-7", 85, "TARM", None);
    let saved = repo.insert(&draft).await?;
    info!(record = %saved, "inserted");

    let mut change = saved.clone();
    change.set_pontuacao(90);
    let updated = repo.update(&change).await?;
    info!(record = %updated, "updated");

    match repo.update(&change).await {
        Err(DomainError::OptimisticConflict {
            expected, actual, ..
        }) => warn!(%expected, %actual, "stale update rejected"),
        Err(other) => return Err(other.into()),
        Ok(record) => bail!("stale update was accepted: {record}"),
    }

    let details = SubtypeDetails::Tarm(TarmDetails {
        removidos: 12,
        tempo_regulacao: 95,
        pausas_mensal: 3600,
    });
    let updated = repo.update_details(&updated, &details).await?;

    let id = updated.id().context("persisted record has an id")?;
    let joined = repo
        .load_joined(id)
        .await?
        .context("record disappeared")?;
    info!(record = %joined.record, details = ?joined.details, "joined read");

    Ok(())
}
