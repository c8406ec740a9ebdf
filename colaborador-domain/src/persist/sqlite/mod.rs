//! 基于 sqlx(SQLite) 的仓储实现
//!
//! 每个写操作都在单个事务内完成；更新与删除以
//! `WHERE id = ? AND version = ?` 作为比较条件，受影响行数为 0 时
//! 在同一事务内读取当前版本以区分“不存在”与“版本冲突”。
//!
mod config;
mod schema;

pub use config::SqliteStoreConfig;

use crate::collaborator::{
    Collaborator, CollaboratorId, CollaboratorRecord, SubtypeDetails, SubtypeKind,
};
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult as Result};
use crate::persist::{
    CollaboratorRepository, CollaboratorRow, IdGenerator, UuidIdGenerator,
    ensure_details_match_role, ensure_version, next_version, not_found,
};
use crate::value_object::Version;
use async_trait::async_trait;
use sqlx::SqliteConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct SqliteCollaboratorRepository {
    pool: SqlitePool,
    id_generator: Arc<dyn IdGenerator>,
}

impl SqliteCollaboratorRepository {
    pub fn new(pool: SqlitePool, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self { pool, id_generator }
    }

    /// 按配置建立连接池（内存库固定为单连接且不回收），必要时建表
    pub async fn connect(config: &SqliteStoreConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if config.is_memory() {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        info!(url = %config.url, "connecting collaborator store");
        let pool = pool_options.connect_with(options).await?;
        let repo = Self::new(pool, Arc::new(UuidIdGenerator));

        if config.create_schema {
            repo.create_schema().await?;
        }
        Ok(repo)
    }

    /// 替换标识生成器
    pub fn with_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// 执行建表语句（幂等）
    pub async fn create_schema(&self) -> Result<()> {
        for statement in schema::SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("collaborator schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn fetch_row(
    conn: &mut SqliteConnection,
    id: &CollaboratorId,
) -> std::result::Result<Option<CollaboratorRow>, sqlx::Error> {
    sqlx::query_as::<_, CollaboratorRow>(schema::SELECT_ROW)
        .bind(id.as_str())
        .fetch_optional(conn)
        .await
}

/// 条件写入未命中时给出具体原因
async fn diagnose_miss(
    conn: &mut SqliteConnection,
    id: &CollaboratorId,
    expected: Version,
) -> Result<DomainError> {
    let actual: Option<i64> = sqlx::query_scalar("SELECT version FROM colaborador WHERE id = ?1")
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;

    let Some(actual) = actual else {
        return Ok(not_found(id));
    };
    let actual = Version::from_value(usize::try_from(actual)?);
    match ensure_version(id, expected, actual) {
        Err(err) => Ok(err),
        Ok(()) => Ok(DomainError::Database {
            reason: format!("conditional write on {id} matched no row at {actual}"),
        }),
    }
}

fn version_param(version: Version) -> Result<i64> {
    Ok(i64::try_from(version.value())?)
}

#[async_trait]
impl CollaboratorRepository for SqliteCollaboratorRepository {
    #[instrument(level = "debug", skip_all, fields(role = %record.role()))]
    async fn insert(&self, record: &CollaboratorRecord) -> Result<CollaboratorRecord> {
        if let Some(id) = record.id() {
            return Err(DomainError::AlreadyPersisted { id: id.to_string() });
        }

        let id = self.id_generator.generate()?;
        let mut persisted = record.clone();
        persisted.assign_identity(id.clone(), record.version().unwrap_or_default());
        let row = CollaboratorRow::try_from(&persisted)?;

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO colaborador (id, nome, cpf, id_call_rote, pontuacao, role, version) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&row.id)
        .bind(&row.nome)
        .bind(&row.cpf)
        .bind(&row.id_call_rote)
        .bind(row.pontuacao)
        .bind(&row.role)
        .bind(row.version)
        .execute(&mut *tx)
        .await?;

        if let Some(kind) = record.subtype() {
            schema::insert_empty_details(&mut *tx, kind, &row.id).await?;
        }
        tx.commit().await?;

        debug!(%id, "collaborator inserted");
        Ok(persisted)
    }

    async fn find(&self, id: &CollaboratorId) -> Result<Option<CollaboratorRecord>> {
        let mut conn = self.pool.acquire().await?;
        fetch_row(&mut *conn, id)
            .await?
            .map(CollaboratorRecord::try_from)
            .transpose()
    }

    #[instrument(level = "debug", skip_all, fields(id = ?record.id(), version = ?record.version()))]
    async fn update(&self, record: &CollaboratorRecord) -> Result<CollaboratorRecord> {
        let (id, expected) = record.persisted_identity()?;
        let next = next_version(&id, expected)?;

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE colaborador \
             SET nome = ?1, cpf = ?2, id_call_rote = ?3, pontuacao = ?4, version = ?5 \
             WHERE id = ?6 AND version = ?7",
        )
        .bind(record.nome())
        .bind(record.cpf())
        .bind(record.id_call_rote())
        .bind(record.pontuacao())
        .bind(version_param(next)?)
        .bind(id.as_str())
        .bind(version_param(expected)?)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(diagnose_miss(&mut *tx, &id, expected).await?);
        }

        let row = fetch_row(&mut *tx, &id).await?.ok_or_else(|| not_found(&id))?;
        tx.commit().await?;

        debug!(%id, version = row.version, "collaborator updated");
        CollaboratorRecord::try_from(row)
    }

    #[instrument(level = "debug", skip_all, fields(id = ?record.id(), version = ?record.version()))]
    async fn delete(&self, record: &CollaboratorRecord) -> Result<()> {
        let (id, expected) = record.persisted_identity()?;

        let mut tx = self.pool.begin().await?;
        let role: Option<String> = sqlx::query_scalar(
            "DELETE FROM colaborador WHERE id = ?1 AND version = ?2 RETURNING role",
        )
        .bind(id.as_str())
        .bind(version_param(expected)?)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(role) = role else {
            return Err(diagnose_miss(&mut *tx, &id, expected).await?);
        };
        if let Some(kind) = SubtypeKind::for_role(&role) {
            schema::delete_details(&mut *tx, kind, id.as_str()).await?;
        }
        tx.commit().await?;

        debug!(%id, "collaborator deleted");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CollaboratorRecord>> {
        sqlx::query_as::<_, CollaboratorRow>(
            "SELECT id, nome, cpf, id_call_rote, pontuacao, role, version \
             FROM colaborador ORDER BY nome, id",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(CollaboratorRecord::try_from)
        .collect()
    }

    async fn load_joined(&self, id: &CollaboratorId) -> Result<Option<Collaborator>> {
        // 基表与子类型表在同一读事务内读取，保证版本与明细对应
        let mut tx = self.pool.begin().await?;
        let Some(row) = fetch_row(&mut *tx, id).await? else {
            return Ok(None);
        };

        let details = match SubtypeKind::for_role(&row.role) {
            Some(kind) => schema::load_details(&mut *tx, kind, id.as_str()).await?,
            None => None,
        };
        tx.commit().await?;
        Ok(Some(Collaborator {
            record: CollaboratorRecord::try_from(row)?,
            details,
        }))
    }

    #[instrument(level = "debug", skip_all, fields(id = ?record.id(), subtype = ?details.kind()))]
    async fn update_details(
        &self,
        record: &CollaboratorRecord,
        details: &SubtypeDetails,
    ) -> Result<CollaboratorRecord> {
        let (id, expected) = record.persisted_identity()?;
        let next = next_version(&id, expected)?;

        let mut tx = self.pool.begin().await?;
        let role: Option<String> = sqlx::query_scalar(
            "UPDATE colaborador SET version = ?1 \
             WHERE id = ?2 AND version = ?3 RETURNING role",
        )
        .bind(version_param(next)?)
        .bind(id.as_str())
        .bind(version_param(expected)?)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(role) = role else {
            return Err(diagnose_miss(&mut *tx, &id, expected).await?);
        };
        // 未提交的事务在返回时回滚，版本号保持不变
        ensure_details_match_role(&role, details)?;
        schema::upsert_details(&mut *tx, id.as_str(), details).await?;

        let row = fetch_row(&mut *tx, &id).await?.ok_or_else(|| not_found(&id))?;
        tx.commit().await?;

        debug!(%id, version = row.version, "collaborator details updated");
        CollaboratorRecord::try_from(row)
    }
}
