//! 基表 `colaborador` 的行映射
//!
use crate::collaborator::CollaboratorRecord;
use crate::error::DomainError;
use bon::Builder;
use serde::{Deserialize, Serialize};

/// `colaborador` 表的一行；字段名即列名
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[cfg_attr(feature = "infra-sqlx", derive(sqlx::FromRow))]
pub struct CollaboratorRow {
    pub id: String,
    pub nome: String,
    pub cpf: String,
    pub id_call_rote: String,
    pub pontuacao: i32,
    pub role: String,
    pub version: i64,
}

impl TryFrom<&CollaboratorRecord> for CollaboratorRow {
    type Error = DomainError;

    /// 仅已持久化（带标识与版本）的记录可以映射为行
    fn try_from(record: &CollaboratorRecord) -> Result<Self, Self::Error> {
        let (id, version) = record.persisted_identity()?;
        Ok(Self {
            id: id.into_inner(),
            nome: record.nome().to_string(),
            cpf: record.cpf().to_string(),
            id_call_rote: record.id_call_rote().to_string(),
            pontuacao: record.pontuacao(),
            role: record.role().to_string(),
            version: i64::try_from(version.value())?,
        })
    }
}
