use crate::collaborator::SubtypeKind;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::persist::CollaboratorRow;
use crate::value_object::Version;
use colaborador_macros::{entity, entity_id};
use std::fmt;

/// 协作者标识（存储层在首次保存时生成）
#[entity_id]
pub struct CollaboratorId(String);

/// 协作者记录
///
/// `id` 与 `version` 由存储层维护；`role` 仅能在构造时给出，之后只读。
/// 其余字段可自由读写，修改需通过仓储的 `update` 才会落库。
#[entity(id = CollaboratorId)]
#[derive(Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorRecord {
    nome: String,
    cpf: String,
    id_call_rote: String,
    pontuacao: i32,
    role: String,
}

impl CollaboratorRecord {
    /// 创建尚未持久化的记录（`id` 留空，由存储层分配）
    pub fn new(
        nome: impl Into<String>,
        cpf: impl Into<String>,
        id_call_rote: impl Into<String>,
        pontuacao: i32,
        role: impl Into<String>,
        version: Option<Version>,
    ) -> Self {
        Self {
            id: None,
            version,
            nome: nome.into(),
            cpf: cpf.into(),
            id_call_rote: id_call_rote.into(),
            pontuacao,
            role: role.into(),
        }
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn set_nome(&mut self, nome: impl Into<String>) {
        self.nome = nome.into();
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    pub fn set_cpf(&mut self, cpf: impl Into<String>) {
        self.cpf = cpf.into();
    }

    pub fn id_call_rote(&self) -> &str {
        &self.id_call_rote
    }

    pub fn set_id_call_rote(&mut self, id_call_rote: impl Into<String>) {
        self.id_call_rote = id_call_rote.into();
    }

    pub fn pontuacao(&self) -> i32 {
        self.pontuacao
    }

    pub fn set_pontuacao(&mut self, pontuacao: i32) {
        self.pontuacao = pontuacao;
    }

    /// 鉴别值（只读）
    pub fn role(&self) -> &str {
        &self.role
    }

    /// 设置乐观锁版本（通常为最近一次读取到的值）
    pub fn set_version(&mut self, version: Option<Version>) {
        self.version = version;
    }

    /// `role` 所选择的子类型表；未知角色只有基表
    pub fn subtype(&self) -> Option<SubtypeKind> {
        SubtypeKind::for_role(&self.role)
    }

    /// 已持久化记录的 (标识, 版本)，用于更新/删除前的前置校验
    pub(crate) fn persisted_identity(&self) -> DomainResult<(CollaboratorId, Version)> {
        match (&self.id, self.version) {
            (Some(id), Some(version)) => Ok((id.clone(), version)),
            (None, _) => Err(DomainError::NotPersisted {
                reason: "record has no id".to_string(),
            }),
            (Some(id), None) => Err(DomainError::NotPersisted {
                reason: format!("record {id} has no version"),
            }),
        }
    }

    /// 首次保存时由存储层调用
    pub(crate) fn assign_identity(&mut self, id: CollaboratorId, version: Version) {
        self.id = Some(id);
        self.version = Some(version);
    }
}

impl TryFrom<CollaboratorRow> for CollaboratorRecord {
    type Error = DomainError;

    fn try_from(row: CollaboratorRow) -> DomainResult<Self> {
        let version = Version::from_value(usize::try_from(row.version)?);
        Ok(Self {
            id: Some(CollaboratorId::new(row.id)),
            version: Some(version),
            nome: row.nome,
            cpf: row.cpf,
            id_call_rote: row.id_call_rote,
            pontuacao: row.pontuacao,
            role: row.role,
        })
    }
}

struct Nullable<'a, T>(Option<&'a T>);

impl<T: fmt::Display> fmt::Display for Nullable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => fmt::Display::fmt(v, f),
            None => f.write_str("null"),
        }
    }
}

impl fmt::Display for CollaboratorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CollaboratorRecord(id={}, nome={}, cpf={}, idCallRote={}, pontuacao={}, role={}, version={})",
            Nullable(self.id()),
            self.nome,
            self.cpf,
            self.id_call_rote,
            self.pontuacao,
            self.role,
            Nullable(self.version.map(|v| v.value()).as_ref()),
        )
    }
}
