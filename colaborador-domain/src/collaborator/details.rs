use crate::collaborator::{CollaboratorRecord, SubtypeKind};
use colaborador_macros::value_object;
use serde::{Deserialize, Serialize};

/// `tarm` 子类型表的列（秒或次数）
#[value_object]
#[serde(rename_all = "camelCase")]
pub struct TarmDetails {
    pub removidos: i64,
    pub tempo_regulacao: i64,
    pub pausas_mensal: i64,
}

/// `frota` 子类型表的列（秒）
#[value_object]
#[serde(rename_all = "camelCase")]
pub struct FrotaDetails {
    pub tempo_saida_vtr: i64,
    pub tempo_regulacao_frota: i64,
    pub pausas_mensal: i64,
}

/// `medico` 子类型表的列（秒），四种 MEDICO_* 角色共用
#[value_object]
#[serde(rename_all = "camelCase")]
pub struct MedicoDetails {
    pub tempo_regulacao_medica: i64,
    pub tempo_regulacao_lider: i64,
}

/// 子类型明细（按 `role` 区分的标签联合）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "subtype", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubtypeDetails {
    Tarm(TarmDetails),
    Frota(FrotaDetails),
    Medico(MedicoDetails),
}

impl SubtypeDetails {
    pub fn kind(&self) -> SubtypeKind {
        match self {
            SubtypeDetails::Tarm(_) => SubtypeKind::Tarm,
            SubtypeDetails::Frota(_) => SubtypeKind::Frota,
            SubtypeDetails::Medico(_) => SubtypeKind::Medico,
        }
    }

    /// 插入基表时同时写入的零值子类型行
    pub fn empty(kind: SubtypeKind) -> Self {
        match kind {
            SubtypeKind::Tarm => SubtypeDetails::Tarm(TarmDetails::default()),
            SubtypeKind::Frota => SubtypeDetails::Frota(FrotaDetails::default()),
            SubtypeKind::Medico => SubtypeDetails::Medico(MedicoDetails::default()),
        }
    }
}

/// 联表读取结果：基表记录 + `role` 选中的子类型明细
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub record: CollaboratorRecord,
    pub details: Option<SubtypeDetails>,
}
