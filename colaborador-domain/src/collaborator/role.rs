use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 已知的鉴别值
///
/// 记录上的 `role` 保持为字符串：未列出的值同样合法，只是没有子类型表。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Tarm,
    Frota,
    #[serde(rename = "MEDICO_REGULADOR_12H")]
    MedicoRegulador12h,
    #[serde(rename = "MEDICO_REGULADOR_24H")]
    MedicoRegulador24h,
    #[serde(rename = "MEDICO_LIDER_12H")]
    MedicoLider12h,
    #[serde(rename = "MEDICO_LIDER_24H")]
    MedicoLider24h,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Tarm,
        Role::Frota,
        Role::MedicoRegulador12h,
        Role::MedicoRegulador24h,
        Role::MedicoLider12h,
        Role::MedicoLider24h,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tarm => "TARM",
            Role::Frota => "FROTA",
            Role::MedicoRegulador12h => "MEDICO_REGULADOR_12H",
            Role::MedicoRegulador24h => "MEDICO_REGULADOR_24H",
            Role::MedicoLider12h => "MEDICO_LIDER_12H",
            Role::MedicoLider24h => "MEDICO_LIDER_24H",
        }
    }

    /// 该角色对应的联表子类型
    pub fn subtype(&self) -> SubtypeKind {
        match self {
            Role::Tarm => SubtypeKind::Tarm,
            Role::Frota => SubtypeKind::Frota,
            Role::MedicoRegulador12h
            | Role::MedicoRegulador24h
            | Role::MedicoLider12h
            | Role::MedicoLider24h => SubtypeKind::Medico,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::Parse {
                reason: format!("unknown role: {s}"),
            })
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// 子类型表（与基表共享主键 `id`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtypeKind {
    Tarm,
    Frota,
    Medico,
}

impl SubtypeKind {
    /// 由鉴别值选择子类型；未知角色返回 `None`
    pub fn for_role(role: &str) -> Option<Self> {
        role.parse::<Role>().ok().map(|r| r.subtype())
    }

    pub fn table(&self) -> &'static str {
        match self {
            SubtypeKind::Tarm => "tarm",
            SubtypeKind::Frota => "frota",
            SubtypeKind::Medico => "medico",
        }
    }
}
