//! 建表语句与子类型表 SQL
//!
use crate::collaborator::{
    FrotaDetails, MedicoDetails, SubtypeDetails, SubtypeKind, TarmDetails,
};
use sqlx::SqliteConnection;

/// 基表 + 子类型表（共享主键 `id`）
pub(crate) const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS colaborador (
        id           TEXT PRIMARY KEY NOT NULL,
        nome         TEXT NOT NULL,
        cpf          TEXT NOT NULL,
        id_call_rote TEXT NOT NULL,
        pontuacao    INTEGER NOT NULL,
        role         TEXT NOT NULL,
        version      INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tarm (
        id              TEXT PRIMARY KEY NOT NULL REFERENCES colaborador (id) ON DELETE CASCADE,
        removidos       INTEGER NOT NULL DEFAULT 0,
        tempo_regulacao INTEGER NOT NULL DEFAULT 0,
        pausas_mensal   INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS frota (
        id                    TEXT PRIMARY KEY NOT NULL REFERENCES colaborador (id) ON DELETE CASCADE,
        tempo_saida_vtr       INTEGER NOT NULL DEFAULT 0,
        tempo_regulacao_frota INTEGER NOT NULL DEFAULT 0,
        pausas_mensal         INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS medico (
        id                     TEXT PRIMARY KEY NOT NULL REFERENCES colaborador (id) ON DELETE CASCADE,
        tempo_regulacao_medica INTEGER NOT NULL DEFAULT 0,
        tempo_regulacao_lider  INTEGER NOT NULL DEFAULT 0
    )
    "#,
];

pub(crate) const SELECT_ROW: &str = "SELECT id, nome, cpf, id_call_rote, pontuacao, role, version \
     FROM colaborador WHERE id = ?1";

pub(crate) async fn insert_empty_details(
    conn: &mut SqliteConnection,
    kind: SubtypeKind,
    id: &str,
) -> Result<(), sqlx::Error> {
    let sql = match kind {
        SubtypeKind::Tarm => "INSERT INTO tarm (id) VALUES (?1)",
        SubtypeKind::Frota => "INSERT INTO frota (id) VALUES (?1)",
        SubtypeKind::Medico => "INSERT INTO medico (id) VALUES (?1)",
    };
    sqlx::query(sql).bind(id).execute(conn).await?;
    Ok(())
}

pub(crate) async fn delete_details(
    conn: &mut SqliteConnection,
    kind: SubtypeKind,
    id: &str,
) -> Result<(), sqlx::Error> {
    let sql = match kind {
        SubtypeKind::Tarm => "DELETE FROM tarm WHERE id = ?1",
        SubtypeKind::Frota => "DELETE FROM frota WHERE id = ?1",
        SubtypeKind::Medico => "DELETE FROM medico WHERE id = ?1",
    };
    sqlx::query(sql).bind(id).execute(conn).await?;
    Ok(())
}

pub(crate) async fn load_details(
    conn: &mut SqliteConnection,
    kind: SubtypeKind,
    id: &str,
) -> Result<Option<SubtypeDetails>, sqlx::Error> {
    let details = match kind {
        SubtypeKind::Tarm => sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT removidos, tempo_regulacao, pausas_mensal FROM tarm WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?
        .map(|(removidos, tempo_regulacao, pausas_mensal)| {
            SubtypeDetails::Tarm(TarmDetails {
                removidos,
                tempo_regulacao,
                pausas_mensal,
            })
        }),
        SubtypeKind::Frota => sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT tempo_saida_vtr, tempo_regulacao_frota, pausas_mensal FROM frota WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?
        .map(|(tempo_saida_vtr, tempo_regulacao_frota, pausas_mensal)| {
            SubtypeDetails::Frota(FrotaDetails {
                tempo_saida_vtr,
                tempo_regulacao_frota,
                pausas_mensal,
            })
        }),
        SubtypeKind::Medico => sqlx::query_as::<_, (i64, i64)>(
            "SELECT tempo_regulacao_medica, tempo_regulacao_lider FROM medico WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?
        .map(|(tempo_regulacao_medica, tempo_regulacao_lider)| {
            SubtypeDetails::Medico(MedicoDetails {
                tempo_regulacao_medica,
                tempo_regulacao_lider,
            })
        }),
    };
    Ok(details)
}

pub(crate) async fn upsert_details(
    conn: &mut SqliteConnection,
    id: &str,
    details: &SubtypeDetails,
) -> Result<(), sqlx::Error> {
    match details {
        SubtypeDetails::Tarm(d) => {
            sqlx::query(
                "INSERT INTO tarm (id, removidos, tempo_regulacao, pausas_mensal) \
                 VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT (id) DO UPDATE SET removidos = excluded.removidos, \
                 tempo_regulacao = excluded.tempo_regulacao, pausas_mensal = excluded.pausas_mensal",
            )
            .bind(id)
            .bind(d.removidos)
            .bind(d.tempo_regulacao)
            .bind(d.pausas_mensal)
            .execute(conn)
            .await?;
        }
        SubtypeDetails::Frota(d) => {
            sqlx::query(
                "INSERT INTO frota (id, tempo_saida_vtr, tempo_regulacao_frota, pausas_mensal) \
                 VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT (id) DO UPDATE SET tempo_saida_vtr = excluded.tempo_saida_vtr, \
                 tempo_regulacao_frota = excluded.tempo_regulacao_frota, \
                 pausas_mensal = excluded.pausas_mensal",
            )
            .bind(id)
            .bind(d.tempo_saida_vtr)
            .bind(d.tempo_regulacao_frota)
            .bind(d.pausas_mensal)
            .execute(conn)
            .await?;
        }
        SubtypeDetails::Medico(d) => {
            sqlx::query(
                "INSERT INTO medico (id, tempo_regulacao_medica, tempo_regulacao_lider) \
                 VALUES (?1, ?2, ?3) \
                 ON CONFLICT (id) DO UPDATE SET \
                 tempo_regulacao_medica = excluded.tempo_regulacao_medica, \
                 tempo_regulacao_lider = excluded.tempo_regulacao_lider",
            )
            .bind(id)
            .bind(d.tempo_regulacao_medica)
            .bind(d.tempo_regulacao_lider)
            .execute(conn)
            .await?;
        }
    }
    Ok(())
}
