//! 两种仓储实现共用的行为用例
#![allow(dead_code)]

use colaborador_domain::collaborator::{
    CollaboratorId, CollaboratorRecord, FrotaDetails, SubtypeDetails, TarmDetails,
};
use colaborador_domain::entity::Entity;
use colaborador_domain::error::{DomainError, DomainResult};
use colaborador_domain::persist::{CollaboratorRepository, CollaboratorRow, IdGenerator};
use colaborador_domain::value_object::Version;
use std::sync::Arc;

pub fn ana() -> CollaboratorRecord {
    CollaboratorRecord::new("Ana Silva", "123.456.789-00", "route-7", 85, "AGENT", None)
}

/// 总是失败的标识生成器
pub struct FailingIdGenerator;

impl IdGenerator for FailingIdGenerator {
    fn generate(&self) -> DomainResult<CollaboratorId> {
        Err(DomainError::IdentifierGeneration {
            reason: "entropy source unavailable".to_string(),
        })
    }
}

/// 总是返回同一标识的生成器，用于触发主键冲突
pub struct FixedIdGenerator(pub &'static str);

impl IdGenerator for FixedIdGenerator {
    fn generate(&self) -> DomainResult<CollaboratorId> {
        Ok(CollaboratorId::new(self.0.to_string()))
    }
}

pub async fn end_to_end<R: CollaboratorRepository>(repo: &R) -> anyhow::Result<()> {
    let saved = repo.insert(&ana()).await?;
    let id = saved.id().cloned().expect("id assigned on insert");
    assert!(!id.as_str().is_empty());
    assert_eq!(saved.version(), Some(Version::new()));
    assert_eq!(saved.nome(), "Ana Silva");
    assert_eq!(saved.cpf(), "123.456.789-00");
    assert_eq!(saved.id_call_rote(), "route-7");
    assert_eq!(saved.pontuacao(), 85);
    assert_eq!(saved.role(), "AGENT");

    // 重复读取得到同一标识
    let read = repo.find(&id).await?.expect("stored");
    assert_eq!(read, saved);
    assert_eq!(repo.find(&id).await?.and_then(|r| r.id().cloned()), Some(id.clone()));

    let mut change = read.clone();
    change.set_pontuacao(90);
    let updated = repo.update(&change).await?;
    assert_eq!(updated.pontuacao(), 90);
    assert_eq!(updated.version(), Some(Version::from_value(1)));
    assert_eq!(updated.id(), Some(&id));

    // 以过期版本重复同一更新
    let err = repo.update(&change).await.unwrap_err();
    match err {
        DomainError::OptimisticConflict {
            expected, actual, ..
        } => {
            assert_eq!(expected, Version::new());
            assert_eq!(actual, Version::from_value(1));
        }
        other => panic!("unexpected {other:?}"),
    }

    let current = repo.find(&id).await?.expect("stored");
    assert_eq!(current, updated);
    Ok(())
}

pub async fn stale_update_changes_nothing<R: CollaboratorRepository>(
    repo: &R,
) -> anyhow::Result<()> {
    let saved = repo.insert(&ana()).await?;
    let id = saved.id().cloned().expect("id");

    let mut stale = saved.clone();
    stale.set_version(Some(Version::from_value(7)));
    stale.set_nome("Someone Else");
    stale.set_pontuacao(-1);
    assert!(matches!(
        repo.update(&stale).await,
        Err(DomainError::OptimisticConflict { .. })
    ));

    assert_eq!(repo.find(&id).await?, Some(saved));
    Ok(())
}

pub async fn role_is_never_updated<R: CollaboratorRepository>(repo: &R) -> anyhow::Result<()> {
    let saved = repo
        .insert(&CollaboratorRecord::new("Caio", "1", "r-1", 10, "TARM", None))
        .await?;
    let id = saved.id().cloned().expect("id");

    // 通过行映射伪造一个 role 不同的记录并提交更新
    let mut row = CollaboratorRow::try_from(&saved)?;
    row.role = "FROTA".to_string();
    row.pontuacao = 11;
    let forged = CollaboratorRecord::try_from(row)?;
    assert_eq!(forged.role(), "FROTA");

    let updated = repo.update(&forged).await?;
    assert_eq!(updated.role(), "TARM");
    assert_eq!(updated.pontuacao(), 11);

    let joined = repo.load_joined(&id).await?.expect("stored");
    assert_eq!(joined.record.role(), "TARM");
    assert_eq!(
        joined.details,
        Some(SubtypeDetails::Tarm(TarmDetails::default()))
    );
    Ok(())
}

pub async fn concurrent_updaters_race_on_one_version<R>(repo: Arc<R>) -> anyhow::Result<()>
where
    R: CollaboratorRepository + 'static,
{
    let saved = repo.insert(&ana()).await?;
    let id = saved.id().cloned().expect("id");

    let mut handles = Vec::new();
    for score in 0..8 {
        let repo = Arc::clone(&repo);
        let mut change = saved.clone();
        change.set_pontuacao(score);
        handles.push(tokio::spawn(async move { repo.update(&change).await }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => ok += 1,
            Err(DomainError::OptimisticConflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(conflicts, 7);

    let current = repo.find(&id).await?.expect("stored");
    assert_eq!(current.version(), Some(Version::from_value(1)));
    Ok(())
}

pub async fn sequential_updates_increment_by_one<R: CollaboratorRepository>(
    repo: &R,
) -> anyhow::Result<()> {
    let mut record = repo.insert(&ana()).await?;
    for expected in 1..=5 {
        record.set_pontuacao(record.pontuacao() + 1);
        record = repo.update(&record).await?;
        assert_eq!(record.version(), Some(Version::from_value(expected)));
    }
    assert_eq!(record.pontuacao(), 90);
    Ok(())
}

pub async fn unsaved_and_unknown_records_are_rejected<R: CollaboratorRepository>(
    repo: &R,
) -> anyhow::Result<()> {
    assert!(matches!(
        repo.update(&ana()).await,
        Err(DomainError::NotPersisted { .. })
    ));
    assert!(matches!(
        repo.delete(&ana()).await,
        Err(DomainError::NotPersisted { .. })
    ));

    let saved = repo.insert(&ana()).await?;
    assert!(matches!(
        repo.insert(&saved).await,
        Err(DomainError::AlreadyPersisted { .. })
    ));

    let mut row = CollaboratorRow::try_from(&saved)?;
    row.id = "missing".to_string();
    let ghost = CollaboratorRecord::try_from(row)?;
    assert!(matches!(
        repo.update(&ghost).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(repo.find(&CollaboratorId::new("missing".into())).await?.is_none());
    assert!(repo.load_joined(&CollaboratorId::new("missing".into())).await?.is_none());
    Ok(())
}

pub async fn delete_is_version_checked<R: CollaboratorRepository>(repo: &R) -> anyhow::Result<()> {
    let saved = repo
        .insert(&CollaboratorRecord::new("Dora", "2", "r-2", 0, "FROTA", None))
        .await?;
    let id = saved.id().cloned().expect("id");

    let mut change = saved.clone();
    change.set_nome("Dora M.");
    let updated = repo.update(&change).await?;

    assert!(matches!(
        repo.delete(&saved).await,
        Err(DomainError::OptimisticConflict { .. })
    ));
    assert!(repo.find(&id).await?.is_some());

    repo.delete(&updated).await?;
    assert!(repo.find(&id).await?.is_none());
    assert!(repo.load_joined(&id).await?.is_none());
    assert!(matches!(
        repo.delete(&updated).await,
        Err(DomainError::NotFound { .. })
    ));
    Ok(())
}

pub async fn subtype_details_follow_role<R: CollaboratorRepository>(
    repo: &R,
) -> anyhow::Result<()> {
    let frota = repo
        .insert(&CollaboratorRecord::new("Eva", "3", "r-3", 0, "FROTA", None))
        .await?;
    let id = frota.id().cloned().expect("id");

    let details = SubtypeDetails::Frota(FrotaDetails {
        tempo_saida_vtr: 95,
        tempo_regulacao_frota: 240,
        pausas_mensal: 3600,
    });
    let bumped = repo.update_details(&frota, &details).await?;
    assert_eq!(bumped.version(), Some(Version::from_value(1)));

    let joined = repo.load_joined(&id).await?.expect("stored");
    assert_eq!(joined.record, bumped);
    assert_eq!(joined.details, Some(details.clone()));

    // 过期版本
    assert!(matches!(
        repo.update_details(&frota, &details).await,
        Err(DomainError::OptimisticConflict { .. })
    ));

    // 明细类型与 role 不符时回滚，版本不变
    let wrong = SubtypeDetails::Tarm(TarmDetails::default());
    assert!(matches!(
        repo.update_details(&bumped, &wrong).await,
        Err(DomainError::ConstraintViolation { .. })
    ));
    let after = repo.load_joined(&id).await?.expect("stored");
    assert_eq!(after.record.version(), Some(Version::from_value(1)));
    assert_eq!(after.details, Some(details));

    // 未知角色只有基表
    let agent = repo.insert(&ana()).await?;
    let joined = repo
        .load_joined(agent.id().expect("id"))
        .await?
        .expect("stored");
    assert_eq!(joined.details, None);
    assert!(matches!(
        repo.update_details(&agent, &wrong).await,
        Err(DomainError::ConstraintViolation { .. })
    ));
    Ok(())
}

pub async fn list_orders_by_name<R: CollaboratorRepository>(repo: &R) -> anyhow::Result<()> {
    for nome in ["Zeca", "Ana", "Maria"] {
        repo.insert(&CollaboratorRecord::new(nome, "", "", 0, "AGENT", None))
            .await?;
    }
    let names: Vec<String> = repo
        .list()
        .await?
        .iter()
        .map(|r| r.nome().to_string())
        .collect();
    assert_eq!(names, ["Ana", "Maria", "Zeca"]);
    Ok(())
}

pub async fn identifier_generation_failure_is_fatal<R: CollaboratorRepository>(
    repo: &R,
) -> anyhow::Result<()> {
    assert!(matches!(
        repo.insert(&ana()).await,
        Err(DomainError::IdentifierGeneration { .. })
    ));
    assert!(repo.list().await?.is_empty());
    Ok(())
}

pub async fn duplicate_id_is_a_constraint_violation<R: CollaboratorRepository>(
    repo: &R,
) -> anyhow::Result<()> {
    let first = repo.insert(&ana()).await?;
    assert_eq!(first.id().map(|id| id.as_str()), Some("fixed-id"));

    assert!(matches!(
        repo.insert(&ana()).await,
        Err(DomainError::ConstraintViolation { .. })
    ));
    assert_eq!(repo.list().await?.len(), 1);
    Ok(())
}

pub async fn version_limit_is_a_constraint_violation<R: CollaboratorRepository>(
    repo: &R,
) -> anyhow::Result<()> {
    let last = Version::from_value(i64::MAX as usize);
    let saved = repo
        .insert(&CollaboratorRecord::new("Gil", "5", "r-5", 70, "TARM", Some(last)))
        .await?;
    let id = saved.id().cloned().expect("id");
    assert_eq!(saved.version(), Some(last));

    let mut change = saved.clone();
    change.set_pontuacao(71);
    assert!(matches!(
        repo.update(&change).await,
        Err(DomainError::ConstraintViolation { .. })
    ));
    assert!(matches!(
        repo.update_details(&saved, &SubtypeDetails::Tarm(TarmDetails::default()))
            .await,
        Err(DomainError::ConstraintViolation { .. })
    ));

    // 记录保持可读且未被改动
    assert_eq!(repo.find(&id).await?, Some(saved.clone()));
    repo.delete(&saved).await?;
    assert!(repo.find(&id).await?.is_none());
    Ok(())
}
