//! 基于内存的仓储实现
//!
//! `DashMap` 的条目锁保证同一标识上的“比较并递增”是原子的；
//! 锁只在单次调用内部持有。
//!
use crate::collaborator::{Collaborator, CollaboratorId, CollaboratorRecord, SubtypeDetails};
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult as Result};
use crate::persist::{
    CollaboratorRepository, CollaboratorRow, IdGenerator, UuidIdGenerator,
    ensure_details_match_role, ensure_version, next_version, not_found,
};
use crate::value_object::Version;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
struct StoredCollaborator {
    row: CollaboratorRow,
    details: Option<SubtypeDetails>,
}

impl StoredCollaborator {
    fn version(&self) -> Result<Version> {
        Ok(Version::from_value(usize::try_from(self.row.version)?))
    }

    fn set_version(&mut self, version: Version) -> Result<()> {
        self.row.version = i64::try_from(version.value())?;
        Ok(())
    }

    fn to_record(&self) -> Result<CollaboratorRecord> {
        CollaboratorRecord::try_from(self.row.clone())
    }
}

pub struct InMemoryCollaboratorRepository {
    rows: DashMap<CollaboratorId, StoredCollaborator>,
    id_generator: Arc<dyn IdGenerator>,
}

impl Default for InMemoryCollaboratorRepository {
    fn default() -> Self {
        Self::new(Arc::new(UuidIdGenerator))
    }
}

impl InMemoryCollaboratorRepository {
    pub fn new(id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            rows: DashMap::new(),
            id_generator,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl CollaboratorRepository for InMemoryCollaboratorRepository {
    #[instrument(level = "debug", skip_all, fields(role = %record.role()))]
    async fn insert(&self, record: &CollaboratorRecord) -> Result<CollaboratorRecord> {
        if let Some(id) = record.id() {
            return Err(DomainError::AlreadyPersisted { id: id.to_string() });
        }

        let id = self.id_generator.generate()?;
        let mut persisted = record.clone();
        persisted.assign_identity(id.clone(), record.version().unwrap_or_default());

        let stored = StoredCollaborator {
            row: CollaboratorRow::try_from(&persisted)?,
            details: record.subtype().map(SubtypeDetails::empty),
        };

        match self.rows.entry(id.clone()) {
            Entry::Occupied(_) => Err(DomainError::ConstraintViolation {
                reason: format!("duplicate collaborator id {id}"),
            }),
            Entry::Vacant(slot) => {
                slot.insert(stored);
                debug!(%id, "collaborator inserted");
                Ok(persisted)
            }
        }
    }

    async fn find(&self, id: &CollaboratorId) -> Result<Option<CollaboratorRecord>> {
        self.rows.get(id).map(|stored| stored.to_record()).transpose()
    }

    #[instrument(level = "debug", skip_all, fields(id = ?record.id(), version = ?record.version()))]
    async fn update(&self, record: &CollaboratorRecord) -> Result<CollaboratorRecord> {
        let (id, expected) = record.persisted_identity()?;
        let mut stored = self.rows.get_mut(&id).ok_or_else(|| not_found(&id))?;
        ensure_version(&id, expected, stored.version()?)?;
        let next = next_version(&id, expected)?;

        stored.set_version(next)?;
        stored.row.nome = record.nome().to_string();
        stored.row.cpf = record.cpf().to_string();
        stored.row.id_call_rote = record.id_call_rote().to_string();
        stored.row.pontuacao = record.pontuacao();

        debug!(%id, version = stored.row.version, "collaborator updated");
        stored.to_record()
    }

    #[instrument(level = "debug", skip_all, fields(id = ?record.id(), version = ?record.version()))]
    async fn delete(&self, record: &CollaboratorRecord) -> Result<()> {
        let (id, expected) = record.persisted_identity()?;
        let removed = self.rows.remove_if(&id, |_, stored| {
            stored.version().is_ok_and(|actual| actual == expected)
        });
        if removed.is_some() {
            debug!(%id, "collaborator deleted");
            return Ok(());
        }

        match self.rows.get(&id) {
            Some(stored) => ensure_version(&id, expected, stored.version()?),
            None => Err(not_found(&id)),
        }
    }

    async fn list(&self) -> Result<Vec<CollaboratorRecord>> {
        let mut records = self
            .rows
            .iter()
            .map(|stored| stored.to_record())
            .collect::<Result<Vec<_>>>()?;
        records.sort_by(|a, b| {
            a.nome()
                .cmp(b.nome())
                .then_with(|| a.id().map(|id| id.as_str()).cmp(&b.id().map(|id| id.as_str())))
        });
        Ok(records)
    }

    async fn load_joined(&self, id: &CollaboratorId) -> Result<Option<Collaborator>> {
        let Some(stored) = self.rows.get(id) else {
            return Ok(None);
        };
        Ok(Some(Collaborator {
            record: stored.to_record()?,
            details: stored.details.clone(),
        }))
    }

    #[instrument(level = "debug", skip_all, fields(id = ?record.id(), subtype = ?details.kind()))]
    async fn update_details(
        &self,
        record: &CollaboratorRecord,
        details: &SubtypeDetails,
    ) -> Result<CollaboratorRecord> {
        let (id, expected) = record.persisted_identity()?;
        let mut stored = self.rows.get_mut(&id).ok_or_else(|| not_found(&id))?;
        ensure_version(&id, expected, stored.version()?)?;
        ensure_details_match_role(&stored.row.role, details)?;
        let next = next_version(&id, expected)?;

        stored.set_version(next)?;
        stored.details = Some(details.clone());

        debug!(%id, version = stored.row.version, "collaborator details updated");
        stored.to_record()
    }
}
