use std::{fmt, sync::Arc};

use tracing::{info, warn};

use canopy_model::CANONICAL_ROLES;

use crate::database::ports::roles::RolesStore;
use crate::error::StoreResult;

/// Applies the canonical role table once at startup.
pub struct RoleBootstrapService {
    repo: Arc<dyn RolesStore>,
}

impl fmt::Debug for RoleBootstrapService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleBootstrapService")
            .field("repo", &"Arc<dyn RolesStore>")
            .finish()
    }
}

/// What a seeding pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub existing: usize,
}

impl RoleBootstrapService {
    pub fn new(repo: Arc<dyn RolesStore>) -> Self {
        Self { repo }
    }

    /// Insert every canonical role that is missing. Existing rows are left
    /// as they are, so running this again is a no-op.
    pub async fn ensure_defaults(&self) -> StoreResult<SeedReport> {
        let mut report = SeedReport::default();

        for role in CANONICAL_ROLES.iter() {
            match self.repo.find_by_id(role.id).await? {
                Some(existing) => {
                    if existing.name != role.name {
                        warn!(
                            role_id = %role.id,
                            expected = %role.name,
                            found = %existing.name,
                            "stored role does not match canonical table"
                        );
                    }
                    report.existing += 1;
                }
                None => {
                    self.repo.save(role).await?;
                    report.inserted += 1;
                }
            }
        }

        info!(
            inserted = report.inserted,
            existing = report.existing,
            "role table seeded"
        );
        Ok(report)
    }
}
