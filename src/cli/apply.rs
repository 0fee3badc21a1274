//! Scenario execution wiring: session id, journal, confirmation, orchestrator.
//!
//! Shared by the interactive menu and the `usblock apply` command — both go
//! through the same confirmation gate and the same audited write path.

use crate::audit::{AuditLogger, AuditedStore};
use crate::devices::DeviceInventory;
use crate::scenario::{Orchestrator, Outcome, Scenario, TerminalPrompt};
use crate::store::PolicyStore;
use anyhow::Result;

/// Run one scenario against the given store and inventory, journaling every
/// write. Journal setup failure downgrades to an unaudited run with a
/// warning — the lockdown itself must not depend on the home directory.
pub fn execute_scenario(
    scenario: Scenario,
    store: &mut dyn PolicyStore,
    inventory: &dyn DeviceInventory,
) -> Result<Outcome> {
    let session_id = uuid::Uuid::new_v4().to_string();
    let mut prompt = TerminalPrompt::new();

    match AuditLogger::new(&session_id) {
        Ok(mut logger) => {
            let mut audited = AuditedStore::new(store, &mut logger, &session_id, scenario.name());
            Orchestrator::new(&mut audited, inventory, &mut prompt).run(scenario)
        }
        Err(e) => {
            tracing::warn!("journal unavailable, applying without audit: {}", e);
            Orchestrator::new(store, inventory, &mut prompt).run(scenario)
        }
    }
}
