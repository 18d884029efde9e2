//! The agents of a run and the order they speak in.

use crate::{Agent, AgentProfile, AgentRole, Memory, Scenario};
use showrunner_error::{ConfigError, ShowrunnerResult};
use showrunner_interface::ModelDriver;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Every agent in a run, plus the fixed order in which they take turns.
///
/// Agents outside the order (typically prompt helpers) stay available by
/// name for the asset stage.
#[derive(Debug)]
pub struct Cast {
    agents: Vec<Agent>,
    order: Vec<usize>,
}

impl Cast {
    /// Build a cast, checking names are unique and the order refers to known agents.
    ///
    /// When `order` is `None`, every non-helper agent speaks in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for blank identity fields, duplicate
    /// names, unknown names in the order, or an empty order.
    pub fn new(agents: Vec<Agent>, order: Option<&[String]>) -> ShowrunnerResult<Self> {
        let profiles: Vec<&AgentProfile> = agents.iter().map(Agent::profile).collect();
        let order = resolve_order(&profiles, order)?;
        Ok(Self { agents, order })
    }

    /// Build the cast a scenario describes, every agent sharing one driver.
    ///
    /// Base observations are loaded into each agent's memory.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the scenario's cast is invalid.
    #[instrument(skip_all, fields(agents = scenario.agents().len()))]
    pub fn from_scenario(
        scenario: &Scenario,
        driver: Arc<dyn ModelDriver>,
    ) -> ShowrunnerResult<Self> {
        let agents = scenario
            .agents()
            .iter()
            .map(|profile| {
                let mut agent = Agent::new(profile.clone(), Arc::clone(&driver));
                agent.load_observations(profile.base_observations().iter().cloned());
                agent
            })
            .collect();
        let cast = Self::new(agents, scenario.scene().order().as_deref())?;
        debug!(order = ?cast.order_names(), "Cast assembled");
        Ok(cast)
    }

    /// All agents in declaration order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Names of the agents that take turns, in turn order.
    pub fn order_names(&self) -> Vec<&str> {
        self.order.iter().map(|&i| self.agents[i].name()).collect()
    }

    /// Number of agent invocations per turn.
    pub fn turn_length(&self) -> usize {
        self.order.len()
    }

    /// Look up an agent by name.
    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name() == name)
    }

    /// The first agent with `role`, in declaration order.
    pub fn first_with_role(&self, role: AgentRole) -> Option<&Agent> {
        self.agents.iter().find(|a| a.role() == role)
    }

    pub(crate) fn order(&self) -> &[usize] {
        &self.order
    }

    pub(crate) fn agent_at_mut(&mut self, index: usize) -> &mut Agent {
        &mut self.agents[index]
    }

    /// Index of the script writer that takes turns, if any.
    pub(crate) fn script_writer_index(&self) -> Option<usize> {
        self.order
            .iter()
            .copied()
            .find(|&i| self.agents[i].role() == AgentRole::ScriptWriter)
    }

    pub(crate) fn snapshot_memories(&self) -> Vec<Memory> {
        self.agents.iter().map(|a| a.memory().clone()).collect()
    }

    pub(crate) fn restore_memories(&mut self, snapshot: Vec<Memory>) {
        for (agent, memory) in self.agents.iter_mut().zip(snapshot) {
            agent.restore_memory(memory);
        }
    }
}

/// Validate profiles and turn an order of names into indices.
pub(crate) fn resolve_order(
    profiles: &[&AgentProfile],
    order: Option<&[String]>,
) -> Result<Vec<usize>, ConfigError> {
    let mut seen = HashSet::new();
    for profile in profiles {
        profile.validate()?;
        if !seen.insert(profile.name().as_str()) {
            return Err(ConfigError::new(format!(
                "agent name '{}' is used more than once",
                profile.name()
            )));
        }
    }

    let indices: Vec<usize> = match order {
        Some(names) => names
            .iter()
            .map(|name| {
                profiles
                    .iter()
                    .position(|p| p.name() == name)
                    .ok_or_else(|| {
                        ConfigError::new(format!("turn order names unknown agent '{}'", name))
                    })
            })
            .collect::<Result<_, _>>()?,
        None => profiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.role().in_default_order())
            .map(|(i, _)| i)
            .collect(),
    };

    if indices.is_empty() {
        return Err(ConfigError::new("turn order is empty"));
    }
    Ok(indices)
}
