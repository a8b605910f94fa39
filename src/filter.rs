//! Filter and join passes over the loaded snapshots
//!
//! Selects mac bots on masters that survive the blocklist, derives the
//! builders they run and joins those builders to their backing hostnames.
//! Every view is recomputed from the snapshots on each call.

use crate::blocklist::Blocklist;
use crate::error::{InventoryError, Result};
use crate::snapshot::{Bot, BuilderHost, Record};
use std::collections::{BTreeSet, HashMap};

/// Relevant bots grouped by master, in first-seen master order
#[derive(Debug, Default)]
pub struct MasterGroups<'a> {
    order: Vec<&'a str>,
    groups: HashMap<&'a str, Vec<Bot<'a>>>,
}

impl<'a> MasterGroups<'a> {
    fn push(&mut self, mastername: &'a str, bot: Bot<'a>) {
        let order = &mut self.order;
        self.groups
            .entry(mastername)
            .or_insert_with(|| {
                order.push(mastername);
                Vec::new()
            })
            .push(bot);
    }

    /// Master names in the order they were first encountered
    pub fn masters(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.order.iter().copied()
    }

    /// Bots of a master, in snapshot order
    pub fn get(&self, mastername: &str) -> Option<&[Bot<'a>]> {
        self.groups.get(mastername).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// master -> builder -> hostnames
pub type HostIndex<'a> = HashMap<&'a str, HashMap<&'a str, Vec<&'a str>>>;

/// Both snapshots plus the rules used to filter them
#[derive(Debug, Clone)]
pub struct Inventory {
    bots: Vec<Record>,
    builder_hosts: Vec<Record>,
    blocklist: Blocklist,
}

impl Inventory {
    pub fn new(bots: Vec<Record>, builder_hosts: Vec<Record>, blocklist: Blocklist) -> Self {
        Self {
            bots,
            builder_hosts,
            blocklist,
        }
    }

    /// Group mac bots by master, skipping blocked masters
    pub fn relevant_bots_by_master(&self) -> Result<MasterGroups<'_>> {
        let mut groups = MasterGroups::default();
        let mut blocked = 0usize;

        for bot in self.bots.iter().map(Bot::new) {
            if !bot.is_mac() {
                continue;
            }

            let mastername = bot.mastername()?;
            if self.blocklist.is_master_blocked(mastername) {
                tracing::trace!(master = mastername, "skipping blocked master");
                blocked += 1;
                continue;
            }

            groups.push(mastername, bot);
        }

        tracing::debug!(
            bots = self.bots.len(),
            masters = groups.len(),
            blocked,
            "grouped relevant bots"
        );
        Ok(groups)
    }

    /// Sorted, unique builders run by the relevant bots of `mastername`
    pub fn builders_for_master(&self, mastername: &str) -> Result<Vec<String>> {
        let groups = self.relevant_bots_by_master()?;
        let bots = groups.get(mastername).ok_or_else(|| {
            InventoryError::Lookup(format!("no relevant mac bots for master '{}'", mastername))
        })?;

        let mut builders = BTreeSet::new();
        for bot in bots {
            for builder in bot.builders()? {
                if self.blocklist.is_builder_blocked(builder) {
                    tracing::trace!(builder, "skipping blocked builder");
                    continue;
                }
                builders.insert(builder);
            }
        }

        tracing::debug!(
            master = mastername,
            bots = bots.len(),
            builders = builders.len(),
            "collected builders"
        );
        Ok(builders.into_iter().map(str::to_string).collect())
    }

    /// Index the builder snapshot by master, then builder name.
    ///
    /// Builder names are only unique within a master. A repeated
    /// (master, builder) pair keeps the last entry.
    pub fn host_index(&self) -> Result<HostIndex<'_>> {
        let mut index: HostIndex<'_> = HashMap::new();

        for entry in self.builder_hosts.iter().map(BuilderHost::new) {
            let mastername = entry.mastername()?;
            let builder = entry.builder()?;
            let hostnames = entry.hostnames()?;

            if index
                .entry(mastername)
                .or_default()
                .insert(builder, hostnames)
                .is_some()
            {
                tracing::debug!(
                    master = mastername,
                    builder,
                    "duplicate builder entry, keeping last"
                );
            }
        }

        Ok(index)
    }

    /// Hostnames of each builder under `mastername`, in the given order
    pub fn builder_hosts(
        &self,
        mastername: &str,
        builders: &[String],
    ) -> Result<Vec<(String, Vec<String>)>> {
        let index = self.host_index()?;
        let by_builder = index.get(mastername).ok_or_else(|| {
            InventoryError::Lookup(format!("master '{}' not in builder snapshot", mastername))
        })?;

        builders
            .iter()
            .map(|builder| {
                let hostnames = by_builder.get(builder.as_str()).ok_or_else(|| {
                    InventoryError::Lookup(format!(
                        "builder '{}' of master '{}' not in builder snapshot",
                        builder, mastername
                    ))
                })?;
                Ok((
                    builder.clone(),
                    hostnames.iter().map(|h| h.to_string()).collect(),
                ))
            })
            .collect()
    }

    /// Sorted, unique hostnames backing `builders` under `mastername`
    pub fn hostnames_for_builders(
        &self,
        mastername: &str,
        builders: &[String],
    ) -> Result<Vec<String>> {
        let hostnames: BTreeSet<String> = self
            .builder_hosts(mastername, builders)?
            .into_iter()
            .flat_map(|(_, hostnames)| hostnames)
            .collect();

        tracing::debug!(
            master = mastername,
            builders = builders.len(),
            hostnames = hostnames.len(),
            "joined hostnames"
        );
        Ok(hostnames.into_iter().collect())
    }
}
