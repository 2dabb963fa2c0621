//! Static inventory model and its YAML rendering.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Host groups with per-host variables.
///
/// Groups and their hosts keep insertion order. A host may belong to
/// several groups; its variables are shared across all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    groups: Vec<(String, Vec<String>)>,
    host_vars: BTreeMap<String, BTreeMap<String, String>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add empty groups. Existing groups are left alone.
    pub fn add_groups<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.groups.iter().any(|(g, _)| *g == name) {
                self.groups.push((name, Vec::new()));
            }
        }
    }

    /// Add a host to a group, creating the group if needed.
    pub fn add_host(&mut self, host: &str, group: &str) {
        self.add_groups([group]);
        if let Some((_, hosts)) = self.groups.iter_mut().find(|(g, _)| g == group)
            && !hosts.iter().any(|h| h == host)
        {
            hosts.push(host.to_string());
        }
    }

    /// Set a host variable. Later writes win.
    pub fn set_host_var(&mut self, host: &str, key: &str, value: &str) {
        self.host_vars
            .entry(host.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Set the remote login user for a host.
    pub fn set_ansible_user(&mut self, host: &str, user: &str) {
        self.set_host_var(host, "ansible_user", user);
    }

    /// Hosts of a group, if it exists.
    pub fn hosts(&self, group: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(g, _)| g == group)
            .map(|(_, hosts)| hosts.as_slice())
    }

    /// Variables of a host, if any were set.
    pub fn host_vars(&self, host: &str) -> Option<&BTreeMap<String, String>> {
        self.host_vars.get(host)
    }

    /// Render as a YAML inventory (`all.children.<group>.hosts.<host>`).
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let mut children = Mapping::new();
        for (group, hosts) in &self.groups {
            let mut host_map = Mapping::new();
            for host in hosts {
                let vars: Mapping = self
                    .host_vars
                    .get(host)
                    .map(|vars| {
                        vars.iter()
                            .map(|(k, v)| (Value::from(k.as_str()), Value::from(v.as_str())))
                            .collect()
                    })
                    .unwrap_or_default();
                let vars = if vars.is_empty() {
                    Value::Null
                } else {
                    Value::Mapping(vars)
                };
                host_map.insert(Value::from(host.as_str()), vars);
            }
            let mut group_map = Mapping::new();
            group_map.insert(Value::from("hosts"), Value::Mapping(host_map));
            children.insert(Value::from(group.as_str()), Value::Mapping(group_map));
        }

        let mut all = Mapping::new();
        all.insert(Value::from("children"), Value::Mapping(children));
        let mut root = Mapping::new();
        root.insert(Value::from("all"), Value::Mapping(all));

        serde_yaml::to_string(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_host_creates_group_once() {
        let mut inv = Inventory::new();
        inv.add_groups(["web_servers"]);
        inv.add_host("example.com", "web_servers");
        inv.add_host("example.com", "web_servers");
        assert_eq!(inv.hosts("web_servers").unwrap(), ["example.com"]);
    }

    #[test]
    fn test_later_user_wins_for_shared_host() {
        let mut inv = Inventory::new();
        inv.set_ansible_user("example.com", "deploy");
        inv.set_ansible_user("example.com", "dbadmin");
        assert_eq!(
            inv.host_vars("example.com").unwrap()["ansible_user"],
            "dbadmin"
        );
    }

    #[test]
    fn test_yaml_round_trips_through_serde() {
        let mut inv = Inventory::new();
        inv.add_groups(["web_servers", "database_servers"]);
        inv.add_host("web.example.com", "web_servers");
        inv.add_host("db.example.com", "database_servers");
        inv.set_ansible_user("web.example.com", "deploy");

        let yaml = inv.to_yaml().unwrap();
        let parsed: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed["all"]["children"]["web_servers"]["hosts"]["web.example.com"]["ansible_user"],
            Value::from("deploy")
        );
        assert!(
            parsed["all"]["children"]["database_servers"]["hosts"]["db.example.com"].is_null()
        );
    }
}
