//! Inventory builder

use ansiblekit::Inventory;

use crate::intent::DeploymentIntent;

pub const WEB_SERVERS: &str = "web_servers";
pub const DATABASE_SERVERS: &str = "database_servers";

/// Two groups, one host each. When web and database share a host the
/// database system user is the one that sticks.
pub fn build_inventory(intent: &DeploymentIntent) -> Inventory {
    let mut inventory = Inventory::new();
    inventory.add_groups([WEB_SERVERS, DATABASE_SERVERS]);

    inventory.add_host(&intent.web_host, WEB_SERVERS);
    inventory.set_ansible_user(&intent.web_host, &intent.web_user);

    inventory.add_host(&intent.database_system_host, DATABASE_SERVERS);
    inventory.set_ansible_user(&intent.database_system_host, &intent.database_system_user);

    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    fn user_of<'a>(inventory: &'a Inventory, host: &str) -> &'a str {
        inventory
            .host_vars(host)
            .and_then(|vars| vars.get("ansible_user"))
            .unwrap()
    }

    #[test]
    fn test_single_host_in_both_groups() {
        let intent = DeploymentIntent::builder("deploy", "example.com", Action::LampStack).build();
        let inventory = build_inventory(&intent);
        assert_eq!(inventory.hosts(WEB_SERVERS).unwrap(), ["example.com"]);
        assert_eq!(inventory.hosts(DATABASE_SERVERS).unwrap(), ["example.com"]);
        assert_eq!(user_of(&inventory, "example.com"), "deploy");
    }

    #[test]
    fn test_separate_database_host() {
        let intent = DeploymentIntent::builder("deploy", "example.com", Action::LampStack)
            .database_system_user("dbadmin")
            .database_system_host("db.example.com")
            .build();
        let inventory = build_inventory(&intent);
        assert_eq!(inventory.hosts(DATABASE_SERVERS).unwrap(), ["db.example.com"]);
        assert_eq!(user_of(&inventory, "example.com"), "deploy");
        assert_eq!(user_of(&inventory, "db.example.com"), "dbadmin");
    }

    #[test]
    fn test_shared_host_uses_database_user() {
        let intent = DeploymentIntent::builder("deploy", "example.com", Action::LampStack)
            .database_system_user("dbadmin")
            .build();
        let inventory = build_inventory(&intent);
        assert_eq!(user_of(&inventory, "example.com"), "dbadmin");
    }

    #[test]
    fn test_yaml_has_both_groups() {
        let intent = DeploymentIntent::builder("deploy", "example.com", Action::Apache).build();
        let yaml = build_inventory(&intent).to_yaml().unwrap();
        assert!(yaml.contains("web_servers"));
        assert!(yaml.contains("database_servers"));
        assert!(yaml.contains("ansible_user: deploy"));
    }
}
