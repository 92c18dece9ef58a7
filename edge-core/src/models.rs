// Wire types for the Edge management API

use serde::{Deserialize, Serialize};

/// An Edge organization as returned by `GET /o/{org}`.
///
/// Only `name` is guaranteed; Edge returns many more attributes which are
/// ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub org_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<String>>,
}

/// Actions granted on one resource path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePermission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub path: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl ResourcePermission {
    pub fn new<I, S>(path: impl Into<String>, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            organization: None,
            path: path.into(),
            permissions: actions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, action: &str) -> bool {
        self.permissions.iter().any(|granted| granted == action)
    }
}

/// A user role and the permissions attached to it, in the order Edge
/// reports them. Entries for the same path are not merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    pub permissions: Vec<ResourcePermission>,
}

impl Role {
    /// Every entry for `path`
    pub fn permissions_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ResourcePermission> + 'a {
        self.permissions.iter().filter(move |entry| entry.path == path)
    }
}

/// Body of `POST /o/{org}/userroles`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateRoleRequest<'a> {
    pub role: [&'a str; 1],
}

/// Body of `POST /o/{org}/userroles/{role}/permissions`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AddPermissionsRequest<'a> {
    pub path: &'a str,
    pub permissions: &'a [String],
}

/// Body of `GET /o/{org}/userroles/{role}/permissions`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourcePermissionList {
    #[serde(default)]
    pub resource_permission: Vec<ResourcePermission>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn organization_ignores_unknown_attributes() {
        let org: Organization = serde_json::from_value(json!({
            "name": "acme",
            "displayName": "Acme Inc",
            "type": "paid",
            "environments": ["test", "prod"],
            "createdAt": 1546300800000u64,
            "properties": { "property": [] }
        }))
        .unwrap();
        assert_eq!(org.name, "acme");
        assert_eq!(org.display_name.as_deref(), Some("Acme Inc"));
        assert_eq!(org.org_type.as_deref(), Some("paid"));
        assert_eq!(org.environments, Some(vec!["test".to_string(), "prod".to_string()]));
    }

    #[test]
    fn organization_accepts_null_environments() {
        let org: Organization = serde_json::from_value(json!({
            "name": "acme",
            "displayName": null,
            "environments": null
        }))
        .unwrap();
        assert_eq!(org.name, "acme");
        assert_eq!(org.environments, None);
        assert_eq!(org.display_name, None);
    }

    #[test]
    fn request_bodies_match_wire_shape() {
        assert_eq!(
            serde_json::to_value(CreateRoleRequest { role: ["temp_role"] }).unwrap(),
            json!({ "role": ["temp_role"] })
        );

        let actions = vec!["get".to_string(), "put".to_string()];
        assert_eq!(
            serde_json::to_value(AddPermissionsRequest { path: "/developers", permissions: &actions }).unwrap(),
            json!({ "path": "/developers", "permissions": ["get", "put"] })
        );
    }

    #[test]
    fn role_keeps_duplicate_paths_separate() {
        let role = Role {
            name: "temp_role".to_string(),
            permissions: vec![
                ResourcePermission::new("/developers", ["get"]),
                ResourcePermission::new("/apps", ["get"]),
                ResourcePermission::new("/developers", ["put"]),
            ],
        };
        let entries: Vec<_> = role.permissions_for("/developers").collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].allows("put"));
        assert!(!entries[0].allows("put"));
    }
}
