// Management API client: credential validation and user role administration
//
// Every method is one independent round trip (two for `delete_role`). Nothing
// is cached and nothing is retried; success codes are matched exactly.

use crate::config::EdgeConfig;
use crate::error::{describe_failure, EdgeError, EdgeResult};
use crate::http::{EdgeHttpClient, HttpResponse};
use crate::logging::request_span;
use crate::models::{
    AddPermissionsRequest, CreateRoleRequest, Organization, ResourcePermission,
    ResourcePermissionList, Role,
};
use tracing::{debug, info, warn, Instrument};

/// Client for one Edge organization.
#[derive(Debug, Clone)]
pub struct EdgeManagementClient {
    http: EdgeHttpClient,
    organization: String,
}

impl EdgeManagementClient {
    /// Validate `config` and build a client scoped to its organization.
    pub fn new(config: EdgeConfig) -> EdgeResult<Self> {
        let config = config.validate()?;
        let http = EdgeHttpClient::new(config.organization_url(), config.credentials(), &config.http)?;

        Ok(Self {
            http,
            organization: config.organization,
        })
    }

    /// Build a client from the `APIGEE_EDGE_*` environment variables.
    pub fn from_env() -> EdgeResult<Self> {
        Self::new(EdgeConfig::from_env()?)
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn http(&self) -> &EdgeHttpClient {
        &self.http
    }

    /// Fetch the organization with the configured credentials.
    ///
    /// Anything but a 200 whose body names the configured organization is an
    /// authentication failure, including a 200 for a different organization.
    pub async fn validate_credentials(&self) -> EdgeResult<Organization> {
        async {
            let response = self.http.get("").send().await?;
            let status = response.status().as_u16();

            if status != 200 {
                let (status, message) = failure(response).await;
                warn!(status, "Edge rejected organization credentials");
                return Err(EdgeError::authentication(Some(status), message));
            }

            let text = response.text().await?;
            let body: serde_json::Value = serde_json::from_str(&text).map_err(|_| {
                EdgeError::authentication(Some(status), "Organization response is not a JSON document")
            })?;

            let name = body
                .get("name")
                .and_then(|name| name.as_str())
                .ok_or_else(|| {
                    EdgeError::authentication(Some(status), "Organization response has no name attribute")
                })?;

            if name != self.organization {
                warn!(returned = name, "Edge returned a different organization");
                return Err(EdgeError::authentication(
                    Some(status),
                    format!(
                        "Organization name {} does not match configured organization {}",
                        name, self.organization
                    ),
                ));
            }

            serde_json::from_value::<Organization>(body).map_err(|e| EdgeError::Decode {
                message: format!("Failed to decode organization: {}", e),
                source: Some(Box::new(e)),
            })
        }
        .instrument(request_span("validate_credentials", &self.organization))
        .await
    }

    /// 200 means the role exists and 404 that it does not. Any other status
    /// is reported as an error rather than guessed at.
    pub async fn role_exists(&self, role: &str) -> EdgeResult<bool> {
        ensure_role_name(role)?;
        async {
            let response = self.http.get(&role_path(role)).send().await?;
            match response.status().as_u16() {
                200 => Ok(true),
                404 => Ok(false),
                _ => {
                    let (status, message) = failure(response).await;
                    Err(EdgeError::unexpected_status(
                        status,
                        format!("Checking role {}: {}", role, message),
                    ))
                }
            }
        }
        .instrument(request_span("role_exists", &self.organization))
        .await
    }

    /// Create a role. Only 201 counts as created; an existing role is an
    /// error whether Edge answers 409 or 200.
    pub async fn create_role(&self, role: &str) -> EdgeResult<()> {
        ensure_role_name(role)?;
        async {
            let response = self
                .http
                .post("/userroles")
                .json(&CreateRoleRequest { role: [role] })
                .send()
                .await?;

            if response.status().as_u16() == 201 {
                info!(role, "Created role");
                return Ok(());
            }

            let (status, message) = failure(response).await;
            Err(EdgeError::RoleCreation {
                role: role.to_string(),
                status,
                message,
            })
        }
        .instrument(request_span("create_role", &self.organization))
        .await
    }

    /// Grant `allowed_actions` on `resource_path`. Edge appends a new entry
    /// even when the path already has one.
    pub async fn add_permissions<I, S>(
        &self,
        role: &str,
        resource_path: &str,
        allowed_actions: I,
    ) -> EdgeResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ensure_role_name(role)?;
        let actions: Vec<String> = allowed_actions.into_iter().map(Into::into).collect();

        async {
            let response = self
                .http
                .post(&permissions_path(role))
                .json(&AddPermissionsRequest {
                    path: resource_path,
                    permissions: &actions,
                })
                .send()
                .await?;

            if response.status().as_u16() == 201 {
                info!(role, path = resource_path, actions = ?actions, "Added permissions");
                return Ok(());
            }

            let (status, message) = failure(response).await;
            Err(EdgeError::Permission {
                role: role.to_string(),
                path: resource_path.to_string(),
                status,
                message,
            })
        }
        .instrument(request_span("add_permissions", &self.organization))
        .await
    }

    /// Delete a role if it exists; absent roles are a no-op.
    ///
    /// This is a GET followed by a DELETE and is not atomic: a role created by
    /// someone else in between survives. A 404 on the DELETE (someone else
    /// removed it first) is treated as done. Use `delete_role_if_exists` for
    /// a single round trip.
    pub async fn delete_role(&self, role: &str) -> EdgeResult<()> {
        if !self.role_exists(role).await? {
            debug!(role, "Role absent, nothing to delete");
            return Ok(());
        }

        self.delete_role_if_exists(role).await.map(|_| ())
    }

    /// Single DELETE. Returns whether a role was removed; 404 is `Ok(false)`.
    pub async fn delete_role_if_exists(&self, role: &str) -> EdgeResult<bool> {
        ensure_role_name(role)?;
        async {
            let response = self.http.delete(&role_path(role)).send().await?;
            let status = response.status();

            if status.is_success() {
                info!(role, "Deleted role");
                return Ok(true);
            }
            if status.as_u16() == 404 {
                debug!(role, "Role already gone");
                return Ok(false);
            }

            let (status, message) = failure(response).await;
            Err(EdgeError::unexpected_status(
                status,
                format!("Deleting role {}: {}", role, message),
            ))
        }
        .instrument(request_span("delete_role", &self.organization))
        .await
    }

    /// Names of every user role in the organization.
    pub async fn list_roles(&self) -> EdgeResult<Vec<String>> {
        async {
            let response = self.http.get("/userroles").send().await?;
            if response.status().as_u16() != 200 {
                let (status, message) = failure(response).await;
                return Err(EdgeError::unexpected_status(
                    status,
                    format!("Listing roles: {}", message),
                ));
            }
            response.json::<Vec<String>>().await
        }
        .instrument(request_span("list_roles", &self.organization))
        .await
    }

    /// Permission entries of a role, in the order Edge returns them.
    pub async fn role_permissions(&self, role: &str) -> EdgeResult<Vec<ResourcePermission>> {
        ensure_role_name(role)?;
        async {
            let response = self.http.get(&permissions_path(role)).send().await?;
            if response.status().as_u16() != 200 {
                let (status, message) = failure(response).await;
                return Err(EdgeError::unexpected_status(
                    status,
                    format!("Reading permissions of role {}: {}", role, message),
                ));
            }
            let list: ResourcePermissionList = response.json().await?;
            Ok(list.resource_permission)
        }
        .instrument(request_span("role_permissions", &self.organization))
        .await
    }

    /// A role together with its permissions.
    pub async fn role(&self, role: &str) -> EdgeResult<Role> {
        let permissions = self.role_permissions(role).await?;
        Ok(Role {
            name: role.to_string(),
            permissions,
        })
    }
}

fn ensure_role_name(role: &str) -> EdgeResult<()> {
    if role.trim().is_empty() {
        return Err(EdgeError::config("role name must not be empty"));
    }
    // URL parsing resolves dot segments, which would address the organization
    if role == "." || role == ".." {
        return Err(EdgeError::config(format!("role name {} is not a valid path segment", role)));
    }
    Ok(())
}

fn role_path(role: &str) -> String {
    format!("/userroles/{}", urlencoding::encode(role))
}

fn permissions_path(role: &str) -> String {
    format!("{}/permissions", role_path(role))
}

/// Status and best description of a failed response. The body is read
/// leniently since the status already decides the outcome.
async fn failure(response: HttpResponse) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    (status, describe_failure(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_are_path_encoded() {
        assert_eq!(role_path("temp_role"), "/userroles/temp_role");
        assert_eq!(role_path("ops team/admin"), "/userroles/ops%20team%2Fadmin");
        assert_eq!(permissions_path("temp_role"), "/userroles/temp_role/permissions");
    }

    #[test]
    fn empty_role_name_is_rejected() {
        assert!(ensure_role_name("").is_err());
        assert!(ensure_role_name("  ").is_err());
        assert!(ensure_role_name("temp_role").is_ok());
    }

    #[test]
    fn dot_segments_are_rejected_as_role_names() {
        assert!(matches!(ensure_role_name(".."), Err(EdgeError::Config { .. })));
        assert!(matches!(ensure_role_name("."), Err(EdgeError::Config { .. })));
        assert!(ensure_role_name("..admins").is_ok());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = EdgeConfig {
            endpoint: "https://edge.example.com/v1".to_string(),
            organization: "acme".to_string(),
            username: String::new(),
            password: "p".to_string(),
            http: Default::default(),
        };
        assert!(matches!(
            EdgeManagementClient::new(config),
            Err(EdgeError::Config { .. })
        ));
    }
}
