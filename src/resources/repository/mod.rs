//
//  bitbucket-provider
//  resources/repository/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The `bitbucket_repository` resource.
//!
//! A managed repository spans three remote records, each written with its
//! own request:
//!
//! | Record | Path |
//! |--------|------|
//! | Repository | `2.0/repositories/{owner}/{slug}` |
//! | Pipelines config | `.../pipelines_config` |
//! | Branching model | `.../branching-model/settings` |
//!
//! Create and update stop at the first failing request. Whatever was
//! already written stays written; the next read reconciles state with what
//! the API reports.

mod branching;
mod config;
mod schema;

pub use branching::*;
pub use config::RepositoryConfig;
pub use schema::{repository_schema, FORK_POLICIES};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Resource, ResourceError};
use crate::api::cloud::{
    branching_model_settings_path, pipelines_config_path, repository_path,
    BranchingModelSettings, PipelinesConfig, Repository,
};
use crate::api::HttpClient;
use crate::schema::{Schema, SchemaError};
use crate::state::ResourceData;

/// Type name under which the provider registers the resource.
pub const RESOURCE_NAME: &str = "bitbucket_repository";

/// Splits a resource id into `(owner, slug)`.
///
/// # Example
///
/// ```rust
/// use bitbucket_provider::resources::repository::parse_id;
///
/// let (owner, slug) = parse_id("acme/widgets").unwrap();
/// assert_eq!((owner.as_str(), slug.as_str()), ("acme", "widgets"));
/// assert!(parse_id("acme").is_err());
/// assert!(parse_id("acme/widgets/extra").is_err());
/// ```
pub fn parse_id(id: &str) -> Result<(String, String), ResourceError> {
    let parts: Vec<&str> = id.split('/').collect();
    match parts.as_slice() {
        [owner, slug] => Ok((owner.to_string(), slug.to_string())),
        _ => Err(ResourceError::InvalidId {
            id: id.to_string(),
            expected: "owner/slug",
        }),
    }
}

/// Manages a Bitbucket Cloud repository with its pipelines and branching
/// model settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct RepositoryResource;

impl RepositoryResource {
    pub fn new() -> Self {
        Self
    }
}

fn state_string(data: &dyn ResourceData, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The slug from state, falling back to the name.
fn state_slug(data: &dyn ResourceData) -> String {
    let slug = state_string(data, "slug");
    if slug.is_empty() {
        state_string(data, "name")
    } else {
        slug
    }
}

/// Writes the pipelines config and, when configured, the branching model.
async fn put_sub_resources(
    config: &RepositoryConfig,
    client: &dyn HttpClient,
) -> Result<(), ResourceError> {
    let owner = config.owner.as_str();
    let slug = config.repo_slug();

    let body = serde_json::to_vec(&config.to_pipelines_config())?;
    client
        .put(&pipelines_config_path(owner, slug), body)
        .await?
        .error_for_status()?;

    if let Some(branching_model) = &config.branching_model {
        let body = serde_json::to_vec(&branching_model.expand())?;
        client
            .put(&branching_model_settings_path(owner, slug), body)
            .await?
            .error_for_status()?;
    }

    Ok(())
}

/// Copies a decoded repository body into state.
fn write_repository(data: &mut dyn ResourceData, repo: &Repository) {
    data.set("scm", json!(repo.scm));
    data.set("is_private", json!(repo.is_private));
    data.set("has_wiki", json!(repo.has_wiki));
    data.set("has_issues", json!(repo.has_issues));
    data.set("name", json!(repo.name));
    // Only diverging slugs are recorded; an unset slug defaults to the name.
    if !repo.slug.is_empty() && repo.slug != repo.name {
        data.set("slug", json!(repo.slug));
    }
    data.set("language", json!(repo.language));
    data.set("fork_policy", json!(repo.fork_policy));
    data.set("website", json!(repo.website));
    data.set("description", json!(repo.description));
    data.set(
        "project_key",
        json!(repo.project.as_ref().map(|p| p.key.as_str()).unwrap_or_default()),
    );

    let (https, ssh) = repo.clone_urls();
    if let Some(href) = https {
        data.set("clone_https", json!(href));
    }
    if let Some(href) = ssh {
        data.set("clone_ssh", json!(href));
    }
}

#[async_trait]
impl Resource for RepositoryResource {
    fn name(&self) -> &'static str {
        RESOURCE_NAME
    }

    fn schema(&self) -> Schema {
        repository_schema()
    }

    async fn create(
        &self,
        data: &mut dyn ResourceData,
        client: &dyn HttpClient,
    ) -> Result<(), ResourceError> {
        let config = RepositoryConfig::from_resource_data(&*data)?;
        tracing::debug!("Creating repository {}", config.id());

        let body = serde_json::to_vec(&config.to_repository())?;
        client
            .post(&repository_path(&config.owner, config.repo_slug()), body)
            .await?
            .error_for_status()?;
        data.set_id(config.id());

        put_sub_resources(&config, client).await?;
        self.read(data, client).await
    }

    async fn read(
        &self,
        data: &mut dyn ResourceData,
        client: &dyn HttpClient,
    ) -> Result<(), ResourceError> {
        if !data.id().is_empty() {
            let (owner, slug) = parse_id(data.id())?;
            data.set("owner", Value::String(owner));
            data.set("slug", Value::String(slug));
        }

        let owner = state_string(&*data, "owner");
        let slug = state_slug(&*data);
        if owner.is_empty() || slug.is_empty() {
            tracing::warn!("Repository has no owner or slug in state, nothing to read");
            return Ok(());
        }

        let response = client.get(&repository_path(&owner, &slug)).await?;
        if !response.is_ok() {
            // Not raised as an error; the host keeps the previous state.
            tracing::warn!(
                "Repository {}/{} returned {}, leaving state unchanged",
                owner,
                slug,
                response.status
            );
            return Ok(());
        }

        let repo: Repository = response.json()?;
        write_repository(data, &repo);

        let response = client.get(&pipelines_config_path(&owner, &slug)).await?;
        if response.is_ok() {
            let pipelines: PipelinesConfig = response.json()?;
            data.set("pipelines_enabled", json!(pipelines.enabled));
        } else {
            tracing::debug!("Pipelines config returned {}", response.status);
        }

        let response = client
            .get(&branching_model_settings_path(&owner, &slug))
            .await?;
        if response.is_ok() {
            let settings: BranchingModelSettings = response.json()?;
            data.set(
                "branching_model_settings",
                json!([BranchingModelConfig::flatten(&settings).to_attributes()]),
            );
        } else {
            tracing::debug!("Branching model settings returned {}", response.status);
        }

        Ok(())
    }

    async fn update(
        &self,
        data: &mut dyn ResourceData,
        client: &dyn HttpClient,
    ) -> Result<(), ResourceError> {
        let config = RepositoryConfig::from_resource_data(&*data)?;
        tracing::debug!("Updating repository {}", config.id());

        let body = serde_json::to_vec(&config.to_repository())?;
        client
            .put(&repository_path(&config.owner, config.repo_slug()), body)
            .await?
            .error_for_status()?;

        put_sub_resources(&config, client).await?;
        self.read(data, client).await
    }

    async fn delete(
        &self,
        data: &mut dyn ResourceData,
        client: &dyn HttpClient,
    ) -> Result<(), ResourceError> {
        let owner = state_string(&*data, "owner");
        let slug = state_slug(&*data);
        if owner.is_empty() {
            return Err(SchemaError::Missing("owner".to_string()).into());
        }
        if slug.is_empty() {
            return Err(SchemaError::Missing("name".to_string()).into());
        }
        tracing::debug!("Deleting repository {}/{}", owner, slug);

        client
            .delete(&repository_path(&owner, &slug))
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::resources::testing::MockClient;
    use crate::state::ResourceState;

    const REPO: &str = "2.0/repositories/acme/widgets";
    const PIPELINES: &str = "2.0/repositories/acme/widgets/pipelines_config";
    const BRANCHING: &str = "2.0/repositories/acme/widgets/branching-model/settings";

    fn repo_body() -> Value {
        json!({
            "scm": "git",
            "name": "widgets",
            "slug": "widgets",
            "is_private": true,
            "has_wiki": false,
            "has_issues": true,
            "fork_policy": "no_public_forks",
            "language": "rust",
            "description": "Widget factory",
            "website": null,
            "uuid": "{1234}",
            "project": {"key": "ACME"},
            "links": {
                "clone": [
                    {"name": "https", "href": "https://bitbucket.org/acme/widgets.git"},
                    {"name": "ssh", "href": "git@bitbucket.org:acme/widgets.git"}
                ]
            }
        })
    }

    fn created_client() -> MockClient {
        MockClient::new()
            .on("POST", REPO, 200, repo_body())
            .on("PUT", REPO, 200, repo_body())
            .on("PUT", PIPELINES, 200, json!({"enabled": false}))
            .on("PUT", BRANCHING, 200, json!({}))
            .on("GET", REPO, 200, repo_body())
            .on("GET", PIPELINES, 200, json!({"enabled": false}))
    }

    #[tokio::test]
    async fn test_create_minimal_repository() {
        let client = created_client();
        let mut state = ResourceState::from_attributes(
            json!({"owner": "acme", "name": "widgets", "is_private": true}),
        );

        RepositoryResource.create(&mut state, &client).await.unwrap();

        assert_eq!(state.id, "acme/widgets");
        assert_eq!(
            client.call_lines(),
            vec![
                format!("POST {}", REPO),
                format!("PUT {}", PIPELINES),
                format!("GET {}", REPO),
                format!("GET {}", PIPELINES),
                format!("GET {}", BRANCHING),
            ]
        );

        let calls = client.calls();
        let post = calls[0].body.as_ref().unwrap();
        assert_eq!(post["is_private"], json!(true));
        assert_eq!(post["name"], json!("widgets"));
        assert_eq!(calls[1].body, Some(json!({"enabled": false})));

        assert_eq!(state.get("clone_https"), Some(&json!("https://bitbucket.org/acme/widgets.git")));
        assert_eq!(state.get("project_key"), Some(&json!("ACME")));
    }

    #[tokio::test]
    async fn test_create_with_branching_model() {
        let client = created_client();
        let mut state = ResourceState::from_attributes(json!({
            "owner": "acme",
            "name": "widgets",
            "pipelines_enabled": true,
            "branching_model_settings": [{
                "development": [{"name": "develop", "use_mainbranch": false}],
                "branch_types": [{"kind": "feature", "prefix": "feature/"}]
            }]
        }));

        RepositoryResource.create(&mut state, &client).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls[1].body, Some(json!({"enabled": true})));
        assert_eq!(calls[2].path, BRANCHING);
        assert_eq!(
            calls[2].body,
            Some(json!({
                "development": {"name": "develop", "use_mainbranch": false},
                "branch_types": [{"kind": "feature", "enabled": true, "prefix": "feature/"}]
            }))
        );
    }

    #[tokio::test]
    async fn test_create_stops_at_failed_post() {
        let client = MockClient::new().on(
            "POST",
            REPO,
            400,
            json!({"type": "error", "error": {"message": "Repository with this Slug and Owner already exists."}}),
        );
        let mut state = ResourceState::from_attributes(json!({"owner": "acme", "name": "widgets"}));

        let err = RepositoryResource.create(&mut state, &client).await.unwrap_err();

        assert!(matches!(err, ResourceError::Api(ApiError::BadRequest(_))));
        assert!(state.id.is_empty());
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_create_keeps_id_when_pipelines_fail() {
        let client = MockClient::new()
            .on("POST", REPO, 201, repo_body())
            .on("PUT", PIPELINES, 500, json!({}));
        let mut state = ResourceState::from_attributes(json!({"owner": "acme", "name": "widgets"}));

        let err = RepositoryResource.create(&mut state, &client).await.unwrap_err();

        assert!(matches!(err, ResourceError::Api(ApiError::ServerError(_))));
        assert_eq!(state.id, "acme/widgets");
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_owner() {
        let client = MockClient::new();
        let mut state = ResourceState::from_attributes(json!({"name": "widgets"}));

        let err = RepositoryResource.create(&mut state, &client).await.unwrap_err();

        assert!(matches!(err, ResourceError::Schema(_)));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_read_not_found_is_silent() {
        let client = MockClient::new().on("GET", REPO, 404, json!({}));
        let mut state = ResourceState::with_id("acme/widgets");
        state.set("owner", json!("acme"));
        state.set("slug", json!("widgets"));
        state.set("description", json!("old"));
        let before = state.clone();

        RepositoryResource.read(&mut state, &client).await.unwrap();

        assert_eq!(state, before);
        assert_eq!(client.call_lines(), vec![format!("GET {}", REPO)]);
    }

    #[tokio::test]
    async fn test_read_rejects_malformed_id() {
        let client = MockClient::new();
        let mut state = ResourceState::with_id("acme-widgets");

        let err = RepositoryResource.read(&mut state, &client).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Incorrect ID format \"acme-widgets\", should match `owner/slug`"
        );
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_read_writes_every_field() {
        let client = MockClient::new()
            .on("GET", REPO, 200, repo_body())
            .on("GET", PIPELINES, 200, json!({"enabled": true}))
            .on(
                "GET",
                BRANCHING,
                200,
                json!({
                    "development": {"is_valid": true, "name": "develop", "use_mainbranch": false},
                    "production": {"is_valid": true, "enabled": true, "name": "main", "use_mainbranch": false},
                    "branch_types": [{"kind": "release", "enabled": true, "prefix": "release/"}]
                }),
            );
        let mut state = ResourceState::from_attributes(json!({"owner": "acme", "name": "widgets"}));

        RepositoryResource.read(&mut state, &client).await.unwrap();

        assert_eq!(state.get("fork_policy"), Some(&json!("no_public_forks")));
        assert_eq!(state.get("has_issues"), Some(&json!(true)));
        assert_eq!(state.get("website"), Some(&json!("")));
        assert_eq!(state.get("pipelines_enabled"), Some(&json!(true)));
        assert_eq!(state.get("clone_ssh"), Some(&json!("git@bitbucket.org:acme/widgets.git")));
        // Slug equals the name, so it is left unset.
        assert!(state.get("slug").is_none());
        assert_eq!(
            state.get("branching_model_settings"),
            Some(&json!([{
                "development": [{"name": "develop", "use_mainbranch": false}],
                "production": [{"enabled": true, "name": "main", "use_mainbranch": false}],
                "branch_types": [{"kind": "release", "enabled": true, "prefix": "release/"}]
            }]))
        );
    }

    #[tokio::test]
    async fn test_read_records_diverging_slug() {
        let mut body = repo_body();
        body["name"] = json!("Widgets");
        let client = MockClient::new().on("GET", REPO, 200, body);
        let mut state = ResourceState::from_attributes(json!({"owner": "acme", "name": "widgets"}));

        RepositoryResource.read(&mut state, &client).await.unwrap();

        assert_eq!(state.get("name"), Some(&json!("Widgets")));
        assert_eq!(state.get("slug"), Some(&json!("widgets")));
    }

    #[tokio::test]
    async fn test_read_ignores_failed_sub_resources() {
        let client = MockClient::new()
            .on("GET", REPO, 200, repo_body())
            .on("GET", PIPELINES, 403, json!({}))
            .on("GET", BRANCHING, 500, json!({}));
        let mut state = ResourceState::from_attributes(json!({
            "owner": "acme",
            "name": "widgets",
            "pipelines_enabled": true
        }));

        RepositoryResource.read(&mut state, &client).await.unwrap();

        assert_eq!(state.get("pipelines_enabled"), Some(&json!(true)));
        assert!(state.get("branching_model_settings").is_none());
        assert_eq!(client.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_read_clone_links_last_non_https_wins() {
        let mut body = repo_body();
        body["links"] = json!({"clone": [
            {"name": "ssh", "href": "S"},
            {"name": "other", "href": "O"}
        ]});
        let client = MockClient::new().on("GET", REPO, 200, body);
        let mut state = ResourceState::from_attributes(json!({"owner": "acme", "name": "widgets"}));

        RepositoryResource.read(&mut state, &client).await.unwrap();

        assert_eq!(state.get("clone_ssh"), Some(&json!("O")));
        assert!(state.get("clone_https").is_none());
    }

    #[tokio::test]
    async fn test_update_resends_full_branch_types() {
        let client = created_client();
        let mut state = ResourceState::with_id("acme/widgets");
        state.attributes = json!({
            "owner": "acme",
            "name": "widgets",
            "branching_model_settings": [{
                "branch_types": [
                    {"kind": "feature", "prefix": "feature/"},
                    {"kind": "bugfix", "prefix": "fix/"}
                ]
            }]
        })
        .as_object()
        .cloned()
        .unwrap();

        RepositoryResource.update(&mut state, &client).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls[0].method, "PUT");
        assert_eq!(calls[0].path, REPO);
        assert_eq!(
            calls[2].body,
            Some(json!({"branch_types": [
                {"kind": "feature", "enabled": true, "prefix": "feature/"},
                {"kind": "bugfix", "enabled": true, "prefix": "fix/"}
            ]}))
        );
    }

    #[tokio::test]
    async fn test_delete_uses_name_when_slug_unset() {
        let client = MockClient::new().on("DELETE", REPO, 204, Value::Null);
        let mut state = ResourceState::from_attributes(json!({"owner": "acme", "name": "widgets"}));

        RepositoryResource.delete(&mut state, &client).await.unwrap();

        assert_eq!(client.call_lines(), vec![format!("DELETE {}", REPO)]);
    }

    #[tokio::test]
    async fn test_delete_surfaces_errors() {
        let client = MockClient::new().on(
            "DELETE",
            "2.0/repositories/acme/widgets-core",
            403,
            json!({"error": {"message": "Forbidden"}}),
        );
        let mut state = ResourceState::from_attributes(
            json!({"owner": "acme", "name": "widgets", "slug": "widgets-core"}),
        );

        let err = RepositoryResource.delete(&mut state, &client).await.unwrap_err();
        assert!(matches!(err, ResourceError::Api(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_import_reads_from_id() {
        let client = MockClient::new().on("GET", REPO, 200, repo_body());
        let mut state = ResourceState::with_id("acme/widgets");

        RepositoryResource.import(&mut state, &client).await.unwrap();

        assert_eq!(state.get("owner"), Some(&json!("acme")));
        assert_eq!(state.get("name"), Some(&json!("widgets")));
        assert_eq!(state.get("language"), Some(&json!("rust")));
    }

    #[tokio::test]
    async fn test_update_after_import_without_fork_policy() {
        let body = json!({"name": "widgets", "slug": "widgets", "fork_policy": null});
        let client = MockClient::new()
            .on("GET", REPO, 200, body)
            .on("PUT", REPO, 200, json!({}))
            .on("PUT", PIPELINES, 200, json!({"enabled": false}));
        let mut state = ResourceState::with_id("acme/widgets");

        RepositoryResource.import(&mut state, &client).await.unwrap();
        assert_eq!(state.get("fork_policy"), Some(&json!("")));

        RepositoryResource.update(&mut state, &client).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls[3].method, "PUT");
        let put = calls[3].body.as_ref().unwrap();
        assert_eq!(put["fork_policy"], json!("allow_forks"));
        assert_eq!(put["scm"], json!("git"));
    }

    fn create_steps() -> Vec<(&'static str, &'static str, Value)> {
        vec![
            ("POST", REPO, repo_body()),
            ("PUT", PIPELINES, json!({"enabled": false})),
            ("PUT", BRANCHING, json!({})),
            ("GET", REPO, repo_body()),
            ("GET", PIPELINES, json!({"enabled": false})),
            ("GET", BRANCHING, json!({})),
        ]
    }

    fn branching_state() -> ResourceState {
        ResourceState::from_attributes(json!({
            "owner": "acme",
            "name": "widgets",
            "branching_model_settings": [{"development": [{"name": "develop"}]}]
        }))
    }

    #[tokio::test]
    async fn test_create_transport_error_at_each_step() {
        for failing in 0..create_steps().len() {
            let client = create_steps()
                .into_iter()
                .enumerate()
                .fold(MockClient::new(), |client, (index, (method, path, body))| {
                    if index == failing {
                        client.fail(method, path)
                    } else {
                        client.on(method, path, 200, body)
                    }
                });
            let mut state = branching_state();

            let err = RepositoryResource.create(&mut state, &client).await.unwrap_err();

            assert!(
                matches!(err, ResourceError::Api(ApiError::Network(_))),
                "step {}: {:?}",
                failing,
                err
            );
            assert_eq!(client.calls().len(), failing + 1, "step {}", failing);
            assert_eq!(state.id.is_empty(), failing == 0);
        }
    }

    #[tokio::test]
    async fn test_transport_errors_propagate_from_update_read_delete() {
        let client = MockClient::new()
            .fail("PUT", REPO)
            .fail("GET", REPO)
            .fail("DELETE", REPO);
        let mut state = branching_state();

        let err = RepositoryResource.update(&mut state, &client).await.unwrap_err();
        assert!(matches!(err, ResourceError::Api(ApiError::Network(_))));
        let err = RepositoryResource.read(&mut state, &client).await.unwrap_err();
        assert!(matches!(err, ResourceError::Api(ApiError::Network(_))));
        let err = RepositoryResource.delete(&mut state, &client).await.unwrap_err();
        assert!(matches!(err, ResourceError::Api(ApiError::Network(_))));

        assert_eq!(
            client.call_lines(),
            vec![
                format!("PUT {}", REPO),
                format!("GET {}", REPO),
                format!("DELETE {}", REPO),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_propagates_malformed_bodies() {
        let reads = [REPO, PIPELINES, BRANCHING];
        for (failing, broken) in reads.iter().enumerate() {
            let client = MockClient::new()
                .on_raw("GET", broken, 200, "\"garbage\"")
                .on("GET", REPO, 200, repo_body())
                .on("GET", PIPELINES, 200, json!({"enabled": true}))
                .on("GET", BRANCHING, 200, json!({}));
            let mut state = ResourceState::from_attributes(json!({"owner": "acme", "name": "widgets"}));

            let err = RepositoryResource.read(&mut state, &client).await.unwrap_err();

            assert!(matches!(err, ResourceError::Decode(_)), "{}: {:?}", broken, err);
            assert_eq!(client.calls().len(), failing + 1);
        }
    }

    #[tokio::test]
    async fn test_delete_requires_owner_and_name() {
        let client = MockClient::new();

        let mut state = ResourceState::new();
        let err = RepositoryResource.delete(&mut state, &client).await.unwrap_err();
        assert!(matches!(err, ResourceError::Schema(SchemaError::Missing(ref f)) if f == "owner"));

        let mut state = ResourceState::from_attributes(json!({"owner": "acme"}));
        let err = RepositoryResource.delete(&mut state, &client).await.unwrap_err();
        assert!(matches!(err, ResourceError::Schema(SchemaError::Missing(ref f)) if f == "name"));

        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(
            parse_id("ownerA/slugB").unwrap(),
            ("ownerA".to_string(), "slugB".to_string())
        );
        for bad in ["", "plain", "a/b/c"] {
            assert!(matches!(parse_id(bad), Err(ResourceError::InvalidId { .. })));
        }
    }
}
