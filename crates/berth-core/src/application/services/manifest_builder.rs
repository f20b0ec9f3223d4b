//! Manifest synthesis from a resolved service.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::WorkloadStore},
    domain::{
        BackendServiceManifest, ImageConfig, ImageSource, LoadBalancedWebServiceManifest,
        Manifest, ResolvedService, ServiceType,
    },
    error::BerthResult,
};

/// Routing path claimed by the first load-balanced service of an application.
pub const ROOT_PATH: &str = "/";

/// Builds the type-specific manifest for a resolved service.
pub struct ManifestBuilder<'a> {
    store: &'a dyn WorkloadStore,
    working_dir: Option<&'a Path>,
}

impl<'a> ManifestBuilder<'a> {
    pub fn new(store: &'a dyn WorkloadStore) -> Self {
        Self {
            store,
            working_dir: None,
        }
    }

    /// Directory relative Dockerfile paths were given from. Without one they
    /// are taken as relative to the workspace root.
    pub fn with_working_dir(mut self, working_dir: &'a Path) -> Self {
        self.working_dir = Some(working_dir);
        self
    }

    /// `workspace_root` is the directory Dockerfile paths are made relative to.
    pub fn build(
        &self,
        service: &ResolvedService,
        workspace_root: Option<&Path>,
    ) -> BerthResult<Manifest> {
        let source = match &service.source {
            ImageSource::Dockerfile(path) => {
                ImageSource::Dockerfile(relative_to(path, self.working_dir, workspace_root))
            }
            other => other.clone(),
        };
        let image = ImageConfig::new(&source, service.port, service.health_check.clone());

        let manifest = match service.service_type {
            ServiceType::LoadBalancedWebService => {
                let path = self.routing_path(service)?;
                Manifest::LoadBalancedWebService(LoadBalancedWebServiceManifest::new(
                    &service.name,
                    image,
                    path,
                ))
            }
            ServiceType::BackendService => {
                Manifest::BackendService(BackendServiceManifest::new(&service.name, image))
            }
        };

        manifest.validate()?;
        Ok(manifest)
    }

    /// `/` if no load-balanced service exists yet in the application,
    /// otherwise the service's own name.
    fn routing_path(&self, service: &ResolvedService) -> BerthResult<String> {
        let existing = self
            .store
            .list_services(&service.app_name)
            .map_err(|e| ApplicationError::ListServices {
                app: service.app_name.clone(),
                source: Box::new(e),
            })?;

        let root_taken = existing
            .iter()
            .any(|w| w.service_type == ServiceType::LoadBalancedWebService);

        let path = if root_taken {
            service.name.clone()
        } else {
            ROOT_PATH.to_string()
        };
        debug!(path = %path, existing = existing.len(), "Routing path chosen");
        Ok(path)
    }
}

/// `path` as seen from `root`. Relative paths are first joined onto
/// `working_dir` (or `root` itself). Paths outside `root` climb out of it
/// with `..`; without a root the path is kept as given.
fn relative_to(path: &Path, working_dir: Option<&Path>, root: Option<&Path>) -> PathBuf {
    let Some(root) = root else {
        return path.to_path_buf();
    };
    let absolute = normalize(&working_dir.unwrap_or(root).join(path));
    let root = normalize(root);

    let target: Vec<Component<'_>> = absolute.components().collect();
    let base: Vec<Component<'_>> = root.components().collect();
    let common = target
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    let relative: PathBuf = (common..base.len())
        .map(|_| Component::ParentDir)
        .chain(target[common..].iter().copied())
        .collect();
    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}

/// Resolve `.` and `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::application::ports::MockWorkloadStore;
    use crate::domain::{HealthCheckSpec, Workload};

    fn service(service_type: ServiceType, source: ImageSource) -> ResolvedService {
        ResolvedService {
            app_name: "app".into(),
            name: "frontend".into(),
            service_type,
            source,
            port: Some(80),
            health_check: None,
        }
    }

    fn dockerfile() -> ImageSource {
        ImageSource::Dockerfile("frontend/Dockerfile".into())
    }

    fn store_with(workloads: Vec<Workload>) -> MockWorkloadStore {
        let mut store = MockWorkloadStore::new();
        store
            .expect_list_services()
            .withf(|app| app == "app")
            .times(1)
            .returning(move |_| Ok(workloads.clone()));
        store
    }

    #[test]
    fn first_load_balanced_service_claims_root() {
        let store = store_with(vec![Workload::new("db", "app", ServiceType::BackendService)]);
        let manifest = ManifestBuilder::new(&store)
            .build(
                &service(ServiceType::LoadBalancedWebService, dockerfile()),
                None,
            )
            .unwrap();
        assert_eq!(manifest.routing_path(), Some("/"));
    }

    #[test]
    fn later_load_balanced_service_uses_its_name() {
        let store = store_with(vec![Workload::new(
            "web",
            "app",
            ServiceType::LoadBalancedWebService,
        )]);
        let manifest = ManifestBuilder::new(&store)
            .build(
                &service(ServiceType::LoadBalancedWebService, dockerfile()),
                None,
            )
            .unwrap();
        assert_eq!(manifest.routing_path(), Some("frontend"));
    }

    #[test]
    fn backend_service_does_not_query_store() {
        let mut store = MockWorkloadStore::new();
        store.expect_list_services().never();

        let manifest = ManifestBuilder::new(&store)
            .build(&service(ServiceType::BackendService, dockerfile()), None)
            .unwrap();
        assert_eq!(manifest.service_type(), ServiceType::BackendService);
        assert_eq!(manifest.routing_path(), None);
    }

    #[test]
    fn list_failure_is_prefixed() {
        let mut store = MockWorkloadStore::new();
        store.expect_list_services().times(1).returning(|_| {
            Err(ApplicationError::Store {
                reason: "some error".into(),
            }
            .into())
        });

        let err = ManifestBuilder::new(&store)
            .build(
                &service(ServiceType::LoadBalancedWebService, dockerfile()),
                None,
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "list services for application app: some error"
        );
    }

    #[test]
    fn image_source_sets_location() {
        let store = store_with(vec![]);
        let manifest = ManifestBuilder::new(&store)
            .build(
                &service(
                    ServiceType::LoadBalancedWebService,
                    ImageSource::Image("mockImage".into()),
                ),
                None,
            )
            .unwrap();
        assert_eq!(manifest.image().location.as_deref(), Some("mockImage"));
        assert!(manifest.image().build.is_none());
        assert!(manifest.image().health_check.is_none());
    }

    #[test]
    fn health_check_is_carried_through() {
        let mut svc = service(ServiceType::BackendService, dockerfile());
        svc.health_check = Some(HealthCheckSpec {
            interval: Duration::from_secs(10),
            retries: 2,
            timeout: Duration::from_secs(5),
            start_period: Duration::from_secs(0),
            command: vec!["CMD".into(), "/ok".into()],
        });
        let store = MockWorkloadStore::new();

        let manifest = ManifestBuilder::new(&store).build(&svc, None).unwrap();
        let hc = manifest.image().health_check.as_ref().unwrap();
        assert_eq!(hc.retries, 2);
        assert_eq!(hc.interval, Duration::from_secs(10));
        assert_eq!(hc.command, vec!["CMD".to_string(), "/ok".to_string()]);
    }

    #[test]
    fn absolute_dockerfile_under_workspace_is_made_relative() {
        let store = MockWorkloadStore::new();
        let svc = service(
            ServiceType::BackendService,
            ImageSource::Dockerfile("/ws/frontend/Dockerfile".into()),
        );
        let manifest = ManifestBuilder::new(&store)
            .build(&svc, Some(Path::new("/ws")))
            .unwrap();
        let build = manifest.image().build.as_ref().unwrap();
        assert_eq!(build.dockerfile, "frontend/Dockerfile");
        assert_eq!(build.context, "frontend");
    }

    #[test]
    fn relative_dockerfile_is_resolved_from_working_dir() {
        let store = MockWorkloadStore::new();
        let svc = service(
            ServiceType::BackendService,
            ImageSource::Dockerfile("Dockerfile".into()),
        );
        let manifest = ManifestBuilder::new(&store)
            .with_working_dir(Path::new("/ws/api"))
            .build(&svc, Some(Path::new("/ws")))
            .unwrap();
        let build = manifest.image().build.as_ref().unwrap();
        assert_eq!(build.dockerfile, "api/Dockerfile");
        assert_eq!(build.context, "api");
    }

    #[test]
    fn relative_to_climbs_out_of_root() {
        assert_eq!(
            relative_to(Path::new("/elsewhere/Dockerfile"), None, Some(Path::new("/ws"))),
            PathBuf::from("../elsewhere/Dockerfile")
        );
        assert_eq!(
            relative_to(
                Path::new("../shared/Dockerfile"),
                Some(Path::new("/ws/api")),
                Some(Path::new("/ws"))
            ),
            PathBuf::from("shared/Dockerfile")
        );
        assert_eq!(
            relative_to(
                Path::new("../../other/Dockerfile"),
                Some(Path::new("/ws/api")),
                Some(Path::new("/ws"))
            ),
            PathBuf::from("../other/Dockerfile")
        );
    }

    #[test]
    fn relative_to_without_working_dir_uses_root() {
        assert_eq!(
            relative_to(Path::new("./api/Dockerfile"), None, Some(Path::new("/ws"))),
            PathBuf::from("api/Dockerfile")
        );
        assert_eq!(
            relative_to(Path::new("api/Dockerfile"), Some(Path::new("/ws")), None),
            PathBuf::from("api/Dockerfile")
        );
    }
}
