//! Unit tests for chart loading

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {

    use std::path::Path;
    use values_checker::chart::{load_local, resolve};
    use values_checker::system::mock::MockSystem;

    fn web_chart() -> MockSystem {
        MockSystem::new()
            .with_env("HOME", "/home/dev")
            .unwrap()
            .with_file(
                "/charts/web/Chart.yaml",
                b"apiVersion: v2\nname: web\nversion: 1.4.0\ndependencies:\n  - name: redis\n    version: 17.x\n    alias: cache\n  - name: postgresql\n    version: 12.x\n",
            )
            .unwrap()
            .with_file("/charts/web/values.yaml", b"replicaCount: 1\nimage:\n  tag: latest\n")
            .unwrap()
            .with_file("/charts/web/values.schema.json", b"{\"type\": \"object\"}")
            .unwrap()
            .with_file("/charts/web/charts/redis/Chart.yaml", b"name: redis\nversion: 17.3.0\n")
            .unwrap()
            .with_file("/charts/web/charts/redis/values.yaml", b"auth:\n  enabled: true\n")
            .unwrap()
            .with_file("/charts/web/charts/postgresql/Chart.yaml", b"name: postgresql\nversion: 12.1.0\n")
            .unwrap()
            .with_file("/charts/web/charts/postgresql/values.yml", b"primary:\n  persistence: {}\n")
            .unwrap()
            .with_file("/charts/web/charts/common-2.0.0.tgz", b"\x1f\x8b")
            .unwrap()
    }

    #[test]
    fn loads_chart_directory() {
        let system = web_chart();
        let chart = load_local(&system, Path::new("/charts/web")).unwrap();

        assert_eq!(chart.name, "web");
        assert_eq!(chart.version, "1.4.0");
        assert_eq!(chart.defaults.get("replicaCount").unwrap().literal(), Some("1"));
        assert_eq!(chart.schema.as_deref(), Some(&b"{\"type\": \"object\"}"[..]));

        let keys: Vec<&str> = chart.subcharts.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["cache", "postgresql"]);
        assert!(chart.subcharts["cache"].get("auth").is_some());
        assert!(chart.subcharts["postgresql"].get("primary").is_some());
    }

    #[test]
    fn packaged_subcharts_are_recorded_not_loaded() {
        let system = web_chart()
            .with_file("/charts/web/charts/redis-17.3.0.tgz", b"\x1f\x8b")
            .unwrap()
            .with_file("/charts/web/charts/README.md", b"notes")
            .unwrap();
        let chart = load_local(&system, Path::new("/charts/web")).unwrap();

        assert_eq!(chart.packaged_subcharts, vec!["common", "cache"]);
        assert!(!chart.subcharts.contains_key("common"));
    }

    #[test]
    fn missing_values_file_means_empty_defaults() {
        let system = MockSystem::new()
            .with_file("/charts/bare/Chart.yaml", b"name: bare\nversion: 0.1.0\n")
            .unwrap();
        let chart = load_local(&system, Path::new("/charts/bare")).unwrap();
        assert!(chart.defaults.is_mapping());
        assert!(chart.defaults.entries().is_empty());
        assert!(chart.schema.is_none());
        assert!(chart.subcharts.is_empty());
    }

    #[test]
    fn empty_values_file_means_empty_defaults() {
        let system = MockSystem::new()
            .with_file("/charts/bare/Chart.yaml", b"name: bare\nversion: 0.1.0\n")
            .unwrap()
            .with_file("/charts/bare/values.yaml", b"# nothing configurable\n")
            .unwrap();
        let chart = load_local(&system, Path::new("/charts/bare")).unwrap();
        assert!(chart.defaults.entries().is_empty());
    }

    #[test]
    fn broken_subchart_values_are_skipped() {
        let system = MockSystem::new()
            .with_file("/c/Chart.yaml", b"name: app\nversion: 1.0.0\n")
            .unwrap()
            .with_file("/c/charts/broken/Chart.yaml", b"name: broken\nversion: 1.0.0\n")
            .unwrap()
            .with_file("/c/charts/broken/values.yaml", b"a: [1, 2\n")
            .unwrap()
            .with_file("/c/charts/good/Chart.yaml", b"name: good\nversion: 1.0.0\n")
            .unwrap();
        let chart = load_local(&system, Path::new("/c")).unwrap();
        let keys: Vec<&str> = chart.subcharts.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["good"]);
    }

    #[test]
    fn broken_chart_values_fail() {
        let system = MockSystem::new()
            .with_file("/c/Chart.yaml", b"name: app\nversion: 1.0.0\n")
            .unwrap()
            .with_file("/c/values.yaml", b"- not\n- a mapping\n")
            .unwrap();
        let err = load_local(&system, Path::new("/c")).unwrap_err();
        assert!(err.to_string().starts_with("Chart error:"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_chart_file_fails() {
        let system = MockSystem::new().with_dir("/empty").unwrap();
        let err = load_local(&system, Path::new("/empty")).unwrap_err();
        assert!(err.to_string().contains("Chart.yaml"));

        let err = load_local(&system, Path::new("/nowhere")).unwrap_err();
        assert!(err.to_string().contains("Chart directory not found"));
    }

    #[test]
    fn resolve_expands_home() {
        let system = MockSystem::new()
            .with_env("HOME", "/home/dev")
            .unwrap()
            .with_file("/home/dev/charts/web/Chart.yaml", b"name: web\nversion: 2.0.0\n")
            .unwrap();
        let chart = resolve(&system, "~/charts/web", None).unwrap();
        assert_eq!(chart.name, "web");
    }

    #[test]
    fn resolve_accepts_version_mismatch_for_local_charts() {
        let system = web_chart();
        let chart = resolve(&system, "/charts/web", Some("9.9.9")).unwrap();
        assert_eq!(chart.version, "1.4.0");
    }

    #[test]
    fn resolve_rejects_remote_references() {
        let system = MockSystem::new();
        let err = resolve(&system, "bitnami/postgresql", None).unwrap_err();
        assert!(err.to_string().contains("not a local directory"));

        let err = resolve(&system, "oci://registry.example.com/charts/web", Some("1.0.0")).unwrap_err();
        assert!(err.to_string().starts_with("Chart error:"));
    }
}
