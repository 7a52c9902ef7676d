#[cfg(test)]
mod tests {
    use super::super::*;
    use markscout_common::SearchProviderKind;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/markscout.toml")).unwrap();
        assert_eq!(config.search.provider, SearchProviderKind::DuckDuckGo);
        assert_eq!(config.execution.batch_size, 5);
        assert_eq!(config.logging.filter, "markscout=info,warn");
    }

    #[test]
    fn test_example_document() {
        let config = Config::from_toml_str(
            r#"
            [search]
            provider = "searxng"
            searxng_url = "http://localhost:8888"
            max_results = 8

            [execution]
            batch_size = 4
            batch_delay_ms = 500

            [defaults]
            country = "USA"

            [logging]
            filter = "markscout=debug"
            "#,
        )
        .unwrap();

        let research = config.research();
        assert_eq!(research.search.provider, SearchProviderKind::Searxng);
        assert_eq!(research.search.max_results, 8);
        assert_eq!(research.execution.batch_size, 4);
        assert_eq!(research.execution.query_timeout_secs, 30);
        assert_eq!(research.defaults.country, "USA");
        assert_eq!(config.logging.filter, "markscout=debug");
    }

    #[test]
    fn test_searxng_without_url_rejected() {
        assert!(Config::from_toml_str("[search]\nprovider = \"searxng\"\n").is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(Config::from_toml_str("[search]\nprovider = \"bing\"\n").is_err());
    }
}
