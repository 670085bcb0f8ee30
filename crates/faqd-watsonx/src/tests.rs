//! Snapshot tests for the watsonx clients

#[cfg(test)]
mod snapshot_tests {
    use crate::{WatsonxClient, WatsonxConfig, WatsonxEmbeddings};
    use insta::assert_yaml_snapshot;

    #[test]
    fn test_config_snapshot() {
        let config = WatsonxConfig {
            api_key: "test_api_key_redacted".to_string(),
            project_id: "test_project_id".to_string(),
            iam_url: "iam.cloud.ibm.com".to_string(),
            api_url: "https://us-south.ml.cloud.ibm.com".to_string(),
        };

        assert_yaml_snapshot!(config, @r###"
        ---
        api_key: test_api_key_redacted
        project_id: test_project_id
        iam_url: iam.cloud.ibm.com
        api_url: "https://us-south.ml.cloud.ibm.com"
        "###);
    }

    #[test]
    fn test_model_constants() {
        assert_eq!(WatsonxClient::GRANITE_4_H_SMALL, "ibm/granite-4-h-small");
        assert_eq!(
            WatsonxClient::GRANITE_3_3_8B_INSTRUCT,
            "ibm/granite-3-3-8b-instruct"
        );
        assert_eq!(
            WatsonxEmbeddings::GRANITE_EMBEDDING_107M_MULTILINGUAL,
            "ibm/granite-embedding-107m-multilingual"
        );
        assert_eq!(WatsonxEmbeddings::GRANITE_EMBEDDING_DIMENSION, 384);
    }

    #[test]
    fn test_explicit_config_defaults() {
        let config = WatsonxConfig::new("key".to_string(), "project".to_string());
        assert_eq!(config.iam_url, "iam.cloud.ibm.com");
        assert_eq!(config.api_url, "https://us-south.ml.cloud.ibm.com");
    }
}
