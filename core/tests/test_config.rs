#[cfg(test)]
mod tests {
    use zbridge_core::{
        constants::{DEFAULT_LEVEL, MAX_BUFFER_LEN},
        BridgeConfig, BridgeError,
    };

    #[test]
    fn defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.default_level, DEFAULT_LEVEL);
        assert_eq!(config.max_buffer_len, MAX_BUFFER_LEN);
        assert_eq!(BridgeConfig::new(None, None), config);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BridgeConfig::from_json(r#"{ "default_level": 9 }"#).unwrap();
        assert_eq!(config.default_level, 9);
        assert_eq!(config.max_buffer_len, MAX_BUFFER_LEN);

        let config = BridgeConfig::from_json("{}").unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn json_roundtrip() {
        let config = BridgeConfig::new(Some(-3), Some(1 << 20));
        let json = config.to_json().unwrap();
        assert_eq!(BridgeConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = BridgeConfig::from_json("{ default_level: }").unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));

        let err = BridgeConfig::from_json(r#"{ "default_level": "fast" }"#).unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = BridgeConfig::from_json(r#"{ "max_buffer_len": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("max_buffer_len"));
        assert!(BridgeConfig::new(None, Some(0)).validate().is_err());
    }

    #[test]
    fn limit_is_clamped_to_platform() {
        let config = BridgeConfig::new(None, Some(u64::MAX));
        assert_eq!(config.effective_max_buffer_len(), MAX_BUFFER_LEN);

        let config = BridgeConfig::new(None, Some(4096));
        assert_eq!(config.effective_max_buffer_len(), 4096);
    }
}
