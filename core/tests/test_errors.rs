mod common;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use zbridge_core::{Bridge, BridgeError, NativeCodec, ZstdCodec, ZstdErrorKind};

    use crate::common::StubCodec;

    // --- Native failure surfacing ---

    #[test]
    fn destination_too_small_surfaces_code_and_message() {
        let stub = Arc::new(StubCodec::failing(ZstdErrorKind::DstSizeTooSmall));
        let bridge = Bridge::new(stub.clone());

        let err = bridge.compress(&b"some input"[..], 3).unwrap_err();
        assert!(err.is_native());
        assert!(!err.is_precondition());

        let failure = err.native().expect("native failure");
        assert_eq!(failure.code(), ZstdErrorKind::DstSizeTooSmall.code());
        assert_eq!(failure.kind(), Some(ZstdErrorKind::DstSizeTooSmall));
        assert_eq!(failure.codec_name(), "stub");

        let message = err.to_string();
        assert!(!message.is_empty());
        assert!(message.contains("Destination buffer is too small"), "{message}");
        assert!(message.contains("70"), "{message}");
    }

    #[test]
    fn every_entry_point_surfaces_native_failures() {
        let stub = Arc::new(StubCodec::failing(ZstdErrorKind::MemoryAllocation));
        let bridge = Bridge::new(stub.clone());
        let src = &b"abc"[..];

        let codes = [
            bridge.compress(src, 1).unwrap_err(),
            bridge.compress_pinned(src, 1).unwrap_err(),
            bridge.compress_to_view(src, 1).unwrap_err(),
            bridge.compress_pinned_to_view(src, 1).unwrap_err(),
        ]
        .iter()
        .map(|e| e.native().map(|f| f.code()))
        .collect::<Vec<_>>();

        assert!(codes.iter().all(|c| *c == Some(64)));
        assert_eq!(stub.native_calls(), 4);
    }

    #[test]
    fn error_name_is_resolved_lazily() {
        let ok = Arc::new(StubCodec::echo());
        Bridge::new(ok.clone()).compress(&b"fine"[..], 3).unwrap();
        assert_eq!(ok.name_lookups(), 0, "success path must not build messages");

        let failing = Arc::new(StubCodec::failing(ZstdErrorKind::Generic));
        let err = Bridge::new(failing.clone()).compress(&b"bad"[..], 3).unwrap_err();
        assert_eq!(failing.name_lookups(), 0, "name must not be resolved eagerly");

        let name = err.native().unwrap().name();
        assert_eq!(name, "stub: Error (generic)");
        assert_eq!(failing.name_lookups(), 1);
    }

    #[test]
    fn unknown_codes_are_carried_verbatim() {
        let stub = Arc::new(StubCodec::new(crate::common::Reply::Error(99)));
        let err = Bridge::new(stub).compress(&b"x"[..], 3).unwrap_err();
        let failure = err.native().unwrap();
        assert_eq!(failure.code(), 99);
        assert_eq!(failure.kind(), None);
        assert!(format!("{:?}", failure).contains("0x63"));
    }

    #[test]
    fn error_families_are_distinguishable() {
        let null = BridgeError::NullSource { entry: "compress".into() };
        let capacity = BridgeError::CapacityExceeded { bound: 10, max: 5 };

        assert!(null.is_precondition() && !null.is_capacity() && !null.is_native());
        assert!(capacity.is_capacity() && !capacity.is_precondition() && !capacity.is_native());
        assert!(null.native().is_none());
        assert!(capacity.to_string().contains("exceeds maximum buffer length"));
    }

    // --- Real codec classification ---

    #[test]
    fn zstd_reports_destination_too_small() {
        let codec = ZstdCodec::new();
        let src = vec![7u8; 4096];
        let mut dst = [0u8; 4];

        let raw = codec.compress(&src, &mut dst, 3);
        assert!(codec.is_error(raw));
        let code = codec.error_code(raw);
        assert_eq!(ZstdErrorKind::from_code(code), Some(ZstdErrorKind::DstSizeTooSmall));
        assert_eq!(codec.error_name(code), "Destination buffer is too small");
    }

    #[test]
    fn zstd_sizes_are_not_errors() {
        let codec = ZstdCodec::new();
        for raw in [0usize, 1, 100, 1 << 20] {
            assert!(!codec.is_error(raw));
            assert_eq!(codec.error_code(raw), 0);
        }
        assert!(codec.is_error(usize::MAX));
        assert_eq!(codec.error_code(usize::MAX), ZstdErrorKind::Generic.code());
        assert!(codec.max_level() >= 19);
        assert!(codec.min_level() < 0);
        assert!(codec.version_number() >= 10_400);
    }

    #[test]
    fn zstd_names_every_known_code() {
        let codec = ZstdCodec::new();
        for kind in ZstdErrorKind::all() {
            assert!(!codec.error_name(kind.code()).is_empty(), "{kind:?}");
        }
        assert_eq!(codec.error_name(0), "No error detected");
    }

    // --- Taxonomy ---

    #[test]
    fn taxonomy_is_closed_and_ordered() {
        let all = ZstdErrorKind::all();
        assert_eq!(all.len(), 23);
        assert!(all.windows(2).all(|w| w[0].code() < w[1].code()));

        let unique: HashSet<_> = all.iter().map(|k| k.code()).collect();
        assert_eq!(unique.len(), all.len());

        for kind in all {
            assert_eq!(ZstdErrorKind::from_code(kind.code()), Some(*kind));
            assert!(!kind.description().is_empty());
            assert_eq!(kind.to_string(), kind.description());
        }
        assert!(ZstdErrorKind::NoError.is_success());
        assert!(!ZstdErrorKind::DstBufferNull.is_success());
        assert_eq!(ZstdErrorKind::from_code(3), None);
    }

    #[test]
    fn taxonomy_codes_match_libzstd() {
        assert_eq!(ZstdErrorKind::Generic.code(), 1);
        assert_eq!(ZstdErrorKind::PrefixUnknown.code(), 10);
        assert_eq!(ZstdErrorKind::CorruptionDetected.code(), 20);
        assert_eq!(ZstdErrorKind::ChecksumWrong.code(), 22);
        assert_eq!(ZstdErrorKind::ParameterOutOfBound.code(), 42);
        assert_eq!(ZstdErrorKind::DstSizeTooSmall.code(), 70);
        assert_eq!(ZstdErrorKind::DstBufferNull.code(), 74);
        assert_eq!(u32::from(ZstdErrorKind::SrcSizeWrong), 72);
    }
}
