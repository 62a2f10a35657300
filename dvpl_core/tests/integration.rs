//! Integration tests: DVPL containers written by `encode` are accepted by
//! `decode`, and every corruption the footer can detect is rejected with the
//! matching error.
use dvpl_codecs::{Lz4FastProvider, Lz4HcProvider, StoreProvider};
use dvpl_core::format::TYPE_LZ4_HC;
use dvpl_core::{crc32, decode, encode, inspect, DvplError, Footer, FOOTER_SIZE};

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Generate `len` highly compressible bytes (repeating pattern).
fn compressible_bytes(len: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog. ";
    (0..len).map(|i| pattern[i % pattern.len()]).collect()
}

/// Swap the footer of `container` for `footer`, keeping the payload.
fn with_footer(container: &[u8], footer: &Footer) -> Vec<u8> {
    let mut out = container[..container.len() - FOOTER_SIZE].to_vec();
    out.extend_from_slice(&footer.to_bytes());
    out
}

// ── checksum ───────────────────────────────────────────────────────────────

#[test]
fn test_crc32_check_value_is_bit_cast_to_i32() {
    // 0xCBF43926 has the top bit set, so it must come back negative.
    assert_eq!(crc32(b"123456789"), 0xCBF4_3926_u32 as i32);
    assert_eq!(crc32(b"123456789"), -873_187_034);
    assert_eq!(crc32(b""), 0);
}

#[test]
fn test_negative_checksum_survives_footer_roundtrip() {
    let container = encode(b"123456789", false, &StoreProvider).unwrap();
    let footer = inspect(&container).unwrap();
    assert_eq!(footer.crc32, -873_187_034);
    assert_eq!(
        &container[9 + 8..9 + 12],
        &0xCBF4_3926_u32.to_le_bytes(),
        "checksum must be written as the raw CRC bits"
    );
    assert_eq!(decode(&container, &StoreProvider).unwrap(), b"123456789");
}

// ── footer layout ──────────────────────────────────────────────────────────

#[test]
fn test_footer_layout() {
    let footer = Footer {
        original_size: 0x0403_0201,
        compressed_size: 0x0807_0605,
        crc32: -2,
        type_tag: 2,
    };
    let bytes = footer.to_bytes();
    assert_eq!(
        bytes,
        [
            0x01, 0x02, 0x03, 0x04, // original size
            0x05, 0x06, 0x07, 0x08, // compressed size
            0xFE, 0xFF, 0xFF, 0xFF, // crc32 = -2
            0x02, 0x00, 0x00, 0x00, // type
            b'D', b'V', b'P', b'L',
        ]
    );
    assert_eq!(Footer::parse(&bytes).unwrap(), footer);
    assert_eq!(
        footer.to_string(),
        "Footer={oSize=67305985, cSize=134678021, crc32=-2, type=2}"
    );
}

#[test]
fn test_footer_is_read_from_the_end() {
    let mut container = vec![0xAA; 7];
    let footer = Footer {
        original_size: 7,
        compressed_size: 7,
        crc32: 123,
        type_tag: 0,
    };
    container.extend_from_slice(&footer.to_bytes());
    assert_eq!(Footer::parse(&container).unwrap(), footer);
}

// ── scenarios ──────────────────────────────────────────────────────────────

#[test]
fn test_empty_input() {
    let container = encode(&[], false, &StoreProvider).unwrap();
    assert_eq!(container.len(), FOOTER_SIZE);
    assert_eq!(
        inspect(&container).unwrap(),
        Footer {
            original_size: 0,
            compressed_size: 0,
            crc32: 0,
            type_tag: 0,
        }
    );
    assert_eq!(&container[16..], b"DVPL");
    assert!(decode(&container, &StoreProvider).unwrap().is_empty());
}

#[test]
fn test_empty_input_with_compression_is_stored() {
    for container in [
        encode(&[], true, &Lz4HcProvider::default()).unwrap(),
        encode(&[], true, &Lz4FastProvider).unwrap(),
    ] {
        assert_eq!(container, encode(&[], false, &StoreProvider).unwrap());
    }
}

#[test]
fn test_too_short_buffer() {
    assert_eq!(
        decode(&[0x01, 0x02], &StoreProvider),
        Err(DvplError::FooterTooSmall { len: 2 })
    );
    assert_eq!(
        inspect(&[0u8; 19]),
        Err(DvplError::FooterTooSmall { len: 19 })
    );
}

#[test]
fn test_unknown_type() {
    let payload = b"valid payload, valid checksum, bogus type";
    let footer = Footer {
        original_size: payload.len() as u32,
        compressed_size: payload.len() as u32,
        crc32: crc32(payload),
        type_tag: 5,
    };
    let mut container = payload.to_vec();
    container.extend_from_slice(&footer.to_bytes());

    assert_eq!(
        decode(&container, &StoreProvider),
        Err(DvplError::UnknownFormat { type_tag: 5 })
    );
}

#[test]
fn test_decompressed_size_lie() {
    let data = compressible_bytes(16 * 1024);
    let container = encode(&data, true, &Lz4HcProvider::default()).unwrap();
    let mut footer = inspect(&container).unwrap();
    assert_eq!(footer.type_tag, TYPE_LZ4_HC);

    footer.original_size += 10;
    let tampered = with_footer(&container, &footer);

    assert_eq!(
        decode(&tampered, &Lz4HcProvider::default()),
        Err(DvplError::DecompressedSizeMismatch {
            expected: data.len() as u32 + 10,
            actual: data.len(),
        })
    );
}

#[test]
fn test_decompressed_size_understated_fails_in_provider() {
    let data = compressible_bytes(16 * 1024);
    let container = encode(&data, true, &Lz4FastProvider).unwrap();
    let mut footer = inspect(&container).unwrap();
    footer.original_size -= 1;
    let tampered = with_footer(&container, &footer);

    match decode(&tampered, &Lz4FastProvider) {
        Err(DvplError::Decompression { provider, .. }) => assert_eq!(provider, "lz4"),
        other => panic!("expected a decompression failure, got {other:?}"),
    }
}

// ── validation order ───────────────────────────────────────────────────────

#[test]
fn test_size_mismatch() {
    let mut container = encode(b"some payload", false, &StoreProvider).unwrap();
    container.insert(0, 0x00);

    assert_eq!(
        decode(&container, &StoreProvider),
        Err(DvplError::SizeMismatch {
            payload_len: 13,
            compressed_size: 12,
        })
    );
}

#[test]
fn test_checksum_mismatch_carries_both_values() {
    let mut container = encode(b"some payload", false, &StoreProvider).unwrap();
    let expected = inspect(&container).unwrap().crc32;
    container[0] ^= 0x01;
    let computed = crc32(&container[..12]);

    assert_eq!(
        decode(&container, &StoreProvider),
        Err(DvplError::ChecksumMismatch { computed, expected })
    );
}

#[test]
fn test_checksum_checked_before_type() {
    let payload = b"abc";
    let footer = Footer {
        original_size: 3,
        compressed_size: 3,
        crc32: crc32(payload).wrapping_add(1),
        type_tag: 9,
    };
    let mut container = payload.to_vec();
    container.extend_from_slice(&footer.to_bytes());

    assert!(matches!(
        decode(&container, &StoreProvider),
        Err(DvplError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_uncompressed_size_mismatch() {
    let container = encode(b"stored verbatim", false, &StoreProvider).unwrap();
    let mut footer = inspect(&container).unwrap();
    footer.original_size = 99;
    let tampered = with_footer(&container, &footer);

    assert_eq!(
        decode(&tampered, &StoreProvider),
        Err(DvplError::UncompressedSizeMismatch {
            original_size: 99,
            compressed_size: 15,
        })
    );
}

#[test]
fn test_invalid_signature_reports_found_text() {
    let mut container = encode(b"payload", false, &StoreProvider).unwrap();
    let n = container.len();
    container[n - 4..].copy_from_slice(b"DVPX");

    assert_eq!(
        decode(&container, &StoreProvider),
        Err(DvplError::InvalidSignature {
            found: "DVPX".to_string(),
        })
    );
}

// ── encode paths ───────────────────────────────────────────────────────────

#[test]
fn test_compressible_data_is_stored_as_lz4hc() {
    let data = compressible_bytes(64 * 1024);
    let container = encode(&data, true, &Lz4HcProvider::default()).unwrap();
    let footer = inspect(&container).unwrap();

    assert_eq!(footer.type_tag, TYPE_LZ4_HC);
    assert_eq!(footer.original_size as usize, data.len());
    assert!(
        (footer.compressed_size as usize) < data.len(),
        "lz4hc should shrink repetitive text: stored={} raw={}",
        footer.compressed_size,
        data.len()
    );
    assert_eq!(container.len(), footer.compressed_size as usize + FOOTER_SIZE);
    assert_eq!(footer.crc32, crc32(&container[..footer.compressed_size as usize]));
    assert_eq!(decode(&container, &Lz4HcProvider::default()).unwrap(), data);
}

#[test]
fn test_incompressible_data_falls_back_to_stored() {
    let data = pseudo_random_bytes(8 * 1024, 0x1234_5678);
    let stored = encode(&data, false, &StoreProvider).unwrap();

    assert_eq!(encode(&data, true, &Lz4HcProvider::default()).unwrap(), stored);
    assert_eq!(encode(&data, true, &Lz4FastProvider).unwrap(), stored);
    assert_eq!(inspect(&stored).unwrap().type_tag, 0);
}

#[test]
fn test_provider_refusal_falls_back_to_stored() {
    let data = compressible_bytes(4096);
    assert_eq!(
        encode(&data, true, &StoreProvider).unwrap(),
        encode(&data, false, &StoreProvider).unwrap()
    );
}

#[test]
fn test_uncompressed_container_is_payload_plus_footer() {
    let data = compressible_bytes(1000);
    let container = encode(&data, false, &Lz4HcProvider::default()).unwrap();
    assert_eq!(container.len(), data.len() + FOOTER_SIZE);
    assert_eq!(&container[..data.len()], data.as_slice());
}

// ── cross-provider compatibility ───────────────────────────────────────────

#[test]
fn test_providers_read_each_others_blocks() {
    let data = compressible_bytes(32 * 1024 + 17);

    let hc = encode(&data, true, &Lz4HcProvider::new(12)).unwrap();
    let fast = encode(&data, true, &Lz4FastProvider).unwrap();

    assert_eq!(decode(&hc, &Lz4FastProvider).unwrap(), data);
    assert_eq!(decode(&hc, &StoreProvider).unwrap(), data);
    assert_eq!(decode(&fast, &Lz4HcProvider::default()).unwrap(), data);
}

#[test]
fn test_legacy_lz4_type_is_decoded() {
    let data = compressible_bytes(8 * 1024);
    let container = encode(&data, true, &Lz4FastProvider).unwrap();
    let mut footer = inspect(&container).unwrap();
    footer.type_tag = 1;
    let legacy = with_footer(&container, &footer);

    assert_eq!(decode(&legacy, &Lz4HcProvider::default()).unwrap(), data);
}

// ── concurrency ────────────────────────────────────────────────────────────

#[test]
fn test_shared_provider_across_threads() {
    let provider = Lz4HcProvider::default();
    std::thread::scope(|s| {
        for seed in 0..8u64 {
            let provider = &provider;
            s.spawn(move || {
                let mut data = compressible_bytes(4096 + seed as usize * 97);
                data.extend(pseudo_random_bytes(64, seed));
                let container = encode(&data, true, provider).unwrap();
                assert_eq!(decode(&container, provider).unwrap(), data);
            });
        }
    });
}
