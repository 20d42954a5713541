//! Integration tests for the scanner operations over an in-memory backend

mod common;

use common::{bytes_with, wide, FakeBackend, FakeRegion};
use memory_mcp::memory::ProtectionFlags;
use memory_mcp::{Address, MemoryAddress, MemoryScanner, ScanLimits, ValueType};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

const PID: u32 = 4242;
const BASE: usize = 0x40_0000;

fn addresses(entries: &[MemoryAddress]) -> Vec<Address> {
    entries.iter().map(|e| e.address).collect()
}

fn game(regions: Vec<FakeRegion>) -> FakeBackend {
    FakeBackend::new()
        .with_process(1, "System", Vec::new())
        .with_process(PID, "game.exe", regions)
}

#[test]
fn test_string_found_in_both_widths() {
    let mut bytes = bytes_with(100, b"Hello", &[10]);
    bytes[50..60].copy_from_slice(&wide("Hello"));
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(BASE, bytes)]));

    let outcome = scanner.scan_memory("game.exe", "Hello", ValueType::String);

    assert!(outcome.success);
    assert_eq!(outcome.count, 2);
    assert_eq!(
        outcome.addresses,
        vec![
            MemoryAddress::new(Address::new(BASE + 10), "Hello", ValueType::String),
            MemoryAddress::new(Address::new(BASE + 50), "Hello", ValueType::String),
        ]
    );
}

#[test]
fn test_numbers_match_decimal_text_not_binary() {
    let mut bytes = bytes_with(64, b"100", &[4]);
    bytes[32..36].copy_from_slice(&100i32.to_le_bytes());
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(BASE, bytes)]));

    let outcome = scanner.scan_memory("game.exe", "100", ValueType::Int32);

    assert_eq!(addresses(&outcome.addresses), vec![Address::new(BASE + 4)]);
    assert_eq!(outcome.addresses[0].value_type, ValueType::Int32);
}

#[test]
fn test_matches_across_regions_in_address_order() {
    let backend = game(vec![
        FakeRegion::readable(0x1000, bytes_with(0x100, b"gem", &[0x20])),
        FakeRegion::protected(
            0x2000,
            bytes_with(0x100, b"gem", &[0]),
            ProtectionFlags::no_access(),
        ),
        FakeRegion::protected(
            0x3000,
            bytes_with(0x100, b"gem", &[0x80]),
            ProtectionFlags::execute_read(),
        ),
    ]);
    let scanner = MemoryScanner::with_backend(backend);

    let outcome = scanner.scan_memory("game.exe", "gem", ValueType::String);

    assert_eq!(
        addresses(&outcome.addresses),
        vec![Address::new(0x1020), Address::new(0x3080)]
    );
}

#[test]
fn test_unknown_process_reports_not_found() {
    let backend = game(Vec::new());
    let counters = backend.counters();
    let scanner = MemoryScanner::with_backend(backend);

    let outcome = scanner.scan_memory("notepad.exe", "x", ValueType::String);

    assert!(!outcome.success);
    assert_eq!(outcome.count, 0);
    assert!(outcome.addresses.is_empty());
    assert_eq!(outcome.message, "Process not found: notepad.exe");
    assert_eq!(counters.opens(), 0);
}

#[test]
fn test_process_name_match_is_exact() {
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(
        BASE,
        b"x".to_vec(),
    )]));
    assert!(!scanner.scan_memory("GAME.EXE", "x", ValueType::String).success);
    assert!(!scanner.scan_memory("game", "x", ValueType::String).success);
    assert!(scanner.scan_memory("game.exe", "x", ValueType::String).success);
}

#[test]
fn test_first_process_with_name_is_scanned() {
    let backend = FakeBackend::new()
        .with_process(10, "twin.exe", vec![FakeRegion::readable(0x1000, b"first".to_vec())])
        .with_process(11, "twin.exe", vec![FakeRegion::readable(0x1000, b"second".to_vec())]);
    let scanner = MemoryScanner::with_backend(backend);

    assert_eq!(scanner.scan_memory("twin.exe", "first", ValueType::String).count, 1);
    assert_eq!(scanner.scan_memory("twin.exe", "second", ValueType::String).count, 0);
}

#[test]
fn test_access_denied_keeps_previous_results() {
    let backend = FakeBackend::new()
        .with_process(1, "open.exe", vec![FakeRegion::readable(BASE, b"coin".to_vec())])
        .with_process(2, "locked.exe", vec![FakeRegion::readable(BASE, b"coin".to_vec())])
        .deny(2);
    let scanner = MemoryScanner::with_backend(backend);

    assert_eq!(scanner.scan_memory("open.exe", "coin", ValueType::String).count, 1);

    let denied = scanner.scan_memory("locked.exe", "coin", ValueType::String);
    assert!(!denied.success);
    assert!(denied.message.starts_with("Access denied to process 2"));
    assert_eq!(scanner.get_addresses(10).count, 1);
}

#[test]
fn test_scan_replaces_results_wholesale() {
    let bytes = bytes_with(0x200, b"aaa", &[0x10, 0x20]);
    let mut bytes = bytes;
    bytes[0x100..0x103].copy_from_slice(b"bbb");
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(BASE, bytes)]));

    assert_eq!(scanner.scan_memory("game.exe", "aaa", ValueType::String).count, 2);
    let second = scanner.scan_memory("game.exe", "bbb", ValueType::String);

    assert_eq!(scanner.store().snapshot().unwrap(), second.addresses);
    assert_eq!(
        scanner.get_addresses(100).addresses,
        vec![format!("0x{:X}", BASE + 0x100)]
    );
}

#[test]
fn test_scan_without_matches_empties_results() {
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(
        BASE,
        b"abc".to_vec(),
    )]));
    scanner.scan_memory("game.exe", "abc", ValueType::String);

    let outcome = scanner.scan_memory("game.exe", "zzz", ValueType::String);
    assert!(outcome.success);
    assert_eq!(outcome.message, "Scan completed. Found 0 matches");
    assert!(scanner.store().is_empty().unwrap());
}

#[test]
fn test_empty_value_matches_nothing() {
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(BASE, vec![0; 32])]));
    let outcome = scanner.scan_memory("game.exe", "", ValueType::String);
    assert!(outcome.success);
    assert_eq!(outcome.count, 0);
}

#[test]
fn test_unreadable_regions_are_skipped() {
    let backend = game(vec![
        FakeRegion::readable(0x1000, bytes_with(0x40, b"key", &[1])),
        FakeRegion::unreadable(0x2000, 0x40),
        FakeRegion::readable(0x3000, bytes_with(0x40, b"key", &[2])),
    ]);
    let counters = backend.counters();
    let scanner = MemoryScanner::with_backend(backend);

    let outcome = scanner.scan_memory("game.exe", "key", ValueType::String);

    assert!(outcome.success);
    assert_eq!(
        addresses(&outcome.addresses),
        vec![Address::new(0x1001), Address::new(0x3002)]
    );
    assert_eq!(counters.reads(), 3);
}

#[test]
fn test_region_cap_bounds_reads() {
    let regions: Vec<_> = (0..1100)
        .map(|i| FakeRegion::readable(0x10000 + i * 0x1000, bytes_with(16, b"hp", &[0])))
        .collect();
    let backend = game(regions);
    let counters = backend.counters();
    let scanner = MemoryScanner::with_backend(backend);

    let outcome = scanner.scan_memory("game.exe", "hp", ValueType::String);

    assert!(outcome.success);
    assert!(counters.reads() <= 1000);
    assert_eq!(outcome.count, 1000);
    assert_eq!(
        outcome.addresses.last().map(|e| e.address),
        Some(Address::new(0x10000 + 999 * 0x1000))
    );
}

#[test]
fn test_custom_limits() {
    let regions: Vec<_> = (0..5)
        .map(|i| FakeRegion::readable(0x10000 + i * 0x1000, bytes_with(64, b"hp", &[48])))
        .collect();
    let scanner = MemoryScanner::with_backend(game(regions)).with_limits(ScanLimits {
        max_regions: 3,
        max_region_size: 64,
    });
    assert_eq!(scanner.scan_memory("game.exe", "hp", ValueType::String).count, 3);

    let truncating = scanner.with_limits(ScanLimits {
        max_regions: 3,
        max_region_size: 32,
    });
    assert_eq!(truncating.scan_memory("game.exe", "hp", ValueType::String).count, 0);
}

#[test]
fn test_handle_released_on_every_path() {
    let backend = FakeBackend::new()
        .with_process(1, "open.exe", vec![FakeRegion::readable(BASE, b"gold".to_vec())])
        .with_process(2, "locked.exe", Vec::new())
        .deny(2);
    let counters = backend.counters();
    let scanner = MemoryScanner::with_backend(backend);

    scanner.scan_memory("open.exe", "gold", ValueType::String);
    scanner.scan_memory("open.exe", "none", ValueType::String);
    scanner.scan_memory("locked.exe", "gold", ValueType::String);
    scanner.scan_memory("missing.exe", "gold", ValueType::String);

    assert_eq!(counters.opens(), 2);
    assert_eq!(counters.releases(), 2);
}

#[test]
fn test_listing_is_capped_and_ordered() {
    // A non-zero byte after each hit keeps the wide form from matching
    let bytes = bytes_with(0x100, b"z!", &[0x10, 0x20, 0x30, 0x40]);
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(BASE, bytes)]));
    scanner.scan_memory("game.exe", "z", ValueType::String);

    let two = scanner.get_addresses(2);
    assert!(two.success);
    assert_eq!(two.count, 2);
    assert_eq!(
        two.addresses,
        vec![format!("0x{:X}", BASE + 0x10), format!("0x{:X}", BASE + 0x20)]
    );

    assert_eq!(scanner.get_addresses(100).count, 4);
    assert_eq!(scanner.get_addresses(0).count, 0);
}

#[test]
fn test_narrow_and_wide_hits_on_same_bytes_are_both_kept() {
    let offsets = [0x10, 0x20, 0x30, 0x40];
    let bytes = bytes_with(0x100, b"z", &offsets);
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(BASE, bytes)]));

    let outcome = scanner.scan_memory("game.exe", "z", ValueType::String);

    assert_eq!(outcome.count, 8);
    let expected: Vec<Address> = offsets
        .iter()
        .chain(offsets.iter())
        .map(|&offset| Address::new(BASE + offset))
        .collect();
    assert_eq!(addresses(&outcome.addresses), expected);
    assert_eq!(scanner.get_addresses(100).count, 8);
}

#[test]
fn test_filter_relabels_selected_addresses() {
    let bytes = bytes_with(0x100, b"100", &[0x10, 0x20, 0x30]);
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(BASE, bytes)]));
    scanner.scan_memory("game.exe", "100", ValueType::Int);

    let picked = vec![
        format!("0x{:X}", BASE + 0x30),
        "0xDEAD".to_string(),
        format!("{:x}", BASE + 0x10),
    ];
    let outcome = scanner.filter_addresses(&picked, "99", ValueType::Int32);

    assert!(outcome.success);
    assert_eq!(outcome.message, "Filtering completed. Found 2 addresses");
    assert_eq!(
        outcome.addresses,
        vec![
            MemoryAddress::new(Address::new(BASE + 0x30), "99", ValueType::Int32),
            MemoryAddress::new(Address::new(BASE + 0x10), "99", ValueType::Int32),
        ]
    );

    let stored = scanner.store().snapshot().unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[1], MemoryAddress::new(Address::new(BASE + 0x20), "100", ValueType::Int));
    assert_eq!(stored[0].value, "99");
    assert_eq!(stored[2].value, "99");
}

#[test]
fn test_filter_on_empty_store() {
    let scanner = MemoryScanner::with_backend(game(Vec::new()));
    let outcome = scanner.filter_addresses(&["0x1000"], "1", ValueType::Int);
    assert!(outcome.success);
    assert_eq!(outcome.count, 0);
}

#[test]
fn test_reset_is_idempotent() {
    let scanner = MemoryScanner::with_backend(game(vec![FakeRegion::readable(
        BASE,
        b"abc".to_vec(),
    )]));
    scanner.scan_memory("game.exe", "abc", ValueType::String);

    for _ in 0..2 {
        let reset = scanner.reset();
        assert!(reset.success);
        assert_eq!(reset.message, "Scanner reset");
        assert_eq!(scanner.get_addresses(100).count, 0);
    }
}

#[test]
fn test_concurrent_operations_are_consistent() {
    let bytes = bytes_with(0x1000, b"ore", &[0, 0x100, 0x200]);
    let backend = game(vec![FakeRegion::readable(BASE, bytes)]);
    let scanner = Arc::new(MemoryScanner::with_backend(backend));

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let scanner = Arc::clone(&scanner);
            thread::spawn(move || {
                if i % 2 == 0 {
                    assert!(scanner.scan_memory("game.exe", "ore", ValueType::String).success);
                } else {
                    let listing = scanner.get_addresses(100);
                    assert!(listing.count == 0 || listing.count == 3);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(scanner.get_addresses(100).count, 3);
}
