// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Fuzz target for clause decoding and conversion.
// Run with: cargo +nightly fuzz run fuzz_clause_json
//
// Any clause that decodes must convert, and the result must serialise.

#![no_main]

use adhoc_filter::{find_matching_filter_key, Clause, FilterAdapter, FilterClause};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if input.len() <= 8192 {
            if let Ok(clause) = FilterClause::from_json(input) {
                let _ = find_matching_filter_key(&clause);
                let filter = FilterAdapter::default().simple_filter_to_adhoc(&clause, Clause::Having);
                let _ = serde_json::to_string(&filter).unwrap();
            }
        }
    }
});
