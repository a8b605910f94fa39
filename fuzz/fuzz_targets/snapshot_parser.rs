#![no_main]

use libfuzzer_sys::fuzz_target;
use macbots::blocklist::Blocklist;
use macbots::filter::Inventory;
use macbots::snapshot::parse_records;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Arbitrary snapshots may fail lookups but must never panic
        if let Ok(records) = parse_records(input) {
            let inventory = Inventory::new(records.clone(), records, Blocklist::default());
            if let Ok(groups) = inventory.relevant_bots_by_master() {
                for master in groups.masters() {
                    if let Ok(builders) = inventory.builders_for_master(master) {
                        let _ = inventory.hostnames_for_builders(master, &builders);
                    }
                }
            }
        }
    }
});
